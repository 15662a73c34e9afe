//! Manager configuration.

use serde::{Deserialize, Serialize};

use crate::window::WindowType;

/// Host-tunable settings. Missing JSON fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    /// Pixel scale of GUI and chat windows.
    pub gui_scale: f32,

    /// Pixel scale of every other window type.
    pub hud_scale: f32,

    /// Deepest element tree a window accepts.
    pub max_tree_depth: usize,

    /// Lower bound for the scale of tiled pane slices.
    pub min_tile_scale: f32,

    /// Upper bound for the track count of one grid axis.
    pub max_grid_tracks: usize,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            gui_scale: 1.0,
            hud_scale: 1.0,
            max_tree_depth: 64,
            min_tile_scale: 0.125,
            max_grid_tracks: 1024,
        }
    }
}

impl ManagerConfig {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn scale(&self, window_type: WindowType) -> f32 {
        match window_type {
            WindowType::Gui | WindowType::Chat => self.gui_scale,
            _ => self.hud_scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ManagerConfig::from_json(r#"{ "gui_scale": 2.0 }"#).unwrap();
        assert_eq!(config.gui_scale, 2.0);
        assert_eq!(config.hud_scale, 1.0);
        assert_eq!(config.max_tree_depth, 64);
    }

    #[test]
    fn test_scale_per_window_type() {
        let config = ManagerConfig {
            gui_scale: 2.0,
            hud_scale: 3.0,
            ..ManagerConfig::default()
        };
        assert_eq!(config.scale(WindowType::Gui), 2.0);
        assert_eq!(config.scale(WindowType::Chat), 2.0);
        assert_eq!(config.scale(WindowType::Hud), 3.0);
        assert_eq!(config.scale(WindowType::Bg), 3.0);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(ManagerConfig::from_json("{ gui_scale: }").is_err());
    }
}
