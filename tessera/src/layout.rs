//! The layout protocol shared by boxes and element subtrees.
//!
//! Each frame runs four passes over a window's tree, always in this order
//! and never interleaved with structural edits:
//!
//! 1. `restyle` - reset every box and replay the style strings that match its
//!    current state.
//! 2. `resize` - bottom-up; each node returns its minimum layout size.
//! 3. `relayout` - top-down; each node receives its layout rect and the clip
//!    rect of its parent.
//! 4. `draw` - paint in tree order through a [`Canvas`].
//!
//! `is_pointed` answers hit tests against the rects cached by `relayout`.

use crate::canvas::Canvas;
use crate::config::ManagerConfig;
use crate::geometry::{Pos, Rect, Size};
use crate::resources::Resources;

/// Style strings of one window, addressed by index.
#[derive(Debug, Clone, Default)]
pub struct StyleTable {
    styles: Vec<Vec<u8>>,
}

impl StyleTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, style: Vec<u8>) {
        self.styles.push(style);
    }

    pub fn clear(&mut self) {
        self.styles.clear();
    }

    pub fn get(&self, index: u32) -> Option<&[u8]> {
        self.styles.get(index as usize).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

impl FromIterator<Vec<u8>> for StyleTable {
    fn from_iter<I: IntoIterator<Item = Vec<u8>>>(iter: I) -> Self {
        Self {
            styles: iter.into_iter().collect(),
        }
    }
}

/// Everything a pass needs besides the tree itself.
#[derive(Clone, Copy)]
pub struct LayoutContext<'a> {
    pub styles: &'a StyleTable,
    pub resources: &'a dyn Resources,
    /// Clock for animated layers.
    pub time_ms: u64,
    pub min_tile_scale: f32,
    pub max_grid_tracks: usize,
}

impl<'a> LayoutContext<'a> {
    pub fn new(styles: &'a StyleTable, resources: &'a dyn Resources) -> Self {
        let defaults = ManagerConfig::default();
        Self {
            styles,
            resources,
            time_ms: 0,
            min_tile_scale: defaults.min_tile_scale,
            max_grid_tracks: defaults.max_grid_tracks,
        }
    }

    pub fn with_time(mut self, time_ms: u64) -> Self {
        self.time_ms = time_ms;
        self
    }

    pub fn with_config(mut self, config: &ManagerConfig) -> Self {
        self.min_tile_scale = config.min_tile_scale;
        self.max_grid_tracks = config.max_grid_tracks;
        self
    }
}

/// A node that takes part in the frame passes.
pub trait Layout {
    fn restyle(&mut self, cx: &LayoutContext<'_>);

    /// Compute and cache the minimum layout size.
    fn resize(&mut self, cx: &LayoutContext<'_>) -> Size;

    fn relayout(&mut self, cx: &LayoutContext<'_>, layout_rect: Rect, layout_clip: Rect);

    fn draw(&self, cx: &LayoutContext<'_>, canvas: &mut dyn Canvas);

    fn is_pointed(&self, pos: Pos) -> bool;
}
