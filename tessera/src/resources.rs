//! Texture and font lookup seam.
//!
//! The engine never loads or owns images or fonts. Styles hold opaque
//! handles resolved through [`Resources`], and a missing handle makes the
//! layer or label behave as absent: nothing drawn, zero size.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::geometry::Size;

/// Opaque texture handle issued by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureId(pub u32);

/// Opaque font handle issued by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontId(pub u32);

/// Font request derived from a box's text style.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FontSpec {
    /// Pixel size; zero asks for the host's default size.
    pub size: f32,
    pub mono: bool,
    pub bold: bool,
    pub italic: bool,
}

/// Host services the engine needs during restyle, resize and draw.
pub trait Resources {
    fn texture(&self, name: &str) -> Option<TextureId>;

    /// Pixel size of a texture, or zero if the handle is stale.
    fn texture_size(&self, texture: TextureId) -> Size;

    fn font(&self, spec: &FontSpec) -> Option<FontId>;

    /// Extent of `text` rendered in `font`.
    fn text_size(&self, font: FontId, text: &str) -> Size;
}

// Default glyph metrics at BASE_FONT_SIZE.
pub const CHAR_WIDTH: f32 = 8.4;
pub const LINE_HEIGHT: f32 = 18.0;
pub const BASE_FONT_SIZE: f32 = 14.0;

const FONT_FLAG_BITS: u32 = 3;

/// In-memory resources with named texture sizes and fixed-advance glyphs.
///
/// Used by the debugging binary and tests; a real host backs [`Resources`]
/// with its texture cache and font rasterizer.
#[derive(Debug, Clone)]
pub struct AtlasResources {
    textures: IndexMap<String, Size>,
    char_width: f32,
    line_height: f32,
}

impl Default for AtlasResources {
    fn default() -> Self {
        Self::with_metrics(CHAR_WIDTH, LINE_HEIGHT)
    }
}

impl AtlasResources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Glyph metrics used at [`BASE_FONT_SIZE`].
    pub fn with_metrics(char_width: f32, line_height: f32) -> Self {
        Self {
            textures: IndexMap::new(),
            char_width,
            line_height,
        }
    }

    /// Register a texture, replacing any previous size under the same name.
    pub fn insert_texture(&mut self, name: impl Into<String>, size: Size) -> TextureId {
        let (index, _) = self.textures.insert_full(name.into(), size);
        TextureId(index as u32)
    }

    pub fn texture_name(&self, texture: TextureId) -> Option<&str> {
        self.textures
            .get_index(texture.0 as usize)
            .map(|(name, _)| name.as_str())
    }
}

impl Resources for AtlasResources {
    fn texture(&self, name: &str) -> Option<TextureId> {
        self.textures
            .get_index_of(name)
            .map(|index| TextureId(index as u32))
    }

    fn texture_size(&self, texture: TextureId) -> Size {
        self.textures
            .get_index(texture.0 as usize)
            .map(|(_, size)| *size)
            .unwrap_or(Size::ZERO)
    }

    fn font(&self, spec: &FontSpec) -> Option<FontId> {
        let px = spec.size.round().clamp(0.0, u16::MAX as f32) as u32;
        let flags = spec.mono as u32 | (spec.bold as u32) << 1 | (spec.italic as u32) << 2;
        Some(FontId(px << FONT_FLAG_BITS | flags))
    }

    fn text_size(&self, font: FontId, text: &str) -> Size {
        let px = (font.0 >> FONT_FLAG_BITS) as f32;
        let scale = if px > 0.0 { px / BASE_FONT_SIZE } else { 1.0 };

        let mut lines = 0usize;
        let mut widest = 0usize;
        for line in text.lines() {
            lines += 1;
            widest = widest.max(line.chars().count());
        }
        Size::new(
            widest as f32 * self.char_width * scale,
            lines as f32 * self.line_height * scale,
        )
    }
}
