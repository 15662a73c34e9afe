//! Drawing seam.
//!
//! Boxes emit solid rects, textured quads and text runs through the
//! [`Canvas`] trait; the host turns them into whatever its renderer needs.
//! Every call carries the clip rect the primitive must be cut to.

use serde::Serialize;

use crate::geometry::{Color, Rect};
use crate::resources::{FontId, TextureId};
use crate::style::Align;

/// Label text ready to draw inside a destination rect.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRun {
    pub text: String,
    pub font: FontId,
    pub color: Color,
    /// Highlight behind the glyphs.
    pub mark: Color,
    pub halign: Align,
    pub valign: Align,
}

/// Rendering backend.
pub trait Canvas {
    fn draw_rect(&mut self, dst: Rect, clip: Rect, color: Color);

    /// Draw the normalized `src` region of `texture` into `dst`, modulated
    /// by `tint`.
    fn draw_texture(&mut self, dst: Rect, clip: Rect, texture: TextureId, src: Rect, tint: Color);

    fn draw_text(&mut self, dst: Rect, clip: Rect, run: &TextRun);
}

/// A solid rectangle primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolidRect {
    pub rect: Rect,
    pub clip: Rect,
    pub color: Color,
}

/// A textured quad primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImagePrimitive {
    pub rect: Rect,
    pub clip: Rect,
    pub texture: TextureId,
    pub src: Rect,
    pub tint: Color,
}

/// A positioned text primitive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextPrimitive {
    pub rect: Rect,
    pub clip: Rect,
    pub run: TextRun,
}

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    Rect(SolidRect),
    Image(ImagePrimitive),
    Text(TextPrimitive),
}

/// A canvas that records primitives in paint order.
#[derive(Debug, Default, Clone, Serialize)]
pub struct DrawList {
    primitives: Vec<Primitive>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.primitives.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn solid_rects(&self) -> impl Iterator<Item = &SolidRect> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Rect(r) => Some(r),
            _ => None,
        })
    }

    pub fn images(&self) -> impl Iterator<Item = &ImagePrimitive> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Image(i) => Some(i),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextPrimitive> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Text(t) => Some(t),
            _ => None,
        })
    }
}

impl Canvas for DrawList {
    fn draw_rect(&mut self, dst: Rect, clip: Rect, color: Color) {
        self.primitives.push(Primitive::Rect(SolidRect {
            rect: dst,
            clip,
            color,
        }));
    }

    fn draw_texture(&mut self, dst: Rect, clip: Rect, texture: TextureId, src: Rect, tint: Color) {
        self.primitives.push(Primitive::Image(ImagePrimitive {
            rect: dst,
            clip,
            texture,
            src,
            tint,
        }));
    }

    fn draw_text(&mut self, dst: Rect, clip: Rect, run: &TextRun) {
        self.primitives.push(Primitive::Text(TextPrimitive {
            rect: dst,
            clip,
            run: run.clone(),
        }));
    }
}

/// Forwards to another canvas with every rect multiplied by `scale`.
///
/// Layout runs in unscaled window units; this maps them to screen pixels.
pub struct ScaledCanvas<'a> {
    inner: &'a mut dyn Canvas,
    scale: f32,
}

impl<'a> ScaledCanvas<'a> {
    pub fn new(inner: &'a mut dyn Canvas, scale: f32) -> Self {
        Self { inner, scale }
    }
}

impl Canvas for ScaledCanvas<'_> {
    fn draw_rect(&mut self, dst: Rect, clip: Rect, color: Color) {
        self.inner.draw_rect(dst * self.scale, clip * self.scale, color);
    }

    fn draw_texture(&mut self, dst: Rect, clip: Rect, texture: TextureId, src: Rect, tint: Color) {
        self.inner
            .draw_texture(dst * self.scale, clip * self.scale, texture, src, tint);
    }

    fn draw_text(&mut self, dst: Rect, clip: Rect, run: &TextRun) {
        self.inner.draw_text(dst * self.scale, clip * self.scale, run);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_list_keeps_paint_order() {
        let mut list = DrawList::new();
        let clip = Rect::new(0.0, 0.0, 100.0, 100.0);
        list.draw_rect(Rect::new(0.0, 0.0, 10.0, 10.0), clip, Color::BLACK);
        list.draw_texture(
            Rect::new(5.0, 5.0, 15.0, 15.0),
            clip,
            TextureId(1),
            Rect::new(0.0, 0.0, 1.0, 1.0),
            Color::WHITE,
        );
        assert_eq!(list.len(), 2);
        assert!(matches!(list.primitives()[0], Primitive::Rect(_)));
        assert!(matches!(list.primitives()[1], Primitive::Image(_)));
        assert_eq!(list.solid_rects().count(), 1);
    }

    #[test]
    fn test_scaled_canvas_scales_geometry() {
        let mut list = DrawList::new();
        {
            let mut scaled = ScaledCanvas::new(&mut list, 2.0);
            scaled.draw_rect(
                Rect::new(1.0, 2.0, 3.0, 4.0),
                Rect::new(0.0, 0.0, 10.0, 10.0),
                Color::WHITE,
            );
        }
        let rect = list.solid_rects().next().unwrap();
        assert_eq!(rect.rect, Rect::new(2.0, 4.0, 6.0, 8.0));
        assert_eq!(rect.clip, Rect::new(0.0, 0.0, 20.0, 20.0));
    }
}
