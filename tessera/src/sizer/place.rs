//! Absolute placement.

use tessera_wire::{Reader, Result};

use super::SizerChild;
use crate::geometry::{Rect, Size};

/// Positions every child at its declared `pos` and `span`, both multiplied
/// by one sizer-wide scale, relative to the sizer's top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub scale: f32,
}

impl Default for Place {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl Place {
    pub fn read(&mut self, r: &mut Reader<'_>) -> Result<()> {
        let mut mask = r.read_mask()?;
        if let Some(scale) = r.field(&mut mask, Reader::read_f32)? {
            self.scale = scale.max(0.0);
        }
        Ok(())
    }

    pub fn min_size(&self, children: &[SizerChild]) -> Size {
        children.iter().fold(Size::ZERO, |acc, child| {
            let span = (child.span * self.scale).max(child.min);
            acc.max(Size::from(child.pos * self.scale) + span)
        })
    }

    pub fn layout(&self, children: &[SizerChild], rect: Rect) -> Vec<Rect> {
        children
            .iter()
            .map(|child| {
                let pos = rect.top_left() + Size::from(child.pos * self.scale);
                Rect::from_pos_size(pos, (child.span * self.scale).max(child.min))
            })
            .collect()
    }
}
