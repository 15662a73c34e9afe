//! Geometry encodings on top of `tessera-wire`.

use tessera_wire::{Reader, Result, Writer};

use crate::geometry::{Color, Disp, Pos, Rect, Size};

/// Decoding of the engine's value types.
pub trait ReadExt {
    fn read_pos(&mut self) -> Result<Pos>;
    fn read_size(&mut self) -> Result<Size>;
    fn read_rect(&mut self) -> Result<Rect>;
    fn read_disp(&mut self) -> Result<Disp>;
    fn read_color(&mut self) -> Result<Color>;
    fn read_f32_list(&mut self) -> Result<Vec<f32>>;
}

impl ReadExt for Reader<'_> {
    fn read_pos(&mut self) -> Result<Pos> {
        Ok(Pos::new(self.read_f32()?, self.read_f32()?))
    }

    fn read_size(&mut self) -> Result<Size> {
        Ok(Size::new(self.read_f32()?, self.read_f32()?))
    }

    fn read_rect(&mut self) -> Result<Rect> {
        Ok(Rect::new(
            self.read_f32()?,
            self.read_f32()?,
            self.read_f32()?,
            self.read_f32()?,
        ))
    }

    fn read_disp(&mut self) -> Result<Disp> {
        Ok(Disp::new(
            self.read_f32()?,
            self.read_f32()?,
            self.read_f32()?,
            self.read_f32()?,
        ))
    }

    fn read_color(&mut self) -> Result<Color> {
        self.read_u32().map(Color::from_argb8)
    }

    /// A `u32` count followed by that many floats.
    fn read_f32_list(&mut self) -> Result<Vec<f32>> {
        let count = self.read_u32()? as usize;
        // Each float is four bytes; never reserve more than the input holds.
        let mut list = Vec::with_capacity(count.min(self.remaining() / 4));
        for _ in 0..count {
            list.push(self.read_f32()?);
        }
        Ok(list)
    }
}

/// Encoding counterpart of [`ReadExt`].
pub trait WriteExt {
    fn write_pos(&mut self, pos: Pos) -> &mut Self;
    fn write_size(&mut self, size: Size) -> &mut Self;
    fn write_rect(&mut self, rect: Rect) -> &mut Self;
    fn write_disp(&mut self, disp: Disp) -> &mut Self;
    fn write_color(&mut self, color: Color) -> &mut Self;
    fn write_f32_list(&mut self, list: &[f32]) -> &mut Self;
}

impl WriteExt for Writer {
    fn write_pos(&mut self, pos: Pos) -> &mut Self {
        self.write_f32(pos.x).write_f32(pos.y)
    }

    fn write_size(&mut self, size: Size) -> &mut Self {
        self.write_f32(size.width).write_f32(size.height)
    }

    fn write_rect(&mut self, rect: Rect) -> &mut Self {
        self.write_f32(rect.left)
            .write_f32(rect.top)
            .write_f32(rect.right)
            .write_f32(rect.bottom)
    }

    fn write_disp(&mut self, disp: Disp) -> &mut Self {
        self.write_f32(disp.left)
            .write_f32(disp.top)
            .write_f32(disp.right)
            .write_f32(disp.bottom)
    }

    fn write_color(&mut self, color: Color) -> &mut Self {
        self.write_u32(color.to_argb8())
    }

    fn write_f32_list(&mut self, list: &[f32]) -> &mut Self {
        self.write_u32(list.len() as u32);
        for &v in list {
            self.write_f32(v);
        }
        self
    }
}
