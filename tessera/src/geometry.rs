//! Geometric primitives for the layout engine.
//!
//! Rectangles and displacements are stored as edges (left, top, right,
//! bottom) because every layout step insets or outsets them. Sizes may go
//! negative in intermediate arithmetic; `clip()` floors them at zero and is
//! applied wherever a result must be a real extent.

use std::ops::{Add, Index, IndexMut, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// One of the two layout axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub const ALL: [Axis; 2] = [Axis::X, Axis::Y];

    #[inline]
    pub fn cross(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

// =========================================================================
// Pos
// =========================================================================

/// A point in 2D space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pos {
    pub x: f32,
    pub y: f32,
}

impl Pos {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn splat(v: f32) -> Self {
        Self { x: v, y: v }
    }

    /// Component-wise product with a size, used to turn normalized
    /// coordinates into pixels.
    #[inline]
    pub fn scale_by(self, size: Size) -> Self {
        Self {
            x: self.x * size.width,
            y: self.y * size.height,
        }
    }
}

impl From<(f32, f32)> for Pos {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

impl From<Size> for Pos {
    fn from(size: Size) -> Self {
        Self {
            x: size.width,
            y: size.height,
        }
    }
}

impl Add<Size> for Pos {
    type Output = Pos;
    fn add(self, rhs: Size) -> Pos {
        Pos {
            x: self.x + rhs.width,
            y: self.y + rhs.height,
        }
    }
}

impl Sub<Size> for Pos {
    type Output = Pos;
    fn sub(self, rhs: Size) -> Pos {
        Pos {
            x: self.x - rhs.width,
            y: self.y - rhs.height,
        }
    }
}

impl Add for Pos {
    type Output = Pos;
    fn add(self, rhs: Pos) -> Pos {
        Pos {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub for Pos {
    type Output = Size;
    fn sub(self, rhs: Pos) -> Size {
        Size {
            width: self.x - rhs.x,
            height: self.y - rhs.y,
        }
    }
}

impl Mul<f32> for Pos {
    type Output = Pos;
    fn mul(self, rhs: f32) -> Pos {
        Pos {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

impl Index<Axis> for Pos {
    type Output = f32;
    fn index(&self, axis: Axis) -> &f32 {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }
}

impl IndexMut<Axis> for Pos {
    fn index_mut(&mut self, axis: Axis) -> &mut f32 {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
        }
    }
}

// =========================================================================
// Size
// =========================================================================

/// A 2D extent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn splat(v: f32) -> Self {
        Self {
            width: v,
            height: v,
        }
    }

    #[inline]
    pub fn min(self, other: Size) -> Size {
        Size {
            width: self.width.min(other.width),
            height: self.height.min(other.height),
        }
    }

    #[inline]
    pub fn max(self, other: Size) -> Size {
        Size {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }

    /// Floor both components at zero.
    #[inline]
    pub fn clip(self) -> Size {
        self.max(Size::ZERO)
    }

    #[inline]
    pub fn abs(self) -> Size {
        Size {
            width: self.width.abs(),
            height: self.height.abs(),
        }
    }

    /// True if either component is zero or negative.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Component-wise product.
    #[inline]
    pub fn scale_by(self, other: Size) -> Size {
        Size {
            width: self.width * other.width,
            height: self.height * other.height,
        }
    }
}

impl From<(f32, f32)> for Size {
    fn from((width, height): (f32, f32)) -> Self {
        Self { width, height }
    }
}

impl From<Pos> for Size {
    fn from(pos: Pos) -> Self {
        Self {
            width: pos.x,
            height: pos.y,
        }
    }
}

impl Add for Size {
    type Output = Size;
    fn add(self, rhs: Size) -> Size {
        Size {
            width: self.width + rhs.width,
            height: self.height + rhs.height,
        }
    }
}

impl Sub for Size {
    type Output = Size;
    fn sub(self, rhs: Size) -> Size {
        Size {
            width: self.width - rhs.width,
            height: self.height - rhs.height,
        }
    }
}

impl Mul<f32> for Size {
    type Output = Size;
    fn mul(self, rhs: f32) -> Size {
        Size {
            width: self.width * rhs,
            height: self.height * rhs,
        }
    }
}

impl Neg for Size {
    type Output = Size;
    fn neg(self) -> Size {
        Size {
            width: -self.width,
            height: -self.height,
        }
    }
}

impl Index<Axis> for Size {
    type Output = f32;
    fn index(&self, axis: Axis) -> &f32 {
        match axis {
            Axis::X => &self.width,
            Axis::Y => &self.height,
        }
    }
}

impl IndexMut<Axis> for Size {
    fn index_mut(&mut self, axis: Axis) -> &mut f32 {
        match axis {
            Axis::X => &mut self.width,
            Axis::Y => &mut self.height,
        }
    }
}

// =========================================================================
// Disp
// =========================================================================

/// Per-edge displacement (margins, padding, nine-slice borders).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Disp {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Disp {
    pub const ZERO: Self = Self {
        left: 0.0,
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
    };

    #[inline]
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[inline]
    pub fn uniform(v: f32) -> Self {
        Self::new(v, v, v, v)
    }

    /// Total horizontal and vertical displacement.
    #[inline]
    pub fn extents(&self) -> Size {
        Size::new(self.left + self.right, self.top + self.bottom)
    }

    #[inline]
    pub fn clip(self) -> Disp {
        Disp::new(
            self.left.max(0.0),
            self.top.max(0.0),
            self.right.max(0.0),
            self.bottom.max(0.0),
        )
    }

    /// Scale horizontal edges by `size.width` and vertical edges by
    /// `size.height`, turning normalized insets into pixels.
    #[inline]
    pub fn scale_by(self, size: Size) -> Disp {
        Disp::new(
            self.left * size.width,
            self.top * size.height,
            self.right * size.width,
            self.bottom * size.height,
        )
    }
}

impl Add for Disp {
    type Output = Disp;
    fn add(self, rhs: Disp) -> Disp {
        Disp::new(
            self.left + rhs.left,
            self.top + rhs.top,
            self.right + rhs.right,
            self.bottom + rhs.bottom,
        )
    }
}

impl Mul<f32> for Disp {
    type Output = Disp;
    fn mul(self, rhs: f32) -> Disp {
        Disp::new(
            self.left * rhs,
            self.top * rhs,
            self.right * rhs,
            self.bottom * rhs,
        )
    }
}

// =========================================================================
// Rect
// =========================================================================

/// A rectangle stored by its edges.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub const ZERO: Self = Self {
        left: 0.0,
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
    };

    #[inline]
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[inline]
    pub fn from_pos_size(pos: Pos, size: Size) -> Self {
        Self::new(pos.x, pos.y, pos.x + size.width, pos.y + size.height)
    }

    #[inline]
    pub fn from_size(size: Size) -> Self {
        Self::from_pos_size(Pos::ORIGIN, size)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    #[inline]
    pub fn top_left(&self) -> Pos {
        Pos::new(self.left, self.top)
    }

    /// Leading edge along `axis`.
    #[inline]
    pub fn start(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.left,
            Axis::Y => self.top,
        }
    }

    /// Trailing edge along `axis`.
    #[inline]
    pub fn end(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.right,
            Axis::Y => self.bottom,
        }
    }

    /// True if the rectangle covers no area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size().is_empty()
    }

    /// Half-open containment: the left/top edges are inside, the right/bottom
    /// edges are not.
    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        pos.x >= self.left && pos.y >= self.top && pos.x < self.right && pos.y < self.bottom
    }

    #[inline]
    pub fn inset_by(&self, disp: Disp) -> Rect {
        Rect::new(
            self.left + disp.left,
            self.top + disp.top,
            self.right - disp.right,
            self.bottom - disp.bottom,
        )
    }

    #[inline]
    pub fn outset_by(&self, disp: Disp) -> Rect {
        Rect::new(
            self.left - disp.left,
            self.top - disp.top,
            self.right + disp.right,
            self.bottom + disp.bottom,
        )
    }

    /// Keep the top-left corner, flooring the size at zero.
    #[inline]
    pub fn clip(&self) -> Rect {
        Rect::from_pos_size(self.top_left(), self.size().clip())
    }

    /// Overlap of two rectangles. The result may be inverted when they do not
    /// overlap; callers clip or test `is_empty()`.
    #[inline]
    pub fn intersect_with(&self, other: &Rect) -> Rect {
        Rect::new(
            self.left.max(other.left),
            self.top.max(other.top),
            self.right.min(other.right),
            self.bottom.min(other.bottom),
        )
    }

    #[inline]
    pub fn union_with(&self, other: &Rect) -> Rect {
        Rect::new(
            self.left.min(other.left),
            self.top.min(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
        )
    }
}

impl Mul<f32> for Rect {
    type Output = Rect;
    fn mul(self, rhs: f32) -> Rect {
        Rect::new(
            self.left * rhs,
            self.top * rhs,
            self.right * rhs,
            self.bottom * rhs,
        )
    }
}

// =========================================================================
// Color
// =========================================================================

/// RGBA color with components in 0.0-1.0 range.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);

    #[inline]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Unpack an ARGB8 value (alpha in the highest byte).
    #[inline]
    pub fn from_argb8(packed: u32) -> Self {
        Self {
            a: ((packed >> 24) & 0xFF) as f32 / 255.0,
            r: ((packed >> 16) & 0xFF) as f32 / 255.0,
            g: ((packed >> 8) & 0xFF) as f32 / 255.0,
            b: (packed & 0xFF) as f32 / 255.0,
        }
    }

    /// Pack into ARGB8.
    #[inline]
    pub fn to_argb8(&self) -> u32 {
        let a = (self.a.clamp(0.0, 1.0) * 255.0).round() as u32;
        let r = (self.r.clamp(0.0, 1.0) * 255.0).round() as u32;
        let g = (self.g.clamp(0.0, 1.0) * 255.0).round() as u32;
        let b = (self.b.clamp(0.0, 1.0) * 255.0).round() as u32;
        (a << 24) | (r << 16) | (g << 8) | b
    }

    #[inline]
    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }
}
