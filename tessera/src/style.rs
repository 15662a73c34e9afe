//! Style model.
//!
//! A [`StyleProps`] is a bundle of property groups. Each group is read from
//! its own length-framed masked record, so a style string may touch any
//! subset of groups and any subset of fields inside them. Fields whose mask
//! bit is clear are left exactly as they were, which is what lets the box
//! layer several per-state styles on top of each other.
//!
//! ## Field order
//!
//! The order of `read` calls below is the wire order; reordering a field is
//! a format change.

use serde::{Deserialize, Serialize};
use tessera_wire::{Reader, Result};

use crate::codec::ReadExt;
use crate::geometry::{Axis, Color, Disp, Pos, Rect, Size};
use crate::resources::{FontSpec, Resources, TextureId};

/// Declares a `u8`-encoded enum whose unknown values decode to a fallback.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident fallback $fallback:ident {
            $($(#[$vmeta:meta])* $variant:ident = $value:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[repr(u8)]
        pub enum $name {
            $($(#[$vmeta])* $variant = $value,)+
        }

        impl $name {
            /// Decode a wire byte, substituting the fallback for unknown values.
            pub fn from_wire(value: u8) -> Self {
                match value {
                    $($value => Self::$variant,)+
                    _ => Self::$fallback,
                }
            }

            pub fn to_wire(self) -> u8 {
                self as u8
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$fallback
            }
        }
    };
}

pub(crate) use wire_enum;

wire_enum! {
    /// Axis selection used for truncation and tiling.
    pub enum DirFlags fallback None {
        None = 0,
        X = 1,
        Y = 2,
        Both = 3,
    }
}

impl DirFlags {
    pub fn has(self, axis: Axis) -> bool {
        match axis {
            Axis::X => matches!(self, DirFlags::X | DirFlags::Both),
            Axis::Y => matches!(self, DirFlags::Y | DirFlags::Both),
        }
    }
}

wire_enum! {
    /// How a box draws and clips.
    pub enum DisplayMode fallback Visible {
        /// Drawn, clipped to the parent.
        Visible = 0,
        /// Drawn, not clipped by the parent.
        Overflow = 1,
        /// Not drawn; content still laid out and drawn.
        Hidden = 2,
        /// Nothing drawn, content included.
        Clipped = 3,
    }
}

wire_enum! {
    /// Side of the padding rect the icon occupies.
    pub enum IconPlace fallback Center {
        Center = 0,
        Left = 1,
        Top = 2,
        Right = 3,
        Bottom = 4,
    }
}

impl IconPlace {
    /// Axis along which a non-overlapping icon reserves space.
    pub fn axis(self) -> Option<Axis> {
        match self {
            IconPlace::Center => None,
            IconPlace::Left | IconPlace::Right => Some(Axis::X),
            IconPlace::Top | IconPlace::Bottom => Some(Axis::Y),
        }
    }
}

wire_enum! {
    /// How an icon image is sized inside its area.
    pub enum ObjectFit fallback Fixed {
        /// Image size times the layer scale.
        Fixed = 0,
        /// Stretch to the area.
        Fill = 1,
        /// Largest aspect-preserving size that fits.
        Contain = 2,
        /// Smallest aspect-preserving size that covers.
        Cover = 3,
    }
}

wire_enum! {
    pub enum Align fallback Center {
        Start = 0,
        Center = 1,
        End = 2,
    }
}

impl Align {
    /// Normalized anchor along the axis.
    pub fn factor(self) -> f32 {
        match self {
            Align::Start => 0.0,
            Align::Center => 0.5,
            Align::End => 1.0,
        }
    }
}

wire_enum! {
    /// Where leftover space goes when nothing claims it by weight.
    pub enum Spacing fallback After {
        After = 0,
        Before = 1,
        Outside = 2,
        Around = 3,
        Between = 4,
        Evenly = 5,
        /// Grow every item equally.
        Remove = 6,
    }
}

// =========================================================================
// Property groups
// =========================================================================

/// How a box arranges its content.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutProps {
    /// Axes on which intrinsic content does not contribute to the minimum size.
    pub clip: DirFlags,
    /// Pixels per placement unit; zero means "fraction of the content rect".
    pub scale: f32,
    pub gap: Size,
    pub hspacing: Spacing,
    pub vspacing: Spacing,
}

impl Default for LayoutProps {
    fn default() -> Self {
        Self {
            clip: DirFlags::None,
            scale: 0.0,
            gap: Size::ZERO,
            hspacing: Spacing::After,
            vspacing: Spacing::After,
        }
    }
}

impl LayoutProps {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn read(&mut self, r: &mut Reader<'_>) -> Result<()> {
        let mut mask = r.read_mask()?;
        if let Some(v) = r.field(&mut mask, Reader::read_u8)? {
            self.clip = DirFlags::from_wire(v);
        }
        if let Some(v) = r.field(&mut mask, Reader::read_f32)? {
            self.scale = v.max(0.0);
        }
        if let Some(v) = r.field(&mut mask, |r| r.read_size())? {
            self.gap = v.clip();
        }
        if let Some(v) = r.field(&mut mask, Reader::read_u8)? {
            self.hspacing = Spacing::from_wire(v);
        }
        if let Some(v) = r.field(&mut mask, Reader::read_u8)? {
            self.vspacing = Spacing::from_wire(v);
        }
        Ok(())
    }

    pub fn spacing(&self, axis: Axis) -> Spacing {
        match axis {
            Axis::X => self.hspacing,
            Axis::Y => self.vspacing,
        }
    }
}

/// How a box is sized and positioned inside its parent.
#[derive(Debug, Clone, PartialEq)]
pub struct SizingProps {
    /// Minimum display size.
    pub size: Size,
    pub span: Size,
    pub pos: Pos,
    pub anchor: Pos,
    pub weight: f32,
    pub margin: Disp,
    pub padding: Disp,
}

impl Default for SizingProps {
    fn default() -> Self {
        Self {
            size: Size::ZERO,
            span: Size::new(1.0, 1.0),
            pos: Pos::ORIGIN,
            anchor: Pos::ORIGIN,
            weight: 0.0,
            margin: Disp::ZERO,
            padding: Disp::ZERO,
        }
    }
}

impl SizingProps {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn read(&mut self, r: &mut Reader<'_>) -> Result<()> {
        let mut mask = r.read_mask()?;
        if let Some(v) = r.field(&mut mask, |r| r.read_size())? {
            self.size = v.clip();
        }
        if let Some(v) = r.field(&mut mask, |r| r.read_size())? {
            self.span = v.clip();
        }
        if let Some(v) = r.field(&mut mask, |r| r.read_pos())? {
            self.pos = v;
        }
        if let Some(v) = r.field(&mut mask, |r| r.read_pos())? {
            self.anchor = v;
        }
        if let Some(v) = r.field(&mut mask, Reader::read_f32)? {
            self.weight = v.max(0.0);
        }
        if let Some(v) = r.field(&mut mask, |r| r.read_disp())? {
            self.margin = v;
        }
        if let Some(v) = r.field(&mut mask, |r| r.read_disp())? {
            self.padding = v;
        }
        Ok(())
    }
}

/// Display mode, nine-slice and icon placement.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualProps {
    pub display: DisplayMode,
    /// Normalized nine-slice insets into the pane image.
    pub middle: Disp,
    pub tile: DirFlags,
    pub icon_place: IconPlace,
    pub icon_gutter: f32,
    pub icon_overlap: bool,
    pub icon_fit: ObjectFit,
    pub icon_align: Pos,
}

impl Default for VisualProps {
    fn default() -> Self {
        Self {
            display: DisplayMode::Visible,
            middle: Disp::ZERO,
            tile: DirFlags::None,
            icon_place: IconPlace::Center,
            icon_gutter: 0.0,
            icon_overlap: false,
            icon_fit: ObjectFit::Fixed,
            icon_align: Pos::new(0.5, 0.5),
        }
    }
}

impl VisualProps {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn read(&mut self, r: &mut Reader<'_>) -> Result<()> {
        let mut mask = r.read_mask()?;
        if let Some(v) = r.field(&mut mask, Reader::read_u8)? {
            self.display = DisplayMode::from_wire(v);
        }
        if let Some(v) = r.field(&mut mask, |r| r.read_disp())? {
            self.middle = v.clip();
        }
        if let Some(v) = r.field(&mut mask, Reader::read_u8)? {
            self.tile = DirFlags::from_wire(v);
        }
        if let Some(v) = r.field(&mut mask, Reader::read_u8)? {
            self.icon_place = IconPlace::from_wire(v);
        }
        if let Some(v) = r.field(&mut mask, Reader::read_f32)? {
            self.icon_gutter = v;
        }
        if let Some(v) = mask.test_shift_bool() {
            self.icon_overlap = v;
        }
        if let Some(v) = r.field(&mut mask, Reader::read_u8)? {
            self.icon_fit = ObjectFit::from_wire(v);
        }
        if let Some(v) = r.field(&mut mask, |r| r.read_pos())? {
            self.icon_align = v;
        }
        Ok(())
    }
}

/// One image layer: a solid fill under an optional tinted texture.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerProps {
    pub image: Option<TextureId>,
    pub fill: Color,
    pub tint: Color,
    pub scale: f32,
    /// Normalized source rect inside the texture.
    pub source: Rect,
    pub num_frames: u32,
    /// Milliseconds per animation frame.
    pub frame_time: u32,
}

impl Default for LayerProps {
    fn default() -> Self {
        Self {
            image: None,
            fill: Color::TRANSPARENT,
            tint: Color::WHITE,
            scale: 1.0,
            source: Rect::new(0.0, 0.0, 1.0, 1.0),
            num_frames: 1,
            frame_time: 1000,
        }
    }
}

impl LayerProps {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn read(&mut self, r: &mut Reader<'_>, resources: &dyn Resources) -> Result<()> {
        let mut mask = r.read_mask()?;
        if let Some(name) = r.field(&mut mask, Reader::read_str16)? {
            self.image = if name.is_empty() {
                None
            } else {
                resources.texture(name)
            };
        }
        if let Some(v) = r.field(&mut mask, |r| r.read_color())? {
            self.fill = v;
        }
        if let Some(v) = r.field(&mut mask, |r| r.read_color())? {
            self.tint = v;
        }
        if let Some(v) = r.field(&mut mask, Reader::read_f32)? {
            self.scale = v.max(0.0);
        }
        if let Some(v) = r.field(&mut mask, |r| r.read_rect())? {
            self.source = v;
        }
        if let Some(v) = r.field(&mut mask, Reader::read_u32)? {
            self.num_frames = v.max(1);
        }
        if let Some(v) = r.field(&mut mask, Reader::read_u32)? {
            self.frame_time = v.max(1);
        }
        Ok(())
    }

    /// Source rect for the frame showing at `time_ms`.
    pub fn frame_source(&self, time_ms: u64) -> Rect {
        if self.num_frames <= 1 {
            return self.source;
        }
        let frame_height = self.source.height() / self.num_frames as f32;
        let frame = (time_ms / self.frame_time as u64) % self.num_frames as u64;
        let top = self.source.top + frame as f32 * frame_height;
        Rect::new(self.source.left, top, self.source.right, top + frame_height)
    }

    /// Pixel size of the current frame, zero without a texture.
    pub fn layer_size(&self, resources: &dyn Resources, time_ms: u64) -> Size {
        match self.image {
            Some(texture) => self
                .frame_source(time_ms)
                .size()
                .scale_by(resources.texture_size(texture))
                .abs(),
            None => Size::ZERO,
        }
    }
}

/// Label text appearance.
#[derive(Debug, Clone, PartialEq)]
pub struct TextProps {
    pub color: Color,
    /// Background highlight drawn behind the text.
    pub mark: Color,
    pub size: f32,
    pub mono: bool,
    pub bold: bool,
    pub italic: bool,
    pub halign: Align,
    pub valign: Align,
}

impl Default for TextProps {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            mark: Color::TRANSPARENT,
            size: 0.0,
            mono: false,
            bold: false,
            italic: false,
            halign: Align::Center,
            valign: Align::Center,
        }
    }
}

impl TextProps {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn read(&mut self, r: &mut Reader<'_>) -> Result<()> {
        let mut mask = r.read_mask()?;
        if let Some(v) = r.field(&mut mask, |r| r.read_color())? {
            self.color = v;
        }
        if let Some(v) = r.field(&mut mask, |r| r.read_color())? {
            self.mark = v;
        }
        if let Some(v) = r.field(&mut mask, Reader::read_f32)? {
            self.size = v.max(0.0);
        }
        if let Some(v) = mask.test_shift_bool() {
            self.mono = v;
        }
        if let Some(v) = mask.test_shift_bool() {
            self.bold = v;
        }
        if let Some(v) = mask.test_shift_bool() {
            self.italic = v;
        }
        if let Some(v) = r.field(&mut mask, Reader::read_u8)? {
            self.halign = Align::from_wire(v);
        }
        if let Some(v) = r.field(&mut mask, Reader::read_u8)? {
            self.valign = Align::from_wire(v);
        }
        Ok(())
    }

    pub fn font_spec(&self) -> FontSpec {
        FontSpec {
            size: self.size,
            mono: self.mono,
            bold: self.bold,
            italic: self.italic,
        }
    }
}

// =========================================================================
// StyleProps
// =========================================================================

/// Every property a box can be styled with.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyleProps {
    pub layout: LayoutProps,
    pub sizing: SizingProps,
    pub visual: VisualProps,
    /// Nine-sliced background.
    pub pane: LayerProps,
    pub icon: LayerProps,
    pub text: TextProps,
}

impl StyleProps {
    pub fn reset(&mut self) {
        self.layout.reset();
        self.sizing.reset();
        self.visual.reset();
        self.pane.reset();
        self.icon.reset();
        self.text.reset();
    }

    /// Merge a style string into these properties.
    ///
    /// On error the groups and fields decoded before the failure stay applied.
    pub fn read(&mut self, r: &mut Reader<'_>, resources: &dyn Resources) -> Result<()> {
        let mut mask = r.read_mask()?;
        if mask.test_shift() {
            self.layout.read(&mut r.nested16()?)?;
        }
        if mask.test_shift() {
            self.sizing.read(&mut r.nested16()?)?;
        }
        if mask.test_shift() {
            self.visual.read(&mut r.nested16()?)?;
        }
        if mask.test_shift() {
            self.pane.read(&mut r.nested16()?, resources)?;
        }
        if mask.test_shift() {
            self.icon.read(&mut r.nested16()?, resources)?;
        }
        if mask.test_shift() {
            self.text.read(&mut r.nested16()?)?;
        }
        Ok(())
    }
}
