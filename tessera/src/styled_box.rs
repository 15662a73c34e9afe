//! The styled box: one drawable rectangle with a nine-sliced pane, an icon
//! and a text label.
//!
//! A box holds a style reference for each combination of interaction
//! states. Restyling replays every reference whose state bits are a subset
//! of the current state, lowest index first, so more specific styles layer
//! on top of general ones.
//!
//! ## Rect nesting
//!
//! ```text
//! layout rect
//! └─ display rect   (inset by margin; pane is drawn here)
//!    └─ padding rect (inset by nine-slice border + padding)
//!       ├─ icon rect
//!       └─ content rect (padding rect minus icon and gutter)
//! ```

use bitflags::bitflags;
use tessera_wire::{Reader, Result};

use crate::canvas::{Canvas, TextRun};
use crate::elem::ElemKey;
use crate::event::{Event, EventResult, KeyEvent, MouseButton, MouseEvent, NamedKey, UiEvent};
use crate::geometry::{Axis, Disp, Pos, Rect, Size};
use crate::layout::{Layout, LayoutContext};
use crate::resources::FontId;
use crate::style::{DisplayMode, IconPlace, LayerProps, ObjectFit, SizingProps, StyleProps};

/// Number of distinct state combinations a box can be styled for.
pub const NUM_STATES: usize = 32;

/// Group value meaning "no group".
pub const NO_GROUP: u32 = u32::MAX;

/// Item index of an element's main box.
pub const MAIN_BOX: u32 = 0;

/// Item index of the root element's backdrop box.
pub const BACKDROP_BOX: u32 = 1;

// Tiles per slice beyond which a tiled slice is stretched instead.
const MAX_TILES_PER_SLICE: f32 = 1024.0;

bitflags! {
    /// Interaction states, in increasing style precedence.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BoxState: u32 {
        const FOCUSED = 1 << 0;
        const SELECTED = 1 << 1;
        const HOVERED = 1 << 2;
        const PRESSED = 1 << 3;
        const DISABLED = 1 << 4;
    }
}

/// Identity of a box inside its window: a group and an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoxId(u64);

impl BoxId {
    pub const NONE: BoxId = BoxId(u64::MAX);

    #[inline]
    pub const fn new(group: u32, item: u32) -> Self {
        BoxId(((group as u64) << 32) | item as u64)
    }

    #[inline]
    pub const fn group(self) -> u32 {
        (self.0 >> 32) as u32
    }

    #[inline]
    pub const fn item(self) -> u32 {
        self.0 as u32
    }

    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl Default for BoxId {
    fn default() -> Self {
        BoxId::NONE
    }
}

/// Hover and press state of an element's boxes.
///
/// Only one box of an element can be hovered and one pressed at a time, so
/// the state lives on the element and boxes compare their own id with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Interaction {
    pub hovered: BoxId,
    pub pressed: BoxId,
}

impl Interaction {
    pub fn is_hovered(&self, id: BoxId) -> bool {
        self.hovered == id
    }

    pub fn is_pressed(&self, id: BoxId) -> bool {
        self.pressed == id
    }

    pub fn set_hovered(&mut self, id: BoxId, hovered: bool) {
        if hovered {
            self.hovered = id;
        } else if self.hovered == id {
            self.hovered = BoxId::NONE;
        }
    }

    pub fn set_pressed(&mut self, id: BoxId, pressed: bool) {
        if pressed {
            self.pressed = id;
        } else if self.pressed == id {
            self.pressed = BoxId::NONE;
        }
    }
}

/// Activation fired by a completed full press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pressed;

/// A styleable, drawable rectangle.
#[derive(Debug, Clone)]
pub struct StyledBox {
    id: BoxId,
    state: BoxState,
    style: StyleProps,
    style_refs: [Option<u32>; NUM_STATES],
    label: String,

    // Resolved during restyle.
    font: Option<FontId>,

    // Resolved during resize.
    min_content: Size,
    min_layout: Size,

    // Resolved during relayout.
    display_rect: Rect,
    icon_rect: Rect,
    content_rect: Rect,
    clip_rect: Rect,
}

impl StyledBox {
    pub fn new(id: BoxId) -> Self {
        Self {
            id,
            state: BoxState::empty(),
            style: StyleProps::default(),
            style_refs: [None; NUM_STATES],
            label: String::new(),
            font: None,
            min_content: Size::ZERO,
            min_layout: Size::ZERO,
            display_rect: Rect::ZERO,
            icon_rect: Rect::ZERO,
            content_rect: Rect::ZERO,
            clip_rect: Rect::ZERO,
        }
    }

    pub fn id(&self) -> BoxId {
        self.id
    }

    pub fn style(&self) -> &StyleProps {
        &self.style
    }

    pub fn sizing(&self) -> &SizingProps {
        &self.style.sizing
    }

    pub fn state(&self) -> BoxState {
        self.state
    }

    /// State used by the next restyle.
    pub fn set_state(&mut self, state: BoxState) {
        self.state = state;
    }

    pub fn style_ref(&self, state: BoxState) -> Option<u32> {
        self.style_refs[state.bits() as usize % NUM_STATES]
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn min_layout(&self) -> Size {
        self.min_layout
    }

    pub fn display_rect(&self) -> Rect {
        self.display_rect
    }

    pub fn icon_rect(&self) -> Rect {
        self.icon_rect
    }

    pub fn content_rect(&self) -> Rect {
        self.content_rect
    }

    pub fn clip_rect(&self) -> Rect {
        self.clip_rect
    }

    /// Drop all style references and the label. The resolved style is kept
    /// until the next restyle.
    pub fn reset(&mut self) {
        self.style_refs = [None; NUM_STATES];
        self.label.clear();
    }

    /// Merge a box record.
    ///
    /// Style indices at or beyond `style_count` are logged and ignored.
    pub fn read(&mut self, r: &mut Reader<'_>, style_count: usize) -> Result<()> {
        let mut mask = r.read_mask()?;

        if mask.test_shift() {
            let mut states = r.read_mask()?;
            for slot in self.style_refs.iter_mut() {
                if !states.test_shift() {
                    continue;
                }
                let index = r.read_u32()?;
                if (index as usize) < style_count {
                    *slot = Some(index);
                } else {
                    tracing::warn!("Style {} does not exist", index);
                }
            }
        }
        if let Some(label) = r.field(&mut mask, Reader::read_str16)? {
            self.label = label.to_owned();
        }
        Ok(())
    }

    /// Grow the minimum content size to fit content laid out by the owner.
    pub fn include_content(&mut self, size: Size) {
        self.min_content = self.min_content.max(size);
    }

    // =====================================================================
    // Placement of content
    // =====================================================================

    fn placement_scale(&self) -> Size {
        if self.style.layout.scale == 0.0 {
            self.content_rect.size()
        } else {
            Size::splat(self.style.layout.scale)
        }
    }

    /// Minimum content size needed for a child placed by [`Self::place`].
    pub fn placed_min(&self, child: &SizingProps, child_min: Size) -> Size {
        child_min.max(child.span * self.style.layout.scale)
    }

    /// Layout rect for a child at its normalized position and anchor.
    pub fn place(&self, child: &SizingProps, child_min: Size) -> Rect {
        let scale = self.placement_scale();
        let size = child.span.scale_by(scale).max(child_min);
        let pos = child.pos.scale_by(scale) - Size::from(child.anchor.scale_by(size));
        Rect::from_pos_size(self.content_rect.top_left() + Size::from(pos), size)
    }

    // =====================================================================
    // Geometry helpers
    // =====================================================================

    /// Nine-slice border in pixels.
    fn middle_edges(&self, cx: &LayoutContext<'_>) -> Disp {
        let pane = &self.style.pane;
        self.style
            .visual
            .middle
            .scale_by(pane.layer_size(cx.resources, cx.time_ms))
            * pane.scale
    }

    /// Axis along which a non-overlapping icon takes space from content.
    fn icon_axis(&self) -> Option<Axis> {
        let visual = &self.style.visual;
        if visual.icon_overlap || self.style.icon.image.is_none() {
            return None;
        }
        visual.icon_place.axis()
    }

    fn fit_icon(&self, base: Size, area: Size) -> Size {
        match self.style.visual.icon_fit {
            ObjectFit::Fixed => base * self.style.icon.scale,
            ObjectFit::Fill => area,
            fit @ (ObjectFit::Contain | ObjectFit::Cover) => {
                if base.is_empty() {
                    return Size::ZERO;
                }
                let rx = area.width / base.width;
                let ry = area.height / base.height;
                let ratio = if fit == ObjectFit::Contain {
                    rx.min(ry)
                } else {
                    rx.max(ry)
                };
                base * ratio
            }
        }
    }

    // =====================================================================
    // Drawing
    // =====================================================================

    fn fill(&self, canvas: &mut dyn Canvas, dst: Rect, layer: &LayerProps) {
        if layer.fill.is_transparent() || dst.intersect_with(&self.clip_rect).is_empty() {
            return;
        }
        canvas.draw_rect(dst, self.clip_rect, layer.fill);
    }

    fn draw_pane(&self, cx: &LayoutContext<'_>, canvas: &mut dyn Canvas) {
        let pane = &self.style.pane;
        self.fill(canvas, self.display_rect, pane);

        let Some(texture) = pane.image else {
            return;
        };

        let src = pane.frame_source(cx.time_ms);
        let mut middle_src = self.style.visual.middle.scale_by(src.size());
        let middle_dst = self.middle_edges(cx);

        // Flipped sources flip the slice insets with them.
        if src.width() < 0.0 {
            middle_src.left = -middle_src.left;
            middle_src.right = -middle_src.right;
        }
        if src.height() < 0.0 {
            middle_src.top = -middle_src.top;
            middle_src.bottom = -middle_src.bottom;
        }

        let tex_size = cx.resources.texture_size(texture);
        let tile = self.style.visual.tile;
        let tile_scale = pane.scale.max(cx.min_tile_scale);

        for slice_y in 0..3 {
            for slice_x in 0..3 {
                let mut slice_src = src;
                let mut slice_dst = self.display_rect;

                match slice_x {
                    0 => {
                        slice_dst.right = slice_dst.left + middle_dst.left;
                        slice_src.right = slice_src.left + middle_src.left;
                    }
                    1 => {
                        slice_dst.left += middle_dst.left;
                        slice_dst.right -= middle_dst.right;
                        slice_src.left += middle_src.left;
                        slice_src.right -= middle_src.right;
                    }
                    _ => {
                        slice_dst.left = slice_dst.right - middle_dst.right;
                        slice_src.left = slice_src.right - middle_src.right;
                    }
                }
                match slice_y {
                    0 => {
                        slice_dst.bottom = slice_dst.top + middle_dst.top;
                        slice_src.bottom = slice_src.top + middle_src.top;
                    }
                    1 => {
                        slice_dst.top += middle_dst.top;
                        slice_dst.bottom -= middle_dst.bottom;
                        slice_src.top += middle_src.top;
                        slice_src.bottom -= middle_src.bottom;
                    }
                    _ => {
                        slice_dst.top = slice_dst.bottom - middle_dst.bottom;
                        slice_src.top = slice_src.bottom - middle_src.bottom;
                    }
                }

                // Tiles may bleed out of the slice, so clip to it as well.
                let slice_clip = self.clip_rect.intersect_with(&slice_dst);
                if slice_clip.is_empty() {
                    continue;
                }

                let mut tile_size = slice_dst.size();
                if tile.has(Axis::X) {
                    tile_size.width = (slice_src.width() * tex_size.width * tile_scale).abs();
                }
                if tile.has(Axis::Y) {
                    tile_size.height = (slice_src.height() * tex_size.height * tile_scale).abs();
                }
                if tile_size.is_empty() {
                    continue;
                }

                let cols = tile_count(slice_dst.width(), tile_size.width);
                let rows = tile_count(slice_dst.height(), tile_size.height);
                if cols * rows > MAX_TILES_PER_SLICE {
                    canvas.draw_texture(slice_dst, slice_clip, texture, slice_src, pane.tint);
                    continue;
                }

                for row in 0..rows as u32 {
                    for col in 0..cols as u32 {
                        let tile_pos = Pos::new(
                            slice_dst.left + col as f32 * tile_size.width,
                            slice_dst.top + row as f32 * tile_size.height,
                        );
                        canvas.draw_texture(
                            Rect::from_pos_size(tile_pos, tile_size),
                            slice_clip,
                            texture,
                            slice_src,
                            pane.tint,
                        );
                    }
                }
            }
        }
    }

    fn draw_icon(&self, cx: &LayoutContext<'_>, canvas: &mut dyn Canvas) {
        let icon = &self.style.icon;
        self.fill(canvas, self.icon_rect, icon);

        if let Some(texture) = icon.image {
            if !self.icon_rect.intersect_with(&self.clip_rect).is_empty() {
                canvas.draw_texture(
                    self.icon_rect,
                    self.clip_rect,
                    texture,
                    icon.frame_source(cx.time_ms),
                    icon.tint,
                );
            }
        }
    }

    fn draw_label(&self, canvas: &mut dyn Canvas) {
        let Some(font) = self.font else {
            return;
        };
        if self.label.is_empty() || self.content_rect.intersect_with(&self.clip_rect).is_empty() {
            return;
        }
        let text = &self.style.text;
        let run = TextRun {
            text: self.label.clone(),
            font,
            color: text.color,
            mark: text.mark,
            halign: text.halign,
            valign: text.valign,
        };
        canvas.draw_text(self.content_rect, self.clip_rect, &run);
    }

    // =====================================================================
    // Input
    // =====================================================================

    /// Focus and hover negotiation shared by every interactive box.
    pub fn process_input(
        &self,
        event: &Event,
        elem: ElemKey,
        pointer: Pos,
        interaction: &mut Interaction,
    ) -> bool {
        match event {
            Event::Ui(UiEvent::FocusRequest) => true,
            Event::Ui(UiEvent::FocusChanged { old, .. }) => {
                if *old == Some(elem) {
                    interaction.set_pressed(self.id, false);
                }
                false
            }
            Event::Ui(UiEvent::FocusSubverted) => {
                interaction.set_pressed(self.id, false);
                false
            }
            Event::Ui(UiEvent::HoverRequest) => self.is_pointed(pointer),
            Event::Ui(UiEvent::HoverChanged { new, .. }) => {
                interaction.set_hovered(self.id, *new == Some(elem) && self.is_pointed(pointer));
                true
            }
            _ => false,
        }
    }

    /// The press-and-release gesture of buttons.
    ///
    /// Space arms the box and its release activates it; Escape disarms.
    /// The left mouse button arms while hovered and activates on release
    /// if still hovered.
    pub fn process_full_press(
        &self,
        event: &Event,
        elem: ElemKey,
        pointer: Pos,
        interaction: &mut Interaction,
    ) -> EventResult<Pressed> {
        match event {
            Event::Keyboard(KeyEvent::Pressed { key, repeat, .. }) => {
                if key.is(NamedKey::Space) && !repeat {
                    interaction.set_pressed(self.id, true);
                    EventResult::Captured
                } else if key.is(NamedKey::Escape) && interaction.is_pressed(self.id) {
                    interaction.set_pressed(self.id, false);
                    EventResult::Captured
                } else {
                    EventResult::Ignored
                }
            }
            Event::Keyboard(KeyEvent::Released { key, .. }) => {
                if key.is(NamedKey::Space) && interaction.is_pressed(self.id) {
                    interaction.set_pressed(self.id, false);
                    EventResult::Message(Pressed)
                } else {
                    EventResult::Ignored
                }
            }
            Event::Mouse(MouseEvent::ButtonPressed {
                button: MouseButton::Left,
                ..
            }) => {
                if interaction.is_hovered(self.id) {
                    interaction.set_pressed(self.id, true);
                    EventResult::Captured
                } else {
                    EventResult::Ignored
                }
            }
            Event::Mouse(MouseEvent::ButtonReleased {
                button: MouseButton::Left,
                ..
            }) => {
                let was_pressed = interaction.is_pressed(self.id);
                interaction.set_pressed(self.id, false);
                if interaction.is_hovered(self.id) && was_pressed {
                    EventResult::Message(Pressed)
                } else {
                    EventResult::Ignored
                }
            }
            _ => self.process_input(event, elem, pointer, interaction).into(),
        }
    }
}

fn tile_count(extent: f32, tile: f32) -> f32 {
    (extent / tile).ceil().max(0.0)
}

impl Layout for StyledBox {
    fn restyle(&mut self, cx: &LayoutContext<'_>) {
        self.style.reset();

        for (i, style_ref) in self.style_refs.iter().enumerate() {
            let i = i as u32;
            if self.state.bits() & i != i {
                continue;
            }
            let Some(index) = *style_ref else {
                continue;
            };
            let Some(bytes) = cx.styles.get(index) else {
                continue;
            };
            if let Err(e) = self.style.read(&mut Reader::new(bytes), cx.resources) {
                tracing::warn!("Style {} is malformed: {}", index, e);
            }
        }

        self.font = cx.resources.font(&self.style.text.font_spec());

        self.min_content = Size::ZERO;
        self.min_layout = Size::ZERO;
        self.display_rect = Rect::ZERO;
        self.icon_rect = Rect::ZERO;
        self.content_rect = Rect::ZERO;
        self.clip_rect = Rect::ZERO;
    }

    fn resize(&mut self, cx: &LayoutContext<'_>) -> Size {
        if let Some(font) = self.font {
            if !self.label.is_empty() {
                let label_size = cx.resources.text_size(font, &self.label);
                self.min_content = self.min_content.max(label_size);
            }
        }

        let clip = self.style.layout.clip;
        for axis in Axis::ALL {
            if clip.has(axis) {
                self.min_content[axis] = 0.0;
            }
        }

        // Only a fixed-scale icon has an intrinsic size; the other fits
        // adapt to whatever room is left.
        let icon_size = match self.style.visual.icon_fit {
            ObjectFit::Fixed => {
                self.style.icon.layer_size(cx.resources, cx.time_ms) * self.style.icon.scale
            }
            _ => Size::ZERO,
        };
        let mut padding_size = self.min_content.max(icon_size);

        if let Some(axis) = self.icon_axis() {
            padding_size[axis] =
                self.min_content[axis] + icon_size[axis] + self.style.visual.icon_gutter;
            padding_size = padding_size.clip();
        }

        let sizing = &self.style.sizing;
        let display_size = (padding_size + self.middle_edges(cx).extents() + sizing.padding.extents())
            .max(sizing.size);

        self.min_layout = (display_size + sizing.margin.extents()).clip();
        self.min_layout
    }

    fn relayout(&mut self, cx: &LayoutContext<'_>, layout_rect: Rect, layout_clip: Rect) {
        let sizing = &self.style.sizing;
        let visual = &self.style.visual;

        self.display_rect = layout_rect.inset_by(sizing.margin).clip();
        let padding_rect = self
            .display_rect
            .inset_by(self.middle_edges(cx) + sizing.padding)
            .clip();

        let icon_axis = self.icon_axis();
        let mut icon_area = padding_rect.size();
        if let Some(axis) = icon_axis {
            icon_area[axis] -= self.min_content[axis] + visual.icon_gutter;
            icon_area = icon_area.clip();
        }
        let base = self.style.icon.layer_size(cx.resources, cx.time_ms);
        let icon_size = self.fit_icon(base, icon_area);

        let slack = padding_rect.size() - icon_size;
        let align = visual.icon_align;
        let x = match visual.icon_place {
            IconPlace::Left => padding_rect.left,
            IconPlace::Right => padding_rect.left + slack.width,
            _ => padding_rect.left + slack.width * align.x,
        };
        let y = match visual.icon_place {
            IconPlace::Top => padding_rect.top,
            IconPlace::Bottom => padding_rect.top + slack.height,
            _ => padding_rect.top + slack.height * align.y,
        };
        self.icon_rect = Rect::from_pos_size(Pos::new(x, y), icon_size);

        let mut content = padding_rect;
        if icon_axis.is_some() {
            let gutter = visual.icon_gutter;
            match visual.icon_place {
                IconPlace::Left => content.left += icon_size.width + gutter,
                IconPlace::Top => content.top += icon_size.height + gutter,
                IconPlace::Right => content.right -= icon_size.width + gutter,
                IconPlace::Bottom => content.bottom -= icon_size.height + gutter,
                IconPlace::Center => {}
            }
            content = content.clip();
        }
        self.content_rect = content;

        self.clip_rect = match visual.display {
            DisplayMode::Visible | DisplayMode::Hidden => {
                self.display_rect.intersect_with(&layout_clip)
            }
            DisplayMode::Overflow => self.display_rect,
            DisplayMode::Clipped => Rect::ZERO,
        };
    }

    fn draw(&self, cx: &LayoutContext<'_>, canvas: &mut dyn Canvas) {
        if self.style.visual.display == DisplayMode::Hidden || self.clip_rect.is_empty() {
            return;
        }
        self.draw_pane(cx, canvas);
        self.draw_icon(cx, canvas);
        self.draw_label(canvas);
    }

    fn is_pointed(&self, pos: Pos) -> bool {
        self.clip_rect.contains(pos)
    }
}
