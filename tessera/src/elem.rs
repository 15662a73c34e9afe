//! Elements and the element tree.
//!
//! An [`Elem`] owns a main box and, depending on its [`ElemKind`], extra
//! boxes and behavior. Elements of one window live in an [`ElemTree`]
//! arena and refer to each other by [`ElemKey`]; the arena rejects edits
//! that would break the tree shape.
//!
//! Layout passes run through [`ElemNode`], a handle that borrows the arena
//! and recurses into children by key.

use serde::{Deserialize, Serialize};
use slotmap::{SlotMap, new_key_type};
use tessera_wire::{Reader, Result, WireError};

use crate::canvas::Canvas;
use crate::clickable::{Button, OptionButton, Toggle};
use crate::error::TreeError;
use crate::event::{Event, EventResult};
use crate::geometry::{Pos, Rect, Size};
use crate::layout::{Layout, LayoutContext};
use crate::sizer::{Flex, Grid, Place, Sizer, SizerChild};
use crate::style::SizingProps;
use crate::styled_box::{BACKDROP_BOX, BoxId, BoxState, Interaction, MAIN_BOX, NO_GROUP, Pressed, StyledBox};

new_key_type! {
    pub struct ElemKey;
}

/// Element type byte of the window record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ElemType {
    Elem = 0x00,
    Root = 0x01,
    Button = 0x02,
    Toggle = 0x03,
    Option = 0x04,
    Place = 0x05,
    Flex = 0x06,
    Grid = 0x07,
}

impl ElemType {
    /// Unknown types have no fallback; such elements are skipped.
    pub fn from_wire(value: u8) -> Option<Self> {
        Some(match value {
            0x00 => ElemType::Elem,
            0x01 => ElemType::Root,
            0x02 => ElemType::Button,
            0x03 => ElemType::Toggle,
            0x04 => ElemType::Option,
            0x05 => ElemType::Place,
            0x06 => ElemType::Flex,
            0x07 => ElemType::Grid,
            _ => return None,
        })
    }

    pub fn to_wire(self) -> u8 {
        self as u8
    }
}

/// The root element's extra box, laid out over the whole window.
#[derive(Debug, Clone)]
pub struct Root {
    pub backdrop: StyledBox,
}

impl Root {
    fn read(&mut self, r: &mut Reader<'_>, style_count: usize) -> Result<()> {
        let mut mask = r.read_mask()?;
        if mask.test_shift() {
            self.backdrop.read(&mut r.nested16()?, style_count)?;
        }
        Ok(())
    }
}

/// Type-specific state of an element.
#[derive(Debug, Clone)]
pub enum ElemKind {
    Plain,
    Root(Root),
    Button(Button),
    Toggle(Toggle),
    Option(OptionButton),
    Sizer(Sizer),
}

impl ElemKind {
    fn new(elem_type: ElemType) -> Self {
        match elem_type {
            ElemType::Elem => ElemKind::Plain,
            ElemType::Root => ElemKind::Root(Root {
                backdrop: StyledBox::new(BoxId::new(NO_GROUP, BACKDROP_BOX)),
            }),
            ElemType::Button => ElemKind::Button(Button::default()),
            ElemType::Toggle => ElemKind::Toggle(Toggle::default()),
            ElemType::Option => ElemKind::Option(OptionButton::default()),
            ElemType::Place => ElemKind::Sizer(Sizer::Place(Place::default())),
            ElemType::Flex => ElemKind::Sizer(Sizer::Flex(Flex::default())),
            ElemType::Grid => ElemKind::Sizer(Sizer::Grid(Grid::default())),
        }
    }

    fn reset(&mut self) {
        match self {
            ElemKind::Plain => {}
            ElemKind::Root(root) => root.backdrop.reset(),
            ElemKind::Button(button) => button.reset(),
            ElemKind::Toggle(toggle) => toggle.reset(),
            ElemKind::Option(option) => option.reset(),
            ElemKind::Sizer(sizer) => sizer.reset(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Elem {
    // Identity; never changed by reset or read.
    id: String,
    kind: ElemKind,

    order: usize,
    parent: Option<ElemKey>,
    children: Vec<ElemKey>,

    main_box: StyledBox,
    interaction: Interaction,
    focused: bool,
}

impl Elem {
    pub fn new(id: impl Into<String>, elem_type: ElemType) -> Self {
        Self {
            id: id.into(),
            kind: ElemKind::new(elem_type),
            order: usize::MAX,
            parent: None,
            children: Vec::new(),
            main_box: StyledBox::new(BoxId::new(NO_GROUP, MAIN_BOX)),
            interaction: Interaction::default(),
            focused: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn elem_type(&self) -> ElemType {
        match &self.kind {
            ElemKind::Plain => ElemType::Elem,
            ElemKind::Root(_) => ElemType::Root,
            ElemKind::Button(_) => ElemType::Button,
            ElemKind::Toggle(_) => ElemType::Toggle,
            ElemKind::Option(_) => ElemType::Option,
            ElemKind::Sizer(Sizer::Place(_)) => ElemType::Place,
            ElemKind::Sizer(Sizer::Flex(_)) => ElemType::Flex,
            ElemKind::Sizer(Sizer::Grid(_)) => ElemType::Grid,
        }
    }

    pub fn kind(&self) -> &ElemKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut ElemKind {
        &mut self.kind
    }

    /// Preorder index inside the window, `usize::MAX` until the tree is built.
    pub fn order(&self) -> usize {
        self.order
    }

    pub(crate) fn set_order(&mut self, order: usize) {
        self.order = order;
    }

    pub fn parent(&self) -> Option<ElemKey> {
        self.parent
    }

    pub fn children(&self) -> &[ElemKey] {
        &self.children
    }

    pub fn main_box(&self) -> &StyledBox {
        &self.main_box
    }

    /// The box that receives this element's layout rect.
    pub fn layout_box(&self) -> &StyledBox {
        match &self.kind {
            ElemKind::Root(root) => &root.backdrop,
            _ => &self.main_box,
        }
    }

    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub(crate) fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn is_selected(&self) -> bool {
        match &self.kind {
            ElemKind::Toggle(toggle) => toggle.selected,
            ElemKind::Option(option) => option.selected,
            _ => false,
        }
    }

    pub fn is_disabled(&self) -> bool {
        match &self.kind {
            ElemKind::Button(button) => button.disabled,
            ElemKind::Toggle(toggle) => toggle.disabled,
            ElemKind::Option(option) => option.disabled,
            _ => false,
        }
    }

    fn is_clickable(&self) -> bool {
        matches!(
            self.kind,
            ElemKind::Button(_) | ElemKind::Toggle(_) | ElemKind::Option(_)
        )
    }

    /// State a box of this element is restyled with.
    pub fn box_state(&self, id: BoxId) -> BoxState {
        let mut state = BoxState::empty();
        state.set(BoxState::FOCUSED, self.focused);
        state.set(BoxState::SELECTED, self.is_selected());
        state.set(BoxState::HOVERED, self.interaction.is_hovered(id));
        state.set(BoxState::PRESSED, self.interaction.is_pressed(id));
        state.set(BoxState::DISABLED, self.is_disabled());
        state
    }

    /// Clear everything the next read may set. Identity, selection and
    /// interaction state persist.
    pub fn reset(&mut self) {
        self.order = usize::MAX;
        self.parent = None;
        self.children.clear();
        self.main_box.reset();
        self.kind.reset();
    }

    /// Merge an element record and return the ids of its children.
    ///
    /// Subtypes wrap the base record in a `str32` and follow it with their
    /// own masked record.
    pub fn read(&mut self, r: &mut Reader<'_>, style_count: usize) -> Result<Vec<String>> {
        let children = match self.kind {
            ElemKind::Plain => self.read_base(r, style_count)?,
            _ => self.read_base(&mut r.nested32()?, style_count)?,
        };

        match &mut self.kind {
            ElemKind::Plain => {}
            ElemKind::Root(root) => root.read(r, style_count)?,
            ElemKind::Button(button) => button.read(r)?,
            ElemKind::Toggle(toggle) => toggle.read(r)?,
            ElemKind::Option(option) => option.read(r)?,
            ElemKind::Sizer(sizer) => sizer.read(r)?,
        }
        Ok(children)
    }

    fn read_base(&mut self, r: &mut Reader<'_>, style_count: usize) -> Result<Vec<String>> {
        let mut mask = r.read_mask()?;
        let mut children = Vec::new();
        if mask.test_shift() {
            // Every id costs at least its terminator byte.
            let count = r.read_u32()? as usize;
            if count > r.remaining() {
                return Err(WireError::UnexpectedEof { wanted: count, remaining: r.remaining() });
            }
            children.reserve(count);
            for _ in 0..count {
                children.push(r.read_nstr()?.to_owned());
            }
        }
        if mask.test_shift() {
            self.main_box.read(&mut r.nested16()?, style_count)?;
        }
        Ok(children)
    }

    /// Whether any box of this element is under `pos`.
    pub fn is_pointed(&self, pos: Pos) -> bool {
        if self.main_box.is_pointed(pos) {
            return true;
        }
        matches!(&self.kind, ElemKind::Root(root) if root.backdrop.is_pointed(pos))
    }

    /// Offer an input event to this element alone.
    ///
    /// Only clickable elements take part in input; a completed press is
    /// returned as a message for the window to activate.
    pub fn process_input(&mut self, key: ElemKey, event: &Event, pointer: Pos) -> EventResult<Pressed> {
        if !self.is_clickable() {
            return EventResult::Ignored;
        }
        self.main_box
            .process_full_press(event, key, pointer, &mut self.interaction)
    }
}

/// Arena of one window's elements.
#[derive(Debug, Default)]
pub struct ElemTree {
    elems: SlotMap<ElemKey, Elem>,
}

impl ElemTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, elem: Elem) -> ElemKey {
        self.elems.insert(elem)
    }

    /// Remove an element. Links to it from other elements are left in
    /// place; callers rebuild the tree afterwards.
    pub fn remove(&mut self, key: ElemKey) -> Option<Elem> {
        self.elems.remove(key)
    }

    pub fn get(&self, key: ElemKey) -> Option<&Elem> {
        self.elems.get(key)
    }

    pub fn get_mut(&mut self, key: ElemKey) -> Option<&mut Elem> {
        self.elems.get_mut(key)
    }

    pub fn len(&self) -> usize {
        self.elems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elems.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ElemKey, &Elem)> {
        self.elems.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ElemKey, &mut Elem)> {
        self.elems.iter_mut()
    }

    /// Make `child` the last child of `parent`.
    pub fn attach(&mut self, parent: ElemKey, child: ElemKey) -> std::result::Result<(), TreeError> {
        let parent_elem = self.elems.get(parent).ok_or(TreeError::UnknownElem)?;
        let child_elem = self.elems.get(child).ok_or(TreeError::UnknownElem)?;

        if let Some(existing) = child_elem.parent {
            let existing = self.elems.get(existing).map(|e| e.id.clone()).unwrap_or_default();
            return Err(TreeError::AlreadyParented {
                child: child_elem.id.clone(),
                parent: existing,
            });
        }
        if child_elem.elem_type() == ElemType::Root {
            return Err(TreeError::RootAsChild(child_elem.id.clone()));
        }
        if self.ancestors(parent).any(|k| k == child) {
            return Err(TreeError::Cycle {
                child: child_elem.id.clone(),
                parent: parent_elem.id.clone(),
            });
        }

        self.elems[child].parent = Some(parent);
        self.elems[parent].children.push(child);
        Ok(())
    }

    /// `key` followed by its parent chain.
    pub fn ancestors(&self, key: ElemKey) -> impl Iterator<Item = ElemKey> + '_ {
        std::iter::successors(Some(key), |&k| self.elems.get(k).and_then(|e| e.parent))
    }

    pub fn node(&mut self, key: ElemKey) -> ElemNode<'_> {
        ElemNode { tree: self, key }
    }

    /// Sizing props and minimum layout size of each child of `key`.
    fn child_metrics(&self, key: ElemKey) -> Vec<(SizingProps, Size)> {
        let Some(elem) = self.elems.get(key) else {
            return Vec::new();
        };
        elem.children
            .iter()
            .filter_map(|&child| self.elems.get(child))
            .map(|child| (child.main_box.sizing().clone(), child.main_box.min_layout()))
            .collect()
    }

    /// Draw `key` and its subtree in tree order.
    pub fn draw_subtree(&self, key: ElemKey, cx: &LayoutContext<'_>, canvas: &mut dyn Canvas) {
        let Some(elem) = self.elems.get(key) else {
            return;
        };
        if let ElemKind::Root(root) = &elem.kind {
            root.backdrop.draw(cx, canvas);
        }
        elem.main_box.draw(cx, canvas);
        for &child in &elem.children {
            self.draw_subtree(child, cx, canvas);
        }
    }
}

impl std::ops::Index<ElemKey> for ElemTree {
    type Output = Elem;

    fn index(&self, key: ElemKey) -> &Elem {
        &self.elems[key]
    }
}

impl std::ops::IndexMut<ElemKey> for ElemTree {
    fn index_mut(&mut self, key: ElemKey) -> &mut Elem {
        &mut self.elems[key]
    }
}

/// One element subtree viewed through the [`Layout`] protocol.
pub struct ElemNode<'a> {
    tree: &'a mut ElemTree,
    key: ElemKey,
}

impl ElemNode<'_> {
    fn children(&self) -> Vec<ElemKey> {
        self.tree
            .get(self.key)
            .map(|e| e.children.clone())
            .unwrap_or_default()
    }

    fn child(&mut self, key: ElemKey) -> ElemNode<'_> {
        ElemNode {
            tree: &mut *self.tree,
            key,
        }
    }
}

impl Layout for ElemNode<'_> {
    fn restyle(&mut self, cx: &LayoutContext<'_>) {
        let Some(elem) = self.tree.get_mut(self.key) else {
            return;
        };

        let state = elem.box_state(elem.main_box.id());
        elem.main_box.set_state(state);
        elem.main_box.restyle(cx);

        let backdrop_state = elem.box_state(BoxId::new(NO_GROUP, BACKDROP_BOX));
        if let ElemKind::Root(root) = &mut elem.kind {
            root.backdrop.set_state(backdrop_state);
            root.backdrop.restyle(cx);
        }

        for child in self.children() {
            self.child(child).restyle(cx);
        }
    }

    fn resize(&mut self, cx: &LayoutContext<'_>) -> Size {
        for child in self.children() {
            self.child(child).resize(cx);
        }
        let metrics = self.tree.child_metrics(self.key);

        let Some(Elem { kind, main_box, .. }) = self.tree.get_mut(self.key) else {
            return Size::ZERO;
        };

        match &*kind {
            ElemKind::Sizer(sizer) => {
                let children: Vec<SizerChild> = metrics
                    .iter()
                    .map(|(sizing, min)| SizerChild::new(sizing, *min))
                    .collect();
                let content = sizer.min_size(&main_box.style().layout, &children, cx.max_grid_tracks);
                main_box.include_content(content);
            }
            _ => {
                for (sizing, min) in &metrics {
                    let placed = main_box.placed_min(sizing, *min);
                    main_box.include_content(placed);
                }
            }
        }

        let main_min = main_box.resize(cx);
        match &mut *kind {
            ElemKind::Root(root) => {
                let placed = root.backdrop.placed_min(main_box.sizing(), main_min);
                root.backdrop.include_content(placed);
                root.backdrop.resize(cx)
            }
            _ => main_min,
        }
    }

    fn relayout(&mut self, cx: &LayoutContext<'_>, layout_rect: Rect, layout_clip: Rect) {
        let metrics = self.tree.child_metrics(self.key);

        let Some(Elem { kind, main_box, .. }) = self.tree.get_mut(self.key) else {
            return;
        };

        if let ElemKind::Root(root) = &mut *kind {
            root.backdrop.relayout(cx, layout_rect, layout_clip);
            let main_rect = root.backdrop.place(main_box.sizing(), main_box.min_layout());
            main_box.relayout(cx, main_rect, root.backdrop.clip_rect());
        } else {
            main_box.relayout(cx, layout_rect, layout_clip);
        }

        let content = main_box.content_rect();
        let child_clip = main_box.clip_rect();
        let rects: Vec<Rect> = match &*kind {
            ElemKind::Sizer(sizer) => {
                let children: Vec<SizerChild> = metrics
                    .iter()
                    .map(|(sizing, min)| SizerChild::new(sizing, *min))
                    .collect();
                sizer.layout(&main_box.style().layout, &children, content, cx.max_grid_tracks)
            }
            _ => metrics
                .iter()
                .map(|(sizing, min)| main_box.place(sizing, *min))
                .collect(),
        };

        for (child, rect) in self.children().into_iter().zip(rects) {
            self.child(child).relayout(cx, rect, child_clip);
        }
    }

    fn draw(&self, cx: &LayoutContext<'_>, canvas: &mut dyn Canvas) {
        self.tree.draw_subtree(self.key, cx, canvas);
    }

    fn is_pointed(&self, pos: Pos) -> bool {
        self.tree.get(self.key).is_some_and(|e| e.is_pointed(pos))
    }
}
