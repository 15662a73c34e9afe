//! Windows: one element tree with its styles, focus and hover.
//!
//! A window is (re)built from a window record. Elements whose id and type
//! survive an update keep their identity, so selection and interaction
//! state carry over. After every record the tree is validated from the
//! root; a window whose tree is invalid must be closed by its owner.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tessera_wire::Reader;
use tracing::{debug, warn};

use crate::canvas::{Canvas, ScaledCanvas};
use crate::clickable;
use crate::config::ManagerConfig;
use crate::elem::{Elem, ElemKey, ElemTree, ElemType};
use crate::error::WindowError;
use crate::event::{Event, EventResult, KeyEvent, MouseButton, MouseEvent, NamedKey, UiEvent};
use crate::geometry::{Pos, Rect, Size};
use crate::layout::{Layout, LayoutContext, StyleTable};
use crate::message::{OutboundEvent, Outbox, WindowEvent};
use crate::resources::Resources;
use crate::style::wire_enum;

wire_enum! {
    /// Drawing layer of a window, back to front.
    pub enum WindowType fallback Hud {
        Bg = 0,
        Mask = 1,
        Hud = 2,
        Chat = 3,
        Gui = 4,
        Fg = 5,
    }
}

// Pointer position that no rect contains.
const NO_POINTER: Pos = Pos::new(f32::NEG_INFINITY, f32::NEG_INFINITY);

/// Per-frame inputs supplied by the host.
#[derive(Clone, Copy)]
pub struct Frame<'a> {
    pub resources: &'a dyn Resources,
    /// Render target size in physical pixels.
    pub screen: Size,
    pub time_ms: u64,
}

pub struct Window {
    // Identity; set once the window is opened.
    id: u64,
    window_type: WindowType,

    tree: ElemTree,
    ids: IndexMap<String, ElemKey>,
    ordered: Vec<ElemKey>,
    root: Option<ElemKey>,
    styles: StyleTable,

    focused_elem: Option<ElemKey>,
    hovered_elem: Option<ElemKey>,

    uncloseable: bool,
    on_submit: bool,
    on_focus_change: bool,

    is_focused: bool,
    scale: f32,
    pointer: Pos,
    close_requested: bool,
    outbox: Outbox,
}

impl Window {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            window_type: WindowType::Gui,
            tree: ElemTree::new(),
            ids: IndexMap::new(),
            ordered: Vec::new(),
            root: None,
            styles: StyleTable::new(),
            focused_elem: None,
            hovered_elem: None,
            uncloseable: false,
            on_submit: false,
            on_focus_change: false,
            is_focused: false,
            scale: 1.0,
            pointer: NO_POINTER,
            close_requested: false,
            outbox: Outbox::new(id),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn window_type(&self) -> WindowType {
        self.window_type
    }

    pub fn tree(&self) -> &ElemTree {
        &self.tree
    }

    pub fn root(&self) -> Option<ElemKey> {
        self.root
    }

    /// Elements in tree order.
    pub fn ordered(&self) -> &[ElemKey] {
        &self.ordered
    }

    pub fn elem(&self, id: &str) -> Option<&Elem> {
        self.ids.get(id).and_then(|&key| self.tree.get(key))
    }

    pub fn key_of(&self, id: &str) -> Option<ElemKey> {
        self.ids.get(id).copied()
    }

    pub fn focused_elem(&self) -> Option<ElemKey> {
        self.focused_elem
    }

    pub fn hovered_elem(&self) -> Option<ElemKey> {
        self.hovered_elem
    }

    pub fn is_uncloseable(&self) -> bool {
        self.uncloseable
    }

    pub fn is_focused(&self) -> bool {
        self.is_focused
    }

    /// Set by the manager when this window becomes or stops being the
    /// input target.
    pub fn set_focused(&mut self, focused: bool) {
        self.is_focused = focused;
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = if scale > 0.0 { scale } else { 1.0 };
    }

    /// Pointer in window units, as last reported by a mouse event.
    pub fn pointer(&self) -> Pos {
        self.pointer
    }

    pub fn close_requested(&self) -> bool {
        self.close_requested
    }

    pub fn drain_events(&mut self) -> impl Iterator<Item = OutboundEvent> + '_ {
        self.outbox.drain()
    }

    // =====================================================================
    // Reading
    // =====================================================================

    /// Merge a window record. `opening` records also carry the window type
    /// and the uncloseable flag.
    pub fn read(
        &mut self,
        r: &mut Reader<'_>,
        opening: bool,
        config: &ManagerConfig,
    ) -> Result<(), WindowError> {
        let contents = self.read_elems(r)?;

        let root_id = r.read_nstr()?;
        let root = self.ids.get(root_id).copied().ok_or(WindowError::MissingRoot)?;
        if self.tree[root].elem_type() != ElemType::Root {
            return Err(WindowError::UnknownRoot(root_id.to_owned()));
        }
        self.root = Some(root);

        let count = r.read_u32()?;
        let mut styles = StyleTable::new();
        for _ in 0..count {
            styles.push(r.read_bytes16()?.to_vec());
        }
        self.styles = styles;

        if opening {
            self.window_type = WindowType::from_wire(r.read_u8()?);
        }

        let mut mask = r.read_mask()?;
        let new_focus = r.field(&mut mask, Reader::read_nstr)?.map(|id| {
            if id.is_empty() {
                return None;
            }
            let key = self.ids.get(id).copied();
            if key.is_none() {
                warn!("Element \"{}\" does not exist", id);
            }
            key
        });
        if opening {
            self.uncloseable = mask.test_shift();
        }
        self.on_submit = mask.test_shift();
        self.on_focus_change = mask.test_shift();

        self.update_elems(contents, config)?;

        if let Some(new_focus) = new_focus {
            if new_focus != self.focused_elem {
                let accepted = new_focus.is_some_and(|key| self.request_focus(key, false));
                if !accepted {
                    self.change_focus(None, false);
                }
            }
        }
        Ok(())
    }

    /// Read the element table, reusing elements whose id and type persist.
    fn read_elems<'a>(&mut self, r: &mut Reader<'a>) -> Result<Vec<(ElemKey, &'a [u8])>, WindowError> {
        let count = r.read_u32()?;
        let mut new_ids: IndexMap<String, ElemKey> = IndexMap::new();
        let mut contents = Vec::new();

        for _ in 0..count {
            let type_byte = r.read_u8()?;
            let id = r.read_nstr()?;
            let data = r.read_bytes32()?;

            if id.is_empty() {
                warn!("Element has empty ID");
                continue;
            }
            if new_ids.contains_key(id) {
                warn!("Duplicate element \"{}\"", id);
                continue;
            }
            let Some(elem_type) = ElemType::from_wire(type_byte) else {
                warn!("Element \"{}\" has an invalid type: {}", id, type_byte);
                continue;
            };

            let key = match self.ids.get(id) {
                Some(&key) if self.tree[key].elem_type() == elem_type => key,
                _ => self.tree.insert(Elem::new(id, elem_type)),
            };
            self.tree[key].reset();
            new_ids.insert(id.to_owned(), key);
            contents.push((key, data));
        }

        let kept: HashSet<ElemKey> = new_ids.values().copied().collect();
        let stale: Vec<ElemKey> = self.ids.values().copied().filter(|k| !kept.contains(k)).collect();
        for key in stale {
            self.tree.remove(key);
            if self.focused_elem == Some(key) {
                self.focused_elem = None;
            }
            if self.hovered_elem == Some(key) {
                self.hovered_elem = None;
            }
        }

        self.ids = new_ids;
        self.ordered.clear();
        self.root = None;
        Ok(contents)
    }

    fn update_elems(&mut self, contents: Vec<(ElemKey, &[u8])>, config: &ManagerConfig) -> Result<(), WindowError> {
        let style_count = self.styles.len();

        for (key, data) in contents {
            let elem = &mut self.tree[key];
            let children = match elem.read(&mut Reader::new(data), style_count) {
                Ok(children) => children,
                Err(e) => {
                    warn!("Element \"{}\" is malformed: {}", elem.id(), e);
                    continue;
                }
            };
            for child_id in children {
                let Some(&child) = self.ids.get(&child_id) else {
                    warn!("Element \"{}\" does not exist", child_id);
                    continue;
                };
                if let Err(e) = self.tree.attach(key, child) {
                    warn!("{}", e);
                }
            }
        }

        let root = self.root.ok_or(WindowError::MissingRoot)?;
        if self.tree[root].parent().is_some() {
            return Err(WindowError::RootHasParent(self.tree[root].id().to_owned()));
        }
        self.update_tree(root, 1, config.max_tree_depth)?;

        let orphaned = self.ids.len() - self.ordered.len();
        if orphaned > 0 {
            return Err(WindowError::Orphaned(orphaned));
        }
        debug!(window = self.id, elems = self.ordered.len(), "window updated");
        Ok(())
    }

    /// Assign preorder positions and check the depth limit.
    fn update_tree(&mut self, key: ElemKey, depth: usize, max_depth: usize) -> Result<(), WindowError> {
        if depth > max_depth {
            return Err(WindowError::TreeTooDeep(max_depth));
        }
        self.tree[key].set_order(self.ordered.len());
        self.ordered.push(key);

        for child in self.tree[key].children().to_vec() {
            if self.tree[child].elem_type() == ElemType::Root {
                return Err(WindowError::RootHasParent(self.tree[child].id().to_owned()));
            }
            self.update_tree(child, depth + 1, max_depth)?;
        }
        Ok(())
    }

    // =====================================================================
    // Frame
    // =====================================================================

    /// Restyle, lay out and draw the whole tree.
    pub fn draw_all(&mut self, frame: &Frame<'_>, config: &ManagerConfig, canvas: &mut dyn Canvas) {
        let Some(root) = self.root else {
            return;
        };
        self.set_scale(config.scale(self.window_type));

        let window_focused = self.is_focused;
        let focused_elem = self.focused_elem;
        for (key, elem) in self.tree.iter_mut() {
            elem.set_focused(window_focused && focused_elem == Some(key));
        }

        {
            let cx = LayoutContext::new(&self.styles, frame.resources)
                .with_time(frame.time_ms)
                .with_config(config);
            let screen = Rect::from_size(frame.screen * (1.0 / self.scale));
            let mut node = self.tree.node(root);
            node.restyle(&cx);
            node.resize(&cx);
            node.relayout(&cx, screen, screen);
        }

        // Layout may have moved elements under the pointer.
        self.update_hovered();

        if !self.is_focused {
            self.send_tree_input(self.focused_elem, &UiEvent::FocusSubverted.into(), true);
        }

        let cx = LayoutContext::new(&self.styles, frame.resources)
            .with_time(frame.time_ms)
            .with_config(config);
        let mut scaled = ScaledCanvas::new(canvas, self.scale);
        self.tree.draw_subtree(root, &cx, &mut scaled);
    }

    // =====================================================================
    // Input
    // =====================================================================

    /// Route a host event. Returns whether anything handled it.
    pub fn process_input(&mut self, event: &Event) -> bool {
        match event {
            Event::Keyboard(key_event) => {
                if self.send_focused_input(event).is_some() {
                    return true;
                }
                let KeyEvent::Pressed { key, modifiers, .. } = key_event else {
                    return false;
                };
                if key.is(NamedKey::Escape) {
                    self.close();
                    true
                } else if key.is(NamedKey::Enter) {
                    if self.on_submit {
                        self.outbox.window(WindowEvent::Submit);
                    }
                    true
                } else if key.is(NamedKey::Tab) && !modifiers.ctrl {
                    self.focus_next(modifiers.shift);
                    true
                } else {
                    false
                }
            }
            Event::Mouse(mouse) => {
                match mouse {
                    MouseEvent::CursorLeft => self.pointer = NO_POINTER,
                    _ => {
                        if let Some(pos) = mouse.position() {
                            self.pointer = pos * (1.0 / self.scale);
                        }
                    }
                }
                if matches!(mouse, MouseEvent::CursorMoved { .. } | MouseEvent::CursorLeft) {
                    self.update_hovered();
                }

                let left_down = matches!(
                    mouse,
                    MouseEvent::ButtonPressed {
                        button: MouseButton::Left,
                        ..
                    }
                );
                if left_down {
                    if self.is_pointer_outside() {
                        self.change_focus(None, true);
                    } else {
                        self.update_focused();
                    }
                }

                if self.send_focused_input(event).is_some() || self.send_hovered_input(event).is_some() {
                    return true;
                }

                if let MouseEvent::ButtonPressed {
                    button: MouseButton::Left,
                    clicks,
                    ..
                } = mouse
                {
                    if *clicks >= 2 && self.is_pointer_outside() {
                        self.close();
                        return true;
                    }
                }
                false
            }
            Event::Ui(_) => false,
        }
    }

    /// Ask to be closed. Uncloseable windows ignore this.
    pub fn close(&mut self) {
        if !self.uncloseable {
            self.close_requested = true;
        }
    }

    /// Offer `event` to `start` and, unless `direct`, to its ancestors.
    /// Returns the element that handled it.
    fn send_tree_input(&mut self, start: Option<ElemKey>, event: &Event, direct: bool) -> Option<ElemKey> {
        let mut cursor = start;
        while let Some(key) = cursor {
            let elem = self.tree.get_mut(key)?;
            match elem.process_input(key, event, self.pointer) {
                EventResult::Ignored if direct => return None,
                EventResult::Ignored => cursor = elem.parent(),
                EventResult::Captured => return Some(key),
                EventResult::Message(_) => {
                    clickable::activate(&mut self.tree, &self.ordered, key, &mut self.outbox);
                    return Some(key);
                }
            }
        }
        None
    }

    /// Offer `event` to pointed elements, topmost first.
    fn send_hovered_input(&mut self, event: &Event) -> Option<ElemKey> {
        for i in (0..self.ordered.len()).rev() {
            let key = self.ordered[i];
            let pointed = self.tree.get(key).is_some_and(|e| e.is_pointed(self.pointer));
            if pointed && self.send_tree_input(Some(key), event, true).is_some() {
                return Some(key);
            }
        }
        None
    }

    fn send_focused_input(&mut self, event: &Event) -> Option<ElemKey> {
        let focused = self.focused_elem?;
        let handled = self.send_tree_input(Some(focused), event, false);
        if handled.is_some_and(|key| key != focused) {
            self.send_tree_input(Some(focused), &UiEvent::FocusSubverted.into(), true);
        }
        handled
    }

    fn change_focus(&mut self, new: Option<ElemKey>, send_event: bool) {
        if new == self.focused_elem {
            return;
        }
        let old = self.focused_elem;
        self.focused_elem = new;

        let notice = Event::Ui(UiEvent::FocusChanged { old, new });
        self.send_tree_input(old, &notice, false);
        self.send_tree_input(new, &notice, false);

        if send_event && self.on_focus_change {
            let id_of = |key: Option<ElemKey>| {
                key.and_then(|k| self.tree.get(k))
                    .map(|e| e.id().to_owned())
                    .unwrap_or_default()
            };
            let event = WindowEvent::FocusChange {
                old: id_of(old),
                new: id_of(new),
            };
            self.outbox.window(event);
        }
    }

    /// Focus `key` if it accepts focus.
    fn request_focus(&mut self, key: ElemKey, send_event: bool) -> bool {
        if Some(key) == self.focused_elem {
            return true;
        }
        if self.send_tree_input(Some(key), &UiEvent::FocusRequest.into(), true) == Some(key) {
            self.change_focus(Some(key), send_event);
            return true;
        }
        false
    }

    fn next_elem(&self, key: ElemKey, reverse: bool) -> Option<ElemKey> {
        let len = self.ordered.len();
        if len == 0 {
            return None;
        }
        let order = self.tree.get(key)?.order();
        let next = if reverse {
            if order == 0 { len - 1 } else { order - 1 }
        } else if order.saturating_add(1) >= len {
            0
        } else {
            order + 1
        };
        self.ordered.get(next).copied()
    }

    /// Tab to the next element that takes focus, wrapping around.
    fn focus_next(&mut self, reverse: bool) {
        let Some(start) = self.focused_elem.or(self.root) else {
            return;
        };
        let mut current = start;
        for _ in 0..self.ordered.len() {
            let Some(key) = self.next_elem(current, reverse) else {
                return;
            };
            if key == start || self.request_focus(key, true) {
                return;
            }
            current = key;
        }
    }

    fn update_focused(&mut self) {
        let new = self.send_hovered_input(&UiEvent::FocusRequest.into());
        if new.is_some() && new != self.focused_elem {
            self.change_focus(new, true);
        }
    }

    fn update_hovered(&mut self) {
        let old = self.hovered_elem;
        let new = if self.is_focused {
            self.send_hovered_input(&UiEvent::HoverRequest.into())
        } else {
            None
        };
        if old == new {
            return;
        }
        self.hovered_elem = new;
        let notice = Event::Ui(UiEvent::HoverChanged { old, new });
        self.send_tree_input(old, &notice, false);
        self.send_tree_input(new, &notice, false);
    }

    fn is_pointer_outside(&self) -> bool {
        !self
            .ordered
            .iter()
            .filter_map(|&key| self.tree.get(key))
            .any(|e| e.is_pointed(self.pointer))
    }
}

impl std::fmt::Debug for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Window")
            .field("id", &self.id)
            .field("window_type", &self.window_type)
            .field("elems", &self.ids.len())
            .field("focused_elem", &self.focused_elem)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_type_fallback() {
        assert_eq!(WindowType::from_wire(4), WindowType::Gui);
        assert_eq!(WindowType::from_wire(200), WindowType::Hud);
    }

    #[test]
    fn test_new_window_is_empty() {
        let window = Window::new(3);
        assert_eq!(window.id(), 3);
        assert!(window.root().is_none());
        assert!(!window.close_requested());
    }

    #[test]
    fn test_uncloseable_ignores_close() {
        let mut window = Window::new(1);
        window.uncloseable = true;
        window.close();
        assert!(!window.close_requested());
        window.uncloseable = false;
        window.close();
        assert!(window.close_requested());
    }
}
