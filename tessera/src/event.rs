//! Input events delivered to windows and elements.
//!
//! Raw keyboard and mouse events come from the host. [`UiEvent`]s are
//! synthesized by the window while it moves focus and hover between
//! elements; they let each element veto or observe the change.

use crate::elem::ElemKey;
use crate::geometry::Pos;

/// Result of offering an event to a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult<M> {
    /// Event was ignored, propagate to parent.
    Ignored,

    /// Event was captured, don't propagate.
    Captured,

    /// Event was captured and produced a message for the owner.
    Message(M),
}

impl<M> From<bool> for EventResult<M> {
    fn from(handled: bool) -> Self {
        if handled {
            EventResult::Captured
        } else {
            EventResult::Ignored
        }
    }
}

/// Mouse button types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// Mouse event types.
#[derive(Debug, Clone, PartialEq)]
pub enum MouseEvent {
    /// Mouse button pressed. `clicks` is 2 for a double click.
    ButtonPressed {
        button: MouseButton,
        position: Pos,
        clicks: u8,
    },

    ButtonReleased {
        button: MouseButton,
        position: Pos,
    },

    CursorMoved {
        position: Pos,
    },

    /// Mouse cursor left the window.
    CursorLeft,
}

impl MouseEvent {
    pub fn position(&self) -> Option<Pos> {
        match self {
            MouseEvent::ButtonPressed { position, .. }
            | MouseEvent::ButtonReleased { position, .. }
            | MouseEvent::CursorMoved { position } => Some(*position),
            MouseEvent::CursorLeft => None,
        }
    }
}

/// Keyboard modifier keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ctrl: false,
        alt: false,
        meta: false,
    };
}

/// Keys with a fixed meaning to windows and boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedKey {
    Enter,
    Tab,
    Escape,
    Space,
}

/// A keyboard key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Named(NamedKey),
    /// Any other key, as the text it produces.
    Character(String),
}

impl Key {
    pub fn is(&self, named: NamedKey) -> bool {
        matches!(self, Key::Named(k) if *k == named)
    }
}

/// A key event (pressed or released).
#[derive(Debug, Clone, PartialEq)]
pub enum KeyEvent {
    Pressed {
        key: Key,
        modifiers: Modifiers,
        /// Auto-repeat while the key is held.
        repeat: bool,
    },

    Released {
        key: Key,
        modifiers: Modifiers,
    },
}

/// Focus and hover negotiation between the window and its elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// Would this element take keyboard focus?
    FocusRequest,
    /// Focus moved from `old` to `new`.
    FocusChanged {
        old: Option<ElemKey>,
        new: Option<ElemKey>,
    },
    /// The window itself lost focus while this element held it.
    FocusSubverted,
    /// Is this element under the pointer?
    HoverRequest,
    /// Hover moved from `old` to `new`.
    HoverChanged {
        old: Option<ElemKey>,
        new: Option<ElemKey>,
    },
}

/// Generic event type combining host and synthesized events.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Mouse(MouseEvent),
    Keyboard(KeyEvent),
    Ui(UiEvent),
}

impl From<MouseEvent> for Event {
    fn from(event: MouseEvent) -> Self {
        Self::Mouse(event)
    }
}

impl From<KeyEvent> for Event {
    fn from(event: KeyEvent) -> Self {
        Self::Keyboard(event)
    }
}

impl From<UiEvent> for Event {
    fn from(event: UiEvent) -> Self {
        Self::Ui(event)
    }
}
