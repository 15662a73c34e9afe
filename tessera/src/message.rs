//! Outbound events sent from windows back to the host.
//!
//! Every event starts with its category byte and the window id:
//!
//! ```text
//! WINDOW_EVENT: u8 0, u64 window, u8 event [payload]
//! ELEM_EVENT:   u8 1, u64 window, u8 event, u8 elem type, nstr elem id [payload]
//! ```

use serde::Serialize;
use tessera_wire::Writer;

use crate::elem::{Elem, ElemType};

pub const WINDOW_EVENT: u8 = 0x00;
pub const ELEM_EVENT: u8 = 0x01;

/// Events raised by a window itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WindowEvent {
    Close,
    Submit,
    /// Element ids, empty when nothing was focused.
    FocusChange { old: String, new: String },
}

impl WindowEvent {
    pub fn code(&self) -> u8 {
        match self {
            WindowEvent::Close => 0x00,
            WindowEvent::Submit => 0x01,
            WindowEvent::FocusChange { .. } => 0x02,
        }
    }
}

/// Events raised by clickable elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ElemEvent {
    Press,
    Change { selected: bool },
}

impl ElemEvent {
    pub fn code(&self) -> u8 {
        match self {
            ElemEvent::Press => 0x00,
            ElemEvent::Change { .. } => 0x01,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutboundEvent {
    Window {
        window: u64,
        event: WindowEvent,
    },
    Elem {
        window: u64,
        elem_type: ElemType,
        elem_id: String,
        event: ElemEvent,
    },
}

impl OutboundEvent {
    pub fn window_id(&self) -> u64 {
        match self {
            OutboundEvent::Window { window, .. } | OutboundEvent::Elem { window, .. } => *window,
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut w = Writer::new();
        match self {
            OutboundEvent::Window { window, event } => {
                w.write_u8(WINDOW_EVENT).write_u64(*window).write_u8(event.code());
                if let WindowEvent::FocusChange { old, new } = event {
                    w.write_nstr(old).write_nstr(new);
                }
            }
            OutboundEvent::Elem {
                window,
                elem_type,
                elem_id,
                event,
            } => {
                w.write_u8(ELEM_EVENT)
                    .write_u64(*window)
                    .write_u8(event.code())
                    .write_u8(elem_type.to_wire())
                    .write_nstr(elem_id);
                if let ElemEvent::Change { selected } = event {
                    w.write_u8(u8::from(*selected));
                }
            }
        }
        w.into_bytes()
    }
}

/// Collects the events one window raises.
#[derive(Debug, Default)]
pub struct Outbox {
    window: u64,
    events: Vec<OutboundEvent>,
}

impl Outbox {
    pub fn new(window: u64) -> Self {
        Self {
            window,
            events: Vec::new(),
        }
    }

    pub fn window(&mut self, event: WindowEvent) {
        self.events.push(OutboundEvent::Window {
            window: self.window,
            event,
        });
    }

    pub fn elem(&mut self, elem: &Elem, event: ElemEvent) {
        self.events.push(OutboundEvent::Elem {
            window: self.window,
            elem_type: elem.elem_type(),
            elem_id: elem.id().to_owned(),
            event,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, OutboundEvent> {
        self.events.drain(..)
    }
}
