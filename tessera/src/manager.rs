//! The window manager: applies host messages and routes input.

use std::collections::{BTreeMap, BTreeSet};

use tessera_wire::Reader;
use tracing::{debug, error};

use crate::canvas::Canvas;
use crate::config::ManagerConfig;
use crate::error::ManagerError;
use crate::event::Event;
use crate::message::{OutboundEvent, WindowEvent};
use crate::window::{Frame, Window, WindowType};

/// Action byte of a manager message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Action {
    Open = 0x00,
    Reopen = 0x01,
    Update = 0x02,
    Close = 0x03,
}

impl Action {
    pub fn from_wire(value: u8) -> Option<Self> {
        match value {
            0x00 => Some(Action::Open),
            0x01 => Some(Action::Reopen),
            0x02 => Some(Action::Update),
            0x03 => Some(Action::Close),
            _ => None,
        }
    }
}

/// Owns every open window.
///
/// Windows are kept sorted by id so they draw in creation order. The GUI
/// window with the highest id receives input.
#[derive(Debug, Default)]
pub struct Manager {
    config: ManagerConfig,
    windows: BTreeMap<u64, Window>,
    gui_windows: BTreeSet<u64>,
    outbox: Vec<OutboundEvent>,
}

impl Manager {
    pub fn new(config: ManagerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ManagerConfig) {
        self.config = config;
    }

    pub fn window(&self, id: u64) -> Option<&Window> {
        self.windows.get(&id)
    }

    pub fn windows(&self) -> impl Iterator<Item = &Window> {
        self.windows.values()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Id of the window that receives input.
    pub fn focused(&self) -> Option<u64> {
        self.gui_windows.last().copied()
    }

    /// Apply one manager message.
    ///
    /// A window whose record fails to apply is closed before the error is
    /// returned.
    pub fn receive_message(&mut self, data: &[u8]) -> Result<(), ManagerError> {
        let mut r = Reader::new(data);
        let action = r.read_u8()?;
        let id = r.read_u64()?;

        let result = match Action::from_wire(action) {
            Some(Action::Reopen) => {
                let close_id = r.read_u64()?;
                if self.windows.contains_key(&close_id) {
                    self.remove_window(close_id);
                }
                self.open_window(id, &mut r)
            }
            Some(Action::Open) => self.open_window(id, &mut r),
            Some(Action::Update) => self.update_window(id, &mut r),
            Some(Action::Close) => {
                if self.remove_window(id) {
                    Ok(())
                } else {
                    Err(ManagerError::UnknownWindow(id))
                }
            }
            None => Err(ManagerError::UnknownAction(action)),
        };

        self.refresh_focus();
        self.collect_events();
        result
    }

    fn open_window(&mut self, id: u64, r: &mut Reader<'_>) -> Result<(), ManagerError> {
        if self.windows.contains_key(&id) {
            return Err(ManagerError::AlreadyOpen(id));
        }

        let mut window = Window::new(id);
        if let Err(source) = window.read(r, true, &self.config) {
            error!("Fatal error when opening window {}; closing window: {}", id, source);
            return Err(ManagerError::Window { id, source });
        }
        window.set_scale(self.config.scale(window.window_type()));

        if window.window_type() == WindowType::Gui {
            self.gui_windows.insert(id);
        }
        self.windows.insert(id, window);
        debug!(window = id, "window opened");
        Ok(())
    }

    fn update_window(&mut self, id: u64, r: &mut Reader<'_>) -> Result<(), ManagerError> {
        let window = self.windows.get_mut(&id).ok_or(ManagerError::UnknownWindow(id))?;
        if let Err(source) = window.read(r, false, &self.config) {
            error!("Fatal error when updating window {}; closing window: {}", id, source);
            self.remove_window(id);
            return Err(ManagerError::Window { id, source });
        }
        Ok(())
    }

    /// Close a window without notifying the host. Returns whether it existed.
    pub fn remove_window(&mut self, id: u64) -> bool {
        self.gui_windows.remove(&id);
        let removed = self.windows.remove(&id).is_some();
        if removed {
            self.refresh_focus();
        } else {
            debug!(window = id, "window is already closed");
        }
        removed
    }

    fn refresh_focus(&mut self) {
        let focused = self.focused();
        for (&id, window) in &mut self.windows {
            window.set_focused(Some(id) == focused);
        }
    }

    /// Draw every window of one type, in id order.
    pub fn draw_type(&mut self, window_type: WindowType, frame: &Frame<'_>, canvas: &mut dyn Canvas) {
        for window in self.windows.values_mut() {
            if window.window_type() == window_type {
                window.draw_all(frame, &self.config, canvas);
            }
        }
        self.collect_events();
    }

    /// Draw all window types back to front.
    pub fn draw_all(&mut self, frame: &Frame<'_>, canvas: &mut dyn Canvas) {
        for value in 0..=WindowType::Fg.to_wire() {
            self.draw_type(WindowType::from_wire(value), frame, canvas);
        }
    }

    /// Route a host event to the focused window.
    pub fn process_input(&mut self, event: &Event) -> bool {
        let Some(focused) = self.focused() else {
            return false;
        };
        let handled = self
            .windows
            .get_mut(&focused)
            .is_some_and(|window| window.process_input(event));
        self.collect_events();
        handled
    }

    /// Move raised events to the manager outbox and close windows that
    /// asked to be closed.
    fn collect_events(&mut self) {
        let mut closing = Vec::new();
        for (&id, window) in &mut self.windows {
            self.outbox.extend(window.drain_events());
            if window.close_requested() {
                closing.push(id);
            }
        }
        for id in closing {
            self.outbox.push(OutboundEvent::Window {
                window: id,
                event: WindowEvent::Close,
            });
            self.remove_window(id);
        }
    }

    /// Take every event raised since the last call.
    pub fn drain_events(&mut self) -> Vec<OutboundEvent> {
        std::mem::take(&mut self.outbox)
    }
}
