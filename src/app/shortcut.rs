//! Process-wide key listeners.
//!
//! Listeners see every key press before mode-specific routing, the way a
//! document-level handler would in a browser. Each listener is installed by
//! its owner and must be uninstalled when the owner goes away.

use super::action::Action;
use super::keymap::KeyChord;
use crossterm::event::{KeyCode, KeyEvent};

/// What a global listener may know about the UI when a key arrives.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListenerContext {
    pub palette_open: bool,
}

pub trait KeyListener: Send {
    fn on_key(&self, key: &KeyEvent, ctx: ListenerContext) -> Option<Action>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

#[derive(Default)]
pub struct GlobalKeyListeners {
    next_id: u64,
    listeners: Vec<(ListenerId, Box<dyn KeyListener>)>,
}

impl GlobalKeyListeners {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn install(&mut self, listener: Box<dyn KeyListener>) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.listeners.push((id, listener));
        tracing::debug!(listener = id.0, "key listener installed");
        id
    }

    pub fn uninstall(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        let removed = self.listeners.len() != before;
        if removed {
            tracing::debug!(listener = id.0, "key listener removed");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Offers the key to each listener in install order; the first one that
    /// claims it wins.
    pub fn dispatch(&self, key: &KeyEvent, ctx: ListenerContext) -> Option<Action> {
        self.listeners
            .iter()
            .find_map(|(_, listener)| listener.on_key(key, ctx))
    }
}

/// Toggles the command palette on its chord and closes it on Escape.
#[derive(Debug, Clone, Copy)]
pub struct PaletteShortcut {
    pub chord: KeyChord,
}

impl KeyListener for PaletteShortcut {
    fn on_key(&self, key: &KeyEvent, ctx: ListenerContext) -> Option<Action> {
        if self.chord.matches(key) {
            return Some(Action::TogglePalette);
        }
        if key.code == KeyCode::Esc && ctx.palette_open {
            return Some(Action::ClosePalette);
        }
        None
    }
}
