//! Command palette controller.
//!
//! Owns the palette session (open flag, query field, cursor), the candidate
//! list derived from the registry, and the one-tick focus hand-offs between
//! the palette and the canvas. Results shown to the user are always the last
//! *committed* ranking; query edits commit after a quiet period.

use super::keymap::KeyChord;
use super::shortcut::{GlobalKeyListeners, ListenerId, PaletteShortcut};
use super::state::command_palette::{ActionItemRef, PaletteFocus, PaletteSession};
use crate::domain::action::{palette_candidates, ActionItem, ActionOutcome, ActionRegistry, ActionSource};
use crate::domain::editor::{open_blocker, ClipboardSink, EditorHost, EditorState};
use crate::domain::ranking::rank;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use futures::future::BoxFuture;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub const PAGE_STEP: usize = 10;
/// Number of leading results reachable with the digit keys.
pub const QUICK_SELECT_SLOTS: usize = 9;

/// Focus changes that must wait until the next frame has been drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    FocusQuery,
    FocusCanvas,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Scheduled {
    epoch: u64,
    task: Deferred,
}

/// An action invocation that finishes asynchronously.
pub struct PendingAction {
    pub id: String,
    pub future: BoxFuture<'static, anyhow::Result<()>>,
}

impl std::fmt::Debug for PendingAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingAction").field("id", &self.id).finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResponse {
    /// Consumed by the palette
    Handled,
    /// Left to the query field's own editing behavior
    Passthrough,
    Ignored,
}

/// Collaborators a key press may touch.
pub struct PaletteEnv<'a> {
    pub editor: &'a dyn EditorState,
    pub clipboard: &'a mut dyn ClipboardSink,
    pub now: Instant,
}

pub struct CommandPalette {
    session: PaletteSession,
    candidates: Vec<Arc<ActionItem>>,
    debounce: Duration,
    /// Bumped on every open and close; deferred work from an older epoch is stale
    epoch: u64,
    deferred: Vec<Scheduled>,
    spawned: Vec<PendingAction>,
    listener: Option<ListenerId>,
}

impl CommandPalette {
    #[must_use]
    pub fn new(debounce: Duration) -> Self {
        Self {
            session: PaletteSession::default(),
            candidates: Vec::new(),
            debounce,
            epoch: 0,
            deferred: Vec::new(),
            spawned: Vec::new(),
            listener: None,
        }
    }

    pub fn session(&self) -> &PaletteSession {
        &self.session
    }

    pub fn is_open(&self) -> bool {
        self.session.is_open
    }

    pub fn is_mounted(&self) -> bool {
        self.listener.is_some()
    }

    /// Installs the global open/close shortcut.
    pub fn mount(&mut self, listeners: &mut GlobalKeyListeners, chord: KeyChord) {
        if self.listener.is_none() {
            self.listener = Some(listeners.install(Box::new(PaletteShortcut { chord })));
        }
    }

    /// Removes the shortcut and drops any focus hand-off still queued.
    pub fn unmount(&mut self, listeners: &mut GlobalKeyListeners) {
        if let Some(id) = self.listener.take() {
            listeners.uninstall(id);
        }
        self.deferred.clear();
        self.session = PaletteSession::default();
        self.epoch += 1;
    }

    // --- Open / close ---

    pub fn open(&mut self, editor: &dyn EditorState) -> bool {
        if self.session.is_open {
            return false;
        }
        if let Some(blocker) = open_blocker(editor) {
            tracing::debug!(?blocker, "command palette open refused");
            return false;
        }
        self.session = PaletteSession::opened();
        self.epoch += 1;
        self.recompute();
        self.schedule(Deferred::FocusQuery);
        tracing::debug!("command palette opened");
        true
    }

    pub fn close(&mut self) -> bool {
        if !self.session.is_open {
            return false;
        }
        self.session = PaletteSession::default();
        self.epoch += 1;
        self.schedule(Deferred::FocusCanvas);
        tracing::debug!("command palette closed");
        true
    }

    /// Shortcut entry point; refused in both directions while a guard holds.
    pub fn toggle(&mut self, editor: &dyn EditorState) -> bool {
        if let Some(blocker) = open_blocker(editor) {
            tracing::debug!(?blocker, "command palette toggle refused");
            return false;
        }
        if self.session.is_open {
            self.close()
        } else {
            self.open(editor)
        }
    }

    // --- Candidates and ranking ---

    /// Rebuilds the candidate list from the registry and re-ranks the
    /// committed query against it.
    pub fn refresh(&mut self, registry: &ActionRegistry, editor: &dyn EditorState) {
        self.candidates = palette_candidates(registry, editor);
        if self.session.is_open {
            self.recompute();
        }
    }

    fn recompute(&mut self) {
        self.session.results = rank(&self.session.committed_query, &self.candidates)
            .into_iter()
            .map(ActionItemRef)
            .collect();
        self.session.clamp_selection();
    }

    fn commit_query(&mut self) {
        let text = self.session.query_text();
        if text != self.session.committed_query {
            // the list changes under the cursor
            self.session.selected_index = 0;
        }
        self.session.committed_query = text;
        self.session.pending_since = None;
        self.recompute();
    }

    fn query_changed(&mut self, now: Instant) {
        self.session.selected_index = 0;
        if self.debounce.is_zero() {
            self.commit_query();
        } else {
            self.session.pending_since = Some(now);
        }
    }

    fn flush_pending(&mut self) {
        if self.session.pending_since.is_some() {
            self.commit_query();
        }
    }

    /// Commits a debounced query once it has been quiet long enough.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.session.pending_since {
            Some(since) if now.saturating_duration_since(since) >= self.debounce => {
                self.commit_query();
                true
            }
            _ => false,
        }
    }

    /// Replaces the query text, as if typed.
    pub fn set_query(&mut self, text: &str, now: Instant) {
        if !self.session.is_open || self.session.query_text() == text {
            return;
        }
        self.session.query.clear();
        self.session.query.insert_str(text);
        self.session.focus = PaletteFocus::Query;
        self.query_changed(now);
    }

    pub fn clear_query(&mut self) {
        if !self.session.is_open {
            return;
        }
        self.session.query.clear();
        self.session.selected_index = 0;
        self.session.focus = PaletteFocus::Query;
        self.commit_query();
    }

    pub fn focus_query(&mut self) {
        if self.session.is_open {
            self.session.focus = PaletteFocus::Query;
        }
    }

    pub fn focus_list(&mut self) {
        if self.session.is_open {
            self.session.focus = PaletteFocus::List;
        }
    }

    // --- Execution ---

    /// Runs the result at `index` if it is still enabled, then closes.
    pub fn execute_at(&mut self, index: usize, editor: &dyn EditorState) -> bool {
        let Some(item) = self.session.result(index).cloned() else {
            return false;
        };
        if !item.is_enabled(editor) {
            tracing::debug!(action = %item.id, "ignoring disabled action");
            return false;
        }

        let outcome = item.invoke(ActionSource::Kbd);
        self.close();
        match outcome {
            Ok(ActionOutcome::Completed) => {
                tracing::info!(action = %item.id, "action executed");
            }
            Ok(ActionOutcome::Pending(future)) => {
                tracing::info!(action = %item.id, "action started");
                self.spawned.push(PendingAction {
                    id: item.id.clone(),
                    future,
                });
            }
            Err(err) => {
                tracing::error!(action = %item.id, error = %err, "action failed");
            }
        }
        true
    }

    pub fn take_spawned(&mut self) -> Vec<PendingAction> {
        std::mem::take(&mut self.spawned)
    }

    // --- Mouse ---

    pub fn hover(&mut self, index: usize, editor: &dyn EditorState) {
        if let Some(item) = self.session.result(index) {
            if item.is_enabled(editor) {
                self.session.selected_index = index;
            }
        }
    }

    pub fn click(&mut self, index: usize, editor: &dyn EditorState) -> bool {
        self.execute_at(index, editor)
    }

    // --- Keyboard ---

    pub fn handle_key(&mut self, key: KeyEvent, env: &mut PaletteEnv<'_>) -> KeyResponse {
        if !self.session.is_open {
            return KeyResponse::Ignored;
        }

        let command = key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER);
        let any_modifier = command
            || key
                .modifiers
                .intersects(KeyModifiers::ALT | KeyModifiers::SHIFT);
        let field_focused = self.session.focus == PaletteFocus::Query;

        match key.code {
            KeyCode::Down => self.session.select_next(),
            KeyCode::Up => self.session.select_prev(),
            KeyCode::Home => self.session.select_first(),
            KeyCode::End => self.session.select_last(),
            KeyCode::PageDown => self.session.select_forward(PAGE_STEP),
            KeyCode::PageUp => self.session.select_back(PAGE_STEP),
            KeyCode::Tab if key.modifiers == KeyModifiers::SHIFT => self.session.select_back(1),
            KeyCode::Tab if !any_modifier => self.session.select_forward(1),
            KeyCode::BackTab => self.session.select_back(1),
            KeyCode::Enter => {
                self.flush_pending();
                self.execute_at(self.session.selected_index, env.editor);
            }
            KeyCode::Esc => {
                self.close();
            }
            KeyCode::Backspace | KeyCode::Delete => {
                if self.session.query.is_empty() {
                    if !field_focused {
                        return KeyResponse::Ignored;
                    }
                    self.close();
                } else {
                    self.clear_query();
                }
            }
            KeyCode::Char('a' | 'A') if command => {
                if !field_focused {
                    return KeyResponse::Ignored;
                }
                self.session.query.select_all();
                return KeyResponse::Passthrough;
            }
            KeyCode::Char('c' | 'C') if command => {
                if field_focused {
                    self.session.query.copy();
                    return KeyResponse::Passthrough;
                }
                self.copy_selected(env.clipboard);
            }
            KeyCode::Char(digit @ '1'..='9') if !any_modifier && self.session.query.is_empty() => {
                let index = digit as usize - '1' as usize;
                self.flush_pending();
                self.execute_at(index, env.editor);
            }
            KeyCode::Char(c) if !command && !key.modifiers.contains(KeyModifiers::ALT) => {
                self.session.focus = PaletteFocus::Query;
                self.session.query.insert_char(c);
                self.query_changed(env.now);
            }
            _ => return KeyResponse::Ignored,
        }
        KeyResponse::Handled
    }

    fn copy_selected(&self, clipboard: &mut dyn ClipboardSink) {
        let Some(item) = self.session.selected() else {
            return;
        };
        let text = format!("{} ({})", item.display_label(crate::domain::action::DEFAULT_LOCALE), item.id);
        if let Err(err) = clipboard.write_text(&text) {
            tracing::warn!(action = %item.id, error = %err, "clipboard write failed");
        }
    }

    // --- Deferred focus ---

    fn schedule(&mut self, task: Deferred) {
        self.deferred.push(Scheduled {
            epoch: self.epoch,
            task,
        });
    }

    pub fn has_deferred(&self) -> bool {
        !self.deferred.is_empty()
    }

    /// Runs focus hand-offs queued before the last frame. Work queued by an
    /// earlier open/close cycle is discarded.
    pub fn run_deferred(&mut self, host: &mut dyn EditorHost) {
        for Scheduled { epoch, task } in std::mem::take(&mut self.deferred) {
            if epoch != self.epoch {
                tracing::trace!(?task, "dropping stale focus request");
                continue;
            }
            match task {
                Deferred::FocusQuery if self.session.is_open => {
                    self.session.focus = PaletteFocus::Query;
                }
                Deferred::FocusCanvas if !self.session.is_open => host.focus(),
                _ => tracing::trace!(?task, "focus request no longer applies"),
            }
        }
    }
}
