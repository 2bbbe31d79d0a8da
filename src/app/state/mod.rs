use super::command_palette::CommandPalette;
use super::keymap::{KeyChord, KeyMap};
use super::shortcut::{GlobalKeyListeners, ListenerContext};
use crate::domain::action::ActionRegistry;
use crate::domain::board::{Board, Shape};
use crate::domain::editor::{ClipboardSink, EditorState};
use crate::domain::i18n::Translator;
use crate::error::Result;
use crate::infrastructure::config::{AppConfig, DEFAULT_SHORTCUT};
use crate::theme::Theme;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;

pub mod command_palette;
pub mod input;

// Re-exports
pub use command_palette::{ActionItemRef, PaletteFocus, PaletteSession};
pub use input::AppTextArea;

pub const STATUS_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum AppMode {
    Normal,         // Canvas has the keyboard
    Editing,        // Typing into a shape's label
    MainMenu,       // Main menu overlay
    CommandPalette, // Searching actions
    Crashed,        // Error screen; only quit works
}

pub struct AppState {
    // --- Status ---
    pub should_quit: bool,
    pub status_message: Option<String>,
    pub status_clear_time: Option<Instant>,

    // --- Document ---
    pub board: Board,
    /// Latest shapes, for actions that work off the UI task
    pub board_snapshot: Option<watch::Sender<Vec<Shape>>>,

    // --- Actions ---
    pub registry: ActionRegistry,
    pub palette: CommandPalette,
    pub listeners: GlobalKeyListeners,

    // --- Config ---
    pub keymap: Arc<KeyMap>,
    pub theme: Theme,
    pub translator: Box<dyn Translator + Send + Sync>,
    pub clipboard: Box<dyn ClipboardSink + Send>,

    // --- Animation ---
    pub frame_count: u64,
}

impl AppState {
    /// Builds the state and mounts the palette shortcut.
    pub fn new(
        config: &AppConfig,
        registry: ActionRegistry,
        translator: Box<dyn Translator + Send + Sync>,
        clipboard: Box<dyn ClipboardSink + Send>,
    ) -> Result<Self> {
        let chord = KeyChord::parse(&config.palette.shortcut).or_else(|err| {
            tracing::warn!(
                shortcut = %config.palette.shortcut,
                error = %err,
                "invalid palette shortcut, using {DEFAULT_SHORTCUT}"
            );
            KeyChord::parse(DEFAULT_SHORTCUT)
        })?;
        let mut state = Self {
            should_quit: false,
            status_message: None,
            status_clear_time: None,
            board: Board::new(),
            board_snapshot: None,
            registry,
            palette: CommandPalette::new(config.palette.debounce()),
            listeners: GlobalKeyListeners::new(),
            keymap: Arc::new(KeyMap::default()),
            theme: Theme::from_palette_type(config.theme),
            translator,
            clipboard,
            frame_count: 0,
        };
        state.palette.mount(&mut state.listeners, chord);
        state.palette.refresh(&state.registry, &state.board);
        Ok(state)
    }

    /// Unmounts the palette; call once the loop has stopped.
    pub fn shutdown(&mut self) {
        self.palette.unmount(&mut self.listeners);
    }

    pub fn publish_board_to(&mut self, tx: watch::Sender<Vec<Shape>>) {
        self.board_snapshot = Some(tx);
        self.publish_board();
    }

    /// Pushes the current shapes to subscribers if they changed.
    pub fn publish_board(&self) {
        if let Some(tx) = &self.board_snapshot {
            let shapes = self.board.shapes();
            tx.send_if_modified(|current| {
                if current.as_slice() == shapes {
                    false
                } else {
                    *current = shapes.to_vec();
                    true
                }
            });
        }
    }

    pub fn mode(&self) -> AppMode {
        if self.board.crashing_error().is_some() {
            AppMode::Crashed
        } else if self.palette.is_open() {
            AppMode::CommandPalette
        } else if self.board.editing_shape_id().is_some() {
            AppMode::Editing
        } else if self.board.has_any_open_menus() {
            AppMode::MainMenu
        } else {
            AppMode::Normal
        }
    }

    pub fn listener_context(&self) -> ListenerContext {
        ListenerContext {
            palette_open: self.palette.is_open(),
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_clear_time = Some(Instant::now() + STATUS_TIMEOUT);
    }

    pub fn locale(&self) -> &str {
        self.translator.locale()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::board::{MenuKind, ShapeKind};
    use crate::infrastructure::clipboard::TerminalClipboard;
    use crate::infrastructure::translations::Translations;

    pub(crate) fn test_state(registry: ActionRegistry) -> AppState {
        let mut config = AppConfig::default();
        config.palette.debounce_ms = 0;
        AppState::new(
            &config,
            registry,
            Box::new(Translations::builtin("en")),
            Box::new(TerminalClipboard::new(Vec::new())),
        )
        .unwrap()
    }

    #[test]
    fn test_new_mounts_shortcut() {
        let mut state = test_state(ActionRegistry::new());
        assert!(state.palette.is_mounted());
        assert_eq!(state.listeners.len(), 1);
        state.shutdown();
        assert!(state.listeners.is_empty());
    }

    #[test]
    fn test_invalid_shortcut_falls_back_to_default() {
        use crate::app::action::Action;
        use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

        let mut config = AppConfig::default();
        config.palette.shortcut = "hyper+k".into();
        let state = AppState::new(
            &config,
            ActionRegistry::new(),
            Box::new(Translations::builtin("en")),
            Box::new(TerminalClipboard::new(Vec::new())),
        )
        .unwrap();

        assert_eq!(state.listeners.len(), 1);
        let key = KeyEvent::new(KeyCode::Char('k'), KeyModifiers::CONTROL);
        assert_eq!(
            state.listeners.dispatch(&key, state.listener_context()),
            Some(Action::TogglePalette)
        );
    }

    #[test]
    fn test_mode_priority() {
        let mut state = test_state(ActionRegistry::new());
        assert_eq!(state.mode(), AppMode::Normal);

        state.board.toggle_menu(MenuKind::Main);
        assert_eq!(state.mode(), AppMode::MainMenu);
        state.board.close_menus();

        state.board.add_shape(ShapeKind::Note);
        state.board.begin_editing();
        assert_eq!(state.mode(), AppMode::Editing);
        state.board.end_editing();

        assert!(state.palette.open(&state.board));
        assert_eq!(state.mode(), AppMode::CommandPalette);

        state.board.set_crashing_error(Some("boom".into()));
        assert_eq!(state.mode(), AppMode::Crashed);
    }
}
