use super::action::Action;
use crate::domain::board::ShapeKind;
use crate::error::{Error, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// A key plus modifiers, parsed from strings like `"mod+k"` or
/// `"ctrl+shift+p"`. `mod` accepts either Ctrl or Super (Cmd).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyChord {
    pub code: KeyCode,
    /// All of these must be held
    pub required: KeyModifiers,
    /// At least one of these must be held (empty = no constraint)
    pub any_of: KeyModifiers,
}

impl KeyChord {
    pub fn parse(spec: &str) -> Result<Self> {
        let invalid = || Error::InvalidChord(spec.to_string());
        let mut required = KeyModifiers::empty();
        let mut any_of = KeyModifiers::empty();

        let parts: Vec<&str> = spec.split('+').map(str::trim).collect();
        let (key, modifiers) = parts.split_last().ok_or_else(invalid)?;
        for m in modifiers {
            match m.to_lowercase().as_str() {
                "mod" => any_of |= KeyModifiers::CONTROL | KeyModifiers::SUPER,
                "ctrl" | "control" => required |= KeyModifiers::CONTROL,
                "cmd" | "super" | "meta" => required |= KeyModifiers::SUPER,
                "alt" | "option" => required |= KeyModifiers::ALT,
                "shift" => required |= KeyModifiers::SHIFT,
                _ => return Err(invalid()),
            }
        }

        let code = match key.to_lowercase().as_str() {
            "esc" | "escape" => KeyCode::Esc,
            "enter" => KeyCode::Enter,
            "tab" => KeyCode::Tab,
            "space" => KeyCode::Char(' '),
            k if k.chars().count() == 1 => KeyCode::Char(k.chars().next().ok_or_else(invalid)?),
            k if k.starts_with('f') => {
                let n: u8 = k[1..].parse().map_err(|_| invalid())?;
                KeyCode::F(n)
            }
            _ => return Err(invalid()),
        };

        Ok(Self {
            code,
            required,
            any_of,
        })
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        let code_matches = match (self.code, event.code) {
            (KeyCode::Char(a), KeyCode::Char(b)) => a.eq_ignore_ascii_case(&b),
            (a, b) => a == b,
        };
        if !code_matches || !event.modifiers.contains(self.required) {
            return false;
        }
        if !self.any_of.is_empty() && !event.modifiers.intersects(self.any_of) {
            return false;
        }
        (event.modifiers - self.required - self.any_of).is_empty()
    }
}

/// Direct canvas bindings used while no overlay has focus.
pub struct KeyMap {
    pub canvas: HashMap<KeyEvent, Action>,
}

impl Default for KeyMap {
    fn default() -> Self {
        let mut canvas = HashMap::new();

        canvas.insert(key(KeyCode::Char('q')), Action::Quit);
        canvas.insert(key(KeyCode::Char('r')), Action::AddShape(ShapeKind::Rectangle));
        canvas.insert(key(KeyCode::Char('o')), Action::AddShape(ShapeKind::Ellipse));
        canvas.insert(key(KeyCode::Char('n')), Action::AddShape(ShapeKind::Note));
        canvas.insert(key(KeyCode::Delete), Action::DeleteSelected);
        canvas.insert(key(KeyCode::Char('x')), Action::DeleteSelected);
        canvas.insert(key(KeyCode::Char('d')), Action::DuplicateSelected);
        canvas.insert(key(KeyCode::Char('a')), Action::SelectAll);
        canvas.insert(key(KeyCode::Esc), Action::SelectNone);
        canvas.insert(key(KeyCode::Tab), Action::SelectNext);
        canvas.insert(key(KeyCode::Char('u')), Action::Undo);
        canvas.insert(key(KeyCode::Char('U')), Action::Redo);
        canvas.insert(key(KeyCode::Char('g')), Action::ToggleGrid);
        canvas.insert(key(KeyCode::Char('+')), Action::ZoomIn);
        canvas.insert(key(KeyCode::Char('-')), Action::ZoomOut);
        canvas.insert(key(KeyCode::Char('0')), Action::ResetZoom);
        canvas.insert(key(KeyCode::Char('R')), Action::ToggleReadonly);
        canvas.insert(key(KeyCode::Enter), Action::BeginEditing);
        canvas.insert(key(KeyCode::Char('m')), Action::ToggleMainMenu);
        canvas.insert(key(KeyCode::Char('h')), Action::MoveSelected(-2, 0));
        canvas.insert(key(KeyCode::Left), Action::MoveSelected(-2, 0));
        canvas.insert(key(KeyCode::Char('l')), Action::MoveSelected(2, 0));
        canvas.insert(key(KeyCode::Right), Action::MoveSelected(2, 0));
        canvas.insert(key(KeyCode::Char('k')), Action::MoveSelected(0, -1));
        canvas.insert(key(KeyCode::Up), Action::MoveSelected(0, -1));
        canvas.insert(key(KeyCode::Char('j')), Action::MoveSelected(0, 1));
        canvas.insert(key(KeyCode::Down), Action::MoveSelected(0, 1));

        Self { canvas }
    }
}

impl KeyMap {
    pub fn get_action(&self, event: KeyEvent) -> Option<Action> {
        // Terminals report shifted letters with SHIFT set; bindings store the
        // bare character.
        let normalized = match event.code {
            KeyCode::Char(_) => KeyEvent::new(event.code, event.modifiers - KeyModifiers::SHIFT),
            _ => KeyEvent::new(event.code, event.modifiers),
        };
        self.canvas.get(&normalized).cloned()
    }
}

fn key(code: impl Into<KeyCode>) -> KeyEvent {
    KeyEvent::new(code.into(), KeyModifiers::empty())
}
