use crate::app::action::Action;
use crate::app::state::{AppMode, AppState};
use crate::components::modals::main_menu;
use crate::components::modals::{PaletteHit, PaletteLayout};
use crate::domain::i18n::msg;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Rect, Size};

pub fn map_event_to_action(event: Event, app_state: &AppState, terminal_size: Size) -> Option<Action> {
    match event {
        Event::Key(key) => {
            if key.kind == KeyEventKind::Release {
                return None;
            }
            map_key(key, app_state)
        }
        Event::Mouse(mouse) => map_mouse(mouse, app_state, terminal_size),
        Event::Resize(w, h) => Some(Action::Resize(w, h)),
        _ => None,
    }
}

fn map_key(key: KeyEvent, app_state: &AppState) -> Option<Action> {
    let mode = app_state.mode();
    if mode == AppMode::Crashed {
        return match key.code {
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        };
    }

    if let Some(action) = app_state
        .listeners
        .dispatch(&key, app_state.listener_context())
    {
        return Some(action);
    }

    match mode {
        AppMode::CommandPalette => Some(Action::PaletteKey(key)),
        AppMode::Editing => match key.code {
            KeyCode::Esc | KeyCode::Enter => Some(Action::EndEditing),
            KeyCode::Backspace => Some(Action::EditText(None)),
            KeyCode::Char(c) => Some(Action::EditText(Some(c))),
            _ => None,
        },
        AppMode::MainMenu => match key.code {
            KeyCode::Esc | KeyCode::Char('m') => Some(Action::CloseMenus),
            KeyCode::Char(c) => main_menu::entries()
                .into_iter()
                .find(|(hotkey, _, _)| *hotkey == c)
                .map(|(_, _, action)| action),
            _ => None,
        },
        AppMode::Normal => app_state.keymap.get_action(key),
        AppMode::Crashed => None,
    }
}

fn map_mouse(mouse: MouseEvent, app_state: &AppState, terminal_size: Size) -> Option<Action> {
    match app_state.mode() {
        AppMode::CommandPalette => {
            let area = Rect::new(0, 0, terminal_size.width, terminal_size.height);
            let clear_label = msg(app_state.translator.as_ref(), "command-bar.clear", "Clear");
            let layout = PaletteLayout::compute(area, app_state.palette.session(), &clear_label);
            let hit = layout.hit(mouse.column, mouse.row);
            match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => match hit {
                    PaletteHit::Backdrop => Some(Action::PaletteBackdropClick),
                    PaletteHit::Clear => Some(Action::PaletteClearQuery),
                    PaletteHit::Query => Some(Action::PaletteFocusQuery),
                    PaletteHit::Row(i) => Some(Action::PaletteClick(i)),
                    PaletteHit::List => Some(Action::PaletteFocusList),
                    PaletteHit::Dialog => None,
                },
                MouseEventKind::Moved => match hit {
                    PaletteHit::Row(i) => Some(Action::PaletteHover(i)),
                    _ => None,
                },
                MouseEventKind::ScrollDown => Some(Action::PaletteScroll(true)),
                MouseEventKind::ScrollUp => Some(Action::PaletteScroll(false)),
                _ => None,
            }
        }
        AppMode::MainMenu => match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let area = Rect::new(0, 0, terminal_size.width, terminal_size.height);
                let menu = main_menu::menu_rect(area);
                let pos = ratatui::layout::Position::new(mouse.column, mouse.row);
                if !menu.contains(pos) {
                    return Some(Action::CloseMenus);
                }
                // First and last rows are the border.
                let index = mouse.row.checked_sub(menu.y + 1)? as usize;
                main_menu::entries()
                    .into_iter()
                    .nth(index)
                    .map(|(_, _, action)| action)
            }
            _ => None,
        },
        AppMode::Normal => match mouse.kind {
            MouseEventKind::ScrollUp => Some(Action::ZoomIn),
            MouseEventKind::ScrollDown => Some(Action::ZoomOut),
            _ => None,
        },
        AppMode::Editing | AppMode::Crashed => None,
    }
}
