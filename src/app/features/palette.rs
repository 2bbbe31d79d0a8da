use crate::app::{
    action::{Action, UpdateResult},
    command_palette::{KeyResponse, PaletteEnv},
    state::AppState,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;

pub fn update(state: &mut AppState, action: &Action) -> UpdateResult {
    match action {
        Action::OpenPalette => {
            if state.palette.open(&state.board) {
                state.board.blur();
            }
        }
        Action::ClosePalette | Action::PaletteBackdropClick => {
            state.palette.close();
        }
        Action::TogglePalette => {
            if state.palette.toggle(&state.board) && state.palette.is_open() {
                state.board.blur();
            }
        }
        Action::PaletteKey(key) => {
            send_key(state, *key);
        }
        Action::PaletteScroll(down) => {
            let code = if *down { KeyCode::Down } else { KeyCode::Up };
            send_key(state, KeyEvent::new(code, KeyModifiers::empty()));
        }
        Action::PaletteHover(index) => state.palette.hover(*index, &state.board),
        Action::PaletteClick(index) => {
            state.palette.click(*index, &state.board);
        }
        Action::PaletteFocusQuery => state.palette.focus_query(),
        Action::PaletteFocusList => state.palette.focus_list(),
        Action::PaletteClearQuery => state.palette.clear_query(),
        _ => return UpdateResult::NotHandled,
    }
    UpdateResult::Handled(None)
}

fn send_key(state: &mut AppState, key: KeyEvent) {
    let mut env = PaletteEnv {
        editor: &state.board,
        clipboard: state.clipboard.as_mut(),
        now: Instant::now(),
    };
    match state.palette.handle_key(key, &mut env) {
        KeyResponse::Passthrough => {
            // the field's own editing (select-all, copy) already ran
            tracing::trace!(?key, "key passed through to query field");
        }
        KeyResponse::Handled | KeyResponse::Ignored => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::tests::test_state;
    use crate::domain::action::tests::noop;
    use crate::domain::action::ActionRegistry;
    use crate::domain::board::MenuKind;

    fn registry() -> ActionRegistry {
        let mut registry = ActionRegistry::new();
        registry.register(noop("undo", "Undo")).unwrap();
        registry.register(noop("redo", "Redo")).unwrap();
        registry
    }

    #[test]
    fn test_toggle_blurs_canvas_and_close_restores_after_tick() {
        let mut state = test_state(registry());
        update(&mut state, &Action::TogglePalette);
        assert!(state.palette.is_open());
        assert!(!state.board.is_canvas_focused());

        update(&mut state, &Action::TogglePalette);
        assert!(!state.palette.is_open());
        assert!(!state.board.is_canvas_focused());
        state.palette.run_deferred(&mut state.board);
        assert!(state.board.is_canvas_focused());
    }

    #[test]
    fn test_toggle_refused_while_menu_open() {
        let mut state = test_state(registry());
        state.board.toggle_menu(MenuKind::Main);
        update(&mut state, &Action::TogglePalette);
        assert!(!state.palette.is_open());
        assert!(state.board.is_canvas_focused());
    }

    #[test]
    fn test_scroll_and_backdrop() {
        let mut state = test_state(registry());
        update(&mut state, &Action::OpenPalette);
        update(&mut state, &Action::PaletteScroll(true));
        assert_eq!(state.palette.session().selected_index, 1);
        update(&mut state, &Action::PaletteScroll(true));
        assert_eq!(state.palette.session().selected_index, 0);

        update(&mut state, &Action::PaletteBackdropClick);
        assert!(!state.palette.is_open());
    }

    #[test]
    fn test_unrelated_actions_fall_through() {
        let mut state = test_state(registry());
        assert!(matches!(
            update(&mut state, &Action::ZoomIn),
            UpdateResult::NotHandled
        ));
    }
}
