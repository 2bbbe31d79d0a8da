use crate::app::{
    action::{Action, UpdateResult},
    state::AppState,
};
use crate::domain::board::MenuKind;
use crate::domain::editor::EditorState;

pub fn update(state: &mut AppState, action: &Action) -> UpdateResult {
    let board = &mut state.board;
    match action {
        Action::AddShape(kind) => {
            if board.add_shape(*kind).is_none() {
                state.set_status("Board is read-only");
            }
        }
        Action::DeleteSelected => {
            let removed = board.delete_selected();
            if removed > 0 {
                state.set_status(format!("Deleted {removed} shape(s)"));
            }
        }
        Action::DuplicateSelected => {
            board.duplicate_selected();
        }
        Action::SelectAll => board.select_all(),
        Action::SelectNone => board.select_none(),
        Action::SelectNext => board.select_next(),
        Action::MoveSelected(dx, dy) => board.move_selected(*dx, *dy),
        Action::Undo => {
            if !board.undo() {
                state.set_status("Nothing to undo");
            }
        }
        Action::Redo => {
            if !board.redo() {
                state.set_status("Nothing to redo");
            }
        }
        Action::BeginEditing => {
            board.begin_editing();
        }
        Action::EditText(c) => board.edit_text(*c),
        Action::EndEditing => board.end_editing(),
        Action::ToggleGrid => board.show_grid = !board.show_grid,
        Action::ZoomIn => board.zoom_in(),
        Action::ZoomOut => board.zoom_out(),
        Action::ResetZoom => board.reset_zoom(),
        Action::ToggleReadonly => {
            let readonly = !board.is_readonly();
            board.set_readonly(readonly);
            state.set_status(if readonly { "Read-only" } else { "Editing enabled" });
        }
        Action::ToggleMainMenu => board.toggle_menu(MenuKind::Main),
        Action::CloseMenus => board.close_menus(),
        _ => return UpdateResult::NotHandled,
    }
    if !matches!(action, Action::ToggleMainMenu) {
        state.board.close_menus();
    }
    UpdateResult::Handled(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::tests::test_state;
    use crate::domain::action::ActionRegistry;
    use crate::domain::board::ShapeKind;

    #[test]
    fn test_edit_cycle() {
        let mut state = test_state(ActionRegistry::new());
        update(&mut state, &Action::AddShape(ShapeKind::Rectangle));
        update(&mut state, &Action::DuplicateSelected);
        assert_eq!(state.board.shape_count(), 2);

        update(&mut state, &Action::SelectAll);
        update(&mut state, &Action::DeleteSelected);
        assert_eq!(state.board.shape_count(), 0);
        assert_eq!(state.status_message.as_deref(), Some("Deleted 2 shape(s)"));

        update(&mut state, &Action::Undo);
        assert_eq!(state.board.shape_count(), 2);
    }

    #[test]
    fn test_readonly_reports_status() {
        let mut state = test_state(ActionRegistry::new());
        update(&mut state, &Action::ToggleReadonly);
        update(&mut state, &Action::AddShape(ShapeKind::Note));
        assert_eq!(state.board.shape_count(), 0);
        assert_eq!(state.status_message.as_deref(), Some("Board is read-only"));
    }

    #[test]
    fn test_view_toggles() {
        let mut state = test_state(ActionRegistry::new());
        update(&mut state, &Action::ToggleGrid);
        assert!(state.board.show_grid);
        update(&mut state, &Action::ZoomIn);
        assert_eq!(state.board.zoom(), 200);
        update(&mut state, &Action::ResetZoom);
        assert_eq!(state.board.zoom(), 100);
        update(&mut state, &Action::ToggleMainMenu);
        assert!(state.board.has_any_open_menus());
        update(&mut state, &Action::CloseMenus);
        assert!(!state.board.has_any_open_menus());
    }

    #[test]
    fn test_menu_entry_closes_menu() {
        let mut state = test_state(ActionRegistry::new());
        update(&mut state, &Action::ToggleMainMenu);
        update(&mut state, &Action::ToggleGrid);
        assert!(state.board.show_grid);
        assert!(!state.board.has_any_open_menus());
    }
}
