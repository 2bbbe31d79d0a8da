use super::{
    action::{Action, UpdateResult},
    command::Command,
    features,
    state::AppState,
};
use std::time::Instant;

pub fn update(state: &mut AppState, action: Action) -> Option<Command> {
    let mut command = match features::palette::update(state, &action) {
        UpdateResult::NotHandled => match features::board::update(state, &action) {
            UpdateResult::Handled(cmd) => cmd,
            UpdateResult::NotHandled => update_system(state, action),
        },
        UpdateResult::Handled(cmd) => cmd,
    };

    // Enablement depends on board state, so candidates are rebuilt after
    // every step.
    state.palette.refresh(&state.registry, &state.board);
    state.publish_board();

    let spawned = state.palette.take_spawned();
    if !spawned.is_empty() {
        command = Some(Command::RunActions(spawned));
    }
    command
}

fn update_system(state: &mut AppState, action: Action) -> Option<Command> {
    match action {
        Action::Tick => {
            state.frame_count = state.frame_count.wrapping_add(1);
            let now = Instant::now();
            state.palette.tick(now);
            if state.status_clear_time.is_some_and(|t| now >= t) {
                state.status_message = None;
                state.status_clear_time = None;
            }
        }
        Action::Quit => {
            state.should_quit = true;
        }
        Action::StatusMessage(message) => state.set_status(message),
        Action::ActionFailed(id, error) => {
            state.set_status(format!("{id} failed: {error}"));
        }
        Action::Render | Action::Resize(_, _) => {}
        other => {
            tracing::trace!(action = ?other, "unhandled action");
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::tests::test_state;
    use crate::domain::action::{ActionItem, ActionOutcome, ActionRegistry};
    use crate::domain::board::ShapeKind;
    use crate::domain::editor::EditorState;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::time::Duration;
    use tokio::sync::watch;

    fn key(code: KeyCode) -> Action {
        Action::PaletteKey(KeyEvent::new(code, KeyModifiers::empty()))
    }

    #[test]
    fn test_candidates_follow_board_state() {
        let mut registry = ActionRegistry::new();
        registry
            .register(
                ActionItem::new("delete", "Delete", |_| Ok(ActionOutcome::Completed))
                    .gated(|e| Ok(e.selected_count() > 0)),
            )
            .unwrap();
        let mut state = test_state(registry);

        update(&mut state, Action::OpenPalette);
        assert_eq!(state.palette.session().result_count(), 0);
        update(&mut state, Action::ClosePalette);

        update(&mut state, Action::AddShape(ShapeKind::Ellipse));
        update(&mut state, Action::OpenPalette);
        assert_eq!(state.palette.session().result_count(), 1);
    }

    #[test]
    fn test_pending_outcome_becomes_command() {
        let mut registry = ActionRegistry::new();
        registry
            .register(ActionItem::new("export", "Export", |_| {
                Ok(ActionOutcome::Pending(Box::pin(async { Ok(()) })))
            }))
            .unwrap();
        let mut state = test_state(registry);

        update(&mut state, Action::OpenPalette);
        match update(&mut state, key(KeyCode::Enter)) {
            Some(Command::RunActions(actions)) => {
                assert_eq!(actions.len(), 1);
                assert_eq!(actions[0].id, "export");
            }
            other => panic!("expected RunActions, got {other:?}"),
        }
        assert!(!state.palette.is_open());
    }

    #[test]
    fn test_status_expires_on_tick() {
        let mut state = test_state(ActionRegistry::new());
        update(&mut state, Action::StatusMessage("saved".into()));
        assert_eq!(state.status_message.as_deref(), Some("saved"));

        state.status_clear_time = Some(Instant::now() - Duration::from_millis(1));
        update(&mut state, Action::Tick);
        assert!(state.status_message.is_none());
        assert_eq!(state.frame_count, 1);
    }

    #[test]
    fn test_board_snapshot_published() {
        let mut state = test_state(ActionRegistry::new());
        let (tx, rx) = watch::channel(Vec::new());
        state.publish_board_to(tx);

        update(&mut state, Action::AddShape(ShapeKind::Note));
        assert_eq!(rx.borrow().len(), 1);
        assert_eq!(rx.borrow()[0].kind, ShapeKind::Note);
    }

    #[test]
    fn test_quit() {
        let mut state = test_state(ActionRegistry::new());
        update(&mut state, Action::Quit);
        assert!(state.should_quit);
    }
}
