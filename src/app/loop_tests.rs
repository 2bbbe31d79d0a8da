use super::*;
use crate::app::command_palette::PendingAction;
use crate::app::registry::default_registry;
use crate::app::state::tests::test_state;
use crate::domain::editor::EditorState;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::{Rng, SeedableRng};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use tokio::sync::watch;

fn key(code: KeyCode, modifiers: KeyModifiers) -> std::io::Result<Event> {
    Ok(Event::Key(KeyEvent::new(code, modifiers)))
}

fn chars(text: &str) -> Vec<std::io::Result<Event>> {
    text.chars()
        .map(|c| key(KeyCode::Char(c), KeyModifiers::empty()))
        .collect()
}

#[tokio::test]
async fn test_failed_action_is_reported() {
    let (tx, mut rx) = mpsc::channel(1);
    let pending = PendingAction {
        id: "export-board".to_string(),
        future: Box::pin(async { Err::<(), _>(anyhow::anyhow!("disk full")) }),
    };

    handle_command(Command::RunActions(vec![pending]), tx);

    let action = rx.recv().await.unwrap();
    assert_eq!(
        action,
        Action::ActionFailed("export-board".to_string(), "disk full".to_string())
    );
}

#[tokio::test]
async fn test_successful_action_is_silent() {
    let (tx, mut rx) = mpsc::channel(1);
    let pending = PendingAction {
        id: "export-board".to_string(),
        future: Box::pin(async { Ok::<(), anyhow::Error>(()) }),
    };

    handle_command(Command::RunActions(vec![pending]), tx);

    // Sender dropped by the finished task, nothing queued.
    assert!(rx.recv().await.is_none());
}

#[tokio::test]
async fn test_palette_undo_through_runtime() {
    let (action_tx, action_rx) = mpsc::channel(16);
    let (shapes_tx, shapes_rx) = watch::channel(Vec::new());
    let dir = tempfile::tempdir().unwrap();
    let registry = default_registry(action_tx.clone(), shapes_rx, dir.path().to_path_buf());
    let mut state = test_state(registry);
    state.publish_board_to(shapes_tx);

    let mut events = vec![
        key(KeyCode::Char('r'), KeyModifiers::empty()),
        key(KeyCode::Char('k'), KeyModifiers::CONTROL),
    ];
    events.extend(chars("undo"));
    events.push(key(KeyCode::Enter, KeyModifiers::empty()));
    events.push(key(KeyCode::Char('q'), KeyModifiers::empty()));

    let (event_tx, event_rx) = mpsc::channel(events.len());
    for event in events {
        event_tx.send(event).await.unwrap();
    }

    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    let state = run_loop_with_events(&mut terminal, state, action_tx, action_rx, event_rx)
        .await
        .unwrap();

    assert_eq!(state.board.shape_count(), 0);
    assert!(state.board.can_redo());
    assert!(!state.palette.is_open());
}

#[tokio::test]
async fn test_random_input_never_panics() {
    let (action_tx, action_rx) = mpsc::channel(64);
    let (_shapes_tx, shapes_rx) = watch::channel(Vec::new());
    let dir = tempfile::tempdir().unwrap();
    let registry = default_registry(action_tx.clone(), shapes_rx, dir.path().to_path_buf());
    let state = test_state(registry);

    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    let pool = [
        KeyCode::Char('r'),
        KeyCode::Char('o'),
        KeyCode::Char('n'),
        KeyCode::Char('x'),
        KeyCode::Char('u'),
        KeyCode::Char('1'),
        KeyCode::Tab,
        KeyCode::Down,
        KeyCode::Up,
        KeyCode::Enter,
        KeyCode::Esc,
        KeyCode::Backspace,
    ];
    let mut events = Vec::new();
    for _ in 0..200 {
        if rng.gen_bool(0.1) {
            events.push(key(KeyCode::Char('k'), KeyModifiers::CONTROL));
        } else {
            events.push(key(pool[rng.gen_range(0..pool.len())], KeyModifiers::empty()));
        }
    }
    // Leave any overlay or edit, then quit from the canvas.
    events.push(key(KeyCode::Esc, KeyModifiers::empty()));
    events.push(key(KeyCode::Esc, KeyModifiers::empty()));
    events.push(key(KeyCode::Esc, KeyModifiers::empty()));
    events.push(key(KeyCode::Char('q'), KeyModifiers::empty()));

    let (event_tx, event_rx) = mpsc::channel(events.len());
    for event in events {
        event_tx.send(event).await.unwrap();
    }

    let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
    let state = run_loop_with_events(&mut terminal, state, action_tx, action_rx, event_rx)
        .await
        .unwrap();
    assert!(state.should_quit);
}
