use crate::app::{
    action::Action, command::Command, input::map_event_to_action, reducer, state::AppState, ui,
};

use anyhow::Result;
use crossterm::event::{self, Event};
use ratatui::{backend::Backend, Terminal};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{interval, MissedTickBehavior};

/// Drives palette debounce and status expiry.
const TICK_RATE: Duration = Duration::from_millis(50);

pub async fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: AppState,
    action_tx: mpsc::Sender<Action>,
    action_rx: mpsc::Receiver<Action>,
) -> Result<AppState> {
    // User input channel
    let (event_tx, event_rx) = mpsc::channel(100);
    tokio::task::spawn_blocking(move || loop {
        match event::read() {
            Ok(evt) => {
                if event_tx.blocking_send(Ok(evt)).is_err() {
                    break;
                }
            }
            Err(e) => {
                let _ = event_tx.blocking_send(Err(e));
                break;
            }
        }
    });

    run_loop_with_events(terminal, app_state, action_tx, action_rx, event_rx).await
}

/// Runs until quit and hands the state back so the caller can shut it down.
pub async fn run_loop_with_events<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app_state: AppState,
    action_tx: mpsc::Sender<Action>,
    mut action_rx: mpsc::Receiver<Action>,
    mut event_rx: mpsc::Receiver<std::io::Result<Event>>,
) -> Result<AppState> {
    let mut interval = interval(TICK_RATE);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        // --- 1. Render ---
        terminal.draw(|f| ui::draw(f, &app_state))?;

        // Focus hand-offs wait until the frame they were queued for is on screen.
        if app_state.palette.has_deferred() {
            app_state.palette.run_deferred(&mut app_state.board);
        }

        // --- 2. Event Handling (TEA Runtime) ---
        let action = tokio::select! {
            biased;

            // Async results and palette callbacks
            Some(a) = action_rx.recv() => Some(a),

            // User input
            Some(res) = event_rx.recv() => {
                let event = res?;
                map_event_to_action(event, &app_state, terminal.size()?)
            },

            _ = interval.tick() => Some(Action::Tick),
        };

        // --- 3. Update (Reducer) ---
        if let Some(action) = action {
            let command = reducer::update(&mut app_state, action);
            if app_state.should_quit {
                break;
            }
            if let Some(cmd) = command {
                handle_command(cmd, action_tx.clone());
            }
        }
    }

    Ok(app_state)
}

pub(crate) fn handle_command(command: Command, tx: mpsc::Sender<Action>) {
    match command {
        Command::RunActions(pending) => {
            for action in pending {
                let tx = tx.clone();
                tokio::spawn(async move {
                    if let Err(err) = action.future.await {
                        tracing::error!(action = %action.id, error = %err, "action failed");
                        let _ = tx
                            .send(Action::ActionFailed(action.id, err.to_string()))
                            .await;
                    }
                });
            }
        }
    }
}

#[cfg(test)]
#[path = "loop_tests.rs"]
mod tests;
