use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use tokio::sync::{mpsc, watch};

use inkpad::app::{r#loop::run_loop, registry::default_registry, state::AppState};
use inkpad::infrastructure::{
    clipboard::TerminalClipboard,
    config::{config_dir, AppConfig},
    logging::init_logging,
    translations::Translations,
};

fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_panic_hook();

    // Everything that can fail on bad user files runs before the terminal
    // enters raw mode.
    let config = AppConfig::load().unwrap_or_else(|err| {
        eprintln!("inkpad: {err}; using defaults");
        AppConfig::default()
    });
    let _log_guard = init_logging(&config)?;
    tracing::info!(locale = %config.locale, theme = ?config.theme, "starting");

    let translations = Translations::load(&config.locale).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "locale file ignored");
        Translations::builtin(&config.locale)
    });

    let (action_tx, action_rx) = mpsc::channel(100);
    let (shapes_tx, shapes_rx) = watch::channel(Vec::new());
    let export_dir = config_dir()
        .map(|dir| dir.join("exports"))
        .unwrap_or_else(|| PathBuf::from("."));
    let registry = default_registry(action_tx.clone(), shapes_rx, export_dir);

    let mut app_state = AppState::new(
        &config,
        registry,
        Box::new(translations),
        Box::new(TerminalClipboard::stdout()),
    )?;
    app_state.publish_board_to(shapes_tx);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_loop(&mut terminal, app_state, action_tx, action_rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    match res {
        Ok(mut state) => {
            state.shutdown();
            tracing::info!("exited cleanly");
        }
        Err(err) => {
            tracing::error!(error = %err, "event loop failed");
            println!("{err:?}");
        }
    }

    Ok(())
}
