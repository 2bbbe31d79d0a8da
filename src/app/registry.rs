//! Whiteboard actions offered through the command palette.

use super::action::Action;
use crate::domain::action::{ActionItem, ActionLabel, ActionOutcome, ActionRegistry, ActionSource};
use crate::domain::board::{Shape, ShapeKind};
use serde::Serialize;
use std::path::PathBuf;
use tokio::sync::{mpsc, watch};

pub const EXPORT_FILE: &str = "board.toml";

#[derive(Serialize)]
struct BoardExport<'a> {
    shapes: &'a [Shape],
}

/// Callback that forwards `action` to the runtime's queue.
fn dispatch(
    tx: &mpsc::Sender<Action>,
    action: Action,
) -> impl Fn(ActionSource) -> anyhow::Result<ActionOutcome> + Send + Sync + 'static {
    let tx = tx.clone();
    move |source| {
        tracing::debug!(source = source.as_str(), action = ?action, "dispatching");
        tx.try_send(action.clone())
            .map_err(|e| anyhow::anyhow!("action queue unavailable: {e}"))?;
        Ok(ActionOutcome::Completed)
    }
}

fn item(
    tx: &mpsc::Sender<Action>,
    id: &str,
    label: impl Into<ActionLabel>,
    icon: &str,
    action: Action,
) -> ActionItem {
    ActionItem::new(id, label, dispatch(tx, action)).with_icon(icon)
}

pub fn default_registry(
    tx: mpsc::Sender<Action>,
    shapes: watch::Receiver<Vec<Shape>>,
    export_dir: PathBuf,
) -> ActionRegistry {
    let mut items = vec![
        item(&tx, "undo", "Undo", "undo", Action::Undo)
            .with_kbd("u")
            .gated(|e| Ok(!e.is_readonly() && e.can_undo()))
            .with_disabled_description("action.undo.disabled"),
        item(&tx, "redo", "Redo", "redo", Action::Redo)
            .with_kbd("U")
            .gated(|e| Ok(!e.is_readonly() && e.can_redo()))
            .with_disabled_description("action.redo.disabled"),
        item(&tx, "select-all", "Select all", "select-all", Action::SelectAll).with_kbd("a"),
        item(&tx, "select-none", "Select none", "select-none", Action::SelectNone)
            .with_kbd("Esc")
            .gated(|e| Ok(e.selected_count() > 0)),
        item(&tx, "delete", "Delete selection", "delete", Action::DeleteSelected)
            .with_kbd("x")
            .gated(|e| Ok(!e.is_readonly() && e.selected_count() > 0))
            .with_disabled_description("action.selection.disabled"),
        item(&tx, "duplicate", "Duplicate selection", "duplicate", Action::DuplicateSelected)
            .with_kbd("d")
            .gated(|e| Ok(!e.is_readonly() && e.selected_count() > 0))
            .with_disabled_description("action.selection.disabled"),
    ];

    for (id, kind, kbd) in [
        ("insert-rectangle", ShapeKind::Rectangle, "r"),
        ("insert-ellipse", ShapeKind::Ellipse, "o"),
        ("insert-note", ShapeKind::Note, "n"),
    ] {
        let label = format!("Insert {}", kind.label().to_lowercase());
        let icon = kind.label().to_lowercase();
        items.push(
            item(&tx, id, label, &icon, Action::AddShape(kind))
                .with_kbd(kbd)
                .gated(|e| Ok(!e.is_readonly())),
        );
    }

    items.extend([
        item(&tx, "toggle-grid", "Toggle grid", "grid", Action::ToggleGrid).with_kbd("g"),
        item(
            &tx,
            "zoom-in",
            ActionLabel::localized([("en", "Zoom in"), ("fr", "Zoom avant")]),
            "zoom-in",
            Action::ZoomIn,
        )
        .with_kbd("+"),
        item(
            &tx,
            "zoom-out",
            ActionLabel::localized([("en", "Zoom out"), ("fr", "Zoom arrière")]),
            "zoom-out",
            Action::ZoomOut,
        )
        .with_kbd("-"),
        item(&tx, "reset-zoom", "Reset zoom", "zoom-reset", Action::ResetZoom).with_kbd("0"),
        item(&tx, "rename-shape", "Rename shape", "edit", Action::BeginEditing)
            .with_kbd("Enter")
            .gated(|e| Ok(!e.is_readonly() && e.selected_count() == 1))
            .with_disabled_description("action.rename.disabled"),
        item(&tx, "open-main-menu", "Open main menu", "menu", Action::ToggleMainMenu)
            .with_kbd("m"),
        item(&tx, "toggle-readonly", "Toggle read-only", "lock", Action::ToggleReadonly)
            .with_kbd("R"),
        export_item(&tx, shapes, export_dir),
        // Registered for other surfaces; never listed in the palette.
        item(&tx, "select-tool", "Selection tool", "select-all", Action::SelectNone),
        item(
            &tx,
            "debug-panel",
            "Debug panel",
            "menu",
            Action::StatusMessage("Debug panel is not available".to_string()),
        ),
    ]);

    let mut registry = ActionRegistry::new();
    for action in items {
        if let Err(err) = registry.register(action) {
            tracing::warn!(error = %err, "skipping action");
        }
    }
    tracing::info!(count = registry.len(), "action registry built");
    registry
}

/// Writes the latest board snapshot to `<export_dir>/board.toml` off the UI
/// task and reports back through the action queue.
fn export_item(
    tx: &mpsc::Sender<Action>,
    shapes: watch::Receiver<Vec<Shape>>,
    export_dir: PathBuf,
) -> ActionItem {
    let tx = tx.clone();
    ActionItem::new("export-board", "Export board", move |_| {
        let shapes = shapes.borrow().clone();
        let path = export_dir.join(EXPORT_FILE);
        let dir = export_dir.clone();
        let tx = tx.clone();
        Ok(ActionOutcome::Pending(Box::pin(async move {
            let body = toml::to_string(&BoardExport { shapes: &shapes })?;
            tokio::fs::create_dir_all(&dir).await?;
            tokio::fs::write(&path, body).await?;
            tracing::info!(path = %path.display(), shapes = shapes.len(), "board exported");
            let _ = tx
                .send(Action::StatusMessage(format!(
                    "Exported {} shape(s) to {}",
                    shapes.len(),
                    path.display()
                )))
                .await;
            Ok::<(), anyhow::Error>(())
        })))
    })
    .with_icon("export")
}
