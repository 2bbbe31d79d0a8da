use super::board::ShapeId;
use anyhow::Result;

/// Read-only view of the editor that the palette guards and the action
/// enablement predicates observe.
#[cfg_attr(test, mockall::automock)]
pub trait EditorState {
    fn is_readonly(&self) -> bool;
    fn editing_shape_id(&self) -> Option<ShapeId>;
    fn has_any_open_menus(&self) -> bool;
    fn crashing_error(&self) -> Option<String>;

    fn can_undo(&self) -> bool;
    fn can_redo(&self) -> bool;
    fn shape_count(&self) -> usize;
    fn selected_count(&self) -> usize;
}

pub trait EditorHost: EditorState {
    /// Return input focus to the canvas.
    fn focus(&mut self);
}

#[cfg_attr(test, mockall::automock)]
pub trait ClipboardSink {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// Why an open request was refused. Refusals are silent to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenBlocker {
    Readonly,
    EditingShape(ShapeId),
    MenuOpen,
    Crashed(String),
}

/// Returns the first guard that forbids opening an overlay on top of the
/// editor, if any.
pub fn open_blocker(editor: &dyn EditorState) -> Option<OpenBlocker> {
    if editor.is_readonly() {
        return Some(OpenBlocker::Readonly);
    }
    if let Some(id) = editor.editing_shape_id() {
        return Some(OpenBlocker::EditingShape(id));
    }
    if editor.has_any_open_menus() {
        return Some(OpenBlocker::MenuOpen);
    }
    editor.crashing_error().map(OpenBlocker::Crashed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idle_editor() -> MockEditorState {
        let mut editor = MockEditorState::new();
        editor.expect_is_readonly().return_const(false);
        editor.expect_editing_shape_id().return_const(None::<ShapeId>);
        editor.expect_has_any_open_menus().return_const(false);
        editor.expect_crashing_error().return_const(None::<String>);
        editor
    }

    #[test]
    fn test_idle_editor_allows_open() {
        assert_eq!(open_blocker(&idle_editor()), None);
    }

    #[test]
    fn test_readonly_blocks_before_other_guards() {
        let mut editor = MockEditorState::new();
        editor.expect_is_readonly().return_const(true);
        editor.expect_editing_shape_id().never();
        assert_eq!(open_blocker(&editor), Some(OpenBlocker::Readonly));
    }

    #[test]
    fn test_editing_and_menu_and_crash_block() {
        let mut editor = MockEditorState::new();
        editor.expect_is_readonly().return_const(false);
        editor.expect_editing_shape_id().return_const(Some(ShapeId(3)));
        assert_eq!(open_blocker(&editor), Some(OpenBlocker::EditingShape(ShapeId(3))));

        let mut editor = MockEditorState::new();
        editor.expect_is_readonly().return_const(false);
        editor.expect_editing_shape_id().return_const(None::<ShapeId>);
        editor.expect_has_any_open_menus().return_const(true);
        assert_eq!(open_blocker(&editor), Some(OpenBlocker::MenuOpen));

        let mut editor = MockEditorState::new();
        editor.expect_is_readonly().return_const(false);
        editor.expect_editing_shape_id().return_const(None::<ShapeId>);
        editor.expect_has_any_open_menus().return_const(false);
        editor
            .expect_crashing_error()
            .return_const(Some("render failed".to_string()));
        assert_eq!(
            open_blocker(&editor),
            Some(OpenBlocker::Crashed("render failed".to_string()))
        );
    }
}
