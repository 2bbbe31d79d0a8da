use super::editor::{EditorHost, EditorState};
use serde::Serialize;
use std::collections::BTreeSet;

const HISTORY_LIMIT: usize = 100;
pub const MIN_ZOOM: u16 = 25;
pub const MAX_ZOOM: u16 = 400;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ShapeId(pub u32);

impl std::fmt::Display for ShapeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "shape:{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Ellipse,
    Note,
}

impl ShapeKind {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Ellipse => "Ellipse",
            ShapeKind::Note => "Note",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shape {
    pub id: ShapeId,
    pub kind: ShapeKind,
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKind {
    Main,
}

#[derive(Debug, Clone, PartialEq, Default)]
struct Snapshot {
    shapes: Vec<Shape>,
    selection: BTreeSet<ShapeId>,
}

/// The whiteboard document plus the editor-level flags the rest of the
/// application observes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Board {
    shapes: Vec<Shape>,
    selection: BTreeSet<ShapeId>,
    next_id: u32,
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,

    pub show_grid: bool,
    zoom: u16,
    readonly: bool,
    editing: Option<ShapeId>,
    open_menu: Option<MenuKind>,
    crashing_error: Option<String>,
    canvas_focused: bool,
}

impl Board {
    #[must_use]
    pub fn new() -> Self {
        Self {
            zoom: 100,
            canvas_focused: true,
            ..Default::default()
        }
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn selection(&self) -> &BTreeSet<ShapeId> {
        &self.selection
    }

    pub fn is_selected(&self, id: ShapeId) -> bool {
        self.selection.contains(&id)
    }

    pub fn zoom(&self) -> u16 {
        self.zoom
    }

    pub fn is_canvas_focused(&self) -> bool {
        self.canvas_focused
    }

    /// Called by overlays that take input focus away from the canvas.
    pub fn blur(&mut self) {
        self.canvas_focused = false;
    }

    pub fn open_menu(&self) -> Option<MenuKind> {
        self.open_menu
    }

    fn checkpoint(&mut self) {
        self.undo_stack.push(Snapshot {
            shapes: self.shapes.clone(),
            selection: self.selection.clone(),
        });
        if self.undo_stack.len() > HISTORY_LIMIT {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
    }

    pub fn add_shape(&mut self, kind: ShapeKind) -> Option<ShapeId> {
        if self.readonly {
            return None;
        }
        self.checkpoint();
        self.next_id += 1;
        let id = ShapeId(self.next_id);
        // Cascade new shapes so they do not stack exactly on top of each other
        let offset = (self.shapes.len() as i32 % 8) * 3;
        let (width, height) = match kind {
            ShapeKind::Rectangle => (16, 5),
            ShapeKind::Ellipse => (14, 5),
            ShapeKind::Note => (20, 4),
        };
        self.shapes.push(Shape {
            id,
            kind,
            x: 2 + offset * 2,
            y: 1 + offset,
            width,
            height,
            text: kind.label().to_string(),
        });
        self.selection.clear();
        self.selection.insert(id);
        Some(id)
    }

    pub fn delete_selected(&mut self) -> usize {
        if self.readonly || self.selection.is_empty() {
            return 0;
        }
        self.checkpoint();
        let before = self.shapes.len();
        let selection = std::mem::take(&mut self.selection);
        self.shapes.retain(|s| !selection.contains(&s.id));
        before - self.shapes.len()
    }

    pub fn duplicate_selected(&mut self) -> usize {
        if self.readonly || self.selection.is_empty() {
            return 0;
        }
        self.checkpoint();
        let copies: Vec<Shape> = self
            .shapes
            .iter()
            .filter(|s| self.selection.contains(&s.id))
            .cloned()
            .collect();
        self.selection.clear();
        for mut shape in copies {
            self.next_id += 1;
            shape.id = ShapeId(self.next_id);
            shape.x += 2;
            shape.y += 1;
            self.selection.insert(shape.id);
            self.shapes.push(shape);
        }
        self.selection.len()
    }

    pub fn move_selected(&mut self, dx: i32, dy: i32) {
        if self.readonly || self.selection.is_empty() {
            return;
        }
        self.checkpoint();
        for shape in &mut self.shapes {
            if self.selection.contains(&shape.id) {
                shape.x = (shape.x + dx).max(0);
                shape.y = (shape.y + dy).max(0);
            }
        }
    }

    pub fn select_all(&mut self) {
        self.selection = self.shapes.iter().map(|s| s.id).collect();
    }

    pub fn select_none(&mut self) {
        self.selection.clear();
    }

    /// Moves a single selection to the next shape in z-order, wrapping.
    pub fn select_next(&mut self) {
        if self.shapes.is_empty() {
            return;
        }
        let next = match self.selection.iter().next_back() {
            Some(current) => self
                .shapes
                .iter()
                .position(|s| s.id == *current)
                .map_or(0, |i| (i + 1) % self.shapes.len()),
            None => 0,
        };
        self.selection.clear();
        self.selection.insert(self.shapes[next].id);
    }

    pub fn undo(&mut self) -> bool {
        if self.readonly {
            return false;
        }
        let Some(snapshot) = self.undo_stack.pop() else {
            return false;
        };
        self.redo_stack.push(Snapshot {
            shapes: std::mem::replace(&mut self.shapes, snapshot.shapes),
            selection: std::mem::replace(&mut self.selection, snapshot.selection),
        });
        true
    }

    pub fn redo(&mut self) -> bool {
        if self.readonly {
            return false;
        }
        let Some(snapshot) = self.redo_stack.pop() else {
            return false;
        };
        self.undo_stack.push(Snapshot {
            shapes: std::mem::replace(&mut self.shapes, snapshot.shapes),
            selection: std::mem::replace(&mut self.selection, snapshot.selection),
        });
        true
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom * 2).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom / 2).max(MIN_ZOOM);
    }

    pub fn reset_zoom(&mut self) {
        self.zoom = 100;
    }

    pub fn set_readonly(&mut self, readonly: bool) {
        self.readonly = readonly;
        if readonly {
            self.editing = None;
        }
    }

    /// Enters label editing for the single selected shape.
    pub fn begin_editing(&mut self) -> Option<ShapeId> {
        if self.readonly || self.selection.len() != 1 {
            return None;
        }
        self.editing = self.selection.iter().next().copied();
        self.editing
    }

    pub fn edit_text(&mut self, c: Option<char>) {
        let Some(id) = self.editing else { return };
        if let Some(shape) = self.shapes.iter_mut().find(|s| s.id == id) {
            match c {
                Some(c) => shape.text.push(c),
                None => {
                    shape.text.pop();
                }
            }
        }
    }

    pub fn end_editing(&mut self) {
        self.editing = None;
    }

    pub fn toggle_menu(&mut self, menu: MenuKind) {
        self.open_menu = if self.open_menu == Some(menu) {
            None
        } else {
            Some(menu)
        };
    }

    pub fn close_menus(&mut self) {
        self.open_menu = None;
    }

    pub fn set_crashing_error(&mut self, error: Option<String>) {
        self.crashing_error = error;
    }
}

impl EditorState for Board {
    fn is_readonly(&self) -> bool {
        self.readonly
    }

    fn editing_shape_id(&self) -> Option<ShapeId> {
        self.editing
    }

    fn has_any_open_menus(&self) -> bool {
        self.open_menu.is_some()
    }

    fn crashing_error(&self) -> Option<String> {
        self.crashing_error.clone()
    }

    fn can_undo(&self) -> bool {
        !self.readonly && !self.undo_stack.is_empty()
    }

    fn can_redo(&self) -> bool {
        !self.readonly && !self.redo_stack.is_empty()
    }

    fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    fn selected_count(&self) -> usize {
        self.selection.len()
    }
}

impl EditorHost for Board {
    fn focus(&mut self) {
        self.canvas_focused = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_undo_redo() {
        let mut board = Board::new();
        assert!(!board.can_undo());

        let id = board.add_shape(ShapeKind::Rectangle).unwrap();
        assert_eq!(board.shape_count(), 1);
        assert!(board.is_selected(id));
        assert!(board.can_undo());

        assert!(board.undo());
        assert_eq!(board.shape_count(), 0);
        assert!(board.can_redo());

        assert!(board.redo());
        assert_eq!(board.shape_count(), 1);
        assert!(!board.can_redo());
    }

    #[test]
    fn test_new_edit_clears_redo() {
        let mut board = Board::new();
        board.add_shape(ShapeKind::Note);
        board.undo();
        board.add_shape(ShapeKind::Ellipse);
        assert!(!board.can_redo());
    }

    #[test]
    fn test_readonly_blocks_mutation() {
        let mut board = Board::new();
        board.add_shape(ShapeKind::Rectangle);
        board.set_readonly(true);
        assert_eq!(board.add_shape(ShapeKind::Note), None);
        assert_eq!(board.delete_selected(), 0);
        assert!(!board.can_undo());
        assert!(!board.undo());
    }

    #[test]
    fn test_delete_and_duplicate_selection() {
        let mut board = Board::new();
        board.add_shape(ShapeKind::Rectangle);
        board.add_shape(ShapeKind::Ellipse);
        board.select_all();
        assert_eq!(board.duplicate_selected(), 2);
        assert_eq!(board.shape_count(), 4);
        assert_eq!(board.delete_selected(), 2);
        assert_eq!(board.shape_count(), 2);
        assert_eq!(board.selected_count(), 0);
    }

    #[test]
    fn test_select_next_wraps() {
        let mut board = Board::new();
        let a = board.add_shape(ShapeKind::Rectangle).unwrap();
        let b = board.add_shape(ShapeKind::Ellipse).unwrap();
        assert!(board.is_selected(b));
        board.select_next();
        assert!(board.is_selected(a));
        board.select_next();
        assert!(board.is_selected(b));
    }

    #[test]
    fn test_editing_requires_single_selection() {
        let mut board = Board::new();
        board.add_shape(ShapeKind::Note);
        board.add_shape(ShapeKind::Note);
        board.select_all();
        assert_eq!(board.begin_editing(), None);

        board.select_next();
        let id = board.begin_editing().unwrap();
        assert_eq!(board.editing_shape_id(), Some(id));
        board.edit_text(Some('!'));
        assert!(board.shapes().iter().any(|s| s.text == "Note!"));
        board.end_editing();
        assert_eq!(board.editing_shape_id(), None);
    }

    #[test]
    fn test_zoom_bounds() {
        let mut board = Board::new();
        for _ in 0..10 {
            board.zoom_in();
        }
        assert_eq!(board.zoom(), MAX_ZOOM);
        for _ in 0..10 {
            board.zoom_out();
        }
        assert_eq!(board.zoom(), MIN_ZOOM);
        board.reset_zoom();
        assert_eq!(board.zoom(), 100);
    }

    #[test]
    fn test_focus_and_menus() {
        let mut board = Board::new();
        board.blur();
        assert!(!board.is_canvas_focused());
        board.focus();
        assert!(board.is_canvas_focused());

        board.toggle_menu(MenuKind::Main);
        assert!(board.has_any_open_menus());
        board.toggle_menu(MenuKind::Main);
        assert!(!board.has_any_open_menus());
    }
}
