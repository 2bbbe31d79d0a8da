use crate::app::command::Command;
use crate::domain::board::ShapeKind;
use crossterm::event::KeyEvent;

#[derive(Debug)]
pub enum UpdateResult {
    Handled(Option<Command>),
    NotHandled,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // --- System / Terminal ---
    Tick,
    Render,
    Resize(u16, u16),
    Quit,

    // --- Command Palette ---
    OpenPalette,
    ClosePalette,
    TogglePalette,           // Global shortcut (mod+k by default)
    PaletteKey(KeyEvent),    // Key press while the palette is open
    PaletteHover(usize),     // Pointer moved over a result row
    PaletteClick(usize),     // Result row clicked
    PaletteScroll(bool),     // Wheel over the list (true = down)
    PaletteFocusQuery,       // Query field clicked
    PaletteFocusList,        // List area clicked
    PaletteClearQuery,       // Clear button
    PaletteBackdropClick,    // Click outside the dialog

    // --- Board Editing ---
    AddShape(ShapeKind),
    DeleteSelected,
    DuplicateSelected,
    SelectAll,
    SelectNone,
    SelectNext,
    MoveSelected(i32, i32),
    Undo,
    Redo,
    BeginEditing,
    EditText(Option<char>), // None = backspace
    EndEditing,

    // --- View ---
    ToggleGrid,
    ZoomIn,
    ZoomOut,
    ResetZoom,
    ToggleReadonly,
    ToggleMainMenu,
    CloseMenus,

    // --- Feedback ---
    StatusMessage(String),
    ActionFailed(String, String), // (action id, error)
}
