//! Terminal glyphs for action icons.

pub const LOGO: &str = "✎";
pub const SEP_RIGHT: &str = "\u{e0b0}";
pub const FALLBACK: &str = "·";
pub const CLEAR: &str = "×";
pub const SEARCH: &str = "⌕";

/// Maps an action icon name to a single-cell glyph.
pub fn icon(name: &str) -> &'static str {
    match name {
        "undo" => "↶",
        "redo" => "↷",
        "select-all" => "▣",
        "select-none" => "□",
        "delete" | "trash" => "✗",
        "duplicate" => "⧉",
        "rectangle" => "▭",
        "ellipse" => "◯",
        "note" => "✎",
        "grid" => "#",
        "zoom-in" => "+",
        "zoom-out" => "-",
        "zoom-reset" => "○",
        "edit" => "✐",
        "menu" => "≡",
        "export" => "⇪",
        "lock" => "⊘",
        _ => FALLBACK,
    }
}
