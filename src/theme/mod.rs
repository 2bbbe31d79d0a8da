use ratatui::style::{Modifier, Style};
use serde::{Deserialize, Serialize};

pub mod catppuccin;
pub mod glyphs;
pub mod nord;
pub mod palette;

pub use palette::{dim_color, Palette};

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub border: Style,
    pub border_focus: Style,

    pub canvas: Style,
    pub canvas_grid: Style,
    pub shape_rectangle: Style,
    pub shape_ellipse: Style,
    pub shape_note: Style,
    pub shape_selected: Style,
    pub shape_editing: Style,

    pub status_ready: Style,
    pub status_info: Style,
    pub status_warn: Style,
    pub status_error: Style,

    pub header_logo: Style,
    pub header_item: Style,
    pub header_active: Style,
    pub header_warn: Style,
    pub header: Style,

    pub footer_segment_key: Style,
    pub footer_segment_val: Style,
    pub footer: Style,

    pub highlight: Style,
    pub list_selected: Style,
    pub list_item: Style,
    pub list_disabled: Style,
    pub kbd: Style,
    pub hint: Style,
    pub dimmed: Style,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaletteType {
    #[default]
    CatppuccinMocha,
    Nord,
}

impl PaletteType {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            PaletteType::CatppuccinMocha => "Catppuccin (Mocha)",
            PaletteType::Nord => "Nord",
        }
    }
}

impl Theme {
    #[must_use]
    pub fn from_palette_type(t: PaletteType) -> Self {
        match t {
            PaletteType::CatppuccinMocha => Self::from_palette(&catppuccin::CATPPUCCIN_MOCHA),
            PaletteType::Nord => Self::from_palette(&nord::NORD),
        }
    }

    #[must_use]
    pub fn from_palette(p: &Palette) -> Self {
        Self {
            border: Style::default().fg(p.surface2),
            border_focus: Style::default().fg(p.blue),

            canvas: Style::default().bg(p.base).fg(p.text),
            canvas_grid: Style::default().fg(dim_color(p.overlay0, 0.5)),
            shape_rectangle: Style::default().fg(p.blue),
            shape_ellipse: Style::default().fg(p.green),
            shape_note: Style::default().fg(p.crust).bg(p.yellow),
            shape_selected: Style::default().fg(p.peach).add_modifier(Modifier::BOLD),
            shape_editing: Style::default()
                .fg(p.mauve)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),

            status_ready: Style::default()
                .bg(p.green)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),
            status_info: Style::default()
                .bg(p.blue)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),
            status_warn: Style::default()
                .bg(p.yellow)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),
            status_error: Style::default()
                .bg(p.red)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),

            header_logo: Style::default()
                .bg(p.blue)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),
            header_item: Style::default().bg(p.surface0).fg(p.text),
            header_active: Style::default()
                .bg(p.green)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),
            header_warn: Style::default()
                .bg(p.yellow)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),
            header: Style::default().bg(p.mantle).fg(p.text),

            footer_segment_key: Style::default()
                .bg(p.surface0)
                .fg(p.blue)
                .add_modifier(Modifier::BOLD),
            footer_segment_val: Style::default().bg(p.base).fg(p.text),
            footer: Style::default().bg(p.crust).fg(p.subtext0),

            highlight: Style::default().bg(p.surface0).add_modifier(Modifier::BOLD),
            list_selected: Style::default()
                .bg(p.blue)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),
            list_item: Style::default().fg(p.text),
            list_disabled: Style::default().fg(p.overlay0).add_modifier(Modifier::DIM),
            kbd: Style::default().fg(p.subtext1).bg(p.surface1),
            hint: Style::default().fg(p.overlay1),
            dimmed: Style::default().fg(p.overlay0).add_modifier(Modifier::DIM),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_palette_type(PaletteType::CatppuccinMocha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_type_from_config_name() {
        #[derive(Deserialize)]
        struct Wrapper {
            theme: PaletteType,
        }
        let parsed: Wrapper = toml::from_str("theme = \"nord\"").unwrap();
        assert_eq!(parsed.theme, PaletteType::Nord);
        assert_ne!(
            Theme::from_palette_type(PaletteType::Nord),
            Theme::default()
        );
    }
}
