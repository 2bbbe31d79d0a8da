use crate::app::action::Action;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Widget},
};

use super::helpers::draw_drop_shadow;

/// (key, label, action) for each main menu entry.
pub fn entries() -> [(char, &'static str, Action); 5] {
    [
        ('g', "Toggle grid", Action::ToggleGrid),
        ('R', "Toggle read-only", Action::ToggleReadonly),
        ('0', "Reset zoom", Action::ResetZoom),
        ('a', "Select all", Action::SelectAll),
        ('q', "Quit", Action::Quit),
    ]
}

/// Anchored under the header, like a drop-down.
pub fn menu_rect(area: Rect) -> Rect {
    let height = entries().len() as u16 + 2;
    Rect {
        x: area.x + 1,
        y: area.y,
        width: 28,
        height,
    }
    .intersection(area)
}

pub struct MainMenuModal<'a> {
    pub theme: &'a Theme,
}

impl Widget for MainMenuModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let menu_area = menu_rect(area);
        if menu_area.width == 0 || menu_area.height == 0 {
            return;
        }

        draw_drop_shadow(buf, menu_area, area);
        Clear.render(menu_area, buf);

        let items: Vec<ListItem> = entries()
            .iter()
            .map(|(key, label, _)| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!(" {key} "), self.theme.footer_segment_key),
                    Span::styled(format!(" {label}"), self.theme.list_item),
                ]))
            })
            .collect();

        List::new(items)
            .block(
                Block::default()
                    .title(" MENU ")
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(self.theme.border_focus),
            )
            .render(menu_area, buf);
    }
}
