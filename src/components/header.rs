use crate::domain::board::Board;
use crate::domain::editor::EditorState;
use crate::theme::{glyphs, Theme};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

pub struct Header<'a> {
    pub board: &'a Board,
    pub theme: &'a Theme,
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let board = self.board;

        // Separator styles: fg = current segment bg, bg = next segment bg
        let logo_bg = self.theme.header_logo.bg.unwrap_or(Color::Reset);
        let item_bg = self.theme.header_item.bg.unwrap_or(Color::Reset);
        let base_bg = self.theme.header.bg.unwrap_or(Color::Reset);
        let sep_logo_item = Style::default().fg(logo_bg).bg(item_bg);
        let sep_item_base = Style::default().fg(item_bg).bg(base_bg);

        let stats = format!(
            " {} shapes  {} selected  {}% ",
            board.shape_count(),
            board.selected_count(),
            board.zoom()
        );

        let mut spans = vec![
            Span::styled(format!(" {} INKPAD ", glyphs::LOGO), self.theme.header_logo),
            Span::styled(glyphs::SEP_RIGHT, sep_logo_item),
            Span::styled(stats, self.theme.header_item),
            Span::styled(glyphs::SEP_RIGHT, sep_item_base),
            Span::raw(" "),
        ];

        if board.is_readonly() {
            spans.push(Span::styled(" READ-ONLY ", self.theme.header_warn));
            spans.push(Span::raw(" "));
        }
        if board.show_grid {
            spans.push(Span::styled(" GRID ", self.theme.header_active));
            spans.push(Span::raw(" "));
        }

        Paragraph::new(Line::from(spans))
            .style(self.theme.header)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::board::ShapeKind;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_header_shows_counts_and_badges() {
        let mut board = Board::new();
        board.add_shape(ShapeKind::Rectangle);
        board.set_readonly(true);
        let theme = Theme::default();

        let mut terminal = Terminal::new(TestBackend::new(80, 1)).unwrap();
        terminal
            .draw(|f| {
                Header {
                    board: &board,
                    theme: &theme,
                }
                .render(f.area(), f.buffer_mut());
            })
            .unwrap();

        let line: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(line.contains("INKPAD"));
        assert!(line.contains("1 shapes  1 selected  100%"));
        assert!(line.contains("READ-ONLY"));
        assert!(!line.contains("GRID"));
    }
}
