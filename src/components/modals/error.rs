use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

use super::helpers::{centered_rect, draw_drop_shadow};

/// Shown while the editor is in its crashed state.
pub struct CrashModal<'a> {
    pub theme: &'a Theme,
    pub message: &'a str,
}

impl Widget for CrashModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal_area = centered_rect(60, 30, area);
        if modal_area.width == 0 || modal_area.height == 0 {
            return;
        }

        draw_drop_shadow(buf, modal_area, area);
        Clear.render(modal_area, buf);

        let title_style = self.theme.status_error;
        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(" SOMETHING WENT WRONG ", title_style),
                Span::raw(" "),
            ]))
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(title_style);

        let text_lines = vec![
            Line::from(""),
            Line::from(Span::styled(self.message, self.theme.footer_segment_val)),
            Line::from(""),
            Line::from(vec![
                Span::raw(" Press "),
                Span::styled("q", self.theme.footer_segment_key),
                Span::raw(" to quit "),
            ]),
        ];

        Paragraph::new(text_lines)
            .alignment(ratatui::layout::Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block)
            .render(modal_area, buf);
    }
}
