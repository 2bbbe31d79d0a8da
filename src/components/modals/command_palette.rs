use crate::app::state::{PaletteFocus, PaletteSession};
use crate::domain::editor::EditorState;
use crate::domain::i18n::{msg, Translator};
use crate::domain::ranking::MAX_RESULTS;
use crate::theme::{glyphs, Theme};
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Widget},
};

use super::helpers::draw_drop_shadow;

const MAX_WIDTH: u16 = 72;
const QUERY_PREFIX_WIDTH: u16 = 3;
/// Borders, query row, separator, result rows, status row
const DIALOG_HEIGHT: u16 = 2 + 1 + 1 + MAX_RESULTS as u16 + 1;

/// Screen geometry of the open palette, shared by rendering and mouse
/// hit-testing so both agree on where things are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteLayout {
    pub dialog: Rect,
    pub query: Rect,
    pub clear: Option<Rect>,
    pub list: Rect,
    pub rows: Vec<Rect>,
    pub status: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteHit {
    Backdrop,
    Query,
    Clear,
    Row(usize),
    List,
    Dialog,
}

impl PaletteLayout {
    pub fn compute(area: Rect, session: &PaletteSession, clear_label: &str) -> Self {
        let width = area.width.saturating_sub(4).min(MAX_WIDTH);
        let height = DIALOG_HEIGHT.min(area.height);
        let dialog = Rect {
            x: area.x + area.width.saturating_sub(width) / 2,
            y: area.y + (area.height / 5).min(area.height.saturating_sub(height)),
            width,
            height,
        };

        let inner = Rect {
            x: dialog.x + 1,
            y: dialog.y + 1,
            width: dialog.width.saturating_sub(2),
            height: dialog.height.saturating_sub(2),
        };
        let row_at = |offset: u16, h: u16| {
            Rect {
                x: inner.x,
                y: inner.y + offset,
                width: inner.width,
                height: h,
            }
            .intersection(inner)
        };

        let query = row_at(0, 1);
        let clear = (!session.query.is_empty()).then(|| {
            let w = (clear_label.chars().count() as u16 + 4).min(query.width);
            Rect {
                x: query.right().saturating_sub(w),
                y: query.y,
                width: w,
                height: query.height,
            }
        });
        let list = row_at(2, MAX_RESULTS as u16);
        let rows = (0..session.result_count().min(MAX_RESULTS))
            .map(|i| row_at(2 + i as u16, 1))
            .collect();
        let status = row_at(2 + MAX_RESULTS as u16, 1);

        Self {
            dialog,
            query,
            clear,
            list,
            rows,
            status,
        }
    }

    pub fn hit(&self, column: u16, row: u16) -> PaletteHit {
        let pos = Position::new(column, row);
        if !self.dialog.contains(pos) {
            return PaletteHit::Backdrop;
        }
        if self.clear.is_some_and(|r| r.contains(pos)) {
            return PaletteHit::Clear;
        }
        if self.query.contains(pos) {
            return PaletteHit::Query;
        }
        if let Some(i) = self.rows.iter().position(|r| r.contains(pos)) {
            return PaletteHit::Row(i);
        }
        if self.list.contains(pos) {
            return PaletteHit::List;
        }
        PaletteHit::Dialog
    }
}

pub struct CommandPaletteModal<'a> {
    pub theme: &'a Theme,
    pub session: &'a PaletteSession,
    pub translator: &'a dyn Translator,
    pub editor: &'a dyn EditorState,
}

impl Widget for CommandPaletteModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let t = self.translator;
        let clear_label = msg(t, "command-bar.clear", "Clear");
        let layout = PaletteLayout::compute(area, self.session, &clear_label);
        if layout.dialog.width < 3 || layout.dialog.height < 3 {
            return;
        }

        draw_drop_shadow(buf, layout.dialog, area);
        Clear.render(layout.dialog, buf);

        let title = msg(t, "command-bar.title", "Command Palette");
        Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(format!(" {} ", title.to_uppercase()), self.theme.header_active),
                Span::raw(" "),
            ]))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border_focus)
            .render(layout.dialog, buf);

        self.render_query(&layout, &clear_label, buf);

        // Separator
        if !layout.list.is_empty() {
            buf.set_string(
                layout.query.x,
                layout.query.y + 1,
                "─".repeat(layout.query.width as usize),
                self.theme.border,
            );
        }

        self.render_results(&layout, buf);

        let count = self.session.result_count();
        let status = if count > 0 {
            format!(
                " {count} {}",
                msg(t, "command-bar.results-count", "results available")
            )
        } else {
            format!(" {}", msg(t, "command-bar.no-results", "No results found"))
        };
        if !layout.status.is_empty() {
            buf.set_stringn(
                layout.status.x,
                layout.status.y,
                status,
                layout.status.width as usize,
                self.theme.dimmed,
            );
        }
    }
}

impl CommandPaletteModal<'_> {
    fn render_query(&self, layout: &PaletteLayout, clear_label: &str, buf: &mut Buffer) {
        let query = layout.query;
        if query.is_empty() {
            return;
        }
        let prefix_style = if self.session.focus == PaletteFocus::Query {
            self.theme.footer_segment_key
        } else {
            self.theme.hint
        };
        buf.set_string(query.x, query.y, format!(" {} ", glyphs::SEARCH), prefix_style);

        let clear_width = layout.clear.map_or(0, |r| r.width);
        let field = Rect {
            x: query.x + QUERY_PREFIX_WIDTH,
            width: query
                .width
                .saturating_sub(QUERY_PREFIX_WIDTH)
                .saturating_sub(clear_width),
            ..query
        };

        if self.session.query.is_empty() {
            let placeholder = msg(self.translator, "command-bar.placeholder", "Type a command...");
            buf.set_stringn(field.x, field.y, placeholder, field.width as usize, self.theme.hint);
        } else if !field.is_empty() {
            Widget::render(&self.session.query, field, buf);
        }

        if let Some(clear) = layout.clear {
            buf.set_stringn(
                clear.x,
                clear.y,
                format!(" {} {} ", glyphs::CLEAR, clear_label),
                clear.width as usize,
                self.theme.kbd,
            );
        }
    }

    fn render_results(&self, layout: &PaletteLayout, buf: &mut Buffer) {
        if layout.list.is_empty() {
            return;
        }
        if layout.rows.is_empty() {
            let text = msg(self.translator, "command-bar.no-results", "No results found");
            buf.set_stringn(
                layout.list.x + 2,
                layout.list.y,
                text,
                layout.list.width.saturating_sub(2) as usize,
                self.theme.dimmed,
            );
            return;
        }

        let locale = self.translator.locale();
        for (i, row) in layout.rows.iter().enumerate() {
            let Some(item) = self.session.result(i).filter(|_| !row.is_empty()) else {
                continue;
            };
            let enabled = item.is_enabled(self.editor);
            let selected = i == self.session.selected_index;
            let style = match (selected, enabled) {
                (true, _) => self.theme.list_selected,
                (false, true) => self.theme.list_item,
                (false, false) => self.theme.list_disabled,
            };
            buf.set_style(*row, style);

            let hint = if i < crate::app::command_palette::QUICK_SELECT_SLOTS {
                format!(" {} ", i + 1)
            } else {
                "   ".to_string()
            };
            let icon = item.icon.as_deref().map_or(glyphs::FALLBACK, glyphs::icon);
            let left = Line::from(vec![
                Span::styled(hint, if selected { style } else { self.theme.hint }),
                Span::styled(format!("{icon} "), style),
                Span::styled(item.display_label(locale).to_string(), style),
            ]);

            let mut right = Vec::new();
            if !enabled {
                if let Some(key) = &item.disabled_description {
                    right.push(Span::styled(
                        format!("{} ", msg(self.translator, key, "Unavailable")),
                        self.theme.dimmed,
                    ));
                }
            }
            if let Some(kbd) = &item.kbd {
                right.push(Span::styled(format!(" {kbd} "), self.theme.kbd));
                right.push(Span::raw(" "));
            }
            let right = Line::from(right);
            let right_width = right.width() as u16;

            buf.set_line(row.x, row.y, &left, row.width.saturating_sub(right_width));
            if right_width > 0 && right_width < row.width {
                buf.set_line(row.right() - right_width, row.y, &right, right_width);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::ActionItemRef;
    use crate::domain::action::{tests::noop, ActionLabel};
    use crate::domain::board::Board;
    use crate::infrastructure::translations::Translations;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    fn session(items: Vec<crate::domain::action::ActionItem>) -> PaletteSession {
        let mut session = PaletteSession::opened();
        session.focus = PaletteFocus::Query;
        session.results = items.into_iter().map(|i| ActionItemRef(Arc::new(i))).collect();
        session
    }

    fn render(session: &PaletteSession, translator: &Translations, board: &Board) -> Vec<String> {
        let theme = Theme::default();
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|f| {
                CommandPaletteModal {
                    theme: &theme,
                    session,
                    translator,
                    editor: board,
                }
                .render(f.area(), f.buffer_mut());
            })
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        (0..24u16)
            .map(|y| (0..80u16).map(|x| buffer[(x, y)].symbol().to_string()).collect())
            .collect()
    }

    #[test]
    fn test_layout_geometry_and_hits() {
        let session = session(vec![noop("undo", "Undo"), noop("redo", "Redo")]);
        let area = Rect::new(0, 0, 80, 24);
        let layout = PaletteLayout::compute(area, &session, "Clear");

        assert_eq!(layout.dialog, Rect::new(4, 4, 72, DIALOG_HEIGHT));
        assert_eq!(layout.rows.len(), 2);
        assert!(layout.clear.is_none(), "no clear button for an empty query");
        assert_eq!(layout.hit(0, 0), PaletteHit::Backdrop);
        assert_eq!(layout.hit(10, layout.query.y), PaletteHit::Query);
        assert_eq!(layout.hit(10, layout.rows[1].y), PaletteHit::Row(1));
        assert_eq!(layout.hit(10, layout.list.y + 4), PaletteHit::List);
        assert_eq!(layout.hit(10, layout.status.y), PaletteHit::Dialog);
    }

    #[test]
    fn test_clear_button_hit() {
        let mut session = session(vec![noop("undo", "Undo")]);
        session.query.insert_str("un");
        let layout = PaletteLayout::compute(Rect::new(0, 0, 80, 24), &session, "Clear");
        let clear = layout.clear.unwrap();
        assert_eq!(clear.right(), layout.query.right());
        assert_eq!(layout.hit(clear.x, clear.y), PaletteHit::Clear);
        assert_eq!(layout.hit(layout.query.x, clear.y), PaletteHit::Query);
    }

    #[test]
    fn test_tiny_area_does_not_panic() {
        let session = session(vec![noop("undo", "Undo")]);
        let layout = PaletteLayout::compute(Rect::new(0, 0, 3, 2), &session, "Clear");
        assert_eq!(layout.hit(0, 0), PaletteHit::Backdrop);
        let board = Board::new();
        let theme = Theme::default();
        let translator = Translations::builtin("en");
        let mut terminal = Terminal::new(TestBackend::new(3, 2)).unwrap();
        terminal
            .draw(|f| {
                CommandPaletteModal {
                    theme: &theme,
                    session: &session,
                    translator: &translator,
                    editor: &board,
                }
                .render(f.area(), f.buffer_mut());
            })
            .unwrap();
    }

    #[test]
    fn test_renders_rows_hints_and_count() {
        let board = Board::new();
        let items = vec![
            noop("undo", "Undo")
                .with_kbd("u")
                .gated(|e| Ok(e.can_undo()))
                .with_disabled_description("action.undo.disabled"),
            noop("zoom-in", "Zoom in").with_icon("zoom-in"),
        ];
        let session = session(items);
        let lines = render(&session, &Translations::builtin("en"), &board);
        let screen = lines.join("\n");

        assert!(screen.contains("COMMAND PALETTE"));
        assert!(screen.contains("Type a command..."));
        let undo_row = lines.iter().find(|l| l.contains("Undo")).unwrap();
        assert!(undo_row.contains(" 1 "));
        assert!(undo_row.contains("Nothing to undo"));
        assert!(undo_row.contains(" u "));
        let zoom_row = lines.iter().find(|l| l.contains("Zoom in")).unwrap();
        assert!(zoom_row.contains(" 2 "));
        assert!(zoom_row.contains('+'));
        assert!(screen.contains("2 results available"));
    }

    #[test]
    fn test_empty_results_and_localized_chrome() {
        let board = Board::new();
        let mut session = session(vec![]);
        session.query.insert_str("zzz");
        let lines = render(&session, &Translations::builtin("fr"), &board);
        let screen = lines.join("\n");

        assert!(screen.contains("PALETTE DE COMMANDES"));
        assert!(screen.contains("Aucun résultat"));
        assert!(screen.contains("Effacer"));
        assert!(screen.contains("zzz"));
    }

    #[test]
    fn test_untranslated_disabled_reason_falls_back() {
        let board = Board::new();
        let item = noop("undo", "Undo")
            .gated(|e| Ok(e.can_undo()))
            .with_disabled_description("action.undo.missing-key");
        let session = session(vec![item]);
        let lines = render(&session, &Translations::builtin("en"), &board);
        let undo_row = lines.iter().find(|l| l.contains("Undo")).unwrap();
        assert!(undo_row.contains("Unavailable"));
    }

    #[test]
    fn test_localized_action_label() {
        let board = Board::new();
        let mut item = noop("zoom-in", "Zoom in");
        item.label = ActionLabel::localized([("en", "Zoom in"), ("fr", "Zoom avant")]);
        let session = session(vec![item]);
        let screen = render(&session, &Translations::builtin("fr"), &board).join("\n");
        assert!(screen.contains("Zoom avant"));
        assert!(!screen.contains("Zoom in"));
    }
}
