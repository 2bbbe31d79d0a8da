use crate::domain::board::{Board, Shape, ShapeKind};
use crate::domain::editor::EditorState;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};

const GRID_STEP_X: u16 = 4;
const GRID_STEP_Y: u16 = 2;

pub struct Canvas<'a> {
    pub board: &'a Board,
    pub theme: &'a Theme,
}

/// Shape bounds on screen at the current zoom, clipped to `area`.
pub fn shape_rect(shape: &Shape, zoom: u16, area: Rect) -> Option<Rect> {
    let scale = |v: i64| v * i64::from(zoom) / 100;
    let x = i64::from(area.x) + scale(i64::from(shape.x));
    let y = i64::from(area.y) + scale(i64::from(shape.y));
    let width = scale(i64::from(shape.width)).max(3);
    let height = scale(i64::from(shape.height)).max(3);

    let (x, y) = (u16::try_from(x).ok()?, u16::try_from(y).ok()?);
    let rect = Rect {
        x,
        y,
        width: u16::try_from(width).unwrap_or(u16::MAX),
        height: u16::try_from(height).unwrap_or(u16::MAX),
    }
    .intersection(area);
    (!rect.is_empty()).then_some(rect)
}

impl Widget for Canvas<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, self.theme.canvas);

        if self.board.show_grid {
            for y in (area.top()..area.bottom()).step_by(GRID_STEP_Y as usize) {
                for x in (area.left()..area.right()).step_by(GRID_STEP_X as usize) {
                    buf[(x, y)].set_symbol("·").set_style(self.theme.canvas_grid);
                }
            }
        }

        let editing = self.board.editing_shape_id();
        for shape in self.board.shapes() {
            let Some(rect) = shape_rect(shape, self.board.zoom(), area) else {
                continue;
            };

            let base = match shape.kind {
                ShapeKind::Rectangle => self.theme.shape_rectangle,
                ShapeKind::Ellipse => self.theme.shape_ellipse,
                ShapeKind::Note => self.theme.shape_note,
            };
            let border_style = if self.board.is_selected(shape.id) {
                self.theme.shape_selected
            } else {
                base
            };
            let border_type = match shape.kind {
                ShapeKind::Ellipse => BorderType::Rounded,
                ShapeKind::Note => BorderType::Thick,
                ShapeKind::Rectangle => BorderType::Plain,
            };

            let text_style = if editing == Some(shape.id) {
                self.theme.shape_editing
            } else {
                base
            };
            let mut text = shape.text.clone();
            if editing == Some(shape.id) {
                text.push('▏');
            }

            Paragraph::new(text)
                .style(text_style)
                .centered()
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(border_type)
                        .border_style(border_style)
                        .style(base),
                )
                .render(rect, buf);
        }
    }
}
