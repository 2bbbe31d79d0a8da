use crate::app::state::AppState;
use crate::components::canvas::Canvas;
use crate::components::footer::Footer;
use crate::components::header::Header;
use crate::components::modals::ModalManager;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

pub struct AppLayout {
    pub header: Rect,
    pub canvas: Rect,
    pub footer: Rect,
}

pub fn get_layout(area: Rect) -> AppLayout {
    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Canvas
            Constraint::Length(1), // Footer
        ])
        .split(area);

    AppLayout {
        header: main[0],
        canvas: main[1],
        footer: main[2],
    }
}

pub fn draw(f: &mut Frame, app_state: &AppState) {
    let area = f.area();
    if area.width == 0 || area.height == 0 {
        return;
    }
    let theme = &app_state.theme;
    let layout = get_layout(area);

    f.render_widget(
        Header {
            board: &app_state.board,
            theme,
        },
        layout.header,
    );
    f.render_widget(
        Canvas {
            board: &app_state.board,
            theme,
        },
        layout.canvas,
    );
    f.render_widget(
        Footer {
            state: app_state,
            theme,
        },
        layout.footer,
    );

    // Overlays use the whole frame so mouse hit-testing sees the same geometry.
    f.render_widget(
        ModalManager {
            theme,
            app_state,
        },
        area,
    );
}
