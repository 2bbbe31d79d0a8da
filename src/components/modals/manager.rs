use crate::app::state::{AppMode, AppState};
use crate::domain::editor::EditorState;
use crate::theme::Theme;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use super::command_palette::CommandPaletteModal;
use super::error::CrashModal;
use super::helpers::dim_area;
use super::main_menu::MainMenuModal;

/// Draws whichever overlay the current mode calls for on top of the canvas.
pub struct ModalManager<'a> {
    pub theme: &'a Theme,
    pub app_state: &'a AppState,
}

impl Widget for ModalManager<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let state = self.app_state;
        match state.mode() {
            AppMode::Normal | AppMode::Editing => {}
            AppMode::MainMenu => MainMenuModal { theme: self.theme }.render(area, buf),
            AppMode::CommandPalette => {
                dim_area(buf, area);
                CommandPaletteModal {
                    theme: self.theme,
                    session: state.palette.session(),
                    translator: state.translator.as_ref(),
                    editor: &state.board,
                }
                .render(area, buf);
            }
            AppMode::Crashed => {
                dim_area(buf, area);
                let message = state.board.crashing_error().unwrap_or_default();
                CrashModal {
                    theme: self.theme,
                    message: &message,
                }
                .render(area, buf);
            }
        }
    }
}
