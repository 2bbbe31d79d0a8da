use super::types::{item, FooterGroup, FooterItem};
use crate::app::state::{AppMode, AppState};
use crate::domain::editor::EditorState;

pub fn get_groups(state: &AppState) -> Vec<FooterGroup> {
    match state.mode() {
        AppMode::Crashed => vec![FooterGroup {
            name: "ERROR",
            items: vec![item("q", "quit")],
        }],
        AppMode::CommandPalette => vec![
            FooterGroup {
                name: "PALETTE",
                items: vec![
                    item("↑/↓", "move"),
                    item("Enter", "run"),
                    item("1-9", "quick"),
                    item("Esc", "close"),
                ],
            },
            FooterGroup {
                name: "MORE",
                items: vec![item("PgUp/Dn", "page"), item("^C", "copy")],
            },
        ],
        AppMode::Editing => vec![FooterGroup {
            name: "EDIT",
            items: vec![item("Enter/Esc", "done"), item("Bksp", "erase")],
        }],
        AppMode::MainMenu => vec![FooterGroup {
            name: "MENU",
            items: vec![item("Esc/m", "close"), item("q", "quit")],
        }],
        AppMode::Normal => {
            let has_selection = state.board.selected_count() > 0;
            vec![
                FooterGroup {
                    name: "GLOBAL",
                    items: vec![
                        FooterItem {
                            key: "^K",
                            desc: "commands",
                            highlighted: true,
                        },
                        item("q", "quit"),
                    ],
                },
                FooterGroup {
                    name: "DRAW",
                    items: vec![item("r/o/n", "rect/ellipse/note"), item("Tab", "next")],
                },
                FooterGroup {
                    name: "SHAPE",
                    items: vec![
                        FooterItem {
                            key: "hjkl",
                            desc: "move",
                            highlighted: has_selection,
                        },
                        item("d", "dup"),
                        item("x", "del"),
                        item("Enter", "rename"),
                    ],
                },
                FooterGroup {
                    name: "VIEW",
                    items: vec![
                        item("u/U", "undo/redo"),
                        item("+/-/0", "zoom"),
                        item("g", "grid"),
                        item("m", "menu"),
                    ],
                },
            ]
        }
    }
}
