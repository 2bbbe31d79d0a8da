pub mod action;
pub mod command;
pub mod command_palette;
pub mod features;
pub mod input;
pub mod keymap;
pub mod r#loop;
pub mod reducer;
pub mod registry;
pub mod shortcut;
pub mod state;
pub mod ui;
