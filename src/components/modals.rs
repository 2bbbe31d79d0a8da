pub mod command_palette;
pub mod error;
pub mod helpers;
pub mod main_menu;
pub mod manager;

pub use command_palette::{CommandPaletteModal, PaletteHit, PaletteLayout};
pub use manager::ModalManager;
