pub mod canvas;
pub mod footer;
pub mod header;
pub mod modals;
