pub mod app;
pub mod components;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod theme;
