pub mod action;
pub mod board;
pub mod editor;
pub mod i18n;
pub mod ranking;
