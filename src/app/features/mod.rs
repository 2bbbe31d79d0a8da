pub mod board;
pub mod palette;
