pub mod board;
pub mod error;
pub mod types;

pub use board::{Board, DEFAULT_SIZE, DIRECTIONS};
pub use error::BoardError;
pub use types::{Cell, Position, Side};
