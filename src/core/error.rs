use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("coordinate ({row}, {col}) is outside a {size}x{size} board")]
    InvalidCoordinate { row: usize, col: usize, size: usize },

    #[error("unsupported board size {0} (must be even and at least 4)")]
    InvalidSize(usize),
}
