use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board size must be at least 1")]
    InvalidSize,
    #[error("Too many mines, at least one cell must stay safe")]
    TooManyMines,
    #[error("Coordinates outside the board")]
    OutOfBounds,
}

pub type Result<T> = std::result::Result<T, GameError>;
