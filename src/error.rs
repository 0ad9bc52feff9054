use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("cannot place {mines} mines on a {width}x{height} board")]
    InvalidConfiguration {
        width: usize,
        height: usize,
        mines: usize,
    },
    #[error("coordinates ({row}, {col}) are outside the board")]
    InvalidCoordinates { row: usize, col: usize },
}

pub type Result<T> = std::result::Result<T, GameError>;
