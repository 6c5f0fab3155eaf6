use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("coordinates outside the board")]
    InvalidCoords,
    #[error("board must be at least 1x1")]
    EmptyBoard,
    #[error("mine count must be above zero and below the cell count")]
    InvalidMineCount,
    #[error("game already ended, no new moves are accepted")]
    GameOver,
    #[error("full disclosure is only available once the game has ended")]
    GameInProgress,
}

pub type Result<T> = core::result::Result<T, GameError>;
