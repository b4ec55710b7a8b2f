use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("position {position} is outside the board of {len} cards")]
    PositionOutOfRange { position: usize, len: usize },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
