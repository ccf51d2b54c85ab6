use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum AdvisorError {
    #[error("Deck count must be between 1 and 8, got {0}")]
    InvalidDeckCount(u32),

    #[error("Unknown hand result: {0}")]
    UnknownHandResult(String),

    #[error("Unknown input mode: {0}")]
    UnknownInputMode(String),
}
