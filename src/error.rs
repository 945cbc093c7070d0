use thiserror::Error;

use crate::quiz::Phase;

/// Everything that can go wrong while configuring or driving a quiz.
#[derive(Error, Debug)]
pub enum QuizError {
    /// The country pool cannot support a game (too few, blank or duplicate names).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// The caller asked for a flag that is not on screen.
    #[error("invalid choice {choice}: expected 0, 1 or 2")]
    InvalidChoice { choice: usize },
    /// A transition was requested from the wrong phase.
    #[error("operation not allowed while {phase}")]
    OutOfOrder { phase: Phase },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, QuizError>;
