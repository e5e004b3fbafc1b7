use std::fmt::{self, Display};

/// Errors produced by model constructors and parsers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A `MM-DD` string that does not name a real calendar day.
    InvalidMonthDay(String),
    /// A native home-section token outside the host vocabulary.
    InvalidNativeToken(String),
    /// A card format name that is not recognised.
    InvalidCardFormat(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::InvalidMonthDay(raw) => {
                write!(f, "invalid month-day '{raw}', expected MM-DD")
            }
            ModelError::InvalidNativeToken(raw) => {
                write!(f, "unknown native home section '{raw}'")
            }
            ModelError::InvalidCardFormat(raw) => {
                write!(f, "unknown card format '{raw}'")
            }
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;
