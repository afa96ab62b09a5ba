use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VisitError {
    /// Duration cell is not a base-10 integer.
    #[error("duration '{value}' is not an integer")]
    InvalidPeriod { value: String },
}

pub type Result<T> = std::result::Result<T, VisitError>;
