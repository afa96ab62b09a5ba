use thiserror::Error;

/// Errors raised while selecting a transform.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransformError {
    #[error("invalid choice '{code}'")]
    InvalidChoice { code: String },
    #[error("filter by duration requires a criteria value")]
    MissingCriteria,
}

pub type Result<T> = std::result::Result<T, TransformError>;
