use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("{0}")]
    Validation(String),
    #[error("unknown category: {0}")]
    UnknownCategory(String),
    #[error("unknown status: {0}")]
    UnknownStatus(String),
}
