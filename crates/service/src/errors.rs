use std::fmt::Display;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error(transparent)]
    Model(#[from] models::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str, id: impl Display) -> Self {
        Self::NotFound(format!("{entity} {id} not found"))
    }

    pub fn storage(e: impl Display) -> Self { Self::Storage(e.to_string()) }
}
