use thiserror::Error;

/// Business errors for auth workflows
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("not authenticated")]
    Unauthorized,
    #[error("token error: {0}")]
    TokenError(String),
    #[error("session store error: {0}")]
    Session(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::Validation(_) => 1001,
            AuthError::Unauthorized => 1004,
            AuthError::TokenError(_) => 1102,
            AuthError::Session(_) => 1200,
        }
    }
}

impl From<crate::errors::ServiceError> for AuthError {
    fn from(e: crate::errors::ServiceError) -> Self {
        AuthError::Session(e.to_string())
    }
}
