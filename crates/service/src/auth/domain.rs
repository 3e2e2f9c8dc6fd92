use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use models::{Identity, Role};

/// Login input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Login result (session)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub identity: Identity,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub uid: u64,
    pub role: Role,
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}
