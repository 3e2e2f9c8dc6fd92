use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use models::Identity;

use super::domain::{AuthSession, Claims, LoginInput};
use super::errors::AuthError;
use crate::session::{SessionEntry, SessionStore};

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl: Duration,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>, token_ttl_hours: i64) -> Self {
        Self { jwt_secret: jwt_secret.into(), token_ttl: Duration::hours(token_ttl_hours) }
    }
}

/// Auth business service independent of web framework
pub struct AuthService {
    sessions: Arc<SessionStore>,
    cfg: AuthConfig,
}

impl AuthService {
    pub fn new(sessions: Arc<SessionStore>, cfg: AuthConfig) -> Self { Self { sessions, cfg } }

    /// Mock login: any non-empty email and password yield the admin identity.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthConfig, AuthService, domain::LoginInput};
    /// use service::session::SessionStore;
    /// let path = std::env::temp_dir().join(format!("doc_{}", uuid::Uuid::new_v4())).join("s.json");
    /// let sessions = tokio_test::block_on(SessionStore::open(path)).unwrap();
    /// let svc = AuthService::new(sessions, AuthConfig::new("secret", 12));
    /// let session = tokio_test::block_on(svc.login(LoginInput { email: "u@e.com".into(), password: "pw".into() })).unwrap();
    /// assert_eq!(session.identity.email, "u@e.com");
    /// assert!(!session.token.is_empty());
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let email = input.email.trim();
        if email.is_empty() || input.password.is_empty() {
            return Err(AuthError::Validation("email and password are required".into()));
        }

        let identity = Identity::mock_admin(email);
        let issued_at = Utc::now();
        let expires_at = issued_at + self.cfg.token_ttl;
        let claims = Claims {
            sub: identity.email.clone(),
            uid: identity.id,
            role: identity.role,
            jti: Uuid::new_v4().to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(self.cfg.jwt_secret.as_bytes()))
            .map_err(|e| AuthError::TokenError(e.to_string()))?;

        self.sessions
            .set(token.clone(), SessionEntry { identity: identity.clone(), issued_at, expires_at })
            .await?;
        info!(user_id = identity.id, email = %identity.email, "user_logged_in");
        Ok(AuthSession { identity, token, expires_at })
    }

    /// Drop the session behind `token`. Unknown tokens are not an error.
    #[instrument(skip_all)]
    pub async fn logout(&self, token: &str) -> Result<(), AuthError> {
        let known = self.sessions.clear(token).await?;
        info!(known, "user_logged_out");
        Ok(())
    }

    /// Verify signature and expiry, then require the session to still exist.
    pub async fn authenticate(&self, token: &str) -> Result<Identity, AuthError> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.cfg.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| {
            debug!(error = %e, "token rejected");
            AuthError::Unauthorized
        })?;

        let identity = self.sessions.current(token).await.ok_or(AuthError::Unauthorized)?;
        if identity.id != data.claims.uid {
            return Err(AuthError::Unauthorized);
        }
        Ok(identity)
    }

    pub fn token_ttl(&self) -> Duration { self.cfg.token_ttl }
}
