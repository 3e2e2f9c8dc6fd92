use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
    Extension, Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use models::Identity;
use service::auth::domain::LoginInput;

use crate::errors::JsonApiError;
use crate::observability;
use crate::state::ServerState;

pub const AUTH_COOKIE: &str = "auth_token";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginOutput {
    pub identity: Identity,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Bearer header first, then the `auth_token` cookie.
pub fn extract_token(headers: &HeaderMap, jar: &CookieJar) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_string());
    }
    jar.get(AUTH_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|t| !t.is_empty())
}

fn session_cookie(token: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(AUTH_COOKIE, token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(false);
    cookie.set_same_site(SameSite::Lax);
    cookie
}

#[utoipa::path(post, path = "/auth/login", tag = "auth", request_body = crate::openapi::LoginRequest, responses((status = 200, description = "Logged In"), (status = 400, description = "Missing email or password")))]
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    Json(input): Json<LoginInput>,
) -> Result<(CookieJar, Json<LoginOutput>), JsonApiError> {
    let session = state.auth.login(input).await?;
    observability::LOGINS_TOTAL.inc();
    let jar = jar.add(session_cookie(session.token.clone()));
    let out = LoginOutput { identity: session.identity, token: session.token, expires_at: session.expires_at };
    Ok((jar, Json(out)))
}

#[utoipa::path(post, path = "/auth/logout", tag = "auth", responses((status = 204, description = "Logged Out")))]
pub async fn logout(
    State(state): State<ServerState>,
    headers: HeaderMap,
    jar: CookieJar,
) -> Result<(CookieJar, StatusCode), JsonApiError> {
    if let Some(token) = extract_token(&headers, &jar) {
        state.auth.logout(&token).await?;
        observability::LOGOUTS_TOTAL.inc();
    }
    let mut removal = Cookie::from(AUTH_COOKIE);
    removal.set_path("/");
    Ok((jar.remove(removal), StatusCode::NO_CONTENT))
}

#[utoipa::path(get, path = "/auth/me", tag = "auth", responses((status = 200, description = "Current identity", body = crate::openapi::IdentityDoc), (status = 401, description = "Unauthorized")))]
pub async fn me(Extension(identity): Extension<Identity>) -> Json<Identity> {
    Json(identity)
}

/// Session gate for the protected router: missing, invalid, expired or
/// logged-out tokens get 401; otherwise the identity rides along as a
/// request extension.
pub async fn require_session(
    State(state): State<ServerState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let path = req.uri().path().to_string();
    let Some(token) = extract_token(req.headers(), &jar) else {
        warn!(%path, "missing Authorization header and auth_token cookie");
        observability::AUTH_REJECTED_TOTAL.inc();
        return Err(JsonApiError::unauthorized());
    };

    match state.auth.authenticate(&token).await {
        Ok(identity) => {
            info!(%path, user_id = identity.id, "session accepted");
            req.extensions_mut().insert(identity);
            Ok(next.run(req).await)
        }
        Err(e) => {
            warn!(%path, err = %e, "session rejected");
            observability::AUTH_REJECTED_TOTAL.inc();
            Err(e.into())
        }
    }
}
