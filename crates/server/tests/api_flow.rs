use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::Service;
use uuid::Uuid;

use configs::AppConfig;

fn test_config() -> AppConfig {
    let mut cfg = AppConfig::default();
    cfg.store.latency_min_ms = 0;
    cfg.store.latency_max_ms = 0;
    cfg.auth.jwt_secret = "test-secret".into();
    cfg.auth.session_file = std::env::temp_dir()
        .join(format!("sd_api_{}", Uuid::new_v4()))
        .join("sessions.json")
        .to_string_lossy()
        .into_owned();
    cfg
}

async fn app() -> anyhow::Result<Router> {
    server::startup::build_app(&test_config()).await
}

async fn send(app: &Router, req: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
    let resp = app.clone().call(req).await?;
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
    Ok((status, body))
}

fn get(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

fn with_json(method: &str, uri: &str, token: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

async fn login(app: &Router) -> anyhow::Result<String> {
    let req = Request::builder()
        .method("POST")
        .uri("/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&json!({"email": "admin@example.com", "password": "secret"}))?))?;
    let (status, body) = send(app, req).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(body["token"].as_str().unwrap_or_default().to_string())
}

fn names(body: &Value) -> Vec<String> {
    body.as_array()
        .map(|rows| rows.iter().filter_map(|r| r["name"].as_str().map(str::to_string)).collect())
        .unwrap_or_default()
}

#[tokio::test]
async fn health_is_public() -> anyhow::Result<()> {
    let app = app().await?;
    let req = Request::builder().uri("/health").body(Body::empty())?;
    let (status, body) = send(&app, req).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
    Ok(())
}

#[tokio::test]
async fn api_requires_a_session() -> anyhow::Result<()> {
    let app = app().await?;
    let req = Request::builder().uri("/api/services").body(Body::empty())?;
    let (status, body) = send(&app, req).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");

    let (status, _) = send(&app, get("/api/services", "garbage")).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn login_sets_cookie_and_me_returns_identity() -> anyhow::Result<()> {
    let app = app().await?;
    let req = Request::builder()
        .method("POST")
        .uri("/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&json!({"email": "ops@example.com", "password": "pw"}))?))?;
    let resp = app.clone().call(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = resp
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(cookie.starts_with("auth_token="));

    // cookie alone is enough for the gate
    let pair = cookie.split(';').next().unwrap_or_default().to_string();
    let req = Request::builder().uri("/auth/me").header(header::COOKIE, pair).body(Body::empty())?;
    let (status, body) = send(&app, req).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "ops@example.com");
    assert_eq!(body["name"], "Admin User");
    assert_eq!(body["role"], "admin");
    Ok(())
}

#[tokio::test]
async fn login_rejects_blank_credentials() -> anyhow::Result<()> {
    let app = app().await?;
    let req = Request::builder()
        .method("POST")
        .uri("/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&json!({"email": "", "password": ""}))?))?;
    let (status, _) = send(&app, req).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn logout_invalidates_token() -> anyhow::Result<()> {
    let app = app().await?;
    let token = login(&app).await?;
    let req = Request::builder()
        .method("POST")
        .uri("/auth/logout")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())?;
    let (status, _) = send(&app, req).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, get("/auth/me", &token)).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn list_filters_and_sorts() -> anyhow::Result<()> {
    let app = app().await?;
    let token = login(&app).await?;

    let (status, body) = send(&app, get("/api/services?category=All&status=All&search=", &token)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(5));
    // default ordering is newest first
    assert_eq!(names(&body).first().map(String::as_str), Some("Content Writing"));

    let (_, body) = send(&app, get("/api/services?category=Design&status=active", &token)).await?;
    assert_eq!(names(&body), vec!["Logo Design"]);

    let (_, body) = send(&app, get("/api/services?search=seo", &token)).await?;
    assert_eq!(names(&body), vec!["SEO Optimization"]);

    let (_, body) = send(&app, get("/api/services?sort=name&direction=desc", &token)).await?;
    assert_eq!(names(&body).first().map(String::as_str), Some("Website Development"));

    let (status, body) = send(&app, get("/api/services?sort=price", &token)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation Error");
    Ok(())
}

#[tokio::test]
async fn crud_round_trip() -> anyhow::Result<()> {
    let app = app().await?;
    let token = login(&app).await?;

    let (status, created) = send(
        &app,
        with_json("POST", "/api/services", &token, json!({"name": "Helpdesk", "category": "Support"})),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 6);
    assert_eq!(created["status"], "pending");
    assert_eq!(created["description"], "");
    assert!(created["createdAt"].is_string());

    let (status, updated) = send(
        &app,
        with_json("PUT", "/api/services/6", &token, json!({"status": "active"})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "active");
    assert_eq!(updated["name"], "Helpdesk");
    assert_eq!(updated["createdAt"], created["createdAt"]);

    let (status, fetched) = send(&app, get("/api/services/6", &token)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, updated);

    let req = Request::builder()
        .method("DELETE")
        .uri("/api/services/6")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())?;
    let (status, removed) = send(&app, req).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(removed["id"], 6);

    let (status, body) = send(&app, get("/api/services/6", &token)).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");
    Ok(())
}

#[tokio::test]
async fn create_validates_required_fields() -> anyhow::Result<()> {
    let app = app().await?;
    let token = login(&app).await?;
    let (status, body) = send(
        &app,
        with_json("POST", "/api/services", &token, json!({"name": "", "category": "Design"})),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Name and Category are required fields");

    let (status, _) = send(
        &app,
        with_json("POST", "/api/services", &token, json!({"name": "X", "category": "Sales"})),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn dashboard_counts_statuses() -> anyhow::Result<()> {
    let app = app().await?;
    let token = login(&app).await?;
    let (status, body) = send(&app, get("/api/dashboard", &token)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalServices"], 5);
    let by_status = ["activeServices", "pendingServices", "completedServices", "cancelledServices"]
        .iter()
        .map(|k| body[*k].as_u64().unwrap_or_default())
        .sum::<u64>();
    assert_eq!(by_status, 5);
    assert_eq!(body["recentServices"].as_array().map(Vec::len), Some(5));
    Ok(())
}

#[tokio::test]
async fn metrics_and_docs_are_public() -> anyhow::Result<()> {
    let app = app().await?;
    let _ = send(&app, Request::builder().uri("/health").body(Body::empty())?).await?;

    let resp = app.clone().call(Request::builder().uri("/metrics").body(Body::empty())?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let text = String::from_utf8(to_bytes(resp.into_body(), usize::MAX).await?.to_vec())?;
    assert!(text.contains("service_desk_http_requests_total"));

    let (status, doc) = send(&app, Request::builder().uri("/api-docs/openapi.json").body(Body::empty())?).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/api/services"].is_object());
    Ok(())
}
