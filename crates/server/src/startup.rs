use std::{future::Future, net::SocketAddr, sync::Arc};

use axum::Router;
use common::env::{ensure_env, parent_dir};
use configs::{AppConfig, DEV_JWT_SECRET};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use service::{
    auth::{AuthConfig, AuthService},
    latency::Latency,
    session::SessionStore,
    InMemoryServiceRepository, ServiceCatalog,
};

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Wire the record store, catalog, session store and auth service from config.
pub async fn build_state(cfg: &AppConfig) -> anyhow::Result<ServerState> {
    let latency = Latency::from_millis(cfg.store.latency_min_ms, cfg.store.latency_max_ms);
    let repo = if cfg.store.seed_sample_data {
        InMemoryServiceRepository::seeded(latency)
    } else {
        InMemoryServiceRepository::new(latency)
    };
    info!(records = repo.len().await, min_ms = cfg.store.latency_min_ms, max_ms = cfg.store.latency_max_ms, "record store ready");
    let catalog = Arc::new(ServiceCatalog::new(Arc::new(repo)));

    let sessions = SessionStore::open(&cfg.auth.session_file).await?;
    if cfg.auth.jwt_secret == DEV_JWT_SECRET {
        warn!("using the development JWT secret; set JWT_SECRET in production");
    }
    let ttl_hours = i64::try_from(cfg.auth.token_ttl_hours)
        .map_err(|_| StartupError::InvalidConfig("auth.token_ttl_hours too large".into()))?;
    let auth = Arc::new(AuthService::new(sessions, AuthConfig::new(cfg.auth.jwt_secret.clone(), ttl_hours)));

    Ok(ServerState { catalog, auth, recent_limit: service::dashboard::DEFAULT_RECENT_LIMIT })
}

/// Full application for a config: state plus router.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let state = build_state(cfg).await?;
    Ok(routes::build_router(state, build_cors(), &cfg.server.frontend_dir))
}

/// Serve `cfg` until `shutdown` resolves.
pub async fn run_with_config<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    ensure_env(&cfg.server.frontend_dir, &parent_dir(&cfg.auth.session_file)).await?;
    let app = build_app(&cfg).await?;

    let addr: SocketAddr = cfg
        .bind_addr()
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address {}: {e}", cfg.bind_addr())))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "starting server crate");
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!("server stopped");
    Ok(())
}
