//! Application configuration: `config.toml` (path from `CONFIG_PATH`) plus
//! environment overrides, normalized and validated before use.

use anyhow::{anyhow, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
    #[serde(default = "default_frontend_dir")]
    pub frontend_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            worker_threads: Some(4),
            frontend_dir: default_frontend_dir(),
        }
    }
}

/// Record store settings. Latency bounds emulate the round trip of a remote API.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_latency_min")]
    pub latency_min_ms: u64,
    #[serde(default = "default_latency_max")]
    pub latency_max_ms: u64,
    #[serde(default = "default_true")]
    pub seed_sample_data: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            latency_min_ms: default_latency_min(),
            latency_max_ms: default_latency_max(),
            seed_sample_data: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl")]
    pub token_ttl_hours: u64,
    #[serde(default = "default_session_file")]
    pub session_file: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_hours: default_token_ttl(),
            session_file: default_session_file(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self { Self { format: default_log_format() } }
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 8081 }
fn default_frontend_dir() -> String { "frontend".into() }
fn default_latency_min() -> u64 { 300 }
fn default_latency_max() -> u64 { 500 }
fn default_true() -> bool { true }
fn default_token_ttl() -> u64 { 12 }
fn default_session_file() -> String { "data/sessions.json".into() }
fn default_log_format() -> String { "compact".into() }

/// Secret used when neither the file nor `JWT_SECRET` provides one.
pub const DEV_JWT_SECRET: &str = "dev-secret-change-me";

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load the config file if present (defaults otherwise), apply environment
    /// overrides and validate.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = match load_default() {
            Ok(cfg) => cfg,
            Err(e) if is_missing_file(&e) => AppConfig::default(),
            Err(e) => return Err(e),
        };
        cfg.apply_env();
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Environment variables win over file values.
    pub fn apply_env(&mut self) {
        if let Ok(host) = std::env::var("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            self.server.port = port;
        }
        if let Some(w) = std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok()) {
            self.server.worker_threads = Some(w);
        }
        if let Ok(secret) = std::env::var("JWT_SECRET") {
            self.auth.jwt_secret = secret;
        }
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.store.validate()?;
        self.auth.normalize()?;
        self.logging.validate()?;
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn is_missing_file(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>()
        .map(|io| io.kind() == std::io::ErrorKind::NotFound)
        .unwrap_or(false)
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        if self.frontend_dir.trim().is_empty() {
            self.frontend_dir = default_frontend_dir();
        }
        Ok(())
    }
}

impl StoreConfig {
    fn validate(&self) -> Result<()> {
        if self.latency_min_ms > self.latency_max_ms {
            return Err(anyhow!(
                "store.latency_min_ms ({}) must not exceed store.latency_max_ms ({})",
                self.latency_min_ms,
                self.latency_max_ms
            ));
        }
        Ok(())
    }
}

impl AuthConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.jwt_secret.trim().is_empty() {
            self.jwt_secret = DEV_JWT_SECRET.to_string();
        }
        if self.token_ttl_hours == 0 {
            return Err(anyhow!("auth.token_ttl_hours must be >= 1"));
        }
        if self.session_file.trim().is_empty() {
            return Err(anyhow!("auth.session_file must not be empty"));
        }
        Ok(())
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<()> {
        match self.format.to_ascii_lowercase().as_str() {
            "compact" | "json" => Ok(()),
            other => Err(anyhow!("logging.format must be 'compact' or 'json', got '{other}'")),
        }
    }
}
