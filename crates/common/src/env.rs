//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::{info, warn};

/// Warn when the static frontend directory is missing and make sure the data
/// directory (session file lives there) exists.
pub async fn ensure_env(frontend_dir: &str, data_dir: &str) -> anyhow::Result<()> {
    if tokio::fs::metadata(frontend_dir).await.is_err() {
        warn!(%frontend_dir, "frontend assets directory not found; static assets will 404");
    }
    tokio::fs::create_dir_all(data_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {data_dir}: {e}"))?;
    info!(%data_dir, "data directory ready");
    Ok(())
}

/// Directory part of a file path, or `.` for bare file names.
pub fn parent_dir(file: &str) -> String {
    match Path::new(file).parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_string_lossy().into_owned(),
        _ => ".".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ensure_env_creates_data_dir() -> anyhow::Result<()> {
        let dir = std::env::temp_dir().join(format!("sd_env_{}", uuid::Uuid::new_v4()));
        let data = dir.join("data");
        ensure_env("/definitely/not/here", data.to_str().unwrap()).await?;
        assert!(tokio::fs::metadata(&data).await?.is_dir());
        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }

    #[test]
    fn parent_dir_of_bare_file_is_cwd() {
        assert_eq!(parent_dir("sessions.json"), ".");
        assert_eq!(parent_dir("data/sessions.json"), "data");
    }
}
