use std::{path::PathBuf, sync::Arc};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use models::Identity;

use crate::errors::ServiceError;
use crate::storage::json_map_store::JsonMapStore;

/// What the store remembers about one issued token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionEntry {
    pub identity: Identity,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SessionEntry {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Token → identity map persisted to disk so sessions outlive a restart.
pub struct SessionStore {
    sessions: Arc<JsonMapStore<String, SessionEntry>>,
}

impl SessionStore {
    /// Restore persisted sessions (or start with none) and drop the expired ones.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let sessions = JsonMapStore::open(path).await?;
        let store = Self { sessions };
        let purged = store.purge_expired().await?;
        info!(active = store.sessions.len().await, purged, "session store opened");
        Ok(Arc::new(store))
    }

    /// Record a session, dropping any that have expired in the meantime.
    pub async fn set(&self, token: String, entry: SessionEntry) -> Result<(), ServiceError> {
        let purged = self.purge_expired().await?;
        debug!(user_id = entry.identity.id, purged, "session set");
        self.sessions.insert(token, entry).await
    }

    /// Forget a token; returns whether it was known.
    pub async fn clear(&self, token: &str) -> Result<bool, ServiceError> {
        Ok(self.sessions.remove(&token.to_string()).await?.is_some())
    }

    /// Identity behind a live token. An expired entry is evicted on sight.
    pub async fn current(&self, token: &str) -> Option<Identity> {
        let key = token.to_string();
        let entry = self.sessions.get(&key).await?;
        if entry.is_expired_at(Utc::now()) {
            if let Err(e) = self.sessions.remove(&key).await {
                warn!(error = %e, "failed to evict expired session");
            }
            return None;
        }
        Some(entry.identity)
    }

    pub async fn purge_expired(&self) -> Result<usize, ServiceError> {
        let now = Utc::now();
        self.sessions.retain(|_, entry| !entry.is_expired_at(now)).await
    }

    pub async fn active(&self) -> usize {
        self.sessions.len().await
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn tmp_path() -> PathBuf {
        std::env::temp_dir().join(format!("sessions_{}", uuid::Uuid::new_v4())).join("sessions.json")
    }

    fn entry(ttl: Duration) -> SessionEntry {
        let now = Utc::now();
        SessionEntry { identity: Identity::mock_admin("a@b.c"), issued_at: now, expires_at: now + ttl }
    }

    #[tokio::test]
    async fn set_current_clear_lifecycle() -> Result<(), ServiceError> {
        let path = tmp_path();
        let store = SessionStore::open(&path).await?;
        assert_eq!(store.current("t1").await, None);

        store.set("t1".into(), entry(Duration::hours(1))).await?;
        assert_eq!(store.current("t1").await.map(|i| i.email), Some("a@b.c".to_string()));

        assert!(store.clear("t1").await?);
        assert!(!store.clear("t1").await?);
        assert_eq!(store.current("t1").await, None);

        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
        Ok(())
    }

    #[tokio::test]
    async fn sessions_are_restored_on_open() -> Result<(), ServiceError> {
        let path = tmp_path();
        {
            let store = SessionStore::open(&path).await?;
            store.set("keep".into(), entry(Duration::hours(1))).await?;
        }
        let reopened = SessionStore::open(&path).await?;
        assert!(reopened.current("keep").await.is_some());

        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
        Ok(())
    }

    #[tokio::test]
    async fn expired_sessions_are_ignored_and_purged() -> Result<(), ServiceError> {
        let path = tmp_path();
        let store = SessionStore::open(&path).await?;
        store.set("old".into(), entry(Duration::seconds(-5))).await?;
        store.set("new".into(), entry(Duration::hours(1))).await?;
        assert_eq!(store.current("old").await, None);

        let reopened = SessionStore::open(&path).await?;
        assert_eq!(reopened.active().await, 1);

        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
        Ok(())
    }

    #[tokio::test]
    async fn expired_sessions_are_evicted_while_running() -> Result<(), ServiceError> {
        let path = tmp_path();
        let store = SessionStore::open(&path).await?;
        for i in 0..100 {
            let token = format!("stale-{i}");
            store.set(token.clone(), entry(Duration::seconds(-5))).await?;
            assert_eq!(store.current(&token).await, None);
        }
        assert_eq!(store.active().await, 0);

        // expired entries nobody asks about go on the next login
        store.set("forgotten".into(), entry(Duration::seconds(-5))).await?;
        store.set("live".into(), entry(Duration::hours(1))).await?;
        assert_eq!(store.active().await, 1);

        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
        Ok(())
    }
}
