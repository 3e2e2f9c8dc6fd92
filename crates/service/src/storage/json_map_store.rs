use std::{collections::HashMap, hash::Hash, path::PathBuf, sync::Arc};

use serde::{de::DeserializeOwned, Serialize};
use tokio::{fs, sync::RwLock};
use tracing::warn;

use crate::errors::ServiceError;

/// `HashMap<K, V>` mirrored to a JSON file after every mutation.
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// crash mid-write leaves the previous snapshot intact. Mutations are staged
/// on a copy and only become visible once the snapshot is on disk.
pub struct JsonMapStore<K, V> {
    inner: RwLock<HashMap<K, V>>,
    file_path: PathBuf,
}

impl<K, V> JsonMapStore<K, V>
where
    K: Eq + Hash + Serialize + DeserializeOwned + Clone + Send + Sync,
    V: Serialize + DeserializeOwned + Clone + Send + Sync,
{
    /// Load the map from `path`, creating an empty file if there is none.
    /// An unreadable snapshot is logged and replaced by an empty map.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(ServiceError::storage)?;
            }
        }

        let map = match fs::read(&file_path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                warn!(path = %file_path.display(), error = %e, "corrupt store snapshot; starting empty");
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        };

        let store = Arc::new(Self { inner: RwLock::new(map), file_path });
        store.persist(&*store.inner.read().await).await?;
        Ok(store)
    }

    async fn persist(&self, map: &HashMap<K, V>) -> Result<(), ServiceError> {
        let data = serde_json::to_vec(map).map_err(ServiceError::storage)?;
        let tmp = self.file_path.with_extension("json.tmp");
        fs::write(&tmp, data).await.map_err(ServiceError::storage)?;
        fs::rename(&tmp, &self.file_path).await.map_err(ServiceError::storage)?;
        Ok(())
    }

    pub async fn get(&self, key: &K) -> Option<V> {
        self.inner.read().await.get(key).cloned()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Insert or replace, then persist.
    pub async fn insert(&self, key: K, value: V) -> Result<(), ServiceError> {
        let mut map = self.inner.write().await;
        let mut next = map.clone();
        next.insert(key, value);
        self.persist(&next).await?;
        *map = next;
        Ok(())
    }

    /// Remove and persist; returns the previous value.
    pub async fn remove(&self, key: &K) -> Result<Option<V>, ServiceError> {
        let mut map = self.inner.write().await;
        if !map.contains_key(key) {
            return Ok(None);
        }
        let mut next = map.clone();
        let removed = next.remove(key);
        self.persist(&next).await?;
        *map = next;
        Ok(removed)
    }

    /// Keep only entries matching `keep`; returns how many were dropped.
    pub async fn retain<F>(&self, mut keep: F) -> Result<usize, ServiceError>
    where
        F: FnMut(&K, &V) -> bool,
    {
        let mut map = self.inner.write().await;
        let mut next = map.clone();
        next.retain(|k, v| keep(k, v));
        let dropped = map.len() - next.len();
        if dropped > 0 {
            self.persist(&next).await?;
            *map = next;
        }
        Ok(dropped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tmp_path() -> PathBuf {
        std::env::temp_dir().join(format!("json_map_store_{}", uuid::Uuid::new_v4())).join("map.json")
    }

    #[tokio::test]
    async fn mutations_survive_reopen() -> Result<(), ServiceError> {
        let path = tmp_path();
        let store = JsonMapStore::<String, u32>::open(&path).await?;
        assert!(store.is_empty().await);

        store.insert("a".into(), 1).await?;
        store.insert("b".into(), 2).await?;
        store.insert("a".into(), 10).await?;
        assert_eq!(store.remove(&"b".into()).await?, Some(2));
        assert_eq!(store.remove(&"missing".into()).await?, None);

        let reopened = JsonMapStore::<String, u32>::open(&path).await?;
        assert_eq!(reopened.len().await, 1);
        assert_eq!(reopened.get(&"a".into()).await, Some(10));

        let _ = fs::remove_dir_all(path.parent().unwrap()).await;
        Ok(())
    }

    #[tokio::test]
    async fn retain_drops_and_persists() -> Result<(), ServiceError> {
        let path = tmp_path();
        let store = JsonMapStore::<String, u32>::open(&path).await?;
        for (k, v) in [("x", 1), ("y", 2), ("z", 3)] {
            store.insert(k.into(), v).await?;
        }
        assert_eq!(store.retain(|_, v| *v >= 2).await?, 1);
        let reopened = JsonMapStore::<String, u32>::open(&path).await?;
        assert_eq!(reopened.get(&"x".into()).await, None);
        assert_eq!(reopened.len().await, 2);

        let _ = fs::remove_dir_all(path.parent().unwrap()).await;
        Ok(())
    }

    #[tokio::test]
    async fn corrupt_snapshot_starts_empty() -> Result<(), ServiceError> {
        let path = tmp_path();
        fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        fs::write(&path, b"{not json").await.unwrap();
        let store = JsonMapStore::<String, u32>::open(&path).await?;
        assert!(store.is_empty().await);

        let _ = fs::remove_dir_all(path.parent().unwrap()).await;
        Ok(())
    }

    #[tokio::test]
    async fn failed_persist_leaves_memory_and_disk_unchanged() -> Result<(), ServiceError> {
        let path = tmp_path();
        let store = JsonMapStore::<String, u32>::open(&path).await?;
        store.insert("tok".into(), 1).await?;

        // a directory where the temp snapshot should go makes every write fail
        fs::create_dir_all(path.with_extension("json.tmp")).await.unwrap();

        assert!(matches!(store.remove(&"tok".into()).await, Err(ServiceError::Storage(_))));
        assert_eq!(store.get(&"tok".into()).await, Some(1));
        assert!(store.insert("other".into(), 2).await.is_err());
        assert_eq!(store.get(&"other".into()).await, None);
        assert!(store.retain(|_, _| false).await.is_err());
        assert_eq!(store.len().await, 1);

        let on_disk: HashMap<String, u32> = serde_json::from_slice(&fs::read(&path).await.unwrap()).unwrap();
        assert_eq!(on_disk.get("tok"), Some(&1));
        assert_eq!(on_disk.len(), 1);

        let _ = fs::remove_dir_all(path.parent().unwrap()).await;
        Ok(())
    }
}
