//! Key-value persistence.
//!
//! [`PreferenceStore`] is the raw string-keyed primitive the platform
//! provides; [`KeyValueStore`] sits on top of it and marshals JSON values.
//! Writes propagate failures, reads never do: a failing or malformed read is
//! logged and reported as absent.

use crate::error::CoreError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

pub mod memory;
pub mod sqlite;

pub use memory::MemoryPreferenceStore;
pub use sqlite::SqlitePreferenceStore;

/// Key holding the JSON array of categories.
pub const CATEGORIES_KEY: &str = "todo_categories";
/// Key holding the JSON array of tasks.
pub const TASKS_KEY: &str = "todo_tasks";

/// Opaque persistent storage of string values under string keys.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, CoreError>;
    async fn set(&self, key: &str, value: String) -> Result<(), CoreError>;
    async fn remove(&self, key: &str) -> Result<(), CoreError>;
    async fn clear(&self) -> Result<(), CoreError>;
    async fn keys(&self) -> Result<Vec<String>, CoreError>;
}

/// JSON adapter over a [`PreferenceStore`]. Cheap to clone.
#[derive(Clone)]
pub struct KeyValueStore {
    inner: Arc<dyn PreferenceStore>,
}

impl KeyValueStore {
    pub fn new(inner: Arc<dyn PreferenceStore>) -> Self {
        Self { inner }
    }

    /// A store backed by process memory only.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryPreferenceStore::new()))
    }

    pub async fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CoreError> {
        let raw = serde_json::to_string(value)?;
        self.inner.set(key, raw).await.map_err(|e| {
            tracing::warn!(key, error = %e, "failed to write preference");
            e
        })
    }

    /// Reads and decodes `key`. Missing keys, storage failures and
    /// undecodable values all come back as `None`.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.inner.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read preference");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "discarding malformed preference value");
                None
            }
        }
    }

    /// Reads a JSON array stored under `key`, decoding each element on its
    /// own. Elements that fail to decode are logged and skipped so one bad
    /// record never hides the rest. `None` when the key is absent,
    /// unreadable, or not an array.
    pub async fn get_records<T: DeserializeOwned>(&self, key: &str) -> Option<Vec<T>> {
        let values: Vec<serde_json::Value> = self.get(key).await?;
        let records = values
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match serde_json::from_value(value) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(key, index, error = %e, "skipping malformed record");
                    None
                }
            })
            .collect();
        Some(records)
    }

    pub async fn remove(&self, key: &str) -> Result<(), CoreError> {
        self.inner.remove(key).await.map_err(|e| {
            tracing::warn!(key, error = %e, "failed to remove preference");
            e
        })
    }

    pub async fn clear(&self) -> Result<(), CoreError> {
        self.inner.clear().await.map_err(|e| {
            tracing::warn!(error = %e, "failed to clear preferences");
            e
        })
    }

    pub async fn list_keys(&self) -> Vec<String> {
        match self.inner.keys().await {
            Ok(keys) => keys,
            Err(e) => {
                tracing::warn!(error = %e, "failed to list preference keys");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        count: u32,
    }

    #[tokio::test]
    async fn missing_key_is_absent() {
        let store = KeyValueStore::in_memory();
        assert_eq!(store.get::<Sample>("nope").await, None);
    }

    #[tokio::test]
    async fn values_round_trip_as_json() {
        let store = KeyValueStore::in_memory();
        let sample = Sample { name: "milk".into(), count: 2 };
        store.set("sample", &sample).await.unwrap();

        assert_eq!(store.get::<Sample>("sample").await, Some(sample));
        assert_eq!(store.list_keys().await, vec!["sample".to_string()]);

        store.remove("sample").await.unwrap();
        assert_eq!(store.get::<Sample>("sample").await, None);
    }

    #[tokio::test]
    async fn malformed_value_reads_as_absent() {
        let backend = Arc::new(MemoryPreferenceStore::new());
        backend.set("sample", "{not json".to_string()).await.unwrap();
        let store = KeyValueStore::new(backend);

        assert_eq!(store.get::<Sample>("sample").await, None);
    }

    #[tokio::test]
    async fn records_decode_independently() {
        let backend = Arc::new(MemoryPreferenceStore::new());
        backend
            .set(
                "samples",
                r#"[{"name":"milk","count":2},{"name":"eggs"},{"name":"tea","count":1}]"#.to_string(),
            )
            .await
            .unwrap();
        backend.set("scalar", "42".to_string()).await.unwrap();
        let store = KeyValueStore::new(backend);

        let records = store.get_records::<Sample>("samples").await.unwrap();
        assert_eq!(
            records,
            vec![
                Sample { name: "milk".into(), count: 2 },
                Sample { name: "tea".into(), count: 1 },
            ]
        );
        assert_eq!(store.get_records::<Sample>("scalar").await, None);
        assert_eq!(store.get_records::<Sample>("missing").await, None);
    }

    #[tokio::test]
    async fn read_failures_are_swallowed_but_write_failures_propagate() {
        let backend = Arc::new(MemoryPreferenceStore::new());
        let store = KeyValueStore::new(backend.clone());
        store.set("n", &1u32).await.unwrap();

        backend.set_failing(true);
        assert_eq!(store.get::<u32>("n").await, None);
        assert!(store.list_keys().await.is_empty());

        let err = store.set("n", &2u32).await.unwrap_err();
        assert!(err.is_persistence());
        assert!(store.remove("n").await.is_err());
        assert!(store.clear().await.is_err());
    }
}
