use crate::error::CoreError;
use crate::storage::PreferenceStore;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// In-process preference store. Can be switched into a failing mode to
/// exercise error paths.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: RwLock<BTreeMap<String, String>>,
    failing: AtomicBool,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// While set, every operation fails with [`CoreError::Persistence`].
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), CoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(CoreError::Persistence("storage unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        self.check()?;
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), CoreError> {
        self.check()?;
        self.values.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), CoreError> {
        self.check()?;
        self.values.write().await.remove(key);
        Ok(())
    }

    async fn clear(&self) -> Result<(), CoreError> {
        self.check()?;
        self.values.write().await.clear();
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>, CoreError> {
        self.check()?;
        Ok(self.values.read().await.keys().cloned().collect())
    }
}
