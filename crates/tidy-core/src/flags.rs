//! Remotely toggleable feature flags.
//!
//! A [`ConfigSource`] supplies raw boolean values; the provider keeps the
//! last known [`FeatureFlags`] in a watch channel and never fails: fetch
//! errors are logged and the previous flags stay in effect.

use crate::error::CoreError;
use crate::models::{FeatureFlags, FLAG_ENABLE_CATEGORIES, FLAG_ENABLE_DARK_MODE};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::time::Instant;

#[async_trait]
pub trait ConfigSource: Send + Sync {
    /// Fetches the current values, keyed by `enable_categories` and
    /// `enable_dark_mode`. Missing keys leave the flag unchanged.
    async fn fetch(&self) -> Result<HashMap<String, bool>, CoreError>;
}

/// How often the source may actually be contacted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchPolicy {
    pub minimum_fetch_interval: Duration,
}

impl FetchPolicy {
    pub fn development() -> Self {
        Self {
            minimum_fetch_interval: Duration::from_secs(60),
        }
    }

    pub fn production() -> Self {
        Self {
            minimum_fetch_interval: Duration::from_secs(12 * 60 * 60),
        }
    }
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self::development()
    }
}

pub struct FeatureFlagProvider {
    source: Option<Arc<dyn ConfigSource>>,
    policy: FetchPolicy,
    flags: watch::Sender<FeatureFlags>,
    last_fetch: Mutex<Option<Instant>>,
}

impl FeatureFlagProvider {
    pub fn new(source: Arc<dyn ConfigSource>, policy: FetchPolicy) -> Self {
        Self::build(Some(source), policy)
    }

    /// A provider with no source; it serves the default flags forever.
    pub fn unconfigured() -> Self {
        Self::build(None, FetchPolicy::default())
    }

    fn build(source: Option<Arc<dyn ConfigSource>>, policy: FetchPolicy) -> Self {
        let (flags, _) = watch::channel(FeatureFlags::default());
        Self {
            source,
            policy,
            flags,
            last_fetch: Mutex::new(None),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.source.is_some()
    }

    pub fn current(&self) -> FeatureFlags {
        *self.flags.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<FeatureFlags> {
        self.flags.subscribe()
    }

    /// Refreshes the flags from the source unless the last successful fetch
    /// is younger than the policy's minimum interval. Returns the flags in
    /// effect afterwards.
    pub async fn fetch_config(&self) -> FeatureFlags {
        self.fetch(false).await
    }

    /// Like [`fetch_config`](Self::fetch_config) but ignores the interval.
    pub async fn force_fetch(&self) -> FeatureFlags {
        self.fetch(true).await
    }

    async fn fetch(&self, force: bool) -> FeatureFlags {
        let Some(source) = &self.source else {
            tracing::warn!("feature flags not configured, using defaults");
            return self.current();
        };

        let mut last_fetch = self.last_fetch.lock().await;
        if let (false, Some(at)) = (force, *last_fetch) {
            if at.elapsed() < self.policy.minimum_fetch_interval {
                tracing::debug!("using cached feature flags");
                return self.current();
            }
        }

        match source.fetch().await {
            Ok(values) => {
                *last_fetch = Some(Instant::now());
                self.flags.send_modify(|flags| {
                    if let Some(&enabled) = values.get(FLAG_ENABLE_CATEGORIES) {
                        flags.enable_categories = enabled;
                    }
                    if let Some(&enabled) = values.get(FLAG_ENABLE_DARK_MODE) {
                        flags.enable_dark_mode = enabled;
                    }
                });
                tracing::info!(flags = ?self.current(), "feature flags updated");
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch feature flags, keeping last known values");
            }
        }

        self.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct ScriptedSource {
        calls: AtomicUsize,
        responses: Vec<Result<HashMap<String, bool>, String>>,
    }

    impl ScriptedSource {
        fn new(responses: Vec<Result<HashMap<String, bool>, String>>) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                responses,
            })
        }
    }

    #[async_trait]
    impl ConfigSource for ScriptedSource {
        async fn fetch(&self) -> Result<HashMap<String, bool>, CoreError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.responses[call.min(self.responses.len() - 1)] {
                Ok(values) => Ok(values.clone()),
                Err(message) => Err(CoreError::Persistence(message.clone())),
            }
        }
    }

    fn values(categories: bool, dark: bool) -> HashMap<String, bool> {
        HashMap::from([
            (FLAG_ENABLE_CATEGORIES.to_string(), categories),
            (FLAG_ENABLE_DARK_MODE.to_string(), dark),
        ])
    }

    #[tokio::test]
    async fn unconfigured_provider_serves_defaults() {
        let provider = FeatureFlagProvider::unconfigured();
        assert!(!provider.is_configured());
        assert_eq!(provider.fetch_config().await, FeatureFlags::default());
    }

    #[tokio::test(start_paused = true)]
    async fn fetch_applies_values_and_respects_interval() {
        let source = ScriptedSource::new(vec![Ok(values(false, true)), Ok(values(true, false))]);
        let provider = FeatureFlagProvider::new(source.clone(), FetchPolicy::development());
        let rx = provider.subscribe();

        let flags = provider.fetch_config().await;
        assert!(!flags.enable_categories);
        assert!(flags.enable_dark_mode);
        assert_eq!(*rx.borrow(), flags);

        // Inside the interval the source is not contacted again.
        provider.fetch_config().await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);

        tokio::time::advance(Duration::from_secs(61)).await;
        let flags = provider.fetch_config().await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
        assert_eq!(flags, FeatureFlags::default());

        provider.force_fetch().await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn failed_fetch_keeps_last_known_flags() {
        let source = ScriptedSource::new(vec![Ok(values(false, true)), Err("offline".into())]);
        let policy = FetchPolicy {
            minimum_fetch_interval: Duration::ZERO,
        };
        let provider = FeatureFlagProvider::new(source, policy);

        let first = provider.fetch_config().await;
        let second = provider.fetch_config().await;
        assert_eq!(first, second);
        assert!(second.enable_dark_mode);
    }

    #[tokio::test]
    async fn partial_values_leave_other_flags_alone() {
        let source = ScriptedSource::new(vec![Ok(HashMap::from([(
            FLAG_ENABLE_DARK_MODE.to_string(),
            true,
        )]))]);
        let provider = FeatureFlagProvider::new(source, FetchPolicy::production());

        let flags = provider.fetch_config().await;
        assert!(flags.enable_categories);
        assert!(flags.enable_dark_mode);
    }
}
