use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use configs::FetchConfig;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::errors::LoadError;
use crate::fetch::{Fetch, FetchError};
use crate::http::HttpFetcher;
use crate::observability;
use crate::snapshot::Snapshot;

/// Runtime configuration fetched from a JSON document and held in memory.
///
/// `load` replaces the snapshot wholesale with a single atomic swap, so
/// concurrent readers see either the previous document or the new one in
/// full. Readers never suspend and never fail. Overlapping loads are not
/// ordered: whichever completes last wins.
pub struct ConfigurationStore {
    fetcher: Arc<dyn Fetch>,
    snapshot: ArcSwapOption<Snapshot>,
}

impl ConfigurationStore {
    pub fn new(fetcher: Arc<dyn Fetch>) -> Self {
        Self { fetcher, snapshot: ArcSwapOption::empty() }
    }

    /// Store backed by the reqwest fetcher.
    pub fn with_http(cfg: &FetchConfig) -> Result<Self, FetchError> {
        Ok(Self::new(Arc::new(HttpFetcher::new(cfg)?)))
    }

    /// Fetch `location`, decode it as a JSON object and publish it as the
    /// current snapshot. On failure the previous snapshot stays in place.
    #[instrument(skip(self))]
    pub async fn load(&self, location: &str) -> Result<(), LoadError> {
        let timer = observability::LOAD_DURATION.start_timer();
        let result = self.fetch_snapshot(location).await;
        timer.observe_duration();

        match result {
            Ok(snapshot) => {
                let keys = snapshot.len();
                self.snapshot.store(Some(Arc::new(snapshot)));
                observability::LOADS_TOTAL.inc();
                info!(keys, "configuration loaded");
                Ok(())
            }
            Err(e) => {
                observability::LOAD_FAILURES_TOTAL.with_label_values(&[e.kind()]).inc();
                warn!(error = %e, code = e.code(), "configuration load failed");
                Err(e)
            }
        }
    }

    async fn fetch_snapshot(&self, location: &str) -> Result<Snapshot, LoadError> {
        if location.trim().is_empty() {
            return Err(LoadError::Unreachable {
                location: location.to_string(),
                status_code: None,
                reason: "empty location".into(),
            });
        }

        debug!("fetching configuration");
        let response = self.fetcher.get(location).await.map_err(|e| LoadError::Unreachable {
            location: location.to_string(),
            status_code: None,
            reason: e.to_string(),
        })?;
        if !response.is_success() {
            return Err(LoadError::Unreachable {
                location: location.to_string(),
                status_code: Some(response.status),
                reason: format!("HTTP status {}", response.status),
            });
        }
        Snapshot::from_body(location, &response.body)
    }

    /// Value stored under `key`, converted to the caller's type.
    ///
    /// `None` before the first successful load, for unknown keys, and when the
    /// stored JSON cannot be represented as `T`.
    pub fn get_value<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.get_raw(key)?;
        match serde_json::from_value(raw) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!(key, error = %e, "configuration value does not match requested type");
                None
            }
        }
    }

    /// Untyped lookup.
    pub fn get_raw(&self, key: &str) -> Option<Value> {
        self.snapshot()?.get(key).cloned()
    }

    /// Keys of the current snapshot in document order; empty before any load.
    pub fn get_keys(&self) -> Vec<String> {
        self.snapshot()
            .map(|s| s.keys().map(str::to_owned).collect())
            .unwrap_or_default()
    }

    /// The whole current snapshot, for several reads against one document.
    pub fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.snapshot.load_full()
    }

    pub fn is_loaded(&self) -> bool {
        self.snapshot.load().is_some()
    }

    /// Location the current snapshot was loaded from.
    pub fn location(&self) -> Option<String> {
        self.snapshot().map(|s| s.location().to_string())
    }
}

impl fmt::Debug for ConfigurationStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigurationStore")
            .field("location", &self.location())
            .field("keys", &self.get_keys())
            .finish()
    }
}
