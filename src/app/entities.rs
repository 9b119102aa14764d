//! AppServices - Global Collaborators
//!
//! The record source, layout storage and configuration are injected once at
//! startup and reached by views through `cx.global::<AppServices>()`.

use std::sync::Arc;

use gpui::Global;
use tracing::{error, info, warn};

use crate::layout::ColumnLayoutStore;
use crate::persistence::{FileStore, MemoryStore, PersistenceCapability};
use crate::services::{HttpRecordFetcher, RecordFetcher, SampleRecordFetcher};
use crate::states::AppConfig;

#[derive(Clone)]
pub struct AppServices {
    config: Arc<AppConfig>,
    fetcher: Arc<dyn RecordFetcher>,
    storage: Arc<dyn PersistenceCapability>,
    endpoint: Option<String>,
}

impl Global for AppServices {}

impl AppServices {
    pub fn new(
        config: AppConfig,
        fetcher: Arc<dyn RecordFetcher>,
        storage: Arc<dyn PersistenceCapability>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            fetcher,
            storage,
            endpoint: None,
        }
    }

    /// Build the collaborators described by `config`.
    ///
    /// Without an `api_url` the bundled sample data is served. Layout storage
    /// falls back to memory when the config dir is unusable.
    pub fn from_config(config: AppConfig) -> Self {
        let storage: Arc<dyn PersistenceCapability> = match FileStore::in_config_dir() {
            Ok(store) => {
                info!(dir = ?store.dir(), "Column layouts stored on disk");
                Arc::new(store)
            }
            Err(e) => {
                warn!(error = %e, "Config dir unavailable, column layouts kept in memory");
                Arc::new(MemoryStore::new())
            }
        };

        let (fetcher, endpoint): (Arc<dyn RecordFetcher>, _) = match config.api_url() {
            Some(url) => match HttpRecordFetcher::new(url) {
                Ok(fetcher) => {
                    info!(url, "Fetching records over HTTP");
                    (Arc::new(fetcher), Some(url.to_string()))
                }
                Err(e) => {
                    error!(error = %e, url, "Failed to build HTTP client, using sample data");
                    (Arc::new(SampleRecordFetcher::default()), None)
                }
            },
            None => {
                info!("No api_url configured, using sample data");
                (Arc::new(SampleRecordFetcher::default()), None)
            }
        };

        Self {
            endpoint,
            ..Self::new(config, fetcher, storage)
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn fetcher(&self) -> Arc<dyn RecordFetcher> {
        self.fetcher.clone()
    }

    /// Records endpoint in use, `None` for sample data
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    /// Layout store scoped to the configured storage key
    pub fn layout_store(&self) -> ColumnLayoutStore {
        ColumnLayoutStore::new(self.storage.clone(), self.config.storage_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::default_columns;

    #[test]
    fn test_layout_store_uses_configured_key() {
        let config = AppConfig::parse("storage_key = \"ops-records\"").expect("parse");
        let storage = Arc::new(MemoryStore::new());
        let services = AppServices::new(
            config,
            Arc::new(SampleRecordFetcher::default()),
            storage.clone(),
        );

        let layout = services.layout_store();
        assert_eq!(layout.key(), "ops-records");
        assert!(layout.persist(&default_columns()));
        assert!(storage.get("ops-records").expect("get").is_some());
        assert_eq!(services.endpoint(), None);
    }
}
