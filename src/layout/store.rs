//! Column Layout Store
//!
//! Owns the mapping between column ids and persisted widths. Reads never fail
//! towards the caller and writes are best effort: a storage problem is logged
//! and the in-memory columns stay authoritative for the session.

use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::constants::MAX_COLUMN_WIDTH;
use crate::domain::{ColumnDefinition, LayoutState};
use crate::persistence::PersistenceCapability;

/// Clamp a width into `[min_width, MAX_COLUMN_WIDTH]`. The upper bound wins if
/// a definition declares a minimum above it.
pub fn clamp_width(width: u32, min_width: u32) -> u32 {
    width.max(min_width).min(MAX_COLUMN_WIDTH)
}

/// Persisted column widths for one grid instance
#[derive(Clone)]
pub struct ColumnLayoutStore {
    storage: Arc<dyn PersistenceCapability>,
    key: String,
}

impl ColumnLayoutStore {
    /// Create a store writing under `key`
    pub fn new(storage: Arc<dyn PersistenceCapability>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Persistence key of this grid
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the persisted widths.
    ///
    /// Absent, unreadable or malformed data yields an empty mapping. Entries
    /// that are not positive numbers are dropped.
    pub fn load(&self) -> LayoutState {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return LayoutState::new(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to read column layout");
                return LayoutState::new();
            }
        };

        let value: serde_json::Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(key = %self.key, error = %e, "Ignoring malformed column layout");
                return LayoutState::new();
            }
        };

        let Some(object) = value.as_object() else {
            warn!(key = %self.key, "Ignoring column layout that is not an object");
            return LayoutState::new();
        };

        object
            .iter()
            .filter_map(|(id, width)| {
                let width = width.as_f64().filter(|w| w.is_finite() && *w >= 1.0)?;
                Some((id.clone(), width.round().min(u32::MAX as f64) as u32))
            })
            .collect()
    }

    /// Write the widths. Returns whether the write went through; failures are
    /// logged and never propagated.
    pub fn save(&self, layout: &LayoutState) -> bool {
        let result = serde_json::to_string(layout)
            .map_err(crate::error::Error::from)
            .and_then(|json| self.storage.set(&self.key, &json));

        match result {
            Ok(()) => {
                debug!(key = %self.key, columns = layout.len(), "Saved column layout");
                true
            }
            Err(e) => {
                error!(key = %self.key, error = %e, "Failed to save column layout");
                false
            }
        }
    }

    /// Width mapping of the given columns
    pub fn snapshot(columns: &[ColumnDefinition]) -> LayoutState {
        columns
            .iter()
            .map(|column| (column.id.clone(), column.width))
            .collect()
    }

    /// Persist the widths of `columns`
    pub fn persist(&self, columns: &[ColumnDefinition]) -> bool {
        self.save(&Self::snapshot(columns))
    }

    /// Produce a new column sequence where only `id` gets `new_width`, clamped
    /// to the column bounds. The input is left untouched; an unknown id yields
    /// an unchanged copy.
    pub fn apply_width(
        columns: &[ColumnDefinition],
        id: &str,
        new_width: u32,
    ) -> Vec<ColumnDefinition> {
        columns
            .iter()
            .map(|column| {
                if column.id == id {
                    ColumnDefinition {
                        width: clamp_width(new_width, column.min_width),
                        ..column.clone()
                    }
                } else {
                    column.clone()
                }
            })
            .collect()
    }

    /// Defaults overlaid with whatever was persisted for known ids
    pub fn restore(&self, defaults: &[ColumnDefinition]) -> Vec<ColumnDefinition> {
        let saved = self.load();
        let unknown = saved
            .keys()
            .filter(|id| !defaults.iter().any(|c| &c.id == *id))
            .count();
        if unknown > 0 {
            debug!(key = %self.key, unknown, "Ignoring widths of unknown columns");
        }

        defaults
            .iter()
            .map(|column| match saved.get(&column.id) {
                Some(width) => ColumnDefinition {
                    width: clamp_width(*width, column.min_width),
                    ..column.clone()
                },
                None => column.clone(),
            })
            .collect()
    }

    /// Drop the persisted layout entirely and hand back the defaults
    pub fn reset(&self, defaults: &[ColumnDefinition]) -> Vec<ColumnDefinition> {
        if let Err(e) = self.storage.remove(&self.key) {
            error!(key = %self.key, error = %e, "Failed to clear column layout");
        }
        defaults.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::default_columns;
    use crate::error::{Error, Result};
    use crate::persistence::MemoryStore;

    const KEY: &str = "integration-records-column-widths";

    /// Store whose writes and deletes always fail
    struct BrokenStore;

    impl PersistenceCapability for BrokenStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            Err(Error::Persistence {
                key: key.to_string(),
                message: "unreadable".to_string(),
            })
        }

        fn set(&self, key: &str, _value: &str) -> Result<()> {
            Err(Error::Persistence {
                key: key.to_string(),
                message: "quota exceeded".to_string(),
            })
        }

        fn remove(&self, key: &str) -> Result<()> {
            Err(Error::Persistence {
                key: key.to_string(),
                message: "read only".to_string(),
            })
        }
    }

    fn memory_layout() -> (Arc<MemoryStore>, ColumnLayoutStore) {
        let storage = Arc::new(MemoryStore::new());
        let layout = ColumnLayoutStore::new(storage.clone(), KEY);
        (storage, layout)
    }

    #[test]
    fn test_clamp_width_bounds() {
        assert_eq!(clamp_width(10, 100), 100);
        assert_eq!(clamp_width(280, 50), 280);
        assert_eq!(clamp_width(900, 50), MAX_COLUMN_WIDTH);
        assert_eq!(clamp_width(10, 600), MAX_COLUMN_WIDTH);
    }

    #[test]
    fn test_load_absent_and_malformed() {
        let (storage, layout) = memory_layout();
        assert!(layout.load().is_empty());

        storage.set(KEY, "{not json").expect("set");
        assert!(layout.load().is_empty());

        storage.set(KEY, "[1, 2, 3]").expect("set");
        assert!(layout.load().is_empty());
    }

    #[test]
    fn test_load_drops_bad_entries() {
        let (storage, layout) = memory_layout();
        storage
            .set(KEY, r#"{"id": 280, "status": "wide", "provider": -4, "updated_at": 0, "x": 99.6}"#)
            .expect("set");

        let loaded = layout.load();
        assert_eq!(loaded.get("id"), Some(&280));
        assert_eq!(loaded.get("x"), Some(&100));
        assert!(!loaded.contains_key("status"));
        assert!(!loaded.contains_key("provider"));
        assert!(!loaded.contains_key("updated_at"));
    }

    #[test]
    fn test_apply_width_is_pure() {
        let columns = default_columns();
        let before = columns.clone();

        let updated = ColumnLayoutStore::apply_width(&columns, "provider", 20);

        assert_eq!(columns, before);
        assert_eq!(updated[1].width, 100);
        for (a, b) in updated.iter().zip(before.iter()).filter(|(a, _)| a.id != "provider") {
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_apply_width_clamps_upper_bound() {
        let updated = ColumnLayoutStore::apply_width(&default_columns(), "id", 4000);
        assert_eq!(updated[0].width, MAX_COLUMN_WIDTH);
    }

    #[test]
    fn test_restore_ignores_unknown_ids() {
        let (storage, layout) = memory_layout();
        storage
            .set(KEY, r#"{"id": 280, "legacy_column": 300, "status": 9000}"#)
            .expect("set");

        let columns = layout.restore(&default_columns());
        assert_eq!(columns.len(), default_columns().len());
        assert_eq!(columns[0].width, 280);
        assert_eq!(columns[2].width, MAX_COLUMN_WIDTH);
        assert!(columns.iter().all(|c| c.id != "legacy_column"));
    }

    #[test]
    fn test_persist_then_restore() {
        let (_storage, layout) = memory_layout();
        let columns = ColumnLayoutStore::apply_width(&default_columns(), "id", 280);
        assert!(layout.persist(&columns));

        let saved = layout.load();
        assert_eq!(saved.get("id"), Some(&280));
        assert_eq!(saved.get("provider"), Some(&150));
        assert_eq!(layout.restore(&default_columns()), columns);
    }

    #[test]
    fn test_reset_clears_corrupted_key() {
        let (storage, layout) = memory_layout();
        storage.set(KEY, "garbage").expect("set");

        let columns = layout.reset(&default_columns());
        assert_eq!(columns, default_columns());
        assert_eq!(storage.get(KEY).expect("get"), None);
    }

    #[test]
    fn test_failures_are_swallowed() {
        let layout = ColumnLayoutStore::new(Arc::new(BrokenStore), KEY);
        assert!(layout.load().is_empty());
        assert!(!layout.persist(&default_columns()));
        assert_eq!(layout.reset(&default_columns()), default_columns());
        assert_eq!(layout.restore(&default_columns()), default_columns());
    }
}
