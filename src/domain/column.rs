//! Column - Grid Column Definitions

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_MIN_COLUMN_WIDTH;

/// Persisted widths keyed by column id
pub type LayoutState = BTreeMap<String, u32>;

fn default_min_width() -> u32 {
    DEFAULT_MIN_COLUMN_WIDTH
}

/// A single grid column. Only `width` changes after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    /// Stable identity, also the record field the column shows
    pub id: String,
    /// Header label
    pub label: String,
    /// Current width in pixels
    pub width: u32,
    /// Lower bound for `width`
    #[serde(default = "default_min_width")]
    pub min_width: u32,
}

impl ColumnDefinition {
    /// Create a column with the default minimum width
    pub fn new(id: impl Into<String>, label: impl Into<String>, width: u32) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            width,
            min_width: DEFAULT_MIN_COLUMN_WIDTH,
        }
    }

    /// Set the minimum width
    pub fn min_width(mut self, min_width: u32) -> Self {
        self.min_width = min_width;
        self
    }
}

/// The column set a freshly mounted grid starts from
pub fn default_columns() -> Vec<ColumnDefinition> {
    vec![
        ColumnDefinition::new("id", "ID", 80).min_width(50),
        ColumnDefinition::new("provider", "Provider", 150).min_width(100),
        ColumnDefinition::new("status", "Status", 120).min_width(100),
        ColumnDefinition::new("error_message", "Error Message", 200).min_width(150),
        ColumnDefinition::new("requested_at", "Requested At", 180).min_width(150),
        ColumnDefinition::new("completed_at", "Completed At", 180).min_width(150),
        ColumnDefinition::new("updated_at", "Updated At", 180).min_width(150),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_columns_have_unique_ids() {
        let columns = default_columns();
        let mut ids: Vec<_> = columns.iter().map(|c| c.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), columns.len());
    }

    #[test]
    fn test_min_width_defaults_when_missing() {
        let column: ColumnDefinition =
            serde_json::from_str(r#"{"id":"x","label":"X","width":90}"#).expect("valid column");
        assert_eq!(column.min_width, DEFAULT_MIN_COLUMN_WIDTH);
    }
}
