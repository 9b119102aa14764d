//! Record - Rows Returned by the Records Endpoint
//!
//! Every field is optional: the grid only checks presence when rendering.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Record identifier, numeric or textual depending on the backend
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{n}"),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

/// A single integration record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default, alias = "integration_provider")]
    pub provider: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    /// Timestamps stay raw; parsing happens in the formatters
    #[serde(default)]
    pub requested_at: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Record {
    /// Look up a field by column id. Blank strings count as absent.
    pub fn field(&self, column_id: &str) -> Option<String> {
        let value = match column_id {
            "id" => self.id.as_ref().map(|id| id.to_string()),
            "provider" => self.provider.clone(),
            "status" => self.status.clone(),
            "error_message" => self.error_message.clone(),
            "requested_at" => self.requested_at.clone(),
            "completed_at" => self.completed_at.clone(),
            "updated_at" => self.updated_at.clone(),
            _ => None,
        };
        value.filter(|v| !v.trim().is_empty())
    }

    /// Stable key for row rendering, falls back to the row position
    pub fn row_key(&self, index: usize) -> String {
        self.id
            .as_ref()
            .map(|id| id.to_string())
            .unwrap_or_else(|| format!("row-{index}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_partial_record() {
        let record: Record = serde_json::from_str(
            r#"{"id": 7, "integration_provider": "knowledge_mixer", "status": "failed"}"#,
        )
        .expect("valid record");
        assert_eq!(record.id, Some(RecordId::Number(7)));
        assert_eq!(record.field("provider").as_deref(), Some("knowledge_mixer"));
        assert_eq!(record.field("error_message"), None);
    }

    #[test]
    fn test_blank_and_unknown_fields_are_absent() {
        let record = Record {
            error_message: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(record.field("error_message"), None);
        assert_eq!(record.field("no_such_column"), None);
        assert_eq!(record.row_key(3), "row-3");
    }

    #[test]
    fn test_textual_id() {
        let record: Record = serde_json::from_str(r#"{"id": "rec-1"}"#).expect("valid record");
        assert_eq!(record.field("id").as_deref(), Some("rec-1"));
    }
}
