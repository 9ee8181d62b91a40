use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// An uploaded document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDto {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    /// MIME type reported by the backend
    #[serde(rename = "type", default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub size: Option<i64>,
    #[serde(default)]
    pub uploaded_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl DocumentDto {
    /// Human-readable size, e.g. `1.5 KB`.
    pub fn display_size(&self) -> String {
        match self.size {
            None => "-".to_string(),
            Some(bytes) if bytes < 1024 => format!("{} B", bytes),
            Some(bytes) if bytes < 1024 * 1024 => format!("{:.1} KB", bytes as f64 / 1024.0),
            Some(bytes) => format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0)),
        }
    }
}
