use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Scan-level metadata lifted from the top of the report document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanInfo {
    /// Report `updated_at` timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_date: Option<DateTime<Utc>>,
    /// Scanned image name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_id: Option<String>,
    /// Image tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_label: Option<String>,
    /// Number of entries in the report's `installed_packages` array.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_files: Option<u64>,
    /// The scanner does not report its own version.
    pub engine_version: String,
}

impl ScanInfo {
    pub fn new() -> Self {
        Self {
            engine_version: "Unknown".to_string(),
            ..Default::default()
        }
    }
}
