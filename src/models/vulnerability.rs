use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Priority bucket exposed downstream, derived from the CVSS score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    /// Returns a numeric rank where higher values indicate higher priority.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Low => 0,
            Priority::Medium => 1,
            Priority::High => 2,
            Priority::Critical => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized vulnerability record, one per valid finding. Created by the
/// assembler, submitted once to the sink, never mutated afterwards.
///
/// Custom attributes are a closed set of typed optional fields rather than an
/// open map; absent inputs are omitted from serialized output entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vulnerability {
    pub instance_id: String,
    pub engine_type: String,
    pub kingdom: String,
    pub analyzer: String,
    pub category: String,
    pub sub_category: String,
    pub priority: Priority,
    pub accuracy: f32,
    pub confidence: f32,
    pub likelihood: f32,
    pub vulnerability_abstract: String,
    pub cve: String,
    pub cve_url: String,
    /// Affected packages, one canonical form per line.
    pub packages: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mapped_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cvss_score: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cwe: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_vector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_complexity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidentiality_impact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integrity_impact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability_impact: Option<String>,
}
