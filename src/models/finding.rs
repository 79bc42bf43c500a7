use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One vendor-reported finding: a CVE correlated against the installed
/// packages it affects. Decoded straight from the `findings` array of a
/// Tenable.io CS scan report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FindingRecord {
    #[serde(default)]
    pub nvd_finding: NvdFinding,
    #[serde(default)]
    pub packages: Vec<Package>,
}

impl FindingRecord {
    /// A finding without a CVE identifier never becomes a vulnerability.
    pub fn has_cve(&self) -> bool {
        self.nvd_finding
            .cve
            .as_deref()
            .is_some_and(|cve| !cve.trim().is_empty())
    }
}

/// NVD metadata for a single CVE as reported by the scanner. Every field is
/// optional on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NvdFinding {
    pub cve: Option<String>,
    pub description: Option<String>,
    pub published_date: Option<DateTime<Utc>>,
    pub modified_date: Option<DateTime<Utc>>,
    pub cvss_score: Option<f32>,
    pub access_vector: Option<String>,
    pub access_complexity: Option<String>,
    pub confidentiality_impact: Option<String>,
    pub integrity_impact: Option<String>,
    pub availability_impact: Option<String>,
    pub cwe: Option<String>,
}

/// An installed package affected by a finding. Pure value type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    pub version: String,
    #[serde(rename = "type")]
    pub package_type: Option<String>,
}

impl Package {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            package_type: None,
        }
    }

    /// Canonical string form, `"<name> <version>"` plus the type qualifier
    /// when present. Used both for display and for identity hashing.
    pub fn canonical(&self) -> String {
        match &self.package_type {
            Some(t) => format!("{} {} {}", self.name, self.version, t),
            None => format!("{} {}", self.name, self.version),
        }
    }
}
