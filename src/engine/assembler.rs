use tracing::debug;

use crate::engine::evidence::{format_cwe, format_packages, DISPLAY_DELIMITER};
use crate::engine::identity::compute_instance_id;
use crate::engine::severity::classify;
use crate::errors::ParserError;
use crate::models::FindingRecord;
use crate::sink::VulnerabilitySink;

pub const ENGINE_TYPE: &str = "TENABLE-IO-CS";
pub const KINGDOM: &str = "Environment";
pub const ANALYZER: &str = "Configuration";
pub const CATEGORY: &str = "Insecure Deployment";
pub const CVE_URL_BASE: &str = "https://nvd.nist.gov/vuln/detail/";

// Mandatory builder values recommended by the import API.
const ACCURACY: f32 = 5.0;
const CONFIDENCE: f32 = 2.5;
const LIKELIHOOD: f32 = 2.5;

/// Turns finding records into vulnerability records: validates, computes the
/// instance id, classifies priority, formats evidence and submits exactly one
/// record per valid finding. Stateless apart from counters; the same finding
/// always produces the same record regardless of submission order.
#[derive(Debug, Default)]
pub struct VulnerabilityAssembler {
    submitted: u64,
    skipped: u64,
}

impl VulnerabilityAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submitted(&self) -> u64 {
        self.submitted
    }

    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    /// Assembles one finding. A finding without a CVE is silently skipped;
    /// any sink failure aborts the run.
    pub fn assemble<S: VulnerabilitySink>(
        &mut self,
        finding: &FindingRecord,
        sink: &mut S,
    ) -> Result<(), ParserError> {
        if !finding.has_cve() {
            debug!("Skipping finding without CVE identifier");
            self.skipped += 1;
            return Ok(());
        }
        let nvd = &finding.nvd_finding;
        let cve = nvd.cve.as_deref().unwrap_or_default().trim();

        let instance_id = compute_instance_id(finding);
        let mut vb = sink.start(&instance_id);

        vb.set_engine_type(ENGINE_TYPE);
        vb.set_kingdom(KINGDOM);
        vb.set_analyzer(ANALYZER);
        vb.set_category(CATEGORY);
        vb.set_sub_category(cve);
        vb.set_accuracy(ACCURACY);
        vb.set_confidence(CONFIDENCE);
        vb.set_likelihood(LIKELIHOOD);

        vb.set_cve(cve);
        vb.set_cve_url(format!("{CVE_URL_BASE}{cve}"));
        if let Some(date) = nvd.published_date {
            vb.set_published_date(date);
        }
        if let Some(date) = nvd.modified_date {
            vb.set_modified_date(date);
        }

        if let Some(pkg) = finding.packages.first() {
            vb.set_file_name(pkg.canonical());
        }
        vb.set_packages(format_packages(&finding.packages, DISPLAY_DELIMITER));
        vb.set_vulnerability_abstract(nvd.description.clone().unwrap_or_default());

        vb.set_priority(classify(nvd.cvss_score));
        if let Some(score) = nvd.cvss_score {
            vb.set_cvss_score(score);
        }

        if let Some(cwe) = nvd.cwe.as_deref().filter(|c| !c.trim().is_empty()) {
            vb.set_mapped_category(format_cwe(cwe));
            vb.set_cwe(cwe);
        }

        if let Some(value) = nvd.access_vector.as_deref() {
            vb.set_access_vector(value);
        }
        if let Some(value) = nvd.access_complexity.as_deref() {
            vb.set_access_complexity(value);
        }
        if let Some(value) = nvd.confidentiality_impact.as_deref() {
            vb.set_confidentiality_impact(value);
        }
        if let Some(value) = nvd.integrity_impact.as_deref() {
            vb.set_integrity_impact(value);
        }
        if let Some(value) = nvd.availability_impact.as_deref() {
            vb.set_availability_impact(value);
        }

        sink.complete(vb)?;
        self.submitted += 1;
        Ok(())
    }
}
