use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::errors::ParserError;
use crate::models::{Priority, ScanInfo, Vulnerability};

/// Receives normalized vulnerability records. The engine calls `start` exactly
/// once per non-skipped finding and always calls `complete` before the next
/// finding is processed; `finish` closes out the sink after the run.
pub trait VulnerabilitySink {
    fn start(&mut self, instance_id: &str) -> VulnerabilityBuilder {
        VulnerabilityBuilder::new(instance_id)
    }

    fn complete(&mut self, builder: VulnerabilityBuilder) -> Result<(), ParserError>;

    fn finish(&mut self) -> Result<(), ParserError> {
        Ok(())
    }
}

impl<S: VulnerabilitySink + ?Sized> VulnerabilitySink for &mut S {
    fn start(&mut self, instance_id: &str) -> VulnerabilityBuilder {
        (**self).start(instance_id)
    }

    fn complete(&mut self, builder: VulnerabilityBuilder) -> Result<(), ParserError> {
        (**self).complete(builder)
    }

    fn finish(&mut self) -> Result<(), ParserError> {
        (**self).finish()
    }
}

/// Accumulates one vulnerability record between `start` and `complete`.
/// Setters are typed slots over the closed attribute set.
#[derive(Debug, Clone)]
pub struct VulnerabilityBuilder {
    record: Vulnerability,
}

impl VulnerabilityBuilder {
    pub fn new(instance_id: &str) -> Self {
        Self {
            record: Vulnerability {
                instance_id: instance_id.to_string(),
                engine_type: String::new(),
                kingdom: String::new(),
                analyzer: String::new(),
                category: String::new(),
                sub_category: String::new(),
                priority: Priority::Medium,
                accuracy: 0.0,
                confidence: 0.0,
                likelihood: 0.0,
                vulnerability_abstract: String::new(),
                cve: String::new(),
                cve_url: String::new(),
                packages: String::new(),
                mapped_category: None,
                file_name: None,
                published_date: None,
                modified_date: None,
                cvss_score: None,
                cwe: None,
                access_vector: None,
                access_complexity: None,
                confidentiality_impact: None,
                integrity_impact: None,
                availability_impact: None,
            },
        }
    }

    pub fn instance_id(&self) -> &str {
        &self.record.instance_id
    }

    pub fn set_engine_type(&mut self, value: &str) {
        self.record.engine_type = value.to_string();
    }

    pub fn set_kingdom(&mut self, value: &str) {
        self.record.kingdom = value.to_string();
    }

    pub fn set_analyzer(&mut self, value: &str) {
        self.record.analyzer = value.to_string();
    }

    pub fn set_category(&mut self, value: &str) {
        self.record.category = value.to_string();
    }

    pub fn set_sub_category(&mut self, value: &str) {
        self.record.sub_category = value.to_string();
    }

    pub fn set_priority(&mut self, value: Priority) {
        self.record.priority = value;
    }

    pub fn set_accuracy(&mut self, value: f32) {
        self.record.accuracy = value;
    }

    pub fn set_confidence(&mut self, value: f32) {
        self.record.confidence = value;
    }

    pub fn set_likelihood(&mut self, value: f32) {
        self.record.likelihood = value;
    }

    pub fn set_vulnerability_abstract(&mut self, value: impl Into<String>) {
        self.record.vulnerability_abstract = value.into();
    }

    pub fn set_cve(&mut self, value: &str) {
        self.record.cve = value.to_string();
    }

    pub fn set_cve_url(&mut self, value: impl Into<String>) {
        self.record.cve_url = value.into();
    }

    pub fn set_packages(&mut self, value: impl Into<String>) {
        self.record.packages = value.into();
    }

    pub fn set_mapped_category(&mut self, value: impl Into<String>) {
        self.record.mapped_category = Some(value.into());
    }

    pub fn set_file_name(&mut self, value: impl Into<String>) {
        self.record.file_name = Some(value.into());
    }

    pub fn set_published_date(&mut self, value: DateTime<Utc>) {
        self.record.published_date = Some(value);
    }

    pub fn set_modified_date(&mut self, value: DateTime<Utc>) {
        self.record.modified_date = Some(value);
    }

    pub fn set_cvss_score(&mut self, value: f32) {
        self.record.cvss_score = Some(value);
    }

    pub fn set_cwe(&mut self, value: &str) {
        self.record.cwe = Some(value.to_string());
    }

    pub fn set_access_vector(&mut self, value: &str) {
        self.record.access_vector = Some(value.to_string());
    }

    pub fn set_access_complexity(&mut self, value: &str) {
        self.record.access_complexity = Some(value.to_string());
    }

    pub fn set_confidentiality_impact(&mut self, value: &str) {
        self.record.confidentiality_impact = Some(value.to_string());
    }

    pub fn set_integrity_impact(&mut self, value: &str) {
        self.record.integrity_impact = Some(value.to_string());
    }

    pub fn set_availability_impact(&mut self, value: &str) {
        self.record.availability_impact = Some(value.to_string());
    }

    pub fn build(self) -> Vulnerability {
        self.record
    }
}

impl From<Vulnerability> for VulnerabilityBuilder {
    fn from(record: Vulnerability) -> Self {
        Self { record }
    }
}

#[derive(Serialize)]
struct NormalizedReport<'a> {
    scan: &'a ScanInfo,
    vulnerabilities: &'a [Vulnerability],
}

/// Collects completed records and writes one JSON document on `finish`:
/// `{"scan": ..., "vulnerabilities": [...]}`.
pub struct JsonSink<W: Write> {
    writer: W,
    pretty: bool,
    scan: ScanInfo,
    vulnerabilities: Vec<Vulnerability>,
}

impl<W: Write> JsonSink<W> {
    pub fn new(writer: W, pretty: bool) -> Self {
        Self {
            writer,
            pretty,
            scan: ScanInfo::new(),
            vulnerabilities: Vec::new(),
        }
    }

    pub fn set_scan_info(&mut self, scan: ScanInfo) {
        self.scan = scan;
    }

    pub fn vulnerabilities(&self) -> &[Vulnerability] {
        &self.vulnerabilities
    }
}

impl<W: Write> VulnerabilitySink for JsonSink<W> {
    fn complete(&mut self, builder: VulnerabilityBuilder) -> Result<(), ParserError> {
        self.vulnerabilities.push(builder.build());
        Ok(())
    }

    fn finish(&mut self) -> Result<(), ParserError> {
        let report = NormalizedReport {
            scan: &self.scan,
            vulnerabilities: &self.vulnerabilities,
        };
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &report)?;
        } else {
            serde_json::to_writer(&mut self.writer, &report)?;
        }
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Counts completed records and discards them. Used by `validate`.
#[derive(Debug, Default)]
pub struct NullSink {
    completed: u64,
}

impl NullSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn completed(&self) -> u64 {
        self.completed
    }
}

impl VulnerabilitySink for NullSink {
    fn complete(&mut self, _builder: VulnerabilityBuilder) -> Result<(), ParserError> {
        self.completed += 1;
        Ok(())
    }
}
