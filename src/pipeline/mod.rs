pub mod state;

pub use state::{RunReport, RunStatus};

use std::io::Read;

use tracing::info;

use crate::engine::{DedupSink, VulnerabilityAssembler};
use crate::errors::ParserError;
use crate::parser::parse_report;
use crate::sink::VulnerabilitySink;

/// One parse run: decodes a report, assembles each finding and resolves
/// duplicate instance ids before records reach `sink`. The caller keeps
/// ownership of the sink and finalizes it (`finish`) itself.
pub struct ParseRun {
    status: RunStatus,
}

impl ParseRun {
    pub fn new() -> Self {
        Self {
            status: RunStatus::NotStarted,
        }
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    /// Processes the whole document, one finding at a time. Completes only
    /// after every finding has been offered to the assembler; decode and sink
    /// failures abort the run.
    pub fn execute<R, S>(&mut self, reader: R, sink: &mut S) -> Result<RunReport, ParserError>
    where
        R: Read,
        S: VulnerabilitySink,
    {
        self.status = RunStatus::Parsing;

        let mut assembler = VulnerabilityAssembler::new();
        let mut dedup = DedupSink::new(&mut *sink);
        let mut findings_seen = 0u64;

        let scan = parse_report(reader, |finding| {
            findings_seen += 1;
            assembler.assemble(finding, &mut dedup)
        })?;

        let merged = dedup.merged();
        dedup.flush()?;
        self.status = RunStatus::Completed;

        let report = RunReport {
            scan,
            findings_seen,
            submitted: assembler.submitted(),
            skipped: assembler.skipped(),
            merged,
        };
        info!(
            findings = report.findings_seen,
            delivered = report.delivered(),
            skipped = report.skipped,
            merged = report.merged,
            "Parse run completed"
        );
        Ok(report)
    }
}

impl Default for ParseRun {
    fn default() -> Self {
        Self::new()
    }
}
