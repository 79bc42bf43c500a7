use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tracing::debug;

use crate::errors::ParserError;
use crate::models::Vulnerability;
use crate::sink::{VulnerabilityBuilder, VulnerabilitySink};

/// Sink wrapper resolving instance id collisions within a single run.
///
/// Records are buffered per instance id; when two findings compute the same
/// id, the record with the higher priority wins and on equal priority the
/// first-seen record is kept. `flush` delivers exactly one record per
/// distinct id to the inner sink, in first-seen order. State lives for one
/// run and is discarded with the wrapper.
pub struct DedupSink<S> {
    inner: S,
    seen: HashMap<String, usize>,
    records: Vec<Vulnerability>,
    merged: u64,
}

impl<S: VulnerabilitySink> DedupSink<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            seen: HashMap::new(),
            records: Vec::new(),
            merged: 0,
        }
    }

    pub fn merged(&self) -> u64 {
        self.merged
    }

    /// Delivers the resolved records to the inner sink and returns it.
    pub fn flush(mut self) -> Result<S, ParserError> {
        for record in self.records.drain(..) {
            self.inner.complete(VulnerabilityBuilder::from(record))?;
        }
        Ok(self.inner)
    }
}

impl<S: VulnerabilitySink> VulnerabilitySink for DedupSink<S> {
    fn complete(&mut self, builder: VulnerabilityBuilder) -> Result<(), ParserError> {
        let record = builder.build();
        match self.seen.entry(record.instance_id.clone()) {
            Entry::Vacant(e) => {
                e.insert(self.records.len());
                self.records.push(record);
            }
            Entry::Occupied(e) => {
                self.merged += 1;
                let existing = &mut self.records[*e.get()];
                debug!(instance_id = %record.instance_id, "Merging duplicate instance id");
                if record.priority.rank() > existing.priority.rank() {
                    *existing = record;
                }
            }
        }
        Ok(())
    }
}
