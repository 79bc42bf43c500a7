//! Single-pass streaming decode of a Tenable.io CS scan report.
//!
//! The top-level object is walked exactly once: the four scan-metadata fields
//! are captured, `installed_packages` is counted without materializing its
//! entries, and each record under `findings` is decoded and handed to the
//! caller's handler before the next one is read. Unknown keys are skipped.

use std::fmt;
use std::io::Read;

use chrono::{DateTime, Utc};
use serde::de::{DeserializeSeed, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::Deserializer;
use tracing::trace;

use crate::errors::ParserError;
use crate::models::{FindingRecord, ScanInfo};

/// Decodes the report from `reader`, invoking `handler` once per finding
/// record in document order. Returns the scan metadata on success. A
/// malformed document or a handler failure aborts the whole run; the
/// handler's own error takes precedence over the decode error used to stop
/// the parse.
pub fn parse_report<R, F>(reader: R, mut handler: F) -> Result<ScanInfo, ParserError>
where
    R: Read,
    F: FnMut(&FindingRecord) -> Result<(), ParserError>,
{
    let mut info = ScanInfo::new();
    let mut failure: Option<ParserError> = None;

    let mut de = serde_json::Deserializer::from_reader(reader);
    let seed = ReportSeed {
        info: &mut info,
        handler: &mut handler,
        failure: &mut failure,
    };
    let outcome = seed.deserialize(&mut de).and_then(|()| de.end());

    if let Some(err) = failure {
        return Err(err);
    }
    outcome.map_err(|e| ParserError::Decode(e.to_string()))?;
    Ok(info)
}

struct ReportSeed<'a, F> {
    info: &'a mut ScanInfo,
    handler: &'a mut F,
    failure: &'a mut Option<ParserError>,
}

impl<'de, F> DeserializeSeed<'de> for ReportSeed<'_, F>
where
    F: FnMut(&FindingRecord) -> Result<(), ParserError>,
{
    type Value = ();

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<(), D::Error> {
        deserializer.deserialize_map(self)
    }
}

impl<'de, F> Visitor<'de> for ReportSeed<'_, F>
where
    F: FnMut(&FindingRecord) -> Result<(), ParserError>,
{
    type Value = ();

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a scan report object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<(), A::Error> {
        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "updated_at" => {
                    self.info.scan_date = map.next_value::<Option<DateTime<Utc>>>()?;
                }
                "image_name" => {
                    self.info.build_id = map.next_value::<Option<String>>()?;
                }
                "tag" => {
                    self.info.scan_label = map.next_value::<Option<String>>()?;
                }
                "installed_packages" => {
                    self.info.num_files = Some(map.next_value_seed(CountEntries)?);
                }
                "findings" => {
                    map.next_value_seed(FindingsSeed {
                        handler: &mut *self.handler,
                        failure: &mut *self.failure,
                    })?;
                }
                _ => {
                    trace!(key = %key, "Skipping unhandled report key");
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(())
    }
}

/// Counts array entries without materializing them. A `null` counts as zero.
struct CountEntries;

impl<'de> DeserializeSeed<'de> for CountEntries {
    type Value = u64;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<u64, D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for CountEntries {
    type Value = u64;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an array or null")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<u64, A::Error> {
        let mut count = 0;
        while seq.next_element::<IgnoredAny>()?.is_some() {
            count += 1;
        }
        Ok(count)
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<u64, E> {
        Ok(0)
    }
}

struct FindingsSeed<'a, F> {
    handler: &'a mut F,
    failure: &'a mut Option<ParserError>,
}

impl<'de, F> DeserializeSeed<'de> for FindingsSeed<'_, F>
where
    F: FnMut(&FindingRecord) -> Result<(), ParserError>,
{
    type Value = ();

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<(), D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de, F> Visitor<'de> for FindingsSeed<'_, F>
where
    F: FnMut(&FindingRecord) -> Result<(), ParserError>,
{
    type Value = ();

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a findings array or null")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<(), A::Error> {
        while let Some(finding) = seq.next_element::<FindingRecord>()? {
            if let Err(err) = (self.handler)(&finding) {
                *self.failure = Some(err);
                return Err(serde::de::Error::custom("finding handler failed"));
            }
        }
        Ok(())
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<(), E> {
        Ok(())
    }
}
