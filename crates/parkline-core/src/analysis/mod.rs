use std::collections::BTreeMap;
use std::path::Path;

use thiserror::Error;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tracing::{debug, warn};

use crate::source::{JsonLinesSource, SourceError, UplinkEvent, UplinkSource};
use crate::{
    DEFAULT_GENERATED_AT, FailureEntry, PacketTypeCount, RecordEntry, Report, decode,
    make_stub_report,
};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
}

pub fn analyze_uplink_log(path: &Path) -> Result<Report, AnalysisError> {
    let source = JsonLinesSource::open(path)?;
    analyze_source(path, source)
}

pub fn analyze_source<S: UplinkSource>(
    path: &Path,
    mut source: S,
) -> Result<Report, AnalysisError> {
    let mut report = make_stub_report(&path.display().to_string(), path.metadata()?.len());
    let mut packet_types: BTreeMap<String, u64> = BTreeMap::new();
    let mut latest: Option<OffsetDateTime> = None;

    while let Some(event) = source.next_uplink()? {
        report.summary.uplinks_total += 1;
        update_latest(&mut latest, event.received_at.as_deref());
        let UplinkEvent {
            line,
            port,
            payload,
            received_at,
            dev_eui,
        } = event;

        match decode(&payload, port) {
            Ok(record) => {
                report.summary.decoded += 1;
                *packet_types.entry(record.packet_type.clone()).or_default() += 1;
                report.records.push(RecordEntry {
                    line,
                    received_at,
                    dev_eui,
                    record,
                });
            }
            Err(err) => {
                warn!(line, port, error = %err, "uplink failed to decode");
                report.summary.failed += 1;
                report.failures.push(FailureEntry {
                    line,
                    port,
                    message: err.to_string(),
                });
            }
        }
    }

    report.packet_types = packet_types
        .into_iter()
        .map(|(packet_type, count)| PacketTypeCount { packet_type, count })
        .collect();
    report.generated_at = latest
        .and_then(|ts| ts.format(&Rfc3339).ok())
        .unwrap_or_else(|| DEFAULT_GENERATED_AT.to_string());
    Ok(report)
}

fn update_latest(latest: &mut Option<OffsetDateTime>, received_at: Option<&str>) {
    let Some(raw) = received_at else {
        return;
    };
    let ts = match OffsetDateTime::parse(raw, &Rfc3339) {
        Ok(ts) => ts,
        Err(err) => {
            debug!(received_at = raw, error = %err, "ignoring unparsable reception time");
            return;
        }
    };
    if latest.is_none_or(|existing| ts > existing) {
        *latest = Some(ts);
    }
}
