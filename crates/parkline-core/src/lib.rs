//! Parkline core library: uplink decoding for radar parking-lot sensors.
//!
//! The sensors report over LoRaWAN. Each uplink is a short fixed-layout byte
//! sequence whose schema is selected by the frame port. This crate turns
//! `(bytes, port)` into a typed [`DecodedRecord`] and, on top of that, runs
//! an offline analysis over uplink logs exported from a network server.
//! Decoding is byte-oriented and side-effect free; all I/O is isolated in
//! `source` modules. Offsets live in `protocol::layout` so parsers never
//! index bytes directly.
//!
//! Invariants:
//! - Field presence is fully determined by the port and, for ports 4 and 5,
//!   by the payload length or first byte.
//! - Unknown ports decode to an `Unknown` record; short payloads for known
//!   ports fail with [`DecodeError::OutOfRange`] and never yield a partial
//!   record.
//! - Report outputs are deterministic and stable across runs.
//!
//! # Examples
//! ```
//! use parkline_core::decode;
//!
//! let record = decode(&[0x01, 0xFB], 1)?;
//! assert_eq!(record.packet_type, "Status");
//! let json = serde_json::to_value(&record)?;
//! assert_eq!(json["occupied"], true);
//! assert_eq!(json["temperature"], -5);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Serialize;
use tracing::debug;

mod analysis;
mod protocol;
mod source;

pub use analysis::{AnalysisError, analyze_source, analyze_uplink_log};
pub use protocol::debug::DebugBlock;
pub use protocol::device_info::{BandExtension, DeviceInformation, ProductClass, ProductCode};
pub use protocol::device_usage::{DeviceUsage, ResetCounts, UplinkCounts};
pub use protocol::diagnostics::{DIAGNOSTIC_CODES, describe_diagnostic};
pub use protocol::error::DecodeError;
pub use protocol::firmware::FirmwareVersion;
pub use protocol::startup::{ResetReason, Startup};
pub use protocol::status::{Occupancy, TemperatureAlert};
pub use protocol::{Uplink, parse_uplink};
pub use source::{JsonLinesSource, SourceError, UplinkEvent, UplinkSource};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;
/// Default timestamp used when no uplink carries a reception time.
pub const DEFAULT_GENERATED_AT: &str = "1970-01-01T00:00:00Z";

/// Result of decoding one uplink.
///
/// Serializes as a flat JSON object: `bytes`, `port` and `packet_type`,
/// followed by the fields of the decoded variant.
///
/// # Examples
/// ```
/// use parkline_core::{Uplink, decode};
///
/// let record = decode(&[0xAA], 42)?;
/// assert_eq!(record.uplink, Uplink::Unknown);
/// let json = serde_json::to_value(&record)?;
/// assert_eq!(
///     json,
///     serde_json::json!({"bytes": [170], "port": 42, "packet_type": "Unknown"})
/// );
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedRecord {
    /// Raw payload as received.
    pub bytes: Vec<u8>,
    /// LoRaWAN frame port.
    pub port: u8,
    /// Human-readable packet type, e.g. `"Device Usage - Time running since restart"`.
    pub packet_type: String,
    #[serde(flatten)]
    pub uplink: Uplink,
}

/// Decode an uplink payload received on `port`.
pub fn decode(bytes: &[u8], port: u8) -> Result<DecodedRecord, DecodeError> {
    let uplink = parse_uplink(bytes, port)?;
    let packet_type = uplink.packet_type();
    debug!(port, len = bytes.len(), packet_type = %packet_type, "decoded uplink");
    Ok(DecodedRecord {
        bytes: bytes.to_vec(),
        port,
        packet_type,
        uplink,
    })
}

/// Decode a hex-encoded payload (`"0117"`).
///
/// # Examples
/// ```
/// use parkline_core::decode_hex;
///
/// let record = decode_hex("010203", 4)?;
/// assert_eq!(record.packet_type, "Device Information - Firmware version");
/// # Ok::<(), parkline_core::DecodeError>(())
/// ```
pub fn decode_hex(payload: &str, port: u8) -> Result<DecodedRecord, DecodeError> {
    let bytes = hex::decode(payload.trim())?;
    decode(&bytes, port)
}

/// Decode a base64-encoded payload, as delivered by LoRaWAN network servers.
pub fn decode_base64(payload: &str, port: u8) -> Result<DecodedRecord, DecodeError> {
    let bytes = BASE64.decode(payload.trim())?;
    decode(&bytes, port)
}

/// Aggregated uplink-log report with deterministic ordering.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    /// Tool identification metadata.
    pub tool: ToolInfo,
    /// RFC3339 timestamp: the latest reception time found in the log.
    pub generated_at: String,
    /// Input log metadata.
    pub input: InputInfo,
    pub summary: LogSummary,
    /// Per packet type counts, sorted by packet type.
    pub packet_types: Vec<PacketTypeCount>,
    /// Decoded uplinks in input order.
    pub records: Vec<RecordEntry>,
    /// Uplinks that could not be decoded, in input order.
    pub failures: Vec<FailureEntry>,
}

/// Tool metadata embedded in reports.
///
/// # Examples
/// ```
/// use parkline_core::ToolInfo;
///
/// let tool = ToolInfo {
///     name: "parkline".to_string(),
///     version: "0.1.0".to_string(),
/// };
/// assert_eq!(tool.name, "parkline");
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ToolInfo {
    pub name: String,
    /// Tool version (semver).
    pub version: String,
}

/// Input log metadata embedded in reports.
#[derive(Debug, Clone, Serialize)]
pub struct InputInfo {
    /// Input path as provided to the analyzer.
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LogSummary {
    pub uplinks_total: u64,
    pub decoded: u64,
    pub failed: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PacketTypeCount {
    pub packet_type: String,
    pub count: u64,
}

/// A decoded uplink together with its log context.
#[derive(Debug, Clone, Serialize)]
pub struct RecordEntry {
    /// 1-based line number in the input log.
    pub line: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dev_eui: Option<String>,
    pub record: DecodedRecord,
}

/// An uplink that failed to decode.
#[derive(Debug, Clone, Serialize)]
pub struct FailureEntry {
    pub line: u64,
    pub port: u8,
    pub message: String,
}

/// Build a stub report with base fields filled and empty aggregates.
///
/// # Examples
/// ```
/// use parkline_core::make_stub_report;
///
/// let report = make_stub_report("uplinks.jsonl", 123);
/// assert_eq!(report.report_version, parkline_core::REPORT_VERSION);
/// assert!(report.records.is_empty());
/// ```
pub fn make_stub_report(input_path: &str, input_bytes: u64) -> Report {
    Report {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "parkline".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        generated_at: DEFAULT_GENERATED_AT.to_string(),
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
        },
        summary: LogSummary::default(),
        packet_types: vec![],
        records: vec![],
        failures: vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_flattens_variant_fields() {
        let record = decode(&[0x01, 0x80], 2).unwrap();
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "bytes": [1, 128],
                "port": 2,
                "packet_type": "Heartbeat",
                "occupied": true,
                "temperature": -128
            })
        );
    }

    #[test]
    fn debug_record_omits_missing_description() {
        let payload = [0, 0, 0, 1, 0, 0, 0x0F, 0xFF, 0, 1];
        let value = serde_json::to_value(decode(&payload, 6).unwrap()).unwrap();
        assert_eq!(value["debug_code"], 4095);
        assert!(value.get("debug_code_description").is_none());
        assert_eq!(value["timestamp"], 1);
        assert_eq!(value["sequence_number"], 1);
    }

    #[test]
    fn unrecognized_usage_has_no_extra_fields() {
        let value = serde_json::to_value(decode(&[9, 9], 5).unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"bytes": [9, 9], "port": 5, "packet_type": "Device Usage"})
        );
    }

    #[test]
    fn decode_hex_and_base64_agree() {
        let from_hex = decode_hex("0117", 1).unwrap();
        let from_base64 = decode_base64("ARc=", 1).unwrap();
        assert_eq!(from_hex, from_base64);
        assert_eq!(from_hex.bytes, vec![0x01, 0x17]);
    }

    #[test]
    fn decode_hex_rejects_garbage() {
        assert!(matches!(decode_hex("zz", 1), Err(DecodeError::Hex(_))));
        assert!(matches!(decode_base64("!!", 1), Err(DecodeError::Base64(_))));
    }

    #[test]
    fn report_omits_optional_fields_when_none() {
        let mut report = make_stub_report("uplinks.jsonl", 1);
        report.records.push(RecordEntry {
            line: 1,
            received_at: None,
            dev_eui: None,
            record: decode(&[0, 0], 1).unwrap(),
        });

        let value = serde_json::to_value(&report).expect("report json");
        let entry = &value["records"][0];
        assert!(entry.get("received_at").is_none());
        assert!(entry.get("dev_eui").is_none());
        assert_eq!(entry["record"]["packet_type"], "Status");
        assert_eq!(value["tool"]["name"], "parkline");
    }
}
