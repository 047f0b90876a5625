//! JSON Lines uplink log source.
//!
//! Each non-blank line holds one uplink as exported by the network server:
//! `{"f_port": 1, "frm_payload": "ARc=", "received_at": "...", "dev_eui": "..."}`.
//! `received_at` and `dev_eui` are optional.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines, Read};
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;

use super::{SourceError, UplinkEvent, UplinkSource};

#[derive(Debug, Deserialize)]
struct UplinkLine {
    f_port: u8,
    frm_payload: String,
    #[serde(default)]
    received_at: Option<String>,
    #[serde(default)]
    dev_eui: Option<String>,
}

pub struct JsonLinesSource<R> {
    lines: Lines<BufReader<R>>,
    line: u64,
}

impl JsonLinesSource<File> {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path)?;
        Ok(Self::new(file))
    }
}

impl<R: Read> JsonLinesSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: BufReader::new(reader).lines(),
            line: 0,
        }
    }
}

impl<R: Read> UplinkSource for JsonLinesSource<R> {
    fn next_uplink(&mut self) -> Result<Option<UplinkEvent>, SourceError> {
        for text in self.lines.by_ref() {
            let text = text?;
            self.line += 1;
            if text.trim().is_empty() {
                continue;
            }
            let line = self.line;
            let uplink: UplinkLine =
                serde_json::from_str(&text).map_err(|e| SourceError::Json {
                    line,
                    message: e.to_string(),
                })?;
            let payload = BASE64
                .decode(uplink.frm_payload.trim())
                .map_err(|e| SourceError::Payload {
                    line,
                    message: e.to_string(),
                })?;
            return Ok(Some(UplinkEvent {
                line,
                port: uplink.f_port,
                payload,
                received_at: uplink.received_at,
                dev_eui: uplink.dev_eui,
            }));
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::JsonLinesSource;
    use crate::source::{SourceError, UplinkSource};

    #[test]
    fn reads_uplinks_and_skips_blank_lines() {
        let log = concat!(
            "{\"f_port\": 1, \"frm_payload\": \"ARc=\", \"received_at\": \"2024-05-01T10:00:00Z\"}\n",
            "\n",
            "   \n",
            "{\"f_port\": 7, \"frm_payload\": \"gg==\", \"dev_eui\": \"fcd6bd0000000001\"}\n",
        );
        let mut source = JsonLinesSource::new(log.as_bytes());

        let first = source.next_uplink().unwrap().unwrap();
        assert_eq!(first.line, 1);
        assert_eq!(first.port, 1);
        assert_eq!(first.payload, vec![0x01, 0x17]);
        assert_eq!(first.received_at.as_deref(), Some("2024-05-01T10:00:00Z"));
        assert_eq!(first.dev_eui, None);

        let second = source.next_uplink().unwrap().unwrap();
        assert_eq!(second.line, 4);
        assert_eq!(second.port, 7);
        assert_eq!(second.payload, vec![0x82]);
        assert_eq!(second.dev_eui.as_deref(), Some("fcd6bd0000000001"));

        assert!(source.next_uplink().unwrap().is_none());
    }

    #[test]
    fn malformed_json_names_line() {
        let log = "{\"f_port\": 1, \"frm_payload\": \"AQ==\"}\n{not json}\n";
        let mut source = JsonLinesSource::new(log.as_bytes());
        assert!(source.next_uplink().unwrap().is_some());
        let err = source.next_uplink().unwrap_err();
        assert!(matches!(err, SourceError::Json { line: 2, .. }));
    }

    #[test]
    fn invalid_base64_is_rejected() {
        let log = "{\"f_port\": 1, \"frm_payload\": \"***\"}\n";
        let mut source = JsonLinesSource::new(log.as_bytes());
        let err = source.next_uplink().unwrap_err();
        assert!(matches!(err, SourceError::Payload { line: 1, .. }));
        assert!(err.to_string().contains("invalid frm_payload on line 1"));
    }

    #[test]
    fn port_out_of_range_is_rejected() {
        let log = "{\"f_port\": 300, \"frm_payload\": \"AQ==\"}\n";
        let mut source = JsonLinesSource::new(log.as_bytes());
        assert!(matches!(
            source.next_uplink(),
            Err(SourceError::Json { line: 1, .. })
        ));
    }
}
