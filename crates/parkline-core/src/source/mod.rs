mod jsonl;

pub use jsonl::JsonLinesSource;

use thiserror::Error;

/// One uplink read from a log, before decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UplinkEvent {
    /// 1-based line number in the log.
    pub line: u64,
    pub port: u8,
    pub payload: Vec<u8>,
    pub received_at: Option<String>,
    pub dev_eui: Option<String>,
}

pub trait UplinkSource {
    fn next_uplink(&mut self) -> Result<Option<UplinkEvent>, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid uplink on line {line}: {message}")]
    Json { line: u64, message: String },
    #[error("invalid frm_payload on line {line}: {message}")]
    Payload { line: u64, message: String },
}
