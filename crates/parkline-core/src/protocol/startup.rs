use std::fmt;

use serde::Serialize;

use super::debug::{DebugBlock, parse_debug_block};
use super::error::DecodeError;
use super::firmware::FirmwareVersion;
use super::layout;
use super::reader::UplinkReader;

/// Cause of the most recent reset, as reported in startup uplinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ResetReason {
    Watchdog,
    #[serde(rename = "Power On")]
    PowerOn,
    #[serde(rename = "System Request")]
    SystemRequest,
    #[serde(rename = "External Pin")]
    ExternalPin,
    Lockup,
    Brownout,
    Others,
    Unknown,
}

impl ResetReason {
    pub fn from_raw(value: u8) -> Self {
        match value {
            1 => Self::Watchdog,
            2 => Self::PowerOn,
            3 => Self::SystemRequest,
            4 => Self::ExternalPin,
            5 => Self::Lockup,
            6 => Self::Brownout,
            7 => Self::Others,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Watchdog => "Watchdog",
            Self::PowerOn => "Power On",
            Self::SystemRequest => "System Request",
            Self::ExternalPin => "External Pin",
            Self::Lockup => "Lockup",
            Self::Brownout => "Brownout",
            Self::Others => "Others",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ResetReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Startup uplink (port 3).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Startup {
    #[serde(flatten)]
    pub debug: DebugBlock,
    pub firmware_version: FirmwareVersion,
    pub reset_reason: ResetReason,
    pub occupied: bool,
}

pub fn parse_startup(payload: &[u8]) -> Result<Startup, DecodeError> {
    let reader = UplinkReader::new(payload);
    reader.require_len(layout::STARTUP_MIN_LEN)?;

    let debug = parse_debug_block(reader.read_slice(layout::STARTUP_DEBUG_RANGE)?)?;
    let firmware_version =
        FirmwareVersion::from(reader.read_array::<3>(layout::STARTUP_FIRMWARE_RANGE)?);
    let reset_reason = ResetReason::from_raw(reader.read_u8(layout::STARTUP_RESET_REASON_OFFSET)?);
    // Upper seven bits are reserved.
    let occupied = (reader.read_u8(layout::STARTUP_OCCUPANCY_OFFSET)?
        & layout::STARTUP_OCCUPANCY_MASK)
        == layout::STARTUP_OCCUPANCY_MASK;

    Ok(Startup {
        debug,
        firmware_version,
        reset_reason,
        occupied,
    })
}
