use serde::Serialize;

use super::error::DecodeError;
use super::layout;
use super::reader::UplinkReader;

/// Device usage uplink (port 5), selected by the first byte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DeviceUsage {
    ParkingStatusChanges { parking_status_changes: u32 },
    TimeInOccupiedState { time_in_occupied_state_seconds: u32 },
    UplinkMessagesSent { uplink_messages_sent: UplinkCounts },
    RadarTriggers { times_radar_triggered: u32 },
    TimeSinceRestart { time_since_restart_seconds: u32 },
    ResetsSinceInstall { resets_since_install: ResetCounts },
    TimeSinceInstall { time_since_install: u32 },
    Unrecognized,
}

impl DeviceUsage {
    pub fn label(&self) -> Option<&'static str> {
        let label = match self {
            Self::ParkingStatusChanges { .. } => "Number of parking status changes detected",
            Self::TimeInOccupiedState { .. } => "Time running in occupied state",
            Self::UplinkMessagesSent { .. } => "Number of uplink messages sent",
            Self::RadarTriggers { .. } => "Number of times the radar has been triggered",
            Self::TimeSinceRestart { .. } => "Time running since restart",
            Self::ResetsSinceInstall { .. } => "Number of resets since installation",
            Self::TimeSinceInstall { .. } => "Time running since installation",
            Self::Unrecognized => return None,
        };
        Some(label)
    }
}

/// Uplinks sent per data rate / spreading factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UplinkCounts {
    pub dr5_sf7: u32,
    pub dr4_sf8: u32,
    pub dr3_sf9: u32,
    pub dr2_sf10: u32,
    pub dr1_sf11: u32,
    pub dr0_sf12: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResetCounts {
    pub software_requested: u16,
    pub watchdog: u8,
    pub power_on: u8,
    pub external_pin: u8,
    pub lockup: u8,
    pub brown_out: u8,
}

pub fn parse_device_usage(payload: &[u8]) -> Result<DeviceUsage, DecodeError> {
    let reader = UplinkReader::new(payload);
    let usage = match reader.read_u8(layout::USAGE_SELECTOR_OFFSET)? {
        layout::USAGE_PARKING_STATUS_CHANGES => DeviceUsage::ParkingStatusChanges {
            parking_status_changes: read_counter(&reader)?,
        },
        layout::USAGE_TIME_IN_OCCUPIED_STATE => DeviceUsage::TimeInOccupiedState {
            time_in_occupied_state_seconds: read_counter(&reader)?,
        },
        layout::USAGE_UPLINK_MESSAGES_SENT => DeviceUsage::UplinkMessagesSent {
            uplink_messages_sent: read_uplink_counts(&reader)?,
        },
        layout::USAGE_RADAR_TRIGGERS => DeviceUsage::RadarTriggers {
            times_radar_triggered: read_counter(&reader)?,
        },
        layout::USAGE_TIME_SINCE_RESTART => DeviceUsage::TimeSinceRestart {
            time_since_restart_seconds: read_counter(&reader)?,
        },
        layout::USAGE_RESETS_SINCE_INSTALL => DeviceUsage::ResetsSinceInstall {
            resets_since_install: read_reset_counts(&reader)?,
        },
        layout::USAGE_TIME_SINCE_INSTALL => DeviceUsage::TimeSinceInstall {
            time_since_install: read_counter(&reader)?,
        },
        _ => DeviceUsage::Unrecognized,
    };
    Ok(usage)
}

fn read_counter(reader: &UplinkReader<'_>) -> Result<u32, DecodeError> {
    reader.require_len(layout::USAGE_COUNTER_MIN_LEN)?;
    reader.read_u32_be(layout::USAGE_COUNTER_RANGE)
}

fn read_uplink_counts(reader: &UplinkReader<'_>) -> Result<UplinkCounts, DecodeError> {
    reader.require_len(layout::UPLINKS_MIN_LEN)?;
    Ok(UplinkCounts {
        dr5_sf7: reader.read_u24_be(layout::UPLINKS_DR5_SF7)?,
        dr4_sf8: reader.read_u24_be(layout::UPLINKS_DR4_SF8)?,
        dr3_sf9: reader.read_u24_be(layout::UPLINKS_DR3_SF9)?,
        dr2_sf10: reader.read_u24_be(layout::UPLINKS_DR2_SF10)?,
        dr1_sf11: reader.read_u24_be(layout::UPLINKS_DR1_SF11)?,
        dr0_sf12: reader.read_u24_be(layout::UPLINKS_DR0_SF12)?,
    })
}

fn read_reset_counts(reader: &UplinkReader<'_>) -> Result<ResetCounts, DecodeError> {
    reader.require_len(layout::RESETS_MIN_LEN)?;
    Ok(ResetCounts {
        software_requested: reader.read_u16_le(layout::RESETS_SOFTWARE_RANGE)?,
        watchdog: reader.read_u8(layout::RESETS_WATCHDOG_OFFSET)?,
        power_on: reader.read_u8(layout::RESETS_POWER_ON_OFFSET)?,
        external_pin: reader.read_u8(layout::RESETS_EXTERNAL_PIN_OFFSET)?,
        lockup: reader.read_u8(layout::RESETS_LOCKUP_OFFSET)?,
        brown_out: reader.read_u8(layout::RESETS_BROWN_OUT_OFFSET)?,
    })
}
