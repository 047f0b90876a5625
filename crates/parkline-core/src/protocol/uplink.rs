use serde::Serialize;
use tracing::debug;

use super::debug::{DebugBlock, parse_debug_block};
use super::device_info::{DeviceInformation, parse_device_information};
use super::device_usage::{DeviceUsage, parse_device_usage};
use super::error::DecodeError;
use super::layout;
use super::startup::{Startup, parse_startup};
use super::status::{Occupancy, TemperatureAlert, parse_occupancy, parse_temperature_alert};

/// Decoded uplink, one variant per port.
///
/// Serializes without a tag: the variant's fields are meant to be flattened
/// into the enclosing record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Uplink {
    Status(Occupancy),
    Heartbeat(Occupancy),
    Startup(Startup),
    DeviceInformation(DeviceInformation),
    DeviceUsage(DeviceUsage),
    Debug(DebugBlock),
    TemperatureAlert(TemperatureAlert),
    Unknown,
}

impl Uplink {
    /// Packet type label, including the sub-variant suffix for ports 4 and 5.
    pub fn packet_type(&self) -> String {
        let (base, suffix) = match self {
            Self::Status(_) => ("Status", None),
            Self::Heartbeat(_) => ("Heartbeat", None),
            Self::Startup(_) => ("Startup", None),
            Self::DeviceInformation(info) => ("Device Information", info.label()),
            Self::DeviceUsage(usage) => ("Device Usage", usage.label()),
            Self::Debug(_) => ("Debug", None),
            Self::TemperatureAlert(_) => ("Temperature alert", None),
            Self::Unknown => ("Unknown", None),
        };
        match suffix {
            Some(suffix) => format!("{base} - {suffix}"),
            None => base.to_string(),
        }
    }
}

/// Decode `payload` according to the layout registered for `port`.
///
/// Unknown ports are not an error and yield [`Uplink::Unknown`].
pub fn parse_uplink(payload: &[u8], port: u8) -> Result<Uplink, DecodeError> {
    let uplink = match port {
        layout::PORT_STATUS => Uplink::Status(parse_occupancy(payload)?),
        layout::PORT_HEARTBEAT => Uplink::Heartbeat(parse_occupancy(payload)?),
        layout::PORT_STARTUP => Uplink::Startup(parse_startup(payload)?),
        layout::PORT_DEVICE_INFORMATION => {
            let info = parse_device_information(payload)?;
            if info == DeviceInformation::Unrecognized {
                debug!(port, len = payload.len(), "unrecognized device information length");
            }
            Uplink::DeviceInformation(info)
        }
        layout::PORT_DEVICE_USAGE => {
            let usage = parse_device_usage(payload)?;
            if usage == DeviceUsage::Unrecognized {
                debug!(port, selector = ?payload.first(), "unrecognized device usage selector");
            }
            Uplink::DeviceUsage(usage)
        }
        layout::PORT_DEBUG => Uplink::Debug(parse_debug_block(payload)?),
        layout::PORT_TEMPERATURE_ALERT => {
            Uplink::TemperatureAlert(parse_temperature_alert(payload)?)
        }
        _ => {
            debug!(port, "unknown uplink port");
            Uplink::Unknown
        }
    };
    Ok(uplink)
}

#[cfg(test)]
mod tests {
    use super::{Uplink, parse_uplink};
    use crate::protocol::device_info::DeviceInformation;
    use crate::protocol::device_usage::DeviceUsage;
    use crate::protocol::error::DecodeError;

    #[test]
    fn port_routing() {
        assert!(matches!(parse_uplink(&[1, 0], 1).unwrap(), Uplink::Status(_)));
        assert!(matches!(parse_uplink(&[1, 0], 2).unwrap(), Uplink::Heartbeat(_)));
        assert!(matches!(parse_uplink(&[0; 17], 3).unwrap(), Uplink::Startup(_)));
        assert!(matches!(
            parse_uplink(&[1, 2, 3], 4).unwrap(),
            Uplink::DeviceInformation(DeviceInformation::FirmwareVersion { .. })
        ));
        assert!(matches!(
            parse_uplink(&[4, 0, 0, 0, 9], 5).unwrap(),
            Uplink::DeviceUsage(DeviceUsage::TimeSinceRestart { .. })
        ));
        assert!(matches!(parse_uplink(&[0; 10], 6).unwrap(), Uplink::Debug(_)));
        assert!(matches!(
            parse_uplink(&[0x80], 7).unwrap(),
            Uplink::TemperatureAlert(_)
        ));
    }

    #[test]
    fn unknown_ports_ignore_payload() {
        for port in [0u8, 8, 99, 255] {
            assert_eq!(parse_uplink(&[], port).unwrap(), Uplink::Unknown);
        }
    }

    #[test]
    fn packet_type_labels() {
        let cases: [(&[u8], u8, &str); 10] = [
            (&[0, 0], 1, "Status"),
            (&[0, 0], 2, "Heartbeat"),
            (&[0; 17], 3, "Startup"),
            (&[1, 2, 3], 4, "Device Information - Firmware version"),
            (&[0; 11], 4, "Device Information - Device URN"),
            (&[0; 5], 4, "Device Information"),
            (&[3, 0, 0, 0, 0], 5, "Device Usage - Number of times the radar has been triggered"),
            (&[9], 5, "Device Usage"),
            (&[0; 10], 6, "Debug"),
            (&[0], 7, "Temperature alert"),
        ];
        for (payload, port, expected) in cases {
            let uplink = parse_uplink(payload, port).unwrap();
            assert_eq!(uplink.packet_type(), expected, "port {port}");
        }
        assert_eq!(Uplink::Unknown.packet_type(), "Unknown");
    }

    #[test]
    fn short_payload_fails_without_partial_result() {
        assert_eq!(
            parse_uplink(&[1], 1).unwrap_err(),
            DecodeError::OutOfRange { offset: 1, actual: 1 }
        );
        assert!(parse_uplink(&[0; 16], 3).is_err());
        assert!(parse_uplink(&[0; 9], 6).is_err());
        assert!(parse_uplink(&[], 7).is_err());
    }
}
