use serde::Serialize;

use super::error::DecodeError;
use super::layout;
use super::reader::UplinkReader;

/// Parking status, shared by status (port 1) and heartbeat (port 2) uplinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Occupancy {
    pub occupied: bool,
    /// Degrees Celsius.
    pub temperature: i8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TemperatureAlert {
    pub temperature: i8,
}

pub fn parse_occupancy(payload: &[u8]) -> Result<Occupancy, DecodeError> {
    let reader = UplinkReader::new(payload);
    reader.require_len(layout::OCCUPANCY_MIN_LEN)?;

    let occupied = reader.read_u8(layout::OCCUPANCY_OFFSET)? == layout::OCCUPIED;
    let temperature = reader.read_i8(layout::TEMPERATURE_OFFSET)?;
    Ok(Occupancy {
        occupied,
        temperature,
    })
}

pub fn parse_temperature_alert(payload: &[u8]) -> Result<TemperatureAlert, DecodeError> {
    let reader = UplinkReader::new(payload);
    let temperature = reader.read_i8(layout::ALERT_TEMPERATURE_OFFSET)?;
    Ok(TemperatureAlert { temperature })
}
