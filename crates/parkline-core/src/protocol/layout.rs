use std::ops::Range;

pub const PORT_STATUS: u8 = 1;
pub const PORT_HEARTBEAT: u8 = 2;
pub const PORT_STARTUP: u8 = 3;
pub const PORT_DEVICE_INFORMATION: u8 = 4;
pub const PORT_DEVICE_USAGE: u8 = 5;
pub const PORT_DEBUG: u8 = 6;
pub const PORT_TEMPERATURE_ALERT: u8 = 7;

// Status / heartbeat (ports 1 and 2)
pub const OCCUPANCY_OFFSET: usize = 0;
pub const TEMPERATURE_OFFSET: usize = 1;
pub const OCCUPANCY_MIN_LEN: usize = TEMPERATURE_OFFSET + 1;
pub const OCCUPIED: u8 = 1;

// Debug block (port 6, and the head of port 3)
pub const DEBUG_TIMESTAMP_RANGE: Range<usize> = 0..4;
pub const DEBUG_CODE_RANGE: Range<usize> = 4..8;
pub const DEBUG_SEQUENCE_RANGE: Range<usize> = 8..10;
pub const DEBUG_BLOCK_LEN: usize = 10;

// Startup (port 3); bytes 10 and 11 are not interpreted
pub const STARTUP_DEBUG_RANGE: Range<usize> = 0..DEBUG_BLOCK_LEN;
pub const STARTUP_FIRMWARE_RANGE: Range<usize> = 12..15;
pub const STARTUP_RESET_REASON_OFFSET: usize = 15;
pub const STARTUP_OCCUPANCY_OFFSET: usize = 16;
pub const STARTUP_OCCUPANCY_MASK: u8 = 0x01;
pub const STARTUP_MIN_LEN: usize = STARTUP_OCCUPANCY_OFFSET + 1;

// Device information (port 4), selected by payload length
pub const DEVICE_INFO_FIRMWARE_LEN: usize = 3;
pub const DEVICE_INFO_FIRMWARE_RANGE: Range<usize> = 0..3;
pub const DEVICE_INFO_URN_LEN: usize = 11;
pub const DEV_EUI_HEAD_RANGE: Range<usize> = 0..3;
pub const PRODUCT_CLASS_OFFSET: usize = 3;
pub const PRODUCT_CODE_HIGH_OFFSET: usize = 4;
pub const PRODUCT_EXTENSION_OFFSET: usize = 5;
pub const DEV_EUI_TAIL_RANGE: Range<usize> = 6..11;
pub const PRODUCT_CODE_PLS: u16 = 0x001;
pub const EXTENSION_EU868: u8 = 0x00;
pub const EXTENSION_AS923: u8 = 0x01;

// Device usage (port 5), selected by the first byte
pub const USAGE_SELECTOR_OFFSET: usize = 0;
pub const USAGE_COUNTER_RANGE: Range<usize> = 1..5;
pub const USAGE_COUNTER_MIN_LEN: usize = 5;

pub const USAGE_PARKING_STATUS_CHANGES: u8 = 0;
pub const USAGE_TIME_IN_OCCUPIED_STATE: u8 = 1;
pub const USAGE_UPLINK_MESSAGES_SENT: u8 = 2;
pub const USAGE_RADAR_TRIGGERS: u8 = 3;
pub const USAGE_TIME_SINCE_RESTART: u8 = 4;
pub const USAGE_RESETS_SINCE_INSTALL: u8 = 5;
pub const USAGE_TIME_SINCE_INSTALL: u8 = 6;

// Uplink counters, one 24-bit big-endian value per data rate.
// The sensor firmware reads byte 7 as the low byte of DR1 and never byte 6.
pub const UPLINKS_DR0_SF12: [usize; 3] = [1, 2, 3];
pub const UPLINKS_DR1_SF11: [usize; 3] = [4, 5, 7];
pub const UPLINKS_DR2_SF10: [usize; 3] = [7, 8, 9];
pub const UPLINKS_DR3_SF9: [usize; 3] = [10, 11, 12];
pub const UPLINKS_DR4_SF8: [usize; 3] = [13, 14, 15];
pub const UPLINKS_DR5_SF7: [usize; 3] = [16, 17, 18];
pub const UPLINKS_MIN_LEN: usize = 19;

// Reset counters
pub const RESETS_BROWN_OUT_OFFSET: usize = 1;
pub const RESETS_LOCKUP_OFFSET: usize = 2;
pub const RESETS_EXTERNAL_PIN_OFFSET: usize = 3;
pub const RESETS_POWER_ON_OFFSET: usize = 4;
pub const RESETS_WATCHDOG_OFFSET: usize = 5;
pub const RESETS_SOFTWARE_RANGE: Range<usize> = 6..8;
pub const RESETS_MIN_LEN: usize = 8;

// Temperature alert (port 7)
pub const ALERT_TEMPERATURE_OFFSET: usize = 0;
