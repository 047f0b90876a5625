//! Parking-lot sensor uplink decoding.
//!
//! The decoder follows the same layered structure for every port:
//! - `layout`: byte offsets and ranges (source of truth)
//! - `reader`: bounds-checked byte access and field conventions
//! - per-port parsers (`status`, `startup`, `device_info`, `device_usage`,
//!   `debug`): domain-level decoding, no direct byte indexing
//! - `error`: explicit, actionable errors
//!
//! `uplink` dispatches on the LoRaWAN port into a closed set of packet
//! shapes. Parsers are pure and contain no I/O; the `source` and `analysis`
//! layers handle file access and aggregation.

pub mod debug;
pub mod device_info;
pub mod device_usage;
pub mod diagnostics;
pub mod error;
pub mod firmware;
pub mod layout;
pub mod reader;
pub mod startup;
pub mod status;
pub mod uplink;

pub use uplink::{Uplink, parse_uplink};
