use serde::Serialize;

use super::diagnostics::describe_diagnostic;
use super::error::DecodeError;
use super::layout;
use super::reader::UplinkReader;

/// Diagnostic event carried by debug uplinks and the head of startup uplinks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DebugBlock {
    pub sequence_number: u16,
    pub debug_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_code_description: Option<&'static str>,
    pub timestamp: u32,
}

/// Parse a debug block from the first ten bytes of `payload`.
///
/// Trailing bytes are ignored.
pub fn parse_debug_block(payload: &[u8]) -> Result<DebugBlock, DecodeError> {
    let reader = UplinkReader::new(payload);
    reader.require_len(layout::DEBUG_BLOCK_LEN)?;

    let timestamp = reader.read_u32_be(layout::DEBUG_TIMESTAMP_RANGE)?;
    let debug_code = debug_code(reader.read_array(layout::DEBUG_CODE_RANGE)?);
    let sequence_number = reader.read_u16_be(layout::DEBUG_SEQUENCE_RANGE)?;

    Ok(DebugBlock {
        sequence_number,
        debug_code,
        debug_code_description: describe_diagnostic(u32::from(debug_code)),
        timestamp,
    })
}

/// 12-bit code: low nibble of the third byte, then the fourth byte.
fn debug_code(window: [u8; 4]) -> u16 {
    (u16::from(window[2] & 0x0F) << 8) | u16::from(window[3])
}
