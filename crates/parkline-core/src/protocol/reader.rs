use std::ops::Range;

use super::error::DecodeError;

/// Decode a two's-complement byte (`raw - 256` when the high bit is set).
pub fn signed_byte(raw: u8) -> i8 {
    raw as i8
}

pub struct UplinkReader<'a> {
    payload: &'a [u8],
}

impl<'a> UplinkReader<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self { payload }
    }

    pub fn require_len(&self, needed: usize) -> Result<(), DecodeError> {
        if self.payload.len() < needed {
            return Err(DecodeError::OutOfRange {
                offset: needed.saturating_sub(1),
                actual: self.payload.len(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, DecodeError> {
        self.payload
            .get(offset)
            .copied()
            .ok_or(DecodeError::OutOfRange {
                offset,
                actual: self.payload.len(),
            })
    }

    pub fn read_i8(&self, offset: usize) -> Result<i8, DecodeError> {
        self.read_u8(offset).map(signed_byte)
    }

    pub fn read_slice(&self, range: Range<usize>) -> Result<&'a [u8], DecodeError> {
        self.payload
            .get(range.clone())
            .ok_or(DecodeError::OutOfRange {
                offset: range.end.saturating_sub(1),
                actual: self.payload.len(),
            })
    }

    pub fn read_array<const N: usize>(&self, range: Range<usize>) -> Result<[u8; N], DecodeError> {
        let bytes = self.read_slice(range)?;
        bytes.try_into().map_err(|_| DecodeError::OutOfRange {
            offset: N.saturating_sub(1),
            actual: bytes.len(),
        })
    }

    pub fn read_u16_be(&self, range: Range<usize>) -> Result<u16, DecodeError> {
        self.read_array(range).map(u16::from_be_bytes)
    }

    pub fn read_u16_le(&self, range: Range<usize>) -> Result<u16, DecodeError> {
        self.read_array(range).map(u16::from_le_bytes)
    }

    pub fn read_u32_be(&self, range: Range<usize>) -> Result<u32, DecodeError> {
        self.read_array(range).map(u32::from_be_bytes)
    }

    /// Assemble a 24-bit big-endian value from three arbitrary offsets.
    pub fn read_u24_be(&self, offsets: [usize; 3]) -> Result<u32, DecodeError> {
        let [high, mid, low] = offsets;
        Ok((u32::from(self.read_u8(high)?) << 16)
            | (u32::from(self.read_u8(mid)?) << 8)
            | u32::from(self.read_u8(low)?))
    }

    /// Lowercase hex of each byte with no zero padding (`0x0a` -> `"a"`).
    pub fn read_hex_unpadded(&self, range: Range<usize>) -> Result<String, DecodeError> {
        let bytes = self.read_slice(range)?;
        Ok(bytes.iter().map(|b| format!("{:x}", b)).collect())
    }
}
