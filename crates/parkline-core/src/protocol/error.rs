use thiserror::Error;

/// Errors returned by uplink decoding.
///
/// # Examples
/// ```
/// use parkline_core::DecodeError;
///
/// let err = DecodeError::OutOfRange { offset: 1, actual: 1 };
/// assert!(err.to_string().contains("payload too short"));
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("payload too short: need byte at offset {offset}, payload has {actual} bytes")]
    OutOfRange { offset: usize, actual: usize },
    #[error("invalid hex payload: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}
