//! Error types for ISO 9660 decoding

use thiserror::Error;

/// Errors that can occur while decoding an ISO 9660 image
#[derive(Debug, Error)]
pub enum IsoError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not an ISO 9660 volume (identifier {0:?})")]
    InvalidVolume(String),

    /// A redundant little-endian/big-endian pair disagrees. Either encoding
    /// could be the corrupted one, so parsing aborts rather than guessing.
    #[error("corrupt {field}: little-endian {le} != big-endian {be}")]
    EncodingMismatch {
        field: &'static str,
        le: u64,
        be: u64,
    },

    /// The byte source ran out before a declared field or length was complete.
    #[error("truncated image: {needed} more bytes needed")]
    Truncated { needed: usize },

    #[error("malformed structure: {0}")]
    Malformed(String),

    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),
}
