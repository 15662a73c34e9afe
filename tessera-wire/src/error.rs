//! Decode errors.

use thiserror::Error;

/// Errors produced while decoding a masked record.
///
/// Decoding never panics on hostile input; running out of bytes or finding
/// a string that is not UTF-8 is reported here and the caller decides how
/// much of the partially-applied record to keep.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WireError {
    #[error("unexpected end of input: wanted {wanted} bytes, {remaining} remaining")]
    UnexpectedEof { wanted: usize, remaining: usize },

    #[error("string is not valid UTF-8")]
    InvalidUtf8,
}

pub type Result<T> = std::result::Result<T, WireError>;
