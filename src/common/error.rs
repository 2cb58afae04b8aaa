use thiserror::Error;

use super::{codec::Mode, metadata::ECLevel};

// Error
//------------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum QRError {
    /// Malformed ec level, out of range version or mask, or similar caller mistake.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Character at `position` can't be represented in `mode` (or in the chosen byte charset).
    #[error("Character at position {position} can't be encoded in {mode:?} mode")]
    UnencodableInput { mode: Mode, position: usize },

    #[error(
        "Data too large: {len} characters exceeds the {mode:?} capacity of {capacity} at ec level {ec_level:?}"
    )]
    DataTooLarge { len: usize, capacity: usize, mode: Mode, ec_level: ECLevel },

    /// A single RS block would exceed 255 codewords. Never happens for table derived blocks.
    #[error("Message too long: {len} codewords when max is 255")]
    MessageTooLong { len: usize },
}

pub type QRResult<T> = Result<T, QRError>;
