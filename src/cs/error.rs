//! Error types shared by the codec modules.

use thiserror::Error;

/// Result type used across the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by geometry resolution, matrix construction, encoding and decoding
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// No information bits were requested
    #[error("Information bit count must be positive, got {k}")]
    InvalidLength { k: usize },

    /// The message would need more parity bits than the codec supports
    #[error("Information bit count {k} needs more than {max_parity_bits} parity bits")]
    UnsupportedLength { k: usize, max_parity_bits: usize },

    /// An input vector has the wrong number of bits
    #[error("Length mismatch: expected {expected} bits, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// A caller-supplied bit was neither 0 nor 1
    #[error("Bit {index} has value {value}, expected 0 or 1")]
    InvalidBit { index: usize, value: u8 },

    /// Positions are 1-based, so 0 never names a bit
    #[error("Position 0 is not a valid 1-based position")]
    ZeroPosition,

    /// A 1-based position is past the end of the vector
    #[error("Position {position} is outside [1, {len}]")]
    InvalidPosition { position: usize, len: usize },

    /// The same position was requested twice in one error pattern
    #[error("Position {0} was requested more than once")]
    DuplicatePosition(usize),

    /// A built parity-check matrix has a zero or repeated column
    #[error("Degenerate parity-check matrix at column {column}: {reason}")]
    DegenerateMatrix { column: usize, reason: String },

    /// More errors were detected than the code can correct
    #[error("Uncorrectable error detected (syndrome {syndrome})")]
    Uncorrectable { syndrome: usize },

    /// Generic validation failure
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
