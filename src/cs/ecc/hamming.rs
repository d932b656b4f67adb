//! Hamming error correction code implementation.
//!
//! Hamming codes are a family of linear error-correcting codes developed by Richard Hamming in
//! 1950. A distance-3 Hamming code corrects any single-bit error; appending an overall parity
//! bit raises the distance to 4, so double-bit errors are also detected (SEC-DED).
//!
//! This implementation provides:
//! - Geometry resolution: the minimal number of parity bits for `k` information bits
//! - Canonical (powers-of-two parity) and systematic (`G = [I_k | P]`) parity-check matrices
//! - Encoding with an optional overall parity bit
//! - Syndrome decoding with a four-way verdict for 0, 1 and 2 bit errors
//! - An explicit-position channel and a parallel random trial runner
//!
//! Positions are 1-based throughout, matching the parity-equation convention that position `j`
//! is checked by every equation whose bit is set in `j`.
//!
//! # Applications
//!
//! - Computer memory (ECC RAM)
//! - Satellite communications
//! - Data storage systems
//!
//! # Examples
//!
//! ```rust
//! use hamming_secded::{
//!     BitVector, CodecConfig, ErrorPattern, HammingCodec, Mode, Strategy, Verdict,
//! };
//!
//! let codec = HammingCodec::new(CodecConfig::new(4, Strategy::Canonical, Mode::SecDed)).unwrap();
//! let info = BitVector::parse("1011").unwrap();
//! let codeword = codec.encode(&info).unwrap();
//! assert_eq!(codeword.to_string(), "01100110");
//!
//! let received = ErrorPattern::from_positions(&[5]).unwrap().apply(&codeword).unwrap();
//! let decoded = codec.decode(&received).unwrap();
//! assert!(matches!(decoded.verdict, Verdict::SingleError(pos) if pos.get() == 5));
//! assert_eq!(decoded.data, info);
//! ```

pub mod bits;
pub mod channel;
pub mod codec;
pub mod decoder;
pub mod encoder;
pub mod experiment;
pub mod geometry;
pub mod matrix;


pub use bits::{BitVector, Position};
pub use channel::ErrorPattern;
pub use codec::{CodecConfig, HammingCodec};
pub use decoder::{classify, decode, Decoded, Mode, Verdict};
pub use encoder::{add_overall_parity, encode, extract_data};
pub use experiment::{run_trial, run_trials, TrialReport, TrialSummary};
pub use geometry::{
    derive_positions, resolve, systematic_positions, CodeGeometry, PositionSets, MAX_PARITY_BITS,
};
pub use matrix::{
    Canonical, GeneratorMatrix, MatrixStrategy, ParityCheckMatrix, Strategy, Syndrome, Systematic,
};
