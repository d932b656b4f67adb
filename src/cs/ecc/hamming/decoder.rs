//! Syndrome decoding with optional overall-parity (SEC-DED) classification.
//!
//! A received word goes through the same fixed steps every time:
//!
//! 1. Split off the trailing overall-parity bit when the word is SEC-DED.
//! 2. Compute the syndrome `H · r (mod 2)` over the first `n` bits.
//! 3. XOR every received bit, overall-parity bit included.
//! 4. Classify from `(syndrome, overall parity)` and correct at most one bit.
//! 5. Read the information bits back out of the corrected word.
//!
//! | syndrome | overall parity | verdict                    | correction               |
//! |----------|----------------|----------------------------|--------------------------|
//! | 0        | 0              | `NoError`                  | none                     |
//! | ≠0       | 1              | `SingleError(pos)`         | flip `pos`               |
//! | 0        | 1              | `OverallParityOnlyError`   | flip the overall bit     |
//! | ≠0       | 0              | `DoubleErrorDetected`      | none                     |
//!
//! In SEC mode there is no overall bit: a zero syndrome means no error and anything else is
//! treated as a single error.

use super::bits::{BitVector, Position};
use super::encoder::extract_data;
use super::geometry::{CodeGeometry, PositionSets};
use super::matrix::{ParityCheckMatrix, Syndrome};
use crate::cs::error::{Error, Result};
use log::{debug, trace};
use std::fmt;

/// Single-error-correcting or single-error-correcting/double-error-detecting operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    Sec,
    #[default]
    SecDed,
}

impl Mode {
    /// Codeword length for a matrix of width `n`
    pub fn codeword_len(&self, n: usize) -> usize {
        match self {
            Mode::Sec => n,
            Mode::SecDed => n + 1,
        }
    }
}

/// Outcome of decoding one received word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    NoError,
    /// One bit at this position was wrong and has been flipped back
    SingleError(Position),
    /// Only the appended overall-parity bit was wrong
    OverallParityOnlyError,
    /// Two (or more) errors; nothing was corrected and the data must not be trusted
    DoubleErrorDetected,
}

impl Verdict {
    /// Whether the recovered data can be trusted
    pub fn is_correctable(&self) -> bool {
        !matches!(self, Verdict::DoubleErrorDetected)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::NoError => write!(f, "no error"),
            Verdict::SingleError(pos) => write!(f, "single error at position {}", pos),
            Verdict::OverallParityOnlyError => write!(f, "error in overall parity bit only"),
            Verdict::DoubleErrorDetected => write!(f, "double error detected, not correctable"),
        }
    }
}

/// Everything the decoder learned about a received word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub verdict: Verdict,
    pub syndrome: Syndrome,
    /// XOR of every received bit
    pub overall_parity: bool,
    /// Received word after correction; untouched for `NoError` and `DoubleErrorDetected`
    pub corrected: BitVector,
    /// Information bits read from `corrected`
    pub data: BitVector,
}

impl Decoded {
    /// Position that was flipped back, if any
    pub fn corrected_position(&self) -> Option<Position> {
        match self.verdict {
            Verdict::SingleError(pos) => Some(pos),
            Verdict::OverallParityOnlyError => {
                Some(Position::from_index(self.corrected.len() - 1))
            }
            Verdict::NoError | Verdict::DoubleErrorDetected => None,
        }
    }

    /// The information bits, or [`Error::Uncorrectable`] when a double error was detected
    pub fn into_data(self) -> Result<BitVector> {
        match self.verdict {
            Verdict::DoubleErrorDetected => Err(Error::Uncorrectable {
                syndrome: self.syndrome.index,
            }),
            _ => Ok(self.data),
        }
    }
}

/// Classifies a SEC-DED word from its syndrome and overall parity.
///
/// `locate` maps a non-zero syndrome onto the position whose column matches. A syndrome with
/// no matching column cannot come from one error and is reported as a double error.
pub fn classify(
    syndrome_index: usize,
    overall_parity: bool,
    locate: impl Fn(usize) -> Option<Position>,
) -> Verdict {
    match (syndrome_index, overall_parity) {
        (0, false) => Verdict::NoError,
        (s, true) if s != 0 => locate(s)
            .map(Verdict::SingleError)
            .unwrap_or(Verdict::DoubleErrorDetected),
        (0, true) => Verdict::OverallParityOnlyError,
        _ => Verdict::DoubleErrorDetected,
    }
}

/// Decodes a received word.
///
/// `received` must be `matrix.width()` bits in SEC mode and one more in SEC-DED mode.
pub fn decode(
    geometry: &CodeGeometry,
    positions: &PositionSets,
    matrix: &ParityCheckMatrix,
    mode: Mode,
    received: &BitVector,
) -> Result<Decoded> {
    let n = matrix.width();
    let expected = mode.codeword_len(n);
    if received.len() != expected {
        return Err(Error::LengthMismatch {
            expected,
            actual: received.len(),
        });
    }

    let r_sec = received.prefix(n)?;
    let syndrome = matrix.syndrome(&r_sec)?;
    let overall_parity = received.parity();
    trace!(
        "syndrome {} -> {}, overall parity {}",
        syndrome.to_msb_string(),
        syndrome.index,
        u8::from(overall_parity)
    );

    let verdict = match mode {
        Mode::SecDed => classify(syndrome.index, overall_parity, |s| matrix.locate(s)),
        Mode::Sec if syndrome.is_zero() => Verdict::NoError,
        Mode::Sec => matrix
            .locate(syndrome.index)
            .map(Verdict::SingleError)
            .unwrap_or(Verdict::DoubleErrorDetected),
    };

    let mut corrected = received.clone();
    match verdict {
        Verdict::NoError => {}
        Verdict::SingleError(pos) => corrected.flip(pos)?,
        Verdict::OverallParityOnlyError => corrected.flip(Position::from_index(n))?,
        Verdict::DoubleErrorDetected => {
            debug!(
                "uncorrectable word, syndrome {} with overall parity {}",
                syndrome.index,
                u8::from(overall_parity)
            );
        }
    }
    if verdict != Verdict::NoError && verdict.is_correctable() {
        debug!("{}", verdict);
    }

    let data = extract_data(geometry, positions, &corrected)?;
    Ok(Decoded {
        verdict,
        syndrome,
        overall_parity,
        corrected,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::super::encoder::{add_overall_parity, encode};
    use super::super::geometry::{derive_positions, resolve};
    use super::super::matrix::{Canonical, MatrixStrategy};
    use super::*;

    fn pos(p: usize) -> Position {
        Position::new(p).unwrap()
    }

    fn setup() -> (CodeGeometry, PositionSets, ParityCheckMatrix, BitVector) {
        let g = resolve(4).unwrap();
        let positions = derive_positions(&g);
        let h = Canonical.build(&g).unwrap();
        let info = BitVector::from_bits(&[1, 0, 1, 1]).unwrap();
        (g, positions, h, info)
    }

    #[test]
    fn test_classify_table() {
        let locate = |s: usize| Position::new(s).ok();
        assert_eq!(classify(0, false, locate), Verdict::NoError);
        assert_eq!(classify(5, true, locate), Verdict::SingleError(pos(5)));
        assert_eq!(classify(0, true, locate), Verdict::OverallParityOnlyError);
        assert_eq!(classify(5, false, locate), Verdict::DoubleErrorDetected);
        assert_eq!(classify(9, true, |_| None), Verdict::DoubleErrorDetected);
    }

    #[test]
    fn test_clean_word() {
        let (g, positions, h, info) = setup();
        let word = add_overall_parity(&encode(&g, &positions, &h, &info).unwrap());
        let decoded = decode(&g, &positions, &h, Mode::SecDed, &word).unwrap();
        assert_eq!(decoded.verdict, Verdict::NoError);
        assert_eq!(decoded.corrected, word);
        assert_eq!(decoded.data, info);
        assert_eq!(decoded.corrected_position(), None);
    }

    #[test]
    fn test_single_error_at_position_5() {
        let (g, positions, h, info) = setup();
        let mut word = add_overall_parity(&encode(&g, &positions, &h, &info).unwrap());
        let original = word.clone();
        word.flip(pos(5)).unwrap();

        let decoded = decode(&g, &positions, &h, Mode::SecDed, &word).unwrap();
        assert_eq!(decoded.syndrome.index, 5);
        assert_eq!(decoded.verdict, Verdict::SingleError(pos(5)));
        assert_eq!(decoded.corrected, original);
        assert_eq!(decoded.data, info);
        assert_eq!(decoded.corrected_position(), Some(pos(5)));
    }

    #[test]
    fn test_overall_parity_bit_error() {
        let (g, positions, h, info) = setup();
        let mut word = add_overall_parity(&encode(&g, &positions, &h, &info).unwrap());
        let original = word.clone();
        word.flip(pos(8)).unwrap();

        let decoded = decode(&g, &positions, &h, Mode::SecDed, &word).unwrap();
        assert_eq!(decoded.verdict, Verdict::OverallParityOnlyError);
        assert!(decoded.syndrome.is_zero());
        assert_eq!(decoded.corrected, original);
        assert_eq!(decoded.corrected_position(), Some(pos(8)));
    }

    #[test]
    fn test_double_error_leaves_word_untouched() {
        let (g, positions, h, info) = setup();
        let mut word = add_overall_parity(&encode(&g, &positions, &h, &info).unwrap());
        word.flip(pos(2)).unwrap();
        word.flip(pos(6)).unwrap();

        let decoded = decode(&g, &positions, &h, Mode::SecDed, &word).unwrap();
        assert_eq!(decoded.verdict, Verdict::DoubleErrorDetected);
        assert_eq!(decoded.corrected, word);
        assert!(!decoded.verdict.is_correctable());
        assert_eq!(
            decoded.into_data(),
            Err(Error::Uncorrectable { syndrome: 2 ^ 6 })
        );
    }

    #[test]
    fn test_sec_mode_corrects_without_overall_bit() {
        let (g, positions, h, info) = setup();
        let mut word = encode(&g, &positions, &h, &info).unwrap();
        word.flip(pos(3)).unwrap();

        let decoded = decode(&g, &positions, &h, Mode::Sec, &word).unwrap();
        assert_eq!(decoded.verdict, Verdict::SingleError(pos(3)));
        assert_eq!(decoded.data, info);
    }

    #[test]
    fn test_wrong_length_is_rejected() {
        let (g, positions, h, _) = setup();
        let result = decode(&g, &positions, &h, Mode::SecDed, &BitVector::zeros(7));
        assert_eq!(
            result,
            Err(Error::LengthMismatch {
                expected: 8,
                actual: 7
            })
        );
    }
}
