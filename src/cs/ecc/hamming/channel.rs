//! Binary channel that flips zero, one or two codeword bits.
//!
//! The codec never draws random numbers itself. Callers either name the flipped positions
//! explicitly or hand in their own [`rand::Rng`].

use super::bits::{BitVector, Position};
use crate::cs::error::{Error, Result};
use rand::seq::index::sample;
use rand::Rng;

/// Set of distinct positions flipped by the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorPattern {
    None,
    Single(Position),
    Double(Position, Position),
}

impl ErrorPattern {
    /// Builds a pattern from explicit 1-based positions (at most two, all distinct)
    pub fn from_positions(positions: &[usize]) -> Result<Self> {
        match *positions {
            [] => Ok(ErrorPattern::None),
            [a] => Ok(ErrorPattern::Single(Position::new(a)?)),
            [a, b] if a == b => Err(Error::DuplicatePosition(a)),
            [a, b] => {
                let (a, b) = (Position::new(a)?, Position::new(b)?);
                Ok(ErrorPattern::Double(a.min(b), a.max(b)))
            }
            _ => Err(Error::InvalidInput(format!(
                "at most two error positions are supported, got {}",
                positions.len()
            ))),
        }
    }

    /// Draws `multiplicity` distinct positions uniformly from `1..=len`
    pub fn random<R: Rng + ?Sized>(rng: &mut R, len: usize, multiplicity: usize) -> Result<Self> {
        if multiplicity > 2 {
            return Err(Error::InvalidInput(format!(
                "error multiplicity must be 0, 1 or 2, got {}",
                multiplicity
            )));
        }
        if multiplicity > len {
            return Err(Error::LengthMismatch {
                expected: multiplicity,
                actual: len,
            });
        }
        let picked: Vec<usize> = sample(rng, len, multiplicity)
            .into_iter()
            .map(|index| index + 1)
            .collect();
        Self::from_positions(&picked)
    }

    /// Number of flipped bits
    pub fn multiplicity(&self) -> usize {
        match self {
            ErrorPattern::None => 0,
            ErrorPattern::Single(_) => 1,
            ErrorPattern::Double(_, _) => 2,
        }
    }

    /// Flipped positions in ascending order
    pub fn positions(&self) -> Vec<Position> {
        match *self {
            ErrorPattern::None => Vec::new(),
            ErrorPattern::Single(a) => vec![a],
            ErrorPattern::Double(a, b) => vec![a, b],
        }
    }

    /// Returns a copy of `codeword` with the pattern's bits flipped
    pub fn apply(&self, codeword: &BitVector) -> Result<BitVector> {
        let mut received = codeword.clone();
        for position in self.positions() {
            received.flip(position)?;
        }
        Ok(received)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_from_positions() {
        assert_eq!(ErrorPattern::from_positions(&[]).unwrap(), ErrorPattern::None);
        assert_eq!(
            ErrorPattern::from_positions(&[6, 2]).unwrap().positions(),
            vec![Position::new(2).unwrap(), Position::new(6).unwrap()]
        );
        assert_eq!(
            ErrorPattern::from_positions(&[3, 3]),
            Err(Error::DuplicatePosition(3))
        );
        assert_eq!(ErrorPattern::from_positions(&[0]), Err(Error::ZeroPosition));
        assert!(ErrorPattern::from_positions(&[1, 2, 3]).is_err());
    }

    #[test]
    fn test_apply_flips_bits() {
        let word = BitVector::parse("0000000").unwrap();
        let pattern = ErrorPattern::from_positions(&[1, 7]).unwrap();
        assert_eq!(pattern.apply(&word).unwrap().to_string(), "1000001");

        let out_of_range = ErrorPattern::from_positions(&[8]).unwrap();
        assert!(out_of_range.apply(&word).is_err());
    }

    #[test]
    fn test_random_patterns_are_distinct_and_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..500 {
            for multiplicity in 0..=2 {
                let pattern = ErrorPattern::random(&mut rng, 8, multiplicity).unwrap();
                assert_eq!(pattern.multiplicity(), multiplicity);
                let positions = pattern.positions();
                assert!(positions.iter().all(|p| (1..=8).contains(&p.get())));
                if let [a, b] = positions[..] {
                    assert!(a < b);
                }
            }
        }
        assert!(ErrorPattern::random(&mut rng, 8, 3).is_err());
        assert!(ErrorPattern::random(&mut rng, 1, 2).is_err());
    }
}
