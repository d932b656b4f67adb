//! Bit vectors addressed by 1-based codeword positions.

use crate::cs::error::{Error, Result};
use bitvec::prelude::*;
use std::fmt;
use std::num::NonZeroUsize;

/// A 1-based bit position within a codeword.
///
/// Parity equations are written against positions `1..=n`, while storage is 0-based. Keeping
/// the two apart in the type system is what stops `pos - 1` from leaking everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position(NonZeroUsize);

impl Position {
    /// Creates a position, rejecting zero
    pub fn new(position: usize) -> Result<Self> {
        NonZeroUsize::new(position)
            .map(Position)
            .ok_or(Error::ZeroPosition)
    }

    /// Position of the 0-based storage index `index`
    pub fn from_index(index: usize) -> Self {
        Position(NonZeroUsize::MIN.saturating_add(index))
    }

    /// The 1-based value
    pub fn get(self) -> usize {
        self.0.get()
    }

    /// The 0-based storage index
    pub fn index(self) -> usize {
        self.0.get() - 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A fixed-length sequence of bits.
///
/// The length is fixed at construction; only individual bits can change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitVector {
    bits: BitVec<u8, Msb0>,
}

impl BitVector {
    /// An all-zero vector of `len` bits
    pub fn zeros(len: usize) -> Self {
        BitVector {
            bits: bitvec![u8, Msb0; 0; len],
        }
    }

    /// Builds a vector from `0`/`1` values
    pub fn from_bits(bits: &[u8]) -> Result<Self> {
        let mut out = Self::zeros(bits.len());
        for (index, &value) in bits.iter().enumerate() {
            match value {
                0 => {}
                1 => out.bits.set(index, true),
                _ => return Err(Error::InvalidBit { index, value }),
            }
        }
        Ok(out)
    }

    /// Parses a string of `0` and `1` characters, ignoring whitespace
    pub fn parse(s: &str) -> Result<Self> {
        let bits = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .enumerate()
            .map(|(index, c)| match c {
                '0' => Ok(0),
                '1' => Ok(1),
                _ => Err(Error::InvalidInput(format!(
                    "unexpected character '{}' at bit {}",
                    c, index
                ))),
            })
            .collect::<Result<Vec<u8>>>()?;
        Self::from_bits(&bits)
    }

    /// Copies a bitvec slice
    pub fn from_bitslice(bits: &BitSlice<u8, Msb0>) -> Self {
        BitVector {
            bits: bits.to_bitvec(),
        }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Reads the bit at `position`
    pub fn get(&self, position: Position) -> Result<bool> {
        self.bits
            .get(position.index())
            .map(|bit| *bit)
            .ok_or(Error::InvalidPosition {
                position: position.get(),
                len: self.len(),
            })
    }

    /// Writes the bit at `position`
    pub fn set(&mut self, position: Position, value: bool) -> Result<()> {
        self.check(position)?;
        self.bits.set(position.index(), value);
        Ok(())
    }

    /// Inverts the bit at `position`
    pub fn flip(&mut self, position: Position) -> Result<()> {
        self.check(position)?;
        let index = position.index();
        let old = self.bits[index];
        self.bits.set(index, !old);
        Ok(())
    }

    /// XOR of all bits
    pub fn parity(&self) -> bool {
        self.bits.count_ones() % 2 == 1
    }

    /// Number of set bits
    pub fn weight(&self) -> usize {
        self.bits.count_ones()
    }

    /// Appends one bit, producing a vector one longer
    pub fn extended(&self, bit: bool) -> Self {
        let mut bits = self.bits.clone();
        bits.push(bit);
        BitVector { bits }
    }

    /// The first `len` bits
    pub fn prefix(&self, len: usize) -> Result<Self> {
        if len > self.len() {
            return Err(Error::LengthMismatch {
                expected: len,
                actual: self.len(),
            });
        }
        Ok(Self::from_bitslice(&self.bits[..len]))
    }

    pub fn as_bitslice(&self) -> &BitSlice<u8, Msb0> {
        &self.bits
    }

    /// Bits as `0`/`1` values
    pub fn to_bits(&self) -> Vec<u8> {
        self.bits.iter().map(|bit| u8::from(*bit)).collect()
    }

    /// Bits separated by single spaces, e.g. `1 0 1 1`
    pub fn to_spaced_string(&self) -> String {
        self.to_bits()
            .iter()
            .map(|b| b.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn check(&self, position: Position) -> Result<()> {
        if position.index() >= self.len() {
            return Err(Error::InvalidPosition {
                position: position.get(),
                len: self.len(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.bits.iter() {
            write!(f, "{}", u8::from(*bit))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_conversions() {
        let pos = Position::new(5).unwrap();
        assert_eq!(pos.get(), 5);
        assert_eq!(pos.index(), 4);
        assert_eq!(Position::from_index(4), pos);
        assert_eq!(Position::new(0), Err(Error::ZeroPosition));
        assert_eq!(
            Error::ZeroPosition.to_string(),
            "Position 0 is not a valid 1-based position"
        );
    }

    #[test]
    fn test_from_bits_rejects_non_binary() {
        assert!(BitVector::from_bits(&[0, 1, 1]).is_ok());
        assert_eq!(
            BitVector::from_bits(&[0, 2]),
            Err(Error::InvalidBit { index: 1, value: 2 })
        );
    }

    #[test]
    fn test_parse_and_display() {
        let v = BitVector::parse("0110 011").unwrap();
        assert_eq!(v.len(), 7);
        assert_eq!(v.to_string(), "0110011");
        assert_eq!(v.to_spaced_string(), "0 1 1 0 0 1 1");
        assert!(BitVector::parse("01x").is_err());
    }

    #[test]
    fn test_flip_and_parity() {
        let mut v = BitVector::zeros(4);
        assert!(!v.parity());
        v.flip(Position::new(2).unwrap()).unwrap();
        assert!(v.parity());
        assert_eq!(v.weight(), 1);
        assert!(v.get(Position::new(2).unwrap()).unwrap());
        assert!(v.flip(Position::new(5).unwrap()).is_err());
    }

    #[test]
    fn test_extended_and_prefix() {
        let v = BitVector::parse("101").unwrap();
        let ext = v.extended(true);
        assert_eq!(ext.to_string(), "1011");
        assert_eq!(ext.prefix(3).unwrap(), v);
        assert!(v.prefix(4).is_err());
    }
}
