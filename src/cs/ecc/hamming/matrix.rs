//! Parity-check and generator matrices over GF(2).
//!
//! Two constructions are provided behind [`MatrixStrategy`]:
//!
//! - [`Canonical`]: column `j` of H is the binary representation of `j`, so parity bits sit at
//!   the powers of two and a single-error syndrome read as an integer is the error position.
//! - [`Systematic`]: a generator `G = [I_k | P]` is built first and H is derived as
//!   `[Pᵗ | I_p]`. The code is shortened to `k + p` bits.
//!
//! Both constructions are checked for the distance-3 property (no zero column, no repeated
//! column) before they are handed out.

use super::bits::{BitVector, Position};
use super::geometry::{derive_positions, systematic_positions, CodeGeometry, PositionSets};
use crate::cs::error::{Error, Result};
use bitvec::prelude::*;
use log::debug;
use std::collections::HashMap;
use std::fmt;

/// Result of multiplying H by a received word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Syndrome {
    /// Bit `i` is the outcome of parity equation `i`
    pub bits: BitVector,
    /// The bits read as a binary number, bit `i` weighted `2^i`
    pub index: usize,
}

impl Syndrome {
    fn from_index(index: usize, p: usize) -> Self {
        let bits = (0..p)
            .map(|i| (index >> i) & 1 == 1)
            .collect::<BitVec<u8, Msb0>>();
        Syndrome {
            bits: BitVector::from_bitslice(&bits),
            index,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.index == 0
    }

    /// Most significant equation first, e.g. `101` for index 5
    pub fn to_msb_string(&self) -> String {
        self.bits.to_string().chars().rev().collect()
    }
}

/// A `p × len` parity-check matrix with distinct, non-zero columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParityCheckMatrix {
    rows: Vec<BitVec<u8, Msb0>>,
    /// Column patterns, bit `i` set when row `i` has a one in that column
    columns: Vec<usize>,
    lookup: HashMap<usize, Position>,
    /// Position whose column is the unit vector of row `i`
    check_positions: Vec<Position>,
}

impl ParityCheckMatrix {
    /// Builds a matrix of height `p` from column patterns.
    ///
    /// Fails with [`Error::DegenerateMatrix`] if a column is zero, repeated, wider than `p`
    /// bits, or if some row has no unit column to hold its check bit.
    pub fn from_columns(p: usize, columns: Vec<usize>) -> Result<Self> {
        let mut lookup = HashMap::with_capacity(columns.len());
        for (index, &pattern) in columns.iter().enumerate() {
            let position = Position::from_index(index);
            if pattern == 0 {
                return Err(Error::DegenerateMatrix {
                    column: position.get(),
                    reason: "all-zero column".to_string(),
                });
            }
            if pattern >> p != 0 {
                return Err(Error::DegenerateMatrix {
                    column: position.get(),
                    reason: format!("pattern {:#b} does not fit in {} rows", pattern, p),
                });
            }
            if let Some(first) = lookup.insert(pattern, position) {
                return Err(Error::DegenerateMatrix {
                    column: position.get(),
                    reason: format!("duplicates column {}", first),
                });
            }
        }

        let check_positions = (0..p)
            .map(|row| {
                lookup
                    .get(&(1usize << row))
                    .copied()
                    .ok_or_else(|| Error::DegenerateMatrix {
                        column: 0,
                        reason: format!("row {} has no dedicated check column", row),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        let rows = (0..p)
            .map(|row| {
                columns
                    .iter()
                    .map(|&pattern| (pattern >> row) & 1 == 1)
                    .collect::<BitVec<u8, Msb0>>()
            })
            .collect();

        Ok(ParityCheckMatrix {
            rows,
            columns,
            lookup,
            check_positions,
        })
    }

    /// Number of parity equations, `p`
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Codeword length covered by the matrix
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Entry at 0-based `row` and 1-based `position`
    pub fn get(&self, row: usize, position: Position) -> bool {
        self.rows
            .get(row)
            .and_then(|r| r.get(position.index()).map(|bit| *bit))
            .unwrap_or(false)
    }

    /// Row `row` as a bit slice over positions `1..=width`
    pub fn row(&self, row: usize) -> Option<&BitSlice<u8, Msb0>> {
        self.rows.get(row).map(|r| r.as_bitslice())
    }

    /// Column pattern at `position`, bit `i` for row `i`
    pub fn column(&self, position: Position) -> Option<usize> {
        self.columns.get(position.index()).copied()
    }

    /// Finds the position whose column equals a syndrome value
    pub fn locate(&self, syndrome_index: usize) -> Option<Position> {
        self.lookup.get(&syndrome_index).copied()
    }

    /// Parity/data layout implied by the unit columns.
    ///
    /// Entry `i` of `parity` is the position checked only by row `i`; data positions are the
    /// remaining ones in ascending order.
    pub fn positions(&self) -> PositionSets {
        let data = (0..self.width())
            .map(Position::from_index)
            .filter(|pos| !self.check_positions.contains(pos))
            .collect();
        PositionSets {
            parity: self.check_positions.clone(),
            data,
        }
    }

    /// Computes `H · word (mod 2)`; `word` must be exactly `width` bits.
    pub fn syndrome(&self, word: &BitVector) -> Result<Syndrome> {
        if word.len() != self.width() {
            return Err(Error::LengthMismatch {
                expected: self.width(),
                actual: word.len(),
            });
        }

        let bits = word.as_bitslice();
        let mut index = 0usize;
        for (i, row) in self.rows.iter().enumerate() {
            let ones = row
                .iter_ones()
                .filter(|&col| bits[col])
                .count();
            if ones % 2 == 1 {
                index |= 1 << i;
            }
        }
        Ok(Syndrome::from_index(index, self.height()))
    }
}

impl fmt::Display for ParityCheckMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position ->")?;
        for pos in 1..=self.width() {
            write!(f, "{:>3}", pos)?;
        }
        writeln!(f)?;
        writeln!(f, "{:11}{}", "", "-".repeat(self.width() * 3))?;
        for (row, check) in self.rows.iter().zip(&self.check_positions) {
            write!(f, "  P{:<5} ->", check.get())?;
            for bit in row.iter() {
                write!(f, "{:>3}", u8::from(*bit))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// A `k × (k + p)` generator matrix in systematic form `[I_k | P]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorMatrix {
    k: usize,
    p: usize,
    rows: Vec<BitVec<u8, Msb0>>,
}

impl GeneratorMatrix {
    pub fn k(&self) -> usize {
        self.k
    }

    pub fn width(&self) -> usize {
        self.k + self.p
    }

    pub fn row(&self, row: usize) -> Option<&BitSlice<u8, Msb0>> {
        self.rows.get(row).map(|r| r.as_bitslice())
    }

    /// Computes `info · G (mod 2)`
    pub fn multiply(&self, info: &BitVector) -> Result<BitVector> {
        if info.len() != self.k {
            return Err(Error::LengthMismatch {
                expected: self.k,
                actual: info.len(),
            });
        }
        let mut out = bitvec![u8, Msb0; 0; self.width()];
        for row in info.as_bitslice().iter_ones() {
            for col in self.rows[row].iter_ones() {
                let bit = out[col];
                out.set(col, !bit);
            }
        }
        Ok(BitVector::from_bitslice(&out))
    }

    /// Derives `H = [Pᵗ | I_p]`
    pub fn parity_check(&self) -> Result<ParityCheckMatrix> {
        let mut columns = Vec::with_capacity(self.width());
        for row in &self.rows {
            let pattern = row[self.k..]
                .iter_ones()
                .fold(0usize, |acc, i| acc | (1 << i));
            columns.push(pattern);
        }
        columns.extend((0..self.p).map(|i| 1usize << i));
        ParityCheckMatrix::from_columns(self.p, columns)
    }
}

impl fmt::Display for GeneratorMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for (j, bit) in row.iter().enumerate() {
                if j == self.k {
                    write!(f, " |")?;
                }
                write!(f, " {}", u8::from(*bit))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// A way of laying out the parity-check matrix for a geometry.
pub trait MatrixStrategy {
    /// Builds the parity-check matrix
    fn build(&self, geometry: &CodeGeometry) -> Result<ParityCheckMatrix>;

    /// Parity/data layout matching [`MatrixStrategy::build`]
    fn positions(&self, geometry: &CodeGeometry) -> PositionSets;
}

/// Powers-of-two parity layout, `H[row][col] = (col >> row) & 1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Canonical;

impl MatrixStrategy for Canonical {
    fn build(&self, geometry: &CodeGeometry) -> Result<ParityCheckMatrix> {
        let h = ParityCheckMatrix::from_columns(geometry.p, (1..=geometry.n).collect())?;
        debug!(
            "built canonical parity-check matrix {}x{} for k={}",
            h.height(),
            h.width(),
            geometry.k
        );
        Ok(h)
    }

    fn positions(&self, geometry: &CodeGeometry) -> PositionSets {
        derive_positions(geometry)
    }
}

/// Generator-first layout `G = [I_k | P]`, `H = [Pᵗ | I_p]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Systematic;

impl Systematic {
    /// Builds the generator matrix.
    ///
    /// Each information row gets a distinct p-bit pattern taken in increasing order from
    /// 3 upward, skipping powers of two (those belong to the identity block). The last row is
    /// forced to all ones.
    pub fn generator(&self, geometry: &CodeGeometry) -> Result<GeneratorMatrix> {
        let (k, p) = (geometry.k, geometry.p);
        let all_ones = (1usize << p) - 1;

        let mut rows = Vec::with_capacity(k);
        let mut d = 3usize;
        for i in 0..k {
            let mut row = bitvec![u8, Msb0; 0; k + p];
            row.set(i, true);

            if i + d == 1usize << (d - 1) {
                d += 1;
            }
            let pattern = if i + 1 < k { i + d } else { all_ones };
            if pattern > all_ones {
                return Err(Error::DegenerateMatrix {
                    column: i + 1,
                    reason: format!("pattern {} does not fit in {} parity bits", pattern, p),
                });
            }

            // Most significant bit first
            for j in 0..p {
                row.set(k + j, (pattern >> (p - 1 - j)) & 1 == 1);
            }
            rows.push(row);
        }

        Ok(GeneratorMatrix { k, p, rows })
    }
}

impl MatrixStrategy for Systematic {
    fn build(&self, geometry: &CodeGeometry) -> Result<ParityCheckMatrix> {
        let h = self.generator(geometry)?.parity_check()?;
        debug!(
            "built systematic parity-check matrix {}x{} for k={}",
            h.height(),
            h.width(),
            geometry.k
        );
        Ok(h)
    }

    fn positions(&self, geometry: &CodeGeometry) -> PositionSets {
        systematic_positions(geometry)
    }
}

/// Caller-selected matrix construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Strategy {
    #[default]
    Canonical,
    Systematic,
}

impl MatrixStrategy for Strategy {
    fn build(&self, geometry: &CodeGeometry) -> Result<ParityCheckMatrix> {
        match self {
            Strategy::Canonical => Canonical.build(geometry),
            Strategy::Systematic => Systematic.build(geometry),
        }
    }

    fn positions(&self, geometry: &CodeGeometry) -> PositionSets {
        match self {
            Strategy::Canonical => Canonical.positions(geometry),
            Strategy::Systematic => Systematic.positions(geometry),
        }
    }
}
