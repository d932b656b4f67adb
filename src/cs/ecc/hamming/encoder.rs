//! Systematic placement of information bits and computation of check bits.

use super::bits::{BitVector, Position};
use super::geometry::{CodeGeometry, PositionSets};
use super::matrix::ParityCheckMatrix;
use crate::cs::error::{Error, Result};

/// Encodes `info` into a SEC codeword of `matrix.width()` bits.
///
/// Information bit `i` is written to `positions.data[i]`; unused data positions stay zero.
/// Check bit `i` at `positions.parity[i]` is then set to the XOR of every codeword bit that
/// row `i` of H covers. For the canonical layout that is every position with bit `i` set,
/// for the systematic layout it is the information bits selected by row `i` of `Pᵗ`.
pub fn encode(
    geometry: &CodeGeometry,
    positions: &PositionSets,
    matrix: &ParityCheckMatrix,
    info: &BitVector,
) -> Result<BitVector> {
    if info.len() != geometry.k {
        return Err(Error::LengthMismatch {
            expected: geometry.k,
            actual: info.len(),
        });
    }
    check_layout(geometry, positions, matrix)?;

    let mut word = BitVector::zeros(matrix.width());
    for (i, &slot) in positions.data.iter().take(geometry.k).enumerate() {
        word.set(slot, info.get(Position::from_index(i))?)?;
    }

    for (row, &check) in positions.parity.iter().enumerate() {
        let covered = matrix.row(row).ok_or_else(|| {
            Error::InvalidInput(format!("parity-check matrix has no row {}", row))
        })?;
        let bits = word.as_bitslice();
        let parity = covered.iter_ones().filter(|&col| bits[col]).count() % 2 == 1;
        word.set(check, parity)?;
    }

    Ok(word)
}

/// Appends the overall-parity bit, the XOR of all bits of `word`.
pub fn add_overall_parity(word: &BitVector) -> BitVector {
    word.extended(word.parity())
}

/// Reads the information bits back out of a (corrected) codeword in encode order.
///
/// `word` may carry a trailing overall-parity bit; only positions in `positions.data` are read.
pub fn extract_data(
    geometry: &CodeGeometry,
    positions: &PositionSets,
    word: &BitVector,
) -> Result<BitVector> {
    let mut data = BitVector::zeros(geometry.k);
    for (i, &slot) in positions.data.iter().take(geometry.k).enumerate() {
        data.set(Position::from_index(i), word.get(slot)?)?;
    }
    Ok(data)
}

fn check_layout(
    geometry: &CodeGeometry,
    positions: &PositionSets,
    matrix: &ParityCheckMatrix,
) -> Result<()> {
    if positions.len() != matrix.width() {
        return Err(Error::LengthMismatch {
            expected: matrix.width(),
            actual: positions.len(),
        });
    }
    if positions.data.len() < geometry.k {
        return Err(Error::InvalidInput(format!(
            "{} data positions cannot hold {} information bits",
            positions.data.len(),
            geometry.k
        )));
    }
    if positions.parity.len() != matrix.height() {
        return Err(Error::LengthMismatch {
            expected: matrix.height(),
            actual: positions.parity.len(),
        });
    }
    // Each check bit must be covered by its own equation only
    for (row, &check) in positions.parity.iter().enumerate() {
        if matrix.column(check) != Some(1 << row) {
            return Err(Error::InvalidInput(format!(
                "position {} is not the check bit of row {}",
                check, row
            )));
        }
    }
    Ok(())
}
