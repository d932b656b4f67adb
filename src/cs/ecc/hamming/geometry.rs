//! Code geometry: how many parity bits a message needs and where they live.

use super::bits::Position;
use crate::cs::error::{Error, Result};

/// Largest supported number of parity bits. Keeps `2^p - 1` allocations bounded.
pub const MAX_PARITY_BITS: usize = 24;

/// Dimensions of a distance-3 Hamming code for `k` information bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CodeGeometry {
    /// Number of information bits
    pub k: usize,
    /// Number of parity bits, minimal with `2^p - p - 1 >= k`
    pub p: usize,
    /// Full code length `2^p - 1`
    pub n: usize,
    /// Length with the overall-parity bit appended, `n + 1`
    pub n_ext: usize,
}

impl CodeGeometry {
    /// Length of the shortened systematic code, `k + p`
    pub fn systematic_len(&self) -> usize {
        self.k + self.p
    }

    /// Data positions available in the full code, `n - p`
    pub fn capacity(&self) -> usize {
        self.n - self.p
    }
}

/// Resolves the minimal geometry for `k` information bits.
///
/// Starts at `p = 2` and grows `p` until `2^p - p - 1 >= k`.
pub fn resolve(k: usize) -> Result<CodeGeometry> {
    if k == 0 {
        return Err(Error::InvalidLength { k });
    }

    let mut p = 2;
    while (1usize << p) - p - 1 < k {
        p += 1;
        if p > MAX_PARITY_BITS {
            return Err(Error::UnsupportedLength {
                k,
                max_parity_bits: MAX_PARITY_BITS,
            });
        }
    }

    let n = (1usize << p) - 1;
    Ok(CodeGeometry {
        k,
        p,
        n,
        n_ext: n + 1,
    })
}

/// Parity and data positions partitioning `1..=len`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionSets {
    /// Parity positions; entry `i` is the position checked only by row `i` of H
    pub parity: Vec<Position>,
    /// Data positions in the order information bits are placed
    pub data: Vec<Position>,
}

impl PositionSets {
    /// Number of positions covered
    pub fn len(&self) -> usize {
        self.parity.len() + self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `position` holds a parity bit
    pub fn is_parity(&self, position: Position) -> bool {
        self.parity.contains(&position)
    }
}

/// Canonical layout: parity bits at the powers of two up to `n`, data everywhere else.
pub fn derive_positions(geometry: &CodeGeometry) -> PositionSets {
    let parity: Vec<Position> = (0..geometry.p)
        .map(|j| Position::from_index((1usize << j) - 1))
        .collect();

    let data = (1..=geometry.n)
        .filter(|pos| !pos.is_power_of_two())
        .map(|pos| Position::from_index(pos - 1))
        .collect();

    PositionSets { parity, data }
}

/// Systematic layout: data in `1..=k`, parity in `k+1..=k+p`.
pub fn systematic_positions(geometry: &CodeGeometry) -> PositionSets {
    PositionSets {
        parity: (geometry.k..geometry.k + geometry.p)
            .map(Position::from_index)
            .collect(),
        data: (0..geometry.k).map(Position::from_index).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_resolve_7_4() {
        let g = resolve(4).unwrap();
        assert_eq!(g.p, 3);
        assert_eq!(g.n, 7);
        assert_eq!(g.n_ext, 8);
        assert_eq!(g.systematic_len(), 7);
    }

    #[test]
    fn test_resolve_zero_is_invalid() {
        assert_eq!(resolve(0), Err(Error::InvalidLength { k: 0 }));
    }

    #[test]
    fn test_resolve_is_minimal() {
        for k in 1..=300usize {
            let g = resolve(k).unwrap();
            assert!((1usize << g.p) - g.p - 1 >= k, "k={} p={}", k, g.p);
            if g.p > 2 {
                let q = g.p - 1;
                assert!((1usize << q) - q - 1 < k, "p not minimal for k={}", k);
            }
        }
    }

    #[test]
    fn test_resolve_boundaries() {
        assert_eq!(resolve(1).unwrap().p, 2);
        assert_eq!(resolve(2).unwrap().p, 3);
        assert_eq!(resolve(11).unwrap().p, 4);
        assert_eq!(resolve(12).unwrap().p, 5);
        assert_eq!(resolve(57).unwrap().p, 6);
        assert_eq!(resolve(58).unwrap().p, 7);
    }

    #[test]
    fn test_resolve_rejects_huge_messages() {
        let k = (1usize << MAX_PARITY_BITS) - MAX_PARITY_BITS;
        assert!(matches!(
            resolve(k),
            Err(Error::UnsupportedLength { .. })
        ));
    }

    #[test]
    fn test_canonical_positions_k4() {
        let sets = derive_positions(&resolve(4).unwrap());
        let parity: Vec<usize> = sets.parity.iter().map(|p| p.get()).collect();
        let data: Vec<usize> = sets.data.iter().map(|p| p.get()).collect();
        assert_eq!(parity, vec![1, 2, 4]);
        assert_eq!(data, vec![3, 5, 6, 7]);
        assert!(sets.is_parity(Position::new(4).unwrap()));
        assert!(!sets.is_parity(Position::new(6).unwrap()));
    }

    #[test]
    fn test_positions_partition_code() {
        for k in 1..=64 {
            let g = resolve(k).unwrap();
            for sets in [derive_positions(&g), systematic_positions(&g)] {
                assert_eq!(sets.parity.len(), g.p);
                let all: HashSet<usize> = sets
                    .parity
                    .iter()
                    .chain(sets.data.iter())
                    .map(|p| p.get())
                    .collect();
                assert_eq!(all.len(), sets.len());
                assert_eq!(all, (1..=sets.len()).collect::<HashSet<_>>());
            }
            assert_eq!(derive_positions(&g).len(), g.n);
            assert_eq!(derive_positions(&g).data.len(), g.capacity());
            assert_eq!(systematic_positions(&g).len(), g.systematic_len());
        }
    }
}
