//! A configured Hamming codec bundling geometry, matrix and layout.

use super::bits::BitVector;
use super::channel::ErrorPattern;
use super::decoder::{decode, Decoded, Mode};
use super::encoder::{add_overall_parity, encode};
use super::geometry::{resolve, CodeGeometry, PositionSets};
use super::matrix::{MatrixStrategy, ParityCheckMatrix, Strategy, Syndrome};
use crate::cs::ecc::ErrorCorrection;
use crate::cs::error::{Error, Result};
use bitvec::prelude::*;
use bitvec::view::BitView;
use log::debug;

/// Caller-selected codec parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CodecConfig {
    /// Information bits per codeword
    pub k: usize,
    pub strategy: Strategy,
    pub mode: Mode,
}

impl CodecConfig {
    pub fn new(k: usize, strategy: Strategy, mode: Mode) -> Self {
        CodecConfig { k, strategy, mode }
    }
}

/// An immutable Hamming codec for one configuration.
///
/// Building resolves the geometry and the parity-check matrix once; encode and decode calls
/// are pure afterwards, so a codec can be shared across threads.
#[derive(Debug, Clone)]
pub struct HammingCodec {
    config: CodecConfig,
    geometry: CodeGeometry,
    matrix: ParityCheckMatrix,
    positions: PositionSets,
}

impl HammingCodec {
    /// Builds a codec, failing on an invalid `k` or a degenerate matrix
    pub fn new(config: CodecConfig) -> Result<Self> {
        let geometry = resolve(config.k)?;
        let matrix = config.strategy.build(&geometry)?;
        let positions = config.strategy.positions(&geometry);
        debug!(
            "hamming codec k={} p={} length={} {:?} {:?}",
            geometry.k,
            geometry.p,
            config.mode.codeword_len(matrix.width()),
            config.strategy,
            config.mode
        );
        Ok(HammingCodec {
            config,
            geometry,
            matrix,
            positions,
        })
    }

    /// The classic (7,4) code
    pub fn standard_7_4() -> Self {
        // k = 4 always resolves and the canonical matrix is never degenerate
        Self::new(CodecConfig::new(4, Strategy::Canonical, Mode::Sec)).unwrap()
    }

    /// The extended (8,4) SEC-DED code
    pub fn extended_8_4() -> Self {
        Self::new(CodecConfig::new(4, Strategy::Canonical, Mode::SecDed)).unwrap()
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn geometry(&self) -> &CodeGeometry {
        &self.geometry
    }

    pub fn matrix(&self) -> &ParityCheckMatrix {
        &self.matrix
    }

    pub fn positions(&self) -> &PositionSets {
        &self.positions
    }

    pub fn mode(&self) -> Mode {
        self.config.mode
    }

    /// Number of bits in a transmitted codeword
    pub fn codeword_len(&self) -> usize {
        self.config.mode.codeword_len(self.matrix.width())
    }

    /// Encodes `k` information bits into a codeword
    pub fn encode(&self, info: &BitVector) -> Result<BitVector> {
        let word = encode(&self.geometry, &self.positions, &self.matrix, info)?;
        Ok(match self.config.mode {
            Mode::Sec => word,
            Mode::SecDed => add_overall_parity(&word),
        })
    }

    /// Decodes a received codeword
    pub fn decode(&self, received: &BitVector) -> Result<Decoded> {
        decode(
            &self.geometry,
            &self.positions,
            &self.matrix,
            self.config.mode,
            received,
        )
    }

    /// Syndrome of the first `n` bits of a received codeword
    pub fn syndrome(&self, received: &BitVector) -> Result<Syndrome> {
        if received.len() != self.codeword_len() {
            return Err(Error::LengthMismatch {
                expected: self.codeword_len(),
                actual: received.len(),
            });
        }
        self.matrix.syndrome(&received.prefix(self.matrix.width())?)
    }

    /// Encodes, passes through `pattern`, and decodes
    pub fn transmit(&self, info: &BitVector, pattern: &ErrorPattern) -> Result<Decoded> {
        let codeword = self.encode(info)?;
        let received = pattern.apply(&codeword)?;
        self.decode(&received)
    }

    /// Whether `decoded` recovered exactly `original`
    pub fn recovered(&self, original: &BitVector, decoded: &Decoded) -> bool {
        decoded.verdict.is_correctable() && decoded.data == *original
    }

    /// Number of encoded bytes needed for `input_bytes` bytes of data
    pub fn encoded_bytes_needed(&self, input_bytes: usize) -> usize {
        if input_bytes == 0 {
            return 0;
        }
        let blocks = (input_bytes * 8 + 1).div_ceil(self.geometry.k);
        (blocks * self.codeword_len()).div_ceil(8)
    }
}

impl ErrorCorrection for HammingCodec {
    /// Splits `data` MSB-first into k-bit blocks and encodes each.
    ///
    /// A single `1` bit is appended after the data and the last block is filled with zeros,
    /// so the decoder can find where the data ends even when it ends in zero bytes.
    fn encode(&self, data: &[u8]) -> Result<Vec<u8>> {
        if data.is_empty() {
            return Ok(Vec::new());
        }

        let k = self.geometry.k;
        let len = self.codeword_len();
        let data_bits = data.view_bits::<Msb0>();
        let blocks = (data_bits.len() + 1).div_ceil(k);

        let mut payload = bitvec![u8, Msb0; 0; blocks * k];
        payload[..data_bits.len()].copy_from_bitslice(data_bits);
        payload.set(data_bits.len(), true);

        let mut encoded = bitvec![u8, Msb0; 0; blocks * len];
        for block in 0..blocks {
            let info = BitVector::from_bitslice(&payload[block * k..(block + 1) * k]);
            let word = HammingCodec::encode(self, &info)?;
            encoded[block * len..(block + 1) * len].copy_from_bitslice(word.as_bitslice());
        }

        Ok(encoded.into_vec())
    }

    /// Decodes whole blocks, correcting single errors, and strips the end-of-data marker.
    ///
    /// Returns exactly the bytes given to [`ErrorCorrection::encode`]. A block with a
    /// detected double error yields [`Error::Uncorrectable`]; a payload without a marker on a
    /// byte boundary yields [`Error::InvalidInput`].
    fn decode(&self, data: &[u8]) -> Result<Vec<u8>> {
        if data.is_empty() {
            return Ok(Vec::new());
        }

        let len = self.codeword_len();
        let encoded = data.view_bits::<Msb0>();
        let blocks = encoded.len() / len;
        if blocks == 0 {
            return Err(Error::InvalidInput(format!(
                "Encoded data too short, need at least {} bytes",
                len.div_ceil(8)
            )));
        }

        let k = self.geometry.k;
        let mut decoded = bitvec![u8, Msb0; 0; blocks * k];
        for block in 0..blocks {
            let received = BitVector::from_bitslice(&encoded[block * len..(block + 1) * len]);
            let data = HammingCodec::decode(self, &received)?.into_data()?;
            decoded[block * k..(block + 1) * k].copy_from_bitslice(data.as_bitslice());
        }

        // Zero bits after the marker are block fill or byte padding of the encoded stream
        let marker = decoded
            .last_one()
            .ok_or_else(|| Error::InvalidInput("End-of-data marker not found".to_string()))?;
        if marker % 8 != 0 {
            return Err(Error::InvalidInput(format!(
                "End-of-data marker at bit {} is not on a byte boundary",
                marker
            )));
        }
        decoded.truncate(marker);
        Ok(decoded.into_vec())
    }
}
