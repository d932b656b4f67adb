//! Repeated random transmission trials.
//!
//! Each trial draws random information bits, an error multiplicity in `0..=2` and that many
//! distinct positions, then encodes, corrupts and decodes. Trials share nothing, so they run
//! in parallel; each one seeds its own generator from `(seed, trial)` to stay reproducible
//! regardless of scheduling.

use super::bits::BitVector;
use super::channel::ErrorPattern;
use super::codec::HammingCodec;
use super::decoder::{Decoded, Verdict};
use crate::cs::error::Result;
use bitvec::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

/// One completed trial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialReport {
    pub trial: usize,
    pub info: BitVector,
    pub codeword: BitVector,
    pub pattern: ErrorPattern,
    pub received: BitVector,
    pub decoded: Decoded,
    /// Correctable verdict and recovered bits equal to `info`
    pub recovered: bool,
}

/// Tally of verdicts over a batch of trials.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrialSummary {
    pub trials: usize,
    pub no_error: usize,
    pub single_error: usize,
    pub overall_parity_only: usize,
    pub double_error: usize,
    pub recovered: usize,
}

impl TrialSummary {
    pub fn from_reports(reports: &[TrialReport]) -> Self {
        reports.iter().fold(TrialSummary::default(), |mut acc, r| {
            acc.trials += 1;
            match r.decoded.verdict {
                Verdict::NoError => acc.no_error += 1,
                Verdict::SingleError(_) => acc.single_error += 1,
                Verdict::OverallParityOnlyError => acc.overall_parity_only += 1,
                Verdict::DoubleErrorDetected => acc.double_error += 1,
            }
            if r.recovered {
                acc.recovered += 1;
            }
            acc
        })
    }
}

fn trial_rng(seed: u64, trial: usize) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(trial as u64);
    rng
}

/// Random information bits of length `k`
pub fn random_bits<R: Rng + ?Sized>(rng: &mut R, k: usize) -> BitVector {
    let bits: BitVec<u8, Msb0> = (0..k).map(|_| rng.gen::<bool>()).collect();
    BitVector::from_bitslice(&bits)
}

/// Runs trial number `trial` of the batch seeded with `seed`.
pub fn run_trial(codec: &HammingCodec, seed: u64, trial: usize) -> Result<TrialReport> {
    let mut rng = trial_rng(seed, trial);
    let info = random_bits(&mut rng, codec.geometry().k);
    let multiplicity = rng.gen_range(0..=2);
    let codeword = codec.encode(&info)?;
    let pattern = ErrorPattern::random(&mut rng, codeword.len(), multiplicity)?;
    let received = pattern.apply(&codeword)?;
    let decoded = codec.decode(&received)?;
    let recovered = codec.recovered(&info, &decoded);

    Ok(TrialReport {
        trial,
        info,
        codeword,
        pattern,
        received,
        decoded,
        recovered,
    })
}

/// Runs `trials` independent trials in parallel, returned in trial order.
pub fn run_trials(codec: &HammingCodec, trials: usize, seed: u64) -> Result<Vec<TrialReport>> {
    (0..trials)
        .into_par_iter()
        .map(|trial| run_trial(codec, seed, trial))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::super::codec::CodecConfig;
    use super::super::decoder::Mode;
    use super::super::matrix::Strategy;
    use super::*;

    #[test]
    fn test_trials_are_reproducible() {
        let codec = HammingCodec::extended_8_4();
        let a = run_trials(&codec, 50, 7).unwrap();
        let b = run_trials(&codec, 50, 7).unwrap();
        assert_eq!(a, b);
        assert!(a.iter().enumerate().all(|(i, r)| r.trial == i));
    }

    #[test]
    fn test_secded_trials_never_miscorrect() {
        for strategy in [Strategy::Canonical, Strategy::Systematic] {
            let codec = HammingCodec::new(CodecConfig::new(26, strategy, Mode::SecDed)).unwrap();
            let reports = run_trials(&codec, 300, 2024).unwrap();
            for report in &reports {
                match report.pattern.multiplicity() {
                    2 => assert_eq!(report.decoded.verdict, Verdict::DoubleErrorDetected),
                    _ => assert!(report.recovered, "trial {} failed", report.trial),
                }
            }

            let summary = TrialSummary::from_reports(&reports);
            assert_eq!(summary.trials, 300);
            assert_eq!(
                summary.no_error
                    + summary.single_error
                    + summary.overall_parity_only
                    + summary.double_error,
                300
            );
            assert_eq!(summary.recovered, 300 - summary.double_error);
        }
    }
}
