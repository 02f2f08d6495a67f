use super::genome::{Correction, Placement};
use crate::config::AnchorLayout;
use crate::types::{CorrectionSignal, EyePair};

/// Scores a genome against the current observation. Higher is better.
///
/// Implementations must be pure: the same (genome, observation) pair always
/// yields the same value, whatever order individuals are scored in.
pub trait FitnessFunction<G, O> {
    fn evaluate(&self, genome: &G, observation: &O) -> f64;
}

/// Negative summed distance between the overlay's predicted eye anchors and
/// the detected eyes. Always `<= 0`, and `0` only on an exact fit.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnchorFitness {
    pub layout: AnchorLayout,
}

impl AnchorFitness {
    pub fn new(layout: AnchorLayout) -> Self {
        Self { layout }
    }
}

impl FitnessFunction<Placement, EyePair> for AnchorFitness {
    fn evaluate(&self, genome: &Placement, eyes: &EyePair) -> f64 {
        let (left, right) = genome.anchors(&self.layout);
        -(left.distance(&eyes.left) + right.distance(&eyes.right))
    }
}

/// `1 / (|error + correction| + 1)`, in `(0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CorrectionFitness;

impl CorrectionFitness {
    pub fn corrected_error(genome: &Correction, signal: &CorrectionSignal) -> f64 {
        (signal.error + genome.correction).abs()
    }
}

impl FitnessFunction<Correction, CorrectionSignal> for CorrectionFitness {
    fn evaluate(&self, genome: &Correction, signal: &CorrectionSignal) -> f64 {
        // +1 keeps the denominator away from zero
        1.0 / (Self::corrected_error(genome, signal) + 1.0)
    }
}
