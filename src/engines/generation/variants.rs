use super::evolution_engine::Optimizer;
use super::fitness::{AnchorFitness, CorrectionFitness};
use super::genome::{Correction, Placement};
use super::seeding::{CorrectionSeeder, PlacementSeeder};
use crate::config::{AffineOptimizerConfig, ConfigSection, CorrectionOptimizerConfig};
use crate::error::Result;
use crate::types::{CorrectionSignal, EyePair};
use rand::rngs::StdRng;
use rand::Rng;

/// Fits an overlay rectangle to a pair of detected eyes.
pub type PlacementOptimizer<R = StdRng> =
    Optimizer<Placement, EyePair, AnchorFitness, PlacementSeeder, R>;

/// Learns an additive correction for a raw error signal.
pub type CorrectionOptimizer<R = StdRng> =
    Optimizer<Correction, CorrectionSignal, CorrectionFitness, CorrectionSeeder, R>;

impl PlacementOptimizer {
    pub fn from_config(config: &AffineOptimizerConfig, seed: Option<u64>) -> Result<Self> {
        config.validate()?;
        Self::new(
            config.settings(),
            AnchorFitness::new(config.anchors),
            PlacementSeeder::new(config.seeding),
            seed,
        )
    }
}

impl<R: Rng> PlacementOptimizer<R> {
    pub fn from_config_with_rng(config: &AffineOptimizerConfig, rng: R) -> Result<Self> {
        config.validate()?;
        Self::with_rng(
            config.settings(),
            AnchorFitness::new(config.anchors),
            PlacementSeeder::new(config.seeding),
            rng,
        )
    }
}

impl CorrectionOptimizer {
    pub fn from_config(config: &CorrectionOptimizerConfig, seed: Option<u64>) -> Result<Self> {
        config.validate()?;
        Self::new(
            config.settings(),
            CorrectionFitness,
            CorrectionSeeder::new(config.correction_range),
            seed,
        )
    }
}

impl<R: Rng> CorrectionOptimizer<R> {
    pub fn from_config_with_rng(config: &CorrectionOptimizerConfig, rng: R) -> Result<Self> {
        config.validate()?;
        Self::with_rng(
            config.settings(),
            CorrectionFitness,
            CorrectionSeeder::new(config.correction_range),
            rng,
        )
    }
}
