use super::traits::{ConfigManifest, ConfigSection, FieldManifest};
use crate::engines::generation::genome::{Correction, GenomeCodec, Placement};
use crate::error::PosefitError;
use crate::types::Landmark;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Closed interval `[min, max]` sampled uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UniformRange {
    pub min: f64,
    pub max: f64,
}

impl UniformRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub const fn symmetric(amplitude: f64) -> Self {
        Self {
            min: -amplitude,
            max: amplitude,
        }
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        if self.min == self.max {
            return self.min;
        }
        rng.gen_range(self.min..=self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn validate(&self, name: &str) -> Result<(), PosefitError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(PosefitError::Configuration(format!(
                "{} bounds must be finite",
                name
            )));
        }
        if self.min > self.max {
            return Err(PosefitError::Configuration(format!(
                "{} min ({}) exceeds max ({})",
                name, self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Whether a population survives between invocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifecycle {
    /// Re-seeded on every `run`, discarded after the best is returned.
    Fresh,
    /// Seeded once and evolved across calls.
    Persistent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReproductionPolicy {
    /// Carry the top `elite_count` unchanged, breed the rest from the top half
    /// by averaging two parents and jittering every gene by `±jitter[i]`.
    ElitistAveraging { elite_count: usize, jitter: Vec<f64> },
    /// Fitness-proportional pool (`floor(fitness * pool_scale)` copies each),
    /// coin-flip crossover and probability-gated mutation.
    MatingPool {
        pool_scale: f64,
        mutation_rate: f64,
        mutation_amplitude: f64,
    },
}

impl ReproductionPolicy {
    pub fn validate(&self, population_size: usize, gene_count: usize) -> Result<(), PosefitError> {
        match self {
            ReproductionPolicy::ElitistAveraging { elite_count, jitter } => {
                if *elite_count > population_size {
                    return Err(PosefitError::Configuration(format!(
                        "Elite count ({}) exceeds population size ({})",
                        elite_count, population_size
                    )));
                }
                if population_size / 2 == 0 {
                    return Err(PosefitError::Configuration(
                        "Averaging crossover needs a population of at least 2".to_string(),
                    ));
                }
                if jitter.len() != gene_count {
                    return Err(PosefitError::Configuration(format!(
                        "Jitter has {} amplitudes but the genome has {} genes",
                        jitter.len(),
                        gene_count
                    )));
                }
                if jitter.iter().any(|a| !a.is_finite() || *a < 0.0) {
                    return Err(PosefitError::Configuration(
                        "Jitter amplitudes must be finite and non-negative".to_string(),
                    ));
                }
            }
            ReproductionPolicy::MatingPool {
                pool_scale,
                mutation_rate,
                mutation_amplitude,
            } => {
                if !pool_scale.is_finite() || *pool_scale <= 0.0 {
                    return Err(PosefitError::Configuration(
                        "Pool scale must be positive".to_string(),
                    ));
                }
                if !(0.0..=1.0).contains(mutation_rate) {
                    return Err(PosefitError::Configuration(
                        "Mutation rate must be between 0 and 1".to_string(),
                    ));
                }
                if !mutation_amplitude.is_finite() || *mutation_amplitude < 0.0 {
                    return Err(PosefitError::Configuration(
                        "Mutation amplitude must be finite and non-negative".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Engine-facing settings shared by both optimizer variants.
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionSettings {
    pub population_size: usize,
    pub generations: usize,
    pub lifecycle: Lifecycle,
    pub reproduction: ReproductionPolicy,
}

impl EvolutionSettings {
    pub fn validate(&self, gene_count: usize) -> Result<(), PosefitError> {
        if self.population_size == 0 {
            return Err(PosefitError::Configuration(
                "Population size must be at least 1".to_string(),
            ));
        }
        if self.generations == 0 {
            return Err(PosefitError::Configuration(
                "Generation count must be at least 1".to_string(),
            ));
        }
        self.reproduction.validate(self.population_size, gene_count)
    }
}

/// Where the overlay image's own eye anchors sit, as fractions of its size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorLayout {
    pub left_x: f64,
    pub right_x: f64,
    pub y: f64,
}

impl Default for AnchorLayout {
    fn default() -> Self {
        Self {
            left_x: 0.25,
            right_x: 0.75,
            y: 0.40,
        }
    }
}

/// Initial sampling ranges for placement genomes. Offsets are subtracted
/// from the left eye position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementSeeding {
    pub tx_offset: UniformRange,
    pub ty_offset: UniformRange,
    pub width: UniformRange,
    pub height: UniformRange,
}

impl Default for PlacementSeeding {
    fn default() -> Self {
        Self {
            tx_offset: UniformRange::new(30.0, 60.0),
            ty_offset: UniformRange::new(20.0, 40.0),
            width: UniformRange::new(60.0, 100.0),
            height: UniformRange::new(20.0, 50.0),
        }
    }
}

impl PlacementSeeding {
    fn validate(&self) -> Result<(), PosefitError> {
        self.tx_offset.validate("tx_offset")?;
        self.ty_offset.validate("ty_offset")?;
        self.width.validate("width")?;
        self.height.validate("height")?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AffineOptimizerConfig {
    pub population_size: usize,
    pub generations: usize,
    pub lifecycle: Lifecycle,
    pub reproduction: ReproductionPolicy,
    pub seeding: PlacementSeeding,
    pub anchors: AnchorLayout,
}

impl Default for AffineOptimizerConfig {
    fn default() -> Self {
        Self {
            population_size: 10,
            generations: 5,
            lifecycle: Lifecycle::Fresh,
            reproduction: ReproductionPolicy::ElitistAveraging {
                elite_count: 2,
                jitter: vec![5.0, 5.0, 5.0, 2.0],
            },
            seeding: PlacementSeeding::default(),
            anchors: AnchorLayout::default(),
        }
    }
}

impl AffineOptimizerConfig {
    pub fn settings(&self) -> EvolutionSettings {
        EvolutionSettings {
            population_size: self.population_size,
            generations: self.generations,
            lifecycle: self.lifecycle,
            reproduction: self.reproduction.clone(),
        }
    }
}

impl ConfigSection for AffineOptimizerConfig {
    fn section_name() -> &'static str {
        "affine"
    }

    fn validate(&self) -> Result<(), PosefitError> {
        self.settings().validate(Placement::GENE_COUNT)?;
        self.seeding.validate()?;
        let a = &self.anchors;
        if !(a.left_x.is_finite() && a.right_x.is_finite() && a.y.is_finite()) {
            return Err(PosefitError::Configuration(
                "Anchor fractions must be finite".to_string(),
            ));
        }
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest {
            section: "Affine placement".to_string(),
            fields: vec![
                FieldManifest::new(
                    "population_size",
                    "integer",
                    serde_json::json!(10),
                    Some(2.0),
                    Some(1000.0),
                    "Candidate placements per generation",
                ),
                FieldManifest::new(
                    "generations",
                    "integer",
                    serde_json::json!(5),
                    Some(1.0),
                    Some(1000.0),
                    "Generations run per frame",
                ),
                FieldManifest::new(
                    "lifecycle",
                    "enum",
                    serde_json::json!("fresh"),
                    None,
                    None,
                    "fresh re-seeds every frame, persistent carries the population",
                ),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrectionOptimizerConfig {
    pub population_size: usize,
    pub generations: usize,
    pub lifecycle: Lifecycle,
    pub reproduction: ReproductionPolicy,
    pub correction_range: UniformRange,
    /// Landmark whose horizontal offset from `target_x` is the raw error.
    pub landmark: Landmark,
    pub target_x: f64,
}

impl Default for CorrectionOptimizerConfig {
    fn default() -> Self {
        Self {
            population_size: 20,
            generations: 1,
            lifecycle: Lifecycle::Persistent,
            reproduction: ReproductionPolicy::MatingPool {
                pool_scale: 100.0,
                mutation_rate: 0.1,
                mutation_amplitude: 5.0,
            },
            correction_range: UniformRange::new(-50.0, 50.0),
            landmark: Landmark::RightWrist,
            target_x: 400.0,
        }
    }
}

impl CorrectionOptimizerConfig {
    pub fn settings(&self) -> EvolutionSettings {
        EvolutionSettings {
            population_size: self.population_size,
            generations: self.generations,
            lifecycle: self.lifecycle,
            reproduction: self.reproduction.clone(),
        }
    }
}

impl ConfigSection for CorrectionOptimizerConfig {
    fn section_name() -> &'static str {
        "correction"
    }

    fn validate(&self) -> Result<(), PosefitError> {
        self.settings().validate(Correction::GENE_COUNT)?;
        self.correction_range.validate("correction_range")?;
        if !self.target_x.is_finite() {
            return Err(PosefitError::Configuration(
                "Target x must be finite".to_string(),
            ));
        }
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest {
            section: "Error correction".to_string(),
            fields: vec![
                FieldManifest::new(
                    "population_size",
                    "integer",
                    serde_json::json!(20),
                    Some(1.0),
                    Some(1000.0),
                    "Correction candidates evolved per frame",
                ),
                FieldManifest::new(
                    "target_x",
                    "float",
                    serde_json::json!(400.0),
                    None,
                    None,
                    "Horizontal target the wrist is compared against",
                ),
            ],
        }
    }
}
