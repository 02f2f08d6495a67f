use crate::config::AffineOptimizerConfig;
use crate::engines::generation::{LogProgress, Placement, PlacementOptimizer};
use crate::error::Result;
use crate::types::{EyePair, Pose};
use rand::rngs::StdRng;
use rand::Rng;

/// Places an overlay image (e.g. glasses) over the detected eyes, one frame
/// at a time.
pub struct OverlayFitter<R = StdRng> {
    optimizer: PlacementOptimizer<R>,
    last: Option<Placement>,
    progress: LogProgress,
}

impl OverlayFitter {
    pub fn from_config(config: &AffineOptimizerConfig, seed: Option<u64>) -> Result<Self> {
        Ok(Self::new(PlacementOptimizer::from_config(config, seed)?))
    }
}

impl<R: Rng> OverlayFitter<R> {
    pub fn new(optimizer: PlacementOptimizer<R>) -> Self {
        Self {
            optimizer,
            last: None,
            progress: LogProgress::new("overlay"),
        }
    }

    /// Returns `None` without touching the optimizer when there is no pose or
    /// either eye is missing.
    pub fn fit(&mut self, pose: Option<&Pose>) -> Result<Option<Placement>> {
        let Some(eyes) = pose.and_then(EyePair::from_pose) else {
            log::debug!("Eyes not detected; overlay skipped");
            return Ok(None);
        };

        let placement = self.optimizer.run_with(&eyes, &mut self.progress)?;
        self.last = Some(placement);
        Ok(Some(placement))
    }

    /// Placement from the most recent frame that had both eyes.
    pub fn last_placement(&self) -> Option<Placement> {
        self.last
    }

    pub fn optimizer(&self) -> &PlacementOptimizer<R> {
        &self.optimizer
    }
}
