use super::readout::CorrectionReadout;
use crate::config::{CorrectionOptimizerConfig, Lifecycle};
use crate::engines::generation::{CorrectionOptimizer, LogProgress};
use crate::error::Result;
use crate::types::{CorrectionSignal, Landmark, Pose};
use rand::rngs::StdRng;
use rand::Rng;

/// Learns a correction for the horizontal offset between a tracked wrist
/// and a fixed target. With a persistent lifecycle the population evolves by
/// one generation per frame.
pub struct WristCorrector<R = StdRng> {
    optimizer: CorrectionOptimizer<R>,
    landmark: Landmark,
    target_x: f64,
    last_error: Option<f64>,
    progress: LogProgress,
}

impl WristCorrector {
    pub fn from_config(config: &CorrectionOptimizerConfig, seed: Option<u64>) -> Result<Self> {
        Ok(Self::new(
            CorrectionOptimizer::from_config(config, seed)?,
            config.landmark,
            config.target_x,
        ))
    }
}

impl<R: Rng> WristCorrector<R> {
    pub fn new(optimizer: CorrectionOptimizer<R>, landmark: Landmark, target_x: f64) -> Self {
        Self {
            optimizer,
            landmark,
            target_x,
            last_error: None,
            progress: LogProgress::new("wrist"),
        }
    }

    /// Signed horizontal offset of the landmark from the target.
    pub fn raw_error(&self, pose: &Pose) -> Option<f64> {
        pose.position(self.landmark).map(|p| p.x - self.target_x)
    }

    /// One frame. Without the landmark nothing changes and `None` is returned.
    pub fn update(&mut self, pose: Option<&Pose>) -> Result<Option<CorrectionReadout>> {
        let Some(signal) = pose
            .and_then(|p| self.raw_error(p))
            .map(CorrectionSignal::new)
        else {
            log::debug!("{:?} not detected; correction step skipped", self.landmark);
            return Ok(None);
        };

        let lifecycle = self.optimizer.settings().lifecycle;
        match lifecycle {
            Lifecycle::Persistent => {
                self.optimizer.step_with(&signal, &mut self.progress)?;
            }
            Lifecycle::Fresh => {
                self.optimizer.run_with(&signal, &mut self.progress)?;
            }
        }

        self.last_error = Some(signal.error);
        Ok(self.readout())
    }

    /// Latest raw error with the current best correction and its fitness.
    pub fn readout(&self) -> Option<CorrectionReadout> {
        let best = self.optimizer.best()?;
        Some(CorrectionReadout {
            raw_error: self.last_error?,
            correction: best.genome.correction,
            fitness: best.fitness,
        })
    }

    pub fn optimizer(&self) -> &CorrectionOptimizer<R> {
        &self.optimizer
    }
}
