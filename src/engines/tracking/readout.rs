use serde::{Deserialize, Serialize};
use std::fmt;

/// On-screen values for the correction optimizer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrectionReadout {
    pub raw_error: f64,
    pub correction: f64,
    pub fitness: f64,
}

impl CorrectionReadout {
    pub fn corrected_error(&self) -> f64 {
        (self.raw_error + self.correction).abs()
    }
}

impl fmt::Display for CorrectionReadout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Error: {:.2}  Correction: {:.2}  Fitness: {:.2}",
            self.raw_error, self.correction, self.fitness
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_two_decimals() {
        let readout = CorrectionReadout {
            raw_error: 40.0,
            correction: -39.876,
            fitness: 0.8896,
        };
        assert_eq!(
            readout.to_string(),
            "Error: 40.00  Correction: -39.88  Fitness: 0.89"
        );
    }
}
