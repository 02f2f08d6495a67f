use super::genome::{Correction, Placement};
use crate::config::{PlacementSeeding, UniformRange};
use crate::types::{CorrectionSignal, EyePair};
use rand::Rng;

/// Draws one random genome for the initial population.
pub trait Seeder<G, O> {
    fn seed<R: Rng>(&self, observation: &O, rng: &mut R) -> G;
}

/// Starts the search near the left eye and leaves the size free.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlacementSeeder {
    pub ranges: PlacementSeeding,
}

impl PlacementSeeder {
    pub fn new(ranges: PlacementSeeding) -> Self {
        Self { ranges }
    }
}

impl Seeder<Placement, EyePair> for PlacementSeeder {
    fn seed<R: Rng>(&self, eyes: &EyePair, rng: &mut R) -> Placement {
        Placement {
            tx: eyes.left.x - self.ranges.tx_offset.sample(rng),
            ty: eyes.left.y - self.ranges.ty_offset.sample(rng),
            width: self.ranges.width.sample(rng),
            height: self.ranges.height.sample(rng),
        }
    }
}

/// Uniform over a fixed range; ignores the observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrectionSeeder {
    pub range: UniformRange,
}

impl Default for CorrectionSeeder {
    fn default() -> Self {
        Self {
            range: UniformRange::new(-50.0, 50.0),
        }
    }
}

impl CorrectionSeeder {
    pub fn new(range: UniformRange) -> Self {
        Self { range }
    }
}

impl Seeder<Correction, CorrectionSignal> for CorrectionSeeder {
    fn seed<R: Rng>(&self, _signal: &CorrectionSignal, rng: &mut R) -> Correction {
        Correction::new(self.range.sample(rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_placement_seeds_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let eyes = EyePair::new(Point::new(200.0, 120.0), Point::new(260.0, 118.0));
        let seeder = PlacementSeeder::default();

        for _ in 0..200 {
            let p = seeder.seed(&eyes, &mut rng);
            assert!(p.tx >= 140.0 && p.tx <= 170.0);
            assert!(p.ty >= 80.0 && p.ty <= 100.0);
            assert!(p.width >= 60.0 && p.width <= 100.0);
            assert!(p.height >= 20.0 && p.height <= 50.0);
        }
    }

    #[test]
    fn test_correction_seeds_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let seeder = CorrectionSeeder::default();
        for _ in 0..200 {
            let c = seeder.seed(&CorrectionSignal::new(40.0), &mut rng);
            assert!(c.correction >= -50.0 && c.correction <= 50.0);
        }
    }
}
