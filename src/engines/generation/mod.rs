pub mod genome;
pub mod population;
pub mod fitness;
pub mod seeding;
pub mod operators;
pub mod evolution_engine;
pub mod progress;
pub mod variants;

pub use genome::{Correction, GenomeCodec, Placement};
pub use population::{Individual, Population};
pub use fitness::{AnchorFitness, CorrectionFitness, FitnessFunction};
pub use seeding::{CorrectionSeeder, PlacementSeeder, Seeder};
pub use evolution_engine::{Optimizer, ProgressCallback};
pub use progress::{FitnessHistory, LogProgress, NoopProgress};
pub use variants::{CorrectionOptimizer, PlacementOptimizer};
