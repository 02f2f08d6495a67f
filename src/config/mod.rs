pub mod traits;
pub mod evolution;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use evolution::{
    AffineOptimizerConfig, AnchorLayout, CorrectionOptimizerConfig, EvolutionSettings, Lifecycle,
    PlacementSeeding, ReproductionPolicy, UniformRange,
};
pub use traits::{ConfigManifest, ConfigSection, FieldManifest};
