//! Per-frame genetic optimizers that fit overlay placements and error
//! corrections to pose-estimator landmarks.

pub mod config;
pub mod engines;
pub mod error;
pub mod types;

pub use error::{PosefitError, Result};
