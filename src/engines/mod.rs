pub mod generation;
pub mod tracking;
