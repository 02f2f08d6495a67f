pub mod overlay;
pub mod readout;
pub mod wrist;

pub use overlay::OverlayFitter;
pub use readout::CorrectionReadout;
pub use wrist::WristCorrector;
