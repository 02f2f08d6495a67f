//! Genome representations for the pose optimizers
//!
//! Every genome is a fixed-length tuple of real-valued genes. Reproduction
//! operators never see the named fields: they work on the flat vector produced
//! by [`GenomeCodec::encode`] and hand the result back through
//! [`GenomeCodec::decode`]. This keeps one generational loop for every genome
//! shape.
//!
//! # Example
//!
//! ```
//! use posefit::engines::generation::genome::{GenomeCodec, Placement};
//!
//! let placement = Placement::new(75.0, 88.0, 100.0, 30.0);
//! let genes = placement.encode();
//! assert_eq!(Placement::decode(&genes).unwrap(), placement);
//! ```

use crate::config::AnchorLayout;
use crate::error::{PosefitError, Result};
use crate::types::Point;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

pub trait GenomeCodec: Sized + Clone + Debug {
    /// Gene count; fixed for the lifetime of an optimizer.
    const GENE_COUNT: usize;

    fn encode(&self) -> Vec<f64>;

    fn decode(genes: &[f64]) -> Result<Self>;
}

fn check_len(genes: &[f64], expected: usize, name: &str) -> Result<()> {
    if genes.len() != expected {
        return Err(PosefitError::Genome(format!(
            "{} expects {} genes, got {}",
            name,
            expected,
            genes.len()
        )));
    }
    Ok(())
}

/// Affine placement of a rectangular overlay: translation plus size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub tx: f64,
    pub ty: f64,
    pub width: f64,
    pub height: f64,
}

impl Placement {
    pub fn new(tx: f64, ty: f64, width: f64, height: f64) -> Self {
        Self {
            tx,
            ty,
            width,
            height,
        }
    }

    /// Predicted (left, right) eye anchors of the overlay at this placement.
    pub fn anchors(&self, layout: &AnchorLayout) -> (Point, Point) {
        let y = self.ty + layout.y * self.height;
        (
            Point::new(self.tx + layout.left_x * self.width, y),
            Point::new(self.tx + layout.right_x * self.width, y),
        )
    }
}

impl GenomeCodec for Placement {
    const GENE_COUNT: usize = 4;

    fn encode(&self) -> Vec<f64> {
        vec![self.tx, self.ty, self.width, self.height]
    }

    fn decode(genes: &[f64]) -> Result<Self> {
        check_len(genes, Self::GENE_COUNT, "Placement")?;
        Ok(Self::new(genes[0], genes[1], genes[2], genes[3]))
    }
}

/// Scalar additive error correction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Correction {
    pub correction: f64,
}

impl Correction {
    pub fn new(correction: f64) -> Self {
        Self { correction }
    }
}

impl GenomeCodec for Correction {
    const GENE_COUNT: usize = 1;

    fn encode(&self) -> Vec<f64> {
        vec![self.correction]
    }

    fn decode(genes: &[f64]) -> Result<Self> {
        check_len(genes, Self::GENE_COUNT, "Correction")?;
        Ok(Self::new(genes[0]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_positions() {
        let p = Placement::new(75.0, 80.0, 100.0, 50.0);
        let (left, right) = p.anchors(&AnchorLayout::default());
        assert_eq!(left, Point::new(100.0, 100.0));
        assert_eq!(right, Point::new(150.0, 100.0));
    }

    #[test]
    fn test_decode_rejects_wrong_length() {
        assert!(matches!(
            Placement::decode(&[1.0, 2.0]),
            Err(PosefitError::Genome(_))
        ));
        assert!(Correction::decode(&[]).is_err());
        assert_eq!(Correction::decode(&[-3.5]).unwrap(), Correction::new(-3.5));
    }
}
