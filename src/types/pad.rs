//! Extent padding policies.
//!
//! A pad fraction expands a base extent (usually the exterior bounds of a
//! watershed boundary) before it is used as a plot window. Three shapes are
//! supported, matching the accepted `--pad-fraction` arities of the
//! workflow scripts: one value, one value per axis, or one value per side.

use thiserror::Error;

use super::extent::Extent;

/// Error type for plot configuration values.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Pad fraction list has an unsupported length.
    #[error("pad fraction must have length 1, 2, or 4 (got {0})")]
    InvalidPadFraction(usize),
}

/// Fractional padding applied around a base extent.
///
/// Fractions are relative to the base extent's width or height; the
/// variants make the arity explicit instead of overloading a list length.
///
/// # Example
///
/// ```
/// use watershed_mesh::types::{Extent, PadFraction};
///
/// let base = Extent::new(0.0, 0.0, 10.0, 20.0);
/// let padded = PadFraction::from_slice(&[0.1, 0.2]).unwrap().pad(&base);
/// assert_eq!(padded.as_tuple(), (-1.0, -4.0, 11.0, 24.0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PadFraction {
    /// One fraction for all four sides.
    ///
    /// The pad distance is derived from the width and reused for the y
    /// sides as well, so y padding is width-proportional.
    Uniform(f64),
    /// Separate fractions for the x sides and the y sides.
    AxisSymmetric {
        /// Fraction of the width applied to the left and right sides.
        x: f64,
        /// Fraction of the height applied to the bottom and top sides.
        y: f64,
    },
    /// Independent fraction per side.
    PerSide {
        /// Fraction of the width applied to the left side.
        left: f64,
        /// Fraction of the height applied to the bottom side.
        bottom: f64,
        /// Fraction of the width applied to the right side.
        right: f64,
        /// Fraction of the height applied to the top side.
        top: f64,
    },
}

impl PadFraction {
    /// Build a pad policy from a raw fraction list.
    ///
    /// Length 1 maps to [`PadFraction::Uniform`], 2 to
    /// [`PadFraction::AxisSymmetric`] (x then y), and 4 to
    /// [`PadFraction::PerSide`] (left, bottom, right, top). Any other
    /// length is a configuration error.
    pub fn from_slice(fractions: &[f64]) -> Result<Self, ConfigError> {
        match fractions {
            &[p] => Ok(PadFraction::Uniform(p)),
            &[x, y] => Ok(PadFraction::AxisSymmetric { x, y }),
            &[left, bottom, right, top] => Ok(PadFraction::PerSide {
                left,
                bottom,
                right,
                top,
            }),
            _ => Err(ConfigError::InvalidPadFraction(fractions.len())),
        }
    }

    /// Absolute pad distances (left, bottom, right, top) for a base extent.
    pub fn deltas(&self, base: &Extent) -> (f64, f64, f64, f64) {
        let width = base.width();
        let height = base.height();

        match *self {
            PadFraction::Uniform(p) => {
                let d = width * p;
                (d, d, d, d)
            }
            PadFraction::AxisSymmetric { x, y } => {
                let dx = width * x;
                let dy = height * y;
                (dx, dy, dx, dy)
            }
            PadFraction::PerSide {
                left,
                bottom,
                right,
                top,
            } => (width * left, height * bottom, width * right, height * top),
        }
    }

    /// Expand a base extent by this pad policy.
    pub fn pad(&self, base: &Extent) -> Extent {
        let (left, bottom, right, top) = self.deltas(base);
        base.expand(left, bottom, right, top)
    }
}
