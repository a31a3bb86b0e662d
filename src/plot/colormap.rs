//! Color lookup tables for elevation rendering.
//!
//! Small anchor tables sampled with linear interpolation, matching the
//! colormaps commonly used for terrain and scalar rasters.

use plotters::style::RGBColor;

/// Anchor-based color lookup table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Colormap {
    /// Blue-green-tan-white terrain ramp; the elevation default.
    Terrain,
    /// Perceptually uniform dark-purple-to-yellow ramp.
    Viridis,
}

/// (position in [0, 1], RGB) anchor.
type Anchor = (f64, [u8; 3]);

const TERRAIN: &[Anchor] = &[
    (0.00, [51, 51, 153]),
    (0.15, [0, 153, 255]),
    (0.25, [0, 204, 102]),
    (0.50, [255, 255, 153]),
    (0.75, [128, 92, 84]),
    (1.00, [255, 255, 255]),
];

const VIRIDIS: &[Anchor] = &[
    (0.000, [68, 1, 84]),
    (0.125, [71, 45, 123]),
    (0.250, [59, 82, 139]),
    (0.375, [44, 114, 142]),
    (0.500, [33, 145, 140]),
    (0.625, [40, 174, 128]),
    (0.750, [94, 201, 98]),
    (0.875, [173, 220, 48]),
    (1.000, [253, 231, 37]),
];

impl Colormap {
    fn anchors(&self) -> &'static [Anchor] {
        match self {
            Colormap::Terrain => TERRAIN,
            Colormap::Viridis => VIRIDIS,
        }
    }

    /// Sample the colormap at `t`, clamped to [0, 1].
    pub fn sample(&self, t: f64) -> RGBColor {
        let anchors = self.anchors();
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };

        let mut lower = anchors[0];
        for &upper in &anchors[1..] {
            if t <= upper.0 {
                let span = upper.0 - lower.0;
                let s = if span > 0.0 { (t - lower.0) / span } else { 0.0 };
                return RGBColor(
                    lerp(lower.1[0], upper.1[0], s),
                    lerp(lower.1[1], upper.1[1], s),
                    lerp(lower.1[2], upper.1[2], s),
                );
            }
            lower = upper;
        }

        let last = anchors[anchors.len() - 1].1;
        RGBColor(last[0], last[1], last[2])
    }

    /// Sample a value against a (vmin, vmax) range.
    ///
    /// A degenerate range maps everything to the low end.
    pub fn sample_range(&self, value: f64, vmin: f64, vmax: f64) -> RGBColor {
        let span = vmax - vmin;
        let t = if span > 0.0 { (value - vmin) / span } else { 0.0 };
        self.sample(t)
    }
}

fn lerp(a: u8, b: u8, s: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * s).round() as u8
}
