//! Plot composition and rendering.
//!
//! This module provides:
//! - **Figure / Axes**: a retained-mode figure abstraction; layers are
//!   composed onto an axes and rasterized once at render time
//! - **Colormap**: anchor-LUT colormaps for elevation rendering
//! - **Basemap**: GSHHS land/ocean context fills
//!
//! Rendering uses `plotters` primitives into an RGB buffer; figures are
//! written to disk as PNG.
//!
//! # Example
//!
//! ```ignore
//! use watershed_mesh::plot::{Axes, Colormap, Figure, SHAPE_COLOR};
//! use watershed_mesh::types::Epsg;
//!
//! let mut fig = Figure::new((8.0, 6.0), 100);
//! let mut ax = Axes::new(Epsg(5070));
//! ax.add_triangulation(&triangulation, Colormap::Terrain, 1);
//! ax.add_huc_outlines(&hucs, SHAPE_COLOR, 0.7, 3);
//! fig.render(&ax)?;
//! fig.save_png("watershed.png")?;
//! ```

mod basemap;
mod colormap;
mod figure;
mod layers;
mod render;

use plotters::style::RGBColor;
use thiserror::Error;

pub use basemap::{Basemap, BasemapResolution};
pub use colormap::Colormap;
pub use figure::{Aspect, Axes, Colorbar, Figure};

/// Default boundary outline color (black).
pub const SHAPE_COLOR: RGBColor = RGBColor(0, 0, 0);

/// Default river line color (white).
pub const RIVER_COLOR: RGBColor = RGBColor(255, 255, 255);

/// Basemap land fill.
pub(crate) const LAND_COLOR: RGBColor = RGBColor(240, 240, 220);

/// Basemap ocean fill.
pub(crate) const OCEAN_COLOR: RGBColor = RGBColor(152, 183, 226);

/// Error type for plot composition and rendering.
#[derive(Debug, Error)]
pub enum PlotError {
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Drawing backend error
    #[error("Render error: {0}")]
    Render(String),

    /// Basemap data could not be loaded
    #[error("Basemap error: {0}")]
    Basemap(String),
}
