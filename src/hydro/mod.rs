//! Hydrography and watershed-boundary data.
//!
//! This module provides:
//! - **Hucs**: watershed boundary polygons keyed by Hydrologic Unit Code
//! - **Reaches**: hydrography line geometries (river reaches)
//!
//! Both types wrap `geo` geometries produced upstream; loaders for ESRI
//! shapefiles are provided for the common case where boundaries and
//! hydrography arrive as `.shp` layers.

mod hucs;
mod reaches;

use thiserror::Error;

pub use hucs::Hucs;
pub use reaches::Reaches;

/// Error type for hydrography data operations.
#[derive(Debug, Error)]
pub enum HydroError {
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Shapefile parsing error
    #[error("Shapefile error: {0}")]
    Shapefile(String),
}

impl From<shapefile::Error> for HydroError {
    fn from(e: shapefile::Error) -> Self {
        HydroError::Shapefile(e.to_string())
    }
}
