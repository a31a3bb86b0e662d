//! Workflow entry points: plotting and mesh export.
//!
//! This module ties the data types together into the three operations a
//! meshing run ends with:
//!
//! - [`plot_with_triangulation`]: triangulated mesh + rivers + boundary
//!   outlines on one axes
//! - [`plot_with_dem`]: elevation raster + rivers + boundary outlines
//!   over an optional land/ocean basemap, with extent resolution
//! - [`save`]: mesh file plus a human-readable `.readme` sidecar
//!
//! All three are single-pass procedures with no retries; any failure
//! aborts the call and propagates to the caller.
//!
//! # Example
//!
//! ```ignore
//! use watershed_mesh::plot::{RIVER_COLOR, SHAPE_COLOR};
//! use watershed_mesh::workflow::{plot_with_triangulation, save, PlotArgs, SaveArgs};
//!
//! let args = PlotArgs::default().with_title("Coweeta basin");
//! let (mut fig, ax) = plot_with_triangulation(
//!     &args, Some(&hucs), Some(&rivers), Some(&tri),
//!     SHAPE_COLOR, RIVER_COLOR, None, None,
//! );
//! fig.render(&ax)?;
//! fig.save_png("coweeta.png")?;
//!
//! save(&save_args, &tri)?;
//! ```

mod compose;
mod config;
mod save;

use thiserror::Error;

pub use compose::{plot_with_dem, plot_with_triangulation, resolve_extent};
pub use config::{BasemapArgs, MeshSource, PlotArgs, SaveArgs};
pub use save::{metadata_lines, save};

/// Error type for workflow operations.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Invalid configuration value.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::types::ConfigError),

    /// Plot composition or rendering failed.
    #[error("Plot error: {0}")]
    Plot(#[from] crate::plot::PlotError),

    /// Mesh serialization failed.
    #[error("Mesh write error: {0}")]
    Vtk(#[from] crate::io::VtkError),

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
