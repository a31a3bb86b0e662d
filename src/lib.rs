//! # watershed-mesh
//!
//! Plotting and export utilities for watershed mesh-generation workflows.
//!
//! This crate provides the tail end of a meshing pipeline:
//! - Watershed boundary (HUC) and hydrography geometry types
//! - Elevation rasters (DEMs) with GeoTIFF loading
//! - Triangulated mesh representation
//! - Retained-mode figure/axes plotting with colormaps and basemaps
//! - Mesh export to VTU with a human-readable metadata sidecar
//!
//! The triangulation itself is produced upstream; everything here either
//! draws it or writes it to disk.
//!
//! # Example
//!
//! ```ignore
//! use watershed_mesh::plot::{RIVER_COLOR, SHAPE_COLOR};
//! use watershed_mesh::workflow::{plot_with_dem, save, PlotArgs, SaveArgs};
//!
//! let args = PlotArgs::default().with_title("Upper Coweeta");
//! let (mut fig, ax) = plot_with_dem(
//!     &args, Some(&hucs), Some(&reaches), Some(&dem), Some(&profile),
//!     SHAPE_COLOR, RIVER_COLOR, Some("elevation [m]"), None, None, None, None,
//! )?;
//! fig.render(&ax)?;
//! fig.save_png("basin.png")?;
//!
//! save(&save_args, &triangulation)?;
//! ```

pub mod hydro;
pub mod io;
pub mod mesh;
pub mod plot;
pub mod raster;
pub mod types;
pub mod workflow;

// Re-export main types for convenience
pub use hydro::{Hucs, HydroError, Reaches};
pub use io::{write_mesh, CellBlock, CellType, VtkError};
pub use mesh::Triangulation;
pub use plot::{
    Aspect, Axes, Basemap, BasemapResolution, Colorbar, Colormap, Figure, PlotError,
    RIVER_COLOR, SHAPE_COLOR,
};
pub use raster::{load_geotiff, Dem, RasterError, RasterProfile};
pub use types::{ConfigError, Epsg, Extent, PadFraction};
pub use workflow::{
    metadata_lines, plot_with_dem, plot_with_triangulation, resolve_extent, save, BasemapArgs,
    MeshSource, PlotArgs, SaveArgs, WorkflowError,
};
