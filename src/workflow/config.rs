//! Workflow configuration.
//!
//! Immutable option bags consumed by the plot and save entry points.
//! Values are filled in by whatever drives the workflow (CLI parsing is
//! out of scope here); the structs only carry them. Nothing in the
//! workflow mutates a configuration: derived values such as the resolved
//! plot extent are returned, not cached back.

use std::path::PathBuf;

use crate::plot::BasemapResolution;
use crate::types::{Epsg, Extent, PadFraction};

/// Where basemap context data lives and which resolution tier to use.
#[derive(Clone, Debug)]
pub struct BasemapArgs {
    /// Directory holding the GSHHS shapefiles.
    pub data_dir: PathBuf,
    /// Resolution tier, selects the shapefile within `data_dir`.
    pub resolution: BasemapResolution,
}

/// Options consumed by the plot entry points.
#[derive(Clone, Debug)]
pub struct PlotArgs {
    /// Figure size in inches (width, height).
    pub figsize: (f64, f64),
    /// Figure resolution in dots per inch.
    pub dpi: u32,
    /// Target projection; all geometry must already be in it.
    pub projection: Epsg,
    /// Explicit plot extent; wins over any derived extent.
    pub extent: Option<Extent>,
    /// Padding applied to a boundary-derived extent.
    pub pad_fraction: Option<PadFraction>,
    /// Basemap context; `None` disables the basemap layers.
    pub basemap: Option<BasemapArgs>,
    /// Plot title.
    pub title: Option<String>,
}

impl Default for PlotArgs {
    fn default() -> Self {
        Self {
            figsize: (8.0, 6.0),
            dpi: 100,
            // CONUS Albers, the usual projection for HUC products.
            projection: Epsg(5070),
            extent: None,
            pad_fraction: None,
            basemap: None,
            title: None,
        }
    }
}

impl PlotArgs {
    /// Create default options for a projection.
    pub fn new(projection: Epsg) -> Self {
        Self {
            projection,
            ..Default::default()
        }
    }

    /// Set an explicit plot extent.
    pub fn with_extent(mut self, extent: Extent) -> Self {
        self.extent = Some(extent);
        self
    }

    /// Set the extent padding policy.
    pub fn with_pad_fraction(mut self, pad: PadFraction) -> Self {
        self.pad_fraction = Some(pad);
        self
    }

    /// Enable the basemap layers.
    pub fn with_basemap(mut self, data_dir: impl Into<PathBuf>, resolution: BasemapResolution) -> Self {
        self.basemap = Some(BasemapArgs {
            data_dir: data_dir.into(),
            resolution,
        });
        self
    }

    /// Set the plot title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// What a mesh was generated from; recorded in the metadata sidecar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MeshSource {
    /// A standardized watershed boundary, identified by its Hydrologic
    /// Unit Code.
    Huc(String),
    /// A user-supplied boundary shape read from a file.
    File(PathBuf),
}

/// Options consumed by [`save`](crate::workflow::save).
#[derive(Clone, Debug)]
pub struct SaveArgs {
    /// Mesh output path; the metadata sidecar is written next to it with
    /// a `.readme` suffix appended.
    pub output_file: PathBuf,
    /// Projection the mesh coordinates are in.
    pub projection: Epsg,
    /// What the mesh was generated from.
    pub source: MeshSource,
    /// The invocation recorded in the sidecar, one token per element.
    pub command_line: Vec<String>,
}

impl SaveArgs {
    /// Create save options with the command line captured from the
    /// current process.
    pub fn new(output_file: impl Into<PathBuf>, projection: Epsg, source: MeshSource) -> Self {
        Self {
            output_file: output_file.into(),
            projection,
            source,
            command_line: Self::command_line_from_env(),
        }
    }

    /// Replace the recorded command line.
    pub fn with_command_line(mut self, command_line: Vec<String>) -> Self {
        self.command_line = command_line;
        self
    }

    /// The current process's invocation, as recorded by default.
    pub fn command_line_from_env() -> Vec<String> {
        std::env::args().collect()
    }
}
