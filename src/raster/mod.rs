//! Elevation rasters (DEMs).
//!
//! Loads elevation data from GeoTIFF files and carries the georeferencing
//! profile needed to place raster cells in projected coordinates. Uses the
//! pure Rust `tiff` crate - no system dependencies required.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use watershed_mesh::raster::load_geotiff;
//! use watershed_mesh::types::Epsg;
//!
//! let (dem, profile) = load_geotiff(Path::new("data/elevation.tif"), Epsg(5070))?;
//! println!("{}x{} cells, {}", dem.width(), dem.height(), profile.epsg);
//! ```

use std::fs::File;
use std::path::Path;

use thiserror::Error;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::tags::Tag;

use crate::types::{Epsg, Extent};

/// Error type for raster operations.
#[derive(Debug, Error)]
pub enum RasterError {
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TIFF decoding error
    #[error("TIFF error: {0}")]
    Tiff(String),

    /// Missing or invalid geotransform tags
    #[error("Missing geotransform: {0}")]
    MissingGeotransform(String),
}

impl From<tiff::TiffError> for RasterError {
    fn from(e: tiff::TiffError) -> Self {
        RasterError::Tiff(e.to_string())
    }
}

/// Georeferencing profile for a raster grid.
///
/// Follows the GeoTIFF convention: the origin is the outer corner of the
/// top-left cell, rows advance southward, so `origin_y` is the maximum y.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RasterProfile {
    /// X coordinate of the top-left corner.
    pub origin_x: f64,
    /// Y coordinate of the top-left corner.
    pub origin_y: f64,
    /// Cell width in projected units.
    pub pixel_width: f64,
    /// Cell height in projected units (positive; rows advance southward).
    pub pixel_height: f64,
    /// Value marking cells with no data.
    pub nodata: f32,
    /// Coordinate reference system of the grid.
    pub epsg: Epsg,
}

impl RasterProfile {
    /// Extent covered by a grid of the given dimensions.
    pub fn extent(&self, width: usize, height: usize) -> Extent {
        Extent::new(
            self.origin_x,
            self.origin_y - height as f64 * self.pixel_height,
            self.origin_x + width as f64 * self.pixel_width,
            self.origin_y,
        )
    }

    /// Projected rectangle of the cell at (row, col):
    /// (x_min, y_min, x_max, y_max).
    pub fn cell_rect(&self, row: usize, col: usize) -> (f64, f64, f64, f64) {
        let x0 = self.origin_x + col as f64 * self.pixel_width;
        let y1 = self.origin_y - row as f64 * self.pixel_height;
        (x0, y1 - self.pixel_height, x0 + self.pixel_width, y1)
    }
}

/// Elevation grid, row-major with row 0 at the top (northern) edge.
#[derive(Clone, Debug, PartialEq)]
pub struct Dem {
    values: Vec<f32>,
    width: usize,
    height: usize,
}

impl Dem {
    /// Wrap a row-major value grid.
    ///
    /// # Panics
    ///
    /// Panics if `values.len() != width * height`.
    pub fn new(values: Vec<f32>, width: usize, height: usize) -> Self {
        assert_eq!(
            values.len(),
            width * height,
            "value count {} does not match {}x{} grid",
            values.len(),
            width,
            height
        );
        Self {
            values,
            width,
            height,
        }
    }

    /// Grid width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell value at (row, col).
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.values[row * self.width + col]
    }

    /// Raw row-major values.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Minimum and maximum values, skipping nodata and non-finite cells.
    ///
    /// Returns `None` when no valid cell exists.
    pub fn value_range(&self, nodata: f32) -> Option<(f64, f64)> {
        let mut range: Option<(f64, f64)> = None;
        for &v in &self.values {
            if !v.is_finite() || v == nodata {
                continue;
            }
            let v = v as f64;
            range = Some(match range {
                Some((lo, hi)) => (lo.min(v), hi.max(v)),
                None => (v, v),
            });
        }
        range
    }
}

/// Load an elevation raster and its profile from a GeoTIFF file.
///
/// Extracts the geotransform from the ModelPixelScale (tag 33550) and
/// ModelTiepoint (tag 33922) tags; files without both tags are rejected.
/// The EPSG code is not read from the file; `epsg` records the CRS the
/// caller expects the raster to be in.
pub fn load_geotiff<P: AsRef<Path>>(path: P, epsg: Epsg) -> Result<(Dem, RasterProfile), RasterError> {
    let file = File::open(&path)?;
    let mut decoder = Decoder::new(file)?;

    let (width, height) = decoder.dimensions()?;

    let pixel_scale = decoder.get_tag_f64_vec(Tag::Unknown(33550)).ok();
    let model_tiepoint = decoder.get_tag_f64_vec(Tag::Unknown(33922)).ok();

    let profile = match (pixel_scale, model_tiepoint) {
        (Some(scale), Some(tiepoint)) if scale.len() >= 2 && tiepoint.len() >= 6 => {
            // ModelTiepoint format: [I, J, K, X, Y, Z]
            // ModelPixelScale format: [ScaleX, ScaleY, ScaleZ]
            RasterProfile {
                origin_x: tiepoint[3],
                origin_y: tiepoint[4],
                pixel_width: scale[0],
                pixel_height: scale[1],
                nodata: -9999.0,
                epsg,
            }
        }
        _ => {
            return Err(RasterError::MissingGeotransform(
                "no ModelPixelScale/ModelTiepoint tags found".to_string(),
            ));
        }
    };

    let result = decoder.read_image()?;

    let values: Vec<f32> = match result {
        DecodingResult::U8(data) => data.into_iter().map(|v| v as f32).collect(),
        DecodingResult::U16(data) => data.into_iter().map(|v| v as f32).collect(),
        DecodingResult::U32(data) => data.into_iter().map(|v| v as f32).collect(),
        DecodingResult::U64(data) => data.into_iter().map(|v| v as f32).collect(),
        DecodingResult::F32(data) => data,
        DecodingResult::F64(data) => data.into_iter().map(|v| v as f32).collect(),
        DecodingResult::I8(data) => data.into_iter().map(|v| v as f32).collect(),
        DecodingResult::I16(data) => data.into_iter().map(|v| v as f32).collect(),
        DecodingResult::I32(data) => data.into_iter().map(|v| v as f32).collect(),
        DecodingResult::I64(data) => data.into_iter().map(|v| v as f32).collect(),
    };

    if values.len() != width as usize * height as usize {
        return Err(RasterError::Tiff(format!(
            "expected {} single-band samples, got {}",
            width as usize * height as usize,
            values.len()
        )));
    }

    Ok((
        Dem::new(values, width as usize, height as usize),
        profile,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> RasterProfile {
        RasterProfile {
            origin_x: 100.0,
            origin_y: 500.0,
            pixel_width: 10.0,
            pixel_height: 20.0,
            nodata: -9999.0,
            epsg: Epsg(5070),
        }
    }

    #[test]
    fn test_profile_extent() {
        let extent = profile().extent(4, 3);
        assert_eq!(extent.as_tuple(), (100.0, 440.0, 140.0, 500.0));
    }

    #[test]
    fn test_cell_rect() {
        // Row 0 hangs off the top edge, rows advance southward.
        assert_eq!(profile().cell_rect(0, 0), (100.0, 480.0, 110.0, 500.0));
        assert_eq!(profile().cell_rect(2, 3), (130.0, 440.0, 140.0, 460.0));
    }

    #[test]
    fn test_value_range_skips_nodata() {
        let dem = Dem::new(vec![-9999.0, 10.0, 30.0, f32::NAN], 2, 2);
        assert_eq!(dem.value_range(-9999.0), Some((10.0, 30.0)));
    }

    #[test]
    fn test_value_range_all_nodata() {
        let dem = Dem::new(vec![-9999.0; 4], 2, 2);
        assert_eq!(dem.value_range(-9999.0), None);
    }

    #[test]
    #[should_panic(expected = "grid")]
    fn test_mismatched_dimensions() {
        Dem::new(vec![0.0; 5], 2, 2);
    }
}
