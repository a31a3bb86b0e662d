//! Land/ocean basemap data.
//!
//! Loads land-mass polygons from GSHHS (Global Self-consistent
//! Hierarchical High-resolution Geography) shapefiles so plots can show
//! coarse geographic context under and around the watershed data. Ocean
//! geometry is derived per plot as the extent rectangle minus land.
//!
//! GSHHS ships one shapefile per resolution; `GSHHS_f_L1.shp` holds the
//! full-resolution ocean/land boundary.

use std::path::{Path, PathBuf};

use geo::{BooleanOps, Coord, LineString, MultiPolygon, Polygon, Rect};
use shapefile::{Reader, Shape};

use super::PlotError;
use crate::types::Extent;

/// GSHHS basemap resolution tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BasemapResolution {
    /// Crude outlines, suitable for continental-scale context.
    Coarse,
    /// Intermediate outlines.
    Intermediate,
    /// Full-resolution shorelines.
    Full,
}

impl BasemapResolution {
    fn file_tag(&self) -> char {
        match self {
            BasemapResolution::Coarse => 'c',
            BasemapResolution::Intermediate => 'i',
            BasemapResolution::Full => 'f',
        }
    }

    /// Shapefile name for this resolution (level 1 = ocean/land boundary).
    pub fn file_name(&self) -> String {
        format!("GSHHS_{}_L1.shp", self.file_tag())
    }
}

/// Land polygons for basemap rendering.
#[derive(Clone, Debug)]
pub struct Basemap {
    land: MultiPolygon<f64>,
}

impl Basemap {
    /// Wrap an existing land polygon collection.
    pub fn from_land_polygons(land: MultiPolygon<f64>) -> Self {
        Self { land }
    }

    /// Load land polygons from a GSHHS data directory.
    pub fn load<P: AsRef<Path>>(
        data_dir: P,
        resolution: BasemapResolution,
    ) -> Result<Self, PlotError> {
        let path: PathBuf = data_dir.as_ref().join(resolution.file_name());
        let mut reader = Reader::from_path(&path).map_err(|e| PlotError::Basemap(e.to_string()))?;
        let mut polygons = Vec::new();

        for result in reader.iter_shapes_and_records() {
            let (shape, _record) = result.map_err(|e| PlotError::Basemap(e.to_string()))?;

            if let Shape::Polygon(polygon) = shape {
                for ring in polygon.rings() {
                    let coords: Vec<Coord<f64>> = ring
                        .points()
                        .iter()
                        .map(|p| Coord { x: p.x, y: p.y })
                        .collect();
                    polygons.push(Polygon::new(LineString::from(coords), vec![]));
                }
            }
        }

        Ok(Self {
            land: MultiPolygon(polygons),
        })
    }

    /// Land polygons.
    pub fn land(&self) -> &MultiPolygon<f64> {
        &self.land
    }

    /// Ocean polygons within an extent: the extent rectangle minus land.
    pub fn ocean_within(&self, extent: &Extent) -> MultiPolygon<f64> {
        ocean_within(&self.land, extent)
    }
}

/// Extent rectangle minus land polygons.
pub(crate) fn ocean_within(land: &MultiPolygon<f64>, extent: &Extent) -> MultiPolygon<f64> {
    let window = Rect::new(
        Coord {
            x: extent.x_min,
            y: extent.y_min,
        },
        Coord {
            x: extent.x_max,
            y: extent.y_max,
        },
    );
    let window = MultiPolygon(vec![window.to_polygon()]);
    window.difference(land)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Area;

    fn island(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon<f64> {
        Polygon::new(
            LineString::from(vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1), (x0, y0)]),
            vec![],
        )
    }

    #[test]
    fn test_resolution_file_names() {
        assert_eq!(BasemapResolution::Coarse.file_name(), "GSHHS_c_L1.shp");
        assert_eq!(BasemapResolution::Full.file_name(), "GSHHS_f_L1.shp");
    }

    #[test]
    fn test_ocean_is_extent_minus_land() {
        let basemap = Basemap::from_land_polygons(MultiPolygon(vec![island(2.0, 2.0, 4.0, 4.0)]));
        let ocean = basemap.ocean_within(&Extent::new(0.0, 0.0, 10.0, 10.0));

        // 10x10 window minus a 2x2 island.
        let area: f64 = ocean.unsigned_area();
        assert!((area - 96.0).abs() < 1e-9, "ocean area {}", area);
    }

    #[test]
    fn test_all_ocean_when_no_land() {
        let basemap = Basemap::from_land_polygons(MultiPolygon(vec![]));
        let ocean = basemap.ocean_within(&Extent::new(0.0, 0.0, 5.0, 4.0));
        assert!((ocean.unsigned_area() - 20.0).abs() < 1e-9);
    }
}
