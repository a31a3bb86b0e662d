//! Watershed boundary polygons.
//!
//! A HUC (Hydrologic Unit Code) identifies a standardized watershed
//! boundary polygon. Meshing workflows pass one boundary or a small
//! collection of sub-basin boundaries; plotting draws their outlines and
//! extent resolution queries their exterior bounds.

use std::path::Path;

use geo::{BoundingRect, Coord, LineString, MultiPolygon, Polygon};
use shapefile::{Reader, Shape};

use super::HydroError;
use crate::types::Extent;

/// Watershed boundary polygon collection.
///
/// # Example
///
/// ```
/// use geo::{LineString, Polygon};
/// use watershed_mesh::hydro::Hucs;
///
/// let square = Polygon::new(
///     LineString::from(vec![(0.0, 0.0), (10.0, 0.0), (10.0, 20.0), (0.0, 20.0), (0.0, 0.0)]),
///     vec![],
/// );
/// let hucs = Hucs::from_polygon(square);
/// assert_eq!(hucs.exterior_bounds().unwrap().as_tuple(), (0.0, 0.0, 10.0, 20.0));
/// ```
#[derive(Clone, Debug)]
pub struct Hucs {
    polygons: MultiPolygon<f64>,
}

impl Hucs {
    /// Wrap an existing polygon collection.
    pub fn new(polygons: MultiPolygon<f64>) -> Self {
        Self { polygons }
    }

    /// Wrap a single boundary polygon.
    pub fn from_polygon(polygon: Polygon<f64>) -> Self {
        Self {
            polygons: MultiPolygon(vec![polygon]),
        }
    }

    /// Load boundary polygons from a shapefile.
    ///
    /// Every polygon ring in the file becomes a boundary polygon;
    /// non-polygon shapes are ignored.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, HydroError> {
        let mut reader = Reader::from_path(path)?;
        let mut polygons = Vec::new();

        for result in reader.iter_shapes_and_records() {
            let (shape, _record) = result?;

            match shape {
                Shape::Polygon(polygon) => {
                    for ring in polygon.rings() {
                        let coords: Vec<Coord<f64>> = ring
                            .points()
                            .iter()
                            .map(|p| Coord { x: p.x, y: p.y })
                            .collect();
                        polygons.push(Polygon::new(LineString::from(coords), vec![]));
                    }
                }
                Shape::PolygonZ(polygon) => {
                    for ring in polygon.rings() {
                        let coords: Vec<Coord<f64>> = ring
                            .points()
                            .iter()
                            .map(|p| Coord { x: p.x, y: p.y })
                            .collect();
                        polygons.push(Polygon::new(LineString::from(coords), vec![]));
                    }
                }
                _ => {}
            }
        }

        Ok(Self {
            polygons: MultiPolygon(polygons),
        })
    }

    /// The underlying polygon collection.
    pub fn polygons(&self) -> &MultiPolygon<f64> {
        &self.polygons
    }

    /// Number of boundary polygons.
    pub fn len(&self) -> usize {
        self.polygons.0.len()
    }

    /// True when the collection holds no polygons.
    pub fn is_empty(&self) -> bool {
        self.polygons.0.is_empty()
    }

    /// Bounding extent of the boundary exteriors.
    ///
    /// Returns `None` for an empty collection.
    pub fn exterior_bounds(&self) -> Option<Extent> {
        let rect = self.polygons.bounding_rect()?;
        Some(Extent::new(
            rect.min().x,
            rect.min().y,
            rect.max().x,
            rect.max().y,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rectangle(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon<f64> {
        Polygon::new(
            LineString::from(vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1), (x0, y0)]),
            vec![],
        )
    }

    #[test]
    fn test_exterior_bounds_single() {
        let hucs = Hucs::from_polygon(rectangle(0.0, 0.0, 10.0, 20.0));
        assert_eq!(hucs.exterior_bounds().unwrap().as_tuple(), (0.0, 0.0, 10.0, 20.0));
    }

    #[test]
    fn test_exterior_bounds_union() {
        let hucs = Hucs::new(MultiPolygon(vec![
            rectangle(0.0, 0.0, 5.0, 5.0),
            rectangle(3.0, 2.0, 12.0, 9.0),
        ]));
        assert_eq!(hucs.exterior_bounds().unwrap().as_tuple(), (0.0, 0.0, 12.0, 9.0));
    }

    #[test]
    fn test_empty_has_no_bounds() {
        let hucs = Hucs::new(MultiPolygon(vec![]));
        assert!(hucs.is_empty());
        assert!(hucs.exterior_bounds().is_none());
    }
}
