//! Hydrography reaches.
//!
//! A reach is a single hydrographic line feature; a river network is an
//! ordered collection of reaches. Plotting draws them as thin lines over
//! the mesh or elevation raster.

use std::path::Path;

use geo::{BoundingRect, Coord, LineString};
use shapefile::{Reader, Shape};

use super::HydroError;
use crate::types::Extent;

/// Ordered collection of hydrography line geometries.
///
/// # Example
///
/// ```
/// use geo::LineString;
/// use watershed_mesh::hydro::Reaches;
///
/// let reaches = Reaches::new(vec![
///     LineString::from(vec![(0.0, 0.0), (5.0, 5.0)]),
///     LineString::from(vec![(5.0, 5.0), (5.0, 12.0)]),
/// ]);
/// assert_eq!(reaches.len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct Reaches {
    lines: Vec<LineString<f64>>,
}

impl Reaches {
    /// Wrap an existing line collection.
    pub fn new(lines: Vec<LineString<f64>>) -> Self {
        Self { lines }
    }

    /// Load reach lines from a shapefile.
    ///
    /// Each polyline part becomes one reach; non-line shapes are ignored.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, HydroError> {
        let mut reader = Reader::from_path(path)?;
        let mut lines = Vec::new();

        for result in reader.iter_shapes_and_records() {
            let (shape, _record) = result?;

            match shape {
                Shape::Polyline(polyline) => {
                    for part in polyline.parts() {
                        let coords: Vec<Coord<f64>> =
                            part.iter().map(|p| Coord { x: p.x, y: p.y }).collect();
                        lines.push(LineString::from(coords));
                    }
                }
                Shape::PolylineZ(polyline) => {
                    for part in polyline.parts() {
                        let coords: Vec<Coord<f64>> =
                            part.iter().map(|p| Coord { x: p.x, y: p.y }).collect();
                        lines.push(LineString::from(coords));
                    }
                }
                _ => {}
            }
        }

        Ok(Self { lines })
    }

    /// The underlying line geometries.
    pub fn lines(&self) -> &[LineString<f64>] {
        &self.lines
    }

    /// Number of reaches.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True when the collection holds no reaches.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Bounding extent of all reaches, `None` when empty.
    pub fn bounds(&self) -> Option<Extent> {
        let mut extent: Option<Extent> = None;
        for line in &self.lines {
            let Some(rect) = line.bounding_rect() else {
                continue;
            };
            extent = Some(match extent {
                Some(e) => Extent::new(
                    e.x_min.min(rect.min().x),
                    e.y_min.min(rect.min().y),
                    e.x_max.max(rect.max().x),
                    e.y_max.max(rect.max().y),
                ),
                None => Extent::new(rect.min().x, rect.min().y, rect.max().x, rect.max().y),
            });
        }
        extent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_spans_all_reaches() {
        let reaches = Reaches::new(vec![
            LineString::from(vec![(0.0, 0.0), (5.0, 5.0)]),
            LineString::from(vec![(5.0, 5.0), (-2.0, 12.0)]),
        ]);
        assert_eq!(reaches.bounds().unwrap().as_tuple(), (-2.0, 0.0, 5.0, 12.0));
    }

    #[test]
    fn test_empty_bounds() {
        assert!(Reaches::new(vec![]).bounds().is_none());
    }
}
