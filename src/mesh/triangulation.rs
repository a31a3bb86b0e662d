//! Triangulated surface meshes.

use crate::types::Extent;

/// A triangulated mesh: 3D vertex coordinates plus triangle connectivity.
///
/// Produced upstream by a triangulation routine and consumed read-only by
/// the plotting and export layers. Vertex z holds the elevation used for
/// mesh coloring and the `elevation` output field.
///
/// # Example
///
/// ```
/// use watershed_mesh::mesh::Triangulation;
///
/// let tri = Triangulation::new(
///     vec![[0.0, 0.0, 10.0], [1.0, 0.0, 20.0], [0.0, 1.0, 30.0]],
///     vec![[0, 1, 2]],
/// );
///
/// assert_eq!(tri.n_points(), 3);
/// assert_eq!(tri.n_triangles(), 1);
/// assert_eq!(tri.elevation_range(), Some((10.0, 30.0)));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Triangulation {
    /// Vertex coordinates (x, y, z).
    points: Vec<[f64; 3]>,
    /// Vertex index triples, referencing `points`.
    triangles: Vec<[usize; 3]>,
}

impl Triangulation {
    /// Create a triangulation from vertices and index triples.
    ///
    /// Indices are not validated here; out-of-range triangles are rejected
    /// by the mesh writer when the mesh is serialized.
    pub fn new(points: Vec<[f64; 3]>, triangles: Vec<[usize; 3]>) -> Self {
        Self { points, triangles }
    }

    /// Vertex coordinates.
    pub fn points(&self) -> &[[f64; 3]] {
        &self.points
    }

    /// Triangle vertex-index triples.
    pub fn triangles(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    /// Number of vertices.
    pub fn n_points(&self) -> usize {
        self.points.len()
    }

    /// Number of triangles.
    pub fn n_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// True if the mesh has no triangles.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Minimum and maximum vertex elevation, `None` for an empty mesh.
    pub fn elevation_range(&self) -> Option<(f64, f64)> {
        let mut range: Option<(f64, f64)> = None;
        for p in &self.points {
            let z = p[2];
            if !z.is_finite() {
                continue;
            }
            range = Some(match range {
                Some((lo, hi)) => (lo.min(z), hi.max(z)),
                None => (z, z),
            });
        }
        range
    }

    /// Horizontal bounding extent of the vertices, `None` when empty.
    pub fn bounds(&self) -> Option<Extent> {
        let mut iter = self.points.iter();
        let first = iter.next()?;
        let (mut x_min, mut y_min, mut x_max, mut y_max) =
            (first[0], first[1], first[0], first[1]);
        for p in iter {
            x_min = x_min.min(p[0]);
            y_min = y_min.min(p[1]);
            x_max = x_max.max(p[0]);
            y_max = y_max.max(p[1]);
        }
        Some(Extent::new(x_min, y_min, x_max, y_max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Triangulation {
        Triangulation::new(
            vec![
                [0.0, 0.0, 100.0],
                [10.0, 0.0, 150.0],
                [10.0, 20.0, 120.0],
                [0.0, 20.0, 90.0],
            ],
            vec![[0, 1, 2], [0, 2, 3]],
        )
    }

    #[test]
    fn test_counts() {
        let tri = sample();
        assert_eq!(tri.n_points(), 4);
        assert_eq!(tri.n_triangles(), 2);
        assert!(!tri.is_empty());
    }

    #[test]
    fn test_elevation_range() {
        assert_eq!(sample().elevation_range(), Some((90.0, 150.0)));
        let empty = Triangulation::new(vec![], vec![]);
        assert_eq!(empty.elevation_range(), None);
    }

    #[test]
    fn test_bounds() {
        let bounds = sample().bounds().unwrap();
        assert_eq!(bounds.as_tuple(), (0.0, 0.0, 10.0, 20.0));
    }

    #[test]
    fn test_nan_elevation_skipped() {
        let tri = Triangulation::new(
            vec![[0.0, 0.0, f64::NAN], [1.0, 0.0, 5.0], [0.0, 1.0, 7.0]],
            vec![[0, 1, 2]],
        );
        assert_eq!(tri.elevation_range(), Some((5.0, 7.0)));
    }
}
