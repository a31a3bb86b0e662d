//! Retained plot layers.
//!
//! Axes accumulate layers and rasterization happens once at render time,
//! so extent resolution can see every layer's data bounds. Layers are
//! drawn in ascending z-order; ties keep insertion order.

use geo::{BoundingRect, LineString, MultiPolygon};
use plotters::style::RGBColor;

use super::colormap::Colormap;

/// One retained layer with its stacking order.
#[derive(Clone, Debug)]
pub(crate) struct Layer {
    pub zorder: i32,
    pub kind: LayerKind,
}

/// Layer geometry and styling.
#[derive(Clone, Debug)]
pub(crate) enum LayerKind {
    /// Triangulated mesh filled by vertex elevation, no edge strokes.
    TriangleFill {
        points: Vec<[f64; 3]>,
        triangles: Vec<[usize; 3]>,
        colormap: Colormap,
    },
    /// Stroked line geometries (river reaches).
    Lines {
        lines: Vec<LineString<f64>>,
        color: RGBColor,
        width: f64,
    },
    /// Stroked polygon outlines (watershed boundaries).
    Outlines {
        polygons: MultiPolygon<f64>,
        color: RGBColor,
        width: f64,
    },
    /// Georeferenced raster colored through a colormap.
    Raster {
        values: Vec<f32>,
        width: usize,
        height: usize,
        nodata: f32,
        origin_x: f64,
        origin_y: f64,
        pixel_width: f64,
        pixel_height: f64,
        colormap: Colormap,
        vmin: f64,
        vmax: f64,
    },
    /// Filled land polygons (basemap).
    LandFill {
        polygons: MultiPolygon<f64>,
        color: RGBColor,
    },
    /// Ocean fill, derived at render time as extent minus land.
    OceanFill {
        land: MultiPolygon<f64>,
        color: RGBColor,
    },
}

impl LayerKind {
    /// Data bounds (x_min, y_min, x_max, y_max) this layer contributes to
    /// extent resolution. Basemap fills are context, not data, and
    /// contribute nothing.
    pub fn data_bounds(&self) -> Option<(f64, f64, f64, f64)> {
        match self {
            LayerKind::TriangleFill { points, .. } => {
                let mut iter = points.iter();
                let first = iter.next()?;
                let mut b = (first[0], first[1], first[0], first[1]);
                for p in iter {
                    b.0 = b.0.min(p[0]);
                    b.1 = b.1.min(p[1]);
                    b.2 = b.2.max(p[0]);
                    b.3 = b.3.max(p[1]);
                }
                Some(b)
            }
            LayerKind::Lines { lines, .. } => {
                let mut bounds: Option<(f64, f64, f64, f64)> = None;
                for line in lines {
                    let Some(rect) = line.bounding_rect() else {
                        continue;
                    };
                    bounds = Some(merge(
                        bounds,
                        (rect.min().x, rect.min().y, rect.max().x, rect.max().y),
                    ));
                }
                bounds
            }
            LayerKind::Outlines { polygons, .. } => {
                let rect = polygons.bounding_rect()?;
                Some((rect.min().x, rect.min().y, rect.max().x, rect.max().y))
            }
            LayerKind::Raster {
                width,
                height,
                origin_x,
                origin_y,
                pixel_width,
                pixel_height,
                ..
            } => Some((
                *origin_x,
                origin_y - *height as f64 * pixel_height,
                origin_x + *width as f64 * pixel_width,
                *origin_y,
            )),
            LayerKind::LandFill { .. } | LayerKind::OceanFill { .. } => None,
        }
    }
}

fn merge(
    acc: Option<(f64, f64, f64, f64)>,
    b: (f64, f64, f64, f64),
) -> (f64, f64, f64, f64) {
    match acc {
        Some(a) => (a.0.min(b.0), a.1.min(b.1), a.2.max(b.2), a.3.max(b.3)),
        None => b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangle_bounds() {
        let layer = LayerKind::TriangleFill {
            points: vec![[0.0, 0.0, 1.0], [10.0, 0.0, 2.0], [5.0, 20.0, 3.0]],
            triangles: vec![[0, 1, 2]],
            colormap: Colormap::Terrain,
        };
        assert_eq!(layer.data_bounds(), Some((0.0, 0.0, 10.0, 20.0)));
    }

    #[test]
    fn test_raster_bounds() {
        let layer = LayerKind::Raster {
            values: vec![0.0; 6],
            width: 3,
            height: 2,
            nodata: -9999.0,
            origin_x: 100.0,
            origin_y: 50.0,
            pixel_width: 10.0,
            pixel_height: 5.0,
            colormap: Colormap::Terrain,
            vmin: 0.0,
            vmax: 1.0,
        };
        assert_eq!(layer.data_bounds(), Some((100.0, 40.0, 130.0, 50.0)));
    }

    #[test]
    fn test_basemap_contributes_no_bounds() {
        let layer = LayerKind::LandFill {
            polygons: MultiPolygon(vec![]),
            color: RGBColor(0, 0, 0),
        };
        assert!(layer.data_bounds().is_none());
    }
}
