//! Figures and axes.
//!
//! A [`Figure`] owns the pixel buffer a plot is rasterized into; an
//! [`Axes`] owns the composition state: projection, window, title,
//! aspect policy, and the retained layer stack. Layer-adding calls only
//! record state; [`Figure::render`] rasterizes the whole stack at once.

use std::path::Path;

use plotters::style::RGBColor;

use super::basemap::Basemap;
use super::colormap::Colormap;
use super::layers::{Layer, LayerKind};
use super::{render, PlotError, LAND_COLOR, OCEAN_COLOR};
use crate::hydro::{Hucs, Reaches};
use crate::mesh::Triangulation;
use crate::raster::{Dem, RasterProfile};
use crate::types::{Epsg, Extent};

/// Aspect-ratio policy applied when an axes is rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Aspect {
    /// Fill the axes box; x and y scales are independent.
    #[default]
    Auto,
    /// Equal x/y scale; the coordinate limits grow to fill the box.
    EqualDataLim,
    /// Equal x/y scale; the limits are kept and the box shrinks to fit.
    EqualBox,
}

/// Horizontal colorbar request attached to an axes.
#[derive(Clone, Debug)]
pub struct Colorbar {
    /// Label drawn under the bar.
    pub label: String,
    /// Colormap the bar sweeps through.
    pub colormap: Colormap,
    /// Value at the left end of the bar.
    pub vmin: f64,
    /// Value at the right end of the bar.
    pub vmax: f64,
}

/// A drawing surface backed by an RGB pixel buffer.
///
/// Sized like a figure in a plotting package: physical size in inches
/// times dots per inch.
pub struct Figure {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) dpi: u32,
    pub(crate) buffer: Vec<u8>,
}

impl Figure {
    /// Create a figure of `figsize` inches at the given resolution.
    pub fn new(figsize: (f64, f64), dpi: u32) -> Self {
        let width = ((figsize.0 * dpi as f64).round() as u32).max(1);
        let height = ((figsize.1 * dpi as f64).round() as u32).max(1);
        Self {
            width,
            height,
            dpi,
            buffer: vec![0; width as usize * height as usize * 3],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Resolution in dots per inch.
    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    /// Raw RGB pixel data, row-major.
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Rasterize an axes' layer stack into this figure.
    pub fn render(&mut self, axes: &Axes) -> Result<(), PlotError> {
        render::render(self, axes)
    }

    /// Encode the current pixel buffer as a PNG file.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), PlotError> {
        let img = image::RgbImage::from_raw(self.width, self.height, self.buffer.clone())
            .ok_or_else(|| PlotError::Render("pixel buffer size mismatch".to_string()))?;
        img.save(path)?;
        Ok(())
    }
}

/// Composition state for one plot: projection, window, and layers.
///
/// Data added to an axes must already be in the axes' projection; no
/// reprojection happens at draw time.
pub struct Axes {
    projection: Epsg,
    title: Option<String>,
    extent: Option<Extent>,
    aspect: Aspect,
    colorbar: Option<Colorbar>,
    layers: Vec<Layer>,
}

impl Axes {
    /// Create an empty axes in the given projection.
    pub fn new(projection: Epsg) -> Self {
        Self {
            projection,
            title: None,
            extent: None,
            aspect: Aspect::Auto,
            colorbar: None,
            layers: Vec::new(),
        }
    }

    /// Coordinate reference system of the axes.
    pub fn projection(&self) -> Epsg {
        self.projection
    }

    /// Set the title drawn above the plot.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Title, if set.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Fix the coordinate window; without one the window is derived from
    /// the layers' data bounds at render time.
    pub fn set_extent(&mut self, extent: Extent) {
        self.extent = Some(extent);
    }

    /// Explicit coordinate window, if set.
    pub fn extent(&self) -> Option<Extent> {
        self.extent
    }

    /// Set the aspect-ratio policy.
    pub fn set_aspect(&mut self, aspect: Aspect) {
        self.aspect = aspect;
    }

    /// Current aspect-ratio policy.
    pub fn aspect(&self) -> Aspect {
        self.aspect
    }

    /// Ask for a horizontal colorbar when the axes is rendered.
    pub fn request_colorbar(
        &mut self,
        label: impl Into<String>,
        colormap: Colormap,
        vmin: f64,
        vmax: f64,
    ) {
        self.colorbar = Some(Colorbar {
            label: label.into(),
            colormap,
            vmin,
            vmax,
        });
    }

    /// Pending colorbar request, if any.
    pub fn colorbar(&self) -> Option<&Colorbar> {
        self.colorbar.as_ref()
    }

    /// Number of retained layers.
    pub fn n_layers(&self) -> usize {
        self.layers.len()
    }

    pub(crate) fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Add a triangulated mesh filled by vertex elevation, no edge
    /// strokes.
    pub fn add_triangulation(&mut self, tri: &Triangulation, colormap: Colormap, zorder: i32) {
        self.layers.push(Layer {
            zorder,
            kind: LayerKind::TriangleFill {
                points: tri.points().to_vec(),
                triangles: tri.triangles().to_vec(),
                colormap,
            },
        });
    }

    /// Add river reach lines.
    pub fn add_reaches(&mut self, reaches: &Reaches, color: RGBColor, width: f64, zorder: i32) {
        self.layers.push(Layer {
            zorder,
            kind: LayerKind::Lines {
                lines: reaches.lines().to_vec(),
                color,
                width,
            },
        });
    }

    /// Add watershed boundary outlines.
    pub fn add_huc_outlines(&mut self, hucs: &Hucs, color: RGBColor, width: f64, zorder: i32) {
        self.layers.push(Layer {
            zorder,
            kind: LayerKind::Outlines {
                polygons: hucs.polygons().clone(),
                color,
                width,
            },
        });
    }

    /// Add an elevation raster colored through `colormap`, clamped to
    /// [`vmin`, `vmax`]. Nodata cells are left transparent.
    pub fn add_dem(
        &mut self,
        dem: &Dem,
        profile: &RasterProfile,
        colormap: Colormap,
        vmin: f64,
        vmax: f64,
        zorder: i32,
    ) {
        self.layers.push(Layer {
            zorder,
            kind: LayerKind::Raster {
                values: dem.values().to_vec(),
                width: dem.width(),
                height: dem.height(),
                nodata: profile.nodata,
                origin_x: profile.origin_x,
                origin_y: profile.origin_y,
                pixel_width: profile.pixel_width,
                pixel_height: profile.pixel_height,
                colormap,
                vmin,
                vmax,
            },
        });
    }

    /// Add basemap context: filled land at `land_zorder` and derived
    /// ocean fill at `ocean_zorder`.
    pub fn add_basemap(&mut self, basemap: &Basemap, land_zorder: i32, ocean_zorder: i32) {
        self.layers.push(Layer {
            zorder: land_zorder,
            kind: LayerKind::LandFill {
                polygons: basemap.land().clone(),
                color: LAND_COLOR,
            },
        });
        self.layers.push(Layer {
            zorder: ocean_zorder,
            kind: LayerKind::OceanFill {
                land: basemap.land().clone(),
                color: OCEAN_COLOR,
            },
        });
    }

    /// Bounds of all data layers, `None` when nothing with a location has
    /// been added.
    pub fn data_bounds(&self) -> Option<Extent> {
        let mut bounds: Option<(f64, f64, f64, f64)> = None;
        for layer in &self.layers {
            let Some(b) = layer.kind.data_bounds() else {
                continue;
            };
            bounds = Some(match bounds {
                Some(a) => (a.0.min(b.0), a.1.min(b.1), a.2.max(b.2), a.3.max(b.3)),
                None => b,
            });
        }
        bounds.map(|(x0, y0, x1, y1)| Extent::new(x0, y0, x1, y1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::LineString;

    #[test]
    fn test_figure_dimensions() {
        let fig = Figure::new((8.0, 6.0), 100);
        assert_eq!(fig.width(), 800);
        assert_eq!(fig.height(), 600);
        assert_eq!(fig.buffer().len(), 800 * 600 * 3);
    }

    #[test]
    fn test_axes_accumulates_layers() {
        let mut ax = Axes::new(Epsg(5070));
        assert_eq!(ax.n_layers(), 0);

        let tri = Triangulation::new(
            vec![[0.0, 0.0, 1.0], [1.0, 0.0, 2.0], [0.0, 1.0, 3.0]],
            vec![[0, 1, 2]],
        );
        ax.add_triangulation(&tri, Colormap::Terrain, 1);
        ax.add_reaches(
            &Reaches::new(vec![LineString::from(vec![(0.0, 0.0), (1.0, 1.0)])]),
            RGBColor(255, 255, 255),
            0.5,
            2,
        );
        assert_eq!(ax.n_layers(), 2);
    }

    #[test]
    fn test_data_bounds_union() {
        let mut ax = Axes::new(Epsg(5070));
        let tri = Triangulation::new(
            vec![[0.0, 0.0, 1.0], [4.0, 0.0, 2.0], [0.0, 2.0, 3.0]],
            vec![[0, 1, 2]],
        );
        ax.add_triangulation(&tri, Colormap::Terrain, 1);
        ax.add_reaches(
            &Reaches::new(vec![LineString::from(vec![(-3.0, 1.0), (2.0, 5.0)])]),
            RGBColor(255, 255, 255),
            0.5,
            2,
        );
        assert_eq!(ax.data_bounds().unwrap().as_tuple(), (-3.0, 0.0, 4.0, 5.0));
    }

    #[test]
    fn test_basemap_excluded_from_data_bounds() {
        let mut ax = Axes::new(Epsg(5070));
        let basemap = Basemap::from_land_polygons(geo::MultiPolygon(vec![]));
        ax.add_basemap(&basemap, 0, 2);
        assert_eq!(ax.n_layers(), 2);
        assert!(ax.data_bounds().is_none());
    }
}
