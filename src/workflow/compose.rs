//! Plot composition entry points.
//!
//! Each function composes layers onto a figure/axes pair and returns the
//! pair; rasterization happens when the caller renders the figure. Both
//! accept an existing pair so plots can be built up across calls.

use log::info;
use plotters::style::RGBColor;

use super::config::PlotArgs;
use super::WorkflowError;
use crate::hydro::{Hucs, Reaches};
use crate::mesh::Triangulation;
use crate::plot::{Aspect, Axes, Basemap, Colormap, Figure};
use crate::raster::{Dem, RasterProfile};
use crate::types::Extent;

fn bootstrap(args: &PlotArgs, fig: Option<Figure>, ax: Option<Axes>) -> (Figure, Axes) {
    let fig = fig.unwrap_or_else(|| Figure::new(args.figsize, args.dpi));
    let ax = ax.unwrap_or_else(|| Axes::new(args.projection));
    (fig, ax)
}

/// Resolve the plot extent for a boundary-driven plot.
///
/// An explicit extent in the configuration wins. Otherwise the extent is
/// the boundary's exterior bounds, padded by the configured pad policy.
/// With neither an explicit extent nor a boundary the result is `None`
/// and the plot falls back to data limits at render time.
pub fn resolve_extent(args: &PlotArgs, hucs: Option<&Hucs>) -> Option<Extent> {
    if let Some(extent) = args.extent {
        return Some(extent);
    }
    let base = hucs?.exterior_bounds()?;
    Some(match &args.pad_fraction {
        Some(pad) => pad.pad(&base),
        None => base,
    })
}

/// Plot a triangulated mesh with hydrography and watershed boundaries.
///
/// Layers are stacked in call order: the triangulation (filled by
/// elevation, no edge strokes), then river lines at width 0.5, then
/// boundary outlines at width 0.7 on top. Each geometry argument is
/// independently optional; absent layers are skipped. The axes keeps an
/// equal aspect with limits grown from the data.
pub fn plot_with_triangulation(
    args: &PlotArgs,
    hucs: Option<&Hucs>,
    rivers: Option<&Reaches>,
    triangulation: Option<&Triangulation>,
    shape_color: RGBColor,
    river_color: RGBColor,
    fig: Option<Figure>,
    ax: Option<Axes>,
) -> (Figure, Axes) {
    info!("Plotting");
    info!("--------");

    let (fig, mut ax) = bootstrap(args, fig, ax);

    if let Some(triangulation) = triangulation {
        ax.add_triangulation(triangulation, Colormap::Terrain, 1);
    }
    if let Some(rivers) = rivers {
        ax.add_reaches(rivers, river_color, 0.5, 2);
    }
    if let Some(hucs) = hucs {
        ax.add_huc_outlines(hucs, shape_color, 0.7, 3);
    }

    ax.set_aspect(Aspect::EqualDataLim);
    (fig, ax)
}

/// Plot an elevation raster with hydrography and watershed boundaries
/// over an optional land/ocean basemap.
///
/// The plot extent is resolved per [`resolve_extent`] and fixed on the
/// axes (readable from the returned axes); layers stack as basemap land
/// (z 0), DEM (z 1), basemap ocean (z 2), reaches (z 3), and boundary
/// outlines (z 4). When a colorbar label is given and a DEM is present a
/// horizontal colorbar is drawn; `vmin`/`vmax` clamp the color range.
/// `dem` + `profile`, `reaches`, and `hucs` are independently optional.
#[allow(clippy::too_many_arguments)]
pub fn plot_with_dem(
    args: &PlotArgs,
    hucs: Option<&Hucs>,
    reaches: Option<&Reaches>,
    dem: Option<&Dem>,
    profile: Option<&RasterProfile>,
    shape_color: RGBColor,
    river_color: RGBColor,
    colorbar_label: Option<&str>,
    vmin: Option<f64>,
    vmax: Option<f64>,
    fig: Option<Figure>,
    ax: Option<Axes>,
) -> Result<(Figure, Axes), WorkflowError> {
    info!("Plotting");
    info!("--------");

    let (fig, mut ax) = bootstrap(args, fig, ax);

    match resolve_extent(args, hucs) {
        Some(extent) => {
            info!("plot extent: {}", extent);
            ax.set_extent(extent);
        }
        None => info!("plot extent: data limits"),
    }

    if let Some(basemap_args) = &args.basemap {
        let basemap = Basemap::load(&basemap_args.data_dir, basemap_args.resolution)?;
        ax.add_basemap(&basemap, 0, 2);
    }

    if let (Some(dem), Some(profile)) = (dem, profile) {
        let (lo, hi) = dem.value_range(profile.nodata).unwrap_or((0.0, 1.0));
        let vmin = vmin.unwrap_or(lo);
        let vmax = vmax.unwrap_or(hi);
        ax.add_dem(dem, profile, Colormap::Terrain, vmin, vmax, 1);
        if let Some(label) = colorbar_label {
            ax.request_colorbar(label, Colormap::Terrain, vmin, vmax);
        }
    }

    if let Some(reaches) = reaches {
        ax.add_reaches(reaches, river_color, 0.5, 3);
    }
    if let Some(hucs) = hucs {
        ax.add_huc_outlines(hucs, shape_color, 0.7, 4);
    }

    ax.set_aspect(Aspect::EqualBox);
    if let Some(title) = &args.title {
        ax.set_title(title);
    }

    Ok((fig, ax))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::{RIVER_COLOR, SHAPE_COLOR};
    use crate::types::{Epsg, PadFraction};
    use geo::{LineString, Polygon};

    fn boundary() -> Hucs {
        Hucs::from_polygon(Polygon::new(
            LineString::from(vec![(0.0, 0.0), (10.0, 0.0), (10.0, 20.0), (0.0, 20.0), (0.0, 0.0)]),
            vec![],
        ))
    }

    #[test]
    fn test_resolve_extent_explicit_wins() {
        let args = PlotArgs::default()
            .with_extent(Extent::new(5.0, 5.0, 6.0, 6.0))
            .with_pad_fraction(PadFraction::Uniform(0.1));
        let extent = resolve_extent(&args, Some(&boundary())).unwrap();
        assert_eq!(extent.as_tuple(), (5.0, 5.0, 6.0, 6.0));
    }

    #[test]
    fn test_resolve_extent_pads_boundary_bounds() {
        let args = PlotArgs::default().with_pad_fraction(PadFraction::Uniform(0.1));
        let extent = resolve_extent(&args, Some(&boundary())).unwrap();
        assert_eq!(extent.as_tuple(), (-1.0, -2.0, 11.0, 22.0));
    }

    #[test]
    fn test_resolve_extent_unpadded() {
        let args = PlotArgs::default();
        let extent = resolve_extent(&args, Some(&boundary())).unwrap();
        assert_eq!(extent.as_tuple(), (0.0, 0.0, 10.0, 20.0));
    }

    #[test]
    fn test_resolve_extent_without_boundary() {
        assert!(resolve_extent(&PlotArgs::default(), None).is_none());
    }

    #[test]
    fn test_plot_with_triangulation_all_absent() {
        let (fig, ax) = plot_with_triangulation(
            &PlotArgs::default(),
            None,
            None,
            None,
            SHAPE_COLOR,
            RIVER_COLOR,
            None,
            None,
        );
        assert_eq!(ax.n_layers(), 0);
        assert_eq!(fig.width(), 800);
        assert_eq!(ax.aspect(), Aspect::EqualDataLim);
    }

    #[test]
    fn test_plot_with_dem_all_absent() {
        let (_, ax) = plot_with_dem(
            &PlotArgs::default(),
            None,
            None,
            None,
            None,
            SHAPE_COLOR,
            RIVER_COLOR,
            Some("elevation [m]"),
            None,
            None,
            None,
            None,
        )
        .unwrap();
        assert_eq!(ax.n_layers(), 0);
        assert!(ax.extent().is_none());
        // No DEM, no colorbar.
        assert!(ax.colorbar().is_none());
        assert_eq!(ax.aspect(), Aspect::EqualBox);
    }

    #[test]
    fn test_plot_with_dem_resolves_extent_onto_axes() {
        let args = PlotArgs::default()
            .with_pad_fraction(PadFraction::AxisSymmetric { x: 0.1, y: 0.2 })
            .with_title("Basin");
        let (_, ax) = plot_with_dem(
            &args,
            Some(&boundary()),
            None,
            None,
            None,
            SHAPE_COLOR,
            RIVER_COLOR,
            None,
            None,
            None,
            None,
            None,
        )
        .unwrap();
        assert_eq!(ax.extent().unwrap().as_tuple(), (-1.0, -4.0, 11.0, 24.0));
        assert_eq!(ax.title(), Some("Basin"));
        assert_eq!(ax.n_layers(), 1);
    }

    #[test]
    fn test_plot_with_dem_layers_and_colorbar() {
        use crate::raster::{Dem, RasterProfile};

        let dem = Dem::new(vec![100.0, 200.0, 150.0, 175.0], 2, 2);
        let profile = RasterProfile {
            origin_x: 0.0,
            origin_y: 20.0,
            pixel_width: 5.0,
            pixel_height: 10.0,
            nodata: -9999.0,
            epsg: Epsg(5070),
        };
        let reaches = Reaches::new(vec![LineString::from(vec![(1.0, 1.0), (9.0, 19.0)])]);

        let (_, ax) = plot_with_dem(
            &PlotArgs::default(),
            Some(&boundary()),
            Some(&reaches),
            Some(&dem),
            Some(&profile),
            SHAPE_COLOR,
            RIVER_COLOR,
            Some("elevation [m]"),
            None,
            Some(180.0),
            None,
            None,
        )
        .unwrap();

        // DEM + reaches + outlines.
        assert_eq!(ax.n_layers(), 3);
        let cb = ax.colorbar().unwrap();
        assert_eq!(cb.vmin, 100.0);
        assert_eq!(cb.vmax, 180.0);
        assert_eq!(cb.label, "elevation [m]");
    }

    #[test]
    fn test_existing_pair_is_reused() {
        let args = PlotArgs::default();
        let fig = Figure::new((2.0, 2.0), 50);
        let mut ax = Axes::new(Epsg(26918));
        ax.set_title("existing");

        let (fig, ax) = plot_with_triangulation(
            &args,
            Some(&boundary()),
            None,
            None,
            SHAPE_COLOR,
            RIVER_COLOR,
            Some(fig),
            Some(ax),
        );
        assert_eq!(fig.width(), 100);
        assert_eq!(ax.projection(), Epsg(26918));
        assert_eq!(ax.title(), Some("existing"));
        assert_eq!(ax.n_layers(), 1);
    }
}
