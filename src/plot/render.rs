//! Rasterization of an axes' layer stack.
//!
//! One pass: resolve the coordinate window, apply the aspect policy,
//! then draw layers in ascending z-order followed by the map frame,
//! title, and colorbar. Axes are map-style: a plain frame with no tick
//! labels.

use geo::{MultiPolygon, TriangulateEarcut};
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::RGBColor;

use super::basemap::ocean_within;
use super::figure::{Aspect, Axes, Colorbar, Figure};
use super::layers::LayerKind;
use super::PlotError;
use crate::types::Extent;

const MARGIN: u32 = 12;
const TITLE_AREA: u32 = 26;
const COLORBAR_AREA: u32 = 58;

type Chart<'a, 'b> =
    ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

fn draw_err(e: impl std::fmt::Display) -> PlotError {
    PlotError::Render(e.to_string())
}

/// Line width in backend pixels for a width given in points.
fn stroke_px(width_pts: f64, dpi: u32) -> u32 {
    ((width_pts * dpi as f64 / 72.0).round() as u32).max(1)
}

fn format_value(v: f64) -> String {
    if v == 0.0 {
        "0".to_string()
    } else if v.abs() >= 1000.0 {
        format!("{:.0}", v)
    } else if v.abs() >= 1.0 {
        format!("{:.1}", v)
    } else {
        format!("{:.3}", v)
    }
}

/// The coordinate window an axes will be rendered with: the explicit
/// extent when set, otherwise the union of layer data bounds, otherwise
/// a unit window. Degenerate spans are inflated so the window always has
/// area.
pub(crate) fn resolve_window(axes: &Axes) -> Extent {
    let base = axes
        .extent()
        .or_else(|| axes.data_bounds())
        .unwrap_or_else(|| Extent::new(0.0, 0.0, 1.0, 1.0));
    inflate_degenerate(base)
}

fn inflate_degenerate(e: Extent) -> Extent {
    let (mut x0, mut y0, mut x1, mut y1) = e.as_tuple();
    if x1 - x0 <= 0.0 {
        x0 -= 0.5;
        x1 += 0.5;
    }
    if y1 - y0 <= 0.0 {
        y0 -= 0.5;
        y1 += 0.5;
    }
    Extent::new(x0, y0, x1, y1)
}

/// Apply the aspect policy to a window that will map onto an inner box of
/// `inner_w` × `inner_h` pixels.
///
/// Returns the (possibly expanded) window plus the total number of pixels
/// to give back as extra x/y margin so the box matches the window's
/// aspect ratio.
fn fit_window(window: Extent, aspect: Aspect, inner_w: f64, inner_h: f64) -> (Extent, f64, f64) {
    let sx = inner_w / window.width();
    let sy = inner_h / window.height();

    match aspect {
        Aspect::Auto => (window, 0.0, 0.0),
        Aspect::EqualDataLim => {
            if sx > sy {
                let new_w = inner_w / sy;
                let (cx, _) = window.center();
                (
                    Extent::new(cx - new_w / 2.0, window.y_min, cx + new_w / 2.0, window.y_max),
                    0.0,
                    0.0,
                )
            } else if sy > sx {
                let new_h = inner_h / sx;
                let (_, cy) = window.center();
                (
                    Extent::new(window.x_min, cy - new_h / 2.0, window.x_max, cy + new_h / 2.0),
                    0.0,
                    0.0,
                )
            } else {
                (window, 0.0, 0.0)
            }
        }
        Aspect::EqualBox => {
            if sx > sy {
                (window, inner_w - window.width() * sy, 0.0)
            } else if sy > sx {
                (window, 0.0, inner_h - window.height() * sx)
            } else {
                (window, 0.0, 0.0)
            }
        }
    }
}

/// Fill polygons, honoring interior rings, as ear-cut triangles.
fn fill_polygons(
    chart: &mut Chart<'_, '_>,
    polygons: &MultiPolygon<f64>,
    color: RGBColor,
) -> Result<(), PlotError> {
    for poly in &polygons.0 {
        if poly.exterior().0.len() < 4 {
            continue;
        }
        let triangles = poly.earcut_triangles();
        chart
            .draw_series(triangles.iter().map(|t| {
                Polygon::new(
                    vec![(t.0.x, t.0.y), (t.1.x, t.1.y), (t.2.x, t.2.y)],
                    color.filled(),
                )
            }))
            .map_err(draw_err)?;
    }
    Ok(())
}

fn draw_colorbar(
    area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    cb: &Colorbar,
    width: u32,
) -> Result<(), PlotError> {
    let bar_left = (3 * MARGIN) as i32;
    let bar_right = width.saturating_sub(3 * MARGIN) as i32;
    if bar_right <= bar_left + 1 {
        return Ok(());
    }
    let bar_top = 6;
    let bar_bottom = 20;

    let n = bar_right - bar_left;
    for i in 0..n {
        let t = i as f64 / (n - 1).max(1) as f64;
        let color = cb.colormap.sample(t);
        area.draw(&Rectangle::new(
            [(bar_left + i, bar_top), (bar_left + i + 1, bar_bottom)],
            color.filled(),
        ))
        .map_err(draw_err)?;
    }
    area.draw(&Rectangle::new(
        [(bar_left, bar_top), (bar_right, bar_bottom)],
        BLACK.stroke_width(1),
    ))
    .map_err(draw_err)?;

    let small = TextStyle::from(("sans-serif", 11).into_font());
    area.draw(&Text::new(
        format_value(cb.vmin),
        (bar_left, bar_bottom + 4),
        small.clone().pos(Pos::new(HPos::Left, VPos::Top)),
    ))
    .map_err(draw_err)?;
    area.draw(&Text::new(
        format_value(cb.vmax),
        (bar_right, bar_bottom + 4),
        small.clone().pos(Pos::new(HPos::Right, VPos::Top)),
    ))
    .map_err(draw_err)?;
    area.draw(&Text::new(
        cb.label.clone(),
        ((width / 2) as i32, bar_bottom + 4),
        small.pos(Pos::new(HPos::Center, VPos::Top)),
    ))
    .map_err(draw_err)?;

    Ok(())
}

pub(crate) fn render(figure: &mut Figure, axes: &Axes) -> Result<(), PlotError> {
    let (w, h, dpi) = (figure.width, figure.height, figure.dpi);

    let window = resolve_window(axes);
    let has_colorbar = axes.colorbar().is_some() && h > COLORBAR_AREA + 80;
    let title_area = if axes.title().is_some() { TITLE_AREA } else { 0 };

    let plot_h = if has_colorbar { h - COLORBAR_AREA } else { h };
    let inner_w = w.saturating_sub(2 * MARGIN).max(8) as f64;
    let inner_h = plot_h.saturating_sub(2 * MARGIN + title_area).max(8) as f64;

    let (window, extra_x, extra_y) = fit_window(window, axes.aspect(), inner_w, inner_h);

    let root = BitMapBackend::with_buffer(&mut figure.buffer, (w, h)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let (plot_area, cb_area) = if has_colorbar {
        let (upper, lower) = root.split_vertically((h - COLORBAR_AREA) as i32);
        (upper, Some(lower))
    } else {
        (root, None)
    };

    let margin_x = MARGIN + (extra_x / 2.0) as u32;
    let margin_top = MARGIN + title_area + (extra_y / 2.0) as u32;
    let margin_bottom = MARGIN + (extra_y / 2.0) as u32;

    let mut chart = ChartBuilder::on(&plot_area)
        .margin_left(margin_x as i32)
        .margin_right(margin_x as i32)
        .margin_top(margin_top as i32)
        .margin_bottom(margin_bottom as i32)
        .build_cartesian_2d(window.x_min..window.x_max, window.y_min..window.y_max)
        .map_err(draw_err)?;

    let mut ordered: Vec<_> = axes.layers().iter().collect();
    ordered.sort_by_key(|l| l.zorder);

    for layer in ordered {
        match &layer.kind {
            LayerKind::TriangleFill {
                points,
                triangles,
                colormap,
            } => {
                let mut zlo = f64::INFINITY;
                let mut zhi = f64::NEG_INFINITY;
                for p in points {
                    if p[2].is_finite() {
                        zlo = zlo.min(p[2]);
                        zhi = zhi.max(p[2]);
                    }
                }
                if !zlo.is_finite() {
                    zlo = 0.0;
                    zhi = 1.0;
                }
                chart
                    .draw_series(
                        triangles
                            .iter()
                            .filter(|t| t.iter().all(|&i| i < points.len()))
                            .map(|t| {
                                let a = points[t[0]];
                                let b = points[t[1]];
                                let c = points[t[2]];
                                let mean_z = (a[2] + b[2] + c[2]) / 3.0;
                                let color = colormap.sample_range(mean_z, zlo, zhi);
                                Polygon::new(
                                    vec![(a[0], a[1]), (b[0], b[1]), (c[0], c[1])],
                                    color.filled(),
                                )
                            }),
                    )
                    .map_err(draw_err)?;
            }
            LayerKind::Lines {
                lines,
                color,
                width,
            } => {
                let style = color.stroke_width(stroke_px(*width, dpi));
                chart
                    .draw_series(lines.iter().map(|line| {
                        let pts: Vec<(f64, f64)> = line.coords().map(|c| (c.x, c.y)).collect();
                        PathElement::new(pts, style)
                    }))
                    .map_err(draw_err)?;
            }
            LayerKind::Outlines {
                polygons,
                color,
                width,
            } => {
                let style = color.stroke_width(stroke_px(*width, dpi));
                for poly in &polygons.0 {
                    let rings = std::iter::once(poly.exterior()).chain(poly.interiors().iter());
                    chart
                        .draw_series(rings.map(|ring| {
                            let pts: Vec<(f64, f64)> =
                                ring.coords().map(|c| (c.x, c.y)).collect();
                            PathElement::new(pts, style)
                        }))
                        .map_err(draw_err)?;
                }
            }
            LayerKind::Raster {
                values,
                width: rw,
                height: rh,
                nodata,
                origin_x,
                origin_y,
                pixel_width,
                pixel_height,
                colormap,
                vmin,
                vmax,
            } => {
                let mut cells = Vec::new();
                for row in 0..*rh {
                    let y1 = origin_y - row as f64 * pixel_height;
                    let y0 = y1 - pixel_height;
                    if y1 < window.y_min || y0 > window.y_max {
                        continue;
                    }
                    for col in 0..*rw {
                        let v = values[row * rw + col];
                        if !v.is_finite() || v == *nodata {
                            continue;
                        }
                        let x0 = origin_x + col as f64 * pixel_width;
                        let x1 = x0 + pixel_width;
                        if x1 < window.x_min || x0 > window.x_max {
                            continue;
                        }
                        let color = colormap.sample_range(v as f64, *vmin, *vmax);
                        cells.push(Rectangle::new([(x0, y0), (x1, y1)], color.filled()));
                    }
                }
                chart.draw_series(cells).map_err(draw_err)?;
            }
            LayerKind::LandFill { polygons, color } => {
                fill_polygons(&mut chart, polygons, *color)?;
            }
            LayerKind::OceanFill { land, color } => {
                let ocean = ocean_within(land, &window);
                fill_polygons(&mut chart, &ocean, *color)?;
            }
        }
    }

    // Map frame, pixel-exact around the chart box.
    let frame = Rectangle::new(
        [
            (margin_x as i32, margin_top as i32),
            (
                (w - margin_x) as i32 - 1,
                (plot_h - margin_bottom) as i32 - 1,
            ),
        ],
        BLACK.stroke_width(1),
    );
    plot_area.draw(&frame).map_err(draw_err)?;

    if let Some(title) = axes.title() {
        let style = TextStyle::from(("sans-serif", 18).into_font())
            .pos(Pos::new(HPos::Center, VPos::Center));
        plot_area
            .draw(&Text::new(
                title.to_string(),
                ((w / 2) as i32, (MARGIN + title_area / 2) as i32),
                style,
            ))
            .map_err(draw_err)?;
    }

    if let (Some(cb), Some(area)) = (axes.colorbar(), cb_area.as_ref()) {
        draw_colorbar(area, cb, w)?;
    }

    plot_area.present().map_err(draw_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Epsg;

    #[test]
    fn test_stroke_px_rounds_up_to_one() {
        assert_eq!(stroke_px(0.5, 100), 1);
        assert_eq!(stroke_px(0.7, 100), 1);
        assert_eq!(stroke_px(2.0, 100), 3);
    }

    #[test]
    fn test_resolve_window_defaults_to_unit() {
        let axes = Axes::new(Epsg(5070));
        assert_eq!(resolve_window(&axes).as_tuple(), (0.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn test_resolve_window_prefers_explicit_extent() {
        let mut axes = Axes::new(Epsg(5070));
        axes.set_extent(Extent::new(0.0, 0.0, 2.0, 2.0));
        assert_eq!(resolve_window(&axes).as_tuple(), (0.0, 0.0, 2.0, 2.0));
    }

    #[test]
    fn test_inflate_degenerate_window() {
        let e = inflate_degenerate(Extent::new(3.0, 1.0, 3.0, 1.0));
        assert_eq!(e.as_tuple(), (2.5, 0.5, 3.5, 1.5));
    }

    #[test]
    fn test_fit_window_datalim_widens_x() {
        // Square window in a 2:1 box: the x span must double.
        let (window, ex, ey) = fit_window(
            Extent::new(0.0, 0.0, 10.0, 10.0),
            Aspect::EqualDataLim,
            200.0,
            100.0,
        );
        assert_eq!(window.as_tuple(), (-5.0, 0.0, 15.0, 10.0));
        assert_eq!((ex, ey), (0.0, 0.0));
    }

    #[test]
    fn test_fit_window_datalim_grows_y() {
        let (window, _, _) = fit_window(
            Extent::new(0.0, 0.0, 10.0, 10.0),
            Aspect::EqualDataLim,
            100.0,
            300.0,
        );
        assert_eq!(window.as_tuple(), (0.0, -10.0, 10.0, 20.0));
    }

    #[test]
    fn test_fit_window_box_shrinks_box() {
        // Square window in a 2:1 box: half the width is handed back.
        let (window, ex, ey) = fit_window(
            Extent::new(0.0, 0.0, 10.0, 10.0),
            Aspect::EqualBox,
            200.0,
            100.0,
        );
        assert_eq!(window.as_tuple(), (0.0, 0.0, 10.0, 10.0));
        assert_eq!((ex, ey), (100.0, 0.0));
    }

    #[test]
    fn test_fit_window_auto_is_identity() {
        let w = Extent::new(0.0, 0.0, 3.0, 7.0);
        let (window, ex, ey) = fit_window(w, Aspect::Auto, 640.0, 480.0);
        assert_eq!(window, w);
        assert_eq!((ex, ey), (0.0, 0.0));
    }
}
