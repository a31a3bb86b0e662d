//! End-to-end demo: plot a small synthetic basin and export its mesh.
//!
//! Builds a rectangular watershed with a river fork and a sloped DEM,
//! renders both plot styles to PNG, and writes the mesh plus its
//! metadata sidecar.
//!
//! Run with: `cargo run --example mesh_report`

use geo::{LineString, Polygon};
use watershed_mesh::plot::{RIVER_COLOR, SHAPE_COLOR};
use watershed_mesh::workflow::{
    plot_with_dem, plot_with_triangulation, save, MeshSource, PlotArgs, SaveArgs,
};
use watershed_mesh::{Dem, Epsg, Hucs, PadFraction, RasterProfile, Reaches, Triangulation};

fn synthetic_basin() -> (Hucs, Reaches, Triangulation, Dem, RasterProfile) {
    let hucs = Hucs::from_polygon(Polygon::new(
        LineString::from(vec![
            (0.0, 0.0),
            (1000.0, 0.0),
            (1000.0, 2000.0),
            (0.0, 2000.0),
            (0.0, 0.0),
        ]),
        vec![],
    ));

    let reaches = Reaches::new(vec![
        LineString::from(vec![(500.0, 0.0), (480.0, 800.0), (520.0, 1400.0)]),
        LineString::from(vec![(520.0, 1400.0), (300.0, 1900.0)]),
        LineString::from(vec![(520.0, 1400.0), (750.0, 1850.0)]),
    ]);

    // Fan triangulation of the basin rectangle, elevation rising north.
    let nx = 11;
    let ny = 21;
    let mut points = Vec::new();
    for j in 0..ny {
        for i in 0..nx {
            let x = i as f64 * 100.0;
            let y = j as f64 * 100.0;
            let z = 600.0 + 0.3 * y + 0.05 * (x - 500.0).abs();
            points.push([x, y, z]);
        }
    }
    let mut triangles = Vec::new();
    for j in 0..ny - 1 {
        for i in 0..nx - 1 {
            let v0 = j * nx + i;
            let v1 = v0 + 1;
            let v2 = v0 + nx;
            let v3 = v2 + 1;
            triangles.push([v0, v1, v3]);
            triangles.push([v0, v3, v2]);
        }
    }
    let tri = Triangulation::new(points, triangles);

    let (width, height) = (50, 100);
    let mut values = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let y = 2000.0 - (row as f64 + 0.5) * 20.0;
            let x = (col as f64 + 0.5) * 20.0;
            values.push((600.0 + 0.3 * y + 0.05 * (x - 500.0).abs()) as f32);
        }
    }
    let dem = Dem::new(values, width, height);
    let profile = RasterProfile {
        origin_x: 0.0,
        origin_y: 2000.0,
        pixel_width: 20.0,
        pixel_height: 20.0,
        nodata: -9999.0,
        epsg: Epsg(5070),
    };

    (hucs, reaches, tri, dem, profile)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let (hucs, reaches, tri, dem, profile) = synthetic_basin();

    let args = PlotArgs::default()
        .with_pad_fraction(PadFraction::from_slice(&[0.1])?)
        .with_title("Synthetic basin");

    let (mut fig, ax) = plot_with_triangulation(
        &args,
        Some(&hucs),
        Some(&reaches),
        Some(&tri),
        SHAPE_COLOR,
        RIVER_COLOR,
        None,
        None,
    );
    fig.render(&ax)?;
    fig.save_png("basin_mesh.png")?;
    println!("wrote basin_mesh.png");

    let (mut fig, ax) = plot_with_dem(
        &args,
        Some(&hucs),
        Some(&reaches),
        Some(&dem),
        Some(&profile),
        SHAPE_COLOR,
        RIVER_COLOR,
        Some("elevation [m]"),
        None,
        None,
        None,
        None,
    )?;
    fig.render(&ax)?;
    fig.save_png("basin_dem.png")?;
    println!("wrote basin_dem.png");

    let save_args = SaveArgs::new(
        "basin.vtu",
        args.projection,
        MeshSource::Huc("06010208".to_string()),
    );
    save(&save_args, &tri)?;
    println!("wrote basin.vtu and basin.vtu.readme");

    Ok(())
}
