//! Integration tests for the workflow entry points.
//!
//! These tests verify:
//! - Extent padding arithmetic end to end
//! - Plot composition with every optional layer absent
//! - Mesh + sidecar export, template content, and idempotence

use std::fs;

use geo::{LineString, Polygon};
use watershed_mesh::plot::{RIVER_COLOR, SHAPE_COLOR};
use watershed_mesh::workflow::{
    metadata_lines, plot_with_dem, plot_with_triangulation, resolve_extent, MeshSource, PlotArgs,
    SaveArgs,
};
use watershed_mesh::{ConfigError, Epsg, Extent, Hucs, PadFraction, Triangulation};

fn boundary() -> Hucs {
    Hucs::from_polygon(Polygon::new(
        LineString::from(vec![
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 20.0),
            (0.0, 20.0),
            (0.0, 0.0),
        ]),
        vec![],
    ))
}

fn triangle_mesh() -> Triangulation {
    Triangulation::new(
        vec![[0.0, 0.0, 100.0], [10.0, 0.0, 150.0], [0.0, 20.0, 120.0]],
        vec![[0, 1, 2]],
    )
}

#[test]
fn test_pad_fraction_shapes() {
    let base = Extent::new(0.0, 0.0, 10.0, 20.0);

    let one = PadFraction::from_slice(&[0.1]).unwrap().pad(&base);
    assert_eq!(one.as_tuple(), (-1.0, -2.0, 11.0, 22.0));

    let two = PadFraction::from_slice(&[0.1, 0.2]).unwrap().pad(&base);
    assert_eq!(two.as_tuple(), (-1.0, -4.0, 11.0, 24.0));

    let four = PadFraction::from_slice(&[0.1, 0.2, 0.3, 0.4])
        .unwrap()
        .pad(&base);
    assert_eq!(four.as_tuple(), (-1.0, -4.0, 13.0, 28.0));

    assert!(matches!(
        PadFraction::from_slice(&[0.1, 0.2, 0.3]),
        Err(ConfigError::InvalidPadFraction(3))
    ));
}

#[test]
fn test_padded_extent_flows_through_plot() {
    let args = PlotArgs::default().with_pad_fraction(PadFraction::from_slice(&[0.1]).unwrap());
    let extent = resolve_extent(&args, Some(&boundary())).unwrap();
    assert_eq!(extent.as_tuple(), (-1.0, -2.0, 11.0, 22.0));

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
    assert_eq!(ax.extent(), Some(extent));
}

#[test]
fn test_plots_with_all_layers_absent() {
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
    assert!(fig.width() > 0 && fig.height() > 0);

    let (fig, ax) = plot_with_dem(
        &PlotArgs::default(),
        None,
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
    assert_eq!(ax.n_layers(), 0);
    assert!(fig.width() > 0 && fig.height() > 0);
}

#[test]
fn test_save_writes_mesh_and_sidecar() {
    let dir = tempfile::tempdir().unwrap();
    let mesh_path = dir.path().join("basin.vtu");

    let args = SaveArgs::new(
        &mesh_path,
        Epsg(5070),
        MeshSource::Huc("06010208".to_string()),
    )
    .with_command_line(vec![
        "mesh-hucs".to_string(),
        "--huc".to_string(),
        "06010208".to_string(),
    ]);

    watershed_mesh::save(&args, &triangle_mesh()).unwrap();

    let mesh = fs::read_to_string(&mesh_path).unwrap();
    assert!(mesh.contains("NumberOfPoints=\"3\""));
    assert!(mesh.contains("NumberOfCells=\"1\""));
    assert!(mesh.contains("Name=\"elevation\""));

    let readme_path = dir.path().join("basin.vtu.readme");
    let readme = fs::read_to_string(&readme_path).unwrap();
    let lines: Vec<&str> = readme.split('\n').collect();
    assert_eq!(lines.len(), 10);
    assert_eq!(lines[0], "Mesh of HUC: 06010208");
    assert_eq!(lines[2], "  coordinate system = epsg:5070");
    assert_eq!(lines[8], "with calling sequence:");
    assert_eq!(lines[9], "  mesh-hucs --huc 06010208");
    assert!(!readme.ends_with('\n'));
}

#[test]
fn test_save_is_idempotent_for_sidecar() {
    let dir = tempfile::tempdir().unwrap();
    let mesh_path = dir.path().join("basin.vtu");

    let args = SaveArgs::new(
        &mesh_path,
        Epsg(5070),
        MeshSource::File("shapes/basin.shp".into()),
    )
    .with_command_line(vec!["mesh-shape".to_string(), "shapes/basin.shp".to_string()]);

    let readme_path = dir.path().join("basin.vtu.readme");

    watershed_mesh::save(&args, &triangle_mesh()).unwrap();
    let first = fs::read(&readme_path).unwrap();

    watershed_mesh::save(&args, &triangle_mesh()).unwrap();
    let second = fs::read(&readme_path).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        metadata_lines(&args)[0],
        "Mesh of shape: shapes/basin.shp"
    );
}

#[test]
fn test_save_propagates_bad_mesh() {
    let dir = tempfile::tempdir().unwrap();
    let mesh_path = dir.path().join("broken.vtu");

    let args = SaveArgs::new(&mesh_path, Epsg(5070), MeshSource::Huc("01".to_string()))
        .with_command_line(vec!["mesh-hucs".to_string()]);

    // Triangle references a vertex that does not exist.
    let bad = Triangulation::new(vec![[0.0, 0.0, 1.0], [1.0, 0.0, 2.0]], vec![[0, 1, 5]]);
    let err = watershed_mesh::save(&args, &bad).unwrap_err();
    assert!(err.to_string().contains("point"));

    // The failed write leaves no sidecar behind.
    assert!(!dir.path().join("broken.vtu.readme").exists());
}
