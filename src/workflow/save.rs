//! Mesh export with a metadata sidecar.

use std::path::PathBuf;

use log::info;

use super::config::{MeshSource, SaveArgs};
use super::WorkflowError;
use crate::io::{write_mesh, CellBlock};
use crate::mesh::Triangulation;

/// Sidecar path: the mesh path with `.readme` appended.
fn readme_path(args: &SaveArgs) -> PathBuf {
    let mut path = args.output_file.clone().into_os_string();
    path.push(".readme");
    PathBuf::from(path)
}

/// Metadata lines recorded next to a saved mesh.
///
/// The template is fixed: a title line naming the HUC or input file, the
/// coordinate system, generator attribution and version, and the exact
/// invocation. Lines are joined with newlines, without a trailing one.
pub fn metadata_lines(args: &SaveArgs) -> Vec<String> {
    let title = match &args.source {
        MeshSource::Huc(huc) => format!("Mesh of HUC: {}", huc),
        MeshSource::File(path) => format!("Mesh of shape: {}", path.display()),
    };

    vec![
        title,
        String::new(),
        format!("  coordinate system = {}", args.projection),
        String::new(),
        "Mesh generated by the watershed-mesh workflow.".to_string(),
        String::new(),
        format!("watershed-mesh v{}", env!("CARGO_PKG_VERSION")),
        String::new(),
        "with calling sequence:".to_string(),
        format!("  {}", args.command_line.join(" ")),
    ]
}

/// Write a mesh and its metadata sidecar.
///
/// The mesh goes to `args.output_file` as a VTU file with a single
/// `"triangle"` cell block; the metadata goes to the same path with
/// `.readme` appended, as plain UTF-8 text. The two writes are
/// independent and not atomic: a failure between them leaves the mesh
/// without its sidecar. All errors propagate unmodified.
pub fn save(args: &SaveArgs, triangulation: &Triangulation) -> Result<(), WorkflowError> {
    let points = triangulation.points();
    let block = CellBlock::triangles(triangulation.triangles().to_vec());

    info!("");
    info!("File I/O");
    info!("{}", "-".repeat(30));

    info!("Saving mesh: {}", args.output_file.display());
    write_mesh(&args.output_file, points, &[block])?;

    let readme = readme_path(args);
    info!("Saving README: {}", readme.display());
    std::fs::write(&readme, metadata_lines(args).join("\n"))?;

    Ok(())
}
