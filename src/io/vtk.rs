//! VTK output for triangulated meshes.
//!
//! Provides VTU (XML UnstructuredGrid) output for the meshes produced by
//! the watershed workflow, viewable in ParaView and consumable by
//! simulation codes that read VTK unstructured grids.
//!
//! Points are written with their true elevation as the z coordinate and
//! again as an `elevation` point scalar for colormapping. Output is
//! deterministic: identical inputs produce byte-identical files.
//!
//! # Example
//!
//! ```ignore
//! use watershed_mesh::io::{write_mesh, CellBlock};
//!
//! let points = vec![[0.0, 0.0, 10.0], [1.0, 0.0, 20.0], [0.0, 1.0, 30.0]];
//! let block = CellBlock::triangles(vec![[0, 1, 2]]);
//! write_mesh("watershed.vtu", &points, &[block])?;
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;

/// Error type for VTK operations.
#[derive(Debug, Error)]
pub enum VtkError {
    /// I/O error during file operations.
    #[error("VTK I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid mesh connectivity.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),
}

/// Cell types supported by the mesh writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellType {
    /// 3-node triangle (VTK type 5).
    Triangle,
}

impl CellType {
    /// VTK cell type id.
    pub fn vtk_id(&self) -> u8 {
        match self {
            CellType::Triangle => 5,
        }
    }

    /// Block name used when naming cell groups.
    pub fn name(&self) -> &'static str {
        match self {
            CellType::Triangle => "triangle",
        }
    }
}

/// A named block of cells sharing one cell type.
#[derive(Debug, Clone)]
pub struct CellBlock {
    /// Cell type of every cell in the block.
    pub cell_type: CellType,
    /// Vertex index triples.
    pub cells: Vec<[usize; 3]>,
}

impl CellBlock {
    /// Create a `"triangle"` cell block.
    pub fn triangles(cells: Vec<[usize; 3]>) -> Self {
        Self {
            cell_type: CellType::Triangle,
            cells,
        }
    }
}

/// VTK XML writer helper.
struct VtkWriter<W: Write> {
    writer: BufWriter<W>,
    indent: usize,
}

impl<W: Write> VtkWriter<W> {
    fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
            indent: 0,
        }
    }

    fn write_indent(&mut self) -> std::io::Result<()> {
        for _ in 0..self.indent {
            write!(self.writer, "  ")?;
        }
        Ok(())
    }

    fn write_header(&mut self) -> std::io::Result<()> {
        writeln!(self.writer, "<?xml version=\"1.0\"?>")?;
        writeln!(
            self.writer,
            "<VTKFile type=\"UnstructuredGrid\" version=\"0.1\" byte_order=\"LittleEndian\">"
        )?;
        self.indent += 1;
        Ok(())
    }

    fn write_footer(&mut self) -> std::io::Result<()> {
        self.indent -= 1;
        writeln!(self.writer, "</VTKFile>")?;
        self.writer.flush()?;
        Ok(())
    }

    fn start_element(&mut self, name: &str, attrs: &[(&str, &str)]) -> std::io::Result<()> {
        self.write_indent()?;
        write!(self.writer, "<{}", name)?;
        for (key, value) in attrs {
            write!(self.writer, " {}=\"{}\"", key, value)?;
        }
        writeln!(self.writer, ">")?;
        self.indent += 1;
        Ok(())
    }

    fn end_element(&mut self, name: &str) -> std::io::Result<()> {
        self.indent -= 1;
        self.write_indent()?;
        writeln!(self.writer, "</{}>", name)?;
        Ok(())
    }

    fn write_data_array_f64(&mut self, name: &str, data: &[f64]) -> std::io::Result<()> {
        self.write_indent()?;
        writeln!(
            self.writer,
            "<DataArray type=\"Float64\" Name=\"{}\" format=\"ascii\">",
            name
        )?;

        self.indent += 1;
        self.write_indent()?;
        for (i, &v) in data.iter().enumerate() {
            write!(self.writer, "{:.10e}", v)?;
            if i < data.len() - 1 {
                write!(self.writer, " ")?;
            }
            // Line break every 6 values for readability
            if (i + 1) % 6 == 0 && i < data.len() - 1 {
                writeln!(self.writer)?;
                self.write_indent()?;
            }
        }
        writeln!(self.writer)?;
        self.indent -= 1;

        self.write_indent()?;
        writeln!(self.writer, "</DataArray>")?;
        Ok(())
    }

    fn write_data_array_i32(&mut self, name: &str, data: &[i32]) -> std::io::Result<()> {
        self.write_indent()?;
        writeln!(
            self.writer,
            "<DataArray type=\"Int32\" Name=\"{}\" format=\"ascii\">",
            name
        )?;

        self.indent += 1;
        self.write_indent()?;
        for (i, &v) in data.iter().enumerate() {
            write!(self.writer, "{}", v)?;
            if i < data.len() - 1 {
                write!(self.writer, " ")?;
            }
            if (i + 1) % 20 == 0 && i < data.len() - 1 {
                writeln!(self.writer)?;
                self.write_indent()?;
            }
        }
        writeln!(self.writer)?;
        self.indent -= 1;

        self.write_indent()?;
        writeln!(self.writer, "</DataArray>")?;
        Ok(())
    }

    fn write_data_array_u8(&mut self, name: &str, data: &[u8]) -> std::io::Result<()> {
        self.write_indent()?;
        writeln!(
            self.writer,
            "<DataArray type=\"UInt8\" Name=\"{}\" format=\"ascii\">",
            name
        )?;

        self.indent += 1;
        self.write_indent()?;
        for (i, &v) in data.iter().enumerate() {
            write!(self.writer, "{}", v)?;
            if i < data.len() - 1 {
                write!(self.writer, " ")?;
            }
            if (i + 1) % 20 == 0 && i < data.len() - 1 {
                writeln!(self.writer)?;
                self.write_indent()?;
            }
        }
        writeln!(self.writer)?;
        self.indent -= 1;

        self.write_indent()?;
        writeln!(self.writer, "</DataArray>")?;
        Ok(())
    }

    fn write_points(&mut self, points: &[[f64; 3]]) -> std::io::Result<()> {
        self.start_element("Points", &[])?;

        self.write_indent()?;
        writeln!(
            self.writer,
            "<DataArray type=\"Float64\" NumberOfComponents=\"3\" format=\"ascii\">"
        )?;

        self.indent += 1;
        self.write_indent()?;
        for (i, p) in points.iter().enumerate() {
            write!(self.writer, "{:.10e} {:.10e} {:.10e}", p[0], p[1], p[2])?;
            if i < points.len() - 1 {
                write!(self.writer, " ")?;
            }
            if (i + 1) % 2 == 0 && i < points.len() - 1 {
                writeln!(self.writer)?;
                self.write_indent()?;
            }
        }
        writeln!(self.writer)?;
        self.indent -= 1;

        self.write_indent()?;
        writeln!(self.writer, "</DataArray>")?;

        self.end_element("Points")?;
        Ok(())
    }

    fn write_cells(&mut self, blocks: &[CellBlock]) -> std::io::Result<()> {
        self.start_element("Cells", &[])?;

        let connectivity: Vec<i32> = blocks
            .iter()
            .flat_map(|b| b.cells.iter())
            .flat_map(|c| c.iter().map(|&v| v as i32))
            .collect();
        self.write_data_array_i32("connectivity", &connectivity)?;

        // Offsets (cumulative vertex count)
        let n_cells: usize = blocks.iter().map(|b| b.cells.len()).sum();
        let offsets: Vec<i32> = (1..=n_cells).map(|i| (i * 3) as i32).collect();
        self.write_data_array_i32("offsets", &offsets)?;

        let types: Vec<u8> = blocks
            .iter()
            .flat_map(|b| std::iter::repeat(b.cell_type.vtk_id()).take(b.cells.len()))
            .collect();
        self.write_data_array_u8("types", &types)?;

        self.end_element("Cells")?;
        Ok(())
    }
}

/// Write a triangulated mesh to a VTU file.
///
/// Cell indices are validated against the point count; an out-of-range
/// index rejects the whole mesh before anything is written.
pub fn write_mesh(
    path: impl AsRef<Path>,
    points: &[[f64; 3]],
    blocks: &[CellBlock],
) -> Result<(), VtkError> {
    for block in blocks {
        for (i, cell) in block.cells.iter().enumerate() {
            for &v in cell {
                if v >= points.len() {
                    return Err(VtkError::InvalidMesh(format!(
                        "{} cell {} references point {} but only {} points exist",
                        block.cell_type.name(),
                        i,
                        v,
                        points.len()
                    )));
                }
            }
        }
    }

    let file = File::create(path)?;
    let mut writer = VtkWriter::new(file);

    let n_points = points.len();
    let n_cells: usize = blocks.iter().map(|b| b.cells.len()).sum();

    writer.write_header()?;
    writer.start_element("UnstructuredGrid", &[])?;
    writer.start_element(
        "Piece",
        &[
            ("NumberOfPoints", &n_points.to_string()),
            ("NumberOfCells", &n_cells.to_string()),
        ],
    )?;

    writer.write_points(points)?;
    writer.write_cells(blocks)?;

    // Elevation scalar mirrors the point z coordinate
    writer.start_element("PointData", &[("Scalars", "elevation")])?;
    let elevation: Vec<f64> = points.iter().map(|p| p[2]).collect();
    writer.write_data_array_f64("elevation", &elevation)?;
    writer.end_element("PointData")?;

    writer.end_element("Piece")?;
    writer.end_element("UnstructuredGrid")?;
    writer.write_footer()?;

    Ok(())
}
