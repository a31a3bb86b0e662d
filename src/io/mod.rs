//! I/O utilities for writing mesh files.
//!
//! This module provides:
//! - **VTK output**: triangulated mesh serialization in VTU (XML
//!   UnstructuredGrid) format, the mesh format consumed downstream of the
//!   workflow
//!
//! The metadata sidecar written next to each mesh lives in the
//! [`workflow`](crate::workflow) module, which owns its template.

mod vtk;

pub use vtk::{write_mesh, CellBlock, CellType, VtkError};
