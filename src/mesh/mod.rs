//! Mesh representation.
//!
//! Provides the triangulated-mesh data structure produced by the upstream
//! triangulation step and consumed by plotting and export.

mod triangulation;

pub use triangulation::Triangulation;
