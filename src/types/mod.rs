//! Strongly-typed plot-window and configuration types.
//!
//! This module provides the small value types shared across the crate:
//!
//! - **Extent**: rectangular plot/data window in projected coordinates
//! - **PadFraction**: fractional padding policy applied around an extent
//! - **Epsg**: coordinate reference system identifier
//!
//! # Example
//!
//! ```
//! use watershed_mesh::types::{Epsg, Extent, PadFraction};
//!
//! let bounds = Extent::new(0.0, 0.0, 10.0, 20.0);
//! let window = PadFraction::Uniform(0.1).pad(&bounds);
//! assert_eq!(window.as_tuple(), (-1.0, -2.0, 11.0, 22.0));
//!
//! assert_eq!(Epsg(5070).to_string(), "epsg:5070");
//! ```

mod extent;
mod pad;

pub use extent::{Epsg, Extent};
pub use pad::{ConfigError, PadFraction};
