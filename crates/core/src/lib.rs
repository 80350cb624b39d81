//! # greentrace core
//!
//! Core types and I/O for the greentrace NDVI trend pipeline.
//!
//! This crate provides:
//! - `Raster<T>`: Generic georeferenced raster grid
//! - `GeoTransform`: Affine transformation for georeferencing
//! - `CRS`: Coordinate Reference System handling, plus a pure-Rust
//!   WGS84 → UTM forward projection for boundary reprojection
//! - `Feature`/`FeatureCollection`: vector boundaries over geo-types
//! - GeoTIFF and GeoJSON I/O without GDAL

pub mod crs;
pub mod error;
pub mod io;
pub mod raster;
pub mod vector;

pub use crs::CRS;
pub use error::{Error, Result};
pub use raster::{GeoTransform, Raster, RasterElement};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::crs::CRS;
    pub use crate::error::{Error, Result};
    pub use crate::raster::{GeoTransform, Raster, RasterElement};
    pub use crate::vector::{Feature, FeatureCollection};
}
