//! I/O operations for reading and writing geospatial data
//!
//! GeoTIFF via the `tiff` crate (no GDAL) and GeoJSON boundary files
//! via the `geojson` crate.

mod geojson_io;
mod geotiff;

pub use geojson_io::read_boundary_file;
pub use geotiff::{read_geotiff, write_geotiff};
