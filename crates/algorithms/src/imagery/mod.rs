//! Imagery analysis kernels
//!
//! - NDVI / generic normalized difference between two bands
//! - Ordinal classification of NDVI values over fixed bin edges

mod classify;
mod indices;

pub use classify::{classify, digitize, NDVI_CLASS_EDGES};
pub use indices::{ndvi, normalized_difference};
