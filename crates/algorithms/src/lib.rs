//! # greentrace algorithms
//!
//! Pure analysis kernels for the NDVI trend pipeline:
//!
//! - **imagery**: NDVI / normalized difference, ordinal classification
//! - **temporal**: dated band stacks, decadal compositing, percent change
//!
//! All kernels are side-effect free; I/O and orchestration live in
//! `greentrace-pipeline`.

pub mod imagery;
pub mod maybe_rayon;
pub mod temporal;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::imagery::{classify, digitize, ndvi, normalized_difference, NDVI_CLASS_EDGES};
    pub use crate::temporal::{
        decade_start, decadal_means, ndvi_series, percent_change, BandRole, BandTimeSeries,
        DatedRaster, NdviSeries, PercentChange,
    };
    pub use greentrace_core::prelude::*;
}
