//! Temporal compositing
//!
//! Dated single-band stacks, NDVI series, decadal mean composites, and
//! decade-over-decade percent change.

mod change;
mod decade;
mod series;

pub use change::{percent_change, PercentChange};
pub use decade::{decade_start, decadal_means};
pub use series::{ndvi_series, BandRole, BandTimeSeries, DatedRaster, NdviSeries};
