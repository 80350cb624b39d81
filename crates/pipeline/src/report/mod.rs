//! Reporting and export sinks
//!
//! Pure side-effecting consumers of composites: decadal rasters, a
//! density plot, the decade map panel, the yearly animation, and the
//! consolidated percent-change table. Every artifact is recomputed on
//! each run; nothing here reads prior run state.

mod animate;
mod draw;
mod panel;
mod plot;
mod table;

pub use animate::export_yearly_gif;
pub use panel::export_decade_panel;
pub use plot::export_density_plot;
pub use table::{format_change_table, format_timings};

use crate::error::PipelineError;

pub(crate) fn image_err(e: image::ImageError) -> PipelineError {
    PipelineError::Encoding(e.to_string())
}
