//! Top-level run orchestration
//!
//! Processes study areas strictly one at a time, each confined to its
//! own results subdirectory, and threads all cross-area results through
//! an explicit [`RunSummary`] accumulator.

use crate::boundary::StudyArea;
use crate::composite::{compose, ChangeRecord};
use crate::error::{PipelineError, Result};
use crate::load::load_observations;
use crate::report;
use crate::select::{scan_imagery, DiscardPolicy};
use greentrace_core::io::write_geotiff;
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{error, info};

/// Everything a run needs; no other configuration source exists
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// GeoJSON boundary file per study area, processed in order
    pub boundaries: Vec<PathBuf>,
    /// Flat directory of Landsat surface-reflectance band files
    pub imagery_dir: PathBuf,
    /// Results root; each area gets its own subdirectory
    pub results_dir: PathBuf,
    /// What to do with recognizably irrelevant band files
    pub discard: DiscardPolicy,
}

/// Per-area results that survive the area's processing
#[derive(Debug, Clone)]
pub struct AreaReport {
    pub name: String,
    pub changes: Vec<ChangeRecord>,
    pub elapsed: Duration,
}

/// Accumulated results of one full run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub areas: Vec<AreaReport>,
}

impl RunSummary {
    /// The consolidated percent-change table
    pub fn change_table(&self) -> String {
        report::format_change_table(&self.areas)
    }

    /// Per-area elapsed-time lines
    pub fn timing_report(&self) -> String {
        report::format_timings(&self.areas)
    }
}

/// Run the full pipeline over every configured study area.
///
/// Boundary-load and output-directory failures are fatal; an area whose
/// imagery yields no usable composite is logged and skipped, and
/// per-file problems were already recovered further down.
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    for boundary_path in &config.boundaries {
        let area = StudyArea::from_geojson(boundary_path)?;
        info!("processing {}", area.name());

        let area_dir = config.results_dir.join(area.slug());
        fs::create_dir_all(&area_dir).map_err(|e| PipelineError::OutputDir {
            path: area_dir.clone(),
            source: e,
        })?;

        let start = Instant::now();

        let candidates = scan_imagery(&config.imagery_dir, config.discard)?;
        let observations = load_observations(&candidates, &area)?;
        info!(
            "{}: {} usable observations from {} candidates",
            area.name(),
            observations.len(),
            candidates.len()
        );

        let composite = match compose(observations) {
            Ok(c) => c,
            Err(e) => {
                error!("skipping {}: {}", area.name(), e);
                continue;
            }
        };

        // The rasters' CRS (all clips share it) decides how the
        // boundary overlays project
        let raster_crs = composite
            .ndvi
            .iter()
            .next()
            .and_then(|e| e.raster.crs().cloned());
        let overlay = area.projected_geometries(raster_crs.as_ref())?;

        for (decade, mean) in &composite.decadal_means {
            let path = area_dir.join(format!("{}_ndvi_{}.tif", area.slug(), decade));
            write_geotiff(mean, &path)?;
        }

        report::export_density_plot(
            &composite.decadal_means,
            &area_dir.join(format!("{}_ndvi_density.png", area.slug())),
        )?;

        report::export_decade_panel(
            &area,
            &composite.decadal_means,
            &overlay,
            &area_dir.join(format!("{}_ndvi_decades.tif", area.slug())),
        )?;

        report::export_yearly_gif(
            area.slug(),
            &composite.ndvi,
            &overlay,
            &area_dir.join(format!("{}_ndvi_yearly.gif", area.slug())),
            &area_dir,
        )?;

        summary.areas.push(AreaReport {
            name: area.name().to_string(),
            changes: composite.changes,
            elapsed: start.elapsed(),
        });
    }

    Ok(summary)
}
