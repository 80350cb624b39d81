//! NDVI compositing per study area
//!
//! Folds clipped observations into per-date NDVI, decadal means, ordinal
//! classes, and decade-over-decade percent change of the mean class.

use crate::error::{PipelineError, Result};
use crate::load::Observation;
use greentrace_algorithms::imagery::{classify, NDVI_CLASS_EDGES};
use greentrace_algorithms::temporal::{
    decadal_means, ndvi_series, percent_change, BandRole, BandTimeSeries, DatedRaster, NdviSeries,
    PercentChange,
};
use greentrace_core::raster::Raster;

/// Percent change of mean NDVI class between two consecutive decades
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChangeRecord {
    pub from_decade: i32,
    pub to_decade: i32,
    pub change: PercentChange,
}

impl ChangeRecord {
    /// Column label in the report table, e.g. `2000's-1990's`
    pub fn label(&self) -> String {
        format!("{}'s-{}'s", self.to_decade, self.from_decade)
    }
}

/// Everything the reporting stage needs for one study area
#[derive(Debug, Clone)]
pub struct AreaComposite {
    /// Per-date NDVI rasters, ascending by date
    pub ndvi: NdviSeries,
    /// Mean NDVI per pixel per decade, ascending by decade
    pub decadal_means: Vec<(i32, Raster<f64>)>,
    /// Ordinal class rasters derived from the decadal means
    pub decadal_classes: Vec<(i32, Raster<f64>)>,
    /// Percent change between each consecutive pair of present decades
    pub changes: Vec<ChangeRecord>,
}

/// Build the composite for one study area from its clipped observations.
///
/// Observations split by band role into date-sorted stacks; red and nir
/// must cover the same date set. An area with no observations at all
/// cannot be composited and is reported as an error for the caller to
/// decide on.
pub fn compose(observations: Vec<Observation>) -> Result<AreaComposite> {
    let mut red = BandTimeSeries::new(BandRole::Red);
    let mut nir = BandTimeSeries::new(BandRole::Nir);

    for obs in observations {
        let dated = DatedRaster::new(obs.date, obs.raster);
        match obs.role {
            BandRole::Red => red.push(dated)?,
            BandRole::Nir => nir.push(dated)?,
        }
    }

    if red.is_empty() && nir.is_empty() {
        return Err(PipelineError::Core(greentrace_core::Error::Other(
            "no usable observations for this study area".into(),
        )));
    }

    let ndvi = ndvi_series(&red, &nir)?;
    let means = decadal_means(&ndvi)?;

    let mut classes = Vec::with_capacity(means.len());
    for (decade, mean) in &means {
        classes.push((*decade, classify(mean, &NDVI_CLASS_EDGES)?));
    }

    let changes = class_changes(&classes);

    Ok(AreaComposite {
        ndvi,
        decadal_means: means,
        decadal_classes: classes,
        changes,
    })
}

/// Percent change of the mean class between consecutive present decades.
///
/// A class raster with no valid cells yields an undefined mean, which
/// surfaces as [`PercentChange::Undefined`] rather than a number.
fn class_changes(classes: &[(i32, Raster<f64>)]) -> Vec<ChangeRecord> {
    let means: Vec<(i32, f64)> = classes
        .iter()
        .map(|(decade, raster)| (*decade, raster.mean_valid().unwrap_or(f64::NAN)))
        .collect();

    means
        .windows(2)
        .map(|pair| ChangeRecord {
            from_decade: pair[0].0,
            to_decade: pair[1].0,
            change: percent_change(pair[0].1, pair[1].1),
        })
        .collect()
}
