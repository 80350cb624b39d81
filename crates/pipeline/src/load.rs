//! Per-date raster loading and clipping
//!
//! Opens each candidate, applies the missing-data gate, and clips to the
//! reprojected boundary's bounding box (rectangular clip, not a polygon
//! mask). Per-file failures are recovered by skipping that file only.

use crate::boundary::StudyArea;
use crate::error::{PipelineError, Result};
use crate::select::Candidate;
use chrono::NaiveDate;
use greentrace_algorithms::temporal::BandRole;
use greentrace_core::io::read_geotiff;
use greentrace_core::raster::Raster;
use tracing::{debug, warn};

/// An observation is kept only when `nulls / valid < MAX_MISSING_RATIO`.
/// Exactly 10% missing is discarded; a raster with no valid pixel at all
/// has no defined ratio and is discarded too.
pub const MAX_MISSING_RATIO: f64 = 0.1;

/// One clipped, dated, role-tagged band raster
#[derive(Debug, Clone)]
pub struct Observation {
    pub date: NaiveDate,
    pub role: BandRole,
    pub raster: Raster<f64>,
}

/// Load all candidates for a study area.
///
/// Unreadable files ([`PipelineError::ImageryRead`]) and empty clips
/// ([`PipelineError::EmptyClip`]) abort only the affected file; anything
/// else propagates.
pub fn load_observations(candidates: &[Candidate], area: &StudyArea) -> Result<Vec<Observation>> {
    let mut observations = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        match load_one(candidate, area) {
            Ok(Some(obs)) => observations.push(obs),
            Ok(None) => {}
            Err(err @ (PipelineError::ImageryRead { .. } | PipelineError::EmptyClip { .. })) => {
                warn!("{}", err);
            }
            Err(other) => return Err(other),
        }
    }

    Ok(observations)
}

/// Load one candidate; `Ok(None)` means it was filtered out quietly.
fn load_one(candidate: &Candidate, area: &StudyArea) -> Result<Option<Observation>> {
    let read = |e| PipelineError::ImageryRead {
        path: candidate.path.clone(),
        source: e,
    };

    let mut raster: Raster<f64> = read_geotiff(&candidate.path).map_err(read)?;
    raster.set_nodata(Some(f64::NAN));

    let ratio = raster.missing_ratio();
    if !passes_missing_gate(ratio) {
        debug!(
            "{}: missing ratio {:?} over threshold, discarded",
            candidate.path.display(),
            ratio
        );
        return Ok(None);
    }

    // Reproject the boundary into this raster's CRS; a raster without a
    // readable CRS is assumed to already share the boundary's.
    let bounds = area.projected_bounds(raster.crs()).map_err(|e| {
        PipelineError::ImageryRead {
            path: candidate.path.clone(),
            source: greentrace_core::Error::Other(e.to_string()),
        }
    })?;

    let clipped = clip_to_bounds(&raster, bounds).ok_or_else(|| PipelineError::EmptyClip {
        area: area.name().to_string(),
        date: candidate.meta.date,
    })?;

    Ok(Some(Observation {
        date: candidate.meta.date,
        role: candidate.meta.role,
        raster: clipped,
    }))
}

/// Missing-data gate: keep only when `nulls / valid < MAX_MISSING_RATIO`.
/// `None` means no valid pixel exists, which also fails the gate.
fn passes_missing_gate(ratio: Option<f64>) -> bool {
    matches!(ratio, Some(r) if r < MAX_MISSING_RATIO)
}

/// Rectangular clip to a geographic bounding box.
///
/// Returns `None` when the box does not intersect the raster.
pub fn clip_to_bounds(
    raster: &Raster<f64>,
    (min_x, min_y, max_x, max_y): (f64, f64, f64, f64),
) -> Option<Raster<f64>> {
    let gt = raster.transform();

    let (c0, r0) = gt.geo_to_pixel(min_x, max_y);
    let (c1, r1) = gt.geo_to_pixel(max_x, min_y);

    let col_start = c0.min(c1).floor().max(0.0) as usize;
    let row_start = r0.min(r1).floor().max(0.0) as usize;
    let col_end = (c0.max(c1).ceil() as isize).min(raster.cols() as isize);
    let row_end = (r0.max(r1).ceil() as isize).min(raster.rows() as isize);

    if col_end <= col_start as isize || row_end <= row_start as isize {
        return None;
    }

    raster
        .crop(
            row_start,
            col_start,
            row_end as usize - row_start,
            col_end as usize - col_start,
        )
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use greentrace_core::GeoTransform;

    fn raster_10x10() -> Raster<f64> {
        // 10x10 cells of 30m starting at (300000, 4400000)
        let mut r = Raster::filled(10, 10, 0.2);
        r.set_transform(GeoTransform::new(300_000.0, 4_400_000.0, 30.0, -30.0));
        r
    }

    #[test]
    fn clip_inner_window() {
        let raster = raster_10x10();
        // A 3x3-cell box one cell in from the top-left
        let clipped = clip_to_bounds(
            &raster,
            (300_030.0, 4_399_880.0, 300_120.0, 4_399_970.0),
        )
        .unwrap();

        assert_eq!(clipped.shape(), (3, 3));
        assert_eq!(clipped.transform().origin_x, 300_030.0);
        assert_eq!(clipped.transform().origin_y, 4_399_970.0);
    }

    #[test]
    fn clip_overhanging_box_is_truncated() {
        let raster = raster_10x10();
        let clipped = clip_to_bounds(
            &raster,
            (299_000.0, 4_399_000.0, 301_000.0, 4_401_000.0),
        )
        .unwrap();

        // Box covers everything; clip is the full raster
        assert_eq!(clipped.shape(), (10, 10));
    }

    #[test]
    fn disjoint_box_yields_none() {
        let raster = raster_10x10();
        assert!(clip_to_bounds(&raster, (0.0, 0.0, 100.0, 100.0)).is_none());
    }

    #[test]
    fn missing_gate_boundary_is_strict() {
        // 9.99% missing is kept, exactly 10% is not
        assert!(passes_missing_gate(Some(0.0999)));
        assert!(!passes_missing_gate(Some(MAX_MISSING_RATIO)));
        assert!(!passes_missing_gate(Some(0.35)));
    }

    #[test]
    fn missing_gate_rejects_all_nodata() {
        // No valid pixel: the ratio is undefined and the file is discarded
        assert!(!passes_missing_gate(None));
    }
}
