//! Dated band stacks
//!
//! A [`BandTimeSeries`] is an ascending-by-date stack of single-band
//! rasters sharing one band role, one shape, and one CRS. Input order is
//! not trusted; construction sorts explicitly.

use crate::imagery;
use chrono::NaiveDate;
use greentrace_core::raster::Raster;
use greentrace_core::{Error, Result};
use std::fmt;

/// Semantic role of a spectral band, assigned from the sensor generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BandRole {
    Red,
    Nir,
}

impl fmt::Display for BandRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BandRole::Red => write!(f, "red"),
            BandRole::Nir => write!(f, "nir"),
        }
    }
}

/// A raster tagged with its acquisition date
#[derive(Debug, Clone)]
pub struct DatedRaster {
    pub date: NaiveDate,
    pub raster: Raster<f64>,
}

impl DatedRaster {
    pub fn new(date: NaiveDate, raster: Raster<f64>) -> Self {
        Self { date, raster }
    }
}

/// Date-ordered stack of same-role, same-shape rasters for one study area
#[derive(Debug, Clone)]
pub struct BandTimeSeries {
    role: BandRole,
    observations: Vec<DatedRaster>,
}

impl BandTimeSeries {
    /// Create an empty series for a band role
    pub fn new(role: BandRole) -> Self {
        Self {
            role,
            observations: Vec::new(),
        }
    }

    /// Build from unordered observations; sorts ascending by date
    pub fn from_observations(role: BandRole, observations: Vec<DatedRaster>) -> Result<Self> {
        let mut series = Self::new(role);
        for obs in observations {
            series.push(obs)?;
        }
        Ok(series)
    }

    /// Append an observation, keeping the stack consistent and sorted.
    ///
    /// Rejects shape mismatches against the first member and CRS
    /// mismatches when both sides carry a CRS.
    pub fn push(&mut self, obs: DatedRaster) -> Result<()> {
        if let Some(first) = self.observations.first() {
            if first.raster.shape() != obs.raster.shape() {
                return Err(Error::SizeMismatch {
                    er: first.raster.rows(),
                    ec: first.raster.cols(),
                    ar: obs.raster.rows(),
                    ac: obs.raster.cols(),
                });
            }
            if let (Some(a), Some(b)) = (first.raster.crs(), obs.raster.crs()) {
                if !a.is_equivalent(b) {
                    return Err(Error::Other(format!(
                        "CRS mismatch within band series: {} vs {}",
                        a, b
                    )));
                }
            }
        }

        let idx = self
            .observations
            .partition_point(|o| o.date <= obs.date);
        self.observations.insert(idx, obs);
        Ok(())
    }

    pub fn role(&self) -> BandRole {
        self.role
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Acquisition dates in ascending order
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.observations.iter().map(|o| o.date).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DatedRaster> {
        self.observations.iter()
    }
}

/// Per-date NDVI rasters for one study area, ascending by date
#[derive(Debug, Clone)]
pub struct NdviSeries {
    entries: Vec<DatedRaster>,
}

impl NdviSeries {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.entries.iter().map(|e| e.date).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DatedRaster> {
        self.entries.iter()
    }
}

/// Compute per-date NDVI from matching red and near-infrared stacks.
///
/// Both series must cover exactly the same date set; dates are paired
/// after the stacks' own ascending sort.
pub fn ndvi_series(red: &BandTimeSeries, nir: &BandTimeSeries) -> Result<NdviSeries> {
    if red.dates() != nir.dates() {
        return Err(Error::Other(format!(
            "red and nir series cover different dates ({} vs {} observations)",
            red.len(),
            nir.len()
        )));
    }

    let mut entries = Vec::with_capacity(red.len());
    for (r, n) in red.iter().zip(nir.iter()) {
        let index = imagery::ndvi(&n.raster, &r.raster)?;
        entries.push(DatedRaster::new(r.date, index));
    }

    Ok(NdviSeries { entries })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn band(value: f64) -> Raster<f64> {
        Raster::filled(3, 3, value)
    }

    #[test]
    fn test_series_sorts_by_date() {
        let series = BandTimeSeries::from_observations(
            BandRole::Red,
            vec![
                DatedRaster::new(date(2005, 7, 1), band(0.2)),
                DatedRaster::new(date(1991, 6, 1), band(0.1)),
                DatedRaster::new(date(1999, 8, 15), band(0.3)),
            ],
        )
        .unwrap();

        assert_eq!(
            series.dates(),
            vec![date(1991, 6, 1), date(1999, 8, 15), date(2005, 7, 1)]
        );
    }

    #[test]
    fn test_series_rejects_shape_mismatch() {
        let mut series = BandTimeSeries::new(BandRole::Nir);
        series
            .push(DatedRaster::new(date(1995, 6, 1), band(0.4)))
            .unwrap();

        let result = series.push(DatedRaster::new(date(1996, 6, 1), Raster::filled(4, 4, 0.4)));
        assert!(result.is_err(), "shape mismatch must be rejected");
    }

    #[test]
    fn test_ndvi_series_pairs_by_date() {
        let red = BandTimeSeries::from_observations(
            BandRole::Red,
            vec![
                DatedRaster::new(date(2000, 6, 1), band(0.1)),
                DatedRaster::new(date(1990, 6, 1), band(0.1)),
            ],
        )
        .unwrap();
        let nir = BandTimeSeries::from_observations(
            BandRole::Nir,
            vec![
                DatedRaster::new(date(1990, 6, 1), band(0.3)),
                DatedRaster::new(date(2000, 6, 1), band(0.3)),
            ],
        )
        .unwrap();

        let series = ndvi_series(&red, &nir).unwrap();
        assert_eq!(series.len(), 2);
        for entry in series.iter() {
            let val = entry.raster.get(1, 1).unwrap();
            assert!((val - 0.5).abs() < 1e-10, "NDVI should be 0.5, got {}", val);
        }
    }

    #[test]
    fn test_ndvi_series_rejects_date_mismatch() {
        let red = BandTimeSeries::from_observations(
            BandRole::Red,
            vec![DatedRaster::new(date(1990, 6, 1), band(0.1))],
        )
        .unwrap();
        let nir = BandTimeSeries::from_observations(
            BandRole::Nir,
            vec![DatedRaster::new(date(1991, 6, 1), band(0.3))],
        )
        .unwrap();

        assert!(ndvi_series(&red, &nir).is_err());
    }
}
