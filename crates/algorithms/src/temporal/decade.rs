//! Decadal mean compositing
//!
//! Buckets a dated NDVI series into calendar decades anchored at 1990 and
//! takes the per-pixel mean over each bucket, ignoring NaN. The anchor is
//! fixed rather than derived from the first acquisition, so "1990" always
//! means the 1990s regardless of which dates are present.

use crate::temporal::NdviSeries;
use chrono::Datelike;
use greentrace_core::raster::Raster;
use greentrace_core::{Error, Result};
use ndarray::Array2;

/// Start year of the decade bucket containing `year`, anchored at 1990.
///
/// 1993 → 1990, 2000 → 2000, 2023 → 2020. Years before 1990 bucket into
/// earlier decades by the same rule (1987 → 1980).
pub fn decade_start(year: i32) -> i32 {
    1990 + 10 * (year - 1990).div_euclid(10)
}

/// Mean NDVI per pixel per decade.
///
/// Returns `(decade_start, mean_raster)` pairs in ascending decade order.
/// A pixel with no valid observation in a decade stays NaN. The last
/// bucket is necessarily partial, covering available years only.
pub fn decadal_means(series: &NdviSeries) -> Result<Vec<(i32, Raster<f64>)>> {
    let first = series
        .iter()
        .next()
        .ok_or_else(|| Error::Other("cannot composite an empty NDVI series".into()))?;
    let (rows, cols) = first.raster.shape();

    let mut decades: Vec<i32> = series
        .iter()
        .map(|e| decade_start(e.date.year()))
        .collect();
    decades.sort_unstable();
    decades.dedup();

    let mut result = Vec::with_capacity(decades.len());

    for decade in decades {
        let mut sum = Array2::<f64>::zeros((rows, cols));
        let mut count = Array2::<u32>::zeros((rows, cols));

        for entry in series
            .iter()
            .filter(|e| decade_start(e.date.year()) == decade)
        {
            if entry.raster.shape() != (rows, cols) {
                return Err(Error::SizeMismatch {
                    er: rows,
                    ec: cols,
                    ar: entry.raster.rows(),
                    ac: entry.raster.cols(),
                });
            }
            for row in 0..rows {
                for col in 0..cols {
                    let val = unsafe { entry.raster.get_unchecked(row, col) };
                    if val.is_nan() {
                        continue;
                    }
                    sum[(row, col)] += val;
                    count[(row, col)] += 1;
                }
            }
        }

        let mut mean = first.raster.with_same_meta::<f64>(rows, cols);
        mean.set_nodata(Some(f64::NAN));
        let data = mean.data_mut();
        for row in 0..rows {
            for col in 0..cols {
                data[(row, col)] = if count[(row, col)] > 0 {
                    sum[(row, col)] / count[(row, col)] as f64
                } else {
                    f64::NAN
                };
            }
        }

        result.push((decade, mean));
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::temporal::{ndvi_series, BandRole, BandTimeSeries, DatedRaster};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn series_from(bands: Vec<(NaiveDate, f64, f64)>) -> NdviSeries {
        let red = BandTimeSeries::from_observations(
            BandRole::Red,
            bands
                .iter()
                .map(|&(d, r, _)| DatedRaster::new(d, Raster::filled(2, 2, r)))
                .collect(),
        )
        .unwrap();
        let nir = BandTimeSeries::from_observations(
            BandRole::Nir,
            bands
                .iter()
                .map(|&(d, _, n)| DatedRaster::new(d, Raster::filled(2, 2, n)))
                .collect(),
        )
        .unwrap();
        ndvi_series(&red, &nir).unwrap()
    }

    #[test]
    fn test_decade_start_anchor() {
        assert_eq!(decade_start(1990), 1990);
        assert_eq!(decade_start(1993), 1990);
        assert_eq!(decade_start(1999), 1990);
        assert_eq!(decade_start(2000), 2000);
        assert_eq!(decade_start(2023), 2020);
        assert_eq!(decade_start(1987), 1980);
    }

    #[test]
    fn test_single_point_is_idempotent() {
        // A series already aligned to one decade point must come back unchanged
        let series = series_from(vec![(date(1990, 6, 1), 0.1, 0.3)]);
        let means = decadal_means(&series).unwrap();

        assert_eq!(means.len(), 1);
        assert_eq!(means[0].0, 1990);
        let val = means[0].1.get(0, 0).unwrap();
        assert!((val - 0.5).abs() < 1e-10, "got {}", val);
    }

    #[test]
    fn test_mean_within_decade() {
        // 1991: NDVI 0.5; 1995: NDVI = (0.3-0.3)/(0.3+0.3) = 0.0 → mean 0.25
        let series = series_from(vec![
            (date(1991, 6, 1), 0.1, 0.3),
            (date(1995, 6, 1), 0.3, 0.3),
        ]);
        let means = decadal_means(&series).unwrap();

        assert_eq!(means.len(), 1);
        let val = means[0].1.get(1, 1).unwrap();
        assert!((val - 0.25).abs() < 1e-10, "got {}", val);
    }

    #[test]
    fn test_buckets_are_sorted_and_partial() {
        let series = series_from(vec![
            (date(2021, 6, 1), 0.1, 0.3),
            (date(1992, 6, 1), 0.1, 0.3),
            (date(2005, 6, 1), 0.1, 0.3),
        ]);
        let means = decadal_means(&series).unwrap();

        let decades: Vec<i32> = means.iter().map(|(d, _)| *d).collect();
        assert_eq!(decades, vec![1990, 2000, 2020]);
    }

    #[test]
    fn test_nan_pixels_do_not_poison_mean() {
        let d = date(1994, 6, 1);
        let mut red_a = Raster::filled(2, 2, 0.1);
        red_a.set(0, 0, f64::NAN).unwrap();
        red_a.set_nodata(Some(f64::NAN));

        let red = BandTimeSeries::from_observations(
            BandRole::Red,
            vec![
                DatedRaster::new(d, red_a),
                DatedRaster::new(date(1996, 6, 1), Raster::filled(2, 2, 0.1)),
            ],
        )
        .unwrap();
        let nir = BandTimeSeries::from_observations(
            BandRole::Nir,
            vec![
                DatedRaster::new(d, Raster::filled(2, 2, 0.3)),
                DatedRaster::new(date(1996, 6, 1), Raster::filled(2, 2, 0.3)),
            ],
        )
        .unwrap();

        let series = ndvi_series(&red, &nir).unwrap();
        let means = decadal_means(&series).unwrap();

        // (0,0) has one valid observation, the rest have two; all means are 0.5
        let val = means[0].1.get(0, 0).unwrap();
        assert!((val - 0.5).abs() < 1e-10, "got {}", val);
    }

    #[test]
    fn test_empty_series_is_error() {
        let red = BandTimeSeries::new(BandRole::Red);
        let nir = BandTimeSeries::new(BandRole::Nir);
        let series = ndvi_series(&red, &nir).unwrap();
        assert!(decadal_means(&series).is_err());
    }
}
