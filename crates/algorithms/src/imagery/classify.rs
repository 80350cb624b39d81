//! Ordinal NDVI classification
//!
//! Buckets NDVI values into ordinal classes over fixed bin edges with
//! digitize semantics: a value maps to the count of edges strictly less
//! than it. NaN cells stay NaN.

use crate::maybe_rayon::*;
use greentrace_core::raster::Raster;
use greentrace_core::{Error, RasterElement, Result};
use ndarray::Array2;

/// Fixed class edges for NDVI: eight classes across [-1, 1]
pub const NDVI_CLASS_EDGES: [f64; 9] = [-1.0, -0.75, -0.5, -0.25, 0.0, 0.25, 0.5, 0.75, 1.0];

/// Number of edges strictly below `value`.
///
/// `edges` must be sorted ascending. Monotonic in `value`: for the NDVI
/// edges, everything in (-1, 1] lands in 1..=8 and exactly -1.0 yields 0.
pub fn digitize(value: f64, edges: &[f64]) -> usize {
    edges.iter().take_while(|&&e| e < value).count()
}

/// Classify every cell of a raster with [`digitize`].
///
/// Output cells hold the class as f64 so missing values can stay NaN,
/// matching how composites carry missing data elsewhere.
pub fn classify(raster: &Raster<f64>, edges: &[f64]) -> Result<Raster<f64>> {
    if edges.windows(2).any(|w| w[0] >= w[1]) {
        return Err(Error::Other("class edges must be strictly ascending".into()));
    }

    let (rows, cols) = raster.shape();
    let nodata = raster.nodata();

    let data: Vec<f64> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = vec![f64::NAN; cols];
            for col in 0..cols {
                let val = unsafe { raster.get_unchecked(row, col) };
                if val.is_nodata(nodata) {
                    continue;
                }
                row_data[col] = digitize(val, edges) as f64;
            }
            row_data
        })
        .collect();

    let mut output = raster.with_same_meta::<f64>(rows, cols);
    output.set_nodata(Some(f64::NAN));
    *output.data_mut() =
        Array2::from_shape_vec((rows, cols), data).map_err(|e| Error::Other(e.to_string()))?;
    Ok(output)
}
