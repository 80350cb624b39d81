//! Decade map panel
//!
//! Up to 2x2 decadal mean NDVI maps on the fixed RdYlGn [-1, 1] ramp,
//! with the boundary outline overlaid and axis tick labels converted
//! from projected metres to approximate degrees. The degree conversion
//! is a local cosine-latitude correction at the boundary centroid, valid
//! only near the study area; it is not a geodesic reprojection.

use crate::boundary::StudyArea;
use crate::error::Result;
use crate::report::{draw, image_err};
use geo_types::Geometry;
use greentrace_colormap::{raster_to_rgba, ColormapParams};
use greentrace_core::raster::Raster;
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use std::path::Path;

const MAP_W: u32 = 300;
const MAP_H: u32 = 300;
const MARGIN_LEFT: u32 = 58;
const MARGIN_TOP: u32 = 24;
const MARGIN_RIGHT: u32 = 12;
const MARGIN_BOTTOM: u32 = 34;
const CELL_W: u32 = MARGIN_LEFT + MAP_W + MARGIN_RIGHT;
const CELL_H: u32 = MARGIN_TOP + MAP_H + MARGIN_BOTTOM;

const METRES_PER_DEGREE: f64 = 111_320.0;

const BG: Rgba<u8> = Rgba([255, 255, 255, 255]);
const AXIS: Rgba<u8> = Rgba([60, 60, 60, 255]);
const OUTLINE: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Render a raster on the NDVI ramp, scaled to fit a box.
///
/// Returns the scaled image and the per-axis pixel scale factors, so
/// callers can map raster pixel coordinates into the scaled image.
pub(super) fn render_map(raster: &Raster<f64>, box_w: u32, box_h: u32) -> (RgbaImage, f64, f64) {
    let (rows, cols) = raster.shape();
    let rgba = raster_to_rgba(raster, &ColormapParams::ndvi_map());

    // Buffer length is rows*cols*4 by construction
    let base = RgbaImage::from_raw(cols as u32, rows as u32, rgba)
        .unwrap_or_else(|| RgbaImage::from_pixel(1, 1, BG));

    let scale = (box_w as f64 / cols as f64).min(box_h as f64 / rows as f64);
    let out_w = ((cols as f64 * scale).round() as u32).max(1);
    let out_h = ((rows as f64 * scale).round() as u32).max(1);

    let resized = imageops::resize(&base, out_w, out_h, FilterType::Nearest);
    (
        resized,
        out_w as f64 / cols as f64,
        out_h as f64 / rows as f64,
    )
}

/// Export the decade panel image.
///
/// `geometries` must already be reprojected into the rasters' CRS.
pub fn export_decade_panel(
    area: &StudyArea,
    decadal_means: &[(i32, Raster<f64>)],
    geometries: &[Geometry<f64>],
    path: &Path,
) -> Result<()> {
    let n = decadal_means.len().max(1);
    let grid_cols: u32 = 2;
    let grid_rows = (n as u32).div_ceil(grid_cols);

    let mut img = RgbaImage::from_pixel(grid_cols * CELL_W, grid_rows * CELL_H, BG);

    // Approximate degrees per projected metre at the boundary centroid
    let centroid_lat = area.centroid().map(|p| p.y()).unwrap_or(0.0);
    let lon_per_metre = 1.0 / (METRES_PER_DEGREE * (centroid_lat.to_radians()).cos());
    let lat_per_metre = 1.0 / METRES_PER_DEGREE;

    for (i, (decade, raster)) in decadal_means.iter().enumerate() {
        let cell_x = (i as u32 % grid_cols) * CELL_W;
        let cell_y = (i as u32 / grid_cols) * CELL_H;
        let map_x = cell_x + MARGIN_LEFT;
        let map_y = cell_y + MARGIN_TOP;

        let (map, sx, sy) = render_map(raster, MAP_W, MAP_H);
        let (map_w, map_h) = (map.width(), map.height());
        imageops::overlay(&mut img, &map, map_x as i64, map_y as i64);

        // Decade title
        draw::draw_text(
            &mut img,
            map_x as i64,
            cell_y as i64 + 8,
            &decade.to_string(),
            2,
            AXIS,
        );

        // Boundary overlay in map pixels
        let gt = *raster.transform();
        draw::draw_outline(
            &mut img,
            geometries,
            |x, y| {
                let (col, row) = gt.geo_to_pixel(x, y);
                (map_x as f64 + col * sx, map_y as f64 + row * sy)
            },
            OUTLINE,
        );

        // X ticks: projected metres converted to approximate degrees
        let bottom = (map_y + map_h) as i64;
        for frac in [0.0_f64, 0.5, 1.0] {
            let px = map_x as i64 + (frac * map_w as f64) as i64;
            draw::draw_line(&mut img, px, bottom, px, bottom + 4, AXIS);

            let x_metres = gt.origin_x + frac * map_w as f64 / sx * gt.pixel_width;
            let label = format!("{:.3}", x_metres * lon_per_metre);
            let w = draw::text_width(&label, 1) as i64;
            draw::draw_text(&mut img, px - w / 2, bottom + 8, &label, 1, AXIS);
        }

        // Y ticks
        for frac in [0.0_f64, 0.5, 1.0] {
            let py = map_y as i64 + (frac * map_h as f64) as i64;
            draw::draw_line(&mut img, map_x as i64 - 4, py, map_x as i64, py, AXIS);

            let y_metres = gt.origin_y + frac * map_h as f64 / sy * gt.pixel_height;
            let label = format!("{:.3}", y_metres * lat_per_metre);
            let w = draw::text_width(&label, 1) as i64;
            draw::draw_text(
                &mut img,
                map_x as i64 - 6 - w,
                py - 3,
                &label,
                1,
                AXIS,
            );
        }
    }

    img.save(path).map_err(image_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use greentrace_core::GeoTransform;
    use std::fs;

    fn study_area(dir: &Path) -> StudyArea {
        let path = dir.join("Test_Area.geojson");
        fs::write(
            &path,
            r#"{
                "type": "Feature",
                "properties": {},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[
                        [-104.83, 39.96], [-104.81, 39.96],
                        [-104.81, 39.98], [-104.83, 39.98],
                        [-104.83, 39.96]
                    ]]
                }
            }"#,
        )
        .unwrap();
        StudyArea::from_geojson(&path).unwrap()
    }

    fn mean_raster(value: f64) -> Raster<f64> {
        let mut r = Raster::filled(10, 10, value);
        r.set_transform(GeoTransform::new(500_000.0, 4_425_000.0, 30.0, -30.0));
        r
    }

    #[test]
    fn render_map_scales_to_box() {
        let (map, sx, sy) = render_map(&mean_raster(0.5), 300, 300);
        assert_eq!(map.width(), 300);
        assert_eq!(map.height(), 300);
        assert!((sx - 30.0).abs() < 1e-9);
        assert!((sy - 30.0).abs() < 1e-9);
    }

    #[test]
    fn export_panel_with_four_decades() {
        let dir = tempfile::tempdir().unwrap();
        let area = study_area(dir.path());
        let path = dir.path().join("panel.tif");

        let means = vec![
            (1990, mean_raster(0.2)),
            (2000, mean_raster(0.3)),
            (2010, mean_raster(0.4)),
            (2020, mean_raster(0.5)),
        ];

        export_decade_panel(&area, &means, area.geometries(), &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn export_panel_with_fewer_decades() {
        let dir = tempfile::tempdir().unwrap();
        let area = study_area(dir.path());
        let path = dir.path().join("panel.tif");

        let means = vec![(1990, mean_raster(0.2)), (2000, mean_raster(0.3))];
        export_decade_panel(&area, &means, area.geometries(), &path).unwrap();
        assert!(path.exists());
    }
}
