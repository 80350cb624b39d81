//! Yearly NDVI animation
//!
//! One GIF per study area, one frame per acquisition date. Each frame is
//! rendered to a temporary PNG, read back into the encoder, and removed.
//! Temporary frames are owned by a scoped guard so a mid-sequence
//! encoding failure still cleans up everything already written.

use crate::error::Result;
use crate::report::{draw, image_err, panel::render_map};
use chrono::NaiveDate;
use geo_types::Geometry;
use greentrace_algorithms::temporal::NdviSeries;
use greentrace_core::raster::Raster;
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, Rgba, RgbaImage};
use std::fs;
use std::fs::File;
use std::path::{Path, PathBuf};

const MAP_W: u32 = 420;
const MAP_H: u32 = 420;
const TITLE_H: u32 = 24;
const FRAME_DELAY_MS: u32 = 400;

const BG: Rgba<u8> = Rgba([255, 255, 255, 255]);
const AXIS: Rgba<u8> = Rgba([60, 60, 60, 255]);
const OUTLINE: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Temporary frame files, removed on drop no matter how the export ends
#[derive(Default)]
struct FrameScratch {
    paths: Vec<PathBuf>,
}

impl FrameScratch {
    fn register(&mut self, path: PathBuf) {
        self.paths.push(path);
    }

    fn release(&mut self, path: &Path) {
        if let Some(i) = self.paths.iter().position(|p| p == path) {
            let owned = self.paths.remove(i);
            let _ = fs::remove_file(owned);
        }
    }
}

impl Drop for FrameScratch {
    fn drop(&mut self) {
        for path in self.paths.drain(..) {
            let _ = fs::remove_file(path);
        }
    }
}

/// Encode the yearly animation for one study area.
///
/// `geometries` must already be reprojected into the rasters' CRS.
/// Temp frames are written next to the output and never outlive this
/// call, not even on error.
pub fn export_yearly_gif(
    slug: &str,
    ndvi: &NdviSeries,
    geometries: &[Geometry<f64>],
    out_path: &Path,
    scratch_dir: &Path,
) -> Result<()> {
    let file = File::create(out_path)?;
    let mut encoder = GifEncoder::new(file);
    encoder.set_repeat(Repeat::Infinite).map_err(image_err)?;

    let mut scratch = FrameScratch::default();

    for entry in ndvi.iter() {
        let frame_img = render_frame(&entry.raster, entry.date, geometries);

        let temp = scratch_dir.join(format!("{}_ndvi_yearly_{}.png", slug, entry.date));
        frame_img.save(&temp).map_err(image_err)?;
        scratch.register(temp.clone());

        let loaded = image::open(&temp).map_err(image_err)?.to_rgba8();
        let frame = Frame::from_parts(loaded, 0, 0, Delay::from_numer_denom_ms(FRAME_DELAY_MS, 1));
        encoder.encode_frame(frame).map_err(image_err)?;

        scratch.release(&temp);
    }

    Ok(())
}

fn render_frame(raster: &Raster<f64>, date: NaiveDate, geometries: &[Geometry<f64>]) -> RgbaImage {
    let (map, sx, sy) = render_map(raster, MAP_W, MAP_H);

    let mut img = RgbaImage::from_pixel(MAP_W, TITLE_H + MAP_H, BG);
    let map_x = (MAP_W.saturating_sub(map.width()) / 2) as i64;
    let map_y = TITLE_H as i64;
    image::imageops::overlay(&mut img, &map, map_x, map_y);

    draw::draw_text(&mut img, 8, 6, &date.to_string(), 2, AXIS);

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

    img
}
