//! Density plot of decadal NDVI values
//!
//! One Gaussian-KDE curve per decade over the pixel values of that
//! decade's mean NDVI raster, rendered to a PNG. Curves use the
//! reversed-copper ramp; axis ticks are numeric.

use crate::error::Result;
use crate::report::{draw, image_err};
use greentrace_colormap::{evaluate, ColorScheme};
use greentrace_core::raster::Raster;
use image::{Rgba, RgbaImage};
use std::path::Path;

const WIDTH: u32 = 640;
const HEIGHT: u32 = 440;
const MARGIN_LEFT: i64 = 52;
const MARGIN_RIGHT: i64 = 16;
const MARGIN_TOP: i64 = 16;
const MARGIN_BOTTOM: i64 = 36;
const SAMPLES: usize = 201;

const BG: Rgba<u8> = Rgba([255, 255, 255, 255]);
const AXIS: Rgba<u8> = Rgba([60, 60, 60, 255]);

/// Render the per-decade NDVI density plot to `path`.
///
/// Decades whose mean raster holds no valid pixel contribute no curve.
pub fn export_density_plot(decadal_means: &[(i32, Raster<f64>)], path: &Path) -> Result<()> {
    let mut img = RgbaImage::from_pixel(WIDTH, HEIGHT, BG);

    let plot_w = WIDTH as i64 - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = HEIGHT as i64 - MARGIN_TOP - MARGIN_BOTTOM;
    let x_axis_y = HEIGHT as i64 - MARGIN_BOTTOM;

    // Axes
    draw::draw_line(&mut img, MARGIN_LEFT, MARGIN_TOP, MARGIN_LEFT, x_axis_y, AXIS);
    draw::draw_line(
        &mut img,
        MARGIN_LEFT,
        x_axis_y,
        MARGIN_LEFT + plot_w,
        x_axis_y,
        AXIS,
    );

    // NDVI ticks at -1, -0.5, 0, 0.5, 1
    for i in 0..5 {
        let value = -1.0 + i as f64 * 0.5;
        let x = MARGIN_LEFT + ((value + 1.0) / 2.0 * plot_w as f64) as i64;
        draw::draw_line(&mut img, x, x_axis_y, x, x_axis_y + 4, AXIS);
        let label = format!("{:.1}", value);
        let w = draw::text_width(&label, 1) as i64;
        draw::draw_text(&mut img, x - w / 2, x_axis_y + 8, &label, 1, AXIS);
    }

    // KDE curves
    let curves: Vec<(i32, Vec<f64>)> = decadal_means
        .iter()
        .filter_map(|(decade, raster)| {
            let values = valid_values(raster);
            if values.is_empty() {
                None
            } else {
                Some((*decade, kde_curve(&values)))
            }
        })
        .collect();

    let peak = curves
        .iter()
        .flat_map(|(_, c)| c.iter().copied())
        .fold(0.0_f64, f64::max)
        .max(1e-12);

    let denom = (curves.len().max(2) - 1) as f64;
    for (i, (decade, curve)) in curves.iter().enumerate() {
        let color = curve_color(i as f64 / denom);

        let mut prev: Option<(i64, i64)> = None;
        for (j, density) in curve.iter().enumerate() {
            let x = MARGIN_LEFT + (j as f64 / (SAMPLES - 1) as f64 * plot_w as f64) as i64;
            let y = x_axis_y - (density / peak * (plot_h as f64 - 4.0)) as i64;
            if let Some((px, py)) = prev {
                draw::draw_line(&mut img, px, py, x, y, color);
            }
            prev = Some((x, y));
        }

        // Legend: color swatch + decade, top-right
        let legend_y = MARGIN_TOP + 6 + i as i64 * 14;
        let legend_x = WIDTH as i64 - MARGIN_RIGHT - 70;
        draw::draw_line(&mut img, legend_x, legend_y + 3, legend_x + 16, legend_y + 3, color);
        draw::draw_text(&mut img, legend_x + 22, legend_y, &decade.to_string(), 1, AXIS);
    }

    img.save(path).map_err(image_err)
}

fn curve_color(t: f64) -> Rgba<u8> {
    let rgb = evaluate(ColorScheme::CopperR, t);
    Rgba([rgb.r, rgb.g, rgb.b, 255])
}

fn valid_values(raster: &Raster<f64>) -> Vec<f64> {
    raster
        .data()
        .iter()
        .copied()
        .filter(|v| !raster.is_nodata(*v))
        .collect()
}

/// Gaussian KDE sampled on a fixed grid over [-1, 1].
///
/// Bandwidth is Silverman's rule with a floor for degenerate (constant)
/// samples.
fn kde_curve(values: &[f64]) -> Vec<f64> {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    let std = variance.sqrt();

    let bandwidth = (1.06 * std * n.powf(-0.2)).max(0.01);
    let norm = 1.0 / (n * bandwidth * (2.0 * std::f64::consts::PI).sqrt());

    (0..SAMPLES)
        .map(|i| {
            let x = -1.0 + 2.0 * i as f64 / (SAMPLES - 1) as f64;
            values
                .iter()
                .map(|v| {
                    let z = (x - v) / bandwidth;
                    norm * (-0.5 * z * z).exp()
                })
                .sum()
        })
        .collect()
}
