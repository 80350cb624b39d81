//! Minimal raster drawing helpers
//!
//! Line, outline, and numeric-text primitives over `image::RgbaImage`.
//! Labels only ever contain digits, dashes, dots, and apostrophes, so a
//! tiny built-in 5x7 glyph set covers them without a font dependency.

use geo_types::{Geometry, Polygon};
use image::{Rgba, RgbaImage};

pub const GLYPH_W: u32 = 5;

/// 5x7 glyph rows, one bit per column (MSB left)
fn glyph(c: char) -> Option<[u8; 7]> {
    Some(match c {
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b01100],
        '\'' => [0b00100, 0b00100, 0b01000, 0b00000, 0b00000, 0b00000, 0b00000],
        ' ' => [0; 7],
        _ => return None,
    })
}

/// Pixel width of `text` at the given scale (1 column of spacing per glyph)
pub fn text_width(text: &str, scale: u32) -> u32 {
    text.chars().count() as u32 * (GLYPH_W + 1) * scale
}

/// Draw numeric text with its top-left corner at (x, y).
///
/// Characters without a glyph advance like a space.
pub fn draw_text(img: &mut RgbaImage, x: i64, y: i64, text: &str, scale: u32, color: Rgba<u8>) {
    let mut cursor = x;
    for c in text.chars() {
        if let Some(rows) = glyph(c) {
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..GLYPH_W {
                    if bits & (1 << (GLYPH_W - 1 - col)) != 0 {
                        for dy in 0..scale {
                            for dx in 0..scale {
                                put(
                                    img,
                                    cursor + (col * scale + dx) as i64,
                                    y + (row as u32 * scale + dy) as i64,
                                    color,
                                );
                            }
                        }
                    }
                }
            }
        }
        cursor += ((GLYPH_W + 1) * scale) as i64;
    }
}

/// Bounds-checked pixel write
pub fn put(img: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, color);
    }
}

/// Bresenham line, clipped to the image
pub fn draw_line(img: &mut RgbaImage, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgba<u8>) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (x0, y0);

    loop {
        put(img, x, y, color);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Draw polygon exteriors of the given geometries.
///
/// `to_pixel` maps geographic coordinates into image pixels; geometries
/// other than polygons and multi-polygons are ignored.
pub fn draw_outline<F>(img: &mut RgbaImage, geometries: &[Geometry<f64>], to_pixel: F, color: Rgba<u8>)
where
    F: Fn(f64, f64) -> (f64, f64),
{
    for geometry in geometries {
        match geometry {
            Geometry::Polygon(polygon) => draw_polygon(img, polygon, &to_pixel, color),
            Geometry::MultiPolygon(multi) => {
                for polygon in &multi.0 {
                    draw_polygon(img, polygon, &to_pixel, color);
                }
            }
            _ => {}
        }
    }
}

fn draw_polygon<F>(img: &mut RgbaImage, polygon: &Polygon<f64>, to_pixel: &F, color: Rgba<u8>)
where
    F: Fn(f64, f64) -> (f64, f64),
{
    let ring = polygon.exterior();
    for segment in ring.coords().collect::<Vec<_>>().windows(2) {
        let (x0, y0) = to_pixel(segment[0].x, segment[0].y);
        let (x1, y1) = to_pixel(segment[1].x, segment[1].y);
        draw_line(
            img,
            x0.round() as i64,
            y0.round() as i64,
            x1.round() as i64,
            y1.round() as i64,
            color,
        );
    }
}
