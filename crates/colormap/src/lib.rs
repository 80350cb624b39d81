//! # greentrace colormap
//!
//! Color mapping and raster-to-RGBA rendering for NDVI maps and plots.
//!
//! A small multi-stop interpolation engine plus the schemes the reports
//! use: the diverging RdYlGn ramp (NDVI maps pinned to [-1, 1]), a
//! sequential NDVI ramp, grayscale, and a reversed-copper ramp for
//! density-plot curves. The main entry point is [`raster_to_rgba`].

mod render;
mod scheme;

pub use render::{raster_to_rgba, ColormapParams};
pub use scheme::{evaluate, ColorScheme, ColorStop, Rgb};
