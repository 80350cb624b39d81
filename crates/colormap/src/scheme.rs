//! Color schemes and multi-stop interpolation engine.

/// RGB color as (r, g, b) with values in 0..=255.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A color stop: position in [0, 1] mapped to an RGB color.
#[derive(Debug, Clone, Copy)]
pub struct ColorStop {
    pub t: f64,
    pub color: Rgb,
}

impl ColorStop {
    pub const fn new(t: f64, r: u8, g: u8, b: u8) -> Self {
        Self {
            t,
            color: Rgb::new(r, g, b),
        }
    }
}

/// Available color schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorScheme {
    /// Red -> Yellow -> Green diverging ramp, the NDVI map rendering
    RdYlGn,
    /// Brown -> Yellow -> Green (NDVI-specific sequential ramp)
    Ndvi,
    /// Black -> White
    Grayscale,
    /// Dark copper -> light, reversed matplotlib copper; density curves
    CopperR,
}

impl ColorScheme {
    /// All available schemes.
    pub const ALL: &[ColorScheme] = &[
        Self::RdYlGn,
        Self::Ndvi,
        Self::Grayscale,
        Self::CopperR,
    ];

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::RdYlGn => "Red-Yellow-Green",
            Self::Ndvi => "NDVI",
            Self::Grayscale => "Grayscale",
            Self::CopperR => "Copper (reversed)",
        }
    }
}

// ─── Color stop definitions ────────────────────────────────────────────

const RD_YL_GN_STOPS: &[ColorStop] = &[
    ColorStop::new(0.00, 165, 0, 38),
    ColorStop::new(0.25, 244, 109, 67),
    ColorStop::new(0.50, 255, 255, 191),
    ColorStop::new(0.75, 102, 189, 99),
    ColorStop::new(1.00, 0, 104, 55),
];

const NDVI_STOPS: &[ColorStop] = &[
    ColorStop::new(0.0, 120, 70, 20),
    ColorStop::new(0.3, 200, 170, 60),
    ColorStop::new(0.5, 240, 230, 100),
    ColorStop::new(0.7, 100, 180, 50),
    ColorStop::new(1.0, 10, 100, 20),
];

const COPPER_R_STOPS: &[ColorStop] = &[
    ColorStop::new(0.00, 255, 199, 127),
    ColorStop::new(0.50, 156, 99, 63),
    ColorStop::new(1.00, 0, 0, 0),
];

// ─── Interpolation engine ──────────────────────────────────────────────

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn lerp_color(c1: Rgb, c2: Rgb, t: f64) -> Rgb {
    Rgb::new(
        lerp(c1.r as f64, c2.r as f64, t).round() as u8,
        lerp(c1.g as f64, c2.g as f64, t).round() as u8,
        lerp(c1.b as f64, c2.b as f64, t).round() as u8,
    )
}

fn multi_stop(stops: &[ColorStop], t: f64) -> Rgb {
    if t <= 0.0 {
        return stops[0].color;
    }
    if t >= 1.0 {
        return stops[stops.len() - 1].color;
    }
    for i in 1..stops.len() {
        if t <= stops[i].t {
            let ratio = (t - stops[i - 1].t) / (stops[i].t - stops[i - 1].t);
            return lerp_color(stops[i - 1].color, stops[i].color, ratio);
        }
    }
    stops[stops.len() - 1].color
}

/// Evaluate a color scheme at normalized position `t` ∈ [0, 1].
pub fn evaluate(scheme: ColorScheme, t: f64) -> Rgb {
    match scheme {
        ColorScheme::RdYlGn => multi_stop(RD_YL_GN_STOPS, t),
        ColorScheme::Ndvi => multi_stop(NDVI_STOPS, t),
        ColorScheme::Grayscale => {
            let v = (t.clamp(0.0, 1.0) * 255.0).round() as u8;
            Rgb::new(v, v, v)
        }
        ColorScheme::CopperR => multi_stop(COPPER_R_STOPS, t),
    }
}
