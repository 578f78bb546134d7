// File: crates/dataviz-core/src/color.rs
// Summary: RGB color type, CSS color parsing and the RGB B-spline interpolator.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::{ChartError, Result};

/// Opaque 8-bit RGB color. Displays as CSS `rgb(r, g, b)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse any CSS color (`"blue"`, `"#f7fcf5"`, `"rgb(1, 2, 3)"`). Alpha is dropped.
    pub fn parse(css: &str) -> Result<Self> {
        let c = csscolorparser::parse(css).map_err(|e| ChartError::parse(format!("color `{css}`"), e))?;
        let [r, g, b, _] = c.to_rgba8();
        Ok(Self { r, g, b })
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    fn channels(&self) -> [f64; 3] {
        [self.r as f64, self.g as f64, self.b as f64]
    }

    fn from_channels(c: [f64; 3]) -> Self {
        let q = |v: f64| v.round().clamp(0.0, 255.0) as u8;
        Self { r: q(c[0]), g: q(c[1]), b: q(c[2]) }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

/// Uniform cubic B-spline through RGB stops, evaluated per channel on `t ∈ [0, 1]`.
/// The curve passes through the first and last stop exactly.
#[derive(Clone, Debug, PartialEq)]
pub struct RgbBasis {
    stops: Vec<Rgb>,
}

impl RgbBasis {
    pub fn new(stops: Vec<Rgb>) -> Result<Self> {
        if stops.len() < 2 {
            return Err(ChartError::Config("an RGB basis needs at least two color stops".into()));
        }
        Ok(Self { stops })
    }

    pub fn from_css(stops: &[&str]) -> Result<Self> {
        Self::new(stops.iter().map(|s| Rgb::parse(s)).collect::<Result<Vec<_>>>()?)
    }

    pub fn stops(&self) -> &[Rgb] {
        &self.stops
    }

    pub fn at(&self, t: f64) -> Rgb {
        let values: Vec<[f64; 3]> = self.stops.iter().map(Rgb::channels).collect();
        let mut out = [0.0; 3];
        for (ch, slot) in out.iter_mut().enumerate() {
            let col: Vec<f64> = values.iter().map(|v| v[ch]).collect();
            *slot = basis_spline(&col, t);
        }
        Rgb::from_channels(out)
    }
}

fn basis(t1: f64, v0: f64, v1: f64, v2: f64, v3: f64) -> f64 {
    let t2 = t1 * t1;
    let t3 = t2 * t1;
    ((1.0 - 3.0 * t1 + 3.0 * t2 - t3) * v0
        + (4.0 - 6.0 * t2 + 3.0 * t3) * v1
        + (1.0 + 3.0 * t1 + 3.0 * t2 - 3.0 * t3) * v2
        + t3 * v3)
        / 6.0
}

fn basis_spline(values: &[f64], t: f64) -> f64 {
    let n = values.len() - 1;
    let (t, i) = if t.is_nan() || t <= 0.0 {
        (0.0, 0)
    } else if t >= 1.0 {
        (1.0, n - 1)
    } else {
        (t, (t * n as f64).floor() as usize)
    };
    let v1 = values[i];
    let v2 = values[i + 1];
    let v0 = if i > 0 { values[i - 1] } else { 2.0 * v1 - v2 };
    let v3 = if i + 2 <= n { values[i + 2] } else { 2.0 * v2 - v1 };
    basis((t - i as f64 / n as f64) * n as f64, v0, v1, v2, v3)
}

/// ColorBrewer Greens, 9 classes.
pub const GREENS9: &[&str] = &[
    "#f7fcf5", "#e5f5e0", "#c7e9c0", "#a1d99b", "#74c476",
    "#41ab5d", "#238b45", "#006d2c", "#00441b",
];

/// D3 Category 20 (paired light/dark hues).
pub const CATEGORY20: &[&str] = &[
    "#1f77b4", "#aec7e8", "#ff7f0e", "#ffbb78", "#2ca02c",
    "#98df8a", "#d62728", "#ff9896", "#9467bd", "#c5b0d5",
    "#8c564b", "#c49c94", "#e377c2", "#f7b6d2", "#7f7f7f",
    "#c7c7c7", "#bcbd22", "#dbdb8d", "#17becf", "#9edae5",
];

/// Parse a static hex palette.
pub fn scheme(colors: &[&str]) -> Result<Vec<Rgb>> {
    colors.iter().map(|c| Rgb::parse(c)).collect()
}
