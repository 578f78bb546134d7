// File: crates/dataviz-core/src/scale.rs
// Summary: Linear, time, band, diverging, threshold and ordinal scales.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::color::{Rgb, RgbBasis};

/// Continuous scale operations shared by the numeric axes.
pub trait ContinuousScale {
    fn apply(&self, v: f64) -> f64;
    fn invert(&self, px: f64) -> f64;
    fn domain(&self) -> (f64, f64);
    fn range(&self) -> (f64, f64);
}

/// Affine map from `[d0, d1]` to `[r0, r1]`, unclamped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    pub d0: f64,
    pub d1: f64,
    pub r0: f64,
    pub r1: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { d0: domain.0, d1: domain.1, r0: range.0, r1: range.1 }
    }

    /// Nicely rounded tick values inside the domain, roughly `count` of them.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.d0, self.d1, count)
    }
}

impl ContinuousScale for LinearScale {
    #[inline]
    fn apply(&self, v: f64) -> f64 {
        let span = self.d1 - self.d0;
        // Degenerate domain collapses to the middle of the range.
        let t = if span == 0.0 { 0.5 } else { (v - self.d0) / span };
        self.r0 + t * (self.r1 - self.r0)
    }

    #[inline]
    fn invert(&self, px: f64) -> f64 {
        let span = self.r1 - self.r0;
        let t = if span == 0.0 { 0.5 } else { (px - self.r0) / span };
        self.d0 + t * (self.d1 - self.d0)
    }

    fn domain(&self) -> (f64, f64) {
        (self.d0, self.d1)
    }

    fn range(&self) -> (f64, f64) {
        (self.r0, self.r1)
    }
}

/// Linear scale over UTC instants, stored as epoch milliseconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeScale {
    inner: LinearScale,
}

impl TimeScale {
    pub fn new(domain: (DateTime<Utc>, DateTime<Utc>), range: (f64, f64)) -> Self {
        let d = (domain.0.timestamp_millis() as f64, domain.1.timestamp_millis() as f64);
        Self { inner: LinearScale::new(d, range) }
    }

    pub fn apply_time(&self, t: DateTime<Utc>) -> f64 {
        self.inner.apply(t.timestamp_millis() as f64)
    }

    pub fn invert_time(&self, px: f64) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.inner.invert(px).round() as i64)
    }

    /// January 1st of every `step`-th year inside the domain.
    pub fn year_ticks(&self, count: usize) -> Vec<DateTime<Utc>> {
        let (Some(start), Some(end)) = (
            DateTime::from_timestamp_millis(self.inner.d0 as i64),
            DateTime::from_timestamp_millis(self.inner.d1 as i64),
        ) else {
            return Vec::new();
        };
        let (first, last) = (start.year(), end.year());
        let step = tick_step(first as f64, last as f64, count).max(1.0) as i32;
        let mut out = Vec::new();
        let mut year = (first + step - 1) / step * step;
        while year <= last {
            if let Some(t) = NaiveDate::from_ymd_opt(year, 1, 1).and_then(|d| d.and_hms_opt(0, 0, 0)) {
                let t = t.and_utc();
                if t >= start && t <= end {
                    out.push(t);
                }
            }
            year += step;
        }
        out
    }
}

impl ContinuousScale for TimeScale {
    fn apply(&self, v: f64) -> f64 {
        self.inner.apply(v)
    }
    fn invert(&self, px: f64) -> f64 {
        self.inner.invert(px)
    }
    fn domain(&self) -> (f64, f64) {
        self.inner.domain()
    }
    fn range(&self) -> (f64, f64) {
        self.inner.range()
    }
}

/// Discrete domain split into equal-width slots across the range, no padding.
#[derive(Clone, Debug, PartialEq)]
pub struct BandScale<K> {
    domain: Vec<K>,
    r0: f64,
    r1: f64,
}

impl<K: PartialEq + Clone> BandScale<K> {
    pub fn new(domain: Vec<K>, range: (f64, f64)) -> Self {
        Self { domain, r0: range.0, r1: range.1 }
    }

    pub fn step(&self) -> f64 {
        if self.domain.is_empty() { 0.0 } else { (self.r1 - self.r0) / self.domain.len() as f64 }
    }

    pub fn bandwidth(&self) -> f64 {
        self.step().abs()
    }

    /// Start of the slot assigned to `key`; `None` for keys outside the domain.
    pub fn apply(&self, key: &K) -> Option<f64> {
        self.domain.iter().position(|k| k == key).map(|i| self.r0 + self.step() * i as f64)
    }

    /// Key whose slot contains `px`.
    pub fn invert(&self, px: f64) -> Option<&K> {
        let step = self.step();
        if step == 0.0 {
            return None;
        }
        let i = ((px - self.r0) / step).floor();
        if i < 0.0 {
            return None;
        }
        self.domain.get(i as usize)
    }

    pub fn domain(&self) -> &[K] {
        &self.domain
    }
}

/// Maps `[lo, mid, hi]` onto `t ∈ [0, 0.5, 1]` piecewise-linearly and samples a color ramp.
#[derive(Clone, Debug, PartialEq)]
pub struct DivergingScale {
    pub lo: f64,
    pub mid: f64,
    pub hi: f64,
    ramp: RgbBasis,
}

impl DivergingScale {
    pub fn new(domain: [f64; 3], ramp: RgbBasis) -> Self {
        Self { lo: domain[0], mid: domain[1], hi: domain[2], ramp }
    }

    /// Normalized position on the ramp; equal endpoints pin that half to the midpoint.
    pub fn t(&self, v: f64) -> f64 {
        let k10 = if self.lo == self.mid { 0.0 } else { 0.5 / (self.mid - self.lo) };
        let k21 = if self.mid == self.hi { 0.0 } else { 0.5 / (self.hi - self.mid) };
        let s = if self.mid < self.lo { -1.0 } else { 1.0 };
        let k = if s * v < s * self.mid { k10 } else { k21 };
        0.5 + (v - self.mid) * k
    }

    pub fn apply(&self, v: f64) -> Rgb {
        self.ramp.at(self.t(v))
    }

    pub fn ramp(&self) -> &RgbBasis {
        &self.ramp
    }
}

/// Step function: values below `thresholds[0]` map to `range[0]`, and so on.
/// Contract: `range.len() == thresholds.len() + 1`, thresholds ascending.
#[derive(Clone, Debug, PartialEq)]
pub struct ThresholdScale<T> {
    thresholds: Vec<f64>,
    range: Vec<T>,
}

impl<T> ThresholdScale<T> {
    pub fn new(thresholds: Vec<f64>, range: Vec<T>) -> Option<Self> {
        if range.len() != thresholds.len() + 1 {
            return None;
        }
        Some(Self { thresholds, range })
    }

    /// Equal-width bins: `n` thresholds stepping from `lo` by `(hi - lo) / n`.
    pub fn uniform(lo: f64, hi: f64, range: Vec<T>) -> Option<Self> {
        let n = range.len().checked_sub(1)?;
        let step = (hi - lo) / n as f64;
        let thresholds = (0..n).map(|i| lo + step * i as f64).collect();
        Self::new(thresholds, range)
    }

    pub fn bin(&self, v: f64) -> usize {
        self.thresholds.partition_point(|t| *t <= v)
    }

    pub fn apply(&self, v: f64) -> &T {
        &self.range[self.bin(v)]
    }

    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    pub fn range(&self) -> &[T] {
        &self.range
    }
}

/// Categories get palette entries in order of first appearance, cycling when exhausted.
#[derive(Clone, Debug, PartialEq)]
pub struct OrdinalScale {
    categories: Vec<String>,
    palette: Vec<Rgb>,
}

impl OrdinalScale {
    pub fn new(palette: Vec<Rgb>) -> Self {
        Self { categories: Vec::new(), palette }
    }

    /// Register `category` if unseen and return its slot.
    pub fn insert(&mut self, category: &str) -> usize {
        match self.categories.iter().position(|c| c == category) {
            Some(i) => i,
            None => {
                self.categories.push(category.to_string());
                self.categories.len() - 1
            }
        }
    }

    pub fn get(&self, category: &str) -> Option<Rgb> {
        let i = self.categories.iter().position(|c| c == category)?;
        self.palette.get(i % self.palette.len().max(1)).copied()
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }
}

/// Tick spacing of 1, 2 or 5 times a power of ten that yields about `count` ticks.
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let span = (stop - start).abs();
    if count == 0 || span == 0.0 || !span.is_finite() {
        return 0.0;
    }
    let raw = span / count as f64;
    let power = raw.log10().floor() as i32;
    let error = raw / 10f64.powi(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    // Divide for sub-unit steps so 0.2 stays 0.2 rather than 2 * 0.1.
    if power >= 0 { factor * 10f64.powi(power) } else { factor / 10f64.powi(-power) }
}

/// Multiples of [`tick_step`] inside `[start, stop]`, ascending.
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    let (lo, hi) = if start <= stop { (start, stop) } else { (stop, start) };
    let step = tick_step(lo, hi, count);
    if step == 0.0 {
        return if lo.is_finite() { vec![lo] } else { Vec::new() };
    }
    if step < 1.0 {
        let inv = (1.0 / step).round();
        let i0 = (lo * inv - 1e-9).ceil() as i64;
        let i1 = (hi * inv + 1e-9).floor() as i64;
        return (i0..=i1).map(|i| i as f64 / inv).collect();
    }
    let i0 = (lo / step - 1e-9).ceil() as i64;
    let i1 = (hi / step + 1e-9).floor() as i64;
    (i0..=i1).map(|i| i as f64 * step).collect()
}
