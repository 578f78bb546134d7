// File: crates/dataviz-core/src/extent.rs
// Summary: Single-pass min/max reduction over record fields.

use crate::error::{ChartError, Result};

/// Returns `(min, max)` of `f` over `items`, or `None` when no finite value is seen.
pub fn extent<T, F>(items: &[T], f: F) -> Option<(f64, f64)>
where
    F: Fn(&T) -> f64,
{
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for item in items {
        let v = f(item);
        if !v.is_finite() {
            continue;
        }
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if lo.is_finite() && hi.is_finite() { Some((lo, hi)) } else { None }
}

/// Like [`extent`] but an empty input is a precondition violation.
pub fn require_extent<T, F>(items: &[T], field: &str, f: F) -> Result<(f64, f64)>
where
    F: Fn(&T) -> f64,
{
    extent(items, f).ok_or_else(|| ChartError::Precondition(format!("no values for `{field}`; dataset is empty")))
}

/// Maximum of `f` over `items`.
pub fn max_of<T, F>(items: &[T], field: &str, f: F) -> Result<f64>
where
    F: Fn(&T) -> f64,
{
    require_extent(items, field, f).map(|(_, hi)| hi)
}
