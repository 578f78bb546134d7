// File: crates/dataviz-core/tests/scale_props.rs
// Purpose: Property tests for scale bounds, monotonicity and inversion (linear and time).

use chrono::DateTime;
use dataviz_core::color::{Rgb, RgbBasis};
use dataviz_core::scale::{ticks, BandScale, ContinuousScale, DivergingScale, LinearScale, ThresholdScale, TimeScale};
use proptest::prelude::*;

fn domain() -> impl Strategy<Value = (f64, f64)> {
    (-1.0e5..1.0e5f64, 1.0..1.0e6f64).prop_map(|(lo, span)| (lo, lo + span))
}

proptest! {
    #[test]
    fn linear_stays_in_range((d0, d1) in domain(), extent in 1.0..5000.0f64, t in 0.0..=1.0f64) {
        let s = LinearScale::new((d0, d1), (0.0, extent));
        let v = d0 + t * (d1 - d0);
        let px = s.apply(v);
        prop_assert!(px >= -1e-6 * extent && px <= extent * (1.0 + 1e-6), "{px} outside [0, {extent}]");
    }

    #[test]
    fn linear_is_monotonic((d0, d1) in domain(), a in 0.0..=1.0f64, b in 0.0..=1.0f64) {
        let s = LinearScale::new((d0, d1), (0.0, 1000.0));
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let (va, vb) = (d0 + lo * (d1 - d0), d0 + hi * (d1 - d0));
        prop_assert!(s.apply(va) <= s.apply(vb));
    }

    #[test]
    fn linear_round_trips((d0, d1) in domain(), t in 0.0..=1.0f64) {
        let s = LinearScale::new((d0, d1), (0.0, 1000.0));
        let v = d0 + t * (d1 - d0);
        let back = s.invert(s.apply(v));
        let tol = 1e-9 * (d1 - d0).abs().max(d0.abs()).max(1.0);
        prop_assert!((back - v).abs() <= tol, "{v} -> {back}");
    }

    #[test]
    fn time_scale_is_monotonic(a in 0i64..4_000_000_000_000, b in 0i64..4_000_000_000_000) {
        let (t0, t1) = (DateTime::from_timestamp_millis(0).unwrap(), DateTime::from_timestamp_millis(4_000_000_000_000).unwrap());
        let s = TimeScale::new((t0, t1), (0.0, 1000.0));
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let pa = s.apply_time(DateTime::from_timestamp_millis(lo).unwrap());
        let pb = s.apply_time(DateTime::from_timestamp_millis(hi).unwrap());
        prop_assert!(pa <= pb);
        prop_assert!((0.0..=1000.0).contains(&pa) && (0.0..=1000.0).contains(&pb));
    }

    #[test]
    fn time_scale_round_trips(
        start in -2_000_000_000_000i64..2_000_000_000_000,
        span in 86_400_000i64..4_000_000_000_000,
        t in 0.0..=1.0f64,
    ) {
        let (t0, t1) = (DateTime::from_timestamp_millis(start).unwrap(), DateTime::from_timestamp_millis(start + span).unwrap());
        let s = TimeScale::new((t0, t1), (0.0, 1000.0));
        let v = DateTime::from_timestamp_millis(start + (t * span as f64) as i64).unwrap();
        prop_assert_eq!(s.invert_time(s.apply_time(v)), Some(v));
    }

    #[test]
    fn band_slots_stay_in_range(n in 1usize..40, extent in 10.0..2000.0f64) {
        let s = BandScale::new((0..n).collect::<Vec<_>>(), (0.0, extent));
        for k in 0..n {
            let p = s.apply(&k).unwrap();
            prop_assert!(p >= 0.0 && p + s.bandwidth() <= extent + 1e-6);
            prop_assert_eq!(s.invert(p + s.bandwidth() / 2.0), Some(&k));
        }
    }

    #[test]
    fn diverging_t_is_bounded(lo in -50.0..-0.01f64, hi in 0.01..50.0f64, t in 0.0..=1.0f64) {
        let ramp = RgbBasis::new(vec![Rgb::new(0, 0, 255), Rgb::new(255, 255, 255), Rgb::new(255, 0, 0)]).unwrap();
        let s = DivergingScale::new([lo, 0.0, hi], ramp);
        let v = lo + t * (hi - lo);
        let k = s.t(v);
        prop_assert!((-1e-9..=1.0 + 1e-9).contains(&k));
        if v.abs() > 1e-9 {
            prop_assert_eq!(k >= 0.5, v > 0.0);
        }
    }

    #[test]
    fn threshold_bins_are_monotonic(lo in -100.0..100.0f64, span in 1.0..100.0f64, a in 0.0..=1.0f64, b in 0.0..=1.0f64) {
        let s = ThresholdScale::uniform(lo, lo + span, (0..9).collect::<Vec<usize>>()).unwrap();
        let (x, y) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(s.bin(lo + x * span) <= s.bin(lo + y * span));
        prop_assert!(s.bin(lo + span) == 8);
    }

    #[test]
    fn ticks_lie_inside_domain((d0, d1) in domain(), count in 1usize..20) {
        for t in ticks(d0, d1, count) {
            let slack = 1e-9 * (d1 - d0).abs().max(1.0);
            prop_assert!(t >= d0 - slack && t <= d1 + slack, "{t} outside [{d0}, {d1}]");
        }
    }
}
