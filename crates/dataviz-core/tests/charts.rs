// File: crates/dataviz-core/tests/charts.rs
// Purpose: Geometry scenarios for the bar, scatter and heat map transforms.

use dataviz_core::charts::{bar, heatmap, scatter};
use dataviz_core::scale::ContinuousScale;
use dataviz_core::{ChartError, Rgb, Viewport};

const GDP: &str = include_str!("fixtures/gdp.json");
const CYCLISTS: &str = include_str!("fixtures/cyclists.json");
const TEMPERATURE: &str = include_str!("fixtures/temperature.json");

#[test]
fn bar_two_quarters() {
    let ds: bar::GdpDataset =
        serde_json::from_str(r#"{"name":"GDP","data":[["1947-01-01",243.1],["1947-04-01",246.3]]}"#).unwrap();
    let vp = Viewport::new(1000.0, 500.0, 60.0);
    let chart = bar::transform(&ds, &vp).unwrap();

    assert_eq!(chart.bars.len(), 2);
    assert!(chart.bars[0].x < chart.bars[1].x);
    assert_eq!(chart.bars[0].x, 0.0);
    assert_eq!(chart.bars[1].x, 1000.0);
    assert_eq!(chart.bars[0].width, 500.0);
    for b in &chart.bars {
        assert!((b.height - chart.y_scale.apply(b.gdp)).abs() < 1e-9);
        assert!((b.y + b.height - vp.height).abs() < 1e-9);
    }
    assert_eq!(chart.bars[1].height, 500.0);
}

#[test]
fn bar_fixture_positions_increase() {
    let ds: bar::GdpDataset = serde_json::from_str(GDP).unwrap();
    let chart = bar::transform(&ds, &Viewport::default()).unwrap();
    assert_eq!(chart.title, "Gross Domestic Product");
    assert!(chart.bars.windows(2).all(|w| w[0].x < w[1].x));
    assert!(chart.bars.iter().all(|b| b.y >= 0.0 && b.y + b.height <= 500.0 + 1e-9));
    assert_eq!(chart.bars[0].width, (1000.0_f64 / 6.0).ceil());
}

#[test]
fn bar_rejects_bad_dates_and_empty_data() {
    let bad: bar::GdpDataset = serde_json::from_str(r#"{"name":"x","data":[["1947/01/01",1.0]]}"#).unwrap();
    assert!(matches!(bar::transform(&bad, &Viewport::default()), Err(ChartError::Parse { .. })));

    let empty: bar::GdpDataset = serde_json::from_str(r#"{"name":"x","data":[]}"#).unwrap();
    assert!(matches!(bar::transform(&empty, &Viewport::default()), Err(ChartError::Precondition(_))));
}

#[test]
fn scatter_colors_follow_doping() {
    let records: Vec<scatter::CyclistRecord> = serde_json::from_str(CYCLISTS).unwrap();
    let plot = scatter::transform(&records, &Viewport::default()).unwrap();

    for (r, d) in records.iter().zip(&plot.dots) {
        let want = if r.doping.is_empty() { Rgb::new(50, 200, 50) } else { Rgb::new(50, 50, 200) };
        assert_eq!(d.fill, want, "{}", r.name);
        assert_eq!(d.r, 5.0);
    }
    assert_eq!(plot.x_scale.domain(), (1994.0, 2017.0));
    assert_eq!(plot.y_scale.domain(), (2200.0, 2351.0));
}

#[test]
fn scatter_time_is_iso_instant() {
    assert_eq!(scatter::seconds_to_iso(2210.0).unwrap(), "1970-01-01T00:36:50.000Z");
    let records: Vec<scatter::CyclistRecord> = serde_json::from_str(CYCLISTS).unwrap();
    let plot = scatter::transform(&records, &Viewport::default()).unwrap();
    assert_eq!(plot.dots[0].time, "1970-01-01T00:36:50.000Z");
    assert!(plot.dots.iter().all(|d| (0.0..=1000.0).contains(&d.cx) && (0.0..=500.0).contains(&d.cy)));
}

#[test]
fn scatter_time_outside_date_range_is_parse_error() {
    for seconds in [1e15, 1e17, -1e16] {
        assert!(matches!(scatter::seconds_to_iso(seconds), Err(ChartError::Parse { .. })), "{seconds}");
    }

    let mut doc: serde_json::Value = serde_json::from_str(CYCLISTS).unwrap();
    doc[0]["Seconds"] = serde_json::json!(1e15);
    let records: Vec<scatter::CyclistRecord> = serde_json::from_value(doc).unwrap();
    let err = scatter::transform(&records, &Viewport::default()).unwrap_err();
    assert!(matches!(err, ChartError::Parse { .. }), "{err}");
}

#[test]
fn heatmap_months_and_cell_height() {
    let ds: heatmap::TemperatureDataset = serde_json::from_str(TEMPERATURE).unwrap();
    let vp = Viewport::default();
    let map = heatmap::transform(&ds, &vp).unwrap();

    let mut months: Vec<u32> = map.cells.iter().map(|c| c.month).collect();
    months.sort_unstable();
    months.dedup();
    assert_eq!(months, (1..=12).collect::<Vec<_>>());

    for c in &map.cells {
        assert_eq!(c.height, vp.height / 12.0);
        assert_eq!(c.width, 500.0);
        assert!(c.x >= 0.0 && c.x + c.width <= vp.width + 1e-9);
        assert!(c.y >= 0.0 && c.y + c.height <= vp.height + 1e-9);
        assert!((c.temperature - (8.66 + c.variance)).abs() < 1e-9);
    }
    assert_eq!(map.year_span(), (2000, 2001));
}

#[test]
fn heatmap_diverging_boundaries() {
    let ds: heatmap::TemperatureDataset = serde_json::from_str(TEMPERATURE).unwrap();
    let map = heatmap::transform(&ds, &Viewport::default()).unwrap();

    let find = |year: i32, month: u32| map.cells.iter().find(|c| c.year == year && c.month == month).unwrap();
    assert_eq!(find(2000, 6).variance, 0.0);
    assert_eq!(find(2000, 6).fill, Rgb::new(213, 170, 213));
    assert_eq!(find(2000, 1).fill, Rgb::new(0, 0, 255));
    assert_eq!(find(2000, 12).fill, Rgb::new(255, 0, 0));
}

#[test]
fn heatmap_rejects_month_thirteen() {
    let ds: heatmap::TemperatureDataset = serde_json::from_str(
        r#"{"baseTemperature":8.66,"monthlyVariance":[{"year":1753,"month":13,"variance":0.1}]}"#,
    )
    .unwrap();
    assert!(matches!(heatmap::transform(&ds, &Viewport::default()), Err(ChartError::Parse { .. })));
}
