// File: crates/dataviz-core/tests/config_loader.rs
// Purpose: Config defaults/overrides/validation and loading through an in-memory data source.

use std::collections::HashMap;
use std::io::Write as _;

use dataviz_core::{Chart, ChartConfig, ChartError, ChartKind, ConfigOverrides, DataSource, DefaultSource};

/// Serves documents from memory; unknown URLs fail like a 404.
struct MemorySource(HashMap<&'static str, &'static str>);

impl DataSource for MemorySource {
    fn fetch(&self, url: &str) -> dataviz_core::Result<String> {
        self.0
            .get(url)
            .map(|s| s.to_string())
            .ok_or_else(|| ChartError::network(url, "404 Not Found"))
    }
}

fn source() -> MemorySource {
    MemorySource(HashMap::from([
        ("mem://gdp", include_str!("fixtures/gdp.json")),
        ("mem://education", include_str!("fixtures/education.json")),
        ("mem://counties", include_str!("fixtures/counties.json")),
        ("mem://broken", "{ not json"),
        ("mem://wrong-shape", r#"{"name": "GDP", "data": "nope"}"#),
    ]))
}

fn config(kind: ChartKind, data_url: &str) -> ChartConfig {
    ChartConfig::for_kind(kind).with_overrides(&ConfigOverrides { data_url: Some(data_url.into()), ..Default::default() })
}

#[test]
fn defaults_per_kind() {
    let bar = ChartConfig::for_kind(ChartKind::Bar);
    assert!(bar.data_url.ends_with("/GDP-data.json"));
    assert_eq!((bar.width, bar.height, bar.padding), (1000.0, 500.0, 60.0));
    assert!(bar.topology_url.is_none());

    let map = ChartConfig::for_kind(ChartKind::Choropleth);
    assert!(map.topology_url.as_deref().unwrap().ends_with("/counties.json"));
}

#[test]
fn overrides_merge_and_validate() {
    let file = ConfigOverrides::from_json_str(r#"{"width": 800, "padding": 40}"#).unwrap();
    let flags = ConfigOverrides { width: Some(640.0), ..Default::default() };
    let cfg = ChartConfig::for_kind(ChartKind::HeatMap).with_overrides(&file.merged(flags));
    assert_eq!((cfg.width, cfg.height, cfg.padding), (640.0, 500.0, 40.0));
    assert!(cfg.validate().is_ok());

    let bad = cfg.clone().with_overrides(&ConfigOverrides { padding: Some(5.0), ..Default::default() });
    assert!(matches!(bad.validate(), Err(ChartError::Config(_))));
    let zero = cfg.with_overrides(&ConfigOverrides { height: Some(0.0), ..Default::default() });
    assert!(matches!(zero.validate(), Err(ChartError::Config(_))));
}

#[test]
fn unknown_config_keys_are_rejected() {
    let err = ConfigOverrides::from_json_str(r#"{"dataUrl": "x", "colour": "red"}"#).unwrap_err();
    assert!(matches!(err, ChartError::Config(_)));
}

#[test]
fn config_file_round_trip_from_disk() {
    let dir = std::path::PathBuf::from("target/test_out");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config_loader.json");
    let mut f = std::fs::File::create(&path).unwrap();
    writeln!(f, r#"{{"dataUrl": "data/gdp.json", "height": 300}}"#).unwrap();

    let o = ConfigOverrides::from_path(&path).unwrap();
    assert_eq!(o.data_url.as_deref(), Some("data/gdp.json"));
    assert_eq!(o.height, Some(300.0));
}

#[test]
fn load_through_source() {
    let chart = Chart::load(ChartKind::Bar, config(ChartKind::Bar, "mem://gdp"), &source()).unwrap();
    assert_eq!(chart.kind(), ChartKind::Bar);
    assert_eq!(chart.geometry.len(), 6);

    let mut cfg = config(ChartKind::Choropleth, "mem://education");
    cfg.topology_url = Some("mem://counties".into());
    let map = Chart::load(ChartKind::Choropleth, cfg, &source()).unwrap();
    assert_eq!(map.geometry.len(), 2);
}

#[test]
fn loader_error_kinds() {
    let src = source();
    let missing = Chart::load(ChartKind::Bar, config(ChartKind::Bar, "mem://nowhere"), &src).unwrap_err();
    assert!(matches!(missing, ChartError::Network { .. }), "{missing}");

    let broken = Chart::load(ChartKind::Bar, config(ChartKind::Bar, "mem://broken"), &src).unwrap_err();
    assert!(matches!(broken, ChartError::Parse { .. }), "{broken}");

    let shape = Chart::load(ChartKind::Bar, config(ChartKind::Bar, "mem://wrong-shape"), &src).unwrap_err();
    assert!(matches!(shape, ChartError::Parse { .. }), "{shape}");

    let mut no_topo = config(ChartKind::Choropleth, "mem://education");
    no_topo.topology_url = None;
    let err = Chart::load(ChartKind::Choropleth, no_topo, &src).unwrap_err();
    assert!(matches!(err, ChartError::Config(_)), "{err}");
}

#[test]
fn default_source_reads_local_paths() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/cyclists.json");
    let src = DefaultSource::new().unwrap();
    let chart = Chart::load(ChartKind::Scatter, config(ChartKind::Scatter, path), &src).unwrap();
    assert_eq!(chart.geometry.len(), 4);

    let file_url = format!("file://{path}");
    assert!(src.fetch(&file_url).unwrap().contains("Marco Pantani"));
}

#[test]
fn kind_names_parse() {
    for kind in ChartKind::ALL {
        assert_eq!(kind.name().parse::<ChartKind>().unwrap(), kind);
    }
    assert_eq!("heatmap".parse::<ChartKind>().unwrap(), ChartKind::HeatMap);
    assert!(matches!("pie".parse::<ChartKind>(), Err(ChartError::Config(_))));
}
