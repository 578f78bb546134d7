// File: crates/dataviz-core/src/charts/mod.rs
// Summary: Chart kinds, the per-kind geometry enum and shared scene framing.

pub mod bar;
pub mod choropleth;
pub mod heatmap;
pub mod scatter;
pub mod treemap;

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, Result};
use crate::scene::{Attrs, Node, Scene, TextAnchor};
use crate::theme::Theme;
use crate::tooltip::Describe;
use crate::types::Viewport;

pub use bar::BarChart;
pub use choropleth::Choropleth;
pub use heatmap::HeatMap;
pub use scatter::ScatterPlot;
pub use treemap::Treemap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    Bar,
    Scatter,
    HeatMap,
    Choropleth,
    Treemap,
}

impl ChartKind {
    pub const ALL: [ChartKind; 5] =
        [ChartKind::Bar, ChartKind::Scatter, ChartKind::HeatMap, ChartKind::Choropleth, ChartKind::Treemap];

    pub fn name(&self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Scatter => "scatter",
            ChartKind::HeatMap => "heat-map",
            ChartKind::Choropleth => "choropleth",
            ChartKind::Treemap => "treemap",
        }
    }

    pub fn needs_topology(&self) -> bool {
        matches!(self, ChartKind::Choropleth)
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ChartKind {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "bar" | "bar-chart" | "gdp" => Ok(ChartKind::Bar),
            "scatter" | "scatterplot" | "scatterplot-graph" => Ok(ChartKind::Scatter),
            "heat-map" | "heatmap" => Ok(ChartKind::HeatMap),
            "choropleth" | "choropleth-map" => Ok(ChartKind::Choropleth),
            "treemap" | "treemap-diagram" | "tree-map" => Ok(ChartKind::Treemap),
            other => Err(ChartError::Config(format!("unknown chart kind `{other}`"))),
        }
    }
}

/// Derived, render-ready geometry for one of the chart kinds.
#[derive(Clone, Debug)]
pub enum ChartGeometry {
    Bar(BarChart),
    Scatter(ScatterPlot),
    HeatMap(HeatMap),
    Choropleth(Choropleth),
    Treemap(Treemap),
}

impl ChartGeometry {
    pub fn kind(&self) -> ChartKind {
        match self {
            ChartGeometry::Bar(_) => ChartKind::Bar,
            ChartGeometry::Scatter(_) => ChartKind::Scatter,
            ChartGeometry::HeatMap(_) => ChartKind::HeatMap,
            ChartGeometry::Choropleth(_) => ChartKind::Choropleth,
            ChartGeometry::Treemap(_) => ChartKind::Treemap,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ChartGeometry::Bar(c) => c.bars.len(),
            ChartGeometry::Scatter(c) => c.dots.len(),
            ChartGeometry::HeatMap(c) => c.cells.len(),
            ChartGeometry::Choropleth(c) => c.counties.len(),
            ChartGeometry::Treemap(c) => c.tiles.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn scene(&self, vp: &Viewport, theme: &Theme) -> Scene {
        match self {
            ChartGeometry::Bar(c) => c.scene(vp, theme),
            ChartGeometry::Scatter(c) => c.scene(vp, theme),
            ChartGeometry::HeatMap(c) => c.scene(vp, theme),
            ChartGeometry::Choropleth(c) => c.scene(vp, theme),
            ChartGeometry::Treemap(c) => c.scene(vp, theme),
        }
    }

    /// Index of the record under a point in plot coordinates.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<usize> {
        match self {
            ChartGeometry::Bar(c) => c.hit_test(x, y),
            ChartGeometry::Scatter(c) => c.hit_test(x, y),
            ChartGeometry::HeatMap(c) => c.hit_test(x, y),
            ChartGeometry::Choropleth(c) => c.hit_test(x, y),
            ChartGeometry::Treemap(c) => c.hit_test(x, y),
        }
    }

    pub fn record(&self, i: usize) -> Option<&dyn Describe> {
        match self {
            ChartGeometry::Bar(c) => c.bars.get(i).map(|r| r as &dyn Describe),
            ChartGeometry::Scatter(c) => c.dots.get(i).map(|r| r as &dyn Describe),
            ChartGeometry::HeatMap(c) => c.cells.get(i).map(|r| r as &dyn Describe),
            ChartGeometry::Choropleth(c) => c.counties.get(i).map(|r| r as &dyn Describe),
            ChartGeometry::Treemap(c) => c.tiles.get(i).map(|r| r as &dyn Describe),
        }
    }

    /// One CSV row per geometry record, header included.
    pub fn write_csv<W: Write>(&self, w: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(w);
        match self {
            ChartGeometry::Bar(c) => c.bars.iter().try_for_each(|r| wtr.serialize(r))?,
            ChartGeometry::Scatter(c) => c.dots.iter().try_for_each(|r| wtr.serialize(r))?,
            ChartGeometry::HeatMap(c) => c.cells.iter().try_for_each(|r| wtr.serialize(r))?,
            ChartGeometry::Choropleth(c) => c.counties.iter().try_for_each(|r| wtr.serialize(r))?,
            ChartGeometry::Treemap(c) => c.tiles.iter().try_for_each(|r| wtr.serialize(r))?,
        }
        wtr.flush()?;
        Ok(())
    }
}

/// Empty scene with the title (and optional description) in the header band.
/// `extra_height` reserves room below the plot for a legend.
pub(crate) fn frame(vp: &Viewport, theme: &Theme, title: &str, description: Option<&str>, extra_height: f64) -> Scene {
    let (w, h) = vp.canvas();
    let mut scene = Scene::new(w, h + extra_height, theme.background);
    scene.push(Node::text(Attrs::id("title"), w / 2.0, 26.0, title, 22.0, TextAnchor::Middle, theme.title));
    if let Some(d) = description {
        scene.push(Node::text(Attrs::id("description"), w / 2.0, 46.0, d, 13.0, TextAnchor::Middle, theme.axis_label));
    }
    scene
}

/// True when `(x, y)` lies in the half-open rectangle.
pub(crate) fn in_rect(x: f64, y: f64, rx: f64, ry: f64, rw: f64, rh: f64) -> bool {
    x >= rx && x < rx + rw && y >= ry && y < ry + rh
}
