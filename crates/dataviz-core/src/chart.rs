// File: crates/dataviz-core/src/chart.rs
// Summary: Chart pipeline; load a dataset, transform it once into geometry, then render and hover.

use std::io::Write;
use std::path::Path;

use tracing::{debug, info};

use crate::charts::{bar, choropleth, heatmap, scatter, treemap, ChartGeometry, ChartKind};
use crate::config::ChartConfig;
use crate::dataset::{parse_json, DataSource};
use crate::error::{ChartError, Result};
use crate::scene::Scene;
use crate::svg;
use crate::theme::Theme;
use crate::tooltip::{PointerEvent, Tooltip, TooltipState};
use crate::topojson::Topology;
use crate::types::Viewport;

/// A loaded chart: configuration plus geometry computed once from the dataset.
#[derive(Clone, Debug)]
pub struct Chart {
    pub config: ChartConfig,
    pub geometry: ChartGeometry,
}

impl Chart {
    /// Fetch the chart's documents from `source` and transform them.
    pub fn load(kind: ChartKind, config: ChartConfig, source: &dyn DataSource) -> Result<Self> {
        config.validate()?;
        let primary = source.fetch(&config.data_url)?;
        let topology = if kind.needs_topology() {
            let url = config
                .topology_url
                .as_deref()
                .ok_or_else(|| ChartError::Config(format!("{kind} needs topologyUrl")))?;
            Some(source.fetch(url)?)
        } else {
            None
        };
        Self::from_json(kind, config, &primary, topology.as_deref())
    }

    /// Transform already-fetched JSON bodies.
    pub fn from_json(kind: ChartKind, config: ChartConfig, primary: &str, topology: Option<&str>) -> Result<Self> {
        config.validate()?;
        let vp = config.viewport();
        let geometry = match kind {
            ChartKind::Bar => ChartGeometry::Bar(bar::transform(&parse_json("GDP dataset", primary)?, &vp)?),
            ChartKind::Scatter => {
                let records: Vec<scatter::CyclistRecord> = parse_json("cyclist dataset", primary)?;
                ChartGeometry::Scatter(scatter::transform(&records, &vp)?)
            }
            ChartKind::HeatMap => {
                ChartGeometry::HeatMap(heatmap::transform(&parse_json("temperature dataset", primary)?, &vp)?)
            }
            ChartKind::Choropleth => {
                let body = topology.ok_or_else(|| ChartError::Config("choropleth needs a topology document".into()))?;
                let education: Vec<choropleth::EducationRecord> = parse_json("education dataset", primary)?;
                let topo: Topology = parse_json("topology", body)?;
                ChartGeometry::Choropleth(choropleth::transform(&education, &topo, &vp)?)
            }
            ChartKind::Treemap => ChartGeometry::Treemap(treemap::transform(&parse_json("tree dataset", primary)?, &vp)?),
        };
        info!(kind = %kind, records = geometry.len(), "chart geometry ready");
        Ok(Self { config, geometry })
    }

    pub fn kind(&self) -> ChartKind {
        self.geometry.kind()
    }

    pub fn viewport(&self) -> Viewport {
        self.config.viewport()
    }

    pub fn scene(&self, theme: &Theme) -> Scene {
        self.geometry.scene(&self.viewport(), theme)
    }

    pub fn render_svg(&self, theme: &Theme) -> String {
        svg::render(&self.scene(theme))
    }

    pub fn render_to_svg(&self, theme: &Theme, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        svg::render_to_file(&self.scene(theme), path)?;
        info!(path = %path.display(), "wrote svg");
        Ok(())
    }

    pub fn write_csv<W: Write>(&self, w: W) -> Result<()> {
        self.geometry.write_csv(w)
    }

    /// Show the record under the pointer, or hide the tooltip when there is none.
    /// Pointer `x`/`y` are canvas coordinates.
    pub fn hover<'s>(&self, state: &'s mut TooltipState, event: PointerEvent) -> Option<&'s Tooltip> {
        let (px, py) = self.viewport().to_plot(event.x, event.y);
        let hit = self.geometry.hit_test(px, py).and_then(|i| self.geometry.record(i));
        match hit {
            Some(record) => {
                debug!(x = px, y = py, "hover hit");
                Some(state.show(&event, record))
            }
            None => {
                state.hide();
                None
            }
        }
    }
}
