// File: crates/dataviz-core/src/config.rs
// Summary: Per-chart configuration (data URLs and viewport) with file/flag overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::charts::ChartKind;
use crate::error::{ChartError, Result};
use crate::types::{Viewport, AXIS_INSET, HEIGHT, PADDING, WIDTH};

const FCC_REFERENCE: &str = "https://raw.githubusercontent.com/freeCodeCamp/ProjectReferenceData/master";
const FCC_CDN: &str = "https://cdn.freecodecamp.org/testable-projects-fcc/data";

/// Resolved configuration for one chart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ChartConfig {
    pub data_url: String,
    /// Second document, only read by the choropleth (county shapes).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topology_url: Option<String>,
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

/// Partial configuration as read from a JSON file or CLI flags.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigOverrides {
    pub data_url: Option<String>,
    pub topology_url: Option<String>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub padding: Option<f64>,
}

impl ChartConfig {
    pub fn for_kind(kind: ChartKind) -> Self {
        let (data_url, topology_url) = match kind {
            ChartKind::Bar => (format!("{FCC_REFERENCE}/GDP-data.json"), None),
            ChartKind::Scatter => (format!("{FCC_REFERENCE}/cyclist-data.json"), None),
            ChartKind::HeatMap => (format!("{FCC_REFERENCE}/global-temperature.json"), None),
            ChartKind::Choropleth => (
                format!("{FCC_CDN}/choropleth_map/for_user_education.json"),
                Some(format!("{FCC_CDN}/choropleth_map/counties.json")),
            ),
            ChartKind::Treemap => (format!("{FCC_CDN}/tree_map/video-game-sales-data.json"), None),
        };
        Self { data_url, topology_url, width: WIDTH, height: HEIGHT, padding: PADDING }
    }

    pub fn with_overrides(mut self, o: &ConfigOverrides) -> Self {
        if let Some(u) = &o.data_url { self.data_url = u.clone(); }
        if let Some(u) = &o.topology_url { self.topology_url = Some(u.clone()); }
        if let Some(w) = o.width { self.width = w; }
        if let Some(h) = o.height { self.height = h; }
        if let Some(p) = o.padding { self.padding = p; }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(ChartError::Config(format!("width must be positive, got {}", self.width)));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(ChartError::Config(format!("height must be positive, got {}", self.height)));
        }
        if !(self.padding.is_finite() && self.padding >= AXIS_INSET) {
            return Err(ChartError::Config(format!("padding must be at least {AXIS_INSET}, got {}", self.padding)));
        }
        if self.data_url.trim().is_empty() {
            return Err(ChartError::Config("dataUrl is empty".into()));
        }
        Ok(())
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height, self.padding)
    }
}

impl ConfigOverrides {
    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| ChartError::Config(e.to_string()))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    /// Field-wise merge; values in `other` win.
    pub fn merged(mut self, other: ConfigOverrides) -> Self {
        if other.data_url.is_some() { self.data_url = other.data_url; }
        if other.topology_url.is_some() { self.topology_url = other.topology_url; }
        if other.width.is_some() { self.width = other.width; }
        if other.height.is_some() { self.height = other.height; }
        if other.padding.is_some() { self.padding = other.padding; }
        self
    }
}
