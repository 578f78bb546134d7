// File: crates/dataviz-core/src/lib.rs
// Summary: Core library entry point; exports dataset loading, chart geometry, tooltips and the SVG sink.

pub mod axis;
pub mod chart;
pub mod charts;
pub mod color;
pub mod config;
pub mod dataset;
pub mod error;
pub mod extent;
pub mod hierarchy;
pub mod scale;
pub mod scene;
pub mod svg;
pub mod theme;
pub mod tooltip;
pub mod topojson;
pub mod types;

pub use chart::Chart;
pub use charts::{ChartGeometry, ChartKind};
pub use color::Rgb;
pub use config::{ChartConfig, ConfigOverrides};
pub use dataset::{DataSource, DefaultSource, FileSource};
pub use error::{ChartError, Result};
pub use scene::Scene;
pub use theme::Theme;
pub use tooltip::{Describe, PointerEvent, Tooltip, TooltipBody, TooltipState};
pub use types::Viewport;
