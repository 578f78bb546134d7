// File: crates/dataviz-core/src/charts/heatmap.rs
// Summary: Monthly global temperature heat map; years across, months down, diverging blue-white-red fill.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::axis::{format_year, month_name, Axis, Tick};
use crate::charts::{frame, in_rect};
use crate::color::{Rgb, RgbBasis};
use crate::error::{ChartError, Result};
use crate::extent::require_extent;
use crate::scale::{BandScale, ContinuousScale, DivergingScale, LinearScale};
use crate::scene::{Attrs, Node, Rect, Scene, TextAnchor};
use crate::theme::Theme;
use crate::tooltip::{Describe, TooltipBody};
use crate::types::Viewport;

pub const RAMP: [&str; 3] = ["blue", "white", "red"];
const LEGEND_BAND: f64 = 70.0;
const LEGEND_STEPS: usize = 9;

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemperatureDataset {
    pub base_temperature: f64,
    pub monthly_variance: Vec<MonthlyVariance>,
}

#[derive(Clone, Copy, Debug, Deserialize)]
pub struct MonthlyVariance {
    pub year: i32,
    pub month: u32,
    pub variance: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Cell {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Rgb,
    pub year: i32,
    pub month: u32,
    pub variance: f64,
    /// Absolute temperature: base plus variance. Tooltip and legend only.
    pub temperature: f64,
}

#[derive(Clone, Debug)]
pub struct HeatMap {
    pub base_temperature: f64,
    pub cells: Vec<Cell>,
    pub x_scale: LinearScale,
    pub y_scale: BandScale<u32>,
    pub color: DivergingScale,
}

impl TemperatureDataset {
    /// Months outside 1..=12 do not fit the band scale.
    pub fn validate(&self) -> Result<()> {
        match self.monthly_variance.iter().find(|m| !(1..=12).contains(&m.month)) {
            Some(bad) => Err(ChartError::parse("monthlyVariance", format!("month {} in year {} is not 1-12", bad.month, bad.year))),
            None => Ok(()),
        }
    }
}

pub fn transform(ds: &TemperatureDataset, vp: &Viewport) -> Result<HeatMap> {
    ds.validate()?;
    let records = &ds.monthly_variance;
    let (y0, y1) = require_extent(records, "year", |r| r.year as f64)?;
    let (v0, v1) = require_extent(records, "variance", |r| r.variance)?;
    debug!(cells = records.len(), y0, y1, v0, v1, "heat map extents");

    // One extra year on the right so the last column ends at the viewport edge.
    let x_scale = LinearScale::new((y0, y1 + 1.0), (0.0, vp.width));
    let y_scale = BandScale::new((1..=12).collect(), (0.0, vp.height));
    let color = DivergingScale::new([v0, 0.0, v1], RgbBasis::from_css(&RAMP)?);

    let width = vp.width / (y1 - y0 + 1.0);
    let height = vp.height / 12.0;
    let cells = records
        .iter()
        .map(|r| Cell {
            x: x_scale.apply(r.year as f64),
            y: y_scale.apply(&r.month).unwrap_or_default(),
            width,
            height,
            fill: color.apply(r.variance),
            year: r.year,
            month: r.month,
            variance: r.variance,
            temperature: ds.base_temperature + r.variance,
        })
        .collect();

    Ok(HeatMap { base_temperature: ds.base_temperature, cells, x_scale, y_scale, color })
}

impl HeatMap {
    pub fn year_span(&self) -> (i32, i32) {
        let (lo, hi) = self.x_scale.domain();
        (lo as i32, hi as i32 - 1)
    }

    pub fn scene(&self, vp: &Viewport, theme: &Theme) -> Scene {
        let (first, last) = self.year_span();
        let description = format!("{first} - {last}: base temperature {}℃", self.base_temperature);
        let mut scene = frame(vp, theme, "Monthly Global Land-Surface Temperature", Some(&description), LEGEND_BAND);
        let (ox, oy) = vp.plot_origin();

        let band = self.y_scale.bandwidth();
        let y_ticks = self
            .y_scale
            .domain()
            .iter()
            .filter_map(|m| self.y_scale.apply(m).map(|p| Tick { pos: p + band / 2.0, label: month_name(*m).to_string() }))
            .collect();
        let x_ticks = self
            .x_scale
            .ticks(20)
            .into_iter()
            .filter(|v| v.fract() == 0.0)
            .map(|v| Tick { pos: self.x_scale.apply(v), label: format_year(v) })
            .collect();
        scene.push(Axis::left(vp.height, y_ticks).to_node((ox, oy), theme));
        scene.push(Axis::bottom(vp.width, x_ticks).to_node((ox, oy + vp.height), theme));

        let cells = self
            .cells
            .iter()
            .map(|c| {
                Node::Rect(Rect {
                    attrs: Attrs::class("cell")
                        .data("data-month", c.month)
                        .data("data-year", c.year)
                        .data("data-temp", c.variance)
                        .title(c.describe().plain_text()),
                    x: c.x,
                    y: c.y,
                    width: c.width,
                    height: c.height,
                    fill: c.fill,
                    stroke: None,
                })
            })
            .collect();
        scene.push(Node::group(Attrs::id("cells"), (ox, oy), cells));
        scene.push(self.legend_node(theme, (ox, oy + vp.height + 36.0)));
        scene
    }

    fn legend_node(&self, theme: &Theme, origin: (f64, f64)) -> Node {
        const SWATCH: f64 = 36.0;
        let (lo, hi) = (self.color.lo, self.color.hi);
        let step = (hi - lo) / (LEGEND_STEPS - 1) as f64;
        let items = (0..LEGEND_STEPS)
            .map(|i| {
                let v = lo + step * i as f64;
                let x = SWATCH * i as f64;
                Node::group(
                    Attrs::class("legend-item"),
                    (x, 0.0),
                    vec![
                        Node::Rect(Rect {
                            attrs: Attrs::default(),
                            x: 0.0,
                            y: 0.0,
                            width: SWATCH,
                            height: 14.0,
                            fill: self.color.apply(v),
                            stroke: Some(theme.outline),
                        }),
                        Node::text(
                            Attrs::default(),
                            SWATCH / 2.0,
                            28.0,
                            format!("{:.1}", self.base_temperature + v),
                            10.0,
                            TextAnchor::Middle,
                            theme.axis_label,
                        ),
                    ],
                )
            })
            .collect();
        Node::group(Attrs::id("legend"), origin, items)
    }

    pub fn hit_test(&self, x: f64, y: f64) -> Option<usize> {
        self.cells.iter().position(|c| in_rect(x, y, c.x, c.y, c.width, c.height))
    }
}

impl Describe for Cell {
    fn describe(&self) -> TooltipBody {
        TooltipBody::new(format!("{} - {}", self.year, month_name(self.month)))
            .line(format!("{:.1}℃", self.temperature))
            .line(format!("{:+.1}℃", self.variance))
            .attr("data-year", self.year)
    }
}
