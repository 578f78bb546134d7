// File: crates/dataviz-core/src/charts/bar.rs
// Summary: GDP bar chart; time-scaled x, linear y from zero, one bar per quarter.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::axis::{format_thousands, format_year, Axis, Tick};
use crate::charts::{frame, in_rect};
use crate::error::{ChartError, Result};
use crate::extent::max_of;
use crate::scale::{ContinuousScale, LinearScale, TimeScale};
use crate::scene::{Attrs, Node, Rect, Scene};
use crate::theme::Theme;
use crate::tooltip::{Describe, TooltipBody};
use crate::types::Viewport;

/// `{ name, data: [[date, gdp], ...] }`
#[derive(Clone, Debug, Deserialize)]
pub struct GdpDataset {
    pub name: String,
    pub data: Vec<(String, f64)>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Bar {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub date: String,
    pub gdp: f64,
}

#[derive(Clone, Debug)]
pub struct BarChart {
    pub title: String,
    pub bars: Vec<Bar>,
    pub x_scale: TimeScale,
    pub y_scale: LinearScale,
}

/// `YYYY-MM-DD` at UTC midnight.
pub fn parse_date(s: &str) -> Result<DateTime<Utc>> {
    let d = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|e| ChartError::parse(format!("date `{s}`"), e))?;
    d.and_hms_opt(0, 0, 0)
        .map(|t| t.and_utc())
        .ok_or_else(|| ChartError::parse(format!("date `{s}`"), "out of range"))
}

pub fn transform(ds: &GdpDataset, vp: &Viewport) -> Result<BarChart> {
    let dates = ds.data.iter().map(|(d, _)| parse_date(d)).collect::<Result<Vec<_>>>()?;

    let (Some(t_min), Some(t_max)) = (dates.iter().min(), dates.iter().max()) else {
        return Err(ChartError::Precondition("GDP dataset has no data points".into()));
    };
    let x_scale = TimeScale::new((*t_min, *t_max), (0.0, vp.width));

    let y_max = max_of(&ds.data, "gdp", |(_, gdp)| *gdp)?;
    let y_scale = LinearScale::new((0.0, y_max), (0.0, vp.height));
    debug!(bars = ds.data.len(), y_max, "bar chart extents");

    let width = (vp.width / ds.data.len() as f64).ceil();
    let bars = ds
        .data
        .iter()
        .zip(&dates)
        .map(|((date, gdp), t)| {
            let h = y_scale.apply(*gdp);
            Bar { x: x_scale.apply_time(*t), y: vp.height - h, width, height: h, date: date.clone(), gdp: *gdp }
        })
        .collect();

    Ok(BarChart { title: ds.name.clone(), bars, x_scale, y_scale })
}

impl BarChart {
    pub fn scene(&self, vp: &Viewport, theme: &Theme) -> Scene {
        let mut scene = frame(vp, theme, &self.title, None, 0.0);
        let (ox, oy) = vp.plot_origin();

        let y_ticks = self
            .y_scale
            .ticks(10)
            .into_iter()
            .map(|v| Tick { pos: vp.height - self.y_scale.apply(v), label: format_thousands(v) })
            .collect();
        let x_ticks = self
            .x_scale
            .year_ticks(10)
            .into_iter()
            .map(|t| Tick { pos: self.x_scale.apply_time(t), label: format_year(f64::from(t.year())) })
            .collect();

        scene.push(Axis::bottom(vp.width, x_ticks).with_tick_size(-vp.height).to_node((ox, oy + vp.height), theme));
        scene.push(Axis::left(vp.height, y_ticks).with_tick_size(-vp.width).to_node((ox, oy), theme));

        let bars = self
            .bars
            .iter()
            .map(|b| {
                Node::Rect(Rect {
                    attrs: Attrs::class("bar")
                        .data("data-date", &b.date)
                        .data("data-gdp", b.gdp)
                        .title(b.describe().plain_text()),
                    x: b.x,
                    y: b.y,
                    width: b.width,
                    height: b.height,
                    fill: theme.bar,
                    stroke: None,
                })
            })
            .collect();
        scene.push(Node::group(Attrs::id("bars"), (ox, oy), bars));
        scene
    }

    pub fn hit_test(&self, x: f64, y: f64) -> Option<usize> {
        // Later bars are drawn on top of the rounded-up overlap.
        self.bars.iter().rposition(|b| in_rect(x, y, b.x, b.y, b.width, b.height))
    }
}

impl Describe for Bar {
    fn describe(&self) -> TooltipBody {
        TooltipBody::new(&self.date).line(format!("${} Billion", self.gdp)).attr("data-date", &self.date)
    }
}
