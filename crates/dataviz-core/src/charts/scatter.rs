// File: crates/dataviz-core/src/charts/scatter.rs
// Summary: Cyclist scatterplot; year on x, race time on y, colored by doping allegation.

use chrono::{DateTime, SecondsFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::axis::{format_mm_ss, format_year, Axis, Tick};
use crate::charts::frame;
use crate::color::Rgb;
use crate::error::{ChartError, Result};
use crate::extent::require_extent;
use crate::scale::{ContinuousScale, LinearScale};
use crate::scene::{Attrs, Circle, Node, Rect, Scene, TextAnchor};
use crate::theme::Theme;
use crate::tooltip::{Describe, TooltipBody};
use crate::types::Viewport;

pub const DOT_RADIUS: f64 = 5.0;
pub const CLEAN: Rgb = Rgb::new(50, 200, 50);
pub const DOPING: Rgb = Rgb::new(50, 50, 200);

/// Years of headroom before the first and after the last race.
const YEAR_PAD: (f64, f64) = (1.0, 2.0);
const SECONDS_PAD: f64 = 10.0;

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CyclistRecord {
    pub time: String,
    pub place: u32,
    pub seconds: f64,
    pub name: String,
    pub year: i32,
    pub nationality: String,
    #[serde(default)]
    pub doping: String,
    #[serde(default, rename = "URL")]
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Dot {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub fill: Rgb,
    pub year: i32,
    pub seconds: f64,
    /// Race time as an ISO-8601 instant after the epoch, as published in `data-yvalue`.
    pub time: String,
    pub name: String,
    pub nationality: String,
    pub place: u32,
    pub race_time: String,
    pub doping: String,
}

#[derive(Clone, Debug)]
pub struct ScatterPlot {
    pub title: String,
    pub dots: Vec<Dot>,
    pub x_scale: LinearScale,
    pub y_scale: LinearScale,
}

/// `seconds` after the Unix epoch, formatted like `Date.prototype.toISOString`.
pub fn seconds_to_iso(seconds: f64) -> Result<String> {
    let ms = seconds * 1000.0;
    // Past i64 range the cast saturates, so check before converting.
    if !ms.is_finite() || ms.abs() >= i64::MAX as f64 {
        return Err(ChartError::parse("Seconds", format!("{seconds} is not a representable instant")));
    }
    DateTime::from_timestamp_millis(ms.round() as i64)
        .map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true))
        .ok_or_else(|| ChartError::parse("Seconds", format!("{seconds} is out of range for a date")))
}

pub fn fill_for(doping: &str) -> Rgb {
    if doping.is_empty() { CLEAN } else { DOPING }
}

pub fn transform(records: &[CyclistRecord], vp: &Viewport) -> Result<ScatterPlot> {
    let (y0, y1) = require_extent(records, "Year", |r| r.year as f64)?;
    let (s0, s1) = require_extent(records, "Seconds", |r| r.seconds)?;
    debug!(dots = records.len(), y0, y1, s0, s1, "scatter extents");

    let x_scale = LinearScale::new((y0 - YEAR_PAD.0, y1 + YEAR_PAD.1), (0.0, vp.width));
    let y_scale = LinearScale::new((s0 - SECONDS_PAD, s1 + SECONDS_PAD), (0.0, vp.height));

    let dots = records
        .iter()
        .map(|r| {
            Ok(Dot {
                cx: x_scale.apply(r.year as f64),
                cy: y_scale.apply(r.seconds),
                r: DOT_RADIUS,
                fill: fill_for(&r.doping),
                year: r.year,
                seconds: r.seconds,
                time: seconds_to_iso(r.seconds)?,
                name: r.name.clone(),
                nationality: r.nationality.clone(),
                place: r.place,
                race_time: r.time.clone(),
                doping: r.doping.clone(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ScatterPlot { title: "Doping in Professional Bicycle Racing".into(), dots, x_scale, y_scale })
}

impl ScatterPlot {
    pub fn scene(&self, vp: &Viewport, theme: &Theme) -> Scene {
        let mut scene = frame(vp, theme, &self.title, Some("35 Fastest times up Alpe d'Huez"), 0.0);
        let (ox, oy) = vp.plot_origin();

        let x_ticks = self
            .x_scale
            .ticks(12)
            .into_iter()
            .map(|v| Tick { pos: self.x_scale.apply(v), label: format_year(v) })
            .collect();
        let y_ticks = self
            .y_scale
            .ticks(10)
            .into_iter()
            .map(|v| Tick { pos: self.y_scale.apply(v), label: format_mm_ss(v) })
            .collect();
        scene.push(Axis::left(vp.height, y_ticks).to_node((ox, oy), theme));
        scene.push(Axis::bottom(vp.width, x_ticks).to_node((ox, oy + vp.height), theme));

        let dots = self
            .dots
            .iter()
            .map(|d| {
                Node::Circle(Circle {
                    attrs: Attrs::class("dot")
                        .data("data-xvalue", d.year)
                        .data("data-yvalue", &d.time)
                        .title(d.describe().plain_text()),
                    cx: d.cx,
                    cy: d.cy,
                    r: d.r,
                    fill: d.fill,
                    stroke: None,
                })
            })
            .collect();
        scene.push(Node::group(Attrs::id("dots"), (ox, oy), dots));

        let items = [(CLEAN, "No doping allegations"), (DOPING, "Riders with doping allegations")]
            .into_iter()
            .enumerate()
            .map(|(i, (color, label))| {
                let y = 100.0 + 25.0 * i as f64;
                Node::group(
                    Attrs::class("legend-item"),
                    (0.0, 0.0),
                    vec![
                        Node::Rect(Rect {
                            attrs: Attrs::default(),
                            x: vp.width,
                            y,
                            width: 15.0,
                            height: 15.0,
                            fill: color,
                            stroke: Some(theme.outline),
                        }),
                        Node::text(Attrs::class("legend"), vp.width - 5.0, y + 12.0, label, 12.0, TextAnchor::End, theme.axis_label),
                    ],
                )
            })
            .collect();
        scene.push(Node::group(Attrs::id("legend"), (0.0, oy), items));
        scene
    }

    /// Nearest dot whose disc contains the point.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<usize> {
        self.dots
            .iter()
            .enumerate()
            .map(|(i, d)| (i, (d.cx - x).hypot(d.cy - y)))
            .filter(|(_, dist)| *dist <= DOT_RADIUS)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }
}

impl Describe for Dot {
    fn describe(&self) -> TooltipBody {
        let (m, s) = self.race_time.split_once(':').unwrap_or((self.race_time.as_str(), "0"));
        let mut body = TooltipBody::new(format!("{} ({})", self.name, self.nationality))
            .line(format!("Year: {}", self.year))
            .line(format!("Place: {} ({m}m {s}s)", self.place));
        if !self.doping.is_empty() {
            body = body.line(format!("Case: {}", self.doping));
        }
        body.attr("data-year", self.year)
    }
}
