// File: crates/dataviz-core/src/charts/choropleth.rs
// Summary: US county choropleth; TopoJSON county shapes filled by educational attainment.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::charts::frame;
use crate::color::{scheme, Rgb, GREENS9};
use crate::error::{ChartError, Result};
use crate::extent::require_extent;
use crate::scale::ThresholdScale;
use crate::scene::{Attrs, Node, Path, Rect, Scene, TextAnchor};
use crate::theme::Theme;
use crate::tooltip::{Describe, TooltipBody};
use crate::topojson::{bounds, contains, Fit, Ring, Topology};
use crate::types::Viewport;

pub const COUNTIES: &str = "counties";
pub const STATES: &str = "states";
const LEGEND_BAND: f64 = 50.0;
const SWATCH: f64 = 32.0;

#[derive(Clone, Debug, Deserialize)]
pub struct EducationRecord {
    pub fips: u64,
    pub state: String,
    pub area_name: String,
    #[serde(rename = "bachelorsOrHigher")]
    pub bachelors_or_higher: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct County {
    pub fips: u64,
    pub state: String,
    pub area_name: String,
    pub education: f64,
    pub fill: Rgb,
    #[serde(skip)]
    pub rings: Vec<Ring>,
    #[serde(skip)]
    pub bbox: (f64, f64, f64, f64),
}

#[derive(Clone, Debug)]
pub struct Choropleth {
    pub title: String,
    pub counties: Vec<County>,
    /// State borders, when the topology carries them.
    pub borders: Vec<Vec<Ring>>,
    pub color: ThresholdScale<Rgb>,
    pub fit: Fit,
}

pub fn transform(education: &[EducationRecord], topology: &Topology, vp: &Viewport) -> Result<Choropleth> {
    let (lo, hi) = require_extent(education, "bachelorsOrHigher", |r| r.bachelors_or_higher)?;
    let color = ThresholdScale::uniform(lo, hi, scheme(GREENS9)?)
        .ok_or_else(|| ChartError::Precondition("threshold palette is empty".into()))?;

    let shapes = topology.shapes(COUNTIES)?;
    let b = bounds(shapes.iter().flat_map(|s| s.rings.iter()))
        .ok_or_else(|| ChartError::Precondition("topology has no county outlines".into()))?;
    let fit = Fit::new(b, vp.width, vp.height);
    debug!(counties = shapes.len(), lo, hi, k = fit.k, "choropleth extents");

    let by_fips: HashMap<u64, &EducationRecord> = education.iter().map(|r| (r.fips, r)).collect();
    let counties = shapes
        .iter()
        .map(|shape| {
            let fips = shape.id.ok_or_else(|| ChartError::parse("topology", "county geometry without a numeric id"))?;
            let record = by_fips
                .get(&fips)
                .ok_or_else(|| ChartError::parse("education", format!("no record for county {fips}")))?;
            let rings: Vec<Ring> = shape.rings.iter().map(|r| fit.apply_ring(r)).collect();
            let bbox = bounds(&rings).unwrap_or_default();
            Ok(County {
                fips,
                state: record.state.clone(),
                area_name: record.area_name.clone(),
                education: record.bachelors_or_higher,
                fill: *color.apply(record.bachelors_or_higher),
                rings,
                bbox,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let borders = if topology.objects.contains_key(STATES) {
        let states = topology.shapes(STATES)?;
        states.iter().map(|s| s.rings.iter().map(|r| fit.apply_ring(r)).collect()).collect()
    } else {
        warn!(object = STATES, "no state borders in topology");
        Vec::new()
    };

    Ok(Choropleth { title: "United States Educational Attainment".into(), counties, borders, color, fit })
}

impl Choropleth {
    pub fn scene(&self, vp: &Viewport, theme: &Theme) -> Scene {
        let mut scene = frame(
            vp,
            theme,
            &self.title,
            Some("Percentage of adults age 25 and older with a bachelor's degree or higher (2010-2014)"),
            LEGEND_BAND,
        );
        let (ox, oy) = vp.plot_origin();

        let mut shapes: Vec<Node> = self
            .counties
            .iter()
            .map(|c| {
                Node::Path(Path {
                    attrs: Attrs::class("county")
                        .data("data-fips", c.fips)
                        .data("data-education", c.education)
                        .title(c.describe().plain_text()),
                    rings: c.rings.clone(),
                    fill: Some(c.fill),
                    stroke: None,
                    stroke_width: 0.0,
                })
            })
            .collect();
        shapes.extend(self.borders.iter().map(|rings| {
            Node::Path(Path {
                attrs: Attrs::class("state"),
                rings: rings.clone(),
                fill: None,
                stroke: Some(theme.background),
                stroke_width: 1.0,
            })
        }));
        scene.push(Node::group(Attrs::id("counties"), (ox, oy), shapes));
        scene.push(self.legend_node(theme, (ox + vp.width - SWATCH * 9.0, oy + vp.height + 16.0)));
        scene
    }

    fn legend_node(&self, theme: &Theme, origin: (f64, f64)) -> Node {
        let thresholds = self.color.thresholds();
        let items = self
            .color
            .range()
            .iter()
            .enumerate()
            .map(|(i, fill)| {
                let mut children = vec![Node::Rect(Rect {
                    attrs: Attrs::default(),
                    x: 0.0,
                    y: 0.0,
                    width: SWATCH,
                    height: 10.0,
                    fill: *fill,
                    stroke: None,
                })];
                if let Some(t) = i.checked_sub(1).and_then(|j| thresholds.get(j)) {
                    children.push(Node::line(0.0, 0.0, 0.0, 14.0, theme.axis_line, 1.0));
                    children.push(Node::text(
                        Attrs::default(),
                        0.0,
                        26.0,
                        format!("{}%", t.round()),
                        10.0,
                        TextAnchor::Middle,
                        theme.axis_label,
                    ));
                }
                Node::group(Attrs::class("legend-item"), (SWATCH * i as f64, 0.0), children)
            })
            .collect();
        Node::group(Attrs::id("legend"), origin, items)
    }

    pub fn hit_test(&self, x: f64, y: f64) -> Option<usize> {
        self.counties.iter().position(|c| {
            let (x0, y0, x1, y1) = c.bbox;
            x >= x0 && x <= x1 && y >= y0 && y <= y1 && contains(&c.rings, (x, y))
        })
    }
}

impl Describe for County {
    fn describe(&self) -> TooltipBody {
        TooltipBody::new(format!("{}, {}: {}%", self.area_name, self.state, self.education))
            .attr("data-education", self.education)
    }
}
