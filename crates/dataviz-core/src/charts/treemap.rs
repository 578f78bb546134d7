// File: crates/dataviz-core/src/charts/treemap.rs
// Summary: Video game sales treemap; squarified tiles colored by platform category.

use serde::Serialize;
use tracing::debug;

use crate::charts::{frame, in_rect};
use crate::color::{scheme, Rgb, CATEGORY20};
use crate::error::{ChartError, Result};
use crate::hierarchy::{Hierarchy, TreeNode};
use crate::scale::OrdinalScale;
use crate::scene::{Attrs, Node, Rect, Scene, TextAnchor};
use crate::theme::Theme;
use crate::tooltip::{Describe, TooltipBody};
use crate::types::Viewport;

pub const PADDING_INNER: f64 = 1.0;
const LEGEND_COLUMNS: usize = 6;
const LEGEND_ROW: f64 = 22.0;
const LABEL_SIZE: f64 = 9.0;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Tile {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Rgb,
    pub name: String,
    pub category: String,
    pub value: f64,
}

#[derive(Clone, Debug)]
pub struct Treemap {
    pub title: String,
    pub description: String,
    pub tiles: Vec<Tile>,
    pub color: OrdinalScale,
}

pub fn transform(root: &TreeNode, vp: &Viewport) -> Result<Treemap> {
    let mut h = Hierarchy::build(root)?;
    if h.root().is_leaf() {
        return Err(ChartError::Precondition("treemap root has no children".into()));
    }
    h.treemap(vp.width, vp.height, PADDING_INNER);

    let mut color = OrdinalScale::new(scheme(CATEGORY20)?);
    let leaves = h.leaves();
    let mut tiles = Vec::with_capacity(leaves.len());
    for i in leaves {
        let Some(n) = h.get(i) else { continue };
        // Leaves without a category inherit their parent's name.
        let category = match &n.category {
            Some(c) => c.clone(),
            None => n.parent.and_then(|p| h.get(p)).map(|p| p.name.clone()).unwrap_or_default(),
        };
        color.insert(&category);
        tiles.push(Tile {
            x: n.x0,
            y: n.y0,
            width: n.x1 - n.x0,
            height: n.y1 - n.y0,
            fill: color.get(&category).unwrap_or(Rgb::new(0, 0, 0)),
            name: n.name.clone(),
            category,
            value: n.value,
        });
    }
    debug!(tiles = tiles.len(), categories = color.categories().len(), total = h.root().value, "treemap layout");

    Ok(Treemap { title: "Video Game Sales".into(), description: h.root().name.clone(), tiles, color })
}

impl Treemap {
    fn legend_height(&self) -> f64 {
        let rows = self.color.categories().len().div_ceil(LEGEND_COLUMNS);
        rows as f64 * LEGEND_ROW + 20.0
    }

    pub fn scene(&self, vp: &Viewport, theme: &Theme) -> Scene {
        let mut scene = frame(vp, theme, &self.title, Some(&self.description), self.legend_height());
        let (ox, oy) = vp.plot_origin();

        let tiles = self
            .tiles
            .iter()
            .map(|t| {
                let rect = Node::Rect(Rect {
                    attrs: Attrs::class("tile")
                        .data("data-name", &t.name)
                        .data("data-category", &t.category)
                        .data("data-value", t.value)
                        .title(t.describe().plain_text()),
                    x: 0.0,
                    y: 0.0,
                    width: t.width,
                    height: t.height,
                    fill: t.fill,
                    stroke: None,
                });
                let mut children = vec![rect];
                if t.width > 30.0 && t.height > LABEL_SIZE * 2.0 {
                    children.push(Node::text(
                        Attrs::default(),
                        3.0,
                        LABEL_SIZE + 3.0,
                        &t.name,
                        LABEL_SIZE,
                        TextAnchor::Start,
                        theme.title,
                    ));
                }
                Node::group(Attrs::default(), (t.x, t.y), children)
            })
            .collect();
        scene.push(Node::group(Attrs::id("tiles"), (ox, oy), tiles));

        let column = vp.width / LEGEND_COLUMNS as f64;
        let items = self
            .color
            .categories()
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let (col, row) = (i % LEGEND_COLUMNS, i / LEGEND_COLUMNS);
                Node::group(
                    Attrs::default(),
                    (column * col as f64, LEGEND_ROW * row as f64),
                    vec![
                        Node::Rect(Rect {
                            attrs: Attrs::class("legend-item"),
                            x: 0.0,
                            y: 0.0,
                            width: 15.0,
                            height: 15.0,
                            fill: self.color.get(c).unwrap_or(theme.bar),
                            stroke: None,
                        }),
                        Node::text(Attrs::default(), 20.0, 12.0, c.as_str(), 12.0, TextAnchor::Start, theme.axis_label),
                    ],
                )
            })
            .collect();
        scene.push(Node::group(Attrs::id("legend"), (ox, oy + vp.height + 20.0), items));
        scene
    }

    pub fn hit_test(&self, x: f64, y: f64) -> Option<usize> {
        self.tiles.iter().position(|t| in_rect(x, y, t.x, t.y, t.width, t.height))
    }
}

impl Describe for Tile {
    fn describe(&self) -> TooltipBody {
        TooltipBody::new(format!("Name: {}", self.name))
            .line(format!("Category: {}", self.category))
            .line(format!("Value: {}", self.value))
            .attr("data-value", self.value)
    }
}
