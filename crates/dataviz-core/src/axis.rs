// File: crates/dataviz-core/src/axis.rs
// Summary: Axis model (ticks, labels, orientation) and tick label formatters.

use crate::scene::{Attrs, Node, TextAnchor};
use crate::theme::Theme;

pub const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

const TICK_LABEL_SIZE: f64 = 10.0;
const TICK_PADDING: f64 = 3.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Bottom,
    Left,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    /// Offset along the axis in pixels.
    pub pos: f64,
    pub label: String,
}

#[derive(Clone, Debug)]
pub struct Axis {
    pub id: &'static str,
    pub orientation: Orientation,
    pub length: f64,
    pub ticks: Vec<Tick>,
    /// Tick line length; negative values draw gridlines across the plot.
    pub tick_size: f64,
}

impl Axis {
    pub fn bottom(length: f64, ticks: Vec<Tick>) -> Self {
        Self { id: "x-axis", orientation: Orientation::Bottom, length, ticks, tick_size: 6.0 }
    }

    pub fn left(length: f64, ticks: Vec<Tick>) -> Self {
        Self { id: "y-axis", orientation: Orientation::Left, length, ticks, tick_size: 6.0 }
    }

    pub fn with_tick_size(mut self, size: f64) -> Self {
        self.tick_size = size;
        self
    }

    /// Axis group translated to `origin`, in the `d3-axis` layout (domain line, tick groups).
    pub fn to_node(&self, origin: (f64, f64), theme: &Theme) -> Node {
        let mut children = Vec::with_capacity(self.ticks.len() + 1);
        let inner = self.tick_size;
        let label_offset = inner.max(0.0) + TICK_PADDING;
        match self.orientation {
            Orientation::Bottom => {
                children.push(Node::line(0.0, 0.0, self.length, 0.0, theme.axis_line, 1.0));
                for t in &self.ticks {
                    let stroke = if inner < 0.0 { theme.grid } else { theme.axis_line };
                    children.push(Node::group(
                        Attrs::class("tick"),
                        (t.pos, 0.0),
                        vec![
                            Node::line(0.0, 0.0, 0.0, inner, stroke, 1.0),
                            Node::text(
                                Attrs::default(),
                                0.0,
                                label_offset + TICK_LABEL_SIZE,
                                t.label.clone(),
                                TICK_LABEL_SIZE,
                                TextAnchor::Middle,
                                theme.axis_label,
                            ),
                        ],
                    ));
                }
            }
            Orientation::Left => {
                children.push(Node::line(0.0, 0.0, 0.0, self.length, theme.axis_line, 1.0));
                for t in &self.ticks {
                    let stroke = if inner < 0.0 { theme.grid } else { theme.axis_line };
                    children.push(Node::group(
                        Attrs::class("tick"),
                        (0.0, t.pos),
                        vec![
                            Node::line(0.0, 0.0, -inner, 0.0, stroke, 1.0),
                            Node::text(
                                Attrs::default(),
                                -label_offset,
                                TICK_LABEL_SIZE * 0.32,
                                t.label.clone(),
                                TICK_LABEL_SIZE,
                                TextAnchor::End,
                                theme.axis_label,
                            ),
                        ],
                    ));
                }
            }
        }
        Node::group(Attrs::id(self.id), origin, children)
    }
}

/// Integer with no grouping, as used for years.
pub fn format_year(v: f64) -> String {
    format!("{}", v.round() as i64)
}

/// Integer with comma thousands separators.
pub fn format_thousands(v: f64) -> String {
    let n = v.round() as i64;
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if n < 0 { format!("-{out}") } else { out }
}

/// Seconds as `m:ss`.
pub fn format_mm_ss(seconds: f64) -> String {
    let total = seconds.round() as i64;
    format!("{}:{:02}", total.div_euclid(60), total.rem_euclid(60))
}

/// Full English month name for 1-based `month`.
pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTHS.get(i as usize))
        .copied()
        .unwrap_or("")
}
