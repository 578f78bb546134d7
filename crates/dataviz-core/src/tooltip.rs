// File: crates/dataviz-core/src/tooltip.rs
// Summary: Hover tooltip formatting and the explicit show/hide tooltip state.

use crate::svg::escape;

/// Offset from the pointer to the tooltip anchor (tooltip sits above the pointer).
pub const TOOLTIP_OFFSET: (f64, f64) = (0.0, -20.0);

/// Pointer position: `x`/`y` in canvas pixels, `page_x`/`page_y` in page pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub x: f64,
    pub y: f64,
    pub page_x: f64,
    pub page_y: f64,
}

impl PointerEvent {
    /// Event on a canvas placed at the page origin.
    pub fn at(x: f64, y: f64) -> Self {
        Self { x, y, page_x: x, page_y: y }
    }
}

/// Presentational projection of one record.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TooltipBody {
    pub heading: String,
    pub lines: Vec<String>,
    /// Machine-readable attributes mirrored onto the tooltip element (`data-date`, ...).
    pub attributes: Vec<(&'static str, String)>,
}

impl TooltipBody {
    pub fn new(heading: impl Into<String>) -> Self {
        Self { heading: heading.into(), ..Self::default() }
    }

    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    pub fn attr(mut self, name: &'static str, value: impl ToString) -> Self {
        self.attributes.push((name, value.to_string()));
        self
    }

    pub fn plain_text(&self) -> String {
        let mut out = self.heading.clone();
        for l in &self.lines {
            out.push('\n');
            out.push_str(l);
        }
        out
    }

    pub fn html(&self) -> String {
        let mut out = format!("<p><strong>{}</strong></p>", escape(&self.heading));
        for l in &self.lines {
            out.push_str(&format!("<p>{}</p>", escape(l)));
        }
        out
    }
}

/// Records that can be described in a tooltip.
pub trait Describe {
    fn describe(&self) -> TooltipBody;
}

/// An anchored, visible tooltip.
#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
    pub body: TooltipBody,
    pub left: f64,
    pub top: f64,
}

/// The single active tooltip of a view. Owned by whoever drives pointer events.
#[derive(Clone, Debug, Default)]
pub struct TooltipState {
    active: Option<Tooltip>,
}

impl TooltipState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, event: &PointerEvent, record: &dyn Describe) -> &Tooltip {
        self.active.insert(Tooltip {
            body: record.describe(),
            left: event.page_x + TOOLTIP_OFFSET.0,
            top: event.page_y + TOOLTIP_OFFSET.1,
        })
    }

    pub fn hide(&mut self) {
        self.active = None;
    }

    pub fn current(&self) -> Option<&Tooltip> {
        self.active.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }
}
