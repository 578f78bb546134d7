// File: crates/dataviz-core/src/types.rs
// Summary: Shared types and constants (viewport size, padding, plot origin).

/// Default plot width in pixels.
pub const WIDTH: f64 = 1000.0;
/// Default plot height in pixels.
pub const HEIGHT: f64 = 500.0;
/// Default padding around the plot, in pixels.
pub const PADDING: f64 = 60.0;
/// Inset between the axes and the padded edge of the canvas.
pub const AXIS_INSET: f64 = 10.0;
/// Band above the plot reserved for the title and description.
pub const HEADER: f64 = 56.0;

/// Plot area plus the padding reserved for axes.
/// Contract: width and height are positive; padding is at least `AXIS_INSET`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64, padding: f64) -> Self {
        Self { width, height, padding }
    }

    /// Top-left corner of the plot area inside the canvas.
    pub fn plot_origin(&self) -> (f64, f64) {
        (self.padding - AXIS_INSET, HEADER + AXIS_INSET)
    }

    /// Canvas size including padding and header, before any legend band.
    pub fn canvas(&self) -> (f64, f64) {
        (self.width + self.padding, self.height + self.padding + HEADER)
    }

    /// Map a canvas coordinate into plot coordinates.
    pub fn to_plot(&self, x: f64, y: f64) -> (f64, f64) {
        let (ox, oy) = self.plot_origin();
        (x - ox, y - oy)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(WIDTH, HEIGHT, PADDING)
    }
}
