// File: crates/dataviz-core/src/theme.rs
// Summary: Light/Dark theming for chart chrome (background, axes, labels, outlines).

use crate::color::Rgb;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Rgb,
    pub axis_line: Rgb,
    pub axis_label: Rgb,
    pub grid: Rgb,
    pub title: Rgb,
    /// Outline of legend swatches and map shapes.
    pub outline: Rgb,
    /// Fallback fill for bars.
    pub bar: Rgb,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light",
            background: Rgb::new(255, 255, 255),
            axis_line: Rgb::new(60, 60, 70),
            axis_label: Rgb::new(20, 20, 30),
            grid: Rgb::new(230, 230, 235),
            title: Rgb::new(20, 20, 30),
            outline: Rgb::new(34, 34, 34),
            bar: Rgb::new(32, 120, 200),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Rgb::new(18, 18, 20),
            axis_line: Rgb::new(180, 180, 190),
            axis_label: Rgb::new(235, 235, 245),
            grid: Rgb::new(40, 40, 45),
            title: Rgb::new(235, 235, 245),
            outline: Rgb::new(200, 200, 210),
            bar: Rgb::new(64, 160, 255),
        }
    }

    pub fn solarized_light() -> Self {
        Self {
            name: "solarized-light",
            background: Rgb::new(0xfd, 0xf6, 0xe3), // base3
            axis_line: Rgb::new(0x65, 0x7b, 0x83),  // base00
            axis_label: Rgb::new(0x00, 0x2b, 0x36), // base03
            grid: Rgb::new(0xee, 0xe8, 0xd5),       // base2
            title: Rgb::new(0x00, 0x2b, 0x36),
            outline: Rgb::new(0x58, 0x6e, 0x75),    // base01
            bar: Rgb::new(0x26, 0x8b, 0xd2),        // blue
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::light()
    }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark(), Theme::solarized_light()]
}

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    presets()
        .into_iter()
        .find(|t| t.name.eq_ignore_ascii_case(name))
        .unwrap_or_else(Theme::light)
}
