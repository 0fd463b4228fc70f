// File: crates/pivotal-core/src/theme.rs
// Summary: Light/Dark theming for chart colors and the series palette.

use crate::types::Rgba;

const fn rgb(r: u8, g: u8, b: u8) -> Rgba { Rgba::from_argb(255, r, g, b) }

const TABLEAU: [Rgba; 10] = [
    rgb(0x1f, 0x77, 0xb4),
    rgb(0xff, 0x7f, 0x0e),
    rgb(0x2c, 0xa0, 0x2c),
    rgb(0xd6, 0x27, 0x28),
    rgb(0x94, 0x67, 0xbd),
    rgb(0x8c, 0x56, 0x4b),
    rgb(0xe3, 0x77, 0xc2),
    rgb(0x7f, 0x7f, 0x7f),
    rgb(0xbc, 0xbd, 0x22),
    rgb(0x17, 0xbe, 0xcf),
];

const BRIGHT: [Rgba; 8] = [
    rgb(64, 160, 255),
    rgb(255, 170, 60),
    rgb(40, 200, 120),
    rgb(230, 90, 90),
    rgb(180, 130, 255),
    rgb(240, 220, 80),
    rgb(80, 220, 230),
    rgb(255, 120, 200),
];

// Solarized accents
const SOLARIZED: [Rgba; 8] = [
    rgb(0x26, 0x8b, 0xd2), // blue
    rgb(0xcb, 0x4b, 0x16), // orange
    rgb(0x85, 0x99, 0x00), // green
    rgb(0xdc, 0x32, 0x2f), // red
    rgb(0x6c, 0x71, 0xc4), // violet
    rgb(0xb5, 0x89, 0x00), // yellow
    rgb(0x2a, 0xa1, 0x98), // cyan
    rgb(0xd3, 0x36, 0x82), // magenta
];

const HIGH_CONTRAST: [Rgba; 6] = [
    rgb(0x00, 0xff, 0xff),
    rgb(0xff, 0xff, 0x00),
    rgb(0x00, 0xff, 0x00),
    rgb(0xff, 0x00, 0xff),
    rgb(0xff, 0x80, 0x00),
    rgb(0xff, 0xff, 0xff),
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Rgba,
    pub grid: Rgba,
    pub axis_line: Rgba,
    pub axis_label: Rgba,
    pub tick: Rgba,
    pub title: Rgba,
    pub legend_bg: Rgba,
    pub palette: &'static [Rgba],
    /// Alpha applied to area fills.
    pub area_alpha: u8,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: rgb(18, 18, 20),
            grid: rgb(40, 40, 45),
            axis_line: rgb(180, 180, 190),
            axis_label: rgb(235, 235, 245),
            tick: rgb(150, 150, 160),
            title: rgb(245, 245, 250),
            legend_bg: Rgba::from_argb(200, 28, 28, 32),
            palette: &BRIGHT,
            area_alpha: 96,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background: rgb(250, 250, 252),
            grid: rgb(230, 230, 235),
            axis_line: rgb(60, 60, 70),
            axis_label: rgb(20, 20, 30),
            tick: rgb(100, 100, 110),
            title: rgb(10, 10, 20),
            legend_bg: Rgba::from_argb(220, 255, 255, 255),
            palette: &TABLEAU,
            area_alpha: 80,
        }
    }

    pub fn solarized_dark() -> Self {
        // Base colors from Solarized dark palette
        Self {
            name: "solarized-dark",
            background: rgb(0x00, 0x2b, 0x36), // base03
            grid: rgb(0x07, 0x36, 0x42),       // base02
            axis_line: rgb(0x93, 0xa1, 0xa1),  // base1
            axis_label: rgb(0xee, 0xe8, 0xd5), // base2
            tick: rgb(0x83, 0x94, 0x96),       // base0
            title: rgb(0xfd, 0xf6, 0xe3),      // base3
            legend_bg: Rgba::from_argb(200, 0x07, 0x36, 0x42),
            palette: &SOLARIZED,
            area_alpha: 96,
        }
    }

    pub fn solarized_light() -> Self {
        Self {
            name: "solarized-light",
            background: rgb(0xfd, 0xf6, 0xe3), // base3
            grid: rgb(0xee, 0xe8, 0xd5),       // base2
            axis_line: rgb(0x65, 0x7b, 0x83),  // base00
            axis_label: rgb(0x00, 0x2b, 0x36), // base03
            tick: rgb(0x58, 0x6e, 0x75),       // base01
            title: rgb(0x07, 0x36, 0x42),      // base02
            legend_bg: Rgba::from_argb(220, 0xee, 0xe8, 0xd5),
            palette: &SOLARIZED,
            area_alpha: 80,
        }
    }

    pub fn high_contrast_dark() -> Self {
        Self {
            name: "high-contrast-dark",
            background: rgb(0x00, 0x00, 0x00),
            grid: rgb(0x22, 0x22, 0x22),
            axis_line: rgb(0xff, 0xff, 0xff),
            axis_label: rgb(0xff, 0xff, 0xff),
            tick: rgb(0xcc, 0xcc, 0xcc),
            title: rgb(0xff, 0xff, 0xff),
            legend_bg: rgb(0x11, 0x11, 0x11),
            palette: &HIGH_CONTRAST,
            area_alpha: 120,
        }
    }

    /// Palette color for series `i`, cycling.
    pub fn series_color(&self, i: usize) -> Rgba {
        if self.palette.is_empty() {
            return self.axis_line;
        }
        self.palette[i % self.palette.len()]
    }

    /// Find a theme by its `name`, falling back to light.
    pub fn find(name: &str) -> Theme { find(name) }
}

impl Default for Theme {
    fn default() -> Self { Theme::light() }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![
        Theme::dark(),
        Theme::light(),
        Theme::solarized_dark(),
        Theme::solarized_light(),
        Theme::high_contrast_dark(),
    ]
}

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    for t in presets() { if t.name.eq_ignore_ascii_case(name) { return t; } }
    Theme::light()
}
