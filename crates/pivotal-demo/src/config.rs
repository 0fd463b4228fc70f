// File: crates/pivotal-demo/src/config.rs
// Summary: `.pivotal.toml` chart description: data, chart, render and yoy sections with defaults.

use anyhow::{ensure, Context, Result};
use pivotal_core::types::{HEIGHT, WIDTH};
use pivotal_core::{
    AggFunc, BarLayout, BarOptions, DataProperties, Limit, LineOptions, SortSpec, YoyOptions,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::cli::{Args, ChartType};

pub const DEFAULT_PATH: &str = ".pivotal.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub chart: ChartConfig,

    #[serde(default)]
    pub render: RenderConfig,

    #[serde(default)]
    pub yoy: YoyConfig,
}

/// Pivot settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataConfig {
    /// Category column.
    #[serde(default)]
    pub x_axis: String,

    /// Value column.
    #[serde(default)]
    pub y_axis: String,

    /// Grouping column.
    #[serde(default)]
    pub legend: Option<String>,

    #[serde(default)]
    pub agg: AggFunc,

    /// "top:N" or "bottom:N".
    #[serde(default)]
    pub limit: Option<Limit>,

    #[serde(default)]
    pub sort_axis: Option<SortSpec>,

    #[serde(default)]
    pub sort_legend: Option<SortSpec>,
}

/// Chart layout settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartConfig {
    #[serde(default)]
    pub kind: ChartType,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub layout: BarLayout,

    /// Bar (or cluster) width as a fraction of the category slot.
    #[serde(default = "default_bar_width")]
    pub bar_width: f64,

    #[serde(default)]
    pub bar_space: f64,

    #[serde(default)]
    pub horizontal: bool,

    #[serde(default)]
    pub area: bool,

    #[serde(default)]
    pub running_total: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            kind: ChartType::Bar,
            title: None,
            layout: BarLayout::default(),
            bar_width: default_bar_width(),
            bar_space: 0.0,
            horizontal: false,
            area: false,
            running_total: false,
        }
    }
}

fn default_bar_width() -> f64 {
    0.8
}

/// Output settings.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_output")]
    pub output: PathBuf,

    #[serde(default = "default_width")]
    pub width: i32,

    #[serde(default = "default_height")]
    pub height: i32,

    #[serde(default = "default_theme")]
    pub theme: String,

    /// Draw text (ticks, axis titles, legend labels, title).
    #[serde(default = "default_true")]
    pub labels: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            width: default_width(),
            height: default_height(),
            theme: default_theme(),
            labels: true,
        }
    }
}

fn default_output() -> PathBuf {
    PathBuf::from("chart.png")
}

fn default_width() -> i32 {
    WIDTH
}

fn default_height() -> i32 {
    HEIGHT
}

fn default_theme() -> String {
    "light".to_string()
}

fn default_true() -> bool {
    true
}

/// Year-over-year settings; disabled unless `date_field` is set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct YoyConfig {
    #[serde(default)]
    pub date_field: Option<String>,

    #[serde(default)]
    pub years: Vec<i32>,

    #[serde(default)]
    pub match_periods: bool,
}

impl YoyConfig {
    pub fn options(&self) -> Option<YoyOptions> {
        let field = self.date_field.as_ref()?;
        Some(
            YoyOptions::new(field.clone())
                .with_years(self.years.iter().copied())
                .with_matched_periods(self.match_periods),
        )
    }
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(DEFAULT_PATH);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence; only explicitly given values override.
    pub fn merge_with_args(&mut self, args: &Args) {
        let data = &mut self.data;
        if let Some(ref x) = args.x_axis {
            data.x_axis = x.clone();
        }
        if let Some(ref y) = args.y_axis {
            data.y_axis = y.clone();
        }
        if args.legend.is_some() {
            data.legend = args.legend.clone();
        }
        if let Some(agg) = args.agg {
            data.agg = agg;
        }
        if args.limit.is_some() {
            data.limit = args.limit;
        }
        if args.sort_axis.is_some() {
            data.sort_axis = args.sort_axis.clone();
        }
        if args.sort_legend.is_some() {
            data.sort_legend = args.sort_legend.clone();
        }

        let chart = &mut self.chart;
        if let Some(kind) = args.kind {
            chart.kind = kind;
        }
        if args.title.is_some() {
            chart.title = args.title.clone();
        }
        if let Some(layout) = args.layout {
            chart.layout = layout;
        }
        // Flags only ever switch features on
        chart.horizontal |= args.horizontal;
        chart.area |= args.area;
        chart.running_total |= args.running_total;

        let render = &mut self.render;
        if let Some(ref out) = args.output {
            render.output = out.clone();
        }
        if let Some(w) = args.width {
            render.width = w;
        }
        if let Some(h) = args.height {
            render.height = h;
        }
        if let Some(ref theme) = args.theme {
            render.theme = theme.clone();
        }
        if args.no_labels {
            render.labels = false;
        }

        let yoy = &mut self.yoy;
        if args.yoy_date.is_some() {
            yoy.date_field = args.yoy_date.clone();
        }
        if let Some(ref years) = args.yoy_years {
            yoy.years = years.clone();
        }
        yoy.match_periods |= args.match_periods;
    }

    /// Check the merged settings before any work is done.
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.data.x_axis.is_empty(), "no category column: set [data] x_axis or pass --x");
        ensure!(!self.data.y_axis.is_empty(), "no value column: set [data] y_axis or pass --y");
        ensure!(
            self.render.width > 0 && self.render.height > 0,
            "render size must be positive, got {}x{}",
            self.render.width,
            self.render.height
        );
        Ok(())
    }

    pub fn properties(&self) -> DataProperties {
        let d = &self.data;
        let mut props = DataProperties::new(d.x_axis.clone(), d.y_axis.clone()).with_agg(d.agg);
        props.legend = d.legend.clone();
        props.limit = d.limit;
        props.sort_axis = d.sort_axis.clone();
        props.sort_legend = d.sort_legend.clone();
        props
    }

    pub fn bar_options(&self) -> BarOptions {
        BarOptions {
            layout: self.chart.layout,
            width: self.chart.bar_width,
            space: self.chart.bar_space,
            switch_axis: self.chart.horizontal,
            title: self.chart.title.clone(),
        }
    }

    pub fn line_options(&self) -> LineOptions {
        LineOptions {
            area: self.chart.area,
            running_total: self.chart.running_total,
            title: self.chart.title.clone(),
        }
    }

    /// Commented default configuration file content.
    pub fn default_toml() -> String {
        format!(
            r#"# pivotal chart description

[data]
# Category column (x axis) and value column (y axis)
x_axis = ""
y_axis = ""
# Grouping column; each distinct value becomes a series
# legend = "product"
# sum, mean, count, min, max, std, median, nunique
agg = "sum"
# Keep the N categories with the largest/smallest totals
# limit = "top:10"
# "asc:label", "desc:value", or an explicit list such as ["north", "south"]
# sort_axis = "desc:value"
# sort_legend = "asc:label"

[chart]
# bar or line
kind = "bar"
# title = "Units by region"
# standard, stacked or clustered
layout = "stacked"
bar_width = 0.8
bar_space = 0.0
horizontal = false
# Line charts only
area = false
running_total = false

[render]
output = "chart.png"
width = {WIDTH}
height = {HEIGHT}
# light, dark, solarized-light, solarized-dark, high-contrast-dark
theme = "light"
labels = true

[yoy]
# Date column; enables the year-over-year table
# date_field = "date"
# Years to compare; empty means the two most recent
years = []
match_periods = false
"#
        )
    }
}
