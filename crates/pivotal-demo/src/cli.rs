// File: crates/pivotal-demo/src/cli.rs
// Summary: clap arguments for the `pivotal` binary; flags override values from the TOML config.

use clap::Parser;
use pivotal_core::{AggFunc, BarLayout, Limit, SortSpec};
use serde::Deserialize;
use std::path::PathBuf;

/// pivotal - pivot a CSV and chart it
///
/// Groups a table by a category column (and optionally a legend column),
/// aggregates a value column, keeps the top/bottom N categories, renders
/// a bar or line chart to PNG and can print year-over-year deltas.
///
/// Examples:
///   pivotal sales.csv --x region --y units
///   pivotal sales.csv --x region --y units --legend product --layout clustered
///   pivotal sales.csv --x region --y units --limit top:5 --yoy-date date
///   pivotal --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Input CSV file (with a header row)
    #[arg(value_name = "CSV", required_unless_present = "init_config")]
    pub input: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .pivotal.toml in the current directory
    #[arg(short, long, value_name = "FILE", env = "PIVOTAL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output PNG path
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Chart type
    #[arg(long, value_name = "KIND")]
    pub kind: Option<ChartType>,

    /// Category column (x axis)
    #[arg(long = "x", value_name = "COLUMN")]
    pub x_axis: Option<String>,

    /// Value column (y axis)
    #[arg(long = "y", value_name = "COLUMN")]
    pub y_axis: Option<String>,

    /// Grouping column; its values become series
    #[arg(long, value_name = "COLUMN")]
    pub legend: Option<String>,

    /// Aggregation: sum, mean, count, min, max, std, median, nunique
    #[arg(long, value_name = "FUNC")]
    pub agg: Option<AggFunc>,

    /// Keep only the top/bottom N categories by total, e.g. top:5
    #[arg(long, value_name = "SPEC")]
    pub limit: Option<Limit>,

    /// Category order: asc:label, desc:value, or a comma separated label list
    #[arg(long, value_name = "SPEC")]
    pub sort_axis: Option<SortSpec>,

    /// Series order, same forms as --sort-axis
    #[arg(long, value_name = "SPEC")]
    pub sort_legend: Option<SortSpec>,

    /// Bar layout: standard, stacked, clustered
    #[arg(long, value_name = "LAYOUT")]
    pub layout: Option<BarLayout>,

    /// Horizontal bars
    #[arg(long)]
    pub horizontal: bool,

    /// Line chart: fill the area under each line
    #[arg(long)]
    pub area: bool,

    /// Line chart: plot cumulative totals
    #[arg(long)]
    pub running_total: bool,

    /// Chart title
    #[arg(long, value_name = "TEXT")]
    pub title: Option<String>,

    /// Theme: light, dark, solarized-light, solarized-dark, high-contrast-dark
    #[arg(long, value_name = "NAME")]
    pub theme: Option<String>,

    /// Image width in pixels
    #[arg(long, value_name = "PX")]
    pub width: Option<i32>,

    /// Image height in pixels
    #[arg(long, value_name = "PX")]
    pub height: Option<i32>,

    /// Skip all text (labels, legend text, title)
    #[arg(long)]
    pub no_labels: bool,

    /// Date column for year-over-year deltas; enables the YoY table
    #[arg(long, value_name = "COLUMN")]
    pub yoy_date: Option<String>,

    /// Years to compare (comma-separated); default is the latest two
    #[arg(long, value_name = "YEARS", value_delimiter = ',')]
    pub yoy_years: Option<Vec<i32>>,

    /// Compare earlier years only up to the latest day-of-year of the last year
    #[arg(long)]
    pub match_periods: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .pivotal.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Chart type for --kind and `[chart] kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Bar,
    Line,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if let Some(ref input) = self.input {
            if !input.is_file() {
                return Err(format!("Input file does not exist: {}", input.display()));
            }
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        for (name, v) in [("width", self.width), ("height", self.height)] {
            if matches!(v, Some(px) if px <= 0) {
                return Err(format!("--{name} must be at least 1 pixel"));
            }
        }

        if self.kind == Some(ChartType::Line) && (self.layout.is_some() || self.horizontal) {
            return Err("--layout and --horizontal only apply to bar charts".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
