// File: crates/pivotal-core/src/series.rs
// Summary: Series model: one pivot column laid out as bars, a line or an area.

use crate::types::Rgba;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeriesType {
    Bar,
    Line,
    /// Line with the region down to the baseline filled.
    Area,
}

/// A bar in data space: category extent `c0..c1`, value extent `v0..v1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarRect {
    pub category: usize,
    pub c0: f64,
    pub c1: f64,
    pub v0: f64,
    pub v1: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub name: String,
    pub series_type: SeriesType,
    pub color: Rgba,
    pub bars: Vec<BarRect>,       // used by Bar
    pub points: Vec<(f64, f64)>,  // used by Line/Area, (category position, value)
    pub baseline: Option<f64>,    // used by Area (fill origin)
    pub stroke_width: f32,
}

impl Series {
    pub fn bars(name: impl Into<String>, color: Rgba, bars: Vec<BarRect>) -> Self {
        Self {
            name: name.into(),
            series_type: SeriesType::Bar,
            color,
            bars,
            points: Vec::new(),
            baseline: None,
            stroke_width: 0.0,
        }
    }

    pub fn line(name: impl Into<String>, color: Rgba, points: Vec<(f64, f64)>) -> Self {
        Self {
            name: name.into(),
            series_type: SeriesType::Line,
            color,
            bars: Vec::new(),
            points,
            baseline: None,
            stroke_width: 2.0,
        }
    }

    pub fn area(name: impl Into<String>, color: Rgba, points: Vec<(f64, f64)>) -> Self {
        Self { series_type: SeriesType::Area, ..Self::line(name, color, points) }.with_baseline(0.0)
    }

    pub fn with_baseline(mut self, baseline: f64) -> Self {
        self.baseline = Some(baseline);
        self
    }

    /// Get baseline value or default (0.0) when not set.
    pub fn baseline_value(&self) -> f64 { self.baseline.unwrap_or(0.0) }

    /// Smallest and largest value this series occupies, baseline included.
    pub fn value_extent(&self) -> Option<(f64, f64)> {
        let values = self
            .bars
            .iter()
            .flat_map(|b| [b.v0, b.v1])
            .chain(self.points.iter().map(|p| p.1))
            .chain(self.baseline);
        values.fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
        })
    }
}
