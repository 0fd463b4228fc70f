// File: crates/pivotal-core/src/axis.rs
// Summary: Value axis (numeric range) and category axis (labelled slots).

use crate::grid::{format_tick, nice_ticks};

/// Numeric axis with a label and a visible range.
#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    pub label: String,
    pub min: f64,
    pub max: f64,
}

impl Axis {
    pub fn new(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self { label: label.into(), min, max }
    }

    /// Tick positions and their text, about `target` intervals.
    pub fn ticks(&self, target: usize) -> Vec<(f64, String)> {
        nice_ticks(self.min, self.max, target).into_iter().map(|v| (v, format_tick(v))).collect()
    }
}

/// A labelled slot on the category axis; slot `i` sits at position `i`.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    pub pos: f64,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CategoryAxis {
    pub label: String,
    pub ticks: Vec<Tick>,
}

impl CategoryAxis {
    pub fn new(label: impl Into<String>, names: impl IntoIterator<Item = String>) -> Self {
        let ticks = names
            .into_iter()
            .enumerate()
            .map(|(i, text)| Tick { pos: i as f64, text })
            .collect();
        Self { label: label.into(), ticks }
    }

    pub fn len(&self) -> usize { self.ticks.len() }

    pub fn is_empty(&self) -> bool { self.ticks.is_empty() }
}
