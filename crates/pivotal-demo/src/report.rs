// File: crates/pivotal-demo/src/report.rs
// Summary: Text reports printed after a chart is built.

use pivotal_core::{Label, Pivot, YoyTable};
use std::fmt::Write;

/// Year-over-year growth rates laid out like [`YoyTable::to_pivot`].
pub fn rate_pivot(yoy: &YoyTable) -> Pivot {
    let deltas = yoy.to_pivot();
    let cells = deltas
        .index
        .iter()
        .map(|c| {
            yoy.years()
                .iter()
                .skip(1)
                .map(|&y| yoy.rate(c, y))
                .collect()
        })
        .collect();
    Pivot::new(deltas.index, deltas.columns, cells)
}

pub fn pivot_section(title: &str, pivot: &Pivot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{title} ({} x {})", pivot.num_rows(), pivot.num_columns());
    if pivot.is_empty() {
        out.push_str("  (no rows)\n");
    } else {
        let _ = write!(out, "{pivot}");
    }
    out
}

pub fn yoy_section(yoy: &YoyTable) -> String {
    let years: Vec<String> = yoy.years().iter().map(|y| y.to_string()).collect();
    let mut out = pivot_section(&format!("YoY delta, years {}", years.join(", ")), &yoy.to_pivot());
    out.push('\n');
    out.push_str(&pivot_section("YoY rate", &rate_pivot(yoy)));
    out
}

/// Labels joined for log lines.
pub fn join_labels(labels: &[Label]) -> String {
    labels.iter().map(Label::to_string).collect::<Vec<_>>().join(", ")
}
