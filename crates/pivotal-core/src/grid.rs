// File: crates/pivotal-core/src/grid.rs
// Summary: Grid/tick layout helpers.

/// Step of 1, 2 or 5 x 10^k giving roughly `target` intervals over `span`.
pub fn nice_step(span: f64, target: usize) -> f64 {
    let raw = span.abs() / target.max(1) as f64;
    if !raw.is_finite() || raw <= 0.0 { return 1.0; }
    let mag = 10f64.powf(raw.log10().floor());
    let norm = raw / mag;
    let nice = if norm <= 1.0 { 1.0 } else if norm <= 2.0 { 2.0 } else if norm <= 5.0 { 5.0 } else { 10.0 };
    nice * mag
}

/// Tick values on multiples of a nice step that fall inside [min, max].
pub fn nice_ticks(min: f64, max: f64, target: usize) -> Vec<f64> {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    let step = nice_step(hi - lo, target);
    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last)
        .map(|k| {
            let v = k as f64 * step;
            // snap float noise such as 0.30000000000000004
            (v / step).round() * step
        })
        .map(|v| if v == 0.0 { 0.0 } else { v })
        .collect()
}

/// Tick text without trailing zeros; large magnitudes get k/M suffixes.
pub fn format_tick(v: f64) -> String {
    let a = v.abs();
    let (scaled, suffix) = if a >= 1e6 { (v / 1e6, "M") } else if a >= 1e4 { (v / 1e3, "k") } else { (v, "") };
    let s = format!("{scaled:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    format!("{s}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_are_nice() {
        assert_eq!(nice_step(10.0, 5), 2.0);
        assert_eq!(nice_step(7.0, 5), 2.0);
        assert!((nice_step(0.9, 5) - 0.2).abs() < 1e-12);
        assert_eq!(nice_step(0.0, 5), 1.0);
    }

    #[test]
    fn ticks_cover_range() {
        assert_eq!(nice_ticks(0.0, 10.0, 5), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_eq!(nice_ticks(-3.0, 3.0, 3), vec![-2.0, 0.0, 2.0]);
    }

    #[test]
    fn tick_text() {
        assert_eq!(format_tick(2.50), "2.5");
        assert_eq!(format_tick(15000.0), "15k");
        assert_eq!(format_tick(-2_500_000.0), "-2.5M");
        assert_eq!(format_tick(3.0), "3");
    }
}
