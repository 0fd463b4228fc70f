// File: crates/pivotal-core/src/view.rs
// Visible ranges for the category and value axes, auto-scaled from series extents.

use crate::series::Series;

/// Headroom added on each side of the value range.
pub const HEADROOM: f64 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    pub cat_min: f64,
    pub cat_max: f64,
    pub val_min: f64,
    pub val_max: f64,
}

impl ViewState {
    /// One slot per category, centred on integer positions, values padded by
    /// [`HEADROOM`]. With `include_zero` the range always contains 0 and an
    /// end that sits on 0 is not padded (bars grow out of the axis line).
    pub fn from_series(categories: usize, series: &[Series], include_zero: bool) -> Self {
        let cat_min = -0.5;
        let cat_max = categories.max(1) as f64 - 0.5;

        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for s in series {
            if let Some((a, b)) = s.value_extent() {
                lo = lo.min(a);
                hi = hi.max(b);
            }
        }
        if !lo.is_finite() || !hi.is_finite() {
            return Self { cat_min, cat_max, val_min: 0.0, val_max: 1.0 };
        }
        if include_zero {
            lo = lo.min(0.0);
            hi = hi.max(0.0);
        }
        if (hi - lo).abs() < 1e-9 {
            hi = lo + 1.0;
        }
        let pad = (hi - lo) * HEADROOM;
        let val_min = if include_zero && lo == 0.0 { 0.0 } else { lo - pad };
        let val_max = if include_zero && hi == 0.0 { 0.0 } else { hi + pad };
        Self { cat_min, cat_max, val_min, val_max }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::BarRect;
    use crate::types::Rgba;

    fn bars(values: &[f64]) -> Series {
        let rects = values
            .iter()
            .enumerate()
            .map(|(i, &v)| BarRect { category: i, c0: i as f64 - 0.4, c1: i as f64 + 0.4, v0: 0.0, v1: v })
            .collect();
        Series::bars("s", Rgba::from_argb(255, 0, 0, 0), rects)
    }

    #[test]
    fn positive_bars_start_at_zero() {
        let v = ViewState::from_series(3, &[bars(&[2.0, 10.0, 4.0])], true);
        assert_eq!((v.cat_min, v.cat_max), (-0.5, 2.5));
        assert_eq!(v.val_min, 0.0);
        assert!((v.val_max - 10.5).abs() < 1e-9);
    }

    #[test]
    fn negative_values_pad_both_sides() {
        let v = ViewState::from_series(2, &[bars(&[-5.0, 5.0])], true);
        assert!((v.val_min + 5.5).abs() < 1e-9);
        assert!((v.val_max - 5.5).abs() < 1e-9);
    }

    #[test]
    fn empty_series_falls_back_to_unit_range() {
        let v = ViewState::from_series(0, &[], true);
        assert_eq!((v.val_min, v.val_max), (0.0, 1.0));
        assert_eq!(v.cat_max, 0.5);
    }

    #[test]
    fn lines_without_zero_hug_the_data() {
        let line = Series::line("l", Rgba::from_argb(255, 0, 0, 0), vec![(0.0, 10.0), (1.0, 20.0)]);
        let v = ViewState::from_series(2, &[line], false);
        assert!((v.val_min - 9.5).abs() < 1e-9);
        assert!((v.val_max - 20.5).abs() < 1e-9);
    }
}
