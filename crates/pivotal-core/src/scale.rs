// File: crates/pivotal-core/src/scale.rs
// Summary: Data-to-pixel transforms for the category and value axes.

use crate::geometry::Rect;
use crate::series::BarRect;
use crate::view::ViewState;

/// Linear map from a data domain to a pixel range (either may be reversed).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    pub d0: f64,
    pub d1: f64,
    pub r0: f32,
    pub r1: f32,
}

impl LinearScale {
    pub fn new(d0: f64, d1: f64, r0: f32, r1: f32) -> Self {
        // Degenerate domains map everything to the range start.
        let d1 = if (d1 - d0).abs() < 1e-12 { d0 + 1.0 } else { d1 };
        Self { d0, d1, r0, r1 }
    }

    #[inline]
    pub fn to_px(&self, v: f64) -> f32 {
        let t = (v - self.d0) / (self.d1 - self.d0);
        self.r0 + (t as f32) * (self.r1 - self.r0)
    }
}

/// Category + value scales over a plot rectangle.
/// Vertical charts put categories left→right and values bottom→top;
/// horizontal charts put categories bottom→top and values left→right.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotScales {
    pub category: LinearScale,
    pub value: LinearScale,
    pub horizontal: bool,
}

impl PlotScales {
    pub fn new(plot: &Rect, view: &ViewState, horizontal: bool) -> Self {
        if horizontal {
            Self {
                category: LinearScale::new(view.cat_min, view.cat_max, plot.bottom, plot.top),
                value: LinearScale::new(view.val_min, view.val_max, plot.left, plot.right),
                horizontal,
            }
        } else {
            Self {
                category: LinearScale::new(view.cat_min, view.cat_max, plot.left, plot.right),
                value: LinearScale::new(view.val_min, view.val_max, plot.bottom, plot.top),
                horizontal,
            }
        }
    }

    /// Pixel position of (category position, value).
    pub fn point(&self, cat: f64, val: f64) -> (f32, f32) {
        let c = self.category.to_px(cat);
        let v = self.value.to_px(val);
        if self.horizontal { (v, c) } else { (c, v) }
    }

    pub fn bar_rect(&self, bar: &BarRect) -> Rect {
        Rect::from_corners(self.point(bar.c0, bar.v0), self.point(bar.c1, bar.v1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> ViewState {
        ViewState { cat_min: -0.5, cat_max: 1.5, val_min: 0.0, val_max: 10.0 }
    }

    #[test]
    fn linear_maps_reversed_range() {
        let s = LinearScale::new(0.0, 10.0, 100.0, 0.0);
        assert_eq!(s.to_px(2.5), 75.0);
        assert_eq!(s.to_px(10.0), 0.0);
    }

    #[test]
    fn vertical_and_horizontal_orientation() {
        let plot = Rect::from_ltrb(0.0, 0.0, 200.0, 100.0);
        let v = PlotScales::new(&plot, &view(), false);
        assert_eq!(v.point(0.0, 10.0), (50.0, 0.0));

        let h = PlotScales::new(&plot, &view(), true);
        assert_eq!(h.point(0.0, 10.0), (200.0, 75.0));
    }

    #[test]
    fn bar_rect_is_normalized() {
        let plot = Rect::from_ltrb(0.0, 0.0, 200.0, 100.0);
        let s = PlotScales::new(&plot, &view(), false);
        let r = s.bar_rect(&BarRect { category: 0, c0: -0.25, c1: 0.25, v0: 0.0, v1: 5.0 });
        assert_eq!(r, Rect::from_ltrb(25.0, 50.0, 75.0, 100.0));
    }
}
