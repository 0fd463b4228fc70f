// File: crates/pivotal-core/src/geometry.rs
// Summary: Lightweight geometry helpers for pixel math.

use crate::types::Insets;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub const fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Normalizes so that left <= right and top <= bottom.
    pub fn from_corners(a: (f32, f32), b: (f32, f32)) -> Self {
        Self { left: a.0.min(b.0), top: a.1.min(b.1), right: a.0.max(b.0), bottom: a.1.max(b.1) }
    }

    pub fn width(&self) -> f32 { self.right - self.left }
    pub fn height(&self) -> f32 { self.bottom - self.top }

    /// Plot area of a `width` x `height` surface after removing `insets`.
    /// Degenerate sizes collapse to a 1px area instead of inverting.
    pub fn plot_area(width: i32, height: i32, insets: &Insets) -> Self {
        let l = insets.left as f32;
        let t = insets.top as f32;
        let r = (width as f32 - insets.right as f32).max(l + 1.0);
        let b = (height as f32 - insets.bottom as f32).max(t + 1.0);
        Self::from_ltrb(l, t, r, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plot_area_respects_insets() {
        let r = Rect::plot_area(200, 100, &Insets::new(10, 20, 5, 15));
        assert_eq!(r, Rect::from_ltrb(10.0, 5.0, 180.0, 85.0));
        let tiny = Rect::plot_area(10, 10, &Insets::new(10, 20, 5, 15));
        assert_eq!(tiny.width(), 1.0);
    }

    #[test]
    fn corners_normalize() {
        let r = Rect::from_corners((5.0, 9.0), (1.0, 2.0));
        assert_eq!((r.left, r.top, r.right, r.bottom), (1.0, 2.0, 5.0, 9.0));
    }
}
