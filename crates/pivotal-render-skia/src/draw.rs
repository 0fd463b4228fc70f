// File: crates/pivotal-render-skia/src/draw.rs
// Summary: Skia drawing helpers for grid, axes, series, legend and title.

use skia_safe as skia;

use pivotal_core::geometry::Rect;
use pivotal_core::scale::PlotScales;
use pivotal_core::{Chart, Legend, Rgba, Series, SeriesType, Theme};

use crate::text::{Anchor, TextShaper};

const TICK_TARGET: usize = 6;
const TICK_LEN: f32 = 5.0;
const LABEL_SIZE: f32 = 12.0;
const AXIS_TITLE_SIZE: f32 = 14.0;
const TITLE_SIZE: f32 = 18.0;

pub(crate) fn color(c: Rgba) -> skia::Color { skia::Color::from_argb(c.a, c.r, c.g, c.b) }

fn sk_rect(r: &Rect) -> skia::Rect { skia::Rect::from_ltrb(r.left, r.top, r.right, r.bottom) }

fn stroke(c: Rgba, width: f32) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width);
    paint.set_color(color(c));
    paint
}

fn fill(c: Rgba) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(color(c));
    paint
}

/// Grid lines at the value ticks, perpendicular to the value axis.
pub(crate) fn draw_grid(canvas: &skia::Canvas, plot: &Rect, scales: &PlotScales, chart: &Chart) {
    let paint = stroke(chart.theme.grid, 1.0);
    for (v, _) in chart.value_axis.ticks(TICK_TARGET) {
        let p = scales.value.to_px(v);
        if scales.horizontal {
            canvas.draw_line((p, plot.top), (p, plot.bottom), &paint);
        } else {
            canvas.draw_line((plot.left, p), (plot.right, p), &paint);
        }
    }
}

/// Axis lines, tick marks, the zero line and (optionally) tick and axis labels.
pub(crate) fn draw_axes(
    canvas: &skia::Canvas,
    plot: &Rect,
    scales: &PlotScales,
    chart: &Chart,
    text: Option<&TextShaper>,
) {
    let theme = &chart.theme;
    let axis_paint = stroke(theme.axis_line, 1.5);
    let tick_paint = stroke(theme.tick, 1.0);

    canvas.draw_line((plot.left, plot.bottom), (plot.right, plot.bottom), &axis_paint);
    canvas.draw_line((plot.left, plot.top), (plot.left, plot.bottom), &axis_paint);

    // Zero line when the value range crosses it
    let view = chart.view();
    if view.val_min < 0.0 && view.val_max > 0.0 {
        let z = scales.value.to_px(0.0);
        if scales.horizontal {
            canvas.draw_line((z, plot.top), (z, plot.bottom), &axis_paint);
        } else {
            canvas.draw_line((plot.left, z), (plot.right, z), &axis_paint);
        }
    }

    let label = color(theme.axis_label);
    let tick_color = color(theme.tick);

    for (v, s) in chart.value_axis.ticks(TICK_TARGET) {
        let p = scales.value.to_px(v);
        if scales.horizontal {
            canvas.draw_line((p, plot.bottom), (p, plot.bottom + TICK_LEN), &tick_paint);
            if let Some(t) = text {
                t.draw(canvas, &s, p, plot.bottom + 20.0, Anchor::Center, LABEL_SIZE, tick_color, true);
            }
        } else {
            canvas.draw_line((plot.left - TICK_LEN, p), (plot.left, p), &tick_paint);
            if let Some(t) = text {
                t.draw(canvas, &s, plot.left - 8.0, p + 4.0, Anchor::Right, LABEL_SIZE, tick_color, true);
            }
        }
    }

    for tick in &chart.category_axis.ticks {
        let p = scales.category.to_px(tick.pos);
        if scales.horizontal {
            canvas.draw_line((plot.left - TICK_LEN, p), (plot.left, p), &tick_paint);
            if let Some(t) = text {
                t.draw(canvas, &tick.text, plot.left - 8.0, p + 4.0, Anchor::Right, LABEL_SIZE, tick_color, false);
            }
        } else {
            canvas.draw_line((p, plot.bottom), (p, plot.bottom + TICK_LEN), &tick_paint);
            if let Some(t) = text {
                t.draw(canvas, &tick.text, p, plot.bottom + 20.0, Anchor::Center, LABEL_SIZE, tick_color, false);
            }
        }
    }

    if let Some(t) = text {
        let (bottom_title, left_title) = if scales.horizontal {
            (&chart.value_axis.label, &chart.category_axis.label)
        } else {
            (&chart.category_axis.label, &chart.value_axis.label)
        };
        let cx = (plot.left + plot.right) / 2.0;
        t.draw(canvas, bottom_title, cx, plot.bottom + 44.0, Anchor::Center, AXIS_TITLE_SIZE, label, false);
        t.draw(canvas, left_title, plot.left, plot.top - 10.0, Anchor::Right, AXIS_TITLE_SIZE, label, false);
    }
}

pub(crate) fn draw_series(canvas: &skia::Canvas, scales: &PlotScales, theme: &Theme, series: &Series) {
    match series.series_type {
        SeriesType::Bar => draw_bar_series(canvas, scales, series),
        SeriesType::Line => draw_line_series(canvas, scales, series),
        SeriesType::Area => {
            draw_area_fill(canvas, scales, theme, series);
            draw_line_series(canvas, scales, series);
        }
    }
}

fn draw_bar_series(canvas: &skia::Canvas, scales: &PlotScales, series: &Series) {
    let paint = fill(series.color);
    for bar in &series.bars {
        if bar.v0 == bar.v1 {
            continue;
        }
        canvas.draw_rect(sk_rect(&scales.bar_rect(bar)), &paint);
    }
}

fn draw_line_series(canvas: &skia::Canvas, scales: &PlotScales, series: &Series) {
    let data = &series.points;
    if data.len() < 2 {
        // A lone point still deserves a marker
        if let Some(&(c, v)) = data.first() {
            canvas.draw_circle(scales.point(c, v), series.stroke_width.max(2.0), &fill(series.color));
        }
        return;
    }

    let mut path = skia::Path::new();
    let (c0, v0) = data[0];
    path.move_to(scales.point(c0, v0));
    for &(c, v) in data.iter().skip(1) {
        path.line_to(scales.point(c, v));
    }
    canvas.draw_path(&path, &stroke(series.color, series.stroke_width));
}

fn draw_area_fill(canvas: &skia::Canvas, scales: &PlotScales, theme: &Theme, series: &Series) {
    let data = &series.points;
    let (Some(&(first, _)), Some(&(last, _))) = (data.first(), data.last()) else { return };
    let base = series.baseline_value();

    let mut path = skia::Path::new();
    path.move_to(scales.point(first, base));
    for &(c, v) in data {
        path.line_to(scales.point(c, v));
    }
    path.line_to(scales.point(last, base));
    path.close();
    canvas.draw_path(&path, &fill(series.color.with_alpha(theme.area_alpha)));
}

/// Legend box in the top-right corner of the plot area.
pub(crate) fn draw_legend(
    canvas: &skia::Canvas,
    plot: &Rect,
    theme: &Theme,
    legend: &Legend,
    text: Option<&TextShaper>,
) {
    if legend.entries.is_empty() {
        return;
    }
    let row_h = 18.0;
    let swatch = 12.0;
    let pad = 8.0;
    let text_w = text
        .map(|t| {
            legend
                .entries
                .iter()
                .map(|e| t.measure_width(&e.label, LABEL_SIZE, false))
                .chain(std::iter::once(t.measure_width(&legend.title, LABEL_SIZE, false)))
                .fold(0.0f32, f32::max)
        })
        .unwrap_or(0.0);
    let title_rows = if text.is_some() { 1.0 } else { 0.0 };
    let w = pad * 3.0 + swatch + text_w;
    let h = pad * 2.0 + row_h * (legend.entries.len() as f32 + title_rows);
    let bx = Rect::from_ltrb(plot.right - w - pad, plot.top + pad, plot.right - pad, plot.top + pad + h);

    canvas.draw_rect(sk_rect(&bx), &fill(theme.legend_bg));
    canvas.draw_rect(sk_rect(&bx), &stroke(theme.grid, 1.0));

    let mut y = bx.top + pad;
    if let Some(t) = text {
        t.draw(canvas, &legend.title, bx.left + pad, y + 13.0, Anchor::Left, LABEL_SIZE, color(theme.axis_label), false);
        y += row_h;
    }
    for e in &legend.entries {
        let sx = bx.left + pad;
        let cy = y + row_h / 2.0;
        match e.series_type {
            SeriesType::Line => {
                canvas.draw_line((sx, cy), (sx + swatch, cy), &stroke(e.color, 2.0));
            }
            SeriesType::Bar | SeriesType::Area => {
                let r = skia::Rect::from_ltrb(sx, cy - swatch / 2.0, sx + swatch, cy + swatch / 2.0);
                canvas.draw_rect(r, &fill(e.color));
            }
        }
        if let Some(t) = text {
            t.draw(canvas, &e.label, sx + swatch + pad, cy + 4.0, Anchor::Left, LABEL_SIZE, color(theme.axis_label), false);
        }
        y += row_h;
    }
}

pub(crate) fn draw_title(canvas: &skia::Canvas, width: i32, theme: &Theme, title: &str, text: &TextShaper) {
    text.draw(canvas, title, width as f32 / 2.0, 28.0, Anchor::Center, TITLE_SIZE, color(theme.title), false);
}
