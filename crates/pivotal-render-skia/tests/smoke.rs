// File: crates/pivotal-render-skia/tests/smoke.rs
// Purpose: End-to-end render smoke tests: table -> chart -> PNG file, bytes and RGBA pixels.

use pivotal_core::{BarLayout, BarOptions, Cell, ChartBuilder, DataProperties, LineOptions, Table, Theme};
use pivotal_render_skia::{RenderChart, RenderOptions};

fn sales() -> Table {
    let rows = [
        ("north", "apples", 3.0),
        ("north", "pears", 1.0),
        ("south", "apples", 2.0),
        ("south", "pears", -1.5),
        ("east", "apples", 4.0),
    ];
    Table::from_rows(
        ["region", "product", "units"],
        rows.into_iter().map(|(r, p, u)| [Cell::from(r), Cell::from(p), Cell::from(u)]),
    )
    .unwrap()
}

#[test]
fn render_smoke_png() {
    let props = DataProperties::new("region", "units").with_legend("product");
    let chart = ChartBuilder::new(&sales())
        .bar(&props, &BarOptions { layout: BarLayout::Clustered, space: 0.05, ..Default::default() })
        .expect("bar chart")
        .with_title("Units by region");

    let opts = RenderOptions::default();
    let out = std::path::PathBuf::from("target/test_out/smoke.png");
    std::fs::create_dir_all(out.parent().unwrap()).unwrap();

    chart.render_to_png(&opts, &out).expect("render should succeed");
    let meta = std::fs::metadata(&out).expect("output exists");
    assert!(meta.len() > 0, "png should be non-empty");

    // Also verify in-memory API works
    let bytes = chart.render_to_png_bytes(&opts).expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
}

#[test]
fn render_rgba8_buffer() {
    let props = DataProperties::new("region", "units");
    let chart = ChartBuilder::new(&sales()).bar(&props, &BarOptions::default()).unwrap();

    let opts = RenderOptions { draw_labels: false, ..Default::default() };
    let px = chart.render_to_rgba8(&opts).expect("rgba render");
    assert_eq!(opts.width as usize * opts.height as usize * 4, px.len());

    let at = |x: usize, y: usize| {
        let i = (y * opts.width as usize + x) * 4;
        [px[i], px[i + 1], px[i + 2], px[i + 3]]
    };
    let bg = Theme::light().background;
    assert_eq!(at(0, 0), [bg.r, bg.g, bg.b, 255]);

    // Categories east/north/south with totals 4/4/0.5; the middle bar spans x = 0.6..1.4
    // of -0.5..2.5, i.e. the horizontal centre of the plot.
    let plot_mid_x = (opts.insets.left as usize + (opts.width as usize - opts.insets.right as usize)) / 2;
    let near_axis_y = opts.height as usize - opts.insets.bottom as usize - 10;
    let c = Theme::light().series_color(0);
    assert_eq!(at(plot_mid_x, near_axis_y), [c.r, c.g, c.b, 255]);
}

#[test]
fn theme_override_changes_background() {
    let props = DataProperties::new("region", "units");
    let chart = ChartBuilder::new(&sales()).line(&props, &LineOptions { area: true, ..Default::default() }).unwrap();

    let opts = RenderOptions {
        width: 320,
        height: 200,
        draw_labels: false,
        theme: Some(Theme::high_contrast_dark()),
        ..Default::default()
    };
    let px = chart.render_to_rgba8(&opts).unwrap();
    assert_eq!(&px[..4], &[0, 0, 0, 255]);
}

#[test]
fn zero_sized_surface_is_an_error() {
    let props = DataProperties::new("region", "units");
    let chart = ChartBuilder::new(&sales()).bar(&props, &BarOptions::default()).unwrap();
    let opts = RenderOptions { width: 0, ..Default::default() };
    assert!(chart.render_to_png_bytes(&opts).is_err());
}
