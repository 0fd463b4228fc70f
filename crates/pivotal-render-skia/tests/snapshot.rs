// File: crates/pivotal-render-skia/tests/snapshot.rs
// Purpose: Golden snapshot harness with bless flow.
// Behavior:
// - Renders a deterministic stacked bar chart to PNG bytes (no text).
// - If env UPDATE_SNAPSHOTS=1, (re)writes the snapshot file.
// - Else, if snapshot exists, compares decoded pixels for exact match.
// - Else, logs a note and returns (skips) without failing to ease first run.

use pivotal_core::{BarOptions, Cell, ChartBuilder, DataProperties, Limit, Table};
use pivotal_render_skia::{RenderChart, RenderOptions};

fn render_bytes() -> Vec<u8> {
    let mut table = Table::new(["quarter", "team", "revenue"]);
    for (q, t, r) in [
        ("Q1", "red", 4.0),
        ("Q1", "blue", 2.0),
        ("Q2", "red", 3.0),
        ("Q2", "blue", 5.0),
        ("Q3", "red", 1.0),
        ("Q3", "blue", 1.5),
        ("Q4", "red", 6.0),
    ] {
        table.push_row([Cell::from(q), Cell::from(t), Cell::from(r)]).unwrap();
    }
    let props = DataProperties::new("quarter", "revenue").with_legend("team").with_limit(Limit::Top(3));
    let chart = ChartBuilder::new(&table)
        .bar(&props, &BarOptions { space: 0.02, ..Default::default() })
        .expect("stacked chart");

    let opts = RenderOptions { width: 480, height: 320, draw_labels: false, ..Default::default() };
    chart.render_to_png_bytes(&opts).expect("render png")
}

#[test]
fn golden_stacked_chart() {
    let bytes = render_bytes();
    let snap_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/__snapshots__");
    let snap_path = snap_dir.join("stacked_chart.png");

    let update = std::env::var("UPDATE_SNAPSHOTS").ok().map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    if update {
        std::fs::create_dir_all(&snap_dir).expect("create snapshots dir");
        std::fs::write(&snap_path, &bytes).expect("write snapshot");
        eprintln!("[snapshot] Updated {} ({} bytes)", snap_path.display(), bytes.len());
        return;
    }

    if snap_path.exists() {
        let want = std::fs::read(&snap_path).expect("read snapshot");
        // Compare decoded pixel buffers to avoid PNG encoder variance
        let got_img = image::load_from_memory(&bytes).expect("decode got").to_rgba8();
        let want_img = image::load_from_memory(&want).expect("decode want").to_rgba8();
        assert_eq!(got_img.as_raw(), want_img.as_raw(), "rendered pixels differ from golden snapshot: {}", snap_path.display());
    } else {
        eprintln!("[snapshot] Missing snapshot {}; set UPDATE_SNAPSHOTS=1 to bless.", snap_path.display());
        // Skip without failing on first run
    }
}

#[test]
fn rendering_is_deterministic() {
    assert_eq!(render_bytes(), render_bytes());
}
