// File: crates/pivotal-render-skia/src/lib.rs
// Summary: Headless rendering of pivotal-core charts through Skia CPU raster surfaces.

pub mod text;
mod draw;

use std::io::Cursor;
use std::path::Path;

use anyhow::{anyhow, ensure, Context, Result};
use skia_safe as skia;
use tracing::debug;

use pivotal_core::geometry::Rect;
use pivotal_core::scale::PlotScales;
use pivotal_core::types::{HEIGHT, WIDTH};
use pivotal_core::{Chart, Insets, Theme};

pub use text::TextShaper;

#[derive(Clone, Debug)]
pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub insets: Insets,
    /// Tick labels, axis titles, legend text and chart title.
    pub draw_labels: bool,
    /// Overrides the chart's own theme.
    pub theme: Option<Theme>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            draw_labels: true,
            theme: None,
        }
    }
}

pub struct SkiaRenderer {
    text: TextShaper,
}

impl Default for SkiaRenderer {
    fn default() -> Self { Self::new() }
}

impl SkiaRenderer {
    pub fn new() -> Self { Self { text: TextShaper::new() } }

    /// Draw `chart` onto a fresh raster surface.
    pub fn render(&self, chart: &Chart, opts: &RenderOptions) -> Result<skia::Surface> {
        ensure!(opts.width > 0 && opts.height > 0, "invalid surface size {}x{}", opts.width, opts.height);

        let themed;
        let chart = match opts.theme {
            Some(theme) => {
                themed = chart.clone().with_theme(theme);
                &themed
            }
            None => chart,
        };

        let mut surface = skia::surfaces::raster_n32_premul((opts.width, opts.height))
            .ok_or_else(|| anyhow!("failed to create raster surface"))?;
        let canvas = surface.canvas();
        canvas.clear(draw::color(chart.theme.background));

        let plot = Rect::plot_area(opts.width, opts.height, &opts.insets);
        let scales = PlotScales::new(&plot, &chart.view(), chart.horizontal());
        let text = opts.draw_labels.then_some(&self.text);

        draw::draw_grid(canvas, &plot, &scales, chart);
        for s in &chart.series {
            draw::draw_series(canvas, &scales, &chart.theme, s);
        }
        draw::draw_axes(canvas, &plot, &scales, chart, text);
        if let Some(legend) = &chart.legend {
            draw::draw_legend(canvas, &plot, &chart.theme, legend, text);
        }
        if let (Some(title), Some(t)) = (&chart.title, text) {
            draw::draw_title(canvas, opts.width, &chart.theme, title, t);
        }

        debug!(
            width = opts.width,
            height = opts.height,
            series = chart.series.len(),
            theme = chart.theme.name,
            "chart rendered"
        );
        Ok(surface)
    }

    /// Unpremultiplied RGBA8 pixels, row-major, `width * height * 4` bytes.
    pub fn render_to_rgba8(&self, chart: &Chart, opts: &RenderOptions) -> Result<Vec<u8>> {
        let mut surface = self.render(chart, opts)?;
        let info = skia::ImageInfo::new(
            (opts.width, opts.height),
            skia::ColorType::RGBA8888,
            skia::AlphaType::Unpremul,
            None,
        );
        let row_bytes = opts.width as usize * 4;
        let mut pixels = vec![0u8; row_bytes * opts.height as usize];
        ensure!(surface.read_pixels(&info, &mut pixels, row_bytes, (0, 0)), "read pixels failed");
        Ok(pixels)
    }

    pub fn render_to_png_bytes(&self, chart: &Chart, opts: &RenderOptions) -> Result<Vec<u8>> {
        let pixels = self.render_to_rgba8(chart, opts)?;
        let img = image::RgbaImage::from_raw(opts.width as u32, opts.height as u32, pixels)
            .ok_or_else(|| anyhow!("pixel buffer does not match {}x{}", opts.width, opts.height))?;
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).context("encode PNG failed")?;
        Ok(out.into_inner())
    }

    pub fn render_to_png(&self, chart: &Chart, opts: &RenderOptions, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.render_to_png_bytes(chart, opts)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir {}", parent.display()))?;
        }
        std::fs::write(path, bytes).with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }
}

/// Rendering entry points on [`Chart`] itself.
pub trait RenderChart {
    fn render_to_rgba8(&self, opts: &RenderOptions) -> Result<Vec<u8>>;
    fn render_to_png_bytes(&self, opts: &RenderOptions) -> Result<Vec<u8>>;
    fn render_to_png(&self, opts: &RenderOptions, path: impl AsRef<Path>) -> Result<()>;
}

impl RenderChart for Chart {
    fn render_to_rgba8(&self, opts: &RenderOptions) -> Result<Vec<u8>> {
        SkiaRenderer::new().render_to_rgba8(self, opts)
    }

    fn render_to_png_bytes(&self, opts: &RenderOptions) -> Result<Vec<u8>> {
        SkiaRenderer::new().render_to_png_bytes(self, opts)
    }

    fn render_to_png(&self, opts: &RenderOptions, path: impl AsRef<Path>) -> Result<()> {
        SkiaRenderer::new().render_to_png(self, opts, path)
    }
}
