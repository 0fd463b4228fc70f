// File: crates/pivotal-demo/src/main.rs
// Summary: `pivotal` CLI: loads a CSV, pivots it per config/flags, prints the tables and renders a PNG.

mod cli;
mod config;
mod report;

use anyhow::{Context, Result};
use cli::{Args, ChartType};
use config::Config;
use pivotal_core::{Chart, ChartBuilder, Table, Theme};
use pivotal_render_skia::{RenderChart, RenderOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config(Path::new(config::DEFAULT_PATH));
    }

    init_logging(&args);

    info!("pivotal v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(&args) {
        error!("pivotal failed: {:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
    Ok(())
}

/// Write a commented default config to `path`, refusing to overwrite.
fn handle_init_config(path: &Path) -> Result<()> {
    if path.exists() {
        anyhow::bail!("{} already exists. Remove it first or edit it manually.", path.display());
    }
    std::fs::write(path, Config::default_toml())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Created {} with default settings.", path.display());
    Ok(())
}

/// Initialize logging: RUST_LOG wins, otherwise the -v/-q level.
fn init_logging(args: &Args) {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(args.log_level()).into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn run(args: &Args) -> Result<()> {
    let mut config = load_config(args)?;
    config.merge_with_args(args);
    config.validate()?;

    let input = args.input.as_deref().context("no input CSV given")?;
    let output = execute(&config, input)?;
    println!("Chart saved to: {}", output.display());
    Ok(())
}

/// Load, pivot, print and render. Returns the written PNG path.
fn execute(config: &Config, input: &Path) -> Result<PathBuf> {
    let table = Table::from_csv_path(input)
        .with_context(|| format!("failed to load CSV '{}'", input.display()))?;
    info!(rows = table.num_rows(), columns = table.column_names().len(), "loaded {}", input.display());

    let chart = build_chart(config, &table)?;
    info!(categories = %report::join_labels(&chart.data.pivot.index), "chart built");
    print!("{}", report::pivot_section(&config.data.y_axis, &chart.data.pivot));

    if let Some(opts) = config.yoy.options() {
        let yoy = chart.measures().yoy(&opts).context("year-over-year failed")?;
        if yoy.is_empty() {
            warn!("no category has values in two compared years");
        }
        println!();
        print!("{}", report::yoy_section(&yoy));
    }

    let opts = RenderOptions {
        width: config.render.width,
        height: config.render.height,
        draw_labels: config.render.labels,
        ..Default::default()
    };
    let output = config.render.output.clone();
    chart
        .render_to_png(&opts, &output)
        .with_context(|| format!("failed to render {}", output.display()))?;
    info!("wrote {}", output.display());
    Ok(output)
}

fn build_chart(config: &Config, table: &Table) -> Result<Chart> {
    let theme = Theme::find(&config.render.theme);
    if !theme.name.eq_ignore_ascii_case(&config.render.theme) {
        warn!("unknown theme '{}', using {}", config.render.theme, theme.name);
    }
    let builder = ChartBuilder::new(table).with_theme(theme);
    let props = config.properties();
    let chart = match config.chart.kind {
        ChartType::Bar => builder.bar(&props, &config.bar_options())?,
        ChartType::Line => builder.line(&props, &config.line_options())?,
    };
    Ok(chart)
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    match Config::load_default()? {
        Some(config) => {
            info!("Loaded default config from {}", config::DEFAULT_PATH);
            Ok(config)
        }
        None => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pivotal_core::{BarLayout, Limit};

    const CSV: &str = "date,region,product,units\n\
        2023-01-05,north,apples,3\n\
        2023-02-10,south,apples,5\n\
        2024-01-07,north,apples,4\n\
        2024-02-11,south,pears,1\n\
        2024-03-01,west,pears,7\n";

    fn config(dir: &Path) -> Config {
        let mut config = Config::default();
        config.data.x_axis = "region".into();
        config.data.y_axis = "units".into();
        config.data.legend = Some("product".into());
        config.render.output = dir.join("out/chart.png");
        config.render.width = 320;
        config.render.height = 200;
        config.render.labels = false;
        config
    }

    #[test]
    fn execute_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("sales.csv");
        std::fs::write(&input, CSV).unwrap();

        let mut config = config(dir.path());
        config.data.limit = Some(Limit::Top(2));
        config.chart.layout = BarLayout::Clustered;
        config.yoy.date_field = Some("date".into());

        let out = execute(&config, &input).unwrap();
        let bytes = std::fs::read(out).unwrap();
        assert!(bytes.starts_with(&[137, 80, 78, 71]));
    }

    #[test]
    fn line_chart_with_unknown_theme_still_renders() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("sales.csv");
        std::fs::write(&input, CSV).unwrap();

        let mut config = config(dir.path());
        config.chart.kind = ChartType::Line;
        config.chart.running_total = true;
        config.render.theme = "neon".into();
        assert!(execute(&config, &input).unwrap().exists());
    }

    #[test]
    fn missing_column_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("sales.csv");
        std::fs::write(&input, CSV).unwrap();

        let mut config = config(dir.path());
        config.data.y_axis = "revenue".into();
        let err = execute(&config, &input).unwrap_err();
        assert!(format!("{err:#}").contains("revenue"));
    }

    #[test]
    fn init_config_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(config::DEFAULT_PATH);
        handle_init_config(&path).unwrap();
        let written = Config::load(&path).unwrap();
        assert_eq!(written.render.theme, "light");
        assert!(handle_init_config(&path).is_err());
    }
}
