// Copyright 2025 the joinplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scatter plot demo for `joinplot_charts`.
//!
//! Loads a CSV dataset (or a built-in iris sample), renders it into an
//! in-memory surface, exercises the reconciliation paths (reorder, append,
//! remove, field switch), and writes the final frame as SVG.

mod svg;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use env_logger::Env;
use joinplot_charts::{
    AxisName, ChartConfig, Dataset, Host, Record, RenderReport, ScatterChart, Value,
};
use joinplot_core::RetainedSurface;
use kurbo::Size;
use log::{debug, info};

const IRIS_SAMPLE: &str = include_str!("../data/iris_sample.csv");

/// Frame interval used to play back axis transitions.
const FRAME: Duration = Duration::from_millis(16);

/// Command-line arguments for the scatter demo.
#[derive(Parser, Debug)]
#[command(version, about = "Render a scatter plot to SVG")]
struct Args {
    /// CSV file with a header row. Defaults to a built-in iris sample.
    #[arg(long)]
    data: Option<PathBuf>,

    /// Field plotted on the x axis.
    #[arg(long, default_value = "sepal_length")]
    x: String,

    /// Field plotted on the y axis.
    #[arg(long, default_value = "sepal_width")]
    y: String,

    /// Measured width of the drawing surface.
    #[arg(long, default_value_t = 600.0)]
    width: f64,

    /// Measured height of the drawing surface.
    #[arg(long, default_value_t = 400.0)]
    height: f64,

    /// TOML file overriding chart configuration.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to write the SVG.
    #[arg(long, default_value = "joinplot_demo.svg")]
    out: PathBuf,

    /// Log level (overrides `RUST_LOG`).
    #[arg(long = "log-level")]
    log_level: Option<log::LevelFilter>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut logger = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    if let Some(level) = args.log_level {
        logger.filter_level(level);
    }
    logger.init();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => ChartConfig::default(),
    };
    let data = match &args.data {
        Some(path) => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("opening {}", path.display()))?;
            load_csv(file).with_context(|| format!("reading {}", path.display()))?
        }
        None => load_csv(IRIS_SAMPLE.as_bytes()).context("reading built-in sample")?,
    };
    if data.is_empty() {
        bail!("dataset has no records");
    }
    info!("loaded {} records", data.len());

    let (surface, svg) = RetainedSurface::with_svg(Size::new(args.width, args.height));
    let mut chart = ScatterChart::new(Host::from_root(surface), config);
    chart.init().context("initializing chart")?;
    chart.set_data(data.clone())?;
    chart.select_field(AxisName::X, &args.x)?;
    let report = chart.select_field(AxisName::Y, &args.y)?;
    log_report("initial", report.as_ref());
    play_transitions(&mut chart);

    // Same length, new order: marks move, nothing enters or exits.
    let mut reordered: Vec<Record> = data.records().to_vec();
    reordered.reverse();
    log_report("reordered", chart.set_data(reordered)?.as_ref());

    let mut grown: Vec<Record> = data.records().to_vec();
    grown.extend(data.records().first().cloned());
    log_report("appended", chart.set_data(grown)?.as_ref());

    log_report("restored", chart.set_data(data)?.as_ref());

    // Swap axes and back again, animating each switch.
    log_report("swapped", chart.select_field(AxisName::X, &args.y)?.as_ref());
    chart.select_field(AxisName::Y, &args.x)?;
    play_transitions(&mut chart);
    chart.select_field(AxisName::X, &args.x)?;
    let report = chart.select_field(AxisName::Y, &args.y)?;
    log_report("final", report.as_ref());
    play_transitions(&mut chart);

    let out = svg::to_svg_string(chart.host().surface(), svg);
    std::fs::write(&args.out, out).with_context(|| format!("writing {}", args.out.display()))?;
    info!("wrote {}", args.out.display());

    chart.destroy()?;
    Ok(())
}

fn load_config(path: &Path) -> Result<ChartConfig> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let config: ChartConfig =
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
    debug!("config: {config:?}");
    Ok(config)
}

/// Reads CSV with a header row; every cell is kept as text.
fn load_csv(reader: impl std::io::Read) -> Result<Dataset> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();
    debug!("headers: {:?}", headers.iter().collect::<Vec<_>>());

    let mut records = Vec::new();
    for row in rdr.records() {
        let row = row?;
        let record: Record = headers
            .iter()
            .zip(row.iter())
            .map(|(field, cell)| (field, Value::from(cell)))
            .collect();
        records.push(record);
    }
    Ok(Dataset::new(records))
}

fn play_transitions(chart: &mut ScatterChart<RetainedSurface>) {
    let surface = chart.host_mut().surface_mut();
    let mut frames = 0_u32;
    while surface.is_animating() {
        surface.advance(FRAME);
        frames += 1;
    }
    debug!("transitions finished after {frames} frames");
}

fn log_report(stage: &str, report: Option<&RenderReport>) {
    match report {
        Some(r) => info!(
            "{stage}: {}x{} plot, x {:?}, y {:?}, marks +{} ~{} -{}",
            r.dimensions.inner_width,
            r.dimensions.inner_height,
            r.x_domain,
            r.y_domain,
            r.marks.entered,
            r.marks.updated,
            r.marks.exited
        ),
        None => info!("{stage}: not rendered"),
    }
}
