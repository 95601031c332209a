mod app;
mod chart;
mod countries;
mod util;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use chart::{ChartConfig, ChartSurface, TickOutcome, render, render_svg};
use countries::{DisplayType, aggregate, load_countries};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// JSON array of country records.
    #[arg(long, default_value = "data/countries.json")]
    data: PathBuf,

    /// Initial display type, e.g. populationSize or noTimezonesRegion.
    #[arg(long, default_value_t = DisplayType::default())]
    display: DisplayType,

    /// Render the settled chart to an SVG file instead of opening a window.
    #[arg(long, value_name = "PATH")]
    export_svg: Option<PathBuf>,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

fn export_svg(args: &Args, output: &Path) -> Result<()> {
    let countries = load_countries(&args.data)?;
    let aggregation = aggregate(&countries, args.display.groups_by_region());

    let config = ChartConfig::default();
    let mut surface = ChartSurface::new(&config);
    let mut scheduler = render(&mut surface, &aggregation, args.display, &config)?;
    if scheduler.run_to_completion(&mut surface) != TickOutcome::Settled {
        return Err(anyhow!("layout was cancelled before it settled"));
    }

    fs::write(output, render_svg(&surface))
        .with_context(|| format!("failed to write SVG to {}", output.display()))?;
    info!(
        path = %output.display(),
        bubbles = surface.bubbles().len(),
        ticks = scheduler.ticks(),
        "chart exported"
    );
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    if let Some(output) = args.export_svg.as_deref() {
        return export_svg(&args, output);
    }

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1100.0, 760.0]),
        ..Default::default()
    };

    let Args { data, display, .. } = args;
    eframe::run_native(
        "country-bubbles",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::BubbleChartApp::new(
                cc,
                data.clone(),
                display,
                ChartConfig::default(),
            )))
        }),
    )
    .map_err(|error| anyhow!("failed to run the chart window: {error}"))
}
