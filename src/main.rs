use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use plotters::prelude::*;
use rayon::prelude::*;
use tracing::info;

use wsra_charts::chart::BaseChartStyle;
use wsra_charts::{
    data, plot_base_chart, AppConfig, IntensityColormap, LandFeatures, Storm, TrackPlotOptions,
    WsraTrack,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the storm chart described by the configuration
    Render {
        #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
        config: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match &cli.command {
        Commands::Render { config } => render(config),
    }
}

fn render(config_path: &Path) -> Result<()> {
    let config = AppConfig::load_from_file(config_path)
        .with_context(|| format!("Failed to load configuration from {:?}", config_path))?;
    let extent = config.chart.extent;

    let land = LandFeatures::from_geojson(&config.input.land_geojson)?.clipped_to(&extent);

    // Resolve storm names up front so an unknown name fails before any
    // track file is touched.
    let track_inputs: Vec<(Storm, PathBuf)> = config
        .input
        .wsra_tracks
        .iter()
        .map(|(name, path)| Ok((Storm::from_name(name)?, path.clone())))
        .collect::<wsra_charts::Result<_>>()?;

    let value_column = config.input.value_column.as_deref();
    let tracks: Vec<WsraTrack> = track_inputs
        .par_iter()
        .map(|(storm, path)| data::load_wsra_track(path, *storm, value_column))
        .collect::<wsra_charts::Result<_>>()?;

    let best_track = config
        .input
        .best_track
        .as_ref()
        .map(|bt| data::load_best_track(&bt.points, &bt.path, &bt.windswath))
        .transpose()?;

    if let Some(parent) = config.chart.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create output directory {:?}", parent))?;
        }
    }

    let (width, height) = extent.figure_size(config.chart.width);
    let root = SVGBackend::new(&config.chart.output, (width, height)).into_drawing_area();

    let style = BaseChartStyle::default();
    let mut chart = plot_base_chart(&root, &extent, &land, &style)?;

    if let Some(best) = &best_track {
        chart.plot_best_track(best, &IntensityColormap::default())?;
    }

    let options = TrackPlotOptions {
        color_by_value: value_column.is_some(),
        ..Default::default()
    };
    for track in &tracks {
        chart.plot_wsra_track(track, &options)?;
    }
    chart.finish()?;
    root.present().context("Failed to write chart output")?;

    info!(
        output = %config.chart.output.display(),
        width,
        height,
        tracks = tracks.len(),
        "chart rendered"
    );
    Ok(())
}
