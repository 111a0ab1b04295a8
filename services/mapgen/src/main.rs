//! Temperature map generator.
//!
//! One run of the pipeline: load station locations, fetch (or read) the
//! latest 1-minute temperature feed, interpolate onto the regional grid,
//! apply the cached land mask and write the rendered PNG.

mod pipeline;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use scattered_interp::InterpolationMethod;
use tempmap_common::region;

#[derive(Parser, Debug)]
#[command(name = "mapgen")]
#[command(about = "Regional temperature map generator")]
struct Args {
    /// Station location CSV
    #[arg(long, env = "STATION_FILE", default_value = "input/station_location.csv")]
    stations: PathBuf,

    /// Coastline polygons (GeoJSON)
    #[arg(long, env = "COAST_FILE", default_value = "input/coastline.geojson")]
    coastline: PathBuf,

    /// Land mask cache file
    #[arg(long, env = "MASK_CACHE", default_value = "input/land_mask.bin")]
    mask_cache: PathBuf,

    /// Read the temperature feed from a local file instead of fetching
    #[arg(long)]
    feed_file: Option<PathBuf>,

    /// Temperature feed URL
    #[arg(long, env = "FEED_URL", default_value = station_ingest::DEFAULT_FEED_URL)]
    feed_url: String,

    /// Feed request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout_secs: u64,

    /// Output directory for rendered maps
    #[arg(long, env = "OUTPUT_DIR", default_value = "output")]
    output_dir: PathBuf,

    /// Grid resolution (points per axis)
    #[arg(long, default_value_t = region::RESOLUTION_REFINED)]
    resolution: usize,

    /// Use the quick low-resolution grid
    #[arg(long)]
    quick: bool,

    /// Interpolation method: linear, nearest or cubic
    #[arg(long, default_value = "linear")]
    method: InterpolationMethod,

    /// Pixels per grid cell in the output image
    #[arg(long, default_value = "2")]
    cell_px: usize,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit JSON logs
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    if args.json_logs {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(level)
            .with_target(true)
            .json()
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    } else {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(level)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    }

    info!("Starting temperature map generation");

    let resolution = if args.quick {
        region::RESOLUTION_QUICK
    } else {
        args.resolution
    };

    let config = pipeline::PipelineConfig {
        stations: args.stations,
        coastline: args.coastline,
        mask_cache: args.mask_cache,
        feed_file: args.feed_file,
        feed_url: args.feed_url,
        timeout: Duration::from_secs(args.timeout_secs),
        output_dir: args.output_dir,
        resolution,
        method: args.method,
        cell_px: args.cell_px,
    };

    let output = pipeline::run(&config).await?;
    info!(output = %output.display(), "map written");
    Ok(())
}
