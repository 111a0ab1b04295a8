//! The end-to-end map generation pipeline.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use land_mask::MaskCache;
use map_renderer::MapStyle;
use scattered_interp::{interpolate, InterpolationMethod};
use station_ingest::Observations;
use tempmap_common::region;

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub stations: PathBuf,
    pub coastline: PathBuf,
    pub mask_cache: PathBuf,
    pub feed_file: Option<PathBuf>,
    pub feed_url: String,
    pub timeout: Duration,
    pub output_dir: PathBuf,
    pub resolution: usize,
    pub method: InterpolationMethod,
    pub cell_px: usize,
}

/// Run the pipeline once, returning the path of the written map.
pub async fn run(config: &PipelineConfig) -> Result<PathBuf> {
    let locations = station_ingest::load_locations(&config.stations)
        .with_context(|| format!("loading {}", config.stations.display()))?;

    let feed = match &config.feed_file {
        Some(path) => {
            info!(path = %path.display(), "reading feed from file");
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
        }
        None => station_ingest::fetch_feed(&config.feed_url, config.timeout)
            .await
            .context("fetching temperature feed")?,
    };
    let observations = station_ingest::parse_readings(&feed, &locations)?;

    // The timestamp names the output file and is drawn on the map, so a
    // feed carrying a malformed one fails here rather than producing a
    // mislabelled artifact.
    let observed_at = observations
        .datetime()
        .with_context(|| format!("feed timestamp {:?} is not yyyymmddHHMM", observations.timestamp))?;
    info!(observed_at = %observed_at, "feed observation time");

    let (grid, field) = interpolate(
        &observations.stations,
        region::REGION_BBOX,
        config.resolution,
        config.method,
    )?;

    let polygons = land_mask::load_polygons(&config.coastline)
        .with_context(|| format!("loading {}", config.coastline.display()))?;
    let mask = MaskCache::new(&config.mask_cache).get(&polygons, &grid)?;
    let masked = field.masked(mask.cells());

    let style = MapStyle {
        cell_px: config.cell_px,
        ..MapStyle::default()
    };
    let png = map_renderer::render_map(
        &grid,
        &masked,
        &observations.stations,
        &observations.timestamp,
        &style,
    )?;

    let output = write_map(&config.output_dir, &observations, &png)?;
    Ok(output)
}

/// Atomically place the rendered PNG in the output directory.
fn write_map(output_dir: &Path, observations: &Observations, png: &[u8]) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("creating {}", output_dir.display()))?;

    let output = output_dir.join(format!("HK_temp_map_{}.png", observations.timestamp));
    let tmp = output.with_extension("png.tmp");
    fs::write(&tmp, png).with_context(|| format!("writing {}", tmp.display()))?;
    fs::rename(&tmp, &output)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATIONS: &str = "\u{feff}AutomaticWeatherStation_en,GeometryLongitude,GeometryLatitude\n\
        The Peak,114.1497,22.2642\n\
        Sha Tin,114.2097,22.4025\n\
        Ta Kwu Ling,114.1567,22.5286\n\
        Cheung Chau,114.0267,22.2011\n";

    const FEED: &str = "Date time,Automatic Weather Station,Air Temperature(degree Celsius)\n\
        202601171030,The Peak,16.5\n\
        202601171030,Sha Tin,19.2\n\
        202601171030,Ta Kwu Ling,18.0\n\
        202601171030,Cheung Chau,N/A\n";

    const COAST: &str = r#"{
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": {},
            "geometry": {
                "type": "Polygon",
                "coordinates": [[
                    [113.8, 22.15], [114.4, 22.15], [114.4, 22.55], [113.8, 22.55], [113.8, 22.15]
                ]]
            }
        }]
    }"#;

    fn config(dir: &Path) -> PipelineConfig {
        PipelineConfig {
            stations: dir.join("stations.csv"),
            coastline: dir.join("coast.geojson"),
            mask_cache: dir.join("mask.bin"),
            feed_file: Some(dir.join("feed.csv")),
            feed_url: String::new(),
            timeout: Duration::from_secs(1),
            output_dir: dir.join("output"),
            resolution: 20,
            method: InterpolationMethod::Linear,
            cell_px: 2,
        }
    }

    #[tokio::test]
    async fn test_pipeline_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        fs::write(&config.stations, STATIONS).unwrap();
        fs::write(config.feed_file.as_ref().unwrap(), FEED).unwrap();
        fs::write(&config.coastline, COAST).unwrap();

        let output = run(&config).await.unwrap();
        assert_eq!(
            output.file_name().unwrap(),
            "HK_temp_map_202601171030.png"
        );
        let bytes = fs::read(&output).unwrap();
        assert_eq!(&bytes[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);

        // the mask cache was persisted for the next run
        assert!(config.mask_cache.exists());
        let again = run(&config).await.unwrap();
        assert_eq!(again, output);
    }

    #[tokio::test]
    async fn test_pipeline_rejects_malformed_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        fs::write(&config.stations, STATIONS).unwrap();
        let feed = "Date time,Automatic Weather Station,Air Temperature(degree Celsius)\n\
            17-01-2026,The Peak,16.5\n\
            17-01-2026,Sha Tin,19.2\n\
            17-01-2026,Ta Kwu Ling,18.0\n";
        fs::write(config.feed_file.as_ref().unwrap(), feed).unwrap();
        fs::write(&config.coastline, COAST).unwrap();

        let err = run(&config).await.unwrap_err();
        assert!(err.to_string().contains("yyyymmddHHMM"), "{err}");
    }

    #[tokio::test]
    async fn test_pipeline_fails_without_enough_readings() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        fs::write(&config.stations, STATIONS).unwrap();
        // only two readable temperatures
        let feed = "Date time,Automatic Weather Station,Air Temperature(degree Celsius)\n\
            202601171030,The Peak,16.5\n\
            202601171030,Sha Tin,19.2\n\
            202601171030,Ta Kwu Ling,N/A\n";
        fs::write(config.feed_file.as_ref().unwrap(), feed).unwrap();
        fs::write(&config.coastline, COAST).unwrap();

        assert!(run(&config).await.is_err());
    }
}
