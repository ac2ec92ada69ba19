//! Configuration loading and option resolution
//!
//! All settings can come from a TOML file, from command-line flags, or be
//! left to the built-in defaults that reproduce the reference behavior
//! (`frame_stats.csv` in, `profiler_metrics.png` out, 60-frame window).
//! Flags take precedence over the file.

use anyhow::{ensure, Context, Result};
use frame_stats::DEFAULT_WINDOW;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default input path, relative to the working directory
pub const DEFAULT_INPUT: &str = "frame_stats.csv";

/// Default output image path
pub const DEFAULT_IMAGE: &str = "profiler_metrics.png";

/// Default chart bitmap size in pixels
pub const DEFAULT_CHART_SIZE: (u32, u32) = (1400, 1000);

/// Application configuration (loaded from config.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub stats: StatsConfig,
    #[serde(default)]
    pub chart: ChartConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct InputConfig {
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    pub image: Option<PathBuf>,
    pub json: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StatsConfig {
    pub window: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ChartConfig {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}

/// Fully resolved settings for one report run
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOptions {
    pub input: PathBuf,
    pub image: PathBuf,
    pub json: Option<PathBuf>,
    pub window: usize,
    pub chart_size: (u32, u32),
}

/// Command-line values that override the config file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub json: Option<PathBuf>,
    pub window: Option<usize>,
}

impl ReportOptions {
    /// Merge flag overrides, file config, and defaults (in that order)
    pub fn resolve(overrides: Overrides, config: AppConfig) -> Result<Self> {
        let window = overrides
            .window
            .or(config.stats.window)
            .unwrap_or(DEFAULT_WINDOW);
        ensure!(window >= 1, "rolling window must be at least 1 frame");

        Ok(Self {
            input: overrides
                .input
                .or(config.input.file)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT)),
            image: overrides
                .output
                .or(config.output.image)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_IMAGE)),
            json: overrides.json.or(config.output.json),
            window,
            chart_size: (
                config.chart.width.unwrap_or(DEFAULT_CHART_SIZE.0),
                config.chart.height.unwrap_or(DEFAULT_CHART_SIZE.1),
            ),
        })
    }
}
