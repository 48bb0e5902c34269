//! Configuration management (config.toml)
//!
//! Handles loading, saving, and providing defaults for game settings.
//! Settings are stored in TOML format in the platform-specific config directory.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::background::BackgroundConfig;
use crate::render::RenderOptions;
use crate::runtime::RuntimeConfig;
use crate::track::TrackRecipe;

/// Errors raised while reading or writing a config file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Game configuration.
///
/// Contains all user-configurable settings organized into sections.
/// Every field has a default, so a partial or empty file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Track layout and road dimensions
    #[serde(default)]
    pub track: TrackConfig,
    /// Camera and screen settings
    #[serde(default)]
    pub camera: CameraConfig,
    /// Driving model tuning
    #[serde(default)]
    pub physics: PhysicsConfig,
    /// Background scroll bounds
    #[serde(default)]
    pub background: BackgroundConfig,
    /// Initial render toggles
    #[serde(default)]
    pub render: RenderOptions,
    /// Tick pacing
    #[serde(default)]
    pub timing: TimingConfig,
}

/// Track layout and road dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackConfig {
    /// Built-in layout to drive (default: classic)
    #[serde(default)]
    pub recipe: TrackRecipe,
    /// Length of one segment in world units (default: 80)
    #[serde(default = "default_segment_length")]
    pub segment_length: f64,
    /// Segments per stripe (default: 3)
    #[serde(default = "default_rumble_length")]
    pub rumble_length: usize,
    /// Road half-width in world units (default: 3000)
    #[serde(default = "default_road_width")]
    pub road_width: f64,
    /// Number of lanes (default: 3)
    #[serde(default = "default_lanes")]
    pub lanes: usize,
}

/// Camera and screen settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Horizontal field of view in degrees (default: 95)
    #[serde(default = "default_field_of_view")]
    pub field_of_view: f64,
    /// Camera height above the road (default: 2200)
    #[serde(default = "default_camera_height")]
    pub camera_height: f64,
    /// Segments drawn ahead of the camera (default: 100)
    #[serde(default = "default_draw_distance")]
    pub draw_distance: usize,
    /// Surface width in pixels (default: 1024)
    #[serde(default = "default_screen_width")]
    pub screen_width: f64,
    /// Surface height in pixels (default: 768)
    #[serde(default = "default_screen_height")]
    pub screen_height: f64,
}

/// Driving model tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Top speed in world units per tick (default: 100)
    #[serde(default = "default_max_speed")]
    pub max_speed: f64,
    /// How hard bends push the car outward (default: 0.3)
    #[serde(default = "default_centrifugal")]
    pub centrifugal: f64,
    /// Fastest reverse speed (default: -30)
    #[serde(default = "default_reverse_floor")]
    pub reverse_floor: f64,
    /// Lateral bound on open road (default: 2.0)
    #[serde(default = "default_road_limit")]
    pub road_limit: f64,
    /// Lateral bound inside a tunnel (default: 0.82)
    #[serde(default = "default_tunnel_limit")]
    pub tunnel_limit: f64,
}

/// Tick pacing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Target tick rate in Hz (default: 60)
    #[serde(default = "default_tick_rate")]
    pub tick_rate: u32,
    /// Longest frame interval fed to the simulation, in milliseconds (default: 100)
    #[serde(default = "default_max_delta_ms")]
    pub max_delta_ms: u64,
    /// Tick duration above which a warning is logged, in microseconds (default: 4000)
    #[serde(default = "default_cpu_budget_us")]
    pub cpu_budget_us: u64,
}

fn default_segment_length() -> f64 {
    80.0
}
fn default_rumble_length() -> usize {
    3
}
fn default_road_width() -> f64 {
    3000.0
}
fn default_lanes() -> usize {
    3
}

fn default_field_of_view() -> f64 {
    95.0
}
fn default_camera_height() -> f64 {
    2200.0
}
fn default_draw_distance() -> usize {
    100
}
fn default_screen_width() -> f64 {
    1024.0
}
fn default_screen_height() -> f64 {
    768.0
}

fn default_max_speed() -> f64 {
    100.0
}
fn default_centrifugal() -> f64 {
    0.3
}
fn default_reverse_floor() -> f64 {
    -30.0
}
fn default_road_limit() -> f64 {
    2.0
}
fn default_tunnel_limit() -> f64 {
    0.82
}

fn default_tick_rate() -> u32 {
    60
}
fn default_max_delta_ms() -> u64 {
    100
}
fn default_cpu_budget_us() -> u64 {
    4000
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            recipe: TrackRecipe::default(),
            segment_length: default_segment_length(),
            rumble_length: default_rumble_length(),
            road_width: default_road_width(),
            lanes: default_lanes(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            field_of_view: default_field_of_view(),
            camera_height: default_camera_height(),
            draw_distance: default_draw_distance(),
            screen_width: default_screen_width(),
            screen_height: default_screen_height(),
        }
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            max_speed: default_max_speed(),
            centrifugal: default_centrifugal(),
            reverse_floor: default_reverse_floor(),
            road_limit: default_road_limit(),
            tunnel_limit: default_tunnel_limit(),
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            tick_rate: default_tick_rate(),
            max_delta_ms: default_max_delta_ms(),
            cpu_budget_us: default_cpu_budget_us(),
        }
    }
}

impl TimingConfig {
    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            tick_rate: self.tick_rate.max(1),
            max_delta: Duration::from_millis(self.max_delta_ms),
            cpu_budget: Duration::from_micros(self.cpu_budget_us),
        }
    }
}

/// Returns the platform-specific configuration directory.
///
/// On Windows: `%APPDATA%\Roadster\config`
/// On macOS: `~/Library/Application Support/io.roadster.Roadster`
/// On Linux: `~/.config/roadster`
///
/// Returns `None` if the home directory cannot be determined.
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("io.roadster", "", "Roadster")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Full path of `config.toml`, if a config directory exists.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// Read and parse a config file.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Write a config file, creating its directory if needed.
pub fn save_to(path: &Path, config: &Config) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Loads the configuration from disk.
///
/// Reads `config.toml` from the platform's configuration directory.
/// Returns default values if the file doesn't exist or cannot be parsed.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("No config directory available, using defaults");
        return Config::default();
    };
    match load_from(&path) {
        Ok(config) => config,
        Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config at {}, using defaults", path.display());
            Config::default()
        }
        Err(e) => {
            tracing::warn!("Ignoring {}: {}", path.display(), e);
            Config::default()
        }
    }
}

/// Saves the configuration to disk.
///
/// Writes `config.toml` to the platform's configuration directory and
/// returns the path written. Returns `Ok(None)` when there is no config
/// directory on this platform.
pub fn save(config: &Config) -> Result<Option<PathBuf>, ConfigError> {
    let Some(path) = config_path() else {
        return Ok(None);
    };
    save_to(&path, config)?;
    Ok(Some(path))
}
