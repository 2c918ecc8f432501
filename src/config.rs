//! Configuration loading for MargaNav

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Main configuration structure
#[derive(Clone, Debug, Deserialize, Default)]
pub struct MargaConfig {
    #[serde(default)]
    pub device: DeviceConfig,
    #[serde(default)]
    pub sensor: SensorConfig,
    #[serde(default)]
    pub drive: DriveConfig,
    #[serde(default)]
    pub explorer: ExplorerConfig,
}

/// Hardware rig selection
#[derive(Clone, Debug, Deserialize)]
pub struct DeviceConfig {
    /// Rig type: currently only "mock" (scripted corridor)
    #[serde(default = "default_rig_type")]
    pub rig_type: String,
}

/// Sweep sensor settings
#[derive(Clone, Debug, Deserialize)]
pub struct SensorConfig {
    /// Number of recent swipes retained for crossroad analysis (default: 32)
    #[serde(default = "default_swipe_history")]
    pub swipe_history: usize,

    /// Consecutive strictly-widening swipes that flag a crossroad approach (default: 3)
    #[serde(default = "default_widening_run")]
    pub widening_run: usize,

    /// Control loop tick interval in milliseconds (default: 10)
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,
}

/// Drive and line-centering settings
#[derive(Clone, Debug, Deserialize)]
pub struct DriveConfig {
    /// Cruise speed in encoder pulses per second (default: 80)
    #[serde(default = "default_cruise_speed")]
    pub cruise_speed: i32,

    /// PID proportional gain (default: 0.5)
    #[serde(default = "default_pid_gain")]
    pub pid_gain: f32,

    /// PID integral time (default: 10.0)
    #[serde(default = "default_pid_ti")]
    pub pid_ti: f32,

    /// PID derivative time (default: 15.0)
    #[serde(default = "default_pid_td")]
    pub pid_td: f32,

    /// PID update rate in Hz (default: 100.0)
    #[serde(default = "default_pid_update_rate")]
    pub pid_update_rate: f32,
}

/// Maze exploration settings
#[derive(Clone, Debug, Deserialize)]
pub struct ExplorerConfig {
    /// Maximum number of crossroads the maze may contain (default: 100)
    #[serde(default = "default_max_crossroads")]
    pub max_crossroads: usize,

    /// Seed for the random unexplored-exit choice; omit for entropy
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            rig_type: default_rig_type(),
        }
    }
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            swipe_history: default_swipe_history(),
            widening_run: default_widening_run(),
            tick_interval_ms: default_tick_interval(),
        }
    }
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            cruise_speed: default_cruise_speed(),
            pid_gain: default_pid_gain(),
            pid_ti: default_pid_ti(),
            pid_td: default_pid_td(),
            pid_update_rate: default_pid_update_rate(),
        }
    }
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            max_crossroads: default_max_crossroads(),
            rng_seed: None,
        }
    }
}

// Default value functions
fn default_rig_type() -> String {
    "mock".to_string()
}
fn default_swipe_history() -> usize {
    32
}
fn default_widening_run() -> usize {
    3
}
fn default_tick_interval() -> u64 {
    10
}
fn default_cruise_speed() -> i32 {
    80
}
fn default_pid_gain() -> f32 {
    0.5
}
fn default_pid_ti() -> f32 {
    10.0
}
fn default_pid_td() -> f32 {
    15.0
}
fn default_pid_update_rate() -> f32 {
    100.0
}
fn default_max_crossroads() -> usize {
    100
}

impl MargaConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;
        let config: MargaConfig = toml::from_str(&content)?;
        Ok(config)
    }
}
