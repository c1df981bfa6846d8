//! Generation configuration.
//!
//! Provides the seed, grid sizes, and tuning values consumed by the
//! generation pipeline. Configuration can be loaded from and saved to a
//! TOML file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use lattice_common::ConfigError;
use lattice_grid::MIN_MAP_WIDTH;

/// Default configuration file name.
pub const CONFIG_FILE: &str = "lattice.toml";

/// Generation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    // === Seed ===
    /// Seed string, hashed into the master RNG seed
    pub seed: String,

    // === Grid Settings ===
    /// Chunks per region side
    pub region_width: usize,
    /// Regions per world side
    pub world_width: usize,
    /// World-space size of one chunk
    pub cell_size: f32,
    /// World-space gap left between neighbouring regions
    pub boundary_offset: f32,

    // === Exit Settings ===
    /// Chance that an un-negotiated edge receives any exits (0.0 - 1.0)
    pub exit_chance: f32,
    /// Upper bound on exits created on one edge
    pub max_exits_per_edge: usize,

    // === Path Settings ===
    /// Tie-acceptance probability for path search (0.0 - 1.0)
    pub path_randomness: f32,

    // === Zone Settings ===
    /// Random zone centers tried per region
    pub zone_attempts: usize,
    /// Height assigned to placed zones
    pub zone_height: f32,
    /// Link every placed zone to the nearest path
    pub connect_zones: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            seed: "lattice".to_string(),

            region_width: 16,
            world_width: 4,
            cell_size: 1.0,
            boundary_offset: 2.0,

            exit_chance: 0.75,
            max_exits_per_edge: 2,

            path_randomness: 0.3,

            zone_attempts: 12,
            zone_height: 1.0,
            connect_zones: true,
        }
    }
}

impl GenerationConfig {
    /// Load configuration from a specific path.
    /// Returns default config if the file doesn't exist or is invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file not found, using defaults");
            return Self::default();
        }

        match Self::try_load_from(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to load config file: {e}");
                Self::default()
            },
        }
    }

    /// Load configuration from a specific path, reporting any failure.
    pub fn try_load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        fs::write(path, contents)?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Reject values generation cannot run with, and clamp probabilities to `[0, 1]`.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        if self.region_width < MIN_MAP_WIDTH {
            return Err(ConfigError::Invalid {
                field: "region_width",
                reason: format!("must be at least {MIN_MAP_WIDTH}, got {}", self.region_width),
            });
        }
        if self.world_width < MIN_MAP_WIDTH {
            return Err(ConfigError::Invalid {
                field: "world_width",
                reason: format!("must be at least {MIN_MAP_WIDTH}, got {}", self.world_width),
            });
        }
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(ConfigError::Invalid {
                field: "cell_size",
                reason: format!("must be positive, got {}", self.cell_size),
            });
        }
        if !(self.boundary_offset.is_finite() && self.boundary_offset >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "boundary_offset",
                reason: format!("must not be negative, got {}", self.boundary_offset),
            });
        }

        self.exit_chance = clamp_unit(self.exit_chance);
        self.path_randomness = clamp_unit(self.path_randomness);
        Ok(())
    }

    /// World-space distance between the origins of neighbouring regions.
    #[must_use]
    pub fn region_span(&self) -> f32 {
        self.region_width as f32 * self.cell_size + self.boundary_offset
    }
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
