//! Collider pool configuration.
//!
//! Provides the tunables a pool manager reads every step. Configuration can be
//! loaded from a TOML file; invalid values are corrected by [`ColliderConfig::validate`].

use mote_common::{ConfigError, Layer, MoteResult, SimulationSpace};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::stats::CharacterStats;

/// Default collider radius per unit of particle size.
pub const DEFAULT_SIZE_MULTIPLIER: f32 = 0.5;

/// Default tag for spawned proxies.
pub const DEFAULT_TAG: &str = "Untagged";

/// What happens to proxies that stay surplus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetentionPolicy {
    /// Keep every proxy ever created; the pool is a high-water-mark cache
    #[default]
    KeepAll,
    /// Destroy proxies that have been inactive for at least this many steps
    ExpireAfterIdleSteps(u32),
}

/// Collider pool configuration parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColliderConfig {
    /// Collider radius per unit of current particle size
    pub size_multiplier: f32,
    /// One collider per this many particles (1 = every particle)
    pub skip_rate: u32,
    /// Spawned colliders are triggers rather than solid
    pub is_trigger: bool,
    /// Tag given to spawned proxies
    pub tag: String,
    /// Collision layer index (0-31)
    pub layer: u8,
    /// Particle positions are already in world space
    pub world_space: bool,
    /// Do not parent spawned proxies to the manager
    pub no_parent: bool,
    /// Policy for surplus proxies
    pub retention: RetentionPolicy,
    /// Stats copied onto every spawned proxy
    pub stats: Option<CharacterStats>,
}

impl Default for ColliderConfig {
    fn default() -> Self {
        Self {
            size_multiplier: DEFAULT_SIZE_MULTIPLIER,
            skip_rate: 1,
            is_trigger: false,
            tag: DEFAULT_TAG.to_string(),
            layer: 0,
            world_space: false,
            no_parent: false,
            retention: RetentionPolicy::KeepAll,
            stats: None,
        }
    }
}

impl ColliderConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Loads configuration from `path`, surfacing read and parse failures.
    pub fn try_load_from<P: AsRef<Path>>(path: P) -> MoteResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        info!("Loaded collider config from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a specific path.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!("Collider config not found, using defaults");
            return Self::default();
        }

        Self::try_load_from(path).unwrap_or_else(|e| {
            warn!("Failed to load collider config: {e}");
            Self::default()
        })
    }

    /// Serializes the configuration to TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Corrects invalid values in place and returns what was wrong.
    ///
    /// A zero skip rate becomes 1, an out-of-range layer is clamped to 31 and
    /// a non-positive or non-finite size multiplier falls back to the default.
    pub fn validate(&mut self) -> Vec<ConfigError> {
        let mut issues = Vec::new();

        if self.skip_rate == 0 {
            self.skip_rate = 1;
            issues.push(ConfigError::ZeroSkipRate);
        }

        if let Err(issue) = Layer::new(self.layer) {
            issues.push(issue);
            self.layer = Layer::MAX;
        }

        if !self.size_multiplier.is_finite() || self.size_multiplier <= 0.0 {
            issues.push(ConfigError::InvalidSizeMultiplier(self.size_multiplier));
            self.size_multiplier = DEFAULT_SIZE_MULTIPLIER;
        }

        for issue in &issues {
            warn!("Invalid collider config corrected: {issue}");
        }

        issues
    }

    /// Collision layer for spawned proxies.
    #[must_use]
    pub const fn layer(&self) -> Layer {
        Layer::saturating(self.layer)
    }

    /// Skip rate as a stride, never below 1.
    #[must_use]
    pub fn stride(&self) -> usize {
        self.skip_rate.max(1) as usize
    }

    /// Space particle positions are reported in.
    #[must_use]
    pub const fn space(&self) -> SimulationSpace {
        SimulationSpace::from_world_flag(self.world_space)
    }
}
