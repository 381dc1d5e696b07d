//! Engine configuration.
//!
//! Values are opaque constants to the engine: cost rates, transfer durations,
//! search ceilings and centrality options. They come from built-in defaults,
//! an optional JSON file, and a handful of `FLIGHTNET_*` environment
//! overrides, in that order of precedence.

use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Environment variable overriding [`EngineConfig::cost_per_km`].
pub const ENV_COST_PER_KM: &str = "FLIGHTNET_COST_PER_KM";
/// Environment variable overriding [`EngineConfig::max_stops`].
pub const ENV_MAX_STOPS: &str = "FLIGHTNET_MAX_STOPS";
/// Environment variable overriding [`EngineConfig::default_transfer_minutes`].
pub const ENV_DEFAULT_TRANSFER: &str = "FLIGHTNET_DEFAULT_TRANSFER_MINUTES";
/// Environment variable overriding [`EngineConfig::international_transfer_minutes`].
pub const ENV_INTERNATIONAL_TRANSFER: &str = "FLIGHTNET_INTERNATIONAL_TRANSFER_MINUTES";

/// Top-level configuration consumed by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Monetary cost charged per kilometre flown.
    pub cost_per_km: f64,
    /// Average cruise speed used to turn distance into flight time.
    pub cruise_speed_kmh: f64,
    /// Transfer duration at a domestic stop, in minutes.
    pub default_transfer_minutes: u32,
    /// Transfer duration at an international stop, in minutes.
    pub international_transfer_minutes: u32,
    /// Hard ceiling on stops for k-shortest enumeration.
    pub max_stops: usize,
    /// Default number of alternatives returned by route and hub searches.
    pub default_k_paths: usize,
    /// Default number of hubs returned by `top_hubs`.
    pub top_hubs_count: usize,
    /// Upper bound on simple paths enumerated per k-shortest request.
    pub path_scan_limit: usize,
    pub centrality: CentralityConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cost_per_km: 0.1,
            cruise_speed_kmh: 800.0,
            default_transfer_minutes: 90,
            international_transfer_minutes: 120,
            max_stops: 3,
            default_k_paths: 5,
            top_hubs_count: 20,
            path_scan_limit: 1000,
            centrality: CentralityConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a JSON file. Missing fields take defaults.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        debug!(path = %path.display(), "loaded engine configuration");
        Ok(config)
    }

    /// Apply `FLIGHTNET_*` environment overrides on top of this configuration.
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Some(rate) = env_value::<f64>(ENV_COST_PER_KM)? {
            self.cost_per_km = rate;
        }
        if let Some(stops) = env_value::<usize>(ENV_MAX_STOPS)? {
            self.max_stops = stops;
        }
        if let Some(minutes) = env_value::<u32>(ENV_DEFAULT_TRANSFER)? {
            self.default_transfer_minutes = minutes;
        }
        if let Some(minutes) = env_value::<u32>(ENV_INTERNATIONAL_TRANSFER)? {
            self.international_transfer_minutes = minutes;
        }
        self.validate()?;
        Ok(self)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.cost_per_km.is_finite() || self.cost_per_km <= 0.0 {
            return Err(invalid(format!(
                "cost_per_km must be positive, got {}",
                self.cost_per_km
            )));
        }
        if !self.cruise_speed_kmh.is_finite() || self.cruise_speed_kmh <= 0.0 {
            return Err(invalid(format!(
                "cruise_speed_kmh must be positive, got {}",
                self.cruise_speed_kmh
            )));
        }
        if self.path_scan_limit == 0 {
            return Err(invalid("path_scan_limit must be at least 1".to_string()));
        }
        self.centrality.pagerank.validate()
    }

    /// Domestic transfer duration in hours.
    pub fn default_transfer_hours(&self) -> f64 {
        f64::from(self.default_transfer_minutes) / 60.0
    }

    /// International transfer duration in hours.
    pub fn international_transfer_hours(&self) -> f64 {
        f64::from(self.international_transfer_minutes) / 60.0
    }

    /// Transfer duration in hours for a stop of the given kind.
    pub fn transfer_hours(&self, international: bool) -> f64 {
        if international {
            self.international_transfer_hours()
        } else {
            self.default_transfer_hours()
        }
    }
}

/// Options controlling the centrality analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CentralityConfig {
    /// Divide betweenness by (N-1)(N-2).
    pub betweenness_normalized: bool,
    /// Scale closeness by the fraction of reachable nodes (Wasserman-Faust).
    pub closeness_wf_improved: bool,
    pub pagerank: PageRankConfig,
}

impl Default for CentralityConfig {
    fn default() -> Self {
        Self {
            betweenness_normalized: true,
            closeness_wf_improved: true,
            pagerank: PageRankConfig::default(),
        }
    }
}

/// `PageRank` power-iteration settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageRankConfig {
    /// Probability of following a link rather than teleporting.
    pub damping: f64,
    /// Maximum iterations before giving up on convergence.
    pub max_iterations: usize,
    /// Per-node convergence tolerance; iteration stops once the L1 change
    /// drops below `N * tolerance`.
    pub tolerance: f64,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 100,
            tolerance: 1e-6,
        }
    }
}

impl PageRankConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.damping > 0.0 && self.damping < 1.0) {
            return Err(invalid(format!(
                "pagerank damping must be in (0, 1), got {}",
                self.damping
            )));
        }
        if self.max_iterations == 0 {
            return Err(invalid(
                "pagerank max_iterations must be at least 1".to_string(),
            ));
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(invalid(format!(
                "pagerank tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

fn invalid(message: String) -> Error {
    Error::InvalidConfig { message }
}

fn env_value<T: FromStr>(name: &str) -> Result<Option<T>> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| invalid(format!("{name} has an invalid value: {raw}"))),
        Err(_) => Ok(None),
    }
}
