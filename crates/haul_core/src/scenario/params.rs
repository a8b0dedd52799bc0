use std::path::{Path, PathBuf};

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::clock::{SimTime, ONE_HOUR_MIN};
use crate::dispatch::DispatchPolicyKind;

const DEFAULT_MINING_TIME_MIN: SimTime = ONE_HOUR_MIN;
const DEFAULT_MINING_TIME_MAX: SimTime = 5 * ONE_HOUR_MIN;
const DEFAULT_TRAVEL_TIME: SimTime = 30;
const DEFAULT_UNLOAD_TIME: SimTime = 5;
/// 72 hours.
const DEFAULT_HORIZON: SimTime = 72 * ONE_HOUR_MIN;

#[derive(Debug, thiserror::Error)]
pub enum ParamsError {
    #[error("mining time range is empty: min {min} > max {max}")]
    EmptyMiningRange { min: SimTime, max: SimTime },
    #[error("haul cycle can take zero minutes: mining, travel and unload times are all zero")]
    ZeroLengthCycle,
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Timing tunables consulted by the event handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Resource)]
pub struct HaulConfig {
    pub travel_time: SimTime,
    pub unload_time: SimTime,
    /// Events stamped later than this are never processed.
    pub horizon: SimTime,
}

impl Default for HaulConfig {
    fn default() -> Self {
        Self {
            travel_time: DEFAULT_TRAVEL_TIME,
            unload_time: DEFAULT_UNLOAD_TIME,
            horizon: DEFAULT_HORIZON,
        }
    }
}

/// Parameters for building a scenario. All durations are in minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HaulParams {
    pub num_trucks: usize,
    pub num_stations: usize,
    /// Random seed for reproducibility (optional; if None, seeded from entropy).
    pub seed: Option<u64>,
    pub mining_time_min: SimTime,
    pub mining_time_max: SimTime,
    pub travel_time: SimTime,
    pub unload_time: SimTime,
    pub horizon: SimTime,
    pub dispatch_policy: DispatchPolicyKind,
}

impl Default for HaulParams {
    fn default() -> Self {
        Self {
            num_trucks: 10,
            num_stations: 3,
            seed: None,
            mining_time_min: DEFAULT_MINING_TIME_MIN,
            mining_time_max: DEFAULT_MINING_TIME_MAX,
            travel_time: DEFAULT_TRAVEL_TIME,
            unload_time: DEFAULT_UNLOAD_TIME,
            horizon: DEFAULT_HORIZON,
            dispatch_policy: DispatchPolicyKind::default(),
        }
    }
}

impl HaulParams {
    pub fn new(num_trucks: usize, num_stations: usize) -> Self {
        Self {
            num_trucks,
            num_stations,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_mining_time(mut self, min: SimTime, max: SimTime) -> Self {
        self.mining_time_min = min;
        self.mining_time_max = max;
        self
    }

    /// Every mining cycle takes exactly `minutes`.
    pub fn with_fixed_mining_time(self, minutes: SimTime) -> Self {
        self.with_mining_time(minutes, minutes)
    }

    pub fn with_travel_time(mut self, minutes: SimTime) -> Self {
        self.travel_time = minutes;
        self
    }

    pub fn with_unload_time(mut self, minutes: SimTime) -> Self {
        self.unload_time = minutes;
        self
    }

    pub fn with_horizon(mut self, minutes: SimTime) -> Self {
        self.horizon = minutes;
        self
    }

    pub fn with_horizon_hours(self, hours: SimTime) -> Self {
        self.with_horizon(hours * ONE_HOUR_MIN)
    }

    pub fn with_dispatch_policy(mut self, policy: DispatchPolicyKind) -> Self {
        self.dispatch_policy = policy;
        self
    }

    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.mining_time_min > self.mining_time_max {
            return Err(ParamsError::EmptyMiningRange {
                min: self.mining_time_min,
                max: self.mining_time_max,
            });
        }
        // A cycle that can finish in zero minutes never advances the clock.
        if self.mining_time_min == 0 && self.travel_time == 0 && self.unload_time == 0 {
            return Err(ParamsError::ZeroLengthCycle);
        }
        Ok(())
    }

    pub fn config(&self) -> HaulConfig {
        HaulConfig {
            travel_time: self.travel_time,
            unload_time: self.unload_time,
            horizon: self.horizon,
        }
    }

    /// Parse and validate TOML; missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ParamsError> {
        let params: HaulParams = toml::from_str(source)?;
        params.validate()?;
        Ok(params)
    }
}

/// Load scenario parameters from a TOML file.
pub fn load_params(path: impl AsRef<Path>) -> Result<HaulParams, ParamsError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|source| ParamsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    HaulParams::from_toml_str(&source)
}
