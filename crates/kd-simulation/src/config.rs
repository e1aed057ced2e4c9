use kd_core::Bounds;

use crate::error::{SimError, SimResult};
use crate::profile::TuningProfile;

/// Longest frame time a single tick will integrate, in seconds.
pub const DEFAULT_MAX_DT: f64 = 0.06;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for deterministic placement and respawn.
    pub seed: u64,
    /// Size of the playable area.
    pub bounds: Bounds,
    /// Upper clamp on per-tick elapsed time, in seconds.
    pub max_dt: f64,
    /// Maximum event log size (oldest events dropped when exceeded). 0 = unlimited.
    pub max_events: usize,
    /// Balance constants.
    pub profile: TuningProfile,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            bounds: Bounds::new(960.0, 640.0),
            max_dt: DEFAULT_MAX_DT,
            max_events: 0,
            profile: TuningProfile::classic(),
        }
    }
}

impl SimConfig {
    /// Set the RNG seed for deterministic simulation.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the size of the playable area.
    pub fn with_bounds(mut self, width: f64, height: f64) -> Self {
        self.bounds = Bounds::new(width, height);
        self
    }

    /// Set the per-tick elapsed time clamp.
    pub fn with_max_dt(mut self, max_dt: f64) -> Self {
        self.max_dt = max_dt;
        self
    }

    /// Set the maximum event log size (0 = unlimited).
    pub fn with_max_events(mut self, max: usize) -> Self {
        self.max_events = max;
        self
    }

    /// Set the tuning profile.
    pub fn with_profile(mut self, profile: TuningProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Check the configuration before a simulation is built from it.
    pub fn validate(&self) -> SimResult<()> {
        if !(self.max_dt.is_finite() && self.max_dt > 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "max_dt must be a positive number of seconds, got {}",
                self.max_dt
            )));
        }
        self.profile.validate()
    }
}
