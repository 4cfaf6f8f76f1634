//! Conversion of simulated timesteps into absolute time.
//!
//! Models count progress in timesteps relative to their own start, while drivers
//! exchange start and end times as seconds since the Unix epoch.
//! The mapping between the two is owned by the caller and supplied as a [`TimeConverter`].

use crate::errors::{BmiError, BmiResult};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// A time value, either a simulated timestep or seconds since the Unix epoch.
pub type Time = f64;

/// Maps a simulated timestep onto seconds since the Unix epoch.
pub trait TimeConverter: Debug + Send + Sync {
    fn unixtime(&self, timestep: Time) -> BmiResult<Time>;
}

/// Linear mapping from timesteps to unix time
///
/// Timestep 0 maps onto `origin` and each subsequent timestep adds
/// `seconds_per_timestep` seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpochConverter {
    /// Unix time of timestep 0
    /// unit: s
    pub origin: Time,
    /// Length of a single timestep
    /// unit: s
    pub seconds_per_timestep: Time,
}

impl EpochConverter {
    pub fn new(origin: Time, seconds_per_timestep: Time) -> Self {
        Self {
            origin,
            seconds_per_timestep,
        }
    }
}

impl Default for EpochConverter {
    /// Timesteps are seconds since the epoch
    fn default() -> Self {
        Self::new(0.0, 1.0)
    }
}

impl TimeConverter for EpochConverter {
    fn unixtime(&self, timestep: Time) -> BmiResult<Time> {
        let unixtime = self.origin + timestep * self.seconds_per_timestep;
        if unixtime.is_finite() {
            Ok(unixtime)
        } else {
            Err(BmiError::TimeConversion(format!(
                "timestep {} does not map onto a finite unix time",
                timestep
            )))
        }
    }
}
