//! Simulation configuration
//!
//! The harness owns every cadence value the kernel is agnostic to: the
//! three domain rates, the lockstep quantum, and the optional wall-clock
//! pacing factor. The hazard threshold is deliberately absent — it is a
//! fixed kernel literal, not configuration.

use serde::Deserialize;

use crate::error::SimError;
use crate::time::TimeMode;

/// Configuration for a simulation run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    /// Manual domain rate in Hz (accel/brake held).
    pub manual_rate_hz: u32,
    /// Drag domain rate in Hz (ambient decay, Normal mode).
    pub drag_rate_hz: u32,
    /// Adaptive domain rate in Hz (proximity law).
    pub adaptive_rate_hz: u32,
    /// Per-tick execution budget in microseconds.
    pub budget_us: u32,
    /// Simulation step size in microseconds.
    pub step_size_us: u64,
    /// Wall-clock pacing factor. `None` runs lockstep as fast as possible;
    /// `Some(1.0)` paces at real time, `Some(2.0)` at double speed.
    pub time_scale: Option<f32>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            manual_rate_hz: 10,
            drag_rate_hz: 1,
            adaptive_rate_hz: 5,
            budget_us: 2_000,
            step_size_us: 10_000, // 100 Hz
            time_scale: None,
        }
    }
}

/// Valid domain rate range in Hz. A zero rate has no period; rates above
/// the ceiling round to a zero-microsecond period.
const RATE_RANGE_HZ: core::ops::RangeInclusive<u32> = 1..=400;

impl SimConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, SimError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every cadence value has a representable period.
    ///
    /// Rates are runtime input here, not compile-time constants, so the
    /// range check the firmware does by convention happens on load.
    pub fn validate(&self) -> Result<(), SimError> {
        if !RATE_RANGE_HZ.contains(&self.manual_rate_hz) {
            return Err(SimError::ConfigRange("manual_rate_hz"));
        }
        if !RATE_RANGE_HZ.contains(&self.drag_rate_hz) {
            return Err(SimError::ConfigRange("drag_rate_hz"));
        }
        if !RATE_RANGE_HZ.contains(&self.adaptive_rate_hz) {
            return Err(SimError::ConfigRange("adaptive_rate_hz"));
        }
        if self.step_size_us == 0 {
            return Err(SimError::ConfigRange("step_size_us"));
        }
        Ok(())
    }

    /// Load a configuration from a TOML file.
    pub fn load(path: &std::path::Path) -> Result<Self, SimError> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    /// Time pacing mode derived from the step size and scale factor.
    pub fn time_mode(&self) -> TimeMode {
        match self.time_scale {
            Some(factor) => TimeMode::Scaled {
                step_size_us: self.step_size_us,
                factor,
            },
            None => TimeMode::Lockstep {
                step_size_us: self.step_size_us,
            },
        }
    }
}
