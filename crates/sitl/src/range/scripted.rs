//! Scripted range source
//!
//! Piecewise-constant range profile with optional Gaussian noise, suitable
//! for CI testing and deterministic scenario runs.

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::SimError;
use crate::range::RangeSource;

/// Configuration for the scripted range source.
#[derive(Debug, Clone)]
pub struct ScriptedRangeConfig {
    /// Reading noise standard deviation in meters.
    pub noise_m: f32,
    /// RNG seed for deterministic mode. None = random.
    pub seed: Option<u64>,
}

impl Default for ScriptedRangeConfig {
    fn default() -> Self {
        Self {
            noise_m: 0.0,
            seed: None,
        }
    }
}

/// One segment of the range profile: from `from_us` onward (until the next
/// segment starts) the sensor reads `range_m`.
#[derive(Debug, Clone, Copy)]
pub struct RangeSegment {
    /// Simulation time this segment takes effect, in microseconds.
    pub from_us: u64,
    /// Range reading in meters.
    pub range_m: f32,
}

/// Range source replaying a piecewise-constant profile.
pub struct ScriptedRange {
    segments: Vec<RangeSegment>,
    config: ScriptedRangeConfig,
    rng: StdRng,
    connected: bool,
}

impl ScriptedRange {
    /// Create a source from a profile. Segments are sorted by start time;
    /// the first segment's start is treated as time zero.
    pub fn new(
        mut segments: Vec<RangeSegment>,
        config: ScriptedRangeConfig,
    ) -> Result<Self, SimError> {
        if segments.is_empty() {
            return Err(SimError::EmptyRangeScript);
        }
        segments.sort_by_key(|segment| segment.from_us);
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            segments,
            config,
            rng,
            connected: false,
        })
    }

    /// A noiseless source reading a single constant range.
    pub fn constant(range_m: f32) -> Self {
        Self {
            segments: vec![RangeSegment {
                from_us: 0,
                range_m,
            }],
            config: ScriptedRangeConfig::default(),
            rng: StdRng::seed_from_u64(0),
            connected: false,
        }
    }

    /// Base reading for a simulation time (last segment at or before it).
    fn base_range(&self, sim_time_us: u64) -> f32 {
        let mut current = self.segments[0].range_m;
        for segment in &self.segments {
            if segment.from_us <= sim_time_us {
                current = segment.range_m;
            } else {
                break;
            }
        }
        current
    }

    /// Generate Gaussian noise using the Box-Muller transform.
    fn gaussian_noise(&mut self, stddev: f32) -> f32 {
        if stddev == 0.0 {
            return 0.0;
        }
        let u1: f32 = self.rng.gen::<f32>().max(f32::EPSILON);
        let u2: f32 = self.rng.gen();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f32::consts::PI * u2).cos();
        z * stddev
    }
}

impl std::fmt::Debug for ScriptedRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptedRange")
            .field("segments", &self.segments.len())
            .field("noise_m", &self.config.noise_m)
            .field("connected", &self.connected)
            .finish()
    }
}

#[async_trait]
impl RangeSource for ScriptedRange {
    fn source_type(&self) -> &'static str {
        "scripted"
    }

    async fn connect(&mut self) -> Result<(), SimError> {
        // Reset RNG on connect so reconnecting replays the same profile
        self.rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.connected = true;
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<(), SimError> {
        self.connected = false;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    async fn sample(&mut self, sim_time_us: u64) -> Result<f32, SimError> {
        if !self.connected {
            return Err(SimError::NotConnected("scripted range source"));
        }
        let noise = self.gaussian_noise(self.config.noise_m);
        Ok(self.base_range(sim_time_us) + noise)
    }
}
