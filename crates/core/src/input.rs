//! Control input sampling
//!
//! This module defines the per-tick input sample consumed by the kernel:
//! - Request flags (accelerate, brake, cancel, set-cruise, set-adaptive)
//! - Threshold normalization (raw reading → boolean request)
//! - The proximity reading attached to each sample

use bitflags::bitflags;

/// Fraction of full scale a raw reading must reach to assert a request.
///
/// Mirrors the input hardware's "at least 4 of 5 volts" test. The kernel's
/// branches are threshold-gated, not magnitude-proportional, so this ratio
/// must be reproduced exactly by any input layer.
pub const REQUEST_THRESHOLD_RATIO: f32 = 0.8;

bitflags! {
    /// Discrete control requests decoded from the input layer.
    ///
    /// ACCEL and BRAKE are level-style (held while the control is pressed);
    /// CANCEL, SET_CRUISE, and SET_ADAPTIVE are edge-style button presses
    /// delivered through the mode-transition entry point.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ControlRequests: u8 {
        const ACCEL = 1 << 0;
        const BRAKE = 1 << 1;
        const CANCEL = 1 << 2;
        const SET_CRUISE = 1 << 3;
        const SET_ADAPTIVE = 1 << 4;
    }
}

impl ControlRequests {
    /// True if an explicit manual request (accelerate or brake) is asserted.
    pub fn manual_input(&self) -> bool {
        self.intersects(Self::ACCEL | Self::BRAKE)
    }
}

/// Convert a raw analog reading into a request assertion.
///
/// A request is asserted when the reading reaches 80% of full scale
/// (e.g. 4.0 on a 5.0 V input). Readings outside the nominal range are
/// passed through the comparison unmodified: negative readings never
/// assert, over-range readings always do.
///
/// # Arguments
///
/// * `raw` - Raw reading in input units (e.g. volts)
/// * `full_scale` - Full-scale value of the input (e.g. 5.0)
pub fn request_asserted(raw: f32, full_scale: f32) -> bool {
    raw >= REQUEST_THRESHOLD_RATIO * full_scale
}

/// One tick's worth of control input.
///
/// Produced fresh each tick by the input layer and consumed read-only by
/// the kernel; never retained across ticks.
#[derive(Debug, Clone, Copy)]
pub struct InputSample {
    /// Requests asserted during this tick.
    pub requests: ControlRequests,
    /// Most recent distance-sensor reading in meters.
    ///
    /// Only consulted while the kernel is in Adaptive mode. No validation
    /// is applied: negative readings count as hazard, NaN as clear.
    pub proximity_m: f32,
}

impl InputSample {
    /// Create a sample from decoded requests and a proximity reading.
    pub const fn new(requests: ControlRequests, proximity_m: f32) -> Self {
        Self {
            requests,
            proximity_m,
        }
    }

}
