//! Per-mode speed regulation
//!
//! Given the active mode, the tick's input sample, and the control state,
//! computes the next speed value and both actuator indications. The
//! regulator is a pure computation: it never blocks, retries, or fails,
//! and invariant violations (negative speed, target overshoot) are
//! prevented structurally by the clamp and cap rules rather than by
//! validation.

use crate::input::{ControlRequests, InputSample};
use crate::state::{ControlMode, ControlState};

/// Proximity reading below this distance counts as a hazard in Adaptive
/// mode. Fixed literal in meters, not configurable.
pub const HAZARD_THRESHOLD_M: f32 = 0.3;

/// Per-mode speed update policy.
///
/// Acceleration and braking are mutually exclusive per tick: ACCEL always
/// takes priority over BRAKE within Normal and Cruise. Drag applies only
/// in Normal mode with neither explicit request present, and in Adaptive
/// mode drag is replaced entirely by the proximity law; manual requests
/// are not consulted there.
pub struct SpeedRegulator;

impl SpeedRegulator {
    /// Run one regulation pass for the current mode.
    pub fn step(state: &mut ControlState, sample: &InputSample) {
        match state.mode {
            ControlMode::Normal => Self::regulate_manual(state, sample.requests, true),
            ControlMode::Cruise => Self::regulate_manual(state, sample.requests, false),
            ControlMode::Adaptive => Self::regulate_adaptive(state, sample.proximity_m),
        }
    }

    /// Normal and Cruise share the manual branches; only the no-input
    /// behavior differs (drag vs. hold).
    fn regulate_manual(state: &mut ControlState, requests: ControlRequests, drag: bool) {
        if requests.contains(ControlRequests::ACCEL) {
            // No upper cap in manual modes
            state.speed += 1;
            state.set_indicators(true, false);
        } else if requests.contains(ControlRequests::BRAKE) {
            Self::decrement_clamped(state);
            state.set_indicators(false, true);
        } else if drag {
            // Ambient drag, driven by the slower drag domain
            if state.speed == 0 {
                // Clamp is authoritative: the decrement pins at zero and
                // forces the brake indication
                state.set_indicators(false, true);
            } else {
                state.speed -= 1;
                state.set_indicators(false, false);
            }
        } else {
            // Cruise hold: no change
            state.set_indicators(false, false);
        }
    }

    /// Proximity-governed deceleration/restoration law.
    ///
    /// Out-of-range readings flow through the comparison unmodified: a
    /// negative reading is a hazard, NaN compares false and counts as
    /// clear.
    fn regulate_adaptive(state: &mut ControlState, proximity_m: f32) {
        state.set_indicators(true, false);

        if proximity_m < HAZARD_THRESHOLD_M {
            // Hazard response, unconditional on the target relation
            state.speed = state.speed.saturating_sub(1);
        } else if state.speed < state.cruise_target {
            // Restoration toward the captured target
            state.speed += 1;
        }

        // The target is an upper bound
        if state.speed > state.cruise_target {
            state.speed = state.cruise_target;
        }
        if state.speed == 0 {
            state.set_indicators(false, true);
        }
    }

    /// Decrement with the zero clamp: a decrement that would go negative
    /// pins speed at zero instead, so a negative reading is never
    /// observable.
    fn decrement_clamped(state: &mut ControlState) {
        state.speed = state.speed.saturating_sub(1);
    }
}
