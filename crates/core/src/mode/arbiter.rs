//! Mode arbitration priority rules

use crate::input::{ControlRequests, InputSample};
use crate::state::{ControlMode, ControlState};

/// Resolves the next operating mode from the current mode and an input
/// sample.
///
/// Fixed priority, first match wins, no match leaves the mode unchanged:
///
/// 1. CANCEL → Normal
/// 2. SET_CRUISE → Cruise
/// 3. SET_ADAPTIVE → Adaptive, capturing `cruise_target` from the current
///    speed before any regulation runs this tick
///
/// Asserting SET_ADAPTIVE while already in Adaptive re-captures the target
/// from the current speed; the capture is never cumulative.
pub struct ModeArbiter;

impl ModeArbiter {
    /// Apply the priority rules to `state` for one arbitration pass.
    ///
    /// Returns the resolved mode when a request matched, `None` when the
    /// sample carried no mode request.
    pub fn step(state: &mut ControlState, sample: &InputSample) -> Option<ControlMode> {
        if sample.requests.contains(ControlRequests::CANCEL) {
            state.mode = ControlMode::Normal;
            Some(ControlMode::Normal)
        } else if sample.requests.contains(ControlRequests::SET_CRUISE) {
            state.mode = ControlMode::Cruise;
            Some(ControlMode::Cruise)
        } else if sample.requests.contains(ControlRequests::SET_ADAPTIVE) {
            // Target is read from speed before any regulation this tick
            state.cruise_target = state.speed;
            state.mode = ControlMode::Adaptive;
            Some(ControlMode::Adaptive)
        } else {
            None
        }
    }
}
