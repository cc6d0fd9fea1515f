//! Control kernel entry points
//!
//! The kernel owns the control state and exposes exactly the entry points
//! the scheduling layer calls: one per timing domain plus the
//! mode-transition path. The scheduler owns all cadence values; the kernel
//! only defines what happens on a tick and whether a tick from a given
//! domain may apply at all.
//!
//! # Timing domains
//!
//! - **Manual**: short fixed interval while ACCEL or BRAKE is held
//! - **Drag**: slow fixed interval, Normal mode only, preempted by any
//!   manual request within the same evaluation window
//! - **Adaptive**: fixed interval while in Adaptive mode, re-sampling
//!   proximity each tick
//!
//! Ticks are serialized by the single-threaded cooperative scheduler. A
//! host driving the kernel from multiple OS threads must wrap it in a
//! mutex to keep that guarantee.

use crate::input::InputSample;
use crate::mode::ModeArbiter;
use crate::regulator::SpeedRegulator;
use crate::state::{ControlMode, ControlState, TelemetrySnapshot};

/// Result of offering a tick to the kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The tick's domain was active; a regulation pass ran.
    Applied,
    /// The tick's gating condition did not hold; state is unchanged.
    Skipped,
}

/// The control kernel: arbitration, regulation, and domain gating around
/// a single exclusively-owned [`ControlState`].
#[derive(Debug)]
pub struct ControlKernel {
    state: ControlState,
}

impl ControlKernel {
    /// Create a kernel in the initial state (speed 0, Normal mode).
    pub const fn new() -> Self {
        Self {
            state: ControlState::new(),
        }
    }

    /// Borrow the current state read-only.
    pub fn state(&self) -> &ControlState {
        &self.state
    }

    /// Read-only snapshot for the display/actuator layer.
    pub fn telemetry(&self) -> TelemetrySnapshot {
        self.state.snapshot()
    }

    /// Mode-transition entry point, edge-triggered on button presses.
    ///
    /// Arbitration and the first regulation pass happen in the same
    /// logical step, so no stale-mode tick can occur: entering Adaptive
    /// immediately runs the proximity law against the sample's reading,
    /// and a manual request carried on the event regulates under the
    /// freshly resolved mode. A bare mode change with no manual input in
    /// Normal or Cruise does not regulate (drag stays on its own cadence).
    ///
    /// Returns the resolved mode when the sample carried a mode request.
    pub fn handle_event(&mut self, sample: &InputSample) -> Option<ControlMode> {
        let resolved = ModeArbiter::step(&mut self.state, sample);
        match self.state.mode {
            ControlMode::Adaptive => SpeedRegulator::step(&mut self.state, sample),
            _ if sample.requests.manual_input() => {
                SpeedRegulator::step(&mut self.state, sample)
            }
            _ => {}
        }
        resolved
    }

    /// Manual-domain tick: applies while ACCEL or BRAKE is held in Normal
    /// or Cruise mode. Manual requests are never consulted in Adaptive.
    pub fn manual_tick(&mut self, sample: &InputSample) -> TickOutcome {
        if self.state.mode == ControlMode::Adaptive || !sample.requests.manual_input() {
            return TickOutcome::Skipped;
        }
        SpeedRegulator::step(&mut self.state, sample);
        TickOutcome::Applied
    }

    /// Drag-domain tick: applies only in Normal mode with neither manual
    /// request asserted, so a concurrent manual hold preempts drag within
    /// the same evaluation window.
    pub fn drag_tick(&mut self, sample: &InputSample) -> TickOutcome {
        if self.state.mode != ControlMode::Normal || sample.requests.manual_input() {
            return TickOutcome::Skipped;
        }
        SpeedRegulator::step(&mut self.state, sample);
        TickOutcome::Applied
    }

    /// Adaptive-domain tick: applies whenever the mode is Adaptive,
    /// independent of manual input state.
    pub fn adaptive_tick(&mut self, sample: &InputSample) -> TickOutcome {
        if self.state.mode != ControlMode::Adaptive {
            return TickOutcome::Skipped;
        }
        SpeedRegulator::step(&mut self.state, sample);
        TickOutcome::Applied
    }
}

impl Default for ControlKernel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ControlRequests;

    fn held(requests: ControlRequests) -> InputSample {
        InputSample::new(requests, f32::MAX)
    }

    fn press(requests: ControlRequests, proximity_m: f32) -> InputSample {
        InputSample::new(requests, proximity_m)
    }

    #[test]
    fn test_scenario_accel_from_standstill() {
        // 5 manual ticks with accel held from speed 0 => speed 5
        let mut kernel = ControlKernel::new();
        for _ in 0..5 {
            assert_eq!(
                kernel.manual_tick(&held(ControlRequests::ACCEL)),
                TickOutcome::Applied
            );
        }
        assert_eq!(kernel.state().speed, 5);
    }

    #[test]
    fn test_scenario_single_drag_tick() {
        // speed 5, Normal, no input, one drag tick => speed 4
        let mut kernel = ControlKernel::new();
        for _ in 0..5 {
            kernel.manual_tick(&held(ControlRequests::ACCEL));
        }
        assert_eq!(
            kernel.drag_tick(&held(ControlRequests::empty())),
            TickOutcome::Applied
        );
        assert_eq!(kernel.state().speed, 4);
    }

    #[test]
    fn test_scenario_adaptive_stable_at_target() {
        // Transition to Adaptive at speed 5, clear proximity for 10 ticks
        // => stays at 5
        let mut kernel = ControlKernel::new();
        for _ in 0..5 {
            kernel.manual_tick(&held(ControlRequests::ACCEL));
        }
        kernel.handle_event(&press(ControlRequests::SET_ADAPTIVE, 0.5));
        assert_eq!(kernel.state().cruise_target, 5);
        for _ in 0..10 {
            kernel.adaptive_tick(&press(ControlRequests::empty(), 0.5));
        }
        assert_eq!(kernel.state().speed, 5);
    }

    #[test]
    fn test_scenario_hazard_then_restoration() {
        // speed 10, target 10: 3 hazard ticks => 7; 3 clear ticks => 10
        let mut kernel = ControlKernel::new();
        for _ in 0..10 {
            kernel.manual_tick(&held(ControlRequests::ACCEL));
        }
        kernel.handle_event(&press(ControlRequests::SET_ADAPTIVE, 0.5));
        for _ in 0..3 {
            kernel.adaptive_tick(&press(ControlRequests::empty(), 0.2));
        }
        assert_eq!(kernel.state().speed, 7);
        for _ in 0..3 {
            kernel.adaptive_tick(&press(ControlRequests::empty(), 0.5));
        }
        assert_eq!(kernel.state().speed, 10);
        assert_eq!(kernel.state().cruise_target, 10);
    }

    #[test]
    fn test_scenario_cancel_returns_to_normal() {
        let mut kernel = ControlKernel::new();
        kernel.handle_event(&press(ControlRequests::SET_ADAPTIVE, 0.5));
        assert_eq!(kernel.state().mode, ControlMode::Adaptive);
        let resolved = kernel.handle_event(&press(ControlRequests::CANCEL, 0.5));
        assert_eq!(resolved, Some(ControlMode::Normal));
        assert_eq!(kernel.state().mode, ControlMode::Normal);
    }

    #[test]
    fn test_drag_skipped_while_manual_input_held() {
        let mut kernel = ControlKernel::new();
        for _ in 0..3 {
            kernel.manual_tick(&held(ControlRequests::ACCEL));
        }
        assert_eq!(
            kernel.drag_tick(&held(ControlRequests::ACCEL)),
            TickOutcome::Skipped
        );
        assert_eq!(kernel.state().speed, 3);
    }

    #[test]
    fn test_drag_skipped_outside_normal() {
        let mut kernel = ControlKernel::new();
        kernel.handle_event(&press(ControlRequests::SET_CRUISE, f32::MAX));
        assert_eq!(
            kernel.drag_tick(&held(ControlRequests::empty())),
            TickOutcome::Skipped
        );

        kernel.handle_event(&press(ControlRequests::SET_ADAPTIVE, f32::MAX));
        assert_eq!(
            kernel.drag_tick(&held(ControlRequests::empty())),
            TickOutcome::Skipped
        );
    }

    #[test]
    fn test_manual_skipped_in_adaptive() {
        let mut kernel = ControlKernel::new();
        for _ in 0..4 {
            kernel.manual_tick(&held(ControlRequests::ACCEL));
        }
        kernel.handle_event(&press(ControlRequests::SET_ADAPTIVE, 0.5));
        assert_eq!(
            kernel.manual_tick(&held(ControlRequests::ACCEL)),
            TickOutcome::Skipped
        );
        assert_eq!(kernel.state().speed, 4);
    }

    #[test]
    fn test_manual_skipped_without_request() {
        let mut kernel = ControlKernel::new();
        assert_eq!(
            kernel.manual_tick(&held(ControlRequests::empty())),
            TickOutcome::Skipped
        );
    }

    #[test]
    fn test_adaptive_skipped_outside_adaptive() {
        let mut kernel = ControlKernel::new();
        assert_eq!(
            kernel.adaptive_tick(&press(ControlRequests::empty(), 0.1)),
            TickOutcome::Skipped
        );
        assert_eq!(kernel.state().speed, 0);
    }

    #[test]
    fn test_event_regulates_in_same_step_on_adaptive_entry() {
        // Entering Adaptive against a hazard reading decelerates
        // immediately; no stale-mode tick happens first.
        let mut kernel = ControlKernel::new();
        for _ in 0..5 {
            kernel.manual_tick(&held(ControlRequests::ACCEL));
        }
        kernel.handle_event(&press(ControlRequests::SET_ADAPTIVE, 0.1));
        assert_eq!(kernel.state().cruise_target, 5);
        assert_eq!(kernel.state().speed, 4);
    }

    #[test]
    fn test_event_without_manual_input_does_not_drag() {
        let mut kernel = ControlKernel::new();
        for _ in 0..5 {
            kernel.manual_tick(&held(ControlRequests::ACCEL));
        }
        // Cancel press alone must not trigger a drag decrement
        kernel.handle_event(&press(ControlRequests::CANCEL, f32::MAX));
        assert_eq!(kernel.state().speed, 5);
    }

    #[test]
    fn test_target_captured_once_per_entry() {
        let mut kernel = ControlKernel::new();
        for _ in 0..6 {
            kernel.manual_tick(&held(ControlRequests::ACCEL));
        }
        kernel.handle_event(&press(ControlRequests::SET_ADAPTIVE, 0.5));
        assert_eq!(kernel.state().cruise_target, 6);

        // Subsequent adaptive ticks in the same session never re-capture
        for _ in 0..3 {
            kernel.adaptive_tick(&press(ControlRequests::empty(), 0.2));
        }
        assert_eq!(kernel.state().cruise_target, 6);
        assert_eq!(kernel.state().speed, 3);

        // A fresh entry event re-captures from the current speed
        kernel.handle_event(&press(ControlRequests::SET_ADAPTIVE, 0.5));
        assert_eq!(kernel.state().cruise_target, 3);
    }

    #[test]
    fn test_telemetry_reflects_state() {
        let mut kernel = ControlKernel::new();
        for _ in 0..5 {
            kernel.manual_tick(&held(ControlRequests::ACCEL));
        }
        kernel.handle_event(&press(ControlRequests::SET_ADAPTIVE, 0.5));

        let snapshot = kernel.telemetry();
        assert_eq!(snapshot.speed, 5);
        assert_eq!(snapshot.mode, ControlMode::Adaptive);
        assert_eq!(snapshot.cruise_target, Some(5));
        assert!(snapshot.accel_indicator);
    }
}
