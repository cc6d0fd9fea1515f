//! Control state types
//!
//! The mutable state owned by the kernel, the operating-mode enum, and the
//! read-only snapshot handed to display and actuator collaborators.

/// Operating mode of the speed controller.
///
/// Exactly one mode is active at a time. Transitions happen only through
/// the arbitration priority rules; there are no timeout- or sensor-driven
/// mode changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlMode {
    /// Direct manual control with ambient drag.
    #[default]
    Normal,
    /// Manual control with drag disabled; speed held absent input.
    Cruise,
    /// Proximity-governed regulation toward the captured cruise target.
    Adaptive,
}

impl ControlMode {
    /// Get mode name for logging and telemetry
    pub fn name(&self) -> &'static str {
        match self {
            ControlMode::Normal => "Normal",
            ControlMode::Cruise => "Cruise",
            ControlMode::Adaptive => "Adaptive",
        }
    }
}

/// Mutable control state, owned exclusively by the kernel.
///
/// All three timing domains read-modify-write this through the kernel's
/// tick entry points; the cooperative scheduling model serializes those
/// calls, so the struct itself carries no locking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlState {
    /// Current commanded velocity in abstract units. Never negative;
    /// never exceeds `cruise_target` while in Adaptive mode.
    pub speed: u32,
    /// Active operating mode.
    pub mode: ControlMode,
    /// Speed captured at the moment of entering Adaptive mode, acting as
    /// an upper bound. Meaningless outside Adaptive.
    pub cruise_target: u32,
    /// Accelerate actuator indication, recomputed every tick.
    pub accel_indicator: bool,
    /// Brake actuator indication, recomputed every tick. Never asserted
    /// together with `accel_indicator`.
    pub brake_indicator: bool,
}

impl ControlState {
    /// Initial state at system start: stopped, Normal mode.
    pub const fn new() -> Self {
        Self {
            speed: 0,
            mode: ControlMode::Normal,
            cruise_target: 0,
            accel_indicator: false,
            brake_indicator: false,
        }
    }

    /// Set both actuator indications for this tick.
    pub(crate) fn set_indicators(&mut self, accel: bool, brake: bool) {
        self.accel_indicator = accel;
        self.brake_indicator = brake;
    }

    /// Read-only snapshot for the display/actuator layer.
    pub fn snapshot(&self) -> TelemetrySnapshot {
        TelemetrySnapshot {
            speed: self.speed,
            mode: self.mode,
            cruise_target: match self.mode {
                ControlMode::Adaptive => Some(self.cruise_target),
                _ => None,
            },
            accel_indicator: self.accel_indicator,
            brake_indicator: self.brake_indicator,
        }
    }
}

impl Default for ControlState {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only view of the kernel state for external collaborators.
///
/// The display layer owns formatting, persistence, and animation; it must
/// not mutate kernel state, which this copy type enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelemetrySnapshot {
    pub speed: u32,
    pub mode: ControlMode,
    /// Cruise target, populated only while in Adaptive mode.
    pub cruise_target: Option<u32>,
    pub accel_indicator: bool,
    pub brake_indicator: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = ControlState::new();
        assert_eq!(state.speed, 0);
        assert_eq!(state.mode, ControlMode::Normal);
        assert_eq!(state.cruise_target, 0);
        assert!(!state.accel_indicator);
        assert!(!state.brake_indicator);
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(ControlMode::Normal.name(), "Normal");
        assert_eq!(ControlMode::Cruise.name(), "Cruise");
        assert_eq!(ControlMode::Adaptive.name(), "Adaptive");
    }

    #[test]
    fn test_snapshot_hides_target_outside_adaptive() {
        let mut state = ControlState::new();
        state.speed = 7;
        state.cruise_target = 5;
        assert_eq!(state.snapshot().cruise_target, None);

        state.mode = ControlMode::Cruise;
        assert_eq!(state.snapshot().cruise_target, None);

        state.mode = ControlMode::Adaptive;
        assert_eq!(state.snapshot().cruise_target, Some(5));
        assert_eq!(state.snapshot().speed, 7);
    }
}
