//! Telemetry records
//!
//! Each applied tick produces one record for the display side: the
//! snapshot the kernel exposes plus when and from which domain it came.

use cruisectl_core::{TelemetrySnapshot, TickDomain};
use serde::Serialize;

/// One applied tick as seen by the display layer.
#[derive(Debug, Clone, Serialize)]
pub struct TickRecord {
    /// Simulation time of the tick in microseconds.
    pub sim_time_us: u64,
    /// Timing domain (or "event" for mode-transition deliveries).
    pub domain: &'static str,
    pub speed: u32,
    pub mode: &'static str,
    /// Cruise target, present only in Adaptive mode.
    pub cruise_target: Option<u32>,
    pub accel_indicator: bool,
    pub brake_indicator: bool,
}

impl TickRecord {
    /// Build a record from a domain tick.
    pub fn from_tick(sim_time_us: u64, domain: TickDomain, snapshot: &TelemetrySnapshot) -> Self {
        Self::build(sim_time_us, domain.name(), snapshot)
    }

    /// Build a record from a mode-transition event delivery.
    pub fn from_event(sim_time_us: u64, snapshot: &TelemetrySnapshot) -> Self {
        Self::build(sim_time_us, "event", snapshot)
    }

    fn build(sim_time_us: u64, domain: &'static str, snapshot: &TelemetrySnapshot) -> Self {
        Self {
            sim_time_us,
            domain,
            speed: snapshot.speed,
            mode: snapshot.mode.name(),
            cruise_target: snapshot.cruise_target,
            accel_indicator: snapshot.accel_indicator,
            brake_indicator: snapshot.brake_indicator,
        }
    }

    /// One-line human-readable form for console output.
    pub fn display_line(&self) -> String {
        let target = match self.cruise_target {
            Some(target) => format!(" target={target}"),
            None => String::new(),
        };
        let indicator = match (self.accel_indicator, self.brake_indicator) {
            (true, _) => " [accel]",
            (_, true) => " [brake]",
            _ => "",
        };
        format!(
            "t={:>8.3}s {:<8} mode={:<8} speed={}{}{}",
            self.sim_time_us as f64 / 1_000_000.0,
            self.domain,
            self.mode,
            self.speed,
            target,
            indicator,
        )
    }
}
