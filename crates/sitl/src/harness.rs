//! Simulation harness
//!
//! Orchestrates one simulated controller: owns the kernel, the three
//! timing-domain clocks, the input script, and the range source. The
//! harness only owns the cadences — which tick may apply is the kernel's
//! gating decision, so scheduling bugs here cannot violate the kernel
//! invariants.

use std::time::{Duration, Instant};

use cruisectl_core::{
    ControlKernel, DomainMetadata, DomainRegistry, DomainStats, InputSample, TelemetrySnapshot,
    TickDomain, TickOutcome,
};

use crate::config::SimConfig;
use crate::error::SimError;
use crate::range::RangeSource;
use crate::script::InputScript;
use crate::telemetry::TickRecord;
use crate::time::TimeMode;

/// Fixed iteration order of the timing domains within one step.
const DOMAINS: [TickDomain; 3] = [TickDomain::Manual, TickDomain::Drag, TickDomain::Adaptive];

/// Software-in-the-loop harness around one control kernel.
pub struct SimHarness {
    kernel: ControlKernel,
    registry: DomainRegistry,
    domain_ids: [usize; 3],
    next_due_us: [u64; 3],
    last_applied_us: [Option<u64>; 3],
    script: InputScript,
    range: Box<dyn RangeSource>,
    time_mode: TimeMode,
    budget_us: u32,
    sim_time_us: u64,
    records: Vec<TickRecord>,
}

impl SimHarness {
    /// Build a harness from a configuration, an input script, and a range
    /// source. The range source is connected on the first `run_for` call.
    pub fn new(
        config: &SimConfig,
        script: InputScript,
        range: Box<dyn RangeSource>,
    ) -> Result<Self, SimError> {
        config.validate()?;

        let mut registry = DomainRegistry::new();
        let rates = [
            config.manual_rate_hz,
            config.drag_rate_hz,
            config.adaptive_rate_hz,
        ];

        let mut domain_ids = [0usize; 3];
        let mut next_due_us = [0u64; 3];
        for (i, domain) in DOMAINS.iter().enumerate() {
            let metadata = DomainMetadata {
                domain: *domain,
                rate_hz: rates[i],
                budget_us: config.budget_us,
            };
            domain_ids[i] = registry.register(metadata).ok_or(SimError::RegistryFull)?;
            next_due_us[i] = metadata.period_us() as u64;
        }

        Ok(Self {
            kernel: ControlKernel::new(),
            registry,
            domain_ids,
            next_due_us,
            last_applied_us: [None; 3],
            script,
            range,
            time_mode: config.time_mode(),
            budget_us: config.budget_us,
            sim_time_us: 0,
            records: Vec::new(),
        })
    }

    /// Advance the simulation by one step: deliver due button presses,
    /// then offer each due domain tick to the kernel.
    pub async fn step(&mut self) -> Result<(), SimError> {
        self.sim_time_us += self.time_mode.step_size_us();

        let proximity_m = self.range.sample(self.sim_time_us).await?;
        let held = self.script.held_at(self.sim_time_us);

        // Button presses first: arbitration runs ahead of the domain
        // ticks, so no stale-mode tick can occur within this step.
        for press in self.script.take_due_presses(self.sim_time_us) {
            let sample = InputSample::new(press | held, proximity_m);
            if let Some(mode) = self.kernel.handle_event(&sample) {
                tracing::info!(
                    sim_time_us = self.sim_time_us,
                    mode = mode.name(),
                    speed = self.kernel.state().speed,
                    "mode transition"
                );
            }
            self.records
                .push(TickRecord::from_event(self.sim_time_us, &self.kernel.telemetry()));
        }

        for (i, domain) in DOMAINS.iter().enumerate() {
            let period_us = match self.registry.metadata(self.domain_ids[i]) {
                Some(metadata) => metadata.period_us() as u64,
                None => continue,
            };

            while self.sim_time_us >= self.next_due_us[i] {
                self.next_due_us[i] += period_us;

                let sample = InputSample::new(held, proximity_m);
                let started = Instant::now();
                let outcome = match domain {
                    TickDomain::Manual => self.kernel.manual_tick(&sample),
                    TickDomain::Drag => self.kernel.drag_tick(&sample),
                    TickDomain::Adaptive => self.kernel.adaptive_tick(&sample),
                };
                if outcome == TickOutcome::Skipped {
                    continue;
                }

                let execution_us = started.elapsed().as_micros() as u32;
                let actual_period = self
                    .last_applied_us[i]
                    .map(|last| (self.sim_time_us - last) as u32)
                    .unwrap_or(period_us as u32);
                self.registry
                    .record_execution(self.domain_ids[i], execution_us, actual_period);
                self.last_applied_us[i] = Some(self.sim_time_us);

                if execution_us > self.budget_us {
                    tracing::warn!(
                        domain = domain.name(),
                        execution_us,
                        budget_us = self.budget_us,
                        "tick exceeded execution budget"
                    );
                }

                self.records.push(TickRecord::from_tick(
                    self.sim_time_us,
                    *domain,
                    &self.kernel.telemetry(),
                ));
            }
        }

        Ok(())
    }

    /// Run the simulation until `duration_us` of sim time has elapsed,
    /// pacing against wall clock in Scaled mode.
    pub async fn run_for(&mut self, duration_us: u64) -> Result<(), SimError> {
        if !self.range.is_connected() {
            self.range.connect().await?;
        }

        while self.sim_time_us < duration_us {
            self.step().await?;

            if let TimeMode::Scaled {
                step_size_us,
                factor,
            } = self.time_mode
            {
                let wall_us = (step_size_us as f32 / factor) as u64;
                tokio::time::sleep(Duration::from_micros(wall_us)).await;
            }
        }
        Ok(())
    }

    /// Current simulation time in microseconds.
    pub fn sim_time_us(&self) -> u64 {
        self.sim_time_us
    }

    /// Read-only kernel access.
    pub fn kernel(&self) -> &ControlKernel {
        &self.kernel
    }

    /// Current kernel snapshot.
    pub fn telemetry(&self) -> TelemetrySnapshot {
        self.kernel.telemetry()
    }

    /// All records produced so far (applied ticks and event deliveries).
    pub fn records(&self) -> &[TickRecord] {
        &self.records
    }

    /// Execution statistics for a timing domain.
    pub fn domain_stats(&self, domain: TickDomain) -> Option<&DomainStats> {
        let i = DOMAINS.iter().position(|d| *d == domain)?;
        self.registry.stats(self.domain_ids[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::ScriptedRange;
    use cruisectl_core::{ControlMode, ControlRequests};

    fn harness(script: InputScript) -> SimHarness {
        SimHarness::new(
            &SimConfig::default(),
            script,
            Box::new(ScriptedRange::constant(2.0)),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_rejects_zero_rate_config() {
        // A zero domain rate must surface as an error from construction,
        // never as a division panic in the period calculation
        let mut config = SimConfig::default();
        config.drag_rate_hz = 0;
        let result = SimHarness::new(
            &config,
            InputScript::new(),
            Box::new(ScriptedRange::constant(2.0)),
        );
        assert!(matches!(result, Err(SimError::ConfigRange("drag_rate_hz"))));
    }

    #[tokio::test]
    async fn test_manual_cadence_and_drag() {
        // Accel held through five manual periods (100 ms each), then
        // released; the 1 Hz drag tick fires once at the end of the run.
        let script = InputScript::new().hold(0, 550_000, ControlRequests::ACCEL);
        let mut sim = harness(script);
        sim.run_for(1_000_000).await.unwrap();

        assert_eq!(sim.telemetry().speed, 4); // 5 accel ticks - 1 drag
        assert_eq!(
            sim.domain_stats(TickDomain::Manual).unwrap().execution_count,
            5
        );
        assert_eq!(
            sim.domain_stats(TickDomain::Drag).unwrap().execution_count,
            1
        );
        // Skipped ticks never produce records
        assert_eq!(sim.records().len(), 6);
    }

    #[tokio::test]
    async fn test_manual_hold_preempts_drag() {
        let script = InputScript::new().hold(0, 2_000_000, ControlRequests::ACCEL);
        let mut sim = harness(script);
        sim.run_for(1_000_000).await.unwrap();

        assert_eq!(sim.telemetry().speed, 10);
        assert_eq!(
            sim.domain_stats(TickDomain::Drag).unwrap().execution_count,
            0
        );
    }

    #[tokio::test]
    async fn test_cruise_disables_drag() {
        let script = InputScript::new().press(450_000, ControlRequests::SET_CRUISE);
        let mut sim = harness(script);
        sim.run_for(1_500_000).await.unwrap();

        assert_eq!(sim.telemetry().mode, ControlMode::Cruise);
        assert_eq!(sim.telemetry().speed, 0);
        assert_eq!(
            sim.domain_stats(TickDomain::Drag).unwrap().execution_count,
            0
        );
    }

    #[tokio::test]
    async fn test_adaptive_domain_inactive_outside_adaptive() {
        let mut sim = harness(InputScript::new());
        sim.run_for(1_000_000).await.unwrap();
        assert_eq!(
            sim.domain_stats(TickDomain::Adaptive)
                .unwrap()
                .execution_count,
            0
        );
    }

    #[tokio::test]
    async fn test_event_records_transition() {
        let script = InputScript::new().press(100_000, ControlRequests::SET_ADAPTIVE);
        let mut sim = harness(script);
        sim.run_for(200_000).await.unwrap();

        let event = sim
            .records()
            .iter()
            .find(|record| record.domain == "event")
            .expect("event record");
        assert_eq!(event.mode, "Adaptive");
        assert_eq!(event.cruise_target, Some(0));
    }
}
