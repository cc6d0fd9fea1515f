//! Core types for timing-domain scheduling
//!
//! This module defines the fundamental types used by the scheduling layer:
//! - Domain identity (which of the three timing domains a tick belongs to)
//! - Domain metadata (cadence and execution budget)
//! - Domain statistics (runtime monitoring)

/// The three independent timing domains that invoke the kernel.
///
/// Mutual exclusion between domains is a kernel invariant enforced by the
/// tick gating rules, not by the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickDomain {
    /// Fires at a short fixed interval while accel/brake is held.
    Manual,
    /// Fires at a slow fixed interval; Normal mode only.
    Drag,
    /// Fires at a fixed interval while in Adaptive mode.
    Adaptive,
}

impl TickDomain {
    /// Get domain name for logging and telemetry
    pub fn name(&self) -> &'static str {
        match self {
            TickDomain::Manual => "manual",
            TickDomain::Drag => "drag",
            TickDomain::Adaptive => "adaptive",
        }
    }
}

/// Metadata describing one timing domain's cadence.
///
/// The scheduler owns these values; the kernel never reads them.
#[derive(Debug, Clone, Copy)]
pub struct DomainMetadata {
    /// Which domain this entry describes.
    pub domain: TickDomain,
    /// Target tick rate in Hz (1-400).
    ///
    /// `period_us()` divides by this value; callers registering
    /// runtime-supplied rates must range-check them first.
    pub rate_hz: u32,
    /// Execution time budget in microseconds.
    ///
    /// A tick exceeding this budget counts as a deadline miss. Set below
    /// the period to leave margin for the other domains.
    pub budget_us: u32,
}

impl DomainMetadata {
    /// Calculate the tick period in microseconds from the rate
    #[inline]
    pub const fn period_us(&self) -> u32 {
        1_000_000 / self.rate_hz
    }

    /// Check if execution time is within budget
    #[inline]
    pub const fn is_within_budget(&self, execution_us: u32) -> bool {
        execution_us <= self.budget_us
    }

    /// Check if period deviation exceeds tolerance (5%)
    #[inline]
    pub fn is_period_acceptable(&self, actual_period_us: u32) -> bool {
        let target = self.period_us();
        let tolerance = target / 20;
        let lower = target.saturating_sub(tolerance);
        let upper = target.saturating_add(tolerance);
        actual_period_us >= lower && actual_period_us <= upper
    }
}

/// Runtime statistics for a single timing domain.
///
/// Updated after each applied tick; skipped ticks (gating condition not
/// met) are not recorded.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomainStats {
    /// Last execution time in microseconds
    pub last_execution_us: u32,
    /// Average execution time in microseconds (exponential moving average,
    /// alpha = 0.1)
    pub avg_execution_us: u32,
    /// Maximum execution time observed in microseconds
    pub max_execution_us: u32,
    /// Number of ticks that exceeded their execution budget
    pub deadline_misses: u32,
    /// Time between the last two applied ticks in microseconds
    pub last_period_us: u32,
    /// Average deviation from the target period (exponential moving
    /// average, alpha = 0.1)
    pub avg_jitter_us: u32,
    /// Total number of applied ticks
    pub execution_count: u64,
}

impl DomainStats {
    /// Record one applied tick.
    ///
    /// # Arguments
    ///
    /// * `execution_us` - Measured execution time
    /// * `period_us` - Time since the previous applied tick
    /// * `target_period_us` - Expected period from the domain rate
    /// * `budget_us` - Execution budget from the domain metadata
    pub fn update(
        &mut self,
        execution_us: u32,
        period_us: u32,
        target_period_us: u32,
        budget_us: u32,
    ) {
        self.last_execution_us = execution_us;
        self.max_execution_us = self.max_execution_us.max(execution_us);
        self.avg_execution_us = ema(self.avg_execution_us, execution_us);

        self.last_period_us = period_us;
        let jitter = period_us.abs_diff(target_period_us);
        self.avg_jitter_us = ema(self.avg_jitter_us, jitter);

        if execution_us > budget_us {
            self.deadline_misses += 1;
        }
        self.execution_count = self.execution_count.saturating_add(1);
    }
}

/// Exponential moving average with alpha = 0.1, seeded by the first sample.
#[inline]
fn ema(avg: u32, sample: u32) -> u32 {
    if avg == 0 {
        sample
    } else {
        (avg * 9 + sample) / 10
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(rate_hz: u32) -> DomainMetadata {
        DomainMetadata {
            domain: TickDomain::Manual,
            rate_hz,
            budget_us: 2_000,
        }
    }

    #[test]
    fn test_period_from_rate() {
        assert_eq!(metadata(10).period_us(), 100_000);
        assert_eq!(metadata(1).period_us(), 1_000_000);
        assert_eq!(metadata(400).period_us(), 2_500);
    }

    #[test]
    fn test_budget_check() {
        let md = metadata(10);
        assert!(md.is_within_budget(2_000));
        assert!(!md.is_within_budget(2_001));
    }

    #[test]
    fn test_period_tolerance() {
        let md = metadata(10); // 100_000us +/- 5%
        assert!(md.is_period_acceptable(100_000));
        assert!(md.is_period_acceptable(95_000));
        assert!(md.is_period_acceptable(105_000));
        assert!(!md.is_period_acceptable(94_999));
        assert!(!md.is_period_acceptable(105_001));
    }

    #[test]
    fn test_stats_update() {
        let mut stats = DomainStats::default();
        stats.update(500, 100_000, 100_000, 2_000);
        assert_eq!(stats.last_execution_us, 500);
        assert_eq!(stats.avg_execution_us, 500);
        assert_eq!(stats.max_execution_us, 500);
        assert_eq!(stats.execution_count, 1);
        assert_eq!(stats.deadline_misses, 0);

        stats.update(1_000, 110_000, 100_000, 2_000);
        assert_eq!(stats.last_execution_us, 1_000);
        assert_eq!(stats.max_execution_us, 1_000);
        // EMA moves toward the new sample
        assert!(stats.avg_execution_us > 500 && stats.avg_execution_us < 1_000);
        assert_eq!(stats.execution_count, 2);
    }

    #[test]
    fn test_stats_deadline_miss() {
        let mut stats = DomainStats::default();
        stats.update(3_000, 100_000, 100_000, 2_000);
        assert_eq!(stats.deadline_misses, 1);
        stats.update(1_000, 100_000, 100_000, 2_000);
        assert_eq!(stats.deadline_misses, 1);
    }

    #[test]
    fn test_execution_count_saturates() {
        let mut stats = DomainStats {
            execution_count: u64::MAX,
            ..Default::default()
        };
        stats.update(500, 100_000, 100_000, 2_000);
        assert_eq!(stats.execution_count, u64::MAX);
    }

    #[test]
    fn test_domain_names() {
        assert_eq!(TickDomain::Manual.name(), "manual");
        assert_eq!(TickDomain::Drag.name(), "drag");
        assert_eq!(TickDomain::Adaptive.name(), "adaptive");
    }
}
