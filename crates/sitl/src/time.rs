/// Time pacing mode for the simulation.
#[derive(Debug, Clone)]
pub enum TimeMode {
    /// Simulation advances in discrete steps of `step_size_us` microseconds
    /// as fast as the host allows.
    Lockstep { step_size_us: u64 },
    /// Simulation advances in discrete steps paced against wall-clock time,
    /// scaled by `factor` (2.0 = twice real time).
    Scaled { step_size_us: u64, factor: f32 },
}

impl TimeMode {
    /// Size of one simulation step in microseconds.
    pub fn step_size_us(&self) -> u64 {
        match self {
            TimeMode::Lockstep { step_size_us } => *step_size_us,
            TimeMode::Scaled { step_size_us, .. } => *step_size_us,
        }
    }
}

impl Default for TimeMode {
    fn default() -> Self {
        Self::Lockstep {
            step_size_us: 10_000,
        }
    }
}
