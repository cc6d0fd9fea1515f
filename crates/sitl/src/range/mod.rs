//! Distance-sensor simulation
//!
//! The kernel consumes one proximity reading per tick; this module
//! provides the pluggable source of those readings.

mod scripted;

use async_trait::async_trait;

pub use scripted::{RangeSegment, ScriptedRange, ScriptedRangeConfig};

use crate::error::SimError;

/// Pluggable source of proximity readings.
///
/// Implementations must be `Send + Sync` so sources can be stored as
/// `Box<dyn RangeSource>` inside the harness.
#[async_trait]
pub trait RangeSource: Send + Sync {
    /// Unique identifier for this source type (e.g. "scripted").
    fn source_type(&self) -> &'static str;

    /// Connect to the source.
    async fn connect(&mut self) -> Result<(), SimError>;

    /// Disconnect from the source.
    async fn disconnect(&mut self) -> Result<(), SimError>;

    /// Check if currently connected.
    fn is_connected(&self) -> bool;

    /// Produce the reading for the given simulation time, in meters.
    ///
    /// The value is handed to the kernel unvalidated, matching the sensor
    /// contract: negative readings count as hazard, NaN as clear.
    async fn sample(&mut self, sim_time_us: u64) -> Result<f32, SimError>;
}
