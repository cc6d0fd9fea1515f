//! cruisectl_sitl - Software-in-the-loop harness for the cruisectl kernel
//!
//! This crate is the host-side counterpart of every external collaborator
//! the kernel contracts with: it owns the three timing domains and their
//! cadences, scripts the input layer, simulates the distance sensor, and
//! collects telemetry for the display side.

pub mod config;
pub mod error;
pub mod harness;
pub mod range;
pub mod script;
pub mod telemetry;
pub mod time;

pub use config::SimConfig;
pub use error::SimError;
pub use harness::SimHarness;
pub use range::{RangeSegment, RangeSource, ScriptedRange, ScriptedRangeConfig};
pub use script::InputScript;
pub use telemetry::TickRecord;
pub use time::TimeMode;
