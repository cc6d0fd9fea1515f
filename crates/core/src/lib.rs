//! cruisectl_core - Pure no_std control kernel for the cruisectl speed controller
//!
//! This crate contains the platform-agnostic control logic for a
//! discrete-time vehicle speed controller: mode arbitration, per-mode
//! speed regulation, and the tick entry points the scheduling layer calls.
//! It can be tested on host without any feature flags or async runtime.
//!
//! # Design Principles
//!
//! - **Zero cfg**: No `#[cfg(feature = ...)]` directives allowed
//! - **Pure no_std**: No std library dependencies
//! - **Kernel owns state**: `ControlState` is mutated only through the
//!   kernel entry points; collaborators get read-only snapshots
//!
//! # Modules
//!
//! - [`input`]: Request flags, input samples, and threshold normalization
//! - [`state`]: Control state, mode enum, and telemetry snapshot
//! - [`mode`]: Mode arbitration (button-event priority rules)
//! - [`regulator`]: Per-mode speed update policy
//! - [`kernel`]: Tick entry points and timing-domain gating
//! - [`scheduler`]: Timing-domain metadata and execution statistics

#![no_std]

pub mod input;
pub mod kernel;
pub mod mode;
pub mod regulator;
pub mod scheduler;
pub mod state;

pub use input::{ControlRequests, InputSample, REQUEST_THRESHOLD_RATIO};
pub use kernel::{ControlKernel, TickOutcome};
pub use mode::ModeArbiter;
pub use regulator::{SpeedRegulator, HAZARD_THRESHOLD_M};
pub use scheduler::{DomainMetadata, DomainRegistry, DomainStats, TickDomain, MAX_DOMAINS};
pub use state::{ControlMode, ControlState, TelemetrySnapshot};
