//! Timing-domain metadata and execution statistics
//!
//! The kernel is cadence-agnostic: the scheduling layer owns all interval
//! values and invokes the tick entry points. This module provides the
//! types that layer uses to describe the three timing domains and to
//! track their execution behavior.
//!
//! # Components
//!
//! - [`types`]: Core types (TickDomain, DomainMetadata, DomainStats)
//! - [`registry`]: Instance-based domain registration and stats lookup

pub mod registry;
pub mod types;

pub use registry::{DomainRegistry, MAX_DOMAINS};
pub use types::{DomainMetadata, DomainStats, TickDomain};
