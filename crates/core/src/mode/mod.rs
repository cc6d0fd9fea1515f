//! Mode arbitration
//!
//! Resolves the active operating mode from discrete button-style events.
//! The arbiter runs ahead of the regulator within the same logical step,
//! so the regulator always observes the post-arbitration mode and cruise
//! target for that tick.

mod arbiter;

pub use arbiter::ModeArbiter;
