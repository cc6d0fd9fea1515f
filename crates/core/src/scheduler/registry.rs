//! Domain registry
//!
//! Holds metadata and statistics for the registered timing domains. The
//! registry is an owned value passed to the scheduling layer rather than
//! a module-level static: the cooperative scheduling model gives it a
//! single owner, so no synchronization is required.

use heapless::Vec;

use super::types::{DomainMetadata, DomainStats};

/// Maximum number of timing domains that can be registered.
///
/// The controller defines three; the headroom covers auxiliary host-side
/// domains such as telemetry emission.
pub const MAX_DOMAINS: usize = 8;

#[derive(Debug)]
struct DomainEntry {
    metadata: DomainMetadata,
    stats: DomainStats,
}

/// Registration and statistics storage for timing domains.
#[derive(Debug, Default)]
pub struct DomainRegistry {
    entries: Vec<DomainEntry, MAX_DOMAINS>,
}

impl DomainRegistry {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register a domain, returning its index for later lookups.
    ///
    /// Returns `None` if the registry is full.
    pub fn register(&mut self, metadata: DomainMetadata) -> Option<usize> {
        let index = self.entries.len();
        self.entries
            .push(DomainEntry {
                metadata,
                stats: DomainStats::default(),
            })
            .ok()?;
        Some(index)
    }

    /// Number of registered domains.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no domains are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get domain metadata by index.
    pub fn metadata(&self, index: usize) -> Option<&DomainMetadata> {
        self.entries.get(index).map(|entry| &entry.metadata)
    }

    /// Get domain statistics by index.
    pub fn stats(&self, index: usize) -> Option<&DomainStats> {
        self.entries.get(index).map(|entry| &entry.stats)
    }

    /// Record one applied tick for a domain.
    ///
    /// `period_us` is the time since the domain's previous applied tick;
    /// pass the target period for the first tick. Out-of-range indices are
    /// ignored.
    pub fn record_execution(&mut self, index: usize, execution_us: u32, period_us: u32) {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.stats.update(
                execution_us,
                period_us,
                entry.metadata.period_us(),
                entry.metadata.budget_us,
            );
        }
    }

    /// Iterate over all registered domains with their statistics.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &DomainMetadata, &DomainStats)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (i, &entry.metadata, &entry.stats))
    }
}
