//! Coverage registry: which provider claims which geography, years, and
//! granularity.
//!
//! The registry is a read-mostly snapshot. An external ingestion job builds
//! it in bulk (see `fiscus-warehouse`); routing only ever reads it. Refresh
//! is wholesale: a new snapshot is published through [`CoverageCell`] and
//! in-flight routing calls keep the snapshot they started with.

use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use crate::{Geography, Level, ProviderId, ValidationError};

/// Declared capability envelope for one (provider, geography) pair.
///
/// Immutable once constructed; `min_year <= max_year` is enforced at the
/// boundary so the router never has to re-check it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderCoverage {
    min_year: i32,
    max_year: i32,
    max_level: Level,
    units: BTreeSet<String>,
}

impl ProviderCoverage {
    pub fn new(
        min_year: i32,
        max_year: i32,
        max_level: Level,
        units: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self, ValidationError> {
        if min_year > max_year {
            return Err(ValidationError::InvertedYearRange { min_year, max_year });
        }
        Ok(Self {
            min_year,
            max_year,
            max_level,
            units: units.into_iter().map(Into::into).collect(),
        })
    }

    pub const fn min_year(&self) -> i32 {
        self.min_year
    }

    pub const fn max_year(&self) -> i32 {
        self.max_year
    }

    pub const fn max_level(&self) -> Level {
        self.max_level
    }

    pub fn units(&self) -> &BTreeSet<String> {
        &self.units
    }

    /// Inclusive year-range check used by the router's candidate loop.
    pub const fn covers_year(&self, year: i32) -> bool {
        self.min_year <= year && year <= self.max_year
    }
}

/// Unique key into the registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CoverageKey {
    pub provider: ProviderId,
    pub geography: Geography,
}

impl CoverageKey {
    pub fn new(provider: ProviderId, geography: Geography) -> Self {
        Self {
            provider,
            geography,
        }
    }
}

/// One registry snapshot: (provider, geography) -> declared envelope.
///
/// Built once per ingestion cycle, read concurrently by many routing calls,
/// never mutated after construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoverageRegistry {
    entries: HashMap<CoverageKey, ProviderCoverage>,
}

impl CoverageRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Bulk-build a snapshot. Duplicate keys within one build are a data
    /// error in the ingestion feed and are rejected rather than last-wins.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (CoverageKey, ProviderCoverage)>,
    ) -> Result<Self, ValidationError> {
        let mut map = HashMap::new();
        for (key, coverage) in entries {
            match map.entry(key) {
                Entry::Vacant(slot) => {
                    slot.insert(coverage);
                }
                Entry::Occupied(slot) => {
                    let key = slot.key();
                    return Err(ValidationError::DuplicateCoverageKey {
                        provider: key.provider.to_string(),
                        geography: key.geography.to_string(),
                    });
                }
            }
        }
        Ok(Self { entries: map })
    }

    /// O(1) envelope lookup. Absence is a legitimate negative result, not an
    /// error; the router skips the provider and moves on.
    pub fn lookup(
        &self,
        provider: ProviderId,
        geography: &Geography,
    ) -> Option<&ProviderCoverage> {
        self.entries.get(&CoverageKey {
            provider,
            geography: geography.clone(),
        })
    }

    pub fn entries(&self) -> impl Iterator<Item = (&CoverageKey, &ProviderCoverage)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Shared handle through which the ingestion job publishes fresh snapshots.
///
/// Readers take an `Arc` clone and keep it for the duration of one routing
/// decision; `replace` swaps the whole table so no reader ever observes a
/// half-updated registry.
#[derive(Debug, Default)]
pub struct CoverageCell {
    inner: RwLock<Arc<CoverageRegistry>>,
}

impl CoverageCell {
    pub fn new(registry: CoverageRegistry) -> Self {
        Self {
            inner: RwLock::new(Arc::new(registry)),
        }
    }

    pub fn snapshot(&self) -> Arc<CoverageRegistry> {
        Arc::clone(&self.inner.read().expect("coverage cell lock is not poisoned"))
    }

    pub fn replace(&self, registry: CoverageRegistry) {
        let mut guard = self
            .inner
            .write()
            .expect("coverage cell lock is not poisoned");
        *guard = Arc::new(registry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geo(code: &str) -> Geography {
        Geography::parse(code).expect("valid geography")
    }

    fn envelope(min_year: i32, max_year: i32, max_level: Level) -> ProviderCoverage {
        ProviderCoverage::new(min_year, max_year, max_level, ["MIO_NAC"])
            .expect("valid envelope")
    }

    #[test]
    fn rejects_inverted_year_range() {
        let err = ProviderCoverage::new(2023, 2000, Level::L1, ["MIO_EUR"])
            .expect_err("must fail");
        assert!(matches!(err, ValidationError::InvertedYearRange { .. }));
    }

    #[test]
    fn covers_year_is_inclusive() {
        let coverage = envelope(2000, 2023, Level::L3);
        assert!(coverage.covers_year(2000));
        assert!(coverage.covers_year(2023));
        assert!(!coverage.covers_year(1999));
        assert!(!coverage.covers_year(2024));
    }

    #[test]
    fn lookup_misses_are_not_errors() {
        let registry = CoverageRegistry::from_entries([(
            CoverageKey::new(ProviderId::Eurostat, geo("NO")),
            envelope(2000, 2023, Level::L3),
        )])
        .expect("valid registry");

        assert!(registry.lookup(ProviderId::Eurostat, &geo("NO")).is_some());
        assert!(registry.lookup(ProviderId::Oecd, &geo("NO")).is_none());
        assert!(registry.lookup(ProviderId::Eurostat, &geo("SE")).is_none());
    }

    #[test]
    fn rejects_duplicate_keys_within_one_build() {
        let err = CoverageRegistry::from_entries([
            (
                CoverageKey::new(ProviderId::Imf, geo("NO")),
                envelope(1980, 2023, Level::L1),
            ),
            (
                CoverageKey::new(ProviderId::Imf, geo("NO")),
                envelope(1990, 2020, Level::L2),
            ),
        ])
        .expect_err("must fail");
        assert!(matches!(err, ValidationError::DuplicateCoverageKey { .. }));
    }

    #[test]
    fn cell_replace_is_wholesale() {
        let cell = CoverageCell::new(CoverageRegistry::empty());
        let before = cell.snapshot();

        cell.replace(
            CoverageRegistry::from_entries([(
                CoverageKey::new(ProviderId::Oecd, geo("NO")),
                envelope(1995, 2023, Level::L2),
            )])
            .expect("valid registry"),
        );

        // The earlier snapshot is unchanged; only new readers see the swap.
        assert!(before.is_empty());
        assert_eq!(cell.snapshot().len(), 1);
    }
}
