//! Source routing: pick the first provider that can actually serve a
//! (geography, year, level) request.
//!
//! Routing is pure computation over one registry snapshot. The caller's
//! fallback order *is* the preference policy: candidates are tried in
//! sequence and the first usable one wins. The router never scores or
//! compares usable providers against each other, and it never retries.
//! A miss is surfaced as [`RoutingError::NoDataAvailable`] with enough
//! context to act on.

use serde::Serialize;
use thiserror::Error;

use crate::coverage::CoverageRegistry;
use crate::{Geography, Level, ProviderId, ValidationError};

/// One routing question: who should serve this geography/year, and at what
/// granularity?
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingRequest {
    pub geography: Geography,
    pub year: i32,
    pub desired_level: Level,
    pub fallback_order: Vec<ProviderId>,
}

impl RoutingRequest {
    /// Duplicates in the order are tolerated (the loop just revisits the
    /// same registry entry); an empty order is a caller bug and rejected.
    pub fn new(
        geography: Geography,
        year: i32,
        desired_level: Level,
        fallback_order: Vec<ProviderId>,
    ) -> Result<Self, ValidationError> {
        if fallback_order.is_empty() {
            return Err(ValidationError::EmptyFallbackOrder);
        }
        Ok(Self {
            geography,
            year,
            desired_level,
            fallback_order,
        })
    }
}

/// The selected provider and the granularity it will actually be asked for.
///
/// `achieved_level <= desired_level` always; a provider is never asked for
/// finer data than the caller wanted or than it declares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutingDecision {
    pub provider: ProviderId,
    pub achieved_level: Level,
}

/// Routing found no eligible provider. Recoverable by the caller (widen the
/// order, lower the level); never retried automatically here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoutingError {
    #[error("no provider covers {geography} in {year} at level {desired_level}")]
    NoDataAvailable {
        geography: Geography,
        year: i32,
        desired_level: Level,
    },
}

/// One order-override rule: for a set of synonym spellings of the same
/// jurisdiction, requests from `from_year` onward use a fixed alternate
/// order instead of whatever the caller supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideRule {
    synonyms: Vec<Geography>,
    from_year: i32,
    order: Vec<ProviderId>,
}

impl OverrideRule {
    pub fn new(
        synonyms: impl IntoIterator<Item = Geography>,
        from_year: i32,
        order: Vec<ProviderId>,
    ) -> Self {
        Self {
            synonyms: synonyms.into_iter().collect(),
            from_year,
            order,
        }
    }

    fn applies_to(&self, geography: &Geography, year: i32) -> bool {
        year >= self.from_year && self.synonyms.contains(geography)
    }
}

/// Injectable table of order overrides, matched on geography identity.
///
/// Matching is by the literal spelling the caller used: each synonym is
/// listed explicitly and no canonicalization happens first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideTable {
    rules: Vec<OverrideRule>,
}

impl OverrideTable {
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn with_rule(mut self, rule: OverrideRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Resolve the order to evaluate: the first matching rule's order, or
    /// the caller's own.
    pub fn effective_order<'a>(
        &'a self,
        geography: &Geography,
        year: i32,
        fallback: &'a [ProviderId],
    ) -> &'a [ProviderId] {
        self.rules
            .iter()
            .find(|rule| rule.applies_to(geography, year))
            .map(|rule| rule.order.as_slice())
            .unwrap_or(fallback)
    }
}

impl Default for OverrideTable {
    /// The UK dropped out of the Eurostat government-finance tables after
    /// the 2020 reporting year; from 2021 onward the OECD and IMF feeds are
    /// the usable ones regardless of caller preference. All three ISO
    /// spellings in circulation are listed.
    fn default() -> Self {
        let synonyms = ["UK", "GB", "GBR"]
            .into_iter()
            .map(|code| Geography::parse(code).expect("static geography code is valid"));
        Self::empty().with_rule(OverrideRule::new(
            synonyms,
            2021,
            vec![ProviderId::Oecd, ProviderId::Imf, ProviderId::Eurostat],
        ))
    }
}

/// Deterministic source selection over one coverage snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceRouter {
    overrides: OverrideTable,
}

impl SourceRouter {
    pub fn new(overrides: OverrideTable) -> Self {
        Self { overrides }
    }

    /// First-match-wins selection.
    ///
    /// For each provider in the (possibly overridden) order: skip if the
    /// registry has no envelope for this geography, skip if the year falls
    /// outside the declared range, otherwise clamp the level to what the
    /// provider supports and return.
    pub fn route(
        &self,
        request: &RoutingRequest,
        coverage: &CoverageRegistry,
    ) -> Result<RoutingDecision, RoutingError> {
        let order = self.overrides.effective_order(
            &request.geography,
            request.year,
            &request.fallback_order,
        );

        for &provider in order {
            let Some(envelope) = coverage.lookup(provider, &request.geography) else {
                continue;
            };
            if !envelope.covers_year(request.year) {
                continue;
            }
            return Ok(RoutingDecision {
                provider,
                achieved_level: request.desired_level.min(envelope.max_level()),
            });
        }

        Err(RoutingError::NoDataAvailable {
            geography: request.geography.clone(),
            year: request.year,
            desired_level: request.desired_level,
        })
    }
}
