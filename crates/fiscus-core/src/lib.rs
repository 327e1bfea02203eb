//! # Fiscus Core
//!
//! Source routing and resilient retrieval for government-spending
//! statistics.
//!
//! ## Overview
//!
//! Three statistical agencies (Eurostat, the OECD, and the IMF) publish
//! overlapping but inconsistent coverage of COFOG spending data: different
//! year ranges, different classification granularities, different units.
//! This crate decides *which* agency to query and at *what* granularity it
//! can actually serve, then retrieves the data over an unreliable network
//! with bounded, observable retry behavior.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Per-agency endpoint adapters (Eurostat, OECD, IMF) |
//! | [`coverage`] | Declared-capability registry with wholesale snapshot refresh |
//! | [`domain`] | Domain types (Geography, Level) |
//! | [`error`] | Validation errors |
//! | [`fetch`] | Resilient fetch client: retries, backoff, cancellation |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`retry`] | Backoff schedule and retryable-status policy |
//! | [`routing`] | First-match-wins source selection with order overrides |
//! | [`source`] | Provider identifiers |
//!
//! ## Quick Start
//!
//! ```rust
//! use fiscus_core::{
//!     CoverageKey, CoverageRegistry, Geography, Level, ProviderCoverage, ProviderId,
//!     RoutingRequest, SourceRouter,
//! };
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let norway = Geography::parse("NO")?;
//!     let coverage = CoverageRegistry::from_entries([(
//!         CoverageKey::new(ProviderId::Eurostat, norway.clone()),
//!         ProviderCoverage::new(2000, 2023, Level::L3, ["MIO_EUR"])?,
//!     )])?;
//!
//!     let request = RoutingRequest::new(
//!         norway,
//!         2023,
//!         Level::L2,
//!         vec![ProviderId::Eurostat, ProviderId::Oecd, ProviderId::Imf],
//!     )?;
//!     let decision = SourceRouter::default().route(&request, &coverage)?;
//!
//!     assert_eq!(decision.provider, ProviderId::Eurostat);
//!     assert_eq!(decision.achieved_level, Level::L2);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every failure is a typed condition carrying enough context to log and
//! act on: [`RoutingError::NoDataAvailable`] names the unsatisfiable
//! geography/year/level; [`FetchError`] distinguishes a fatal status from
//! exhausted retries from caller cancellation. Nothing is swallowed, and no
//! retry crosses the routing/fetch boundary.

pub mod adapters;
pub mod coverage;
pub mod domain;
pub mod error;
pub mod fetch;
pub mod http_client;
pub mod retry;
pub mod routing;
pub mod source;

// Re-export commonly used types at crate root for convenience

// Adapter implementations
pub use adapters::{
    EurostatSource, ImfSource, OecdSource, RawSeries, SourceSet, SpendingSource,
};

// Coverage registry
pub use coverage::{CoverageCell, CoverageKey, CoverageRegistry, ProviderCoverage};

// Domain types
pub use domain::{Geography, Level};

// Error types
pub use error::ValidationError;

// Fetch client
pub use fetch::{FetchAttempt, FetchClient, FetchConfig, FetchError};

// HTTP transport
pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, NoopHttpClient, ReqwestHttpClient,
};

// Retry policy
pub use retry::{Backoff, RetryConfig};

// Routing
pub use routing::{
    OverrideRule, OverrideTable, RoutingDecision, RoutingError, RoutingRequest, SourceRouter,
};

// Source identifiers
pub use source::ProviderId;
