//! Agency adapters: per-provider endpoint knowledge over the shared fetch
//! client.
//!
//! Each adapter knows its agency's base URL and the dataset identifiers for
//! the two retrievals fiscus performs: the functions-by-geography-year
//! breakdown and the expenditure totals. Payloads stay opaque: an adapter
//! hands back the raw body plus enough context for downstream parsers.

mod eurostat;
mod imf;
mod oecd;

pub use eurostat::EurostatSource;
pub use imf::ImfSource;
pub use oecd::OecdSource;

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::fetch::{FetchClient, FetchError};
use crate::{Geography, Level, ProviderId};

/// Raw payload from one agency call. The body is SDMX-ML, SDMX-JSON, or CSV
/// depending on the agency; parsing is a collaborator's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawSeries {
    pub provider: ProviderId,
    pub url: String,
    pub status: u16,
    pub body: String,
}

pub type FetchFuture<'a> =
    Pin<Box<dyn Future<Output = Result<RawSeries, FetchError>> + Send + 'a>>;

/// Adapter contract for one statistical agency.
///
/// Implementations must be `Send + Sync`; one adapter instance serves many
/// concurrent fetches.
pub trait SpendingSource: Send + Sync {
    /// Unique provider identifier, matching the routing layer's vocabulary.
    fn id(&self) -> ProviderId;

    /// Endpoint for the functions-by-geography-year breakdown at the given
    /// granularity.
    fn functions_url(&self, geography: &Geography, year: i32, level: Level) -> String;

    /// Endpoint for the expenditure totals of one geography/year.
    fn totals_url(&self, geography: &Geography, year: i32) -> String;

    /// Retrieve the function breakdown through the resilient fetch client.
    fn fetch_functions<'a>(
        &'a self,
        geography: &'a Geography,
        year: i32,
        level: Level,
        cancel: &'a CancellationToken,
    ) -> FetchFuture<'a>;

    /// Retrieve the expenditure totals through the resilient fetch client.
    fn fetch_totals<'a>(
        &'a self,
        geography: &'a Geography,
        year: i32,
        cancel: &'a CancellationToken,
    ) -> FetchFuture<'a>;
}

pub(crate) fn fetch_series<'a>(
    fetch: &'a FetchClient,
    provider: ProviderId,
    url: String,
    cancel: &'a CancellationToken,
) -> FetchFuture<'a> {
    Box::pin(async move {
        let response = fetch.fetch(&url, cancel).await?;
        Ok(RawSeries {
            provider,
            url,
            status: response.status,
            body: response.body,
        })
    })
}

/// Provider-indexed adapter set, resolving a routing decision to the adapter
/// that will serve it.
pub struct SourceSet {
    sources: HashMap<ProviderId, Arc<dyn SpendingSource>>,
}

impl SourceSet {
    pub fn new(sources: Vec<Arc<dyn SpendingSource>>) -> Self {
        let sources = sources
            .into_iter()
            .map(|source| (source.id(), source))
            .collect();
        Self { sources }
    }

    /// All three agencies over one shared fetch client.
    pub fn with_fetch_client(fetch: FetchClient) -> Self {
        Self::new(vec![
            Arc::new(EurostatSource::new(fetch.clone())),
            Arc::new(OecdSource::new(fetch.clone())),
            Arc::new(ImfSource::new(fetch)),
        ])
    }

    pub fn get(&self, provider: ProviderId) -> Option<&Arc<dyn SpendingSource>> {
        self.sources.get(&provider)
    }
}
