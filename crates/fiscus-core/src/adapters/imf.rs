use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::{fetch_series, FetchFuture, SpendingSource};
use crate::fetch::{FetchClient, FetchConfig};
use crate::http_client::NoopHttpClient;
use crate::{Geography, Level, ProviderId};

const BASE_URL: &str = "https://dataservices.imf.org/REST/SDMX_JSON.svc/CompactData";

/// IMF SDMX-JSON adapter over the Government Finance Statistics datasets.
/// GFSCOFOG only goes down to division level for most reporters, which is
/// why its registry envelopes usually cap at level 1.
#[derive(Clone)]
pub struct ImfSource {
    fetch: FetchClient,
}

impl ImfSource {
    pub const DATASET_FUNCTIONS: &'static str = "GFSCOFOG";
    pub const DATASET_TOTALS: &'static str = "GFSMAB";

    pub fn new(fetch: FetchClient) -> Self {
        Self { fetch }
    }
}

impl Default for ImfSource {
    fn default() -> Self {
        Self::new(FetchClient::new(
            Arc::new(NoopHttpClient),
            FetchConfig::default(),
        ))
    }
}

impl SpendingSource for ImfSource {
    fn id(&self) -> ProviderId {
        ProviderId::Imf
    }

    fn functions_url(&self, geography: &Geography, year: i32, level: Level) -> String {
        format!(
            "{BASE_URL}/{dataset}/A.{geo}.G{level}?startPeriod={year}&endPeriod={year}",
            dataset = Self::DATASET_FUNCTIONS,
            geo = urlencoding::encode(geography.as_str()),
        )
    }

    fn totals_url(&self, geography: &Geography, year: i32) -> String {
        format!(
            "{BASE_URL}/{dataset}/A.{geo}.TE?startPeriod={year}&endPeriod={year}",
            dataset = Self::DATASET_TOTALS,
            geo = urlencoding::encode(geography.as_str()),
        )
    }

    fn fetch_functions<'a>(
        &'a self,
        geography: &'a Geography,
        year: i32,
        level: Level,
        cancel: &'a CancellationToken,
    ) -> FetchFuture<'a> {
        let url = self.functions_url(geography, year, level);
        fetch_series(&self.fetch, self.id(), url, cancel)
    }

    fn fetch_totals<'a>(
        &'a self,
        geography: &'a Geography,
        year: i32,
        cancel: &'a CancellationToken,
    ) -> FetchFuture<'a> {
        let url = self.totals_url(geography, year);
        fetch_series(&self.fetch, self.id(), url, cancel)
    }
}
