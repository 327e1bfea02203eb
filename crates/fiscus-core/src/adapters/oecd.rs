use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::{fetch_series, FetchFuture, SpendingSource};
use crate::fetch::{FetchClient, FetchConfig};
use crate::http_client::NoopHttpClient;
use crate::{Geography, Level, ProviderId};

const BASE_URL: &str = "https://sdmx.oecd.org/public/rest/data";

/// OECD SDMX REST adapter. Series keys are annual (`A.`) with the COFOG
/// detail dimension encoded in the key rather than the query string.
#[derive(Clone)]
pub struct OecdSource {
    fetch: FetchClient,
}

impl OecdSource {
    pub const DATASET_FUNCTIONS: &'static str = "GOV_10A_EXP";
    pub const DATASET_TOTALS: &'static str = "GOV_10A_MAIN";

    pub fn new(fetch: FetchClient) -> Self {
        Self { fetch }
    }
}

impl Default for OecdSource {
    fn default() -> Self {
        Self::new(FetchClient::new(
            Arc::new(NoopHttpClient),
            FetchConfig::default(),
        ))
    }
}

impl SpendingSource for OecdSource {
    fn id(&self) -> ProviderId {
        ProviderId::Oecd
    }

    fn functions_url(&self, geography: &Geography, year: i32, level: Level) -> String {
        format!(
            "{BASE_URL}/{dataset}/A.{geo}.COFOG_L{level}?startPeriod={year}&endPeriod={year}&format=jsondata",
            dataset = Self::DATASET_FUNCTIONS,
            geo = urlencoding::encode(geography.as_str()),
        )
    }

    fn totals_url(&self, geography: &Geography, year: i32) -> String {
        format!(
            "{BASE_URL}/{dataset}/A.{geo}.TE?startPeriod={year}&endPeriod={year}&format=jsondata",
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
