use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::{fetch_series, FetchFuture, SpendingSource};
use crate::fetch::{FetchClient, FetchConfig};
use crate::http_client::NoopHttpClient;
use crate::{Geography, Level, ProviderId};

const BASE_URL: &str = "https://ec.europa.eu/eurostat/api/dissemination/statistics/1.0/data";

/// Eurostat dissemination API adapter.
///
/// `gov_10a_exp` carries the COFOG expenditure breakdown, `gov_10a_main`
/// the main aggregates the totals come from.
#[derive(Clone)]
pub struct EurostatSource {
    fetch: FetchClient,
}

impl EurostatSource {
    pub const DATASET_FUNCTIONS: &'static str = "gov_10a_exp";
    pub const DATASET_TOTALS: &'static str = "gov_10a_main";

    pub fn new(fetch: FetchClient) -> Self {
        Self { fetch }
    }
}

impl Default for EurostatSource {
    fn default() -> Self {
        Self::new(FetchClient::new(
            Arc::new(NoopHttpClient),
            FetchConfig::default(),
        ))
    }
}

impl SpendingSource for EurostatSource {
    fn id(&self) -> ProviderId {
        ProviderId::Eurostat
    }

    fn functions_url(&self, geography: &Geography, year: i32, level: Level) -> String {
        format!(
            "{BASE_URL}/{dataset}?format=JSON&lang=EN&geo={geo}&time={year}&cofog_detail=L{level}",
            dataset = Self::DATASET_FUNCTIONS,
            geo = urlencoding::encode(geography.as_str()),
        )
    }

    fn totals_url(&self, geography: &Geography, year: i32) -> String {
        format!(
            "{BASE_URL}/{dataset}?format=JSON&lang=EN&geo={geo}&time={year}&na_item=TE",
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
