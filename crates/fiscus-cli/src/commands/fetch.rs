use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use uuid::Uuid;

use fiscus_core::{
    FetchClient, FetchConfig, RawSeries, ReqwestHttpClient, RetryConfig, RoutingDecision,
    SourceRouter, SourceSet,
};

use crate::cli::{Cli, FetchArgs};
use crate::error::CliError;

use super::{load_registry, open_warehouse, parse_routing_request};

#[derive(Debug, Serialize)]
struct FetchResponseData {
    decision: RoutingDecision,
    series: RawSeries,
}

pub async fn run(cli: &Cli, args: &FetchArgs) -> Result<Value, CliError> {
    let warehouse = open_warehouse(cli)?;
    let coverage = load_registry(&warehouse)?;
    let request = parse_routing_request(&args.route)?;

    let decision = SourceRouter::default().route(&request, &coverage)?;

    let config = FetchConfig {
        timeout_per_attempt: Duration::from_millis(cli.timeout_ms),
        retry: RetryConfig::with_max_attempts(cli.max_attempts),
    };
    let fetch_client = FetchClient::new(Arc::new(ReqwestHttpClient::new()), config);
    let sources = SourceSet::with_fetch_client(fetch_client);
    let source = sources.get(decision.provider).ok_or_else(|| {
        CliError::Command(format!(
            "no adapter registered for provider '{}'",
            decision.provider
        ))
    })?;

    // Ctrl-C aborts the in-flight attempt and skips remaining retries.
    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_cancel.cancel();
        }
    });

    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("fetch", %request_id, provider = %decision.provider);
    let series = async {
        if args.totals {
            source
                .fetch_totals(&request.geography, request.year, &cancel)
                .await
        } else {
            source
                .fetch_functions(
                    &request.geography,
                    request.year,
                    decision.achieved_level,
                    &cancel,
                )
                .await
        }
    }
    .instrument(span)
    .await?;

    let data = FetchResponseData { decision, series };
    Ok(serde_json::to_value(data)?)
}
