use serde::Serialize;
use serde_json::Value;

use fiscus_core::{Geography, Level, RoutingDecision, SourceRouter};

use crate::cli::{Cli, RouteArgs};
use crate::error::CliError;

use super::{load_registry, open_warehouse, parse_routing_request};

#[derive(Debug, Serialize)]
struct RouteResponseData {
    geography: Geography,
    year: i32,
    desired_level: Level,
    decision: RoutingDecision,
}

pub fn run(cli: &Cli, args: &RouteArgs) -> Result<Value, CliError> {
    let warehouse = open_warehouse(cli)?;
    let coverage = load_registry(&warehouse)?;
    let request = parse_routing_request(args)?;

    let decision = SourceRouter::default().route(&request, &coverage)?;
    let data = RouteResponseData {
        geography: request.geography,
        year: request.year,
        desired_level: request.desired_level,
        decision,
    };
    Ok(serde_json::to_value(data)?)
}
