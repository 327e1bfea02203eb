mod build_coverage;
mod coverage;
mod fetch;
mod init;
mod route;

use serde_json::Value;

use fiscus_core::{CoverageRegistry, Geography, Level, ProviderId, RoutingRequest};
use fiscus_warehouse::Warehouse;

use crate::cli::{Cli, Command, RouteArgs};
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<Value, CliError> {
    match &cli.command {
        Command::Init => init::run(cli),
        Command::BuildCoverage => build_coverage::run(cli),
        Command::Coverage => coverage::run(cli),
        Command::Route(args) => route::run(cli, args),
        Command::Fetch(args) => fetch::run(cli, args).await,
    }
}

pub(crate) fn open_warehouse(cli: &Cli) -> Result<Warehouse, CliError> {
    Ok(Warehouse::open(&cli.db)?)
}

pub(crate) fn load_registry(warehouse: &Warehouse) -> Result<CoverageRegistry, CliError> {
    let entries = warehouse.load_coverage()?;
    Ok(CoverageRegistry::from_entries(entries)?)
}

pub(crate) fn parse_routing_request(args: &RouteArgs) -> Result<RoutingRequest, CliError> {
    let geography = Geography::parse(&args.geography)?;
    let desired_level = args.level.parse::<Level>()?;
    let fallback_order = args
        .order
        .iter()
        .map(|raw| raw.parse::<ProviderId>())
        .collect::<Result<Vec<_>, _>>()?;
    Ok(RoutingRequest::new(
        geography,
        args.year,
        desired_level,
        fallback_order,
    )?)
}
