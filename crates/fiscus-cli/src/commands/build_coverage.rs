use serde_json::{json, Value};

use fiscus_warehouse::mock_provider_capabilities;

use crate::cli::Cli;
use crate::error::CliError;

use super::open_warehouse;

pub fn run(cli: &Cli) -> Result<Value, CliError> {
    let warehouse = open_warehouse(cli)?;
    let entries = mock_provider_capabilities();
    let written = warehouse.replace_coverage(&entries)?;
    tracing::info!(db = %cli.db, written, "coverage registry replaced");
    Ok(json!({
        "db": cli.db,
        "written": written,
    }))
}
