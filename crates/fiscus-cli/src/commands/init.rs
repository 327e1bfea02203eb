use serde_json::{json, Value};

use crate::cli::Cli;
use crate::error::CliError;

use super::open_warehouse;

pub fn run(cli: &Cli) -> Result<Value, CliError> {
    let warehouse = open_warehouse(cli)?;
    let tables = warehouse.table_names()?;
    tracing::info!(db = %cli.db, "warehouse bootstrapped");
    Ok(json!({
        "db": cli.db,
        "tables": tables,
    }))
}
