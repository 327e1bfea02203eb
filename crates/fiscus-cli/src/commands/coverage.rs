use serde_json::{json, Value};

use crate::cli::Cli;
use crate::error::CliError;

use super::open_warehouse;

pub fn run(cli: &Cli) -> Result<Value, CliError> {
    let warehouse = open_warehouse(cli)?;
    let rows = warehouse.load_coverage_rows()?;
    Ok(json!({
        "count": rows.len(),
        "coverage": rows,
    }))
}
