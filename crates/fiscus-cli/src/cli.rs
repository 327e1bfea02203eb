//! CLI argument definitions for fiscus.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `init` | Bootstrap the local DuckDB warehouse |
//! | `build-coverage` | Populate the coverage registry from the capability stub |
//! | `coverage` | List declared coverage envelopes |
//! | `route` | Decide which provider serves a geography/year/level |
//! | `fetch` | Route, then retrieve the data from the chosen agency |
//!
//! # Examples
//!
//! ```bash
//! fiscus init
//! fiscus build-coverage
//! fiscus route NO 2023 --level 2
//! fiscus fetch NO 2023 --level 2 --pretty
//! fiscus fetch NO 2023 --totals
//! ```

use clap::{Args, Parser, Subcommand};

/// Multi-agency government-spending data CLI.
///
/// Routes requests across Eurostat, the OECD, and the IMF based on declared
/// coverage, and fetches with bounded retries.
#[derive(Debug, Parser)]
#[command(
    name = "fiscus",
    author,
    version,
    about = "Multi-agency government-spending data CLI"
)]
pub struct Cli {
    /// Path to the DuckDB warehouse file.
    #[arg(long, global = true, default_value = "fiscus.duckdb")]
    pub db: String,

    /// Pretty-print JSON output.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Per-attempt timeout for agency calls, in milliseconds.
    #[arg(long, global = true, default_value_t = 30_000)]
    pub timeout_ms: u64,

    /// Total attempts per agency call, first try included.
    #[arg(long, global = true, default_value_t = 3)]
    pub max_attempts: u32,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create the warehouse tables if they do not exist.
    Init,
    /// Replace the coverage registry with the capability stub's envelopes.
    BuildCoverage,
    /// List the stored coverage envelopes.
    Coverage,
    /// Run one routing decision and print it.
    Route(RouteArgs),
    /// Route and then fetch from the selected agency.
    Fetch(FetchArgs),
}

#[derive(Debug, Args)]
pub struct RouteArgs {
    /// Jurisdiction code (e.g. NO, SE, GBR).
    pub geography: String,

    /// Reporting year.
    pub year: i32,

    /// Desired classification level (1-3).
    #[arg(long, default_value = "1")]
    pub level: String,

    /// Provider preference order, first match wins.
    #[arg(long, value_delimiter = ',', default_value = "eurostat,oecd,imf")]
    pub order: Vec<String>,
}

#[derive(Debug, Args)]
pub struct FetchArgs {
    #[command(flatten)]
    pub route: RouteArgs,

    /// Fetch expenditure totals instead of the function breakdown.
    #[arg(long, default_value_t = false)]
    pub totals: bool,
}
