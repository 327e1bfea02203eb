//! # Fiscus Warehouse
//!
//! DuckDB persistence for the fiscus coverage registry and COFOG codelist.
//!
//! ## Overview
//!
//! The warehouse is the durable face of the in-memory coverage snapshot:
//! an ingestion job writes envelopes here in bulk, and the routing layer
//! loads them back into a [`fiscus_core::CoverageRegistry`]. Replacement is
//! wholesale and transactional, so a reader either sees the previous
//! generation or the new one, never a mix.
//!
//! ## Tables
//!
//! | Table | Description |
//! |-------|-------------|
//! | `coverage_registry` | Declared (provider, geography) capability envelopes |
//! | `dim_cofog` | COFOG codelist for downstream consumers |
//!
//! All statements are parameterized; no caller input is interpolated.

pub mod error;
pub mod models;
pub mod stub;

use std::path::Path;

use duckdb::{params, Connection};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use fiscus_core::{CoverageKey, ProviderCoverage};

pub use error::WarehouseError;
pub use models::{CofogCode, CoverageRow};
pub use stub::mock_provider_capabilities;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS coverage_registry (
        provider VARCHAR NOT NULL,
        geo VARCHAR NOT NULL,
        min_year INTEGER NOT NULL,
        max_year INTEGER NOT NULL,
        max_level TINYINT NOT NULL,
        units VARCHAR NOT NULL,
        updated_at VARCHAR NOT NULL
    );
    CREATE TABLE IF NOT EXISTS dim_cofog (
        cofog_code VARCHAR NOT NULL,
        label VARCHAR NOT NULL,
        level TINYINT NOT NULL,
        vintage_ts VARCHAR NOT NULL
    );
";

/// Handle over one DuckDB database file.
pub struct Warehouse {
    connection: Connection,
}

impl Warehouse {
    /// Open (creating if needed) the database at `path` and ensure the
    /// schema exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, WarehouseError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let connection = Connection::open(path)?;
        let warehouse = Self { connection };
        warehouse.bootstrap()?;
        Ok(warehouse)
    }

    /// In-memory database for tests.
    pub fn open_in_memory() -> Result<Self, WarehouseError> {
        let connection = Connection::open_in_memory()?;
        let warehouse = Self { connection };
        warehouse.bootstrap()?;
        Ok(warehouse)
    }

    /// Create the registry and codelist tables when absent. Idempotent.
    pub fn bootstrap(&self) -> Result<(), WarehouseError> {
        self.connection.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Table names present in the database, for bootstrap smoke checks.
    pub fn table_names(&self) -> Result<Vec<String>, WarehouseError> {
        let mut statement = self.connection.prepare(
            "SELECT table_name FROM information_schema.tables \
             WHERE table_schema = 'main' ORDER BY table_name",
        )?;
        let names = statement
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }

    /// Wholesale replacement of the coverage registry: the bulk-write
    /// interface the external ingestion job drives. Returns the number of
    /// rows written.
    pub fn replace_coverage(
        &self,
        entries: &[(CoverageKey, ProviderCoverage)],
    ) -> Result<usize, WarehouseError> {
        let updated_at = OffsetDateTime::now_utc().format(&Rfc3339)?;

        self.connection.execute_batch("BEGIN TRANSACTION")?;
        let result = (|| -> Result<usize, WarehouseError> {
            self.connection
                .execute("DELETE FROM coverage_registry", [])?;
            for (key, coverage) in entries {
                let row = CoverageRow::from_domain(key, coverage, &updated_at);
                self.connection.execute(
                    "INSERT INTO coverage_registry \
                     (provider, geo, min_year, max_year, max_level, units, updated_at) \
                     VALUES (?, ?, ?, ?, ?, ?, ?)",
                    params![
                        row.provider,
                        row.geo,
                        row.min_year,
                        row.max_year,
                        i32::from(row.max_level),
                        row.units,
                        row.updated_at,
                    ],
                )?;
            }
            Ok(entries.len())
        })();

        finalize_transaction(&self.connection, result)
    }

    /// Load the stored registry back as domain entries, ready for
    /// `CoverageRegistry::from_entries`.
    pub fn load_coverage(&self) -> Result<Vec<(CoverageKey, ProviderCoverage)>, WarehouseError> {
        self.load_coverage_rows()?
            .into_iter()
            .map(CoverageRow::into_domain)
            .collect()
    }

    /// Raw registry rows, as stored.
    pub fn load_coverage_rows(&self) -> Result<Vec<CoverageRow>, WarehouseError> {
        let mut statement = self.connection.prepare(
            "SELECT provider, geo, min_year, max_year, max_level, units, updated_at \
             FROM coverage_registry ORDER BY provider, geo",
        )?;
        let rows = statement
            .query_map([], |row| {
                Ok(CoverageRow {
                    provider: row.get(0)?,
                    geo: row.get(1)?,
                    min_year: row.get(2)?,
                    max_year: row.get(3)?,
                    max_level: row.get::<_, i32>(4)? as u8,
                    units: row.get(5)?,
                    updated_at: row.get(6)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Wholesale replacement of the COFOG codelist, stamped with the
    /// ingestion vintage.
    pub fn replace_codelist(
        &self,
        codes: &[CofogCode],
        vintage_ts: &str,
    ) -> Result<usize, WarehouseError> {
        self.connection.execute_batch("BEGIN TRANSACTION")?;
        let result = (|| -> Result<usize, WarehouseError> {
            self.connection.execute("DELETE FROM dim_cofog", [])?;
            for code in codes {
                self.connection.execute(
                    "INSERT INTO dim_cofog (cofog_code, label, level, vintage_ts) \
                     VALUES (?, ?, ?, ?)",
                    params![
                        code.cofog_code,
                        code.label,
                        i32::from(code.level),
                        vintage_ts,
                    ],
                )?;
            }
            Ok(codes.len())
        })();

        finalize_transaction(&self.connection, result)
    }
}

/// Commit on success, roll back on failure, preserving the original error.
fn finalize_transaction<T>(
    connection: &Connection,
    result: Result<T, WarehouseError>,
) -> Result<T, WarehouseError> {
    match result {
        Ok(value) => {
            connection.execute_batch("COMMIT")?;
            Ok(value)
        }
        Err(error) => {
            let _ = connection.execute_batch("ROLLBACK");
            Err(error)
        }
    }
}
