use serde::{Deserialize, Serialize};

use fiscus_core::{CoverageKey, Geography, Level, ProviderCoverage, ProviderId};

use crate::error::WarehouseError;

/// One `coverage_registry` row as stored: flat strings and integers, with
/// the unit set comma-joined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageRow {
    pub provider: String,
    pub geo: String,
    pub min_year: i32,
    pub max_year: i32,
    pub max_level: u8,
    pub units: String,
    pub updated_at: String,
}

impl CoverageRow {
    pub fn from_domain(key: &CoverageKey, coverage: &ProviderCoverage, updated_at: &str) -> Self {
        Self {
            provider: key.provider.to_string(),
            geo: key.geography.to_string(),
            min_year: coverage.min_year(),
            max_year: coverage.max_year(),
            max_level: coverage.max_level().as_u8(),
            units: coverage
                .units()
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(","),
            updated_at: updated_at.to_owned(),
        }
    }

    pub fn into_domain(self) -> Result<(CoverageKey, ProviderCoverage), WarehouseError> {
        let provider = self
            .provider
            .parse::<ProviderId>()
            .map_err(|e| WarehouseError::InvalidRow(e.to_string()))?;
        let geography = Geography::parse(&self.geo)
            .map_err(|e| WarehouseError::InvalidRow(e.to_string()))?;
        let max_level = Level::try_from(self.max_level)
            .map_err(|e| WarehouseError::InvalidRow(e.to_string()))?;
        let units = self
            .units
            .split(',')
            .filter(|unit| !unit.is_empty())
            .map(str::to_owned);
        let coverage = ProviderCoverage::new(self.min_year, self.max_year, max_level, units)
            .map_err(|e| WarehouseError::InvalidRow(e.to_string()))?;
        Ok((CoverageKey::new(provider, geography), coverage))
    }
}

/// One `dim_cofog` codelist row. Content is data, not logic: fiscus stores
/// the codelist for downstream consumers but never interprets the codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CofogCode {
    pub cofog_code: String,
    pub label: String,
    pub level: u8,
}
