//! Hardcoded capability stub standing in for the real capability-discovery
//! pipeline.
//!
//! This is one concrete feeder of [`Warehouse::replace_coverage`]; a real
//! ingestion job replaces it without the router noticing.

use fiscus_core::{CoverageKey, Geography, Level, ProviderCoverage, ProviderId};

/// Declared envelopes as observed by hand against the three agencies'
/// Norway series. Eurostat goes deepest, the IMF furthest back.
pub fn mock_provider_capabilities() -> Vec<(CoverageKey, ProviderCoverage)> {
    let norway = Geography::parse("NO").expect("static geography code is valid");

    vec![
        (
            CoverageKey::new(ProviderId::Eurostat, norway.clone()),
            ProviderCoverage::new(2000, 2023, Level::L3, ["MIO_EUR", "PC_TOT"])
                .expect("static envelope is valid"),
        ),
        (
            CoverageKey::new(ProviderId::Oecd, norway.clone()),
            ProviderCoverage::new(1995, 2023, Level::L2, ["MIO_NAC"])
                .expect("static envelope is valid"),
        ),
        (
            CoverageKey::new(ProviderId::Imf, norway),
            ProviderCoverage::new(1980, 2023, Level::L1, ["MIO_NAC"])
                .expect("static envelope is valid"),
        ),
    ]
}
