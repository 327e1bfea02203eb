//! Contract tests for the agency adapters: every source must identify
//! itself consistently and build endpoint URLs that carry its dataset ids
//! and the requested geography, year, and level.

use std::sync::Arc;

use fiscus_core::{
    EurostatSource, Geography, ImfSource, Level, OecdSource, ProviderId, SourceSet,
    SpendingSource,
};

struct SourceCase {
    source: Arc<dyn SpendingSource>,
    id: ProviderId,
    functions_dataset: &'static str,
    totals_dataset: &'static str,
    /// How this agency spells a level-2 request in its URL scheme.
    level_marker: &'static str,
}

fn source_cases() -> Vec<SourceCase> {
    vec![
        SourceCase {
            source: Arc::new(EurostatSource::default()),
            id: ProviderId::Eurostat,
            functions_dataset: EurostatSource::DATASET_FUNCTIONS,
            totals_dataset: EurostatSource::DATASET_TOTALS,
            level_marker: "cofog_detail=L2",
        },
        SourceCase {
            source: Arc::new(OecdSource::default()),
            id: ProviderId::Oecd,
            functions_dataset: OecdSource::DATASET_FUNCTIONS,
            totals_dataset: OecdSource::DATASET_TOTALS,
            level_marker: "COFOG_L2",
        },
        SourceCase {
            source: Arc::new(ImfSource::default()),
            id: ProviderId::Imf,
            functions_dataset: ImfSource::DATASET_FUNCTIONS,
            totals_dataset: ImfSource::DATASET_TOTALS,
            level_marker: ".G2",
        },
    ]
}

fn geo(code: &str) -> Geography {
    Geography::parse(code).expect("valid geography")
}

#[test]
fn every_source_reports_its_own_provider_id() {
    for case in source_cases() {
        assert_eq!(case.source.id(), case.id);
    }
}

#[test]
fn functions_urls_embed_dataset_geography_year_and_level() {
    let norway = geo("NO");
    for case in source_cases() {
        let url = case.source.functions_url(&norway, 2021, Level::L2);
        assert!(
            url.starts_with("https://"),
            "{}: functions url must be https: {url}",
            case.id,
        );
        assert!(
            url.contains(case.functions_dataset),
            "{}: functions url must name its dataset: {url}",
            case.id,
        );
        assert!(url.contains("NO"), "{}: missing geography: {url}", case.id);
        assert!(url.contains("2021"), "{}: missing year: {url}", case.id);
        assert!(
            url.contains(case.level_marker),
            "{}: missing level marker '{}': {url}",
            case.id,
            case.level_marker,
        );
    }
}

#[test]
fn totals_urls_embed_dataset_geography_and_year() {
    let norway = geo("NO");
    for case in source_cases() {
        let url = case.source.totals_url(&norway, 2019);
        assert!(
            url.contains(case.totals_dataset),
            "{}: totals url must name its dataset: {url}",
            case.id,
        );
        assert!(url.contains("NO"), "{}: missing geography: {url}", case.id);
        assert!(url.contains("2019"), "{}: missing year: {url}", case.id);
    }
}

#[test]
fn functions_and_totals_hit_different_datasets() {
    let norway = geo("NO");
    for case in source_cases() {
        let functions = case.source.functions_url(&norway, 2020, Level::L1);
        let totals = case.source.totals_url(&norway, 2020);
        assert_ne!(
            functions, totals,
            "{}: the two retrievals must not share an endpoint",
            case.id,
        );
    }
}

#[test]
fn default_source_set_resolves_every_provider() {
    let sources = SourceSet::new(vec![
        Arc::new(EurostatSource::default()),
        Arc::new(OecdSource::default()),
        Arc::new(ImfSource::default()),
    ]);

    for provider in ProviderId::ALL {
        let source = sources
            .get(provider)
            .unwrap_or_else(|| panic!("no adapter registered for '{provider}'"));
        assert_eq!(source.id(), provider);
    }
}
