//! Shared fixtures for the fiscus behavior suites.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::time::Instant;

use fiscus_core::{
    CoverageKey, CoverageRegistry, Geography, HttpClient, HttpError, HttpRequest, HttpResponse,
    Level, ProviderCoverage, ProviderId,
};

pub fn geo(code: &str) -> Geography {
    Geography::parse(code).expect("valid geography")
}

/// The Norway scenario used across suites: Eurostat goes deepest, the IMF
/// furthest back.
pub fn nordic_registry() -> CoverageRegistry {
    CoverageRegistry::from_entries([
        (
            CoverageKey::new(ProviderId::Eurostat, geo("NO")),
            ProviderCoverage::new(2000, 2023, Level::L3, ["MIO_EUR", "PC_TOT"])
                .expect("valid envelope"),
        ),
        (
            CoverageKey::new(ProviderId::Oecd, geo("NO")),
            ProviderCoverage::new(1995, 2023, Level::L2, ["MIO_NAC"]).expect("valid envelope"),
        ),
        (
            CoverageKey::new(ProviderId::Imf, geo("NO")),
            ProviderCoverage::new(1980, 2023, Level::L1, ["MIO_NAC"]).expect("valid envelope"),
        ),
    ])
    .expect("valid registry")
}

/// One scripted transport outcome.
#[derive(Debug, Clone)]
pub enum ScriptedOutcome {
    Status(u16),
    TransportError(&'static str),
}

/// Transport double that replays a fixed script and records when each
/// attempt arrived, so suites can assert attempt counts and pacing.
pub struct ScriptedHttpClient {
    script: Mutex<VecDeque<ScriptedOutcome>>,
    attempts: Mutex<Vec<Instant>>,
}

impl ScriptedHttpClient {
    pub fn new(script: impl IntoIterator<Item = ScriptedOutcome>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            attempts: Mutex::new(Vec::new()),
        }
    }

    pub fn attempt_count(&self) -> usize {
        self.attempts.lock().expect("attempt log lock").len()
    }

    pub fn attempt_instants(&self) -> Vec<Instant> {
        self.attempts.lock().expect("attempt log lock").clone()
    }
}

impl HttpClient for ScriptedHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        let _ = request;
        Box::pin(async move {
            self.attempts
                .lock()
                .expect("attempt log lock")
                .push(Instant::now());
            match self
                .script
                .lock()
                .expect("script lock")
                .pop_front()
                .unwrap_or(ScriptedOutcome::Status(200))
            {
                ScriptedOutcome::Status(status) => Ok(HttpResponse {
                    status,
                    body: String::from("{}"),
                }),
                ScriptedOutcome::TransportError(message) => Err(HttpError::new(message)),
            }
        })
    }
}

/// Transport double whose requests never complete; for cancellation tests.
pub struct HangingHttpClient {
    attempts: Mutex<usize>,
}

impl HangingHttpClient {
    pub fn new() -> Self {
        Self {
            attempts: Mutex::new(0),
        }
    }

    pub fn attempt_count(&self) -> usize {
        *self.attempts.lock().expect("attempt counter lock")
    }
}

impl Default for HangingHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for HangingHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        let _ = request;
        Box::pin(async move {
            *self.attempts.lock().expect("attempt counter lock") += 1;
            std::future::pending().await
        })
    }
}
