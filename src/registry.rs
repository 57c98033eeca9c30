//! Remote registry access: HTTP transport, per-source TTL cache, and
//! request coalescing.
//!
//! The cache is the sole writer of its own state. A fetch only replaces the
//! cached list after the full response body has been parsed, so readers
//! always observe a consistent snapshot per source. Concurrent callers that
//! miss the TTL while a fetch is already in flight all await that one shared
//! operation instead of issuing parallel network calls. Fetch failures never
//! surface as errors here; they degrade to the previous cached list (or an
//! empty one) and set a readable error flag.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use futures::future::{BoxFuture, FutureExt, Shared};
use tracing::{debug, warn};

use crate::data::CatalogEntry;
use crate::errors::Result;
use crate::normalize::{casks_from_json, formulae_from_json};

/// Formula endpoint of the public registry.
pub const FORMULA_ENDPOINT: &str = "https://formulae.brew.sh/api/formula.json";
/// Cask endpoint of the public registry.
pub const CASK_ENDPOINT: &str = "https://formulae.brew.sh/api/cask.json";

/// How long a fetched list stays fresh.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);
/// Upper bound on a single network call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// The two registry sources the catalog aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistrySource {
    Formula,
    Cask,
}

impl RegistrySource {
    pub fn label(self) -> &'static str {
        match self {
            RegistrySource::Formula => "formula",
            RegistrySource::Cask => "cask",
        }
    }
}

/// Seam between the cache and the network.
///
/// The returned future is `'static` so it can be shared between coalesced
/// callers; implementations clone what they need up front.
pub trait RegistryTransport: Send + Sync + 'static {
    fn fetch(&self, url: &str) -> BoxFuture<'static, Result<String>>;
}

/// Production transport over reqwest.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("brewdeck/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl RegistryTransport for HttpTransport {
    fn fetch(&self, url: &str) -> BoxFuture<'static, Result<String>> {
        let client = self.client.clone();
        let url = url.to_string();
        async move {
            let response = client.get(&url).send().await?.error_for_status()?;
            Ok(response.text().await?)
        }
        .boxed()
    }
}

// Shared between coalesced callers; the error is a plain string because
// Shared requires a Clone output.
type SharedFetch = Shared<BoxFuture<'static, std::result::Result<Vec<CatalogEntry>, String>>>;

#[derive(Default)]
struct SourceState {
    list: Vec<CatalogEntry>,
    fetched_at: Option<Instant>,
    inflight: Option<SharedFetch>,
    /// Bumped by [`RegistryCache::clear`]; an in-flight fetch started under
    /// an older generation must not commit its result.
    generation: u64,
}

impl SourceState {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.fetched_at
            .map(|at| at.elapsed() < ttl)
            .unwrap_or(false)
    }
}

/// Per-source TTL cache over a [`RegistryTransport`].
pub struct RegistryCache<T: RegistryTransport> {
    transport: Arc<T>,
    ttl: Duration,
    formula_url: String,
    cask_url: String,
    formula: Arc<Mutex<SourceState>>,
    cask: Arc<Mutex<SourceState>>,
    last_error: Arc<Mutex<Option<String>>>,
}

impl<T: RegistryTransport> RegistryCache<T> {
    pub fn new(transport: T) -> Self {
        Self::with_endpoints(
            transport,
            DEFAULT_TTL,
            FORMULA_ENDPOINT.to_string(),
            CASK_ENDPOINT.to_string(),
        )
    }

    pub fn with_endpoints(
        transport: T,
        ttl: Duration,
        formula_url: String,
        cask_url: String,
    ) -> Self {
        Self {
            transport: Arc::new(transport),
            ttl,
            formula_url,
            cask_url,
            formula: Arc::new(Mutex::new(SourceState::default())),
            cask: Arc::new(Mutex::new(SourceState::default())),
            last_error: Arc::new(Mutex::new(None)),
        }
    }

    fn state(&self, source: RegistrySource) -> &Arc<Mutex<SourceState>> {
        match source {
            RegistrySource::Formula => &self.formula,
            RegistrySource::Cask => &self.cask,
        }
    }

    fn url(&self, source: RegistrySource) -> &str {
        match source {
            RegistrySource::Formula => &self.formula_url,
            RegistrySource::Cask => &self.cask_url,
        }
    }

    /// Fetch one source, serving the cached list while it is fresh.
    ///
    /// Never fails: a failed fetch returns the previous list (possibly
    /// empty) and records the error in [`last_error`](Self::last_error).
    pub async fn fetch(&self, source: RegistrySource) -> Vec<CatalogEntry> {
        let shared = {
            let mut state = self.state(source).lock().unwrap();
            if state.is_fresh(self.ttl) {
                return state.list.clone();
            }
            match &state.inflight {
                Some(inflight) => inflight.clone(),
                None => {
                    let fut = self.spawn_fetch(source, state.generation);
                    state.inflight = Some(fut.clone());
                    fut
                }
            }
        };

        match shared.await {
            Ok(list) => list,
            Err(_) => self.state(source).lock().unwrap().list.clone(),
        }
    }

    /// Build the shared fetch future for one source.
    ///
    /// The future commits its own outcome on completion, so the cache write
    /// happens no matter which caller drives it to the end and survives the
    /// creating caller being cancelled. A result from a generation older
    /// than the current one (the cache was cleared in the meantime) is
    /// discarded.
    fn spawn_fetch(&self, source: RegistrySource, generation: u64) -> SharedFetch {
        let transport = Arc::clone(&self.transport);
        let url = self.url(source).to_string();
        let state = Arc::clone(self.state(source));
        let last_error = Arc::clone(&self.last_error);
        async move {
            let outcome = match transport.fetch(&url).await {
                Ok(body) => Ok(match source {
                    RegistrySource::Formula => formulae_from_json(&body),
                    RegistrySource::Cask => casks_from_json(&body),
                }),
                Err(e) => Err(e.to_string()),
            };

            let mut state = state.lock().unwrap();
            if state.generation == generation {
                state.inflight = None;
                match &outcome {
                    Ok(list) => {
                        debug!("Fetched {} {} entries", list.len(), source.label());
                        state.list = list.clone();
                        state.fetched_at = Some(Instant::now());
                        *last_error.lock().unwrap() = None;
                    }
                    Err(e) => {
                        warn!(
                            "Fetching {} failed ({}); serving {} cached entries",
                            source.label(),
                            e,
                            state.list.len()
                        );
                        *last_error.lock().unwrap() = Some(e.clone());
                    }
                }
            }
            outcome
        }
        .boxed()
        .shared()
    }

    /// Drop freshness and any in-flight fetch for both sources, so the next
    /// fetch always issues a new network request. The stale lists are kept
    /// as a degradation fallback.
    pub fn clear(&self) {
        for state in [&self.formula, &self.cask] {
            let mut state = state.lock().unwrap();
            state.fetched_at = None;
            state.inflight = None;
            state.generation += 1;
        }
        debug!("Registry cache cleared");
    }

    /// Whether a fetch is currently in flight for either source.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.formula.lock().unwrap().inflight.is_some()
            || self.cask.lock().unwrap().inflight.is_some()
    }

    /// Message of the most recent failed fetch, cleared by the next success.
    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.last_error.lock().unwrap().clone()
    }
}
