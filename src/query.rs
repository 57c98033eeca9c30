//! Query façade over the whole pipeline: fetch, normalize, enhance, merge,
//! dedup, rank.
//!
//! The façade never fails. A registry outage degrades to curated-only
//! results and a readable error flag; callers decide whether to surface it.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::configuration::Settings;
use crate::data::{Category, CatalogEntry};
use crate::data::loaders::{load_bundled_tools, load_user_tools, merge_curated};
use crate::enhance::enhance;
use crate::errors::Result;
use crate::merge::merge;
use crate::rank::{editors_picks, rank, WindowPolicy};
use crate::registry::{HttpTransport, RegistryCache, RegistrySource, RegistryTransport};

/// Default settle interval for interactive search input.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Owns the curated list, the registry cache and the ranking knobs.
pub struct CatalogQuery<T: RegistryTransport> {
    curated: Vec<CatalogEntry>,
    cache: RegistryCache<T>,
    windows: WindowPolicy,
}

impl CatalogQuery<HttpTransport> {
    /// Build the production façade: HTTP transport, bundled curated list
    /// plus the configured user overlay.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let transport = HttpTransport::new(settings.timeout())?;
        let cache = RegistryCache::with_endpoints(
            transport,
            settings.ttl(),
            settings.registry.formula_url.clone(),
            settings.registry.cask_url.clone(),
        );
        let mut curated = load_bundled_tools();
        if let Some(path) = &settings.curated_file {
            curated = merge_curated(curated, load_user_tools(path)?);
        }
        Ok(Self::new(curated, cache, settings.window_policy()))
    }
}

impl<T: RegistryTransport> CatalogQuery<T> {
    pub fn new(
        curated: Vec<CatalogEntry>,
        cache: RegistryCache<T>,
        windows: WindowPolicy,
    ) -> Self {
        Self {
            curated,
            cache,
            windows,
        }
    }

    /// One ranked view of the catalog.
    ///
    /// A search string of two or more characters selects fuzzy ranking over
    /// the scoped candidate set; otherwise the windowed popular-first view
    /// applies. A category, when given, scopes the candidates first.
    pub async fn query(
        &self,
        search: &str,
        category: Option<Category>,
        show_all: bool,
    ) -> Vec<CatalogEntry> {
        let remote = self.remote_catalog().await;
        let curated = enhance(self.curated.clone(), &remote);
        let mut merged = merge(curated, remote);
        if let Some(category) = category {
            merged.retain(|entry| entry.category == category);
        }
        rank(merged, search, show_all, &self.windows)
    }

    /// Editor's picks: curated entries flagged as picks, deduplicated and
    /// windowed like a category view.
    pub async fn picks(&self, show_all: bool) -> Vec<CatalogEntry> {
        let remote = self.remote_catalog().await;
        let curated = enhance(self.curated.clone(), &remote);
        editors_picks(&curated, show_all, &self.windows)
    }

    /// Full normalized remote catalog (deprecated and disabled records
    /// already filtered out during normalization).
    pub async fn all_packages(&self) -> Vec<CatalogEntry> {
        self.remote_catalog().await
    }

    /// Merged catalog scoped to one category, popular-first, untruncated.
    pub async fn packages_by_category(&self, category: Category) -> Vec<CatalogEntry> {
        self.query("", Some(category), true).await
    }

    /// The `limit` most popular entries of the merged catalog.
    pub async fn popular_packages(&self, limit: usize) -> Vec<CatalogEntry> {
        let mut popular = self.query("", None, true).await;
        popular.retain(|entry| entry.popular);
        popular.truncate(limit);
        popular
    }

    /// Invalidate the cache and re-fetch both sources.
    pub async fn refresh(&self) {
        debug!("Refreshing registry catalog");
        self.cache.clear();
        futures::join!(
            self.cache.fetch(RegistrySource::Formula),
            self.cache.fetch(RegistrySource::Cask)
        );
    }

    /// Force the next fetch to hit the network.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.cache.is_loading()
    }

    /// Message of the most recent failed fetch, if any.
    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.cache.last_error()
    }

    /// The curated list as configured, before enhancement.
    #[must_use]
    pub fn curated(&self) -> &[CatalogEntry] {
        &self.curated
    }

    async fn remote_catalog(&self) -> Vec<CatalogEntry> {
        let (mut formulae, casks) = futures::join!(
            self.cache.fetch(RegistrySource::Formula),
            self.cache.fetch(RegistrySource::Cask)
        );
        formulae.extend(casks);
        formulae
    }
}

/// Debounces interactive search input.
///
/// The raw text is kept for display; the settled value is published through
/// a watch channel once the input has been quiet for the configured delay.
/// Each new input cancels the pending publication.
pub struct SearchDebouncer {
    delay: Duration,
    raw: String,
    tx: watch::Sender<String>,
    rx: watch::Receiver<String>,
    pending: Option<JoinHandle<()>>,
}

impl SearchDebouncer {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        let (tx, rx) = watch::channel(String::new());
        Self {
            delay,
            raw: String::new(),
            tx,
            rx,
            pending: None,
        }
    }

    /// Record a keystroke's worth of input and restart the settle timer.
    pub fn input(&mut self, text: &str) {
        self.raw = text.to_string();
        if let Some(task) = self.pending.take() {
            task.abort();
        }
        let tx = self.tx.clone();
        let value = self.raw.clone();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(value);
        }));
    }

    /// The text exactly as typed, independent of settling.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The most recently settled value.
    #[must_use]
    pub fn settled(&self) -> String {
        self.rx.borrow().clone()
    }

    /// Receiver notified each time a value settles.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.rx.clone()
    }
}

impl Drop for SearchDebouncer {
    fn drop(&mut self) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }
    }
}
