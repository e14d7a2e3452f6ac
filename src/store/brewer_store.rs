use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use anyhow::Result;
use tracing::{debug, error, info};

use crate::content::ContentSource;
use crate::content::items_query::{ItemsQuery, SortOrder};
use crate::content::responses::{ItemsResponse, TaxonomyResponse};
use crate::filter::brewer_filter::Filter;
use crate::store::cancellation::{CancellationSignal, Generation};
use crate::store::change_listeners::{ChangeListener, ChangeListeners};
use crate::store::store_state::{StoreState, reset_store};
use crate::types::brewer::Brewer;
use crate::types::language_codes::LanguageCodes;
use crate::types::taxonomy::TaxonomyTerm;

const BREWER_TYPE: &str = "brewer";
const BREWER_ORDER_FIELD: &str = "elements.product_name";
const MANUFACTURER_TAXONOMY: &str = "manufacturer";
const PRODUCT_STATUS_TAXONOMY: &str = "product_status";

/// Filter handle shared between the store and its readers.
pub type SharedFilter = Arc<RwLock<Filter>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchKind {
    Brewers,
    Manufacturers,
    ProductStatuses,
}

impl fmt::Display for FetchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Brewers => write!(f, "brewers"),
            Self::Manufacturers => write!(f, "manufacturers"),
            Self::ProductStatuses => write!(f, "product-statuses"),
        }
    }
}

/// Cache of brewers (per language), manufacturers and product statuses.
///
/// `provide_*` actions spawn a fetch on the ambient tokio runtime and return
/// immediately; when the response arrives the cache is replaced and every
/// change listener is called. Reads are synchronous snapshots of the cache.
/// Cloning the store hands out another handle to the same cache.
#[derive(Clone)]
pub struct BrewerStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    source: Arc<dyn ContentSource>,
    languages: LanguageCodes,
    cancellation: CancellationSignal,
    state: Mutex<Guarded>,
}

struct Guarded {
    cache: StoreState,
    filter: SharedFilter,
    listeners: ChangeListeners,
}

impl BrewerStore {
    pub fn new(source: Arc<dyn ContentSource>, languages: LanguageCodes) -> Self {
        let cache = reset_store(&languages);

        Self {
            inner: Arc::new(StoreInner {
                source,
                languages,
                cancellation: CancellationSignal::new(),
                state: Mutex::new(Guarded {
                    cache,
                    filter: Arc::new(RwLock::new(Filter::new())),
                    listeners: ChangeListeners::default(),
                }),
            }),
        }
    }

    pub fn languages(&self) -> &LanguageCodes {
        &self.inner.languages
    }

    // Actions

    /// Fetches the brewer list the slug is looked up in; the slug itself is
    /// only used by [`BrewerStore::get_brewer`].
    pub fn provide_brewer(&self, _brewer_slug: &str, language: Option<&str>) {
        self.fetch_brewers(language);
    }

    pub fn provide_brewers(&self, language: Option<&str>) {
        self.fetch_brewers(language);
    }

    pub fn provide_manufacturers(&self) {
        self.fetch_taxonomy(FetchKind::Manufacturers, MANUFACTURER_TAXONOMY, |state, terms| {
            state.manufacturers = terms;
        });
    }

    pub fn provide_product_statuses(&self) {
        self.fetch_taxonomy(FetchKind::ProductStatuses, PRODUCT_STATUS_TAXONOMY, |state, terms| {
            state.product_statuses = terms;
        });
    }

    // Reads

    pub fn get_brewer(&self, brewer_slug: &str, language: Option<&str>) -> Option<Brewer> {
        let language = self.inner.languages.resolve(language);
        let guarded = self.inner.lock();

        guarded
            .cache
            .brewers
            .get(language)?
            .iter()
            .find(|brewer| brewer.slug() == brewer_slug)
            .cloned()
    }

    /// Cached brewers for exactly `language`. No default is substituted, so
    /// `None` only ever finds nothing.
    pub fn get_brewers(&self, language: Option<&str>) -> Option<Vec<Brewer>> {
        let language = language?;
        self.inner.lock().cache.brewers.get(language).cloned()
    }

    /// Brewers for `language` (or the default) that pass the current filter.
    pub fn get_filtered_brewers(&self, language: Option<&str>) -> Vec<Brewer> {
        let language = self.inner.languages.resolve(language);
        let guarded = self.inner.lock();

        let Some(brewers) = guarded.cache.brewers.get(language) else {
            return Vec::new();
        };

        let filter = guarded.filter.read().unwrap_or_else(PoisonError::into_inner);
        filter.apply(brewers)
    }

    pub fn get_manufacturers(&self) -> Vec<TaxonomyTerm> {
        self.inner.lock().cache.manufacturers.clone()
    }

    pub fn get_product_statuses(&self) -> Vec<TaxonomyTerm> {
        self.inner.lock().cache.product_statuses.clone()
    }

    pub fn get_filter(&self) -> SharedFilter {
        Arc::clone(&self.inner.lock().filter)
    }

    /// Installs `filter` as a new shared instance and notifies listeners.
    /// Handles obtained from earlier [`BrewerStore::get_filter`] calls keep
    /// pointing at the replaced instance.
    pub fn set_filter(&self, filter: Filter) {
        let listeners = {
            let mut guarded = self.inner.lock();
            guarded.filter = Arc::new(RwLock::new(filter));
            guarded.listeners.clone()
        };

        listeners.notify();
    }

    // Listeners

    pub fn add_change_listener(&self, listener: ChangeListener) {
        self.inner.lock().listeners.add(listener);
    }

    pub fn remove_change_listener(&self, listener: &ChangeListener) {
        self.inner.lock().listeners.remove(listener);
    }

    // Lifecycle

    /// Cancels every fetch issued so far. Fetches issued afterwards run
    /// normally.
    pub fn unsubscribe(&self) {
        let _guarded = self.inner.lock();
        let generation = self.inner.cancellation.cancel_all();

        debug!(generation, "cancelled in-flight fetches");
    }

    /// Drops all cached content. The filter and listeners are kept.
    pub fn reset(&self) {
        self.inner.lock().cache = reset_store(&self.inner.languages);
    }

    fn fetch_brewers(&self, language: Option<&str>) {
        let mut query = ItemsQuery::new()
            .content_type(BREWER_TYPE)
            .order_by(BREWER_ORDER_FIELD, SortOrder::Ascending);

        if let Some(language) = language {
            query = query.language(language);
        }

        let key = self.inner.languages.resolve(language).to_string();
        let source = Arc::clone(&self.inner.source);

        self.spawn_fetch(
            FetchKind::Brewers,
            async move { source.items(&query).await },
            move |state, response: ItemsResponse| {
                info!(language = %key, count = response.items.len(), "brewers cached");
                state.brewers.insert(key, response.items);
            },
        );
    }

    fn fetch_taxonomy(
        &self,
        kind: FetchKind,
        group: &'static str,
        apply: impl FnOnce(&mut StoreState, Vec<TaxonomyTerm>) + Send + 'static,
    ) {
        let source = Arc::clone(&self.inner.source);

        self.spawn_fetch(
            kind,
            async move { source.taxonomy(group).await },
            move |state, response: TaxonomyResponse| {
                let terms = response.taxonomy.terms;
                info!(%kind, count = terms.len(), "taxonomy cached");
                apply(state, terms);
            },
        );
    }

    fn spawn_fetch<T, F>(
        &self,
        kind: FetchKind,
        fetch: F,
        apply: impl FnOnce(&mut StoreState, T) + Send + 'static,
    ) where
        F: Future<Output = Result<T>> + Send + 'static,
        T: Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        let mut generation = inner.cancellation.current();

        tokio::spawn(async move {
            let result = tokio::select! {
                result = fetch => result,
                _ = generation.cancelled() => {
                    debug!(%kind, "fetch cancelled before completion");
                    return;
                }
            };

            let response = match result {
                Ok(response) => response,
                Err(error) => {
                    error!(%kind, "fetch failed: {error:?}");
                    return;
                }
            };

            let listeners = {
                let mut guarded = inner.lock();
                if !generation.is_current() {
                    debug!(%kind, "dropping response from cancelled fetch");
                    return;
                }

                apply(&mut guarded.cache, response);
                guarded.listeners.clone()
            };

            notify_if_current(kind, &generation, &listeners);
        });
    }
}

/// Listeners run outside the store lock, so `generation` is checked once more
/// right before they are called. An `unsubscribe` that lands while the
/// callbacks are already running does not stop them.
fn notify_if_current(kind: FetchKind, generation: &Generation, listeners: &ChangeListeners) {
    if !generation.is_current() {
        debug!(%kind, "skipping notification for cancelled fetch");
        return;
    }

    listeners.notify();
}

impl StoreInner {
    fn lock(&self) -> MutexGuard<'_, Guarded> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for BrewerStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guarded = self.inner.lock();
        let cached: Vec<(&String, usize)> = guarded
            .cache
            .brewers
            .iter()
            .map(|(language, brewers)| (language, brewers.len()))
            .collect();

        f.debug_struct("BrewerStore")
            .field("brewers", &cached)
            .field("manufacturers", &guarded.cache.manufacturers.len())
            .field("product_statuses", &guarded.cache.product_statuses.len())
            .field("listeners", &guarded.listeners)
            .finish()
    }
}
