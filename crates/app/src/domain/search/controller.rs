//! Menu filter controller.
//!
//! Drives the product list of a menu page from search input and category
//! selection. Every refresh takes a sequence number and only the response of
//! the latest refresh is applied, so a slow response for an old filter can
//! never overwrite a newer one.
//!
//! Search input goes through a [`Debouncer`] watched by one background task
//! at a time. Each task carries the debounce generation it was started for
//! and stops without touching state once that generation is superseded.

use std::{
    fmt::{self, Debug, Formatter},
    sync::{
        Arc, Mutex, MutexGuard, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
    time::{Duration, Instant},
};

use bistro::{
    products::{CategoryId, Product},
    search::{
        DEFAULT_QUIET_PERIOD, Debouncer, LoadingPhase, ProductFilter, SearchFilterState,
        filter_products,
    },
};
use tokio::{
    sync::{OnceCell, watch},
    task::JoinHandle,
};
use tracing::{debug, error, instrument};

use crate::domain::products::{ProductsService, ProductsServiceError};

/// Where filtering happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterStrategy {
    /// Ask the products service for every filter change.
    #[default]
    FetchPerFilter,

    /// Load every product once and filter in memory.
    FetchOnceFilterLocally,
}

/// What the menu page shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterSnapshot {
    /// Text as typed.
    pub raw_search: String,

    /// Selected category.
    pub category: Option<CategoryId>,

    /// Filter the products were loaded for.
    pub filter: ProductFilter,

    /// Products to display.
    pub products: Vec<Product>,

    /// Set while a refresh is in flight.
    pub loading: Option<LoadingPhase>,

    /// Sequence number of the refresh that produced `products`.
    pub sequence: u64,
}

impl FilterSnapshot {
    /// Whether a refresh is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading.is_some()
    }
}

/// Menu filter controller.
///
/// Cheap to clone; clones share state.
#[derive(Clone)]
pub struct FilterController {
    inner: Arc<Inner>,
}

struct Inner {
    service: Arc<dyn ProductsService>,
    strategy: FilterStrategy,
    quiet: Duration,
    sequence: AtomicU64,
    catalog: OnceCell<Vec<Product>>,
    state: Mutex<State>,
    updates: watch::Sender<FilterSnapshot>,
}

struct State {
    search: SearchFilterState,
    products: Vec<Product>,
    filter: ProductFilter,
    loading: Option<LoadingPhase>,
    applied: u64,
    debouncer: Debouncer<String>,
    debounce: Option<JoinHandle<()>>,
    debounce_generation: u64,
}

impl State {
    fn new(quiet: Duration) -> Self {
        Self {
            search: SearchFilterState::new(),
            products: Vec::new(),
            filter: ProductFilter::default(),
            loading: None,
            applied: 0,
            debouncer: Debouncer::new(quiet),
            debounce: None,
            debounce_generation: 0,
        }
    }

    /// Drop pending search input and retire the debounce task.
    fn cancel_debounce(&mut self) {
        if let Some(text) = self.debouncer.cancel() {
            debug!(%text, "pending search dropped");
        }

        self.debounce_generation += 1;

        if let Some(pending) = self.debounce.take() {
            pending.abort();
        }
    }
}

/// What a debounce task does next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DebounceStep {
    /// Sleep until the pending text is due.
    Wait(Instant),

    /// The text was committed; refresh.
    Commit,

    /// Nothing left to do.
    Stop,
}

impl FilterController {
    /// Create a controller with the default 500 ms search debounce.
    pub fn new(service: Arc<dyn ProductsService>, strategy: FilterStrategy) -> Self {
        Self::with_debounce(service, strategy, DEFAULT_QUIET_PERIOD)
    }

    /// Create a controller with a custom search debounce.
    pub fn with_debounce(
        service: Arc<dyn ProductsService>,
        strategy: FilterStrategy,
        quiet: Duration,
    ) -> Self {
        let (updates, _) = watch::channel(FilterSnapshot::default());

        Self {
            inner: Arc::new(Inner {
                service,
                strategy,
                quiet,
                sequence: AtomicU64::new(0),
                catalog: OnceCell::new(),
                state: Mutex::new(State::new(quiet)),
                updates,
            }),
        }
    }

    /// Current view of the menu.
    pub fn snapshot(&self) -> FilterSnapshot {
        self.inner.snapshot(&self.inner.lock())
    }

    /// Receive a snapshot whenever the view changes.
    pub fn subscribe(&self) -> watch::Receiver<FilterSnapshot> {
        self.inner.updates.subscribe()
    }

    /// Load products for the current filter.
    pub async fn refresh(&self) {
        self.inner.refresh().await;
    }

    /// Record a keystroke in the search box.
    ///
    /// The raw text and category update immediately; the product list is
    /// refreshed once no further input arrives within the quiet period.
    /// Must be called from within a tokio runtime.
    pub fn on_search_input(&self, text: impl Into<String>) {
        let text = text.into();
        let mut state = self.inner.lock();

        state.search.set_search(text.clone());
        state.debouncer.push(text, now());

        if state.debounce.is_none() {
            let generation = state.debounce_generation;
            let inner = Arc::clone(&self.inner);

            state.debounce = Some(tokio::spawn(inner.run_debounce(generation)));
        }

        self.inner.publish(&state);
    }

    /// Apply search text at once, as if the quiet period had passed.
    pub async fn submit_search(&self, text: impl Into<String>) {
        {
            let mut state = self.inner.lock();
            let text = text.into();

            state.cancel_debounce();
            state.search.set_search(text.clone());
            state.search.commit_search(text);
        }

        self.inner.refresh().await;
    }

    /// Select or deselect a category and refresh immediately.
    ///
    /// Any pending search input is dropped.
    pub async fn select_category(&self, category: Option<CategoryId>) {
        {
            let mut state = self.inner.lock();

            state.cancel_debounce();
            state.search.select_category(category);
        }

        self.inner.refresh().await;
    }
}

impl Inner {
    async fn run_debounce(self: Arc<Self>, generation: u64) {
        loop {
            match self.debounce_step(generation, now()) {
                DebounceStep::Wait(deadline) => {
                    tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await;
                }
                DebounceStep::Commit => {
                    self.refresh().await;

                    return;
                }
                DebounceStep::Stop => return,
            }
        }
    }

    fn debounce_step(&self, generation: u64, now: Instant) -> DebounceStep {
        let mut state = self.lock();

        if state.debounce_generation != generation {
            debug!(generation, "superseded debounce task stopped");

            return DebounceStep::Stop;
        }

        if let Some(text) = state.debouncer.poll(now) {
            state.search.commit_search(text);
            state.debounce = None;

            return DebounceStep::Commit;
        }

        match state.debouncer.deadline() {
            Some(deadline) => DebounceStep::Wait(deadline),
            None => {
                state.debounce = None;

                DebounceStep::Stop
            }
        }
    }

    #[instrument(skip(self))]
    async fn refresh(&self) {
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;

        let filter = {
            let mut state = self.lock();
            let filter = state.search.filter();

            state.loading = Some(filter.loading_phase());
            self.publish(&state);

            filter
        };

        debug!(sequence, %filter, "refreshing products");

        let result = self.fetch(&filter).await;

        let mut state = self.lock();

        if sequence != self.sequence.load(Ordering::SeqCst) {
            debug!(sequence, %filter, "discarding stale product response");

            return;
        }

        state.products = result.unwrap_or_else(|error| {
            error!(%error, %filter, "failed to load products");

            Vec::new()
        });
        state.filter = filter;
        state.loading = None;
        state.applied = sequence;

        self.publish(&state);
    }

    async fn fetch(&self, filter: &ProductFilter) -> Result<Vec<Product>, ProductsServiceError> {
        match self.strategy {
            FilterStrategy::FetchPerFilter => match filter {
                ProductFilter::All => self.service.list_products().await,
                ProductFilter::Search(text) => self.service.search_products(text).await,
                ProductFilter::Category(category) => {
                    self.service.list_by_category(*category).await
                }
            },
            FilterStrategy::FetchOnceFilterLocally => {
                let catalog = self
                    .catalog
                    .get_or_try_init(|| self.service.list_products())
                    .await?;

                Ok(filter_products(catalog, filter))
            }
        }
    }

    fn snapshot(&self, state: &State) -> FilterSnapshot {
        FilterSnapshot {
            raw_search: state.search.raw_search().to_string(),
            category: state.search.category(),
            filter: state.filter.clone(),
            products: state.products.clone(),
            loading: state.loading,
            sequence: state.applied,
        }
    }

    fn publish(&self, state: &State) {
        self.updates.send_replace(self.snapshot(state));
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Current time on the tokio clock, so paused test time applies.
fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}

impl Debug for FilterController {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterController")
            .field("strategy", &self.inner.strategy)
            .field("quiet", &self.inner.quiet)
            .field("sequence", &self.inner.sequence.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}
