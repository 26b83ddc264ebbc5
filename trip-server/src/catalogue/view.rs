//! The catalogue view: projection of the store plus page growth.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::domain::{FacetCategory, FacetSelection, FacetSet, TripId, TripRecord};
use crate::seed::{SeedSource, SeedTable};

use super::config::CatalogueConfig;
use super::filter::FacetFilter;
use super::sort::SortOrder;
use super::store::{CatalogueStore, PageGenerator};
use super::CatalogueError;

/// Filter `records` by `query` and `facets`, then sort by the active sort
/// option.
///
/// Pure: the same inputs always give the same output, and the input order
/// is kept among records the sort considers equal.
pub fn project<'a>(
    records: &'a [TripRecord],
    query: &str,
    facets: &FacetSet,
) -> Vec<&'a TripRecord> {
    let filter = FacetFilter::new(query, facets);
    let mut projected: Vec<&TripRecord> = if filter.is_pass_through() {
        records.iter().collect()
    } else {
        records.iter().filter(|r| filter.matches(r)).collect()
    };
    SortOrder::from_facets(facets).apply(&mut projected);
    projected
}

/// What the reader has typed and switched on.
///
/// Owned by the caller and passed into the view, so the view itself holds
/// no per-reader state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowseState {
    query: String,
    facets: FacetSet,
}

impl BrowseState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Switch a facet on or off. Returns `true` if it is now active.
    pub fn toggle_facet(&mut self, selection: FacetSelection) -> bool {
        self.facets.toggle(selection)
    }

    pub fn clear_category(&mut self, category: &FacetCategory) -> usize {
        self.facets.clear_category(category)
    }

    pub fn clear_all(&mut self) {
        self.facets.clear_all();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn facets(&self) -> &FacetSet {
        &self.facets
    }
}

/// Result of a growth request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthOutcome {
    /// A page was appended.
    Appended { added: usize, total: usize },
    /// Another request was already in flight; nothing was issued.
    Coalesced,
}

/// Clears the in-flight flag when dropped, including on error or when the
/// awaiting caller goes away.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// The loaded catalogue and its growth state.
///
/// The store sits behind a lock and growth behind an atomic flag, so at
/// most one page request is outstanding no matter how many tasks trigger
/// growth at once.
pub struct CatalogueView<S: SeedSource> {
    source: S,
    store: RwLock<CatalogueStore>,
    /// Base table of the most recent successful fetch.
    table: RwLock<Arc<SeedTable>>,
    growing: AtomicBool,
    config: CatalogueConfig,
}

impl<S: SeedSource> CatalogueView<S> {
    /// Create an empty view. Call `initialize` to load the first page.
    pub fn new(source: S, config: CatalogueConfig) -> Result<Self, CatalogueError> {
        config.validate()?;
        let store = CatalogueStore::new(PageGenerator::new(config.generator_seed));

        Ok(Self {
            source,
            store: RwLock::new(store),
            table: RwLock::default(),
            growing: AtomicBool::new(false),
            config,
        })
    }

    /// Replace the store contents with a fresh first page.
    ///
    /// On failure the store is left as it was.
    pub async fn initialize(&self) -> Result<usize, CatalogueError> {
        let base = self.source.base_records().await?;
        let mut store = self.store.write().await;
        let added = store.initialize(base.records(), self.config.initial_page_size)?;
        *self.table.write().await = base;
        info!(added, "catalogue initialized");
        Ok(added)
    }

    /// Ask for one more page.
    ///
    /// If a request is already outstanding this returns `Coalesced`
    /// without touching the seed source. Otherwise it waits out the
    /// configured latency, fetches the base table once, and appends a
    /// page. A failed request leaves the store unchanged and can be
    /// retried.
    pub async fn request_growth(&self) -> Result<GrowthOutcome, CatalogueError> {
        let Some(_in_flight) = InFlight::acquire(&self.growing) else {
            debug!("growth already in flight; coalescing");
            return Ok(GrowthOutcome::Coalesced);
        };

        if !self.config.growth_latency.is_zero() {
            tokio::time::sleep(self.config.growth_latency).await;
        }

        let base = self
            .source
            .base_records()
            .await
            .inspect_err(|e| warn!(error = %e, "page growth failed"))?;

        let mut store = self.store.write().await;
        let added = store.append_page(base.records(), self.config.page_size)?;
        let total = store.len();
        *self.table.write().await = base;
        info!(added, total, "appended catalogue page");

        Ok(GrowthOutcome::Appended { added, total })
    }

    /// The ordered, filtered records for `state`.
    pub async fn project(&self, state: &BrowseState) -> Vec<TripRecord> {
        let store = self.store.read().await;
        let projected: Vec<TripRecord> = project(store.records(), state.query(), state.facets())
            .into_iter()
            .cloned()
            .collect();
        debug!(
            query = state.query(),
            facets = state.facets().len(),
            shown = projected.len(),
            loaded = store.len(),
            "projected catalogue"
        );
        projected
    }

    /// Look up a loaded trip.
    pub async fn get(&self, id: &TripId) -> Option<TripRecord> {
        self.store.read().await.get(id).cloned()
    }

    /// Number of loaded records.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }

    /// The base table loaded pages were last generated from.
    ///
    /// Empty until the first successful `initialize`.
    pub async fn seed_table(&self) -> Arc<SeedTable> {
        Arc::clone(&*self.table.read().await)
    }

    /// Whether a growth request is outstanding.
    pub fn is_growing(&self) -> bool {
        self.growing.load(Ordering::Acquire)
    }

    pub fn config(&self) -> &CatalogueConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::facet_options;
    use crate::seed::builtin_trips;
    use crate::seed::convert_table;
    use proptest::prelude::*;

    fn records() -> Vec<TripRecord> {
        let base = convert_table(builtin_trips()).unwrap();
        let mut store = CatalogueStore::default();
        store.initialize(base.records(), 24).unwrap();
        store.records().to_vec()
    }

    fn facets_strategy() -> impl Strategy<Value = FacetSet> {
        let options = facet_options().to_vec();
        prop::collection::vec(prop::sample::select(options), 0..6)
            .prop_map(|selections| selections.into_iter().collect())
    }

    proptest! {
        #[test]
        fn projection_is_idempotent(
            query in prop_oneof![Just(String::new()), "[a-zø]{1,3}"],
            facets in facets_strategy(),
        ) {
            let records = records();
            let first = project(&records, &query, &facets);
            let second = project(&records, &query, &facets);
            prop_assert_eq!(first, second);
        }

        /// Every projected record matches, and every matching record is projected.
        #[test]
        fn projection_is_exactly_the_matches(
            query in prop_oneof![Just(String::new()), "[a-zø]{1,3}"],
            facets in facets_strategy(),
        ) {
            let records = records();
            let projected = project(&records, &query, &facets);
            let expected = records
                .iter()
                .filter(|r| crate::catalogue::matches(r, &query, &facets))
                .count();

            prop_assert_eq!(projected.len(), expected);
            prop_assert!(facets.iter().filter(|f| f.category == FacetCategory::Sort).count() <= 1);
        }
    }
}
