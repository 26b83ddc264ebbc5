//! Application state for the web layer.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::catalogue::{BrowseState, CatalogueView};
use crate::domain::TripId;
use crate::seed::{AnySeed, Popularity, SeedTable};

/// Per-reader state that lives only in memory.
#[derive(Debug, Default)]
pub struct Session {
    /// Query and active facets.
    pub browse: BrowseState,

    /// Like state of trips the reader has toggled. Presentation state, not
    /// catalogue data; untouched trips show what the seed table says.
    pub likes: HashMap<TripId, Popularity>,
}

impl Session {
    /// Current like state of a loaded trip.
    pub fn popularity(&self, id: &TripId, table: &SeedTable) -> Popularity {
        self.likes
            .get(id)
            .copied()
            .unwrap_or_else(|| table.popularity(id))
    }

    /// Flip the liked flag of a loaded trip and return its new state.
    pub fn toggle_like(&mut self, id: &TripId, table: &SeedTable) -> Popularity {
        let popularity = self
            .likes
            .entry(id.clone())
            .or_insert_with(|| table.popularity(id));
        popularity.toggle();
        *popularity
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Loaded catalogue
    pub catalogue: Arc<CatalogueView<AnySeed>>,

    /// The single browse session this process serves
    pub session: Arc<RwLock<Session>>,
}

impl AppState {
    /// Create a new app state with an empty session.
    pub fn new(catalogue: CatalogueView<AnySeed>) -> Self {
        Self {
            catalogue: Arc::new(catalogue),
            session: Arc::new(RwLock::new(Session::default())),
        }
    }
}
