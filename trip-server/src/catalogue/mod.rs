//! Catalogue core: the loaded trips and the filtered, sorted view over them.
//!
//! The store grows one page at a time as the reader reaches the end of
//! the list. Filtering and sorting are pure functions of the loaded
//! records, the search text and the active facets, so the rendering layer
//! can recompute the projection on every input event.

mod config;
mod error;
mod filter;
mod sort;
mod store;
mod view;

pub use config::CatalogueConfig;
pub use error::CatalogueError;
pub use filter::{FacetFilter, matches};
pub use sort::SortOrder;
pub use store::{CatalogueStore, PageGenerator};
pub use view::{BrowseState, CatalogueView, GrowthOutcome, project};
