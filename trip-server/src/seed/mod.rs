//! Seed data sources for the catalogue.
//!
//! A seed source supplies the base trip table that catalogue pages are
//! generated from. The table may be compiled in, read from a JSON file, or
//! fetched from a remote catalogue service. Every source returns a
//! non-empty table with unique ids, or an error.

mod error;
pub(crate) mod remote;
mod table;

use std::future::Future;
use std::sync::Arc;

use crate::cache::CachedSeed;

pub use error::SourceError;
pub use remote::{RemoteSeed, RemoteSeedConfig};
pub use table::{Popularity, SeedTable, SeedTrip, StaticSeed, builtin_trips, convert_table};

/// Supplies the base trip table.
///
/// The catalogue calls this once per initialisation and once per page
/// growth it actually issues.
pub trait SeedSource: Send + Sync {
    fn base_records(
        &self,
    ) -> impl Future<Output = Result<Arc<SeedTable>, SourceError>> + Send;
}

/// The seed source chosen at startup.
pub enum AnySeed {
    Static(StaticSeed),
    Remote(CachedSeed),
}

impl SeedSource for AnySeed {
    async fn base_records(&self) -> Result<Arc<SeedTable>, SourceError> {
        match self {
            AnySeed::Static(seed) => seed.base_records().await,
            AnySeed::Remote(seed) => seed.base_records().await,
        }
    }
}
