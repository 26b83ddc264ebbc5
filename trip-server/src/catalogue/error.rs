//! Catalogue error types.

use crate::seed::SourceError;

/// Errors from loading or growing the catalogue.
#[derive(Debug, thiserror::Error)]
pub enum CatalogueError {
    /// The seed source failed; the store is left unchanged
    #[error("seed source failed: {0}")]
    Source(#[from] SourceError),

    /// A page would add no records (empty seed or zero page size)
    #[error("page would be empty")]
    EmptyPage,

    /// Configuration rejected at construction
    #[error("invalid catalogue config: {0}")]
    InvalidConfig(&'static str),
}
