//! Catalogue configuration.

use std::time::Duration;

use super::CatalogueError;

/// Configuration parameters for the catalogue store and its growth.
#[derive(Debug, Clone)]
pub struct CatalogueConfig {
    /// Number of records materialised by `initialize`.
    pub initial_page_size: usize,

    /// Number of records appended per growth request.
    pub page_size: usize,

    /// Minimum time a growth request takes before its page is visible.
    pub growth_latency: Duration,

    /// Rotates where page generation starts in the seed table.
    pub generator_seed: u64,
}

impl CatalogueConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        initial_page_size: usize,
        page_size: usize,
        growth_latency: Duration,
        generator_seed: u64,
    ) -> Self {
        Self {
            initial_page_size,
            page_size,
            growth_latency,
            generator_seed,
        }
    }

    /// Same configuration with no artificial growth latency.
    pub fn without_latency(mut self) -> Self {
        self.growth_latency = Duration::ZERO;
        self
    }

    /// Check that every page adds at least one record.
    pub fn validate(&self) -> Result<(), CatalogueError> {
        if self.initial_page_size == 0 {
            return Err(CatalogueError::InvalidConfig(
                "initial_page_size must be at least 1",
            ));
        }
        if self.page_size == 0 {
            return Err(CatalogueError::InvalidConfig("page_size must be at least 1"));
        }
        Ok(())
    }
}

impl Default for CatalogueConfig {
    fn default() -> Self {
        Self {
            initial_page_size: 20,
            page_size: 8,
            growth_latency: Duration::from_secs(1),
            generator_seed: 0,
        }
    }
}
