//! Domain types for the trip catalogue.
//!
//! This module contains the validated value types that the catalogue core
//! operates on. All types enforce their invariants at construction time, so
//! code that receives them can trust their validity.

mod error;
mod facet;
mod trip;

pub use error::DomainError;
pub use facet::{
    FacetCategory, FacetSelection, FacetSet, category_label, facet_option, facet_options,
};
pub use trip::{Level, Price, Rating, TripId, TripRecord};
