//! Web layer for the trip catalogue.
//!
//! A thin JSON surface over the catalogue operations: reading the
//! projection, typing a query, switching facets and growing the list.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppState, Session};
