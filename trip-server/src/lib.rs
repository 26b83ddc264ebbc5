//! Adventure trip catalogue server.
//!
//! Serves a searchable, filterable catalogue of adventure trips that grows
//! page by page as the reader scrolls.

pub mod cache;
pub mod catalogue;
pub mod config;
pub mod domain;
pub mod seed;
pub mod web;

#[cfg(test)]
mod test_fixtures;
