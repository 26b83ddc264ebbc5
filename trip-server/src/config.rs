//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::catalogue::CatalogueConfig;

/// Error reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value {value:?} for {var}: {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: String,
}

/// Where the base trip table comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedChoice {
    /// The compiled-in table.
    Builtin,
    /// A JSON file on disk.
    File(PathBuf),
    /// A remote catalogue service.
    Remote(String),
}

/// Configuration for the whole server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub seed: SeedChoice,
    /// TTL of the cached remote table.
    pub seed_cache_ttl: Duration,
    pub catalogue: CatalogueConfig,
}

impl AppConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    ///
    /// `TRIP_SEED_URL` wins over `TRIP_SEED_FILE`; with neither set the
    /// compiled-in table is used.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = CatalogueConfig::default();

        let bind_addr = parse_or(
            &lookup,
            "TRIP_BIND_ADDR",
            SocketAddr::from(([127, 0, 0, 1], 3000)),
        )?;

        let seed = match (lookup("TRIP_SEED_URL"), lookup("TRIP_SEED_FILE")) {
            (Some(url), _) if !url.is_empty() => SeedChoice::Remote(url),
            (_, Some(path)) if !path.is_empty() => SeedChoice::File(PathBuf::from(path)),
            _ => SeedChoice::Builtin,
        };

        let seed_cache_ttl =
            Duration::from_secs(parse_or(&lookup, "TRIP_SEED_CACHE_TTL_SECS", 60)?);

        let catalogue = CatalogueConfig::new(
            parse_or(&lookup, "TRIP_INITIAL_PAGE", defaults.initial_page_size)?,
            parse_or(&lookup, "TRIP_PAGE_SIZE", defaults.page_size)?,
            Duration::from_millis(parse_or(
                &lookup,
                "TRIP_GROWTH_LATENCY_MS",
                defaults.growth_latency.as_millis() as u64,
            )?),
            parse_or(&lookup, "TRIP_GENERATOR_SEED", defaults.generator_seed)?,
        );

        Ok(Self {
            bind_addr,
            seed,
            seed_cache_ttl,
            catalogue,
        })
    }
}

/// Parse a variable if set, otherwise use `default`.
fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError {
            var,
            value: value.clone(),
            reason: e.to_string(),
        }),
    }
}
