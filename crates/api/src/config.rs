//! Application configuration loaded from environment variables.

use routing::SearchConfig;
use thiserror::Error;

/// A configuration variable was set to something unusable.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid value '{value}' for {name}: {reason}")]
pub struct ConfigError {
    pub name: &'static str,
    pub value: String,
    pub reason: String,
}

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST`: bind address (default: `"0.0.0.0"`)
/// - `PORT`: listen port (default: `3000`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `ROUTING_MAX_LEGS`: leg cap for itinerary search (default: unset)
/// - `ROUTING_MAX_RESULTS`: itineraries returned per search (default: `10`)
/// - `ROUTING_MAX_EXPANSIONS`: search budget (default: `100000`)
/// - `SEED_DEMO_NETWORK`: register the demo network at startup (default: `true`)
/// - `EVENT_LOG_CAPACITY`: published events kept for queries (default: unbounded)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub search: SearchConfig,
    pub seed_demo_network: bool,
    pub event_log_capacity: Option<usize>,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse(&lookup, "PORT")?.unwrap_or(defaults.port),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            search: SearchConfig::new(
                parse(&lookup, "ROUTING_MAX_LEGS")?,
                parse(&lookup, "ROUTING_MAX_RESULTS")?.unwrap_or(defaults.search.max_results),
                parse(&lookup, "ROUTING_MAX_EXPANSIONS")?
                    .unwrap_or(defaults.search.max_expansions),
            ),
            seed_demo_network: parse(&lookup, "SEED_DEMO_NETWORK")?
                .unwrap_or(defaults.seed_demo_network),
            event_log_capacity: parse(&lookup, "EVENT_LOG_CAPACITY")?,
        })
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            search: SearchConfig::default(),
            seed_demo_network: true,
            event_log_capacity: None,
        }
    }
}

fn parse<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        None => Ok(None),
        Some(value) if value.trim().is_empty() => Ok(None),
        Some(value) => match value.trim().parse::<T>() {
            Ok(parsed) => Ok(Some(parsed)),
            Err(e) => Err(ConfigError {
                name,
                reason: e.to_string(),
                value,
            }),
        },
    }
}
