//! Server configuration, read from the environment.

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

const DEFAULT_POLL_MS: u64 = 500;
const MIN_POLL_MS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Listen address (`VECDRAW_ADDR`).
    pub addr: SocketAddr,
    /// How often each room's mailbox is drained (`VECDRAW_POLL_MS`).
    pub poll_interval: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            poll_interval: Duration::from_millis(DEFAULT_POLL_MS),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. Unparsable values fall back to
    /// the default with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let addr = parse_or("VECDRAW_ADDR", lookup("VECDRAW_ADDR"), defaults.addr);
        let poll_ms = parse_or("VECDRAW_POLL_MS", lookup("VECDRAW_POLL_MS"), DEFAULT_POLL_MS);
        Self {
            addr,
            poll_interval: Duration::from_millis(poll_ms.max(MIN_POLL_MS)),
        }
    }
}

fn parse_or<T: FromStr>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {}={:?}, using default", key, raw);
            default
        }),
    }
}
