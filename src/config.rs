// Runtime settings. Everything is read from environment variables with a
// hard-coded fallback; there are no config files or flags.

use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use crate::menu::Navigation;

pub const DEFAULT_API_URL: &str = "https://r6-api.vercel.app/api/operators";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_CACHE_TTL_SECS: u64 = 3600;

/// Settings for one run of the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub timeout: Duration,
    /// Zero disables the operator cache.
    pub cache_ttl: Duration,
    pub cache_file: Option<PathBuf>,
    pub navigation: Navigation,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            cache_file: None,
            navigation: Navigation::default(),
        }
    }
}

impl Config {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup. Bad values fall
    /// back to their defaults with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Config::default();
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(url) = get("OPERATORS_API_URL") {
            cfg.api_url = url;
        }
        if let Some(secs) = get("SIEGE_PICKER_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(secs) if secs > 0 => cfg.timeout = Duration::from_secs(secs),
                _ => warn!(value = %secs, "ignoring invalid SIEGE_PICKER_TIMEOUT_SECS"),
            }
        }
        if let Some(secs) = get("SIEGE_PICKER_CACHE_TTL_SECS") {
            match secs.parse::<u64>() {
                Ok(secs) => cfg.cache_ttl = Duration::from_secs(secs),
                Err(_) => warn!(value = %secs, "ignoring invalid SIEGE_PICKER_CACHE_TTL_SECS"),
            }
        }
        if let Some(path) = get("SIEGE_PICKER_CACHE_FILE") {
            cfg.cache_file = Some(PathBuf::from(path));
        }
        if let Some(nav) = get("SIEGE_PICKER_NAV") {
            match nav.parse::<Navigation>() {
                Ok(nav) => cfg.navigation = nav,
                Err(err) => warn!("{err}"),
            }
        }
        cfg
    }

    /// False when the TTL is zero.
    pub fn cache_enabled(&self) -> bool {
        !self.cache_ttl.is_zero()
    }
}
