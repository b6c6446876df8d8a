// API client module: a small blocking HTTP client that downloads the operator
// catalogue, plus the data shapes it decodes into.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cache::OperatorCache;
use crate::config::Config;

/// Team posture an operator belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Side {
    Attacker,
    Defender,
}

impl Side {
    /// The other team posture.
    pub fn opposite(self) -> Side {
        match self {
            Side::Attacker => Side::Defender,
            Side::Defender => Side::Attacker,
        }
    }
}

impl FromStr for Side {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "attacker" | "attack" => Ok(Side::Attacker),
            "defender" | "defense" | "defence" => Ok(Side::Defender),
            other => anyhow::bail!("unknown operator side `{other}`"),
        }
    }
}

impl TryFrom<String> for Side {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Side> for String {
    fn from(side: Side) -> String {
        side.to_string()
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Attacker => f.write_str("Attacker"),
            Side::Defender => f.write_str("Defender"),
        }
    }
}

/// One entry of the operator catalogue. Fields mirror the remote JSON.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Operator {
    pub name: String,
    pub icon_url: String,
    pub side: Side,
}

/// Decode a JSON array of operators. Any bad record fails the whole payload.
pub fn parse_operators(raw: &str) -> Result<Vec<Operator>> {
    serde_json::from_str(raw).context("Failed to parse operator JSON")
}

/// Blocking client for the operator endpoint.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    endpoint: String,
}

impl ApiClient {
    /// Build a client for `endpoint`. `timeout` bounds the whole request,
    /// body included.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ApiClient {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Create an ApiClient from the endpoint and timeout in `cfg`.
    pub fn from_config(cfg: &Config) -> Result<Self> {
        Self::new(cfg.api_url.clone(), cfg.timeout)
    }

    /// URL the client fetches from.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// GET the endpoint and return the body text. Non-2xx statuses are errors
    /// carrying the status and whatever body the server sent.
    pub fn fetch_raw(&self) -> Result<String> {
        debug!(url = %self.endpoint, "requesting operators");
        let res = self
            .client
            .get(&self.endpoint)
            .header(ACCEPT, "application/json")
            .send()
            .with_context(|| format!("Failed to retrieve operators from {}", self.endpoint))?;
        if !res.status().is_success() {
            let status = res.status();
            let txt = res.text().unwrap_or_default();
            anyhow::bail!("Operator request failed: {} - {}", status, txt);
        }
        res.text().context("Failed to read operator data from API")
    }

    /// Download and decode the catalogue, skipping any cache.
    pub fn fetch_operators(&self) -> Result<Vec<Operator>> {
        let raw = self.fetch_raw()?;
        parse_operators(&raw)
    }
}

/// Where a loaded operator list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Cache,
    Network,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Cache => f.write_str("cache"),
            Source::Network => f.write_str("network"),
        }
    }
}

/// Result of [`load_operators`].
#[derive(Debug, Clone)]
pub struct Loaded {
    pub operators: Vec<Operator>,
    pub source: Source,
}

/// Load the operator list, preferring a fresh cache entry over the network.
///
/// A successful download refreshes the cache. Cache problems are only
/// logged; network and decode failures are returned. Success is not logged
/// here since callers usually run this under a spinner.
pub fn load_operators(api: &ApiClient, cache: Option<&OperatorCache>) -> Result<Loaded> {
    if let Some(cache) = cache {
        if let Some(body) = cache.load_fresh() {
            match parse_operators(&body) {
                Ok(operators) => {
                    return Ok(Loaded {
                        operators,
                        source: Source::Cache,
                    })
                }
                Err(err) => warn!("discarding unreadable operator cache: {err:#}"),
            }
        }
    }

    let raw = api.fetch_raw()?;
    let operators = parse_operators(&raw)?;

    if let Some(cache) = cache {
        if let Err(err) = cache.store(&raw) {
            warn!("could not write operator cache: {err:#}");
        }
    }
    Ok(Loaded {
        operators,
        source: Source::Network,
    })
}
