// On-disk copy of the last operator download so repeated runs within the TTL
// skip the remote API.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;

const CACHE_VERSION: u32 = 1;
const CACHE_DIR: &str = "siege-picker";
const CACHE_FILE: &str = "operators.json";

#[derive(Debug, Serialize, Deserialize)]
struct CacheFile {
    version: u32,
    fetched_at: u64,
    body: String,
}

/// Time-bounded cache of the raw operator response body.
#[derive(Debug, Clone)]
pub struct OperatorCache {
    path: PathBuf,
    ttl: Duration,
}

impl OperatorCache {
    /// Cache stored at `path`, trusted for `ttl` after each write.
    pub fn new(path: impl Into<PathBuf>, ttl: Duration) -> Self {
        OperatorCache {
            path: path.into(),
            ttl,
        }
    }

    /// `None` when caching is switched off or there is nowhere to put it.
    pub fn from_config(cfg: &Config) -> Option<Self> {
        if !cfg.cache_enabled() {
            return None;
        }
        let path = cfg.cache_file.clone().or_else(default_path)?;
        Some(Self::new(path, cfg.cache_ttl))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// [`load_fresh_at`](Self::load_fresh_at) against the current clock.
    pub fn load_fresh(&self) -> Option<String> {
        self.load_fresh_at(SystemTime::now())
    }

    /// Cached body if it was stored less than `ttl` before `now`.
    pub fn load_fresh_at(&self, now: SystemTime) -> Option<String> {
        let raw = fs::read_to_string(&self.path).ok()?;
        let file = serde_json::from_str::<CacheFile>(&raw).ok()?;
        if file.version != CACHE_VERSION {
            debug!(path = %self.path.display(), "operator cache version mismatch");
            return None;
        }
        let now = unix_secs(now)?;
        // entries from the future are treated as stale
        let age = now.checked_sub(file.fetched_at)?;
        if Duration::from_secs(age) >= self.ttl {
            debug!(age, "operator cache expired");
            return None;
        }
        Some(file.body)
    }

    pub fn store(&self, body: &str) -> Result<()> {
        self.store_at(body, SystemTime::now())
    }

    /// Replace the cached body, stamping it with `now`. Writes go through a
    /// temp file so a reader never sees half an entry.
    pub fn store_at(&self, body: &str, now: SystemTime) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("create cache dir {}", dir.display()))?;
        }
        let file = CacheFile {
            version: CACHE_VERSION,
            fetched_at: unix_secs(now).unwrap_or_default(),
            body: body.to_string(),
        };
        let json = serde_json::to_string(&file).context("serialize operator cache")?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).context("write operator cache")?;
        fs::rename(&tmp, &self.path).context("swap operator cache")?;
        Ok(())
    }

    /// Delete the cache file. A missing file is not an error.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).context("remove operator cache"),
        }
    }
}

fn default_path() -> Option<PathBuf> {
    Some(dirs::cache_dir()?.join(CACHE_DIR).join(CACHE_FILE))
}

fn unix_secs(time: SystemTime) -> Option<u64> {
    time.duration_since(UNIX_EPOCH).ok().map(|d| d.as_secs())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("siege-picker-cache-{}-{}", std::process::id(), name))
            .join(CACHE_FILE)
    }

    #[test]
    fn fresh_entry_is_returned() {
        let cache = OperatorCache::new(scratch("fresh"), Duration::from_secs(60));
        let t0 = UNIX_EPOCH + Duration::from_secs(1_000_000);
        cache.store_at("[]", t0).unwrap();
        assert_eq!(cache.load_fresh_at(t0 + Duration::from_secs(59)).as_deref(), Some("[]"));
        cache.clear().unwrap();
    }

    #[test]
    fn expired_or_future_entry_misses() {
        let cache = OperatorCache::new(scratch("expired"), Duration::from_secs(60));
        let t0 = UNIX_EPOCH + Duration::from_secs(1_000_000);
        cache.store_at("[]", t0).unwrap();
        assert!(cache.load_fresh_at(t0 + Duration::from_secs(60)).is_none());
        assert!(cache.load_fresh_at(t0 - Duration::from_secs(1)).is_none());
        cache.clear().unwrap();
    }

    #[test]
    fn missing_or_garbage_file_misses() {
        let path = scratch("garbage");
        let cache = OperatorCache::new(path.clone(), Duration::from_secs(60));
        cache.clear().unwrap();
        assert!(cache.load_fresh().is_none());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json").unwrap();
        assert!(cache.load_fresh().is_none());
        cache.clear().unwrap();
        // clearing twice is fine
        cache.clear().unwrap();
    }

    #[test]
    fn disabled_by_zero_ttl() {
        let cfg = Config {
            cache_ttl: Duration::ZERO,
            cache_file: Some(scratch("disabled")),
            ..Config::default()
        };
        assert!(OperatorCache::from_config(&cfg).is_none());

        let cfg = Config {
            cache_file: Some(scratch("enabled")),
            ..Config::default()
        };
        let cache = OperatorCache::from_config(&cfg).unwrap();
        assert_eq!(cache.path(), scratch("enabled").as_path());
        assert_eq!(cache.ttl(), cfg.cache_ttl);
    }
}
