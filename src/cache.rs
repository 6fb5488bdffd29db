use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use log::debug;

use crate::error::Error;
use crate::store::{FlagState, StateRepository};

/// Lowest cache expiry the provider tolerates; clients refreshing the
/// template more often than every 12 hours get throttled.
pub const MIN_CACHE_EXPIRY: Duration = Duration::from_millis(43_200_000);

struct CacheEntry {
    state: FlagState,
    fetched_at: Instant,
}

/// Read-through cache over another [StateRepository].
///
/// Lookups are served from memory while the entry for that flag is fresh; a
/// miss or an expired entry falls through to the delegate, and the fetched
/// state replaces the entry wholesale. With no expiry configured, the first
/// fetched value is kept for the lifetime of the repository.
///
/// Absent flags are never cached: a flag not declared remotely is looked up
/// again on every call, so declaring it later in the provider console makes
/// it visible immediately instead of after a full expiry window.
///
/// A delegate failure propagates without touching the cache. Two callers
/// missing on the same flag concurrently may both fetch; values fetched for
/// the same flag within a short window agree, so the last write winning is
/// fine.
pub struct CachingStateRepository<S> {
    delegate: S,
    expiry: Option<Duration>,
    cache: RwLock<HashMap<String, CacheEntry>>,
}

impl<S: StateRepository> CachingStateRepository<S> {
    /// Creates a cache whose entries expire once they are `expiry` old.
    ///
    /// Fails with [Error::Configuration] unless `expiry` lies strictly above
    /// [MIN_CACHE_EXPIRY].
    pub fn with_expiry(delegate: S, expiry: Duration) -> Result<Self, Error> {
        if expiry <= MIN_CACHE_EXPIRY {
            return Err(Error::Configuration(format!(
                "cache expiry must be above the provider-suggested minimum of {:?}",
                MIN_CACHE_EXPIRY
            )));
        }
        Ok(CachingStateRepository {
            delegate,
            expiry: Some(expiry),
            cache: RwLock::new(HashMap::new()),
        })
    }

    /// Creates a cache with no expiry: each declared flag is fetched at most
    /// once per repository lifetime.
    pub fn unbounded(delegate: S) -> Self {
        CachingStateRepository {
            delegate,
            expiry: None,
            cache: RwLock::new(HashMap::new()),
        }
    }

    fn cached_state(&self, name: &str) -> Option<FlagState> {
        let cache = self.cache.read().unwrap_or_else(|e| e.into_inner());
        let entry = cache.get(name)?;
        match self.expiry {
            Some(expiry) if entry.fetched_at.elapsed() >= expiry => None,
            _ => Some(entry.state.clone()),
        }
    }
}

impl<S: StateRepository> StateRepository for CachingStateRepository<S> {
    fn feature_state(&self, name: &str) -> Result<Option<FlagState>, Error> {
        if let Some(state) = self.cached_state(name) {
            return Ok(Some(state));
        }

        match self.delegate.feature_state(name)? {
            Some(state) => {
                debug!("refreshed cached state of flag {}", name);
                let entry = CacheEntry {
                    state: state.clone(),
                    fetched_at: Instant::now(),
                };
                let mut cache = self.cache.write().unwrap_or_else(|e| e.into_inner());
                cache.insert(name.to_string(), entry);
                Ok(Some(state))
            }
            // Undeclared flags are not cached, so they are retried on every
            // call until the remote template declares them.
            None => Ok(None),
        }
    }

    fn set_feature_state(&self, _state: FlagState) -> Result<(), Error> {
        Err(Error::WriteNotSupported)
    }
}
