//! Display preference cache.
//!
//! Preferences are fetched lazily, reused until their TTL runs out, and
//! dropped immediately on [`PreferenceCache::invalidate`]. At most one fetch
//! runs at a time:
//!
//! - a cold cache (first use, or after invalidation) makes callers wait for
//!   that single fetch;
//! - a stale cache is refreshed by whichever caller gets there first, while
//!   everyone else keeps receiving the stale value.
//!
//! A failed fetch keeps the stale value (or the defaults when there is none)
//! and is retried after `failure_backoff`.

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::pattern::DisplayPreferences;
use crate::store::PreferenceStore;

/// Cache configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// How long fetched preferences are served without refetching.
    pub ttl: Duration,

    /// How long to wait before retrying after a failed fetch.
    pub failure_backoff: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(5 * 60),
            failure_backoff: Duration::from_secs(30),
        }
    }
}

/// Signal that the user changed a preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreferencesChanged;

#[derive(Debug, Clone, Copy)]
struct Entry {
    prefs: DisplayPreferences,
    expires_at: Instant,
}

impl Entry {
    fn is_fresh(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

#[derive(Debug, Default)]
struct State {
    entry: Option<Entry>,
    // Bumped by every invalidation; a fetch only installs its result if the
    // generation it started under is still current.
    generation: u64,
}

/// TTL cache in front of a [`PreferenceStore`].
pub struct PreferenceCache<S> {
    store: Arc<S>,
    config: CacheConfig,
    state: RwLock<State>,
    refresh: Mutex<()>,
}

impl<S: PreferenceStore> PreferenceCache<S> {
    /// Create a cache over `store` with the default configuration.
    pub fn new(store: S) -> Self {
        Self::from_shared(Arc::new(store))
    }

    /// Create a cache over a shared store.
    pub fn from_shared(store: Arc<S>) -> Self {
        Self {
            store,
            config: CacheConfig::default(),
            state: RwLock::new(State::default()),
            refresh: Mutex::new(()),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: CacheConfig) -> Self {
        self.config = config;
        self
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Current configuration.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Last cached value, fresh or stale, without touching the store.
    pub fn cached(&self) -> Option<DisplayPreferences> {
        self.snapshot().0.map(|e| e.prefs)
    }

    /// Drop the cached value. The next [`get`](Self::get) fetches.
    pub fn invalidate(&self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.entry = None;
        state.generation = state.generation.wrapping_add(1);
        debug!(generation = state.generation, "Display preference cache invalidated");
    }

    /// Current preferences.
    pub async fn get(&self) -> DisplayPreferences {
        let (entry, _) = self.snapshot();
        let guard = match entry {
            Some(entry) if entry.is_fresh() => return entry.prefs,
            Some(stale) => match self.refresh.try_lock() {
                Ok(guard) => guard,
                Err(_) => {
                    debug!("Preference refresh in flight, serving stale value");
                    return stale.prefs;
                }
            },
            None => self.refresh.lock().await,
        };

        // Another caller may have finished a fetch while we waited.
        if let (Some(entry), _) = self.snapshot() {
            if entry.is_fresh() {
                return entry.prefs;
            }
        }

        let prefs = self.fetch().await;
        drop(guard);
        prefs
    }

    /// Invalidate the cache whenever a change notification arrives.
    ///
    /// The listener stops when every sender is dropped.
    pub fn spawn_invalidation_listener(
        cache: Arc<Self>,
        mut changes: broadcast::Receiver<PreferencesChanged>,
    ) -> JoinHandle<()>
    where
        S: 'static,
    {
        tokio::spawn(async move {
            loop {
                match changes.recv().await {
                    Ok(PreferencesChanged) => cache.invalidate(),
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        debug!(missed, "Missed preference change notifications");
                        cache.invalidate();
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }

    // Caller must hold the refresh guard.
    async fn fetch(&self) -> DisplayPreferences {
        let (previous, generation) = self.snapshot();

        match self.store.load().await {
            Ok(prefs) => {
                debug!(
                    date_format = %prefs.date_format,
                    time_format = %prefs.time_format,
                    "Loaded display preferences"
                );
                self.install(generation, prefs, self.config.ttl);
                prefs
            }
            Err(err) => {
                let fallback = previous.map(|e| e.prefs).unwrap_or_default();
                warn!(
                    error = %err,
                    stale = previous.is_some(),
                    "Failed to load display preferences, using fallback"
                );
                self.install(generation, fallback, self.config.failure_backoff);
                fallback
            }
        }
    }

    fn install(&self, generation: u64, prefs: DisplayPreferences, lifetime: Duration) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if state.generation != generation {
            debug!("Preferences invalidated during fetch, result not cached");
            return;
        }
        state.entry = Some(Entry {
            prefs,
            expires_at: Instant::now() + lifetime,
        });
    }

    fn snapshot(&self) -> (Option<Entry>, u64) {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        (state.entry, state.generation)
    }
}
