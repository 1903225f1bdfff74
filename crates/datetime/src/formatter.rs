//! Preference-aware formatting service.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use crate::cache::{CacheConfig, PreferenceCache};
use crate::error::Result;
use crate::format;
use crate::pattern::DisplayPreferences;
use crate::store::PreferenceStore;

/// Formats and parses values with the user's cached display preferences.
pub struct DateTimeFormatter<S> {
    cache: Arc<PreferenceCache<S>>,
}

impl<S: PreferenceStore> DateTimeFormatter<S> {
    /// Create a formatter over `store` with the default cache configuration.
    pub fn new(store: S) -> Self {
        Self {
            cache: Arc::new(PreferenceCache::new(store)),
        }
    }

    /// Create a formatter with an explicit cache configuration.
    pub fn with_config(store: S, config: CacheConfig) -> Self {
        Self {
            cache: Arc::new(PreferenceCache::new(store).with_config(config)),
        }
    }

    /// Shared handle to the preference cache.
    pub fn cache(&self) -> &Arc<PreferenceCache<S>> {
        &self.cache
    }

    /// Current display preferences.
    pub async fn preferences(&self) -> DisplayPreferences {
        self.cache.get().await
    }

    /// Format a canonical date with the preferred date pattern.
    pub async fn format_date(&self, value: &str) -> String {
        let prefs = self.preferences().await;
        format::format_date(value, prefs.date_format)
    }

    /// Parse display text written in the preferred date pattern.
    pub async fn parse_date(&self, text: &str) -> Option<NaiveDate> {
        let prefs = self.preferences().await;
        format::parse_display_date(text, prefs.date_format)
    }

    /// Format a 24-hour `HH:MM` time with the preferred time pattern.
    pub async fn format_time(&self, text: &str) -> String {
        let prefs = self.preferences().await;
        format::format_time(text, prefs.time_format)
    }

    /// Parse display time written in the preferred time pattern.
    pub async fn parse_time(&self, text: &str) -> Option<String> {
        let prefs = self.preferences().await;
        format::parse_display_time(text, prefs.time_format)
    }

    /// Format a canonical date-time with both preferred patterns.
    pub async fn format_datetime(&self, value: &str) -> String {
        let prefs = self.preferences().await;
        format::format_datetime(value, prefs.date_format, prefs.time_format)
    }

    /// Persist new preferences and drop the cached ones.
    pub async fn update_preferences(&self, prefs: DisplayPreferences) -> Result<()> {
        self.cache.store().save(&prefs).await?;
        self.cache.invalidate();
        debug!(
            date_format = %prefs.date_format,
            time_format = %prefs.time_format,
            "Display preferences updated"
        );
        Ok(())
    }

    /// Drop the cached preferences, e.g. after an external change.
    pub fn invalidate(&self) {
        self.cache.invalidate();
    }
}
