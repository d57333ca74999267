use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use thiserror::Error;

use crate::config::RecentSettings;

/// Errors that can occur with the recent-locations store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to load recent locations: {0}")]
    Load(String),

    #[error("Failed to save recent locations: {0}")]
    Save(String),
}

/// Where the recent-locations list lives between sessions
pub trait LocationStore {
    /// Stored list, most recent first
    fn load(&self) -> Result<Vec<String>, StoreError>;
    fn save(&self, locations: &[String]) -> Result<(), StoreError>;
}

/// In-process store
#[derive(Debug, Default)]
pub struct MemoryLocationStore {
    saved: Mutex<Vec<String>>,
}

impl MemoryLocationStore {
    pub fn with_locations(locations: Vec<String>) -> Self {
        Self {
            saved: Mutex::new(locations),
        }
    }
}

impl LocationStore for MemoryLocationStore {
    fn load(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.saved.lock().clone())
    }

    fn save(&self, locations: &[String]) -> Result<(), StoreError> {
        *self.saved.lock() = locations.to_vec();
        Ok(())
    }
}

/// Recently chosen locations, most recent first
///
/// Loaded once from the store at startup and written back on every
/// change. Entries are de-duplicated case-insensitively and bounded by
/// the configured capacity.
pub struct RecentLocations<S: LocationStore> {
    store: S,
    // folded key -> display form
    entries: LruCache<String, String>,
    default_location: String,
}

impl<S: LocationStore> RecentLocations<S> {
    pub fn load(store: S, settings: &RecentSettings) -> Self {
        let capacity = NonZeroUsize::new(settings.capacity).unwrap_or(NonZeroUsize::MIN);
        let mut entries = LruCache::new(capacity);

        match store.load() {
            Ok(saved) => {
                // Oldest first so the head of the saved list ends up most recent
                for location in saved.iter().rev() {
                    let trimmed = location.trim();
                    if !trimmed.is_empty() {
                        entries.put(trimmed.to_lowercase(), trimmed.to_string());
                    }
                }
            }
            Err(e) => tracing::warn!("{}, starting with an empty list", e),
        }

        Self {
            store,
            entries,
            default_location: settings.default_location.clone(),
        }
    }

    /// Move `location` to the front and persist the list
    pub fn record(&mut self, location: &str) -> Result<(), StoreError> {
        let trimmed = location.trim();
        if trimmed.is_empty() {
            return Ok(());
        }

        self.entries.put(trimmed.to_lowercase(), trimmed.to_string());
        self.store.save(&self.list())
    }

    pub fn list(&self) -> Vec<String> {
        self.entries.iter().map(|(_, display)| display.clone()).collect()
    }

    /// Location shown in the header: the most recent pick, or the default
    pub fn current(&self) -> &str {
        self.entries
            .iter()
            .next()
            .map(|(_, display)| display.as_str())
            .unwrap_or(&self.default_location)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
