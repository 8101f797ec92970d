//! Session state owned by the application shell: search settings, the
//! last search view and share summary, restored from storage at startup
//! and written through on every mutation.

use crate::history::RecentSearches;
use crate::search::SearchResults;
use crate::storage::Storage;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const SEARCH_SETTINGS_KEY: &str = "search_settings";
const LAST_SEARCH_KEY: &str = "last_search_results";
const LAST_SHARED_KEY: &str = "last_shared";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSettings {
    pub with_diacritics: bool,
}

/// Summary of the last outbound share, shown on the next visit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastShared {
    pub title: String,
    pub pages_label: String,
    pub link: String,
    pub shared_at: chrono::NaiveDateTime,
}

pub struct SessionState {
    storage: Arc<Storage>,
    settings: SearchSettings,
    recent: RecentSearches,
}

impl SessionState {
    pub fn new(storage: Arc<Storage>) -> Self {
        let settings = storage.get(SEARCH_SETTINGS_KEY, SearchSettings::default());
        Self {
            recent: RecentSearches::new(Arc::clone(&storage)),
            storage,
            settings,
        }
    }

    pub fn settings(&self) -> SearchSettings {
        self.settings
    }

    pub fn set_with_diacritics(&mut self, with_diacritics: bool) {
        self.settings.with_diacritics = with_diacritics;
        self.storage.set(SEARCH_SETTINGS_KEY, &self.settings);
    }

    pub fn recent_searches(&self) -> &RecentSearches {
        &self.recent
    }

    /// Persist the finished search so the view survives a reload
    pub fn store_last_search(&self, results: &SearchResults) {
        self.storage.set(LAST_SEARCH_KEY, results);
    }

    pub fn restore_last_search(&self) -> Option<SearchResults> {
        self.storage.get(LAST_SEARCH_KEY, None)
    }

    pub fn clear_last_search(&self) {
        self.storage.remove(LAST_SEARCH_KEY);
    }

    pub fn record_share(&self, share: &LastShared) {
        self.storage.set(LAST_SHARED_KEY, share);
    }

    pub fn last_shared(&self) -> Option<LastShared> {
        self.storage.get(LAST_SHARED_KEY, None)
    }
}
