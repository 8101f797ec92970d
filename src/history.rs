//! Recent-search ledger: bounded, deduplicated, most-recent-first.

use crate::storage::Storage;
use std::sync::Arc;

const RECENT_SEARCHES_KEY: &str = "recent_searches";
/// Oldest entries beyond this cap are discarded
const RECENT_SEARCH_LIMIT: usize = 10;

pub struct RecentSearches {
    storage: Arc<Storage>,
}

impl RecentSearches {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    /// Move the term to the front, dropping any older occurrence, and
    /// persist the whole list. Blank terms are ignored.
    pub fn record(&self, term: &str) {
        if term.trim().is_empty() {
            return;
        }
        let mut terms = self.list();
        terms.retain(|t| t != term);
        terms.insert(0, term.to_string());
        terms.truncate(RECENT_SEARCH_LIMIT);
        self.storage.set(RECENT_SEARCHES_KEY, &terms);
    }

    pub fn list(&self) -> Vec<String> {
        self.storage.get(RECENT_SEARCHES_KEY, Vec::new())
    }

    /// No-op when the term is absent
    pub fn remove(&self, term: &str) {
        let mut terms = self.list();
        terms.retain(|t| t != term);
        self.storage.set(RECENT_SEARCHES_KEY, &terms);
    }
}
