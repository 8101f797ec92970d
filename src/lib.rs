//! Wird - Quran Reading Companion
//!
//! Backend library providing corpus search, reading progress tracking,
//! schedule generation and share-link templating over local persistence.

// Corpus types must be defined first as they're used by search
pub mod corpus;
pub mod search;
pub mod history;
pub mod storage;
pub mod session;
pub mod progress;
pub mod schedule;
pub mod share;
pub mod error;

pub use error::WirdError;
pub use corpus::{Chapter, Corpus, TextVariant, Verse};
pub use search::{
    ChapterMatches, ContextVerse, MatchResult, SearchEngine, SearchQuery, SearchResults,
};
pub use history::RecentSearches;
pub use storage::{default_storage_path, Storage};
pub use session::{LastShared, SearchSettings, SessionState};
pub use progress::{AudioNote, ProgressTracker, TrackedItem, TrackerMode, WEEKDAYS};
pub use schedule::{
    format_date, format_schedule, page_ranges, reading_schedule, PageRange, ScheduleDay,
    TOTAL_PAGES,
};
pub use share::{pages_share_message, progress_share_message, whatsapp_url};
