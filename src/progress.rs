//! Hizb/juz reading progress: completion, colors, notes and voice-memo
//! metadata over the persistence adapter.

use crate::error::WirdError;
use crate::storage::Storage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Arabic weekday labels, week starting Sunday
pub const WEEKDAYS: [&str; 7] = [
    "الأحد",
    "الاثنين",
    "الثلاثاء",
    "الأربعاء",
    "الخميس",
    "الجمعة",
    "السبت",
];

const DEFAULT_ITEM_COLOR: &str = "#1e1e2f";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackerMode {
    Hizb,
    Juz,
}

impl TrackerMode {
    pub fn unit_count(self) -> u32 {
        match self {
            TrackerMode::Hizb => 60,
            TrackerMode::Juz => 30,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TrackerMode::Hizb => "الحزب",
            TrackerMode::Juz => "الجزء",
        }
    }

    pub fn plural_label(self) -> &'static str {
        match self {
            TrackerMode::Hizb => "الأحزاب",
            TrackerMode::Juz => "الأجزاء",
        }
    }

    fn storage_key(self) -> &'static str {
        match self {
            TrackerMode::Hizb => "hizb_items",
            TrackerMode::Juz => "juz_items",
        }
    }
}

/// Voice-memo metadata; audio capture and playback are a UI concern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioNote {
    pub title: String,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedItem {
    pub number: u32,
    /// Weekday label assigned at generation time
    pub day: String,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub color: String,
    pub hidden: bool,
    #[serde(default)]
    pub audio_notes: Vec<AudioNote>,
}

pub struct ProgressTracker {
    storage: Arc<Storage>,
}

impl ProgressTracker {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    pub fn items(&self, mode: TrackerMode) -> Vec<TrackedItem> {
        self.storage.get(mode.storage_key(), Vec::new())
    }

    fn save(&self, mode: TrackerMode, items: &[TrackedItem]) {
        self.storage.set(mode.storage_key(), &items);
    }

    /// Generate fresh items for the range, cycling weekday labels from
    /// `first_day`. Replaces any previous items for the mode.
    pub fn generate(
        &self,
        mode: TrackerMode,
        from: u32,
        to: u32,
        first_day: &str,
    ) -> Result<Vec<TrackedItem>, WirdError> {
        if from < 1 || to > mode.unit_count() || from > to {
            return Err(WirdError::OutOfRange(format!(
                "range {}-{} outside [1, {}]",
                from,
                to,
                mode.unit_count()
            )));
        }
        let mut day_index = WEEKDAYS
            .iter()
            .position(|d| *d == first_day)
            .ok_or_else(|| WirdError::InvalidQuery(format!("unknown weekday: {first_day}")))?;

        let items: Vec<TrackedItem> = (from..=to)
            .map(|number| {
                let item = TrackedItem {
                    number,
                    day: WEEKDAYS[day_index].to_string(),
                    completed: false,
                    completed_at: None,
                    note: None,
                    color: DEFAULT_ITEM_COLOR.to_string(),
                    hidden: false,
                    audio_notes: Vec::new(),
                };
                day_index = (day_index + 1) % WEEKDAYS.len();
                item
            })
            .collect();

        self.save(mode, &items);
        tracing::debug!(?mode, count = items.len(), "generated tracker items");
        Ok(items)
    }

    pub fn set_completed(
        &self,
        mode: TrackerMode,
        number: u32,
        completed: bool,
        now: DateTime<Utc>,
    ) -> Result<TrackedItem, WirdError> {
        self.update(mode, number, |item| {
            item.completed = completed;
            item.completed_at = completed.then_some(now);
        })
    }

    pub fn set_color(
        &self,
        mode: TrackerMode,
        number: u32,
        color: &str,
    ) -> Result<TrackedItem, WirdError> {
        let color = color.to_string();
        self.update(mode, number, move |item| item.color = color)
    }

    pub fn set_note(
        &self,
        mode: TrackerMode,
        number: u32,
        note: Option<String>,
    ) -> Result<TrackedItem, WirdError> {
        self.update(mode, number, move |item| item.note = note)
    }

    pub fn set_hidden(
        &self,
        mode: TrackerMode,
        number: u32,
        hidden: bool,
    ) -> Result<TrackedItem, WirdError> {
        self.update(mode, number, move |item| item.hidden = hidden)
    }

    pub fn add_audio_note(
        &self,
        mode: TrackerMode,
        number: u32,
        title: &str,
        now: DateTime<Utc>,
    ) -> Result<TrackedItem, WirdError> {
        let note = AudioNote {
            title: title.to_string(),
            recorded_at: now,
        };
        self.update(mode, number, move |item| item.audio_notes.push(note))
    }

    pub fn remove_audio_note(
        &self,
        mode: TrackerMode,
        number: u32,
        index: usize,
    ) -> Result<TrackedItem, WirdError> {
        let mut items = self.items(mode);
        let item = Self::find_item(&mut items, mode, number)?;
        if index >= item.audio_notes.len() {
            return Err(WirdError::NotFound(format!(
                "audio note {} on {} {}",
                index,
                mode.label(),
                number
            )));
        }
        item.audio_notes.remove(index);
        let snapshot = item.clone();
        self.save(mode, &items);
        Ok(snapshot)
    }

    /// Numbers of currently hidden items, for the restore dropdown
    pub fn hidden_numbers(&self, mode: TrackerMode) -> Vec<u32> {
        self.items(mode)
            .iter()
            .filter(|i| i.hidden)
            .map(|i| i.number)
            .collect()
    }

    /// Rounded percentage of completed items; zero when none generated
    pub fn completion_percent(&self, mode: TrackerMode) -> u32 {
        let items = self.items(mode);
        if items.is_empty() {
            return 0;
        }
        let completed = items.iter().filter(|i| i.completed).count();
        ((completed as f64 / items.len() as f64) * 100.0).round() as u32
    }

    /// Drop all tracked state for both modes
    pub fn reset(&self) {
        self.storage.remove(TrackerMode::Hizb.storage_key());
        self.storage.remove(TrackerMode::Juz.storage_key());
    }

    fn find_item<'a>(
        items: &'a mut [TrackedItem],
        mode: TrackerMode,
        number: u32,
    ) -> Result<&'a mut TrackedItem, WirdError> {
        items
            .iter_mut()
            .find(|i| i.number == number)
            .ok_or_else(|| WirdError::NotFound(format!("{} {}", mode.label(), number)))
    }

    fn update(
        &self,
        mode: TrackerMode,
        number: u32,
        apply: impl FnOnce(&mut TrackedItem),
    ) -> Result<TrackedItem, WirdError> {
        let mut items = self.items(mode);
        let item = Self::find_item(&mut items, mode, number)?;
        apply(item);
        let snapshot = item.clone();
        self.save(mode, &items);
        Ok(snapshot)
    }
}
