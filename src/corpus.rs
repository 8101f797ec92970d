//! Corpus store: the Quranic text in two aligned representations.
//!
//! The plain and diacritized feed documents are merged into a single
//! structure at load time, so the alignment invariant is checked once
//! rather than at every lookup. The corpus is read-only after load.

use crate::error::WirdError;
use serde::{Deserialize, Serialize};

/// Which text representation a lookup refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextVariant {
    Plain,
    Diacritized,
}

/// A verse holding both text variants at the same (chapter, verse) address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verse {
    pub index: u32,
    pub text: String,
    pub text_diacritized: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_formula: Option<String>,
}

impl Verse {
    pub fn display_text(&self, variant: TextVariant) -> &str {
        match variant {
            TextVariant::Plain => &self.text,
            TextVariant::Diacritized => &self.text_diacritized,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub index: u32,
    pub name: String,
    pub verses: Vec<Verse>,
}

/// Feed document shape, one document per variant
#[derive(Debug, Deserialize)]
struct ChapterDoc {
    index: u32,
    name: String,
    verses: Vec<VerseDoc>,
}

#[derive(Debug, Deserialize)]
struct VerseDoc {
    index: u32,
    text: String,
    #[serde(default)]
    opening_formula: Option<String>,
}

#[derive(Debug)]
pub struct Corpus {
    chapters: Vec<Chapter>,
}

impl Corpus {
    /// Parse the two parallel feed documents and merge them, enforcing
    /// identical chapter/verse addressing between the variants. A
    /// divergence is a bad data feed and fatal to the search feature.
    pub fn load(plain_json: &str, diacritized_json: &str) -> Result<Self, WirdError> {
        let plain: Vec<ChapterDoc> = serde_json::from_str(plain_json)
            .map_err(|e| WirdError::CorpusIntegrity(format!("plain corpus parse failed: {e}")))?;
        let diacritized: Vec<ChapterDoc> = serde_json::from_str(diacritized_json).map_err(|e| {
            WirdError::CorpusIntegrity(format!("diacritized corpus parse failed: {e}"))
        })?;

        if plain.is_empty() {
            return Err(WirdError::CorpusIntegrity("corpus has no chapters".into()));
        }
        if plain.len() != diacritized.len() {
            return Err(WirdError::CorpusIntegrity(format!(
                "chapter count mismatch: {} plain vs {} diacritized",
                plain.len(),
                diacritized.len()
            )));
        }

        let mut chapters = Vec::with_capacity(plain.len());
        let mut verse_total = 0usize;

        for (position, (p, d)) in plain.into_iter().zip(diacritized).enumerate() {
            let expected = position as u32 + 1;
            if p.index != expected || d.index != expected {
                return Err(WirdError::CorpusIntegrity(format!(
                    "chapter at position {} has index {} (plain) / {} (diacritized), expected {}",
                    position, p.index, d.index, expected
                )));
            }
            if p.verses.is_empty() {
                return Err(WirdError::CorpusIntegrity(format!(
                    "chapter {} has no verses",
                    p.index
                )));
            }
            if p.verses.len() != d.verses.len() {
                return Err(WirdError::CorpusIntegrity(format!(
                    "chapter {} verse count mismatch: {} plain vs {} diacritized",
                    p.index,
                    p.verses.len(),
                    d.verses.len()
                )));
            }

            let mut verses = Vec::with_capacity(p.verses.len());
            for (pv, dv) in p.verses.into_iter().zip(d.verses) {
                if pv.index != dv.index {
                    return Err(WirdError::CorpusIntegrity(format!(
                        "chapter {} verse index mismatch: {} plain vs {} diacritized",
                        p.index, pv.index, dv.index
                    )));
                }
                verses.push(Verse {
                    index: pv.index,
                    text: pv.text,
                    text_diacritized: dv.text,
                    opening_formula: pv.opening_formula,
                });
            }

            verse_total += verses.len();
            chapters.push(Chapter {
                index: p.index,
                name: p.name,
                verses,
            });
        }

        tracing::debug!(chapters = chapters.len(), verses = verse_total, "corpus loaded");
        Ok(Self { chapters })
    }

    pub fn chapter_count(&self) -> usize {
        self.chapters.len()
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    /// Chapter lookup by 1-based index
    pub fn chapter_at(&self, index: u32) -> Result<&Chapter, WirdError> {
        if index < 1 || index as usize > self.chapters.len() {
            return Err(WirdError::OutOfRange(format!(
                "chapter {} outside [1, {}]",
                index,
                self.chapters.len()
            )));
        }
        Ok(&self.chapters[index as usize - 1])
    }

    /// Verse record at (chapter, verse). Both variants live on the record,
    /// so a missing address is a data-integrity fault rather than a
    /// variant-specific one.
    pub fn verse_at(&self, chapter: u32, verse: u32) -> Result<&Verse, WirdError> {
        let chapter = self.chapter_at(chapter)?;
        chapter
            .verses
            .iter()
            .find(|v| v.index == verse)
            .ok_or_else(|| {
                WirdError::NotFound(format!("verse {}:{} not in corpus", chapter.index, verse))
            })
    }

    /// Display text at (chapter, verse) in the requested variant
    pub fn verse_text(
        &self,
        chapter: u32,
        verse: u32,
        variant: TextVariant,
    ) -> Result<&str, WirdError> {
        Ok(self.verse_at(chapter, verse)?.display_text(variant))
    }
}
