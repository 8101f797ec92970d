//! Corpus search: linear scan producing grouped, context-expandable
//! results, plus autocomplete suggestions.
//!
//! Matching is always a literal substring test against the plain text;
//! the diacritics flag only selects which variant is displayed. One match
//! is recorded per verse regardless of how often the term occurs in it.

use crate::corpus::{Corpus, TextVariant};
use crate::error::WirdError;
use lru::LruCache;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

/// Following verses captured eagerly as context for each match
const CONTEXT_VERSES: usize = 5;
/// Autocomplete stops scanning once this many verses are collected
const SUGGESTION_LIMIT: usize = 5;
/// Suggestions are only generated from this many characters on
const SUGGESTION_MIN_CHARS: usize = 2;
/// Recently computed result sets kept in memory
const RESULT_CACHE_CAPACITY: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchQuery {
    pub term: String,
    pub with_diacritics: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextVerse {
    pub verse_index: u32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub verse_index: u32,
    /// Plain or diacritized per the query flag, fixed at search time
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_formula: Option<String>,
    /// Up to 5 subsequent verses, truncated at the chapter end
    pub context_verses: Vec<ContextVerse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterMatches {
    pub chapter_index: u32,
    pub chapter_name: String,
    pub matches: Vec<MatchResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    pub query: SearchQuery,
    pub groups: Vec<ChapterMatches>,
    pub total_matches: usize,
    pub elapsed_ms: u64,
}

pub struct SearchEngine {
    corpus: Arc<Corpus>,
    cache: Mutex<LruCache<SearchQuery, Arc<SearchResults>>>,
}

impl SearchEngine {
    pub fn new(corpus: Arc<Corpus>) -> Self {
        let capacity = NonZeroUsize::new(RESULT_CACHE_CAPACITY)
            .unwrap_or_else(|| NonZeroUsize::new(1).unwrap());
        Self {
            corpus,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Scan the whole corpus for literal occurrences of the query term.
    /// Blank terms are rejected; a term found nowhere yields an empty
    /// result set, not an error.
    pub fn search(&self, query: &SearchQuery) -> Result<Arc<SearchResults>, WirdError> {
        if query.term.trim().is_empty() {
            return Err(WirdError::InvalidQuery("search term is empty".into()));
        }

        {
            let mut cache = self.cache.lock().unwrap();
            if let Some(results) = cache.get(query) {
                return Ok(Arc::clone(results));
            }
        }

        let start = std::time::Instant::now();
        let term = query.term.as_str();
        let variant = if query.with_diacritics {
            TextVariant::Diacritized
        } else {
            TextVariant::Plain
        };

        let mut groups = Vec::new();
        let mut total_matches = 0;

        for chapter in self.corpus.chapters() {
            let mut matches = Vec::new();
            for (pos, verse) in chapter.verses.iter().enumerate() {
                if !verse.text.contains(term) {
                    continue;
                }

                let context_verses = chapter.verses[pos + 1..]
                    .iter()
                    .take(CONTEXT_VERSES)
                    .map(|v| ContextVerse {
                        verse_index: v.index,
                        text: v.display_text(variant).to_string(),
                    })
                    .collect();

                matches.push(MatchResult {
                    verse_index: verse.index,
                    text: verse.display_text(variant).to_string(),
                    opening_formula: verse.opening_formula.clone(),
                    context_verses,
                });
                total_matches += 1;
            }

            if !matches.is_empty() {
                groups.push(ChapterMatches {
                    chapter_index: chapter.index,
                    chapter_name: chapter.name.clone(),
                    matches,
                });
            }
        }

        let results = Arc::new(SearchResults {
            query: query.clone(),
            groups,
            total_matches,
            elapsed_ms: start.elapsed().as_millis() as u64,
        });
        tracing::debug!(term, total = total_matches, "search completed");

        let mut cache = self.cache.lock().unwrap();
        cache.put(query.clone(), Arc::clone(&results));
        Ok(results)
    }

    /// Autocomplete sample: the first few plain verse texts containing the
    /// partial term, in corpus order. Short-circuits so interactive typing
    /// never pays for a full scan.
    pub fn suggest(&self, partial: &str) -> Vec<String> {
        if partial.chars().count() < SUGGESTION_MIN_CHARS {
            return Vec::new();
        }

        let mut suggestions = Vec::new();
        'scan: for chapter in self.corpus.chapters() {
            for verse in &chapter.verses {
                if verse.text.contains(partial) {
                    suggestions.push(verse.text.clone());
                    if suggestions.len() >= SUGGESTION_LIMIT {
                        break 'scan;
                    }
                }
            }
        }
        suggestions
    }

    pub fn clear_cache(&self) {
        self.cache.lock().unwrap().clear();
    }

    pub fn cache_stats(&self) -> (usize, usize) {
        let cache = self.cache.lock().unwrap();
        (cache.len(), cache.cap().get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_corpus() -> Arc<Corpus> {
        let plain = json!([
            {
                "index": 1,
                "name": "الفاتحة",
                "verses": [
                    { "index": 1, "text": "بسم الله" },
                    { "index": 2, "text": "الرحمن الرحيم" },
                    { "index": 3, "text": "مالك يوم الدين" }
                ]
            },
            {
                "index": 2,
                "name": "الإخلاص",
                "verses": [
                    { "index": 1, "text": "قل هو الله أحد", "opening_formula": "بسم الله الرحمن الرحيم" },
                    { "index": 2, "text": "الله الصمد" },
                    { "index": 3, "text": "لم يلد ولم يولد" },
                    { "index": 4, "text": "ولم يكن له كفوا أحد" }
                ]
            }
        ])
        .to_string();
        let diacritized = json!([
            {
                "index": 1,
                "name": "الفاتحة",
                "verses": [
                    { "index": 1, "text": "بِسْمِ اللَّهِ" },
                    { "index": 2, "text": "الرَّحْمَٰنِ الرَّحِيمِ" },
                    { "index": 3, "text": "مَالِكِ يَوْمِ الدِّينِ" }
                ]
            },
            {
                "index": 2,
                "name": "الإخلاص",
                "verses": [
                    { "index": 1, "text": "قُلْ هُوَ اللَّهُ أَحَدٌ", "opening_formula": "بِسْمِ اللَّهِ" },
                    { "index": 2, "text": "اللَّهُ الصَّمَدُ" },
                    { "index": 3, "text": "لَمْ يَلِدْ وَلَمْ يُولَدْ" },
                    { "index": 4, "text": "وَلَمْ يَكُن لَّهُ كُفُوًا أَحَدٌ" }
                ]
            }
        ])
        .to_string();
        Arc::new(Corpus::load(&plain, &diacritized).unwrap())
    }

    fn engine() -> SearchEngine {
        SearchEngine::new(test_corpus())
    }

    fn query(term: &str) -> SearchQuery {
        SearchQuery {
            term: term.to_string(),
            with_diacritics: false,
        }
    }

    #[test]
    fn match_with_context_truncated_at_chapter_end() {
        let results = engine()
            .search(&SearchQuery {
                term: "بسم".to_string(),
                with_diacritics: false,
            })
            .unwrap();

        assert_eq!(results.total_matches, 1);
        assert_eq!(results.groups.len(), 1);
        let group = &results.groups[0];
        assert_eq!(group.chapter_index, 1);
        let hit = &group.matches[0];
        assert_eq!(hit.verse_index, 1);
        // only two verses remain in the chapter
        assert_eq!(hit.context_verses.len(), 2);
        assert_eq!(hit.context_verses[0].verse_index, 2);
        assert_eq!(hit.context_verses[0].text, "الرحمن الرحيم");
        assert_eq!(hit.context_verses[1].verse_index, 3);
    }

    #[test]
    fn context_is_capped_at_five_verses() {
        let mut verses = vec![json!({ "index": 1, "text": "يس والقرآن الحكيم" })];
        verses.extend((2..=9).map(|i| json!({ "index": i, "text": format!("آية رقم {i}") })));
        let doc = json!([{ "index": 1, "name": "يس", "verses": verses }]).to_string();
        let engine = SearchEngine::new(Arc::new(Corpus::load(&doc, &doc).unwrap()));

        let results = engine.search(&query("يس")).unwrap();
        let hit = &results.groups[0].matches[0];
        assert_eq!(hit.verse_index, 1);
        // eight verses follow the match, only five are captured
        assert_eq!(hit.context_verses.len(), 5);
        let indices: Vec<u32> = hit.context_verses.iter().map(|c| c.verse_index).collect();
        assert_eq!(indices, vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn no_matches_is_an_empty_result_set() {
        let results = engine().search(&query("غير موجود")).unwrap();
        assert!(results.groups.is_empty());
        assert_eq!(results.total_matches, 0);
    }

    #[test]
    fn blank_term_is_rejected() {
        let err = engine().search(&query("   ")).unwrap_err();
        assert!(matches!(err, WirdError::InvalidQuery(_)));
    }

    #[test]
    fn total_matches_equals_sum_of_groups_in_order() {
        let results = engine().search(&query("الله")).unwrap();

        let summed: usize = results.groups.iter().map(|g| g.matches.len()).sum();
        assert_eq!(results.total_matches, summed);
        assert_eq!(results.total_matches, 3);

        let chapter_order: Vec<u32> = results.groups.iter().map(|g| g.chapter_index).collect();
        let mut sorted = chapter_order.clone();
        sorted.sort_unstable();
        assert_eq!(chapter_order, sorted);

        for group in &results.groups {
            let verse_order: Vec<u32> = group.matches.iter().map(|m| m.verse_index).collect();
            let mut sorted = verse_order.clone();
            sorted.sort_unstable();
            assert_eq!(verse_order, sorted);
        }
    }

    #[test]
    fn diacritics_flag_selects_display_variant() {
        let engine = engine();

        let plain = engine.search(&query("الصمد")).unwrap();
        assert_eq!(plain.groups[0].matches[0].text, "الله الصمد");

        let diacritized = engine
            .search(&SearchQuery {
                term: "الصمد".to_string(),
                with_diacritics: true,
            })
            .unwrap();
        let hit = &diacritized.groups[0].matches[0];
        assert_eq!(hit.text, "اللَّهُ الصَّمَدُ");
        // context follows the same flag
        assert_eq!(hit.context_verses[0].text, "لَمْ يَلِدْ وَلَمْ يُولَدْ");
    }

    #[test]
    fn opening_formula_is_carried_on_the_match() {
        let results = engine().search(&query("قل هو")).unwrap();
        let hit = &results.groups[0].matches[0];
        assert_eq!(
            hit.opening_formula.as_deref(),
            Some("بسم الله الرحمن الرحيم")
        );
    }

    #[test]
    fn search_is_deterministic() {
        let engine = engine();
        let first = engine.search(&query("الله")).unwrap();
        engine.clear_cache();
        let second = engine.search(&query("الله")).unwrap();
        assert_eq!(first.groups, second.groups);
        assert_eq!(first.total_matches, second.total_matches);
    }

    #[test]
    fn repeated_query_is_served_from_cache() {
        let engine = engine();
        let first = engine.search(&query("الله")).unwrap();
        let second = engine.search(&query("الله")).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(engine.cache_stats().0, 1);
    }

    #[test]
    fn pattern_characters_match_only_literally() {
        let plain = json!([
            {
                "index": 1,
                "name": "اختبار",
                "verses": [
                    { "index": 1, "text": "نص فيه نقطة." },
                    { "index": 2, "text": "نص بلا علامات" }
                ]
            }
        ])
        .to_string();
        let diacritized = json!([
            {
                "index": 1,
                "name": "اختبار",
                "verses": [
                    { "index": 1, "text": "نَص فيه نقطة." },
                    { "index": 2, "text": "نَص بلا علامات" }
                ]
            }
        ])
        .to_string();
        let engine = SearchEngine::new(Arc::new(Corpus::load(&plain, &diacritized).unwrap()));

        // "." would match every verse as a pattern; literally it matches one
        let results = engine.search(&query(".")).unwrap();
        assert_eq!(results.total_matches, 1);
        assert_eq!(results.groups[0].matches[0].verse_index, 1);

        let results = engine.search(&query("نقطة.*")).unwrap();
        assert_eq!(results.total_matches, 0);

        let results = engine.search(&query("(نص")).unwrap();
        assert_eq!(results.total_matches, 0);
    }

    #[test]
    fn suggestions_stop_at_the_limit_in_corpus_order() {
        let verses: Vec<_> = (1..=8)
            .map(|i| json!({ "index": i, "text": format!("قل آية رقم {i}") }))
            .collect();
        let doc = json!([{ "index": 1, "name": "اختبار", "verses": verses }]).to_string();
        let engine = SearchEngine::new(Arc::new(Corpus::load(&doc, &doc).unwrap()));

        let suggestions = engine.suggest("قل");
        assert_eq!(suggestions.len(), 5);
        assert_eq!(suggestions[0], "قل آية رقم 1");
        assert_eq!(suggestions[4], "قل آية رقم 5");
    }

    #[test]
    fn suggestions_require_two_characters() {
        let engine = engine();
        assert!(engine.suggest("ق").is_empty());
        assert!(engine.suggest("").is_empty());
        assert!(!engine.suggest("قل").is_empty());
    }

    #[test]
    fn suggestions_may_be_empty() {
        assert!(engine().suggest("غير موجود").is_empty());
    }
}
