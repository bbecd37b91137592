//! Text metrics extraction
//!
//! Tokenizes raw text into words and sentences and counts syllables:
//! - Words are maximal runs of letters, numbers and `_`. Combining marks and
//!   connector punctuation other than `_` split words, so decomposed text
//!   like "cafe\u{301}" tokenizes as "cafe"
//! - Sentences are segments between runs of `.`, `!` and `?`
//! - Syllables come from a vowel-group heuristic with a silent-e rule
//!
//! The syllable heuristic is approximate by construction. It has no
//! dictionary and no exception list, so words like "creation" or "queue" are
//! miscounted. The classification thresholds in [`crate::config`] were tuned
//! against this exact output distribution, so changing the heuristic moves
//! texts between difficulty tiers.

use crate::types::TextMetrics;
use regex::Regex;
use std::sync::LazyLock;

static WORD_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"[\p{L}\p{N}_]+").ok());

static SENTENCE_DELIMITER_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"[.!?]+").ok());

const VOWELS: &str = "aeiouy";

/// Extractor for raw text counts
pub struct MetricsExtractor;

impl MetricsExtractor {
    /// Extract word, sentence and syllable counts. Total over all inputs.
    pub fn extract(text: &str) -> TextMetrics {
        let words = tokenize_words(text);
        let word_count = words.len();
        let syllable_count = words.iter().map(|w| count_syllables(w)).sum();
        let sentence_count = count_sentences(text);

        if word_count == 0 {
            tracing::debug!(len = text.len(), "text contains no words");
        }

        TextMetrics {
            word_count,
            sentence_count,
            syllable_count,
        }
    }
}

/// Convenience wrapper around [`MetricsExtractor::extract`]
pub fn extract_metrics(text: &str) -> TextMetrics {
    MetricsExtractor::extract(text)
}

/// Split text into word tokens, discarding punctuation and whitespace
pub fn tokenize_words(text: &str) -> Vec<&str> {
    let Some(re) = WORD_RE.as_ref() else {
        return Vec::new();
    };
    re.find_iter(text).map(|m| m.as_str()).collect()
}

/// Count non-empty sentence segments, floored at 1
pub fn count_sentences(text: &str) -> usize {
    let Some(re) = SENTENCE_DELIMITER_RE.as_ref() else {
        return 1;
    };
    let segments = re
        .split(text)
        .filter(|segment| !segment.trim().is_empty())
        .count();

    if segments == 0 {
        tracing::debug!("no sentence segments found, flooring at 1");
    }
    segments.max(1)
}

/// Count syllables in a single word.
///
/// Counts vowel groups (`a e i o u y`), drops one for a trailing `e` and
/// never returns less than 1.
pub fn count_syllables(word: &str) -> usize {
    let word = word.to_lowercase();

    let mut count = 0usize;
    let mut previous_was_vowel = false;
    for c in word.chars() {
        let is_vowel = VOWELS.contains(c);
        if is_vowel && !previous_was_vowel {
            count += 1;
        }
        previous_was_vowel = is_vowel;
    }

    if word.ends_with('e') {
        count = count.saturating_sub(1);
    }

    count.max(1)
}
