//! Readability scoring
//!
//! This module applies the closed-form Flesch formulas to extracted metrics
//! and classifies the result:
//! - Flesch Reading Ease, clamped to 0-100
//! - Flesch-Kincaid Grade, clamped at 0 with no ceiling
//! - Difficulty tier and grade band from grade thresholds
//! - Reading-time estimate and a reading-ease description

use crate::config::{GradeThresholds, ScoringConfig};
use crate::types::{
    DifficultyTier, GradeBand, ReadabilityDescription, ReadabilityReport, TextMetrics,
};

/// Scorer for turning text metrics into a readability report
#[derive(Debug, Clone, Default)]
pub struct ReadabilityScorer {
    config: ScoringConfig,
}

impl ReadabilityScorer {
    /// Create a scorer with default constants
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scorer with explicit constants
    pub fn with_config(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score a set of metrics
    pub fn score(&self, metrics: TextMetrics) -> ReadabilityReport {
        let avg_words_per_sentence = compute_avg_words_per_sentence(&metrics);
        let avg_syllables_per_word = compute_avg_syllables_per_word(&metrics);

        let (flesch_reading_ease, flesch_kincaid_grade) = if metrics.word_count == 0 {
            tracing::debug!("scoring empty text, reporting zero ease and grade");
            (0.0, 0.0)
        } else {
            (
                flesch_reading_ease(avg_words_per_sentence, avg_syllables_per_word),
                flesch_kincaid_grade(avg_words_per_sentence, avg_syllables_per_word),
            )
        };

        let (difficulty_level, grade_band) =
            classify_grade(flesch_kincaid_grade, &self.config.grade_thresholds);

        ReadabilityReport {
            metrics,
            avg_words_per_sentence,
            avg_syllables_per_word,
            flesch_reading_ease,
            flesch_kincaid_grade,
            difficulty_level,
            grade_band,
            estimated_minutes: estimate_minutes(metrics.word_count, self.config.words_per_minute),
            readability_description: ReadabilityDescription::from_reading_ease(
                flesch_reading_ease,
            ),
        }
    }
}

/// Score metrics with the default configuration
pub fn score(metrics: TextMetrics) -> ReadabilityReport {
    ReadabilityScorer::new().score(metrics)
}

fn compute_avg_words_per_sentence(metrics: &TextMetrics) -> f64 {
    // sentence_count is floored at 1 by the extractor; guard hand-built metrics too
    metrics.word_count as f64 / metrics.sentence_count.max(1) as f64
}

fn compute_avg_syllables_per_word(metrics: &TextMetrics) -> f64 {
    if metrics.word_count == 0 {
        return 0.0;
    }
    metrics.syllable_count as f64 / metrics.word_count as f64
}

/// Flesch Reading Ease
///
/// Formula: `206.835 - 1.015 * words/sentence - 84.6 * syllables/word`,
/// clamped to [0, 100]
pub fn flesch_reading_ease(avg_words_per_sentence: f64, avg_syllables_per_word: f64) -> f64 {
    (206.835 - 1.015 * avg_words_per_sentence - 84.6 * avg_syllables_per_word).clamp(0.0, 100.0)
}

/// Flesch-Kincaid Grade Level
///
/// Formula: `0.39 * words/sentence + 11.8 * syllables/word - 15.59`,
/// floored at 0. Dense text can exceed grade 12.
pub fn flesch_kincaid_grade(avg_words_per_sentence: f64, avg_syllables_per_word: f64) -> f64 {
    (0.39 * avg_words_per_sentence + 11.8 * avg_syllables_per_word - 15.59).max(0.0)
}

/// Map a grade to a difficulty tier and a grade band.
///
/// The tier is a 3-way split and the band a 4-way split over the same grade;
/// both `High` and `Adult` bands are `Advanced`.
pub fn classify_grade(grade: f64, thresholds: &GradeThresholds) -> (DifficultyTier, GradeBand) {
    if grade <= thresholds.beginner_max {
        (DifficultyTier::Beginner, GradeBand::Elementary)
    } else if grade <= thresholds.intermediate_max {
        (DifficultyTier::Intermediate, GradeBand::Middle)
    } else if grade <= thresholds.high_max {
        (DifficultyTier::Advanced, GradeBand::High)
    } else {
        (DifficultyTier::Advanced, GradeBand::Adult)
    }
}

/// Reading time in whole minutes, at least 1. Halves round to even.
pub fn estimate_minutes(word_count: usize, words_per_minute: f64) -> u32 {
    let minutes = (word_count as f64 / words_per_minute).round_ties_even();
    (minutes as u32).max(1)
}
