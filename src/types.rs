//! Core types for the Lexiscale engine
//!
//! This module defines the values that flow through each stage: text metrics,
//! readability reports, proficiency tiers and the grade ranges handed to the
//! content-generation collaborator.

use crate::error::ReadabilityError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse proficiency tier.
///
/// Used both for a reader's estimated level (owned by the user-profile
/// collaborator) and for the difficulty label assigned to a scored text.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyTier {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

impl DifficultyTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyTier::Beginner => "beginner",
            DifficultyTier::Intermediate => "intermediate",
            DifficultyTier::Advanced => "advanced",
        }
    }

    /// Parse a tier string, falling back to `Intermediate` for anything
    /// unrecognized. Matching is case-sensitive.
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or_else(|_| {
            tracing::debug!(value, "unrecognized difficulty tier, using intermediate");
            Self::default()
        })
    }
}

impl FromStr for DifficultyTier {
    type Err = ReadabilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(DifficultyTier::Beginner),
            "intermediate" => Ok(DifficultyTier::Intermediate),
            "advanced" => Ok(DifficultyTier::Advanced),
            other => Err(ReadabilityError::UnknownValue {
                kind: "difficulty tier",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display-oriented grade bucketing. Finer than [`DifficultyTier`]: both
/// `High` and `Adult` map to `DifficultyTier::Advanced`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradeBand {
    Elementary,
    Middle,
    High,
    Adult,
}

impl GradeBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            GradeBand::Elementary => "elementary",
            GradeBand::Middle => "middle",
            GradeBand::High => "high",
            GradeBand::Adult => "adult",
        }
    }
}

impl fmt::Display for GradeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One-shot modifier applied to a tier's grade range for a single request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeAdjustment {
    Easier,
    #[default]
    Appropriate,
    Challenging,
}

impl ChallengeAdjustment {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChallengeAdjustment::Easier => "easier",
            ChallengeAdjustment::Appropriate => "appropriate",
            ChallengeAdjustment::Challenging => "challenging",
        }
    }

    /// Parse an adjustment string, falling back to `Appropriate`.
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or_else(|_| {
            tracing::debug!(value, "unrecognized challenge adjustment, using appropriate");
            Self::default()
        })
    }
}

impl FromStr for ChallengeAdjustment {
    type Err = ReadabilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easier" => Ok(ChallengeAdjustment::Easier),
            "appropriate" => Ok(ChallengeAdjustment::Appropriate),
            "challenging" => Ok(ChallengeAdjustment::Challenging),
            other => Err(ReadabilityError::UnknownValue {
                kind: "challenge adjustment",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ChallengeAdjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Human-readable bucket of a Flesch Reading Ease score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadabilityDescription {
    VeryEasy,
    Easy,
    FairlyEasy,
    Standard,
    FairlyDifficult,
    Difficult,
    VeryDifficult,
}

impl ReadabilityDescription {
    /// Bucket a reading-ease score (descending thresholds 90/80/70/60/50/30)
    pub fn from_reading_ease(ease: f64) -> Self {
        if ease >= 90.0 {
            ReadabilityDescription::VeryEasy
        } else if ease >= 80.0 {
            ReadabilityDescription::Easy
        } else if ease >= 70.0 {
            ReadabilityDescription::FairlyEasy
        } else if ease >= 60.0 {
            ReadabilityDescription::Standard
        } else if ease >= 50.0 {
            ReadabilityDescription::FairlyDifficult
        } else if ease >= 30.0 {
            ReadabilityDescription::Difficult
        } else {
            ReadabilityDescription::VeryDifficult
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReadabilityDescription::VeryEasy => "Very Easy",
            ReadabilityDescription::Easy => "Easy",
            ReadabilityDescription::FairlyEasy => "Fairly Easy",
            ReadabilityDescription::Standard => "Standard",
            ReadabilityDescription::FairlyDifficult => "Fairly Difficult",
            ReadabilityDescription::Difficult => "Difficult",
            ReadabilityDescription::VeryDifficult => "Very Difficult",
        }
    }

    /// Nominal US grade level associated with the bucket
    pub fn grade_gloss(&self) -> &'static str {
        match self {
            ReadabilityDescription::VeryEasy => "5th grade level",
            ReadabilityDescription::Easy => "6th grade level",
            ReadabilityDescription::FairlyEasy => "7th grade level",
            ReadabilityDescription::Standard => "8th-9th grade level",
            ReadabilityDescription::FairlyDifficult => "10th-12th grade level",
            ReadabilityDescription::Difficult => "College level",
            ReadabilityDescription::VeryDifficult => "Graduate level",
        }
    }
}

impl fmt::Display for ReadabilityDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.label(), self.grade_gloss())
    }
}

/// Raw counts extracted from a text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextMetrics {
    /// Number of word tokens
    pub word_count: usize,
    /// Number of sentence segments, never below 1
    pub sentence_count: usize,
    /// Heuristic syllable total; at least `word_count`
    pub syllable_count: usize,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            word_count: 0,
            sentence_count: 1,
            syllable_count: 0,
        }
    }
}

/// Full readability analysis of one text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadabilityReport {
    /// Counts the report was computed from
    #[serde(flatten)]
    pub metrics: TextMetrics,
    pub avg_words_per_sentence: f64,
    pub avg_syllables_per_word: f64,
    /// Flesch Reading Ease, clamped to [0, 100]; higher is easier
    pub flesch_reading_ease: f64,
    /// Flesch-Kincaid grade, clamped to >= 0 with no upper bound
    pub flesch_kincaid_grade: f64,
    pub difficulty_level: DifficultyTier,
    pub grade_band: GradeBand,
    /// Reading time at the configured words-per-minute, at least 1
    pub estimated_minutes: u32,
    pub readability_description: ReadabilityDescription,
}

impl ReadabilityReport {
    pub fn word_count(&self) -> usize {
        self.metrics.word_count
    }

    pub fn sentence_count(&self) -> usize {
        self.metrics.sentence_count
    }

    pub fn syllable_count(&self) -> usize {
        self.metrics.syllable_count
    }
}

/// Inclusive target grade-level range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradeRange {
    pub min_grade: f64,
    pub max_grade: f64,
}

impl GradeRange {
    pub const fn new(min_grade: f64, max_grade: f64) -> Self {
        Self {
            min_grade,
            max_grade,
        }
    }

    /// Whether `grade` falls inside the range, bounds included
    pub fn contains(&self, grade: f64) -> bool {
        grade >= self.min_grade && grade <= self.max_grade
    }

    pub fn as_tuple(&self) -> (f64, f64) {
        (self.min_grade, self.max_grade)
    }
}

impl From<GradeRange> for (f64, f64) {
    fn from(range: GradeRange) -> Self {
        range.as_tuple()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_ordering() {
        assert!(DifficultyTier::Beginner < DifficultyTier::Intermediate);
        assert!(DifficultyTier::Intermediate < DifficultyTier::Advanced);
    }

    #[test]
    fn test_tier_parsing_is_case_sensitive() {
        assert_eq!(
            "advanced".parse::<DifficultyTier>().unwrap(),
            DifficultyTier::Advanced
        );
        assert!("Advanced".parse::<DifficultyTier>().is_err());
        assert_eq!(
            DifficultyTier::parse_or_default("Advanced"),
            DifficultyTier::Intermediate
        );
    }

    #[test]
    fn test_adjustment_fallback() {
        assert_eq!(
            ChallengeAdjustment::parse_or_default("challenging"),
            ChallengeAdjustment::Challenging
        );
        assert_eq!(
            ChallengeAdjustment::parse_or_default(""),
            ChallengeAdjustment::Appropriate
        );
    }

    #[test]
    fn test_enum_serialization() {
        assert_eq!(
            serde_json::to_string(&DifficultyTier::Beginner).unwrap(),
            "\"beginner\""
        );
        assert_eq!(
            serde_json::to_string(&GradeBand::Adult).unwrap(),
            "\"adult\""
        );
        assert_eq!(
            serde_json::to_string(&ReadabilityDescription::FairlyDifficult).unwrap(),
            "\"fairly_difficult\""
        );
    }

    #[test]
    fn test_description_buckets() {
        assert_eq!(
            ReadabilityDescription::from_reading_ease(100.0),
            ReadabilityDescription::VeryEasy
        );
        assert_eq!(
            ReadabilityDescription::from_reading_ease(89.99),
            ReadabilityDescription::Easy
        );
        assert_eq!(
            ReadabilityDescription::from_reading_ease(60.0),
            ReadabilityDescription::Standard
        );
        assert_eq!(
            ReadabilityDescription::from_reading_ease(30.0),
            ReadabilityDescription::Difficult
        );
        assert_eq!(
            ReadabilityDescription::from_reading_ease(0.0),
            ReadabilityDescription::VeryDifficult
        );
        assert_eq!(
            ReadabilityDescription::Standard.to_string(),
            "Standard - 8th-9th grade level"
        );
    }

    #[test]
    fn test_grade_range_contains_bounds() {
        let range = GradeRange::new(2.0, 5.0);
        assert!(range.contains(2.0));
        assert!(range.contains(5.0));
        assert!(!range.contains(5.01));
        assert!(!range.contains(1.99));
        assert_eq!(range.as_tuple(), (2.0, 5.0));
    }

    #[test]
    fn test_default_metrics_has_one_sentence() {
        let metrics = TextMetrics::default();
        assert_eq!(metrics.word_count, 0);
        assert_eq!(metrics.sentence_count, 1);
        assert_eq!(metrics.syllable_count, 0);
    }
}
