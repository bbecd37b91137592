//! Report encoding
//!
//! This module projects readability reports into the display metadata the
//! storage collaborator persists next to a passage, and wraps reports in a
//! JSON envelope carrying producer and timing information.

use crate::error::ReadabilityError;
use crate::types::{DifficultyTier, GradeBand, ReadabilityReport};
use crate::{ENGINE_VERSION, PRODUCER_NAME};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Envelope schema version
pub const ENVELOPE_VERSION: &str = "1.0.0";

/// Display metadata persisted verbatim alongside a passage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassageMetadata {
    pub word_count: usize,
    pub sentence_count: usize,
    pub estimated_minutes: u32,
    pub difficulty_level: DifficultyTier,
    pub grade_band: GradeBand,
    /// Rounded to one decimal
    pub flesch_reading_ease: f64,
    /// Rounded to one decimal
    pub flesch_kincaid_grade: f64,
    /// Rounded to one decimal
    pub avg_words_per_sentence: f64,
    /// Rounded to two decimals
    pub avg_syllables_per_word: f64,
    pub readability_description: String,
}

impl PassageMetadata {
    /// Project a report into display metadata. Classification fields are
    /// copied as-is; they were computed from the unrounded grade.
    pub fn from_report(report: &ReadabilityReport) -> Self {
        Self {
            word_count: report.word_count(),
            sentence_count: report.sentence_count(),
            estimated_minutes: report.estimated_minutes,
            difficulty_level: report.difficulty_level,
            grade_band: report.grade_band,
            flesch_reading_ease: round_to(report.flesch_reading_ease, 1),
            flesch_kincaid_grade: round_to(report.flesch_kincaid_grade, 1),
            avg_words_per_sentence: round_to(report.avg_words_per_sentence, 1),
            avg_syllables_per_word: round_to(report.avg_syllables_per_word, 2),
            readability_description: report.readability_description.to_string(),
        }
    }
}

impl From<&ReadabilityReport> for PassageMetadata {
    fn from(report: &ReadabilityReport) -> Self {
        Self::from_report(report)
    }
}

/// Producer block of an envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportProducer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// JSON envelope around a single report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEnvelope {
    pub envelope_version: String,
    pub producer: ReportProducer,
    pub computed_at_utc: String,
    pub metadata: PassageMetadata,
    pub report: ReadabilityReport,
}

/// Encoder for producing report envelopes
pub struct ReportEncoder {
    instance_id: String,
}

impl Default for ReportEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportEncoder {
    /// Create a new encoder with a unique instance ID
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create an encoder with a specific instance ID
    pub fn with_instance_id(instance_id: String) -> Self {
        Self { instance_id }
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    /// Wrap a report in an envelope
    pub fn encode(&self, report: &ReadabilityReport) -> ReportEnvelope {
        ReportEnvelope {
            envelope_version: ENVELOPE_VERSION.to_string(),
            producer: ReportProducer {
                name: PRODUCER_NAME.to_string(),
                version: ENGINE_VERSION.to_string(),
                instance_id: self.instance_id.clone(),
            },
            computed_at_utc: Utc::now().to_rfc3339(),
            metadata: PassageMetadata::from_report(report),
            report: report.clone(),
        }
    }

    /// Encode to a pretty JSON string
    pub fn encode_to_json(&self, report: &ReadabilityReport) -> Result<String, ReadabilityError> {
        let envelope = self.encode(report);
        serde_json::to_string_pretty(&envelope).map_err(ReadabilityError::JsonError)
    }
}

// Halves round to even, so 2.25 displays as 2.2
fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}
