//! Difficulty calibration
//!
//! Maps a reader's proficiency tier and a per-request challenge adjustment to
//! a target grade range. The range is advisory: the content collaborator uses
//! it to steer generation or filter a pool, and can check candidates against
//! it with [`DifficultyCalibrator::evaluate`].

use crate::config::{AdjustmentPolicy, BaseRanges, ScoringConfig};
use crate::types::{ChallengeAdjustment, DifficultyTier, GradeRange, ReadabilityReport};
use serde::{Deserialize, Serialize};

/// Outcome of checking a candidate text against a target range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateVerdict {
    /// Grade is inside the range
    Accept,
    /// Grade is below `min_grade`
    TooEasy,
    /// Grade is above `max_grade`
    TooHard,
}

impl CandidateVerdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, CandidateVerdict::Accept)
    }
}

/// A scored candidate together with the range it was checked against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateEvaluation {
    pub report: ReadabilityReport,
    pub range: GradeRange,
    pub verdict: CandidateVerdict,
}

impl CandidateEvaluation {
    pub fn is_accepted(&self) -> bool {
        self.verdict.is_accepted()
    }
}

/// Calibrator for target grade ranges
#[derive(Debug, Clone, Default)]
pub struct DifficultyCalibrator {
    base_ranges: BaseRanges,
    policy: AdjustmentPolicy,
}

impl DifficultyCalibrator {
    /// Create a calibrator with the default ranges
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &ScoringConfig) -> Self {
        Self {
            base_ranges: config.base_ranges,
            policy: config.adjustment,
        }
    }

    /// Target grade range for a tier under an adjustment
    pub fn target_grade_range(
        &self,
        tier: DifficultyTier,
        adjustment: ChallengeAdjustment,
    ) -> GradeRange {
        let base = self.base_ranges.for_tier(tier);

        match adjustment {
            ChallengeAdjustment::Appropriate => base,
            ChallengeAdjustment::Easier => GradeRange::new(
                (base.min_grade - self.policy.shift).max(self.policy.easier_min_floor),
                (base.max_grade - self.policy.shift).max(self.policy.easier_max_floor),
            ),
            // No ceiling: advanced + challenging deliberately goes past grade 12
            ChallengeAdjustment::Challenging => GradeRange::new(
                base.min_grade + self.policy.shift,
                base.max_grade + self.policy.shift,
            ),
        }
    }

    /// Same as [`Self::target_grade_range`] but from raw strings, falling
    /// back to `intermediate` / `appropriate` for unrecognized values
    pub fn target_grade_range_from_str(&self, tier: &str, adjustment: Option<&str>) -> GradeRange {
        let tier = DifficultyTier::parse_or_default(tier);
        let adjustment = adjustment
            .map(ChallengeAdjustment::parse_or_default)
            .unwrap_or_default();
        self.target_grade_range(tier, adjustment)
    }

    /// Compare a scored candidate against a target range
    pub fn evaluate(&self, report: &ReadabilityReport, range: GradeRange) -> CandidateVerdict {
        let grade = report.flesch_kincaid_grade;
        if grade < range.min_grade {
            CandidateVerdict::TooEasy
        } else if grade > range.max_grade {
            CandidateVerdict::TooHard
        } else {
            CandidateVerdict::Accept
        }
    }
}

/// Target grade range with the default configuration
pub fn target_grade_range(tier: DifficultyTier, adjustment: ChallengeAdjustment) -> GradeRange {
    DifficultyCalibrator::new().target_grade_range(tier, adjustment)
}
