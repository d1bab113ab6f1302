//! Cohort summary: Aggregate counts over a set of assessments.

use serde::Serialize;

use super::assessment::PatientAssessment;
use crate::domain::{BadgeColor, RiskLevel, UrgencyLevel};

/// Patients per low/medium/high tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TierCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl TierCounts {
    fn record(&mut self, level: RiskLevel) {
        match level {
            RiskLevel::Low => self.low += 1,
            RiskLevel::Medium => self.medium += 1,
            RiskLevel::High => self.high += 1,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UrgencyCounts {
    pub routine: usize,
    pub urgent: usize,
    pub immediate: usize,
}

impl UrgencyCounts {
    fn record(&mut self, level: UrgencyLevel) {
        match level {
            UrgencyLevel::Routine => self.routine += 1,
            UrgencyLevel::Urgent => self.urgent += 1,
            UrgencyLevel::Immediate => self.immediate += 1,
        }
    }
}

/// Distribution of a cohort across risk tiers, urgency and guideline category.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortSummary {
    pub total: usize,
    pub overall_risk: TierCounts,
    pub urgency: UrgencyCounts,

    /// Guideline categories counted as low / intermediate (medium) / high
    pub guideline: TierCounts,

    /// Roster badge distribution
    pub screening: TierCounts,

    /// 0.0 for an empty cohort
    pub mean_risk_score: f64,

    /// 0.0 for an empty cohort
    pub mean_ten_year_risk: f64,
}

impl CohortSummary {
    #[must_use]
    pub fn from_assessments(assessments: &[PatientAssessment]) -> Self {
        let mut summary = Self {
            total: assessments.len(),
            ..Self::default()
        };
        if assessments.is_empty() {
            return summary;
        }

        let mut score_sum = 0.0;
        let mut ten_year_sum = 0.0;
        for entry in assessments {
            let assessment = &entry.assessment;
            summary.overall_risk.record(assessment.overall_risk);
            summary.urgency.record(assessment.urgency_level);
            summary.screening.record(entry.screening_label);
            summary.guideline.record(match entry.guideline.color {
                BadgeColor::Destructive => RiskLevel::High,
                BadgeColor::Default => RiskLevel::Medium,
                BadgeColor::Secondary => RiskLevel::Low,
            });
            score_sum += assessment.risk_score;
            ten_year_sum += assessment.ten_year_risk;
        }

        let n = assessments.len() as f64;
        summary.mean_risk_score = score_sum / n;
        summary.mean_ten_year_risk = ten_year_sum / n;
        summary
    }
}
