//! Assessment result types and the assessment pipeline.
//!
//! `assess` is the single entry point that composes the estimator, the
//! factor evaluator, the score aggregator, the urgency classifier and the
//! recommendation generator.

use serde::{Deserialize, Serialize};

use super::factors::{evaluate_risk_factors, RiskFactor};
use super::framingham::estimate_ten_year_risk;
use super::patient::PatientData;
use super::recommendation::{generate_recommendations, Recommendation};
use super::scoring::{aggregate_score, classify_urgency};

/// Three-tier risk classification used for factors and overall risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Within the reference range
    Low,
    /// Borderline, monitoring recommended
    Medium,
    /// Elevated, intervention recommended
    High,
}

impl RiskLevel {
    /// Numeric weight of the tier in the aggregate score.
    #[must_use]
    pub fn value(&self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Get a human-readable description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Low => "Low risk - No significant indicators",
            Self::Medium => "Medium risk - Follow-up recommended",
            Self::High => "High risk - Intervention recommended",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

/// Triage classification, distinct from the overall risk tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    Routine,
    Urgent,
    Immediate,
}

impl UrgencyLevel {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Routine => "routine",
            Self::Urgent => "urgent",
            Self::Immediate => "immediate",
        }
    }
}

impl std::fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Routine => write!(f, "ROUTINE"),
            Self::Urgent => write!(f, "URGENT"),
            Self::Immediate => write!(f, "IMMEDIATE"),
        }
    }
}

/// Complete cardiovascular risk assessment for one patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub overall_risk: RiskLevel,

    /// Weighted factor score
    pub risk_score: f64,

    /// Estimated 10-year ASCVD risk in percent, within [1, 50]
    pub ten_year_risk: f64,

    /// The ten evaluated factors, in evaluation order
    pub risk_factors: Vec<RiskFactor>,

    /// Recommendations, highest priority first
    pub recommendations: Vec<Recommendation>,

    pub urgency_level: UrgencyLevel,
}

/// Assess a patient's cardiovascular risk.
///
/// Pure and total: equal inputs always yield equal assessments.
#[must_use]
pub fn assess(patient: &PatientData) -> RiskAssessment {
    let ten_year_risk = estimate_ten_year_risk(patient);
    let risk_factors = evaluate_risk_factors(patient);
    let score = aggregate_score(&risk_factors);
    let recommendations = generate_recommendations(patient, &risk_factors, score.overall_risk);
    let urgency_level = classify_urgency(score.overall_risk, ten_year_risk);

    RiskAssessment {
        overall_risk: score.overall_risk,
        risk_score: score.value,
        ten_year_risk,
        risk_factors,
        recommendations,
        urgency_level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::patient::sample_patient;

    #[test]
    fn test_risk_level_ordering() {
        assert!(RiskLevel::High > RiskLevel::Medium);
        assert!(RiskLevel::Medium > RiskLevel::Low);
        assert_eq!(RiskLevel::High.value(), 3);
        assert_eq!(RiskLevel::Low.value(), 1);
    }

    #[test]
    fn test_assess_is_deterministic() {
        let patient = sample_patient();
        assert_eq!(assess(&patient), assess(&patient));
    }

    #[test]
    fn test_assessment_shape() {
        let assessment = assess(&sample_patient());
        assert_eq!(assessment.risk_factors.len(), 10);
        assert!(!assessment.recommendations.is_empty());
        assert!((1.0..=50.0).contains(&assessment.ten_year_risk));
    }

    #[test]
    fn test_assessment_json_shape() {
        let json = serde_json::to_value(assess(&sample_patient())).expect("Should serialize");
        assert!(json.get("overallRisk").is_some());
        assert!(json.get("tenYearRisk").is_some());
        assert!(json.get("urgencyLevel").is_some());
        assert_eq!(json["riskFactors"][1]["name"], "Blood Pressure");
    }
}
