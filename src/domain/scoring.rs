//! Weighted score aggregation and urgency triage.

use serde::{Deserialize, Serialize};

use super::assessment::{RiskLevel, UrgencyLevel};
use super::factors::RiskFactor;

/// Score at or above which overall risk is high.
pub const HIGH_RISK_SCORE: f64 = 200.0;

/// Score at or above which overall risk is medium.
pub const MEDIUM_RISK_SCORE: f64 = 150.0;

/// Ten-year risk (percent) above which a high-risk patient is seen immediately.
pub const IMMEDIATE_TEN_YEAR_RISK: f64 = 20.0;

/// Aggregated factor score and the overall tier it maps to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskScore {
    pub value: f64,
    pub overall_risk: RiskLevel,
}

/// Map a score to the overall risk tier.
#[must_use]
pub fn overall_risk(score: f64) -> RiskLevel {
    if score >= HIGH_RISK_SCORE {
        RiskLevel::High
    } else if score >= MEDIUM_RISK_SCORE {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Sum `tier value * weight * 100` over the factors, in order.
#[must_use]
pub fn aggregate_score(factors: &[RiskFactor]) -> RiskScore {
    let value = factors.iter().fold(0.0, |acc, factor| {
        acc + f64::from(factor.risk.value()) * factor.weight * 100.0
    });

    RiskScore {
        value,
        overall_risk: overall_risk(value),
    }
}

/// Triage a patient from overall risk and ten-year risk.
#[must_use]
pub fn classify_urgency(overall: RiskLevel, ten_year_risk: f64) -> UrgencyLevel {
    match overall {
        RiskLevel::High if ten_year_risk > IMMEDIATE_TEN_YEAR_RISK => UrgencyLevel::Immediate,
        RiskLevel::High => UrgencyLevel::Urgent,
        RiskLevel::Medium | RiskLevel::Low => UrgencyLevel::Routine,
    }
}
