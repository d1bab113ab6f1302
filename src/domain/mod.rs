//! Domain layer: Core types and the scoring pipeline.
//!
//! Everything here is pure: no I/O, no logging, no clock. Every function
//! returns the same output for the same input.

mod assessment;
pub mod factors;
pub mod framingham;
pub mod guideline;
mod patient;
pub mod recommendation;
pub mod scoring;
pub mod screening;

pub use assessment::{assess, RiskAssessment, RiskLevel, UrgencyLevel};
pub use factors::{evaluate_risk_factors, FactorName, FactorValue, RiskFactor};
pub use framingham::estimate_ten_year_risk;
pub use guideline::{categorize, BadgeColor, GuidelineCategory};
pub use patient::{limits, ActivityLevel, Gender, PatientData, PatientRecord, ValidationError};
pub use recommendation::{
    generate_recommendations, sort_by_priority, Priority, Recommendation, RecommendationCategory,
};
pub use scoring::{aggregate_score, classify_urgency, RiskScore};
pub use screening::quick_risk_label;

#[cfg(test)]
pub(crate) use patient::sample_patient;
