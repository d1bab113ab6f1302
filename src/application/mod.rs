//! Application layer: Use cases and services.
//!
//! This module wraps the pure domain pipeline with validation, roster
//! lookup and cohort aggregation.

mod assessment;
mod cohort;

pub use assessment::{assess_validated, AssessmentService, PatientAssessment};
pub use cohort::{CohortSummary, TierCounts, UrgencyCounts};
