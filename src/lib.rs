//! # CardioCheck
//!
//! Cardiovascular risk assessment for a clinician dashboard.
//!
//! This crate provides:
//! - Weighted risk-factor scoring with an overall low/medium/high tier
//! - A simplified Framingham 10-year risk estimate
//! - Prioritized clinical recommendations and an urgency level
//! - Guideline categorization and a coarse roster screening badge
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Pure scoring pipeline and patient types
//! - `ports`: Trait definitions for obtaining patient records
//! - `adapters`: JSON roster files and log redaction
//! - `application`: Validated assessment and cohort summaries
//! - `report`: Plain-text rendering for the CLI

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod report;

pub use domain::{assess, PatientData, RiskAssessment, RiskLevel, UrgencyLevel};

/// Result type for CardioCheck operations
pub type Result<T> = std::result::Result<T, CardioCheckError>;

/// Main error type for CardioCheck
#[derive(Debug, thiserror::Error)]
pub enum CardioCheckError {
    #[error(transparent)]
    Validation(#[from] domain::ValidationError),

    #[error("Patient {id}: {source}")]
    InvalidRecord {
        id: String,
        #[source]
        source: domain::ValidationError,
    },

    #[error("Patient not found: {0}")]
    PatientNotFound(String),

    #[error("Roster error: {0}")]
    Roster(#[from] adapters::RosterError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
