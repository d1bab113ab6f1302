//! Assessment service: Validated risk assessment over a patient source.
//!
//! This service coordinates:
//! - Input validation at the ingestion edge
//! - The pure scoring pipeline (`domain::assess`)
//! - Guideline categorization and the roster screening label
//! - Logging of each outcome

use std::sync::Arc;

use serde::Serialize;

use crate::domain::{
    assess, categorize, quick_risk_label, GuidelineCategory, PatientData, PatientRecord,
    RiskAssessment, RiskLevel,
};
use crate::ports::PatientSource;
use crate::CardioCheckError;

/// An assessment together with the views the dashboard renders beside it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientAssessment {
    /// Roster id, when the patient came from a roster
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_name: Option<String>,

    /// Coarse roster badge, computed independently of `assessment`
    pub screening_label: RiskLevel,

    /// Guideline category of `assessment.ten_year_risk`
    pub guideline: GuidelineCategory,

    pub assessment: RiskAssessment,
}

/// Validate and assess a single patient.
///
/// # Errors
/// Returns `CardioCheckError::Validation` if the data is out of range.
pub fn assess_validated(patient: &PatientData) -> Result<RiskAssessment, CardioCheckError> {
    patient.validate()?;

    tracing::debug!("Validation passed, running assessment pipeline...");
    let assessment = assess(patient);

    tracing::info!(
        "Assessment complete: overall={}, score={:.1}, ten_year={:.1}%, urgency={}, recommendations={}",
        assessment.overall_risk,
        assessment.risk_score,
        assessment.ten_year_risk,
        assessment.urgency_level,
        assessment.recommendations.len()
    );

    Ok(assessment)
}

impl PatientAssessment {
    /// Validate and assess a patient that is not on any roster.
    ///
    /// # Errors
    /// Returns `CardioCheckError::Validation` if the data is out of range.
    pub fn for_patient(patient: &PatientData) -> Result<Self, CardioCheckError> {
        let assessment = assess_validated(patient)?;
        Ok(with_views(patient, assessment, None, None))
    }
}

fn with_views(
    patient: &PatientData,
    assessment: RiskAssessment,
    patient_id: Option<String>,
    patient_name: Option<String>,
) -> PatientAssessment {
    PatientAssessment {
        patient_id,
        patient_name,
        screening_label: quick_risk_label(patient),
        guideline: categorize(assessment.ten_year_risk),
        assessment,
    }
}

/// Service for assessing patients from a roster.
pub struct AssessmentService<S>
where
    S: PatientSource,
{
    source: Arc<S>,
}

impl<S> AssessmentService<S>
where
    S: PatientSource,
    S::Error: Into<CardioCheckError>,
{
    /// Create a new assessment service.
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }

    /// Assess a patient that is not on the roster.
    ///
    /// # Errors
    /// Returns `CardioCheckError::Validation` if the data is out of range.
    pub fn assess_patient(&self, patient: &PatientData) -> Result<PatientAssessment, CardioCheckError> {
        PatientAssessment::for_patient(patient)
    }

    /// Assess one roster record.
    ///
    /// # Errors
    /// Returns `CardioCheckError::InvalidRecord` if the record fails validation.
    pub fn assess_record(&self, record: &PatientRecord) -> Result<PatientAssessment, CardioCheckError> {
        tracing::debug!("Assessing roster record {}", record.id);

        let assessment = assess_validated(&record.data).map_err(|e| match e {
            CardioCheckError::Validation(source) => CardioCheckError::InvalidRecord {
                id: record.id.clone(),
                source,
            },
            other => other,
        })?;

        Ok(with_views(
            &record.data,
            assessment,
            Some(record.id.clone()),
            Some(record.name.clone()),
        ))
    }

    /// Look up a patient by roster id and assess them.
    ///
    /// # Errors
    /// Returns error if the roster cannot be read, the id is unknown, or the
    /// record fails validation.
    pub fn assess_by_id(&self, id: &str) -> Result<PatientAssessment, CardioCheckError> {
        let record = self
            .source
            .find_patient(id)
            .map_err(Into::<CardioCheckError>::into)?
            .ok_or_else(|| CardioCheckError::PatientNotFound(id.to_string()))?;
        self.assess_record(&record)
    }

    /// Assess every patient on the roster, in roster order.
    ///
    /// Stops at the first invalid record; there are no partial results.
    ///
    /// # Errors
    /// Returns error if the roster cannot be read or any record is invalid.
    pub fn assess_roster(&self) -> Result<Vec<PatientAssessment>, CardioCheckError> {
        let records = self.source.load_patients().map_err(Into::<CardioCheckError>::into)?;
        tracing::info!("Assessing roster of {} patients...", records.len());

        records.iter().map(|record| self.assess_record(record)).collect()
    }

    /// Number of patients on the roster.
    ///
    /// # Errors
    /// Returns error if the roster cannot be read.
    pub fn patient_count(&self) -> Result<usize, CardioCheckError> {
        self.source.count_patients().map_err(Into::into)
    }
}
