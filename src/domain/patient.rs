//! Patient input types for cardiovascular risk assessment.
//!
//! `PatientData` is the immutable record handed to the scoring core. Range
//! checks live here, at the ingestion edge, so the scoring functions stay
//! total over their documented domain.

use serde::{Deserialize, Serialize};

/// Administrative gender as captured on the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Self-reported physical activity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    Low,
    Moderate,
    High,
}

impl ActivityLevel {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Clinical attributes of one patient, as supplied by the intake layer.
///
/// JSON field names match the dashboard's record shape
/// (`bloodPressureSystolic`, `cholesterolHDL`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientData {
    /// Age in whole years
    pub age: u32,

    pub gender: Gender,

    /// Systolic blood pressure in mmHg
    pub blood_pressure_systolic: u32,

    /// Diastolic blood pressure in mmHg
    pub blood_pressure_diastolic: u32,

    /// Total cholesterol in mg/dL
    pub cholesterol_total: f64,

    /// HDL cholesterol in mg/dL
    #[serde(rename = "cholesterolHDL")]
    pub cholesterol_hdl: f64,

    /// LDL cholesterol in mg/dL
    #[serde(rename = "cholesterolLDL")]
    pub cholesterol_ldl: f64,

    /// Body mass index in kg/m²
    pub bmi: f64,

    /// Current smoker
    pub smoking_status: bool,

    /// Diagnosed diabetes
    pub diabetes_status: bool,

    /// Premature cardiovascular disease in a first-degree relative
    pub family_history: bool,

    pub physical_activity: ActivityLevel,
}

/// Patient data rejected at the ingestion edge.
///
/// Carries every problem found, not just the first one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid patient data: {}", .issues.join("; "))]
pub struct ValidationError {
    pub issues: Vec<String>,
}

impl ValidationError {
    #[must_use]
    pub fn new(issues: Vec<String>) -> Self {
        Self { issues }
    }
}

/// Accepted input ranges (inclusive).
pub mod limits {
    pub const AGE: (u32, u32) = (1, 120);
    pub const SYSTOLIC: (u32, u32) = (50, 300);
    pub const DIASTOLIC: (u32, u32) = (30, 200);
    pub const CHOLESTEROL_TOTAL: (f64, f64) = (50.0, 600.0);
    pub const CHOLESTEROL_HDL: (f64, f64) = (5.0, 200.0);
    pub const CHOLESTEROL_LDL: (f64, f64) = (10.0, 500.0);
    pub const BMI: (f64, f64) = (10.0, 80.0);
}

fn check_measurement(errors: &mut Vec<String>, label: &str, value: f64, (min, max): (f64, f64)) {
    if !value.is_finite() {
        errors.push(format!("{label} must be a finite number"));
    } else if !(min..=max).contains(&value) {
        errors.push(format!("{label} {value} out of range [{min}, {max}]"));
    }
}

impl PatientData {
    /// Validate that every field lies within its accepted range.
    ///
    /// # Errors
    /// Returns a `ValidationError` listing each offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = Vec::new();

        let (min, max) = limits::AGE;
        if !(min..=max).contains(&self.age) {
            errors.push(format!("Age {} out of range [{min}, {max}]", self.age));
        }

        let (min, max) = limits::SYSTOLIC;
        if !(min..=max).contains(&self.blood_pressure_systolic) {
            errors.push(format!(
                "Systolic BP {} out of range [{min}, {max}]",
                self.blood_pressure_systolic
            ));
        }
        let (min, max) = limits::DIASTOLIC;
        if !(min..=max).contains(&self.blood_pressure_diastolic) {
            errors.push(format!(
                "Diastolic BP {} out of range [{min}, {max}]",
                self.blood_pressure_diastolic
            ));
        }
        if self.blood_pressure_diastolic >= self.blood_pressure_systolic {
            errors.push(format!(
                "Diastolic BP {} must be below systolic BP {}",
                self.blood_pressure_diastolic, self.blood_pressure_systolic
            ));
        }

        check_measurement(
            &mut errors,
            "Total cholesterol",
            self.cholesterol_total,
            limits::CHOLESTEROL_TOTAL,
        );
        check_measurement(
            &mut errors,
            "HDL cholesterol",
            self.cholesterol_hdl,
            limits::CHOLESTEROL_HDL,
        );
        check_measurement(
            &mut errors,
            "LDL cholesterol",
            self.cholesterol_ldl,
            limits::CHOLESTEROL_LDL,
        );
        check_measurement(&mut errors, "BMI", self.bmi, limits::BMI);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(errors))
        }
    }

    /// Blood pressure in the conventional `systolic/diastolic` notation.
    #[must_use]
    pub fn blood_pressure(&self) -> String {
        format!(
            "{}/{}",
            self.blood_pressure_systolic, self.blood_pressure_diastolic
        )
    }
}

/// A patient roster entry: identity plus the clinical record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    /// Local roster identifier (e.g. `patient-1`)
    pub id: String,

    /// Display name. Never logged.
    pub name: String,

    /// Date of the last clinic visit, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_visit: Option<chrono::NaiveDate>,

    pub data: PatientData,
}

#[cfg(test)]
pub(crate) fn sample_patient() -> PatientData {
    PatientData {
        age: 52,
        gender: Gender::Female,
        blood_pressure_systolic: 130,
        blood_pressure_diastolic: 85,
        cholesterol_total: 220.0,
        cholesterol_hdl: 45.0,
        cholesterol_ldl: 130.0,
        bmi: 28.0,
        smoking_status: false,
        diabetes_status: false,
        family_history: true,
        physical_activity: ActivityLevel::Moderate,
    }
}
