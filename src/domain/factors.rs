//! Risk factor evaluation.
//!
//! Ten named factors are evaluated in a fixed order. Weights, descriptions
//! and reference ranges come from `FACTOR_TABLE`; numeric tiers come from
//! the `*_BAND` constants.

use serde::{Deserialize, Serialize};

use super::assessment::RiskLevel;
use super::patient::{ActivityLevel, PatientData};

/// The ten factors, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FactorName {
    #[serde(rename = "Age")]
    Age,
    #[serde(rename = "Blood Pressure")]
    BloodPressure,
    #[serde(rename = "Total Cholesterol")]
    TotalCholesterol,
    #[serde(rename = "HDL Cholesterol")]
    HdlCholesterol,
    #[serde(rename = "LDL Cholesterol")]
    LdlCholesterol,
    #[serde(rename = "BMI")]
    Bmi,
    #[serde(rename = "Smoking Status")]
    SmokingStatus,
    #[serde(rename = "Diabetes")]
    Diabetes,
    #[serde(rename = "Family History")]
    FamilyHistory,
    #[serde(rename = "Physical Activity")]
    PhysicalActivity,
}

impl FactorName {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Age => "Age",
            Self::BloodPressure => "Blood Pressure",
            Self::TotalCholesterol => "Total Cholesterol",
            Self::HdlCholesterol => "HDL Cholesterol",
            Self::LdlCholesterol => "LDL Cholesterol",
            Self::Bmi => "BMI",
            Self::SmokingStatus => "Smoking Status",
            Self::Diabetes => "Diabetes",
            Self::FamilyHistory => "Family History",
            Self::PhysicalActivity => "Physical Activity",
        }
    }
}

impl std::fmt::Display for FactorName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Observed value of a factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FactorValue {
    Number(#[serde(serialize_with = "serialize_number")] f64),
    Text(String),
}

/// Whole numbers go out as JSON integers (`70`, not `70.0`).
fn serialize_number<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
    if value.fract() == 0.0 && value.abs() <= MAX_EXACT {
        #[allow(clippy::cast_possible_truncation)]
        let whole = *value as i64;
        serializer.serialize_i64(whole)
    } else {
        serializer.serialize_f64(*value)
    }
}

impl std::fmt::Display for FactorValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// One evaluated risk factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskFactor {
    pub name: FactorName,
    pub value: FactorValue,
    pub risk: RiskLevel,

    /// Fixed per factor, in [0, 1]
    pub weight: f64,

    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normal_range: Option<String>,
}

/// Static metadata for one factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactorSpec {
    pub name: FactorName,
    pub weight: f64,
    pub description: &'static str,
    pub normal_range: Option<&'static str>,
}

/// Factor metadata in evaluation order.
///
/// The weights sum to 1.5, not 1.0. The overall-risk thresholds in
/// `scoring` are calibrated against this sum.
pub const FACTOR_TABLE: [FactorSpec; 10] = [
    FactorSpec {
        name: FactorName::Age,
        weight: 0.2,
        description: "Age is a non-modifiable risk factor for cardiovascular disease",
        normal_range: Some("N/A"),
    },
    FactorSpec {
        name: FactorName::BloodPressure,
        weight: 0.25,
        description: "Elevated blood pressure increases cardiovascular risk",
        normal_range: Some("<120/80 mmHg"),
    },
    FactorSpec {
        name: FactorName::TotalCholesterol,
        weight: 0.15,
        description: "High cholesterol contributes to atherosclerosis",
        normal_range: Some("<200 mg/dL"),
    },
    FactorSpec {
        name: FactorName::HdlCholesterol,
        weight: 0.1,
        description: "Low HDL cholesterol reduces cardiovascular protection",
        normal_range: Some(">50 mg/dL (women), >40 mg/dL (men)"),
    },
    FactorSpec {
        name: FactorName::LdlCholesterol,
        weight: 0.15,
        description: "LDL cholesterol is the primary atherogenic lipoprotein",
        normal_range: Some("<100 mg/dL"),
    },
    FactorSpec {
        name: FactorName::Bmi,
        weight: 0.1,
        description: "Obesity increases cardiovascular risk through multiple mechanisms",
        normal_range: Some("18.5-24.9 kg/m²"),
    },
    FactorSpec {
        name: FactorName::SmokingStatus,
        weight: 0.2,
        description: "Smoking significantly increases cardiovascular risk",
        normal_range: Some("Non-smoker"),
    },
    FactorSpec {
        name: FactorName::Diabetes,
        weight: 0.15,
        description: "Diabetes is a major cardiovascular risk factor",
        normal_range: Some("Absent"),
    },
    FactorSpec {
        name: FactorName::FamilyHistory,
        weight: 0.1,
        description: "Family history indicates genetic predisposition",
        normal_range: Some("Negative"),
    },
    FactorSpec {
        name: FactorName::PhysicalActivity,
        weight: 0.1,
        description: "Regular physical activity reduces cardiovascular risk",
        normal_range: Some("Moderate to high"),
    },
];

/// Which side of the thresholds is worse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Strictly above a threshold is worse
    Above,
    /// Strictly below a threshold is worse
    Below,
}

/// Strict two-threshold tiering for a numeric measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericBand {
    pub high: f64,
    pub medium: f64,
    pub direction: Direction,
}

impl NumericBand {
    #[must_use]
    pub fn classify(&self, value: f64) -> RiskLevel {
        let exceeds = |threshold: f64| match self.direction {
            Direction::Above => value > threshold,
            Direction::Below => value < threshold,
        };
        if exceeds(self.high) {
            RiskLevel::High
        } else if exceeds(self.medium) {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

pub const AGE_BAND: NumericBand = NumericBand { high: 65.0, medium: 45.0, direction: Direction::Above };
pub const SYSTOLIC_BAND: NumericBand = NumericBand { high: 140.0, medium: 130.0, direction: Direction::Above };
pub const DIASTOLIC_BAND: NumericBand = NumericBand { high: 90.0, medium: 80.0, direction: Direction::Above };
pub const TOTAL_CHOLESTEROL_BAND: NumericBand = NumericBand { high: 240.0, medium: 200.0, direction: Direction::Above };
pub const HDL_BAND: NumericBand = NumericBand { high: 40.0, medium: 50.0, direction: Direction::Below };
pub const LDL_BAND: NumericBand = NumericBand { high: 160.0, medium: 130.0, direction: Direction::Above };
pub const BMI_BAND: NumericBand = NumericBand { high: 30.0, medium: 25.0, direction: Direction::Above };

fn flag(present: bool, when_present: RiskLevel) -> RiskLevel {
    if present {
        when_present
    } else {
        RiskLevel::Low
    }
}

fn text(s: &str) -> FactorValue {
    FactorValue::Text(s.to_string())
}

/// Observe one factor on a patient: its value and risk tier.
fn observe(name: FactorName, patient: &PatientData) -> (FactorValue, RiskLevel) {
    match name {
        FactorName::Age => (
            FactorValue::Number(f64::from(patient.age)),
            AGE_BAND.classify(f64::from(patient.age)),
        ),
        FactorName::BloodPressure => {
            // Either reading alone can raise the tier.
            let risk = SYSTOLIC_BAND
                .classify(f64::from(patient.blood_pressure_systolic))
                .max(DIASTOLIC_BAND.classify(f64::from(patient.blood_pressure_diastolic)));
            (FactorValue::Text(patient.blood_pressure()), risk)
        }
        FactorName::TotalCholesterol => (
            FactorValue::Number(patient.cholesterol_total),
            TOTAL_CHOLESTEROL_BAND.classify(patient.cholesterol_total),
        ),
        FactorName::HdlCholesterol => (
            FactorValue::Number(patient.cholesterol_hdl),
            HDL_BAND.classify(patient.cholesterol_hdl),
        ),
        FactorName::LdlCholesterol => (
            FactorValue::Number(patient.cholesterol_ldl),
            LDL_BAND.classify(patient.cholesterol_ldl),
        ),
        FactorName::Bmi => (FactorValue::Number(patient.bmi), BMI_BAND.classify(patient.bmi)),
        FactorName::SmokingStatus => (
            text(if patient.smoking_status { "Current smoker" } else { "Non-smoker" }),
            flag(patient.smoking_status, RiskLevel::High),
        ),
        FactorName::Diabetes => (
            text(if patient.diabetes_status { "Present" } else { "Absent" }),
            flag(patient.diabetes_status, RiskLevel::High),
        ),
        FactorName::FamilyHistory => (
            text(if patient.family_history { "Positive" } else { "Negative" }),
            flag(patient.family_history, RiskLevel::Medium),
        ),
        FactorName::PhysicalActivity => (
            text(patient.physical_activity.as_str()),
            flag(patient.physical_activity == ActivityLevel::Low, RiskLevel::Medium),
        ),
    }
}

/// Evaluate all ten risk factors, in `FACTOR_TABLE` order.
#[must_use]
pub fn evaluate_risk_factors(patient: &PatientData) -> Vec<RiskFactor> {
    FACTOR_TABLE
        .iter()
        .map(|entry| {
            let (value, risk) = observe(entry.name, patient);
            RiskFactor {
                name: entry.name,
                value,
                risk,
                weight: entry.weight,
                description: entry.description.to_string(),
                normal_range: entry.normal_range.map(str::to_string),
            }
        })
        .collect()
}

/// First factor with the given name.
#[must_use]
pub fn find_factor(factors: &[RiskFactor], name: FactorName) -> Option<&RiskFactor> {
    factors.iter().find(|factor| factor.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::patient::sample_patient;

    fn risk_of(patient: &PatientData, name: FactorName) -> RiskLevel {
        let factors = evaluate_risk_factors(patient);
        find_factor(&factors, name).expect("Factor should exist").risk
    }

    #[test]
    fn test_fixed_order_and_count() {
        let factors = evaluate_risk_factors(&sample_patient());
        let names: Vec<&str> = factors.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Age",
                "Blood Pressure",
                "Total Cholesterol",
                "HDL Cholesterol",
                "LDL Cholesterol",
                "BMI",
                "Smoking Status",
                "Diabetes",
                "Family History",
                "Physical Activity",
            ]
        );
    }

    #[test]
    fn test_weights_and_metadata() {
        let total: f64 = FACTOR_TABLE.iter().map(|entry| entry.weight).sum();
        assert!((total - 1.5).abs() < 1e-9);
        assert!(FACTOR_TABLE
            .iter()
            .all(|entry| (0.0..=1.0).contains(&entry.weight) && !entry.description.is_empty()));
    }

    #[test]
    fn test_age_boundaries() {
        let at = |age| risk_of(&PatientData { age, ..sample_patient() }, FactorName::Age);
        assert_eq!(at(45), RiskLevel::Low);
        assert_eq!(at(46), RiskLevel::Medium);
        assert_eq!(at(65), RiskLevel::Medium);
        assert_eq!(at(66), RiskLevel::High);
    }

    #[test]
    fn test_blood_pressure_boundaries() {
        let at = |sys, dia| {
            risk_of(
                &PatientData {
                    blood_pressure_systolic: sys,
                    blood_pressure_diastolic: dia,
                    ..sample_patient()
                },
                FactorName::BloodPressure,
            )
        };
        assert_eq!(at(140, 85), RiskLevel::Medium);
        assert_eq!(at(140, 91), RiskLevel::High);
        assert_eq!(at(141, 70), RiskLevel::High);
        assert_eq!(at(130, 80), RiskLevel::Low);
        assert_eq!(at(120, 81), RiskLevel::Medium);
        assert_eq!(at(110, 95), RiskLevel::High);
    }

    #[test]
    fn test_hdl_direction_is_inverted() {
        let at = |hdl| {
            risk_of(
                &PatientData { cholesterol_hdl: hdl, ..sample_patient() },
                FactorName::HdlCholesterol,
            )
        };
        assert_eq!(at(39.0), RiskLevel::High);
        assert_eq!(at(40.0), RiskLevel::Medium);
        assert_eq!(at(49.9), RiskLevel::Medium);
        assert_eq!(at(50.0), RiskLevel::Low);
        assert_eq!(at(70.0), RiskLevel::Low);
    }

    #[test]
    fn test_flag_factors_never_exceed_their_cap() {
        let patient = PatientData {
            family_history: true,
            physical_activity: ActivityLevel::Low,
            smoking_status: true,
            ..sample_patient()
        };
        let factors = evaluate_risk_factors(&patient);
        let get = |name| find_factor(&factors, name).expect("Factor should exist");

        assert_eq!(get(FactorName::FamilyHistory).risk, RiskLevel::Medium);
        assert_eq!(get(FactorName::PhysicalActivity).risk, RiskLevel::Medium);
        assert_eq!(get(FactorName::SmokingStatus).risk, RiskLevel::High);
        assert_eq!(
            get(FactorName::SmokingStatus).value,
            FactorValue::Text("Current smoker".to_string())
        );
        assert_eq!(
            get(FactorName::PhysicalActivity).value,
            FactorValue::Text("low".to_string())
        );
    }

    #[test]
    fn test_values_carry_observations() {
        let factors = evaluate_risk_factors(&sample_patient());
        assert_eq!(factors[0].value, FactorValue::Number(52.0));
        assert_eq!(factors[1].value, FactorValue::Text("130/85".to_string()));
        assert_eq!(factors[1].normal_range.as_deref(), Some("<120/80 mmHg"));
        assert_eq!(factors[7].value, FactorValue::Text("Absent".to_string()));
    }

    #[test]
    fn test_whole_numbers_serialize_as_integers() {
        let factors = evaluate_risk_factors(&PatientData { bmi: 27.5, ..sample_patient() });
        let json = serde_json::to_value(&factors).expect("Should serialize");
        assert_eq!(json[0]["value"], serde_json::json!(52));
        assert!(json[0]["value"].is_i64());
        assert_eq!(json[2]["value"], serde_json::json!(220));
        assert_eq!(json[5]["value"], serde_json::json!(27.5));

        let back: Vec<RiskFactor> = serde_json::from_value(json).expect("Should parse");
        assert_eq!(back[0].value, FactorValue::Number(52.0));
    }

    #[test]
    fn test_numeric_band_is_strict() {
        assert_eq!(BMI_BAND.classify(25.0), RiskLevel::Low);
        assert_eq!(BMI_BAND.classify(25.1), RiskLevel::Medium);
        assert_eq!(BMI_BAND.classify(30.0), RiskLevel::Medium);
        assert_eq!(LDL_BAND.classify(160.5), RiskLevel::High);
        assert_eq!(TOTAL_CHOLESTEROL_BAND.classify(200.0), RiskLevel::Low);
    }
}
