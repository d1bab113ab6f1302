//! Quick screening label for roster badges and sorting.
//!
//! A coarse additive tally, independent of the weighted model in
//! `assessment`. It is never fed into `assess`.

use super::assessment::RiskLevel;
use super::patient::PatientData;

pub const QUICK_HIGH_TALLY: u32 = 12;
pub const QUICK_MEDIUM_TALLY: u32 = 8;

fn tier(value: f64, high_above: f64, medium_above: f64) -> u32 {
    if value > high_above {
        3
    } else if value > medium_above {
        2
    } else {
        1
    }
}

/// Raw screening tally.
#[must_use]
pub fn quick_risk_tally(patient: &PatientData) -> u32 {
    let mut tally = tier(f64::from(patient.age), 65.0, 45.0);
    tally += tier(f64::from(patient.blood_pressure_systolic), 140.0, 120.0);
    tally += tier(patient.cholesterol_total, 240.0, 200.0);
    if patient.smoking_status {
        tally += 2;
    }
    if patient.diabetes_status {
        tally += 2;
    }
    if patient.family_history {
        tally += 1;
    }
    tally
}

/// Badge label for the patient roster.
#[must_use]
pub fn quick_risk_label(patient: &PatientData) -> RiskLevel {
    match quick_risk_tally(patient) {
        t if t >= QUICK_HIGH_TALLY => RiskLevel::High,
        t if t >= QUICK_MEDIUM_TALLY => RiskLevel::Medium,
        _ => RiskLevel::Low,
    }
}
