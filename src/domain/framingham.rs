//! Simplified Framingham point score for 10-year ASCVD risk.
//!
//! Points are read from fixed tables (first matching bracket wins, scanning
//! from the highest bracket down) and converted linearly to a percentage.

use super::patient::{Gender, PatientData};

/// Age bracket with an inclusive lower bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeBracket {
    pub min_age: u32,
    pub points: i32,
}

/// Measurement band with an inclusive lower bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointBand {
    pub at_least: f64,
    pub points: i32,
}

/// Measurement band with an exclusive upper bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeficitBand {
    pub below: f64,
    pub points: i32,
}

pub const MALE_AGE_POINTS: [AgeBracket; 7] = [
    AgeBracket { min_age: 70, points: 11 },
    AgeBracket { min_age: 65, points: 10 },
    AgeBracket { min_age: 60, points: 8 },
    AgeBracket { min_age: 55, points: 6 },
    AgeBracket { min_age: 50, points: 4 },
    AgeBracket { min_age: 45, points: 2 },
    AgeBracket { min_age: 40, points: 1 },
];

/// Used for `Gender::Female` and `Gender::Other`.
pub const FEMALE_AGE_POINTS: [AgeBracket; 7] = [
    AgeBracket { min_age: 70, points: 12 },
    AgeBracket { min_age: 65, points: 9 },
    AgeBracket { min_age: 60, points: 7 },
    AgeBracket { min_age: 55, points: 4 },
    AgeBracket { min_age: 50, points: 3 },
    AgeBracket { min_age: 45, points: 2 },
    AgeBracket { min_age: 40, points: 1 },
];

pub const TOTAL_CHOLESTEROL_POINTS: [PointBand; 3] = [
    PointBand { at_least: 280.0, points: 3 },
    PointBand { at_least: 240.0, points: 2 },
    PointBand { at_least: 200.0, points: 1 },
];

/// High HDL is protective and subtracts points. Checked before the deficit bands.
pub const HDL_PROTECTIVE: PointBand = PointBand { at_least: 60.0, points: -2 };

pub const HDL_DEFICIT_POINTS: [DeficitBand; 2] = [
    DeficitBand { below: 35.0, points: 2 },
    DeficitBand { below: 45.0, points: 1 },
];

pub const SYSTOLIC_POINTS: [PointBand; 3] = [
    PointBand { at_least: 160.0, points: 3 },
    PointBand { at_least: 140.0, points: 2 },
    PointBand { at_least: 130.0, points: 1 },
];

pub const SMOKING_POINTS: i32 = 4;
pub const DIABETES_POINTS: i32 = 3;

/// Percent of 10-year risk per point.
pub const PERCENT_PER_POINT: f64 = 2.5;
pub const MIN_RISK_PERCENT: f64 = 1.0;
pub const MAX_RISK_PERCENT: f64 = 50.0;

fn age_table(gender: Gender) -> &'static [AgeBracket] {
    match gender {
        Gender::Male => &MALE_AGE_POINTS,
        Gender::Female | Gender::Other => &FEMALE_AGE_POINTS,
    }
}

fn band_points(bands: &[PointBand], value: f64) -> i32 {
    bands
        .iter()
        .find(|band| value >= band.at_least)
        .map_or(0, |band| band.points)
}

/// Age points for the given gender.
#[must_use]
pub fn age_points(gender: Gender, age: u32) -> i32 {
    age_table(gender)
        .iter()
        .find(|bracket| age >= bracket.min_age)
        .map_or(0, |bracket| bracket.points)
}

#[must_use]
pub fn total_cholesterol_points(total: f64) -> i32 {
    band_points(&TOTAL_CHOLESTEROL_POINTS, total)
}

#[must_use]
pub fn hdl_points(hdl: f64) -> i32 {
    if hdl >= HDL_PROTECTIVE.at_least {
        return HDL_PROTECTIVE.points;
    }
    HDL_DEFICIT_POINTS
        .iter()
        .find(|band| hdl < band.below)
        .map_or(0, |band| band.points)
}

#[must_use]
pub fn systolic_points(systolic: u32) -> i32 {
    band_points(&SYSTOLIC_POINTS, f64::from(systolic))
}

/// Total Framingham points for a patient. May be negative.
#[must_use]
pub fn framingham_points(patient: &PatientData) -> i32 {
    let mut points = age_points(patient.gender, patient.age);
    points += total_cholesterol_points(patient.cholesterol_total);
    points += hdl_points(patient.cholesterol_hdl);
    points += systolic_points(patient.blood_pressure_systolic);
    if patient.smoking_status {
        points += SMOKING_POINTS;
    }
    if patient.diabetes_status {
        points += DIABETES_POINTS;
    }
    points
}

/// Estimate 10-year ASCVD risk in percent, clamped to [1, 50].
#[must_use]
pub fn estimate_ten_year_risk(patient: &PatientData) -> f64 {
    (f64::from(framingham_points(patient)) * PERCENT_PER_POINT)
        .clamp(MIN_RISK_PERCENT, MAX_RISK_PERCENT)
}
