//! Clinical recommendation generation.
//!
//! Rules fire independently and append in a fixed order. The follow-up
//! item is always appended last, then the list is stable-sorted by
//! priority so equal-priority items keep their generation order.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use super::assessment::RiskLevel;
use super::factors::{find_factor, FactorName, RiskFactor};
use super::patient::{ActivityLevel, PatientData};

/// BMI above which weight management is recommended.
pub const WEIGHT_MANAGEMENT_BMI: f64 = 25.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationCategory {
    Medication,
    Lifestyle,
    Monitoring,
    Referral,
}

impl RecommendationCategory {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Medication => "medication",
            Self::Lifestyle => "lifestyle",
            Self::Monitoring => "monitoring",
            Self::Referral => "referral",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Sort rank; larger sorts first.
    #[must_use]
    pub fn rank(&self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: RecommendationCategory,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    pub timeframe: String,
}

/// Fixed-text recommendation.
struct Template {
    category: RecommendationCategory,
    priority: Priority,
    title: &'static str,
    description: &'static str,
    timeframe: &'static str,
}

impl Template {
    fn build(&self) -> Recommendation {
        Recommendation {
            category: self.category,
            priority: self.priority,
            title: self.title.to_string(),
            description: self.description.to_string(),
            timeframe: self.timeframe.to_string(),
        }
    }
}

const ANTIHYPERTENSIVE_THERAPY: Template = Template {
    category: RecommendationCategory::Medication,
    priority: Priority::High,
    title: "Antihypertensive Therapy",
    description: "Initiate ACE inhibitor or ARB therapy. Target BP <130/80 mmHg.",
    timeframe: "Immediate",
};

const BLOOD_PRESSURE_MANAGEMENT: Template = Template {
    category: RecommendationCategory::Lifestyle,
    priority: Priority::Medium,
    title: "Blood Pressure Management",
    description: "Implement DASH diet, reduce sodium intake, increase physical activity.",
    timeframe: "2-4 weeks",
};

const STATIN_THERAPY: Template = Template {
    category: RecommendationCategory::Medication,
    priority: Priority::High,
    title: "Statin Therapy",
    description: "Initiate high-intensity statin therapy. Target LDL <70 mg/dL.",
    timeframe: "Immediate",
};

const SMOKING_CESSATION: Template = Template {
    category: RecommendationCategory::Lifestyle,
    priority: Priority::High,
    title: "Smoking Cessation",
    description: "Immediate smoking cessation with pharmacological support if needed.",
    timeframe: "Immediate",
};

const DIABETES_MANAGEMENT: Template = Template {
    category: RecommendationCategory::Monitoring,
    priority: Priority::High,
    title: "Diabetes Management",
    description: "Optimize glycemic control. Target HbA1c <7% for most patients.",
    timeframe: "Ongoing",
};

const WEIGHT_MANAGEMENT: Template = Template {
    category: RecommendationCategory::Lifestyle,
    priority: Priority::Medium,
    title: "Weight Management",
    description: "Target 5-10% weight reduction through diet and exercise.",
    timeframe: "3-6 months",
};

const EXERCISE_PROGRAM: Template = Template {
    category: RecommendationCategory::Lifestyle,
    priority: Priority::Medium,
    title: "Exercise Program",
    description: "Initiate moderate-intensity aerobic exercise 150 minutes/week.",
    timeframe: "2-4 weeks",
};

const CARDIOLOGY_CONSULTATION: Template = Template {
    category: RecommendationCategory::Referral,
    priority: Priority::High,
    title: "Cardiology Consultation",
    description: "Refer to cardiology for comprehensive evaluation and management.",
    timeframe: "1-2 weeks",
};

/// The unconditional follow-up item; interval tightens for high risk.
fn follow_up(overall: RiskLevel) -> Recommendation {
    let (priority, timeframe) = if overall == RiskLevel::High {
        (Priority::High, "1-3 months")
    } else {
        (Priority::Medium, "3-6 months")
    };

    Recommendation {
        category: RecommendationCategory::Monitoring,
        priority,
        title: "Follow-up Monitoring".to_string(),
        description: format!(
            "Regular monitoring of cardiovascular risk factors. Next visit in {timeframe}."
        ),
        timeframe: timeframe.to_string(),
    }
}

/// Stable sort, highest priority first.
pub fn sort_by_priority(recommendations: &mut [Recommendation]) {
    recommendations.sort_by_key(|r| Reverse(r.priority.rank()));
}

/// Generate prioritized recommendations for an assessed patient.
#[must_use]
pub fn generate_recommendations(
    patient: &PatientData,
    factors: &[RiskFactor],
    overall: RiskLevel,
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();
    let factor_risk = |name| find_factor(factors, name).map(|factor| factor.risk);

    match factor_risk(FactorName::BloodPressure) {
        Some(RiskLevel::High) => recommendations.push(ANTIHYPERTENSIVE_THERAPY.build()),
        Some(RiskLevel::Medium) => recommendations.push(BLOOD_PRESSURE_MANAGEMENT.build()),
        _ => {}
    }

    if factor_risk(FactorName::TotalCholesterol) == Some(RiskLevel::High)
        || overall == RiskLevel::High
    {
        recommendations.push(STATIN_THERAPY.build());
    }

    if patient.smoking_status {
        recommendations.push(SMOKING_CESSATION.build());
    }

    if patient.diabetes_status {
        recommendations.push(DIABETES_MANAGEMENT.build());
    }

    if patient.bmi > WEIGHT_MANAGEMENT_BMI {
        recommendations.push(WEIGHT_MANAGEMENT.build());
    }

    if patient.physical_activity == ActivityLevel::Low {
        recommendations.push(EXERCISE_PROGRAM.build());
    }

    if overall == RiskLevel::High {
        recommendations.push(CARDIOLOGY_CONSULTATION.build());
    }

    recommendations.push(follow_up(overall));

    sort_by_priority(&mut recommendations);
    recommendations
}
