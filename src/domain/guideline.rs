//! AHA/ACC-style risk category for a 10-year ASCVD percentage.

use serde::{Deserialize, Serialize};

/// 10-year risk (percent) at or above which a patient is high risk.
pub const HIGH_RISK_PERCENT: f64 = 20.0;

/// 10-year risk (percent) at or above which a patient is intermediate risk.
pub const INTERMEDIATE_RISK_PERCENT: f64 = 7.5;

/// Badge variant used by the dashboard when rendering the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeColor {
    Destructive,
    Default,
    Secondary,
}

impl BadgeColor {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Destructive => "destructive",
            Self::Default => "default",
            Self::Secondary => "secondary",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GuidelineCategory {
    pub category: &'static str,
    pub description: &'static str,
    pub color: BadgeColor,
}

const HIGH: GuidelineCategory = GuidelineCategory {
    category: "High Risk",
    description: "≥20% 10-year ASCVD risk",
    color: BadgeColor::Destructive,
};

const INTERMEDIATE: GuidelineCategory = GuidelineCategory {
    category: "Intermediate Risk",
    description: "7.5-19.9% 10-year ASCVD risk",
    color: BadgeColor::Default,
};

const LOW: GuidelineCategory = GuidelineCategory {
    category: "Low Risk",
    description: "<7.5% 10-year ASCVD risk",
    color: BadgeColor::Secondary,
};

/// Categorize a 10-year risk percentage.
#[must_use]
pub fn categorize(ten_year_risk: f64) -> GuidelineCategory {
    if ten_year_risk >= HIGH_RISK_PERCENT {
        HIGH
    } else if ten_year_risk >= INTERMEDIATE_RISK_PERCENT {
        INTERMEDIATE
    } else {
        LOW
    }
}
