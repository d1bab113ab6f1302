//! Plain-text rendering of assessments for the terminal.
//!
//! The layout follows the dashboard: a header with the overall tier and
//! guideline badge, the factor table, then recommendations in priority order.

use std::fmt::Write;

use crate::application::{CohortSummary, PatientAssessment, TierCounts};
use crate::domain::RiskFactor;

const RULE: &str = "────────────────────────────────────────────────────────────";

fn factor_line(out: &mut String, factor: &RiskFactor) {
    let _ = write!(
        out,
        "  {:<20} {:>10}  {:<6}  w={:.2}",
        factor.name.as_str(),
        factor.value.to_string(),
        factor.risk.as_str(),
        factor.weight
    );
    if let Some(range) = &factor.normal_range {
        let _ = write!(out, "  (normal: {range})");
    }
    out.push('\n');
}

/// Render one assessment as a multi-line text report.
#[must_use]
pub fn render_text(entry: &PatientAssessment) -> String {
    let a = &entry.assessment;
    let mut out = String::new();

    match (&entry.patient_name, &entry.patient_id) {
        (Some(name), Some(id)) => {
            let _ = writeln!(out, "Patient: {name} ({id})");
        }
        (None, Some(id)) => {
            let _ = writeln!(out, "Patient: {id}");
        }
        _ => {}
    }

    let _ = writeln!(out, "Overall risk:   {} ({})", a.overall_risk, a.overall_risk.description());
    let _ = writeln!(out, "Risk score:     {:.1}", a.risk_score);
    let _ = writeln!(
        out,
        "10-year risk:   {:.1}%  [{}: {}]",
        a.ten_year_risk, entry.guideline.category, entry.guideline.description
    );
    let _ = writeln!(out, "Urgency:        {}", a.urgency_level);
    let _ = writeln!(out, "Screening:      {}", entry.screening_label);

    out.push_str(RULE);
    out.push_str("\nRisk factors\n");
    for factor in &a.risk_factors {
        factor_line(&mut out, factor);
    }

    out.push_str(RULE);
    out.push_str("\nRecommendations\n");
    for (i, rec) in a.recommendations.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {}. [{}] {} ({}, {})",
            i + 1,
            rec.priority.as_str(),
            rec.title,
            rec.category.as_str(),
            rec.timeframe
        );
        let _ = writeln!(out, "     {}", rec.description);
    }

    out
}

/// Render a roster as one line per patient.
#[must_use]
pub fn render_roster(entries: &[PatientAssessment]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<14} {:<22} {:<7} {:>7} {:>8}  {:<10} {}",
        "ID", "NAME", "RISK", "SCORE", "10-YR", "URGENCY", "GUIDELINE"
    );
    for entry in entries {
        let a = &entry.assessment;
        let _ = writeln!(
            out,
            "{:<14} {:<22} {:<7} {:>7.1} {:>7.1}%  {:<10} {}",
            entry.patient_id.as_deref().unwrap_or("-"),
            entry.patient_name.as_deref().unwrap_or("-"),
            a.overall_risk.as_str(),
            a.risk_score,
            a.ten_year_risk,
            a.urgency_level.as_str(),
            entry.guideline.category
        );
    }
    out
}

fn tier_line(out: &mut String, label: &str, counts: &TierCounts) {
    let _ = writeln!(
        out,
        "  {label:<14} low={} medium={} high={}",
        counts.low, counts.medium, counts.high
    );
}

/// Render cohort totals.
#[must_use]
pub fn render_summary(summary: &CohortSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Cohort of {} patients", summary.total);
    tier_line(&mut out, "Overall risk", &summary.overall_risk);
    tier_line(&mut out, "Guideline", &summary.guideline);
    tier_line(&mut out, "Screening", &summary.screening);
    let _ = writeln!(
        out,
        "  {:<14} routine={} urgent={} immediate={}",
        "Urgency", summary.urgency.routine, summary.urgency.urgent, summary.urgency.immediate
    );
    let _ = writeln!(
        out,
        "  Mean score {:.1}, mean 10-year risk {:.1}%",
        summary.mean_risk_score, summary.mean_ten_year_risk
    );
    out
}
