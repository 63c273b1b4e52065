use serde::{Deserialize, Serialize};
use std::fmt;

use super::wells_dvt::PretestProbability;

/// Inputs for the Wells pulmonary embolism criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellsPeParams {
    pub clinical_signs_of_dvt: bool,
    pub pe_most_likely_diagnosis: bool,
    /// Measured heart rate; rates above 100 bpm meet the tachycardia criterion.
    pub heart_rate: f64,
    pub immobilization_or_recent_surgery: bool,
    pub previous_dvt_or_pe: bool,
    pub hemoptysis: bool,
    pub malignancy: bool,
}

/// Dichotomized Wells PE assessment used by d-dimer pathways.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeLikelihood {
    PeUnlikely,
    PeLikely,
}

impl PeLikelihood {
    pub fn label(self) -> &'static str {
        match self {
            PeLikelihood::PeUnlikely => "PE unlikely",
            PeLikelihood::PeLikely => "PE likely",
        }
    }
}

impl fmt::Display for PeLikelihood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Points awarded per criterion, zero when the criterion is not met.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WellsPeCriteriaPoints {
    pub clinical_signs_of_dvt: f64,
    pub pe_most_likely_diagnosis: f64,
    pub heart_rate: f64,
    pub immobilization_or_recent_surgery: f64,
    pub previous_dvt_or_pe: f64,
    pub hemoptysis: f64,
    pub malignancy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WellsPeBreakdown {
    pub heart_rate_criterion_met: bool,
    pub criteria_points: WellsPeCriteriaPoints,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WellsPeResult {
    pub total_score: f64,
    pub interpretation: &'static str,
    pub pretest_probability: PretestProbability,
    pub two_tier_likelihood: PeLikelihood,
    pub estimated_prevalence: &'static str,
    pub breakdown: WellsPeBreakdown,
}

fn points_if(criterion: bool, points: f64) -> f64 {
    if criterion {
        points
    } else {
        0.0
    }
}

fn classify(total: f64) -> (PretestProbability, &'static str, &'static str) {
    if total > 6.0 {
        (
            PretestProbability::High,
            "High pretest probability for pulmonary embolism",
            "~37.5%",
        )
    } else if total >= 2.0 {
        (
            PretestProbability::Moderate,
            "Moderate pretest probability for pulmonary embolism",
            "~16.2%",
        )
    } else {
        (
            PretestProbability::Low,
            "Low pretest probability for pulmonary embolism",
            "~1.3%",
        )
    }
}

/// Compute the Wells PE score. Half-point weights make the total fractional,
/// so it is reported to one decimal place.
pub fn calculate_wells_pe(params: &WellsPeParams) -> WellsPeResult {
    let heart_rate_criterion_met = params.heart_rate > 100.0;
    let criteria_points = WellsPeCriteriaPoints {
        clinical_signs_of_dvt: points_if(params.clinical_signs_of_dvt, 3.0),
        pe_most_likely_diagnosis: points_if(params.pe_most_likely_diagnosis, 3.0),
        heart_rate: points_if(heart_rate_criterion_met, 1.5),
        immobilization_or_recent_surgery: points_if(params.immobilization_or_recent_surgery, 1.5),
        previous_dvt_or_pe: points_if(params.previous_dvt_or_pe, 1.5),
        hemoptysis: points_if(params.hemoptysis, 1.0),
        malignancy: points_if(params.malignancy, 1.0),
    };
    let sum = criteria_points.clinical_signs_of_dvt
        + criteria_points.pe_most_likely_diagnosis
        + criteria_points.heart_rate
        + criteria_points.immobilization_or_recent_surgery
        + criteria_points.previous_dvt_or_pe
        + criteria_points.hemoptysis
        + criteria_points.malignancy;
    let total_score = (sum * 10.0).round() / 10.0;

    let (pretest_probability, interpretation, estimated_prevalence) = classify(total_score);
    let two_tier_likelihood = if total_score > 4.0 {
        PeLikelihood::PeLikely
    } else {
        PeLikelihood::PeUnlikely
    };

    WellsPeResult {
        total_score,
        interpretation,
        pretest_probability,
        two_tier_likelihood,
        estimated_prevalence,
        breakdown: WellsPeBreakdown {
            heart_rate_criterion_met,
            criteria_points,
        },
    }
}
