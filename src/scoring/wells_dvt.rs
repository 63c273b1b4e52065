use serde::{Deserialize, Serialize};
use std::fmt;

/// Inputs for the Wells deep vein thrombosis criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellsDvtParams {
    pub active_cancer: bool,
    pub paralysis_or_recent_immobilization: bool,
    pub recently_bedridden_or_major_surgery: bool,
    pub localized_tenderness_along_deep_venous_system: bool,
    pub entire_leg_swollen: bool,
    pub calf_swelling_at_least_3cm: bool,
    pub pitting_edema_confined_to_symptomatic_leg: bool,
    pub collateral_superficial_veins: bool,
    pub previous_dvt: bool,
    /// The only criterion that subtracts points (minus two).
    pub alternative_diagnosis_as_likely_or_more_likely: bool,
}

/// Three-tier pretest probability shared by the Wells scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PretestProbability {
    Low,
    Moderate,
    High,
}

impl PretestProbability {
    pub fn as_str(self) -> &'static str {
        match self {
            PretestProbability::Low => "low",
            PretestProbability::Moderate => "moderate",
            PretestProbability::High => "high",
        }
    }
}

impl fmt::Display for PretestProbability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dichotomized Wells DVT assessment used by d-dimer pathways.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DvtLikelihood {
    DvtUnlikely,
    DvtLikely,
}

impl DvtLikelihood {
    pub fn label(self) -> &'static str {
        match self {
            DvtLikelihood::DvtUnlikely => "DVT unlikely",
            DvtLikelihood::DvtLikely => "DVT likely",
        }
    }
}

impl fmt::Display for DvtLikelihood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WellsDvtBreakdown {
    pub positive_criteria_count: u32,
    pub alternative_diagnosis_penalty: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WellsDvtResult {
    pub total_score: i32,
    pub interpretation: &'static str,
    pub pretest_probability: PretestProbability,
    pub two_tier_likelihood: DvtLikelihood,
    pub breakdown: WellsDvtBreakdown,
}

fn classify(total: i32) -> (PretestProbability, &'static str) {
    if total >= 3 {
        (
            PretestProbability::High,
            "High pretest probability for lower-extremity DVT",
        )
    } else if total >= 1 {
        (
            PretestProbability::Moderate,
            "Moderate pretest probability for lower-extremity DVT",
        )
    } else {
        (
            PretestProbability::Low,
            "Low pretest probability for lower-extremity DVT",
        )
    }
}

/// Compute the Wells DVT score: one point per positive criterion, with a
/// two-point penalty when an alternative diagnosis is at least as likely.
pub fn calculate_wells_dvt(params: &WellsDvtParams) -> WellsDvtResult {
    let positive_criteria_count = u32::from(params.active_cancer)
        + u32::from(params.paralysis_or_recent_immobilization)
        + u32::from(params.recently_bedridden_or_major_surgery)
        + u32::from(params.localized_tenderness_along_deep_venous_system)
        + u32::from(params.entire_leg_swollen)
        + u32::from(params.calf_swelling_at_least_3cm)
        + u32::from(params.pitting_edema_confined_to_symptomatic_leg)
        + u32::from(params.collateral_superficial_veins)
        + u32::from(params.previous_dvt);
    let alternative_diagnosis_penalty = if params.alternative_diagnosis_as_likely_or_more_likely {
        -2
    } else {
        0
    };
    let total_score = positive_criteria_count as i32 + alternative_diagnosis_penalty;

    let (pretest_probability, interpretation) = classify(total_score);
    let two_tier_likelihood = if total_score >= 2 {
        DvtLikelihood::DvtLikely
    } else {
        DvtLikelihood::DvtUnlikely
    };

    WellsDvtResult {
        total_score,
        interpretation,
        pretest_probability,
        two_tier_likelihood,
        breakdown: WellsDvtBreakdown {
            positive_criteria_count,
            alternative_diagnosis_penalty,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn negative_params() -> WellsDvtParams {
        WellsDvtParams {
            active_cancer: false,
            paralysis_or_recent_immobilization: false,
            recently_bedridden_or_major_surgery: false,
            localized_tenderness_along_deep_venous_system: false,
            entire_leg_swollen: false,
            calf_swelling_at_least_3cm: false,
            pitting_edema_confined_to_symptomatic_leg: false,
            collateral_superficial_veins: false,
            previous_dvt: false,
            alternative_diagnosis_as_likely_or_more_likely: false,
        }
    }

    #[test]
    fn test_no_findings_scores_zero_and_low() {
        let result = calculate_wells_dvt(&negative_params());
        assert_eq!(result.total_score, 0);
        assert_eq!(result.pretest_probability, PretestProbability::Low);
        assert_eq!(result.two_tier_likelihood, DvtLikelihood::DvtUnlikely);
        assert_eq!(result.breakdown.positive_criteria_count, 0);
        assert_eq!(result.breakdown.alternative_diagnosis_penalty, 0);
    }

    #[test]
    fn test_many_findings_score_high_probability() {
        let result = calculate_wells_dvt(&WellsDvtParams {
            active_cancer: true,
            paralysis_or_recent_immobilization: true,
            recently_bedridden_or_major_surgery: true,
            localized_tenderness_along_deep_venous_system: true,
            entire_leg_swollen: true,
            calf_swelling_at_least_3cm: true,
            pitting_edema_confined_to_symptomatic_leg: true,
            collateral_superficial_veins: false,
            previous_dvt: false,
            alternative_diagnosis_as_likely_or_more_likely: false,
        });
        assert_eq!(result.total_score, 7);
        assert_eq!(result.pretest_probability, PretestProbability::High);
        assert_eq!(
            result.interpretation,
            "High pretest probability for lower-extremity DVT"
        );
        assert_eq!(result.two_tier_likelihood, DvtLikelihood::DvtLikely);
        assert_eq!(result.breakdown.positive_criteria_count, 7);
    }

    #[test]
    fn test_alternative_diagnosis_can_push_total_negative() {
        let mut params = negative_params();
        params.alternative_diagnosis_as_likely_or_more_likely = true;
        let result = calculate_wells_dvt(&params);
        assert_eq!(result.total_score, -2);
        assert_eq!(result.pretest_probability, PretestProbability::Low);
        assert_eq!(result.breakdown.alternative_diagnosis_penalty, -2);
    }

    #[test]
    fn test_one_finding_with_alternative_diagnosis_goes_negative() {
        let mut params = negative_params();
        params.previous_dvt = true;
        params.alternative_diagnosis_as_likely_or_more_likely = true;
        let result = calculate_wells_dvt(&params);
        assert_eq!(result.total_score, -1);
        assert_eq!(result.pretest_probability, PretestProbability::Low);
        assert_eq!(result.two_tier_likelihood, DvtLikelihood::DvtUnlikely);
        assert_eq!(result.breakdown.positive_criteria_count, 1);
        assert_eq!(result.breakdown.alternative_diagnosis_penalty, -2);
    }

    #[test]
    fn test_penalty_offsets_positive_criteria() {
        let mut params = negative_params();
        params.active_cancer = true;
        params.entire_leg_swollen = true;
        params.previous_dvt = true;
        params.alternative_diagnosis_as_likely_or_more_likely = true;
        let result = calculate_wells_dvt(&params);
        assert_eq!(result.total_score, 1);
        assert_eq!(result.pretest_probability, PretestProbability::Moderate);
        assert_eq!(result.two_tier_likelihood, DvtLikelihood::DvtUnlikely);
    }

    #[test]
    fn test_three_tier_boundaries() {
        assert_eq!(classify(0).0, PretestProbability::Low);
        assert_eq!(classify(1).0, PretestProbability::Moderate);
        assert_eq!(classify(2).0, PretestProbability::Moderate);
        assert_eq!(classify(3).0, PretestProbability::High);
    }

    #[test]
    fn test_two_tier_threshold_sits_at_two() {
        let mut params = negative_params();
        params.active_cancer = true;
        params.previous_dvt = true;
        let result = calculate_wells_dvt(&params);
        assert_eq!(result.total_score, 2);
        assert_eq!(result.two_tier_likelihood, DvtLikelihood::DvtLikely);
        // Moderate three-tier and likely two-tier can coexist.
        assert_eq!(result.pretest_probability, PretestProbability::Moderate);
    }
}
