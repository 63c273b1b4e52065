use serde::{Deserialize, Serialize};

/// Inputs for the MELD end-stage liver disease score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeldParams {
    pub bilirubin: f64,
    pub inr: f64,
    pub creatinine: f64,
}

/// The clamped values fed into the logarithmic formula, plus the raw total
/// before rounding and bounding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeldBreakdown {
    pub bilirubin_used: f64,
    pub inr_used: f64,
    pub creatinine_used: f64,
    pub raw_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeldResult {
    pub total_score: u32,
    pub interpretation: &'static str,
    pub three_month_mortality: &'static str,
    pub breakdown: MeldBreakdown,
}

const BILIRUBIN_COEFFICIENT: f64 = 3.78;
const INR_COEFFICIENT: f64 = 11.2;
const CREATININE_COEFFICIENT: f64 = 9.57;
const INTERCEPT: f64 = 6.43;

/// Laboratory values below 1.0 are raised to 1.0 and values above 4.0 are
/// capped at 4.0 before taking logarithms, per the UNOS convention.
fn clamp_input(value: f64) -> f64 {
    value.clamp(1.0, 4.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn classify(total: u32) -> (&'static str, &'static str) {
    if total <= 9 {
        ("Lower short-term mortality risk", "1.9%")
    } else if total <= 19 {
        ("Moderate short-term mortality risk", "6.0%")
    } else if total <= 29 {
        ("High short-term mortality risk", "19.6%")
    } else if total <= 39 {
        ("Very high short-term mortality risk", "52.6%")
    } else {
        ("Critical short-term mortality risk", "71.3%")
    }
}

/// Compute the MELD score. The rounded total is bounded to [6, 40].
pub fn calculate_meld(params: &MeldParams) -> MeldResult {
    let bilirubin_used = clamp_input(params.bilirubin);
    let inr_used = clamp_input(params.inr);
    let creatinine_used = clamp_input(params.creatinine);

    let raw_score = BILIRUBIN_COEFFICIENT * bilirubin_used.ln()
        + INR_COEFFICIENT * inr_used.ln()
        + CREATININE_COEFFICIENT * creatinine_used.ln()
        + INTERCEPT;
    let total_score = raw_score.round().clamp(6.0, 40.0) as u32;

    let (interpretation, three_month_mortality) = classify(total_score);
    MeldResult {
        total_score,
        interpretation,
        three_month_mortality,
        breakdown: MeldBreakdown {
            bilirubin_used,
            inr_used,
            creatinine_used,
            raw_score: round2(raw_score),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sub_unit_inputs_clamp_to_floor_score() {
        let result = calculate_meld(&MeldParams {
            bilirubin: 0.4,
            inr: 0.9,
            creatinine: 0.7,
        });
        assert_eq!(result.breakdown.bilirubin_used, 1.0);
        assert_eq!(result.breakdown.inr_used, 1.0);
        assert_eq!(result.breakdown.creatinine_used, 1.0);
        // ln(1) terms vanish, leaving the intercept.
        assert_eq!(result.breakdown.raw_score, 6.43);
        assert_eq!(result.total_score, 6);
        assert_eq!(result.interpretation, "Lower short-term mortality risk");
        assert_eq!(result.three_month_mortality, "1.9%");
    }

    #[test]
    fn test_high_inputs_cap_at_four_before_logs() {
        let result = calculate_meld(&MeldParams {
            bilirubin: 12.0,
            inr: 6.0,
            creatinine: 9.0,
        });
        assert_eq!(result.breakdown.bilirubin_used, 4.0);
        assert_eq!(result.breakdown.inr_used, 4.0);
        assert_eq!(result.breakdown.creatinine_used, 4.0);
        assert_eq!(result.total_score, 40);
        assert_eq!(result.interpretation, "Critical short-term mortality risk");
        assert_eq!(result.three_month_mortality, "71.3%");
    }

    #[test]
    fn test_severe_disease_case() {
        let result = calculate_meld(&MeldParams {
            bilirubin: 4.0,
            inr: 3.0,
            creatinine: 3.0,
        });
        assert_eq!(result.total_score, 34);
        assert_eq!(result.interpretation, "Very high short-term mortality risk");
        assert_eq!(result.three_month_mortality, "52.6%");
    }

    #[test]
    fn test_mortality_tier_boundaries() {
        assert_eq!(classify(9).1, "1.9%");
        assert_eq!(classify(10).1, "6.0%");
        assert_eq!(classify(19).1, "6.0%");
        assert_eq!(classify(20).1, "19.6%");
        assert_eq!(classify(29).1, "19.6%");
        assert_eq!(classify(30).1, "52.6%");
        assert_eq!(classify(39).1, "52.6%");
        assert_eq!(classify(40).1, "71.3%");
    }

    #[test]
    fn test_raw_score_is_reported_to_two_decimals() {
        let result = calculate_meld(&MeldParams {
            bilirubin: 2.0,
            inr: 1.5,
            creatinine: 1.2,
        });
        let unrounded = 3.78 * 2.0f64.ln() + 11.2 * 1.5f64.ln() + 9.57 * 1.2f64.ln() + 6.43;
        assert_eq!(result.breakdown.raw_score, (unrounded * 100.0).round() / 100.0);
        assert_eq!(result.total_score, unrounded.round() as u32);
    }
}
