use serde::{Deserialize, Serialize};
use std::fmt;

/// Inputs for the CHA2DS2-VASc atrial fibrillation stroke risk score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cha2ds2VascParams {
    pub congestive_heart_failure_or_left_ventricular_dysfunction: bool,
    pub hypertension: bool,
    pub age: u32,
    pub diabetes_mellitus: bool,
    pub prior_stroke_tia_or_thromboembolism: bool,
    /// Prior myocardial infarction, peripheral artery disease, or aortic plaque.
    pub vascular_disease: bool,
    pub sex: Sex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrokeRiskCategory {
    Low,
    Intermediate,
    High,
}

impl StrokeRiskCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            StrokeRiskCategory::Low => "low",
            StrokeRiskCategory::Intermediate => "intermediate",
            StrokeRiskCategory::High => "high",
        }
    }
}

impl fmt::Display for StrokeRiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Points per criterion. `non_sex_score` is the total excluding the sex
/// point, which is what the risk categorization examines for women.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cha2ds2VascBreakdown {
    pub congestive_heart_failure_or_left_ventricular_dysfunction: u32,
    pub hypertension: u32,
    pub age: u32,
    pub diabetes_mellitus: u32,
    pub prior_stroke_tia_or_thromboembolism: u32,
    pub vascular_disease: u32,
    pub sex_category: u32,
    pub non_sex_score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cha2ds2VascResult {
    pub total_score: u32,
    pub interpretation: &'static str,
    pub recommendation: &'static str,
    pub risk_category: StrokeRiskCategory,
    pub breakdown: Cha2ds2VascBreakdown,
}

fn age_points(age: u32) -> u32 {
    if age >= 75 {
        2
    } else if age >= 65 {
        1
    } else {
        0
    }
}

// The sex point alone does not raise risk, so a woman with no other risk
// factors is still low risk. Category thresholds differ by sex for the
// same reason.
fn classify(total: u32, non_sex_score: u32, sex: Sex) -> StrokeRiskCategory {
    let low = match sex {
        Sex::Female => non_sex_score == 0,
        Sex::Male => total == 0,
    };
    if low {
        return StrokeRiskCategory::Low;
    }
    let intermediate = match sex {
        Sex::Male => total == 1,
        Sex::Female => total == 2,
    };
    if intermediate {
        StrokeRiskCategory::Intermediate
    } else {
        StrokeRiskCategory::High
    }
}

fn interpretation(category: StrokeRiskCategory) -> (&'static str, &'static str) {
    match category {
        StrokeRiskCategory::Low => (
            "Low annual thromboembolic risk by CHA2DS2-VASc",
            "No anticoagulation is recommended based on CHA2DS2-VASc alone.",
        ),
        StrokeRiskCategory::Intermediate => (
            "Intermediate annual thromboembolic risk by CHA2DS2-VASc",
            "Consider anticoagulation after shared decision-making and bleeding-risk assessment.",
        ),
        StrokeRiskCategory::High => (
            "High annual thromboembolic risk by CHA2DS2-VASc",
            "Anticoagulation is generally recommended unless contraindicated.",
        ),
    }
}

/// Compute the CHA2DS2-VASc score and its sex-aware risk category.
pub fn calculate_cha2ds2_vasc(params: &Cha2ds2VascParams) -> Cha2ds2VascResult {
    let breakdown = Cha2ds2VascBreakdown {
        congestive_heart_failure_or_left_ventricular_dysfunction: u32::from(
            params.congestive_heart_failure_or_left_ventricular_dysfunction,
        ),
        hypertension: u32::from(params.hypertension),
        age: age_points(params.age),
        diabetes_mellitus: u32::from(params.diabetes_mellitus),
        prior_stroke_tia_or_thromboembolism: 2
            * u32::from(params.prior_stroke_tia_or_thromboembolism),
        vascular_disease: u32::from(params.vascular_disease),
        sex_category: match params.sex {
            Sex::Female => 1,
            Sex::Male => 0,
        },
        non_sex_score: 0,
    };
    let non_sex_score = breakdown.congestive_heart_failure_or_left_ventricular_dysfunction
        + breakdown.hypertension
        + breakdown.age
        + breakdown.diabetes_mellitus
        + breakdown.prior_stroke_tia_or_thromboembolism
        + breakdown.vascular_disease;
    let total_score = non_sex_score + breakdown.sex_category;

    let risk_category = classify(total_score, non_sex_score, params.sex);
    let (interpretation, recommendation) = interpretation(risk_category);

    Cha2ds2VascResult {
        total_score,
        interpretation,
        recommendation,
        risk_category,
        breakdown: Cha2ds2VascBreakdown {
            non_sex_score,
            ..breakdown
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline(age: u32, sex: Sex) -> Cha2ds2VascParams {
        Cha2ds2VascParams {
            congestive_heart_failure_or_left_ventricular_dysfunction: false,
            hypertension: false,
            age,
            diabetes_mellitus: false,
            prior_stroke_tia_or_thromboembolism: false,
            vascular_disease: false,
            sex,
        }
    }

    #[test]
    fn test_healthy_young_male_is_low_risk() {
        let result = calculate_cha2ds2_vasc(&baseline(42, Sex::Male));
        assert_eq!(result.total_score, 0);
        assert_eq!(result.risk_category, StrokeRiskCategory::Low);
        assert_eq!(
            result.recommendation,
            "No anticoagulation is recommended based on CHA2DS2-VASc alone."
        );
    }

    #[test]
    fn test_female_sex_alone_stays_low_risk() {
        let result = calculate_cha2ds2_vasc(&baseline(36, Sex::Female));
        assert_eq!(result.total_score, 1);
        assert_eq!(result.breakdown.non_sex_score, 0);
        assert_eq!(result.breakdown.sex_category, 1);
        assert_eq!(result.risk_category, StrokeRiskCategory::Low);
    }

    #[test]
    fn test_male_with_one_risk_factor_is_intermediate() {
        let mut params = baseline(50, Sex::Male);
        params.hypertension = true;
        let result = calculate_cha2ds2_vasc(&params);
        assert_eq!(result.total_score, 1);
        assert_eq!(result.risk_category, StrokeRiskCategory::Intermediate);
        assert_eq!(
            result.recommendation,
            "Consider anticoagulation after shared decision-making and bleeding-risk assessment."
        );
    }

    #[test]
    fn test_female_with_one_risk_factor_is_intermediate() {
        let mut params = baseline(50, Sex::Female);
        params.diabetes_mellitus = true;
        let result = calculate_cha2ds2_vasc(&params);
        assert_eq!(result.total_score, 2);
        assert_eq!(result.breakdown.non_sex_score, 1);
        assert_eq!(result.risk_category, StrokeRiskCategory::Intermediate);
    }

    #[test]
    fn test_elderly_female_with_all_risk_factors() {
        let result = calculate_cha2ds2_vasc(&Cha2ds2VascParams {
            congestive_heart_failure_or_left_ventricular_dysfunction: true,
            hypertension: true,
            age: 78,
            diabetes_mellitus: true,
            prior_stroke_tia_or_thromboembolism: true,
            vascular_disease: true,
            sex: Sex::Female,
        });
        assert_eq!(result.breakdown.age, 2);
        assert_eq!(result.breakdown.prior_stroke_tia_or_thromboembolism, 2);
        assert_eq!(result.breakdown.non_sex_score, 8);
        assert_eq!(result.total_score, 9);
        assert_eq!(result.risk_category, StrokeRiskCategory::High);
        assert_eq!(
            result.interpretation,
            "High annual thromboembolic risk by CHA2DS2-VASc"
        );
        assert_eq!(
            result.recommendation,
            "Anticoagulation is generally recommended unless contraindicated."
        );
    }

    #[test]
    fn test_age_bands() {
        assert_eq!(age_points(64), 0);
        assert_eq!(age_points(65), 1);
        assert_eq!(age_points(74), 1);
        assert_eq!(age_points(75), 2);
    }

    #[test]
    fn test_prior_stroke_scores_two_points() {
        let mut params = baseline(40, Sex::Male);
        params.prior_stroke_tia_or_thromboembolism = true;
        let result = calculate_cha2ds2_vasc(&params);
        assert_eq!(result.total_score, 2);
        // A male at 2 skips intermediate entirely.
        assert_eq!(result.risk_category, StrokeRiskCategory::High);
    }

    #[test]
    fn test_male_at_two_and_female_at_three_are_high() {
        let mut male = baseline(67, Sex::Male);
        male.hypertension = true;
        let result = calculate_cha2ds2_vasc(&male);
        assert_eq!(result.total_score, 2);
        assert_eq!(result.risk_category, StrokeRiskCategory::High);

        let mut female = baseline(67, Sex::Female);
        female.hypertension = true;
        let result = calculate_cha2ds2_vasc(&female);
        assert_eq!(result.total_score, 3);
        assert_eq!(result.risk_category, StrokeRiskCategory::High);
    }
}
