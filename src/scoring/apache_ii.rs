use serde::{Deserialize, Serialize};
use std::fmt;

/// Inputs for APACHE II. Physiology values are the worst observed in the
/// first 24 hours of ICU admission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApacheIiParams {
    pub temperature_c: f64,
    pub mean_arterial_pressure: f64,
    pub heart_rate: f64,
    pub respiratory_rate: f64,
    /// Inspired oxygen fraction, 0.21 to 1.0. Selects the oxygenation branch.
    pub fio2: f64,
    #[serde(default)]
    pub pao2: Option<f64>,
    #[serde(default)]
    pub aa_gradient: Option<f64>,
    #[serde(default)]
    pub arterial_ph: Option<f64>,
    #[serde(default)]
    pub serum_bicarbonate: Option<f64>,
    pub sodium: f64,
    pub potassium: f64,
    pub creatinine: f64,
    pub acute_renal_failure: bool,
    pub hematocrit: f64,
    pub white_blood_cell_count: f64,
    pub glasgow_coma_scale: u8,
    pub age: u32,
    pub chronic_health_state: ChronicHealthState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChronicHealthState {
    None,
    ElectivePostop,
    EmergencyPostop,
    Nonoperative,
}

/// Which oxygenation measure scored the respiratory component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OxygenationMethod {
    Pao2,
    AaGradient,
}

impl OxygenationMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            OxygenationMethod::Pao2 => "pao2",
            OxygenationMethod::AaGradient => "aa_gradient",
        }
    }
}

impl fmt::Display for OxygenationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which measure scored the acid-base component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcidBaseMethod {
    ArterialPh,
    SerumBicarbonate,
}

impl AcidBaseMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            AcidBaseMethod::ArterialPh => "arterial_ph",
            AcidBaseMethod::SerumBicarbonate => "serum_bicarbonate",
        }
    }
}

impl fmt::Display for AcidBaseMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Points from each of the twelve acute physiology components.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentPoints {
    pub temperature: u32,
    pub mean_arterial_pressure: u32,
    pub heart_rate: u32,
    pub respiratory_rate: u32,
    pub oxygenation: u32,
    pub acid_base: u32,
    pub sodium: u32,
    pub potassium: u32,
    pub creatinine: u32,
    pub hematocrit: u32,
    pub white_blood_cell_count: u32,
    pub glasgow_coma_scale: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApacheIiBreakdown {
    pub acute_physiology_score: u32,
    pub age_points: u32,
    pub chronic_health_points: u32,
    pub component_points: ComponentPoints,
    pub oxygenation_method: OxygenationMethod,
    pub acid_base_method: AcidBaseMethod,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApacheIiResult {
    pub total_score: u32,
    pub interpretation: &'static str,
    pub estimated_hospital_mortality: &'static str,
    pub breakdown: ApacheIiBreakdown,
}

fn temperature_points(value: f64) -> u32 {
    if value >= 41.0 {
        4
    } else if value >= 39.0 {
        3
    } else if value >= 38.5 {
        1
    } else if value >= 36.0 {
        0
    } else if value >= 34.0 {
        1
    } else if value >= 32.0 {
        2
    } else if value >= 30.0 {
        3
    } else {
        4
    }
}

fn mean_arterial_pressure_points(value: f64) -> u32 {
    if value >= 160.0 {
        4
    } else if value >= 130.0 {
        3
    } else if value >= 110.0 {
        2
    } else if value >= 70.0 {
        0
    } else if value >= 50.0 {
        2
    } else {
        4
    }
}

fn heart_rate_points(value: f64) -> u32 {
    if value >= 180.0 {
        4
    } else if value >= 140.0 {
        3
    } else if value >= 110.0 {
        2
    } else if value >= 70.0 {
        0
    } else if value >= 55.0 {
        2
    } else if value >= 40.0 {
        3
    } else {
        4
    }
}

fn respiratory_rate_points(value: f64) -> u32 {
    if value >= 50.0 {
        4
    } else if value >= 35.0 {
        3
    } else if value >= 25.0 {
        1
    } else if value >= 12.0 {
        0
    } else if value >= 10.0 {
        1
    } else if value >= 6.0 {
        2
    } else {
        4
    }
}

// FiO2 at or above 0.5 scores the A-a gradient, otherwise PaO2. A missing
// value for the selected branch scores as its most favorable band; the
// validator rejects such payloads before they reach this point.
fn oxygenation_points(params: &ApacheIiParams) -> (u32, OxygenationMethod) {
    if params.fio2 >= 0.5 {
        let gradient = params.aa_gradient.unwrap_or(0.0);
        let points = if gradient >= 500.0 {
            4
        } else if gradient >= 350.0 {
            3
        } else if gradient >= 200.0 {
            2
        } else {
            0
        };
        (points, OxygenationMethod::AaGradient)
    } else {
        let pao2 = params.pao2.unwrap_or(0.0);
        let points = if pao2 >= 70.0 {
            0
        } else if pao2 >= 61.0 {
            1
        } else if pao2 >= 55.0 {
            3
        } else {
            4
        };
        (points, OxygenationMethod::Pao2)
    }
}

fn arterial_ph_points(value: f64) -> u32 {
    if value >= 7.7 {
        4
    } else if value >= 7.6 {
        3
    } else if value >= 7.5 {
        1
    } else if value >= 7.33 {
        0
    } else if value >= 7.25 {
        2
    } else if value >= 7.15 {
        3
    } else {
        4
    }
}

fn bicarbonate_points(value: f64) -> u32 {
    if value >= 52.0 {
        4
    } else if value >= 41.0 {
        3
    } else if value >= 32.0 {
        1
    } else if value >= 22.0 {
        0
    } else if value >= 18.0 {
        2
    } else if value >= 15.0 {
        3
    } else {
        4
    }
}

// Arterial pH is preferred whenever supplied; bicarbonate is the fallback
// for patients without an arterial blood gas.
fn acid_base_points(params: &ApacheIiParams) -> (u32, AcidBaseMethod) {
    match params.arterial_ph {
        Some(ph) => (arterial_ph_points(ph), AcidBaseMethod::ArterialPh),
        None => (
            bicarbonate_points(params.serum_bicarbonate.unwrap_or(0.0)),
            AcidBaseMethod::SerumBicarbonate,
        ),
    }
}

fn sodium_points(value: f64) -> u32 {
    if value >= 180.0 {
        4
    } else if value >= 160.0 {
        3
    } else if value >= 155.0 {
        2
    } else if value >= 150.0 {
        1
    } else if value >= 130.0 {
        0
    } else if value >= 120.0 {
        2
    } else if value >= 111.0 {
        3
    } else {
        4
    }
}

fn potassium_points(value: f64) -> u32 {
    if value >= 7.0 {
        4
    } else if value >= 6.0 {
        3
    } else if value >= 5.5 {
        1
    } else if value >= 3.5 {
        0
    } else if value >= 3.0 {
        1
    } else if value >= 2.5 {
        2
    } else {
        4
    }
}

// Points double with acute renal failure, per the original worksheet.
fn creatinine_points(value: f64, acute_renal_failure: bool) -> u32 {
    let base = if value >= 3.5 {
        4
    } else if value >= 2.0 {
        3
    } else if value >= 1.5 {
        2
    } else if value < 0.6 {
        2
    } else {
        0
    };
    if acute_renal_failure {
        base * 2
    } else {
        base
    }
}

fn hematocrit_points(value: f64) -> u32 {
    if value >= 60.0 {
        4
    } else if value >= 50.0 {
        2
    } else if value >= 46.0 {
        1
    } else if value >= 30.0 {
        0
    } else if value >= 20.0 {
        2
    } else {
        4
    }
}

fn white_blood_cell_points(value: f64) -> u32 {
    if value >= 40.0 {
        4
    } else if value >= 20.0 {
        2
    } else if value >= 15.0 {
        1
    } else if value >= 3.0 {
        0
    } else if value >= 1.0 {
        2
    } else {
        4
    }
}

fn glasgow_coma_scale_points(value: u8) -> u32 {
    15u32.saturating_sub(u32::from(value))
}

fn age_points(age: u32) -> u32 {
    if age >= 75 {
        6
    } else if age >= 65 {
        5
    } else if age >= 55 {
        3
    } else if age >= 45 {
        2
    } else {
        0
    }
}

fn chronic_health_points(state: ChronicHealthState) -> u32 {
    match state {
        ChronicHealthState::None => 0,
        ChronicHealthState::ElectivePostop => 2,
        ChronicHealthState::EmergencyPostop | ChronicHealthState::Nonoperative => 5,
    }
}

fn classify(total: u32) -> (&'static str, &'static str) {
    if total <= 4 {
        ("Low severity of illness", "~4%")
    } else if total <= 9 {
        ("Mild severity of illness", "~8%")
    } else if total <= 14 {
        ("Moderate severity of illness", "~15%")
    } else if total <= 19 {
        ("Substantial severity of illness", "~25%")
    } else if total <= 24 {
        ("High severity of illness", "~40%")
    } else if total <= 29 {
        ("Very high severity of illness", "~55%")
    } else if total <= 34 {
        ("Critical severity of illness", "~75%")
    } else {
        ("Extremely critical severity of illness", "~85%")
    }
}

/// Compute APACHE II: twelve acute physiology components plus age and
/// chronic health points.
pub fn calculate_apache_ii(params: &ApacheIiParams) -> ApacheIiResult {
    let (oxygenation, oxygenation_method) = oxygenation_points(params);
    let (acid_base, acid_base_method) = acid_base_points(params);

    let component_points = ComponentPoints {
        temperature: temperature_points(params.temperature_c),
        mean_arterial_pressure: mean_arterial_pressure_points(params.mean_arterial_pressure),
        heart_rate: heart_rate_points(params.heart_rate),
        respiratory_rate: respiratory_rate_points(params.respiratory_rate),
        oxygenation,
        acid_base,
        sodium: sodium_points(params.sodium),
        potassium: potassium_points(params.potassium),
        creatinine: creatinine_points(params.creatinine, params.acute_renal_failure),
        hematocrit: hematocrit_points(params.hematocrit),
        white_blood_cell_count: white_blood_cell_points(params.white_blood_cell_count),
        glasgow_coma_scale: glasgow_coma_scale_points(params.glasgow_coma_scale),
    };

    let acute_physiology_score = component_points.temperature
        + component_points.mean_arterial_pressure
        + component_points.heart_rate
        + component_points.respiratory_rate
        + component_points.oxygenation
        + component_points.acid_base
        + component_points.sodium
        + component_points.potassium
        + component_points.creatinine
        + component_points.hematocrit
        + component_points.white_blood_cell_count
        + component_points.glasgow_coma_scale;

    let age = age_points(params.age);
    let chronic_health = chronic_health_points(params.chronic_health_state);
    let total_score = acute_physiology_score + age + chronic_health;
    let (interpretation, estimated_hospital_mortality) = classify(total_score);

    ApacheIiResult {
        total_score,
        interpretation,
        estimated_hospital_mortality,
        breakdown: ApacheIiBreakdown {
            acute_physiology_score,
            age_points: age,
            chronic_health_points: chronic_health,
            component_points,
            oxygenation_method,
            acid_base_method,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn healthy_params() -> ApacheIiParams {
        ApacheIiParams {
            temperature_c: 37.0,
            mean_arterial_pressure: 90.0,
            heart_rate: 88.0,
            respiratory_rate: 16.0,
            fio2: 0.21,
            pao2: Some(92.0),
            aa_gradient: None,
            arterial_ph: Some(7.4),
            serum_bicarbonate: None,
            sodium: 140.0,
            potassium: 4.1,
            creatinine: 1.0,
            acute_renal_failure: false,
            hematocrit: 42.0,
            white_blood_cell_count: 8.0,
            glasgow_coma_scale: 15,
            age: 35,
            chronic_health_state: ChronicHealthState::None,
        }
    }

    #[test]
    fn test_normal_physiology_scores_zero() {
        let result = calculate_apache_ii(&healthy_params());
        assert_eq!(result.total_score, 0);
        assert_eq!(result.breakdown.acute_physiology_score, 0);
        assert_eq!(result.breakdown.age_points, 0);
        assert_eq!(result.breakdown.chronic_health_points, 0);
        assert_eq!(result.interpretation, "Low severity of illness");
        assert_eq!(result.estimated_hospital_mortality, "~4%");
        assert_eq!(result.breakdown.oxygenation_method, OxygenationMethod::Pao2);
        assert_eq!(
            result.breakdown.acid_base_method,
            AcidBaseMethod::ArterialPh
        );
    }

    #[test]
    fn test_severe_multiorgan_derangement() {
        let result = calculate_apache_ii(&ApacheIiParams {
            temperature_c: 40.0,
            mean_arterial_pressure: 45.0,
            heart_rate: 150.0,
            respiratory_rate: 40.0,
            fio2: 0.7,
            pao2: None,
            aa_gradient: Some(420.0),
            arterial_ph: None,
            serum_bicarbonate: Some(16.0),
            sodium: 160.0,
            potassium: 6.5,
            creatinine: 4.0,
            acute_renal_failure: true,
            hematocrit: 25.0,
            white_blood_cell_count: 22.0,
            glasgow_coma_scale: 7,
            age: 78,
            chronic_health_state: ChronicHealthState::Nonoperative,
        });
        let components = &result.breakdown.component_points;
        assert_eq!(components.temperature, 3);
        assert_eq!(components.mean_arterial_pressure, 4);
        assert_eq!(components.heart_rate, 3);
        assert_eq!(components.respiratory_rate, 3);
        assert_eq!(components.oxygenation, 3);
        assert_eq!(components.acid_base, 3);
        assert_eq!(components.sodium, 3);
        assert_eq!(components.potassium, 3);
        assert_eq!(components.creatinine, 8);
        assert_eq!(components.hematocrit, 2);
        assert_eq!(components.white_blood_cell_count, 2);
        assert_eq!(components.glasgow_coma_scale, 8);
        assert_eq!(result.breakdown.acute_physiology_score, 45);
        assert_eq!(result.breakdown.age_points, 6);
        assert_eq!(result.breakdown.chronic_health_points, 5);
        assert_eq!(result.total_score, 56);
        assert_eq!(result.interpretation, "Extremely critical severity of illness");
        assert_eq!(result.estimated_hospital_mortality, "~85%");
        assert_eq!(
            result.breakdown.oxygenation_method,
            OxygenationMethod::AaGradient
        );
        assert_eq!(
            result.breakdown.acid_base_method,
            AcidBaseMethod::SerumBicarbonate
        );
    }

    #[test]
    fn test_high_fio2_selects_aa_gradient_branch() {
        let mut params = healthy_params();
        params.fio2 = 0.5;
        params.aa_gradient = Some(180.0);
        let result = calculate_apache_ii(&params);
        assert_eq!(
            result.breakdown.oxygenation_method,
            OxygenationMethod::AaGradient
        );
        assert_eq!(result.breakdown.component_points.oxygenation, 0);
    }

    #[test]
    fn test_arterial_ph_preferred_over_bicarbonate() {
        let mut params = healthy_params();
        params.arterial_ph = Some(7.2);
        params.serum_bicarbonate = Some(24.0);
        let result = calculate_apache_ii(&params);
        assert_eq!(
            result.breakdown.acid_base_method,
            AcidBaseMethod::ArterialPh
        );
        assert_eq!(result.breakdown.component_points.acid_base, 3);
    }

    #[test]
    fn test_acute_renal_failure_doubles_creatinine_points() {
        assert_eq!(creatinine_points(2.5, false), 3);
        assert_eq!(creatinine_points(2.5, true), 6);
        // Low creatinine also scores, and also doubles.
        assert_eq!(creatinine_points(0.5, false), 2);
        assert_eq!(creatinine_points(0.5, true), 4);
        assert_eq!(creatinine_points(1.0, true), 0);
    }

    #[test]
    fn test_glasgow_coma_scale_inverts_to_points() {
        assert_eq!(glasgow_coma_scale_points(15), 0);
        assert_eq!(glasgow_coma_scale_points(7), 8);
        assert_eq!(glasgow_coma_scale_points(3), 12);
    }

    #[test]
    fn test_age_bands() {
        assert_eq!(age_points(44), 0);
        assert_eq!(age_points(45), 2);
        assert_eq!(age_points(55), 3);
        assert_eq!(age_points(65), 5);
        assert_eq!(age_points(75), 6);
    }

    #[test]
    fn test_chronic_health_bands() {
        assert_eq!(chronic_health_points(ChronicHealthState::None), 0);
        assert_eq!(chronic_health_points(ChronicHealthState::ElectivePostop), 2);
        assert_eq!(chronic_health_points(ChronicHealthState::EmergencyPostop), 5);
        assert_eq!(chronic_health_points(ChronicHealthState::Nonoperative), 5);
    }

    #[test]
    fn test_mortality_tier_boundaries() {
        assert_eq!(classify(4).1, "~4%");
        assert_eq!(classify(5).1, "~8%");
        assert_eq!(classify(14).1, "~15%");
        assert_eq!(classify(19).1, "~25%");
        assert_eq!(classify(24).1, "~40%");
        assert_eq!(classify(29).1, "~55%");
        assert_eq!(classify(34).1, "~75%");
        assert_eq!(classify(35).1, "~85%");
    }
}
