use serde::{Deserialize, Serialize};
use std::fmt;

/// Inputs for the SOFA organ dysfunction score. Vasopressor doses are in
/// micrograms per kilogram per minute; zero means the drug is not running.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SofaParams {
    /// PaO2/FiO2 ratio in mmHg.
    pub pao2fio2: f64,
    pub on_respiratory_support: bool,
    pub platelets: f64,
    pub bilirubin: f64,
    pub mean_arterial_pressure: f64,
    pub dopamine: f64,
    pub dobutamine: f64,
    pub epinephrine: f64,
    pub norepinephrine: f64,
    pub glasgow_coma_scale: u8,
    pub creatinine: f64,
    #[serde(default)]
    pub urine_output: Option<f64>,
}

/// Which renal measure produced the renal subscore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenalMethod {
    Creatinine,
    UrineOutput,
    Both,
}

impl RenalMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            RenalMethod::Creatinine => "creatinine",
            RenalMethod::UrineOutput => "urine_output",
            RenalMethod::Both => "both",
        }
    }
}

impl fmt::Display for RenalMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Subscore of each organ system, 0 to 4 points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SofaBreakdown {
    pub respiratory: u32,
    pub coagulation: u32,
    pub liver: u32,
    pub cardiovascular: u32,
    pub central_nervous_system: u32,
    pub renal: u32,
    pub renal_method: RenalMethod,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SofaResult {
    pub total_score: u32,
    pub interpretation: &'static str,
    pub mortality_risk: &'static str,
    pub breakdown: SofaBreakdown,
}

// Ratios below 200 only reach the 3 and 4 point bands on respiratory
// support; without support they score as ordinary hypoxemia.
fn respiratory_points(pao2fio2: f64, on_respiratory_support: bool) -> u32 {
    if pao2fio2 < 100.0 && on_respiratory_support {
        4
    } else if pao2fio2 < 200.0 && on_respiratory_support {
        3
    } else if pao2fio2 < 300.0 {
        2
    } else if pao2fio2 < 400.0 {
        1
    } else {
        0
    }
}

fn coagulation_points(platelets: f64) -> u32 {
    if platelets < 20.0 {
        4
    } else if platelets < 50.0 {
        3
    } else if platelets < 100.0 {
        2
    } else if platelets < 150.0 {
        1
    } else {
        0
    }
}

fn liver_points(bilirubin: f64) -> u32 {
    if bilirubin >= 12.0 {
        4
    } else if bilirubin >= 6.0 {
        3
    } else if bilirubin >= 2.0 {
        2
    } else if bilirubin >= 1.2 {
        1
    } else {
        0
    }
}

fn cardiovascular_points(params: &SofaParams) -> u32 {
    let dopamine = params.dopamine;
    let epinephrine = params.epinephrine;
    let norepinephrine = params.norepinephrine;
    if dopamine > 15.0 || epinephrine > 0.1 || norepinephrine > 0.1 {
        4
    } else if (dopamine > 5.0 && dopamine <= 15.0)
        || (epinephrine > 0.0 && epinephrine <= 0.1)
        || (norepinephrine > 0.0 && norepinephrine <= 0.1)
    {
        3
    } else if (dopamine > 0.0 && dopamine <= 5.0) || params.dobutamine > 0.0 {
        2
    } else if params.mean_arterial_pressure < 70.0 {
        1
    } else {
        0
    }
}

fn central_nervous_system_points(glasgow_coma_scale: u8) -> u32 {
    if glasgow_coma_scale < 6 {
        4
    } else if glasgow_coma_scale <= 9 {
        3
    } else if glasgow_coma_scale <= 12 {
        2
    } else if glasgow_coma_scale <= 14 {
        1
    } else {
        0
    }
}

fn creatinine_renal_points(creatinine: f64) -> u32 {
    if creatinine >= 5.0 {
        4
    } else if creatinine >= 3.5 {
        3
    } else if creatinine >= 2.0 {
        2
    } else if creatinine >= 1.2 {
        1
    } else {
        0
    }
}

fn urine_output_renal_points(urine_output: Option<f64>) -> u32 {
    match urine_output {
        Some(volume) if volume < 200.0 => 4,
        Some(volume) if volume < 500.0 => 3,
        _ => 0,
    }
}

fn classify(total: u32) -> (&'static str, &'static str) {
    if total <= 1 {
        (
            "No significant organ dysfunction by SOFA",
            "Very low ICU mortality risk",
        )
    } else if total <= 5 {
        ("Mild organ dysfunction", "Low ICU mortality risk")
    } else if total <= 9 {
        ("Moderate organ dysfunction", "Intermediate ICU mortality risk")
    } else if total <= 12 {
        ("Severe organ dysfunction", "High ICU mortality risk")
    } else {
        (
            "Critical multi-organ dysfunction",
            "Very high ICU mortality risk",
        )
    }
}

/// Compute the SOFA score across six organ systems. The renal subscore is
/// the worse of the creatinine and urine output assessments.
pub fn calculate_sofa(params: &SofaParams) -> SofaResult {
    let creatinine_points = creatinine_renal_points(params.creatinine);
    let urine_points = urine_output_renal_points(params.urine_output);
    let renal = creatinine_points.max(urine_points);
    let renal_method = if creatinine_points > urine_points {
        RenalMethod::Creatinine
    } else if urine_points > creatinine_points {
        RenalMethod::UrineOutput
    } else if creatinine_points > 0 && urine_points > 0 {
        RenalMethod::Both
    } else {
        RenalMethod::Creatinine
    };

    let breakdown = SofaBreakdown {
        respiratory: respiratory_points(params.pao2fio2, params.on_respiratory_support),
        coagulation: coagulation_points(params.platelets),
        liver: liver_points(params.bilirubin),
        cardiovascular: cardiovascular_points(params),
        central_nervous_system: central_nervous_system_points(params.glasgow_coma_scale),
        renal,
        renal_method,
    };
    let total_score = breakdown.respiratory
        + breakdown.coagulation
        + breakdown.liver
        + breakdown.cardiovascular
        + breakdown.central_nervous_system
        + breakdown.renal;
    let (interpretation, mortality_risk) = classify(total_score);

    SofaResult {
        total_score,
        interpretation,
        mortality_risk,
        breakdown,
    }
}
