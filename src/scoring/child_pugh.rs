use serde::{Deserialize, Serialize};
use std::fmt;

/// Inputs for the Child-Pugh cirrhosis severity score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildPughParams {
    pub bilirubin: f64,
    pub albumin: f64,
    pub inr: f64,
    pub ascites: Ascites,
    /// West Haven encephalopathy grade, 0 through 4.
    pub encephalopathy: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ascites {
    None,
    Mild,
    ModerateToSevere,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChildPughClass {
    A,
    B,
    C,
}

impl fmt::Display for ChildPughClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChildPughClass::A => f.write_str("A"),
            ChildPughClass::B => f.write_str("B"),
            ChildPughClass::C => f.write_str("C"),
        }
    }
}

/// Points contributed by each component.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChildPughBreakdown {
    pub bilirubin_points: u32,
    pub albumin_points: u32,
    pub inr_points: u32,
    pub ascites_points: u32,
    pub encephalopathy_points: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChildPughResult {
    pub total_score: u32,
    pub class: ChildPughClass,
    pub interpretation: &'static str,
    pub one_year_survival: &'static str,
    pub two_year_survival: &'static str,
    pub breakdown: ChildPughBreakdown,
}

struct Classification {
    class: ChildPughClass,
    interpretation: &'static str,
    one_year_survival: &'static str,
    two_year_survival: &'static str,
}

fn bilirubin_points(value: f64) -> u32 {
    if value < 2.0 {
        1
    } else if value <= 3.0 {
        2
    } else {
        3
    }
}

fn albumin_points(value: f64) -> u32 {
    if value > 3.5 {
        1
    } else if value >= 2.8 {
        2
    } else {
        3
    }
}

fn inr_points(value: f64) -> u32 {
    if value < 1.7 {
        1
    } else if value <= 2.3 {
        2
    } else {
        3
    }
}

fn ascites_points(value: Ascites) -> u32 {
    match value {
        Ascites::None => 1,
        Ascites::Mild => 2,
        Ascites::ModerateToSevere => 3,
    }
}

fn encephalopathy_points(grade: u8) -> u32 {
    match grade {
        0 => 1,
        1 | 2 => 2,
        _ => 3,
    }
}

fn classify(total: u32) -> Classification {
    if total <= 6 {
        Classification {
            class: ChildPughClass::A,
            interpretation: "Well-compensated disease",
            one_year_survival: "100%",
            two_year_survival: "85%",
        }
    } else if total <= 9 {
        Classification {
            class: ChildPughClass::B,
            interpretation: "Significant functional compromise",
            one_year_survival: "80%",
            two_year_survival: "60%",
        }
    } else {
        Classification {
            class: ChildPughClass::C,
            interpretation: "Decompensated disease",
            one_year_survival: "45%",
            two_year_survival: "35%",
        }
    }
}

/// Compute the Child-Pugh score. Totals 5 through 15 map to classes A, B
/// and C with their published survival figures.
pub fn calculate_child_pugh(params: &ChildPughParams) -> ChildPughResult {
    let breakdown = ChildPughBreakdown {
        bilirubin_points: bilirubin_points(params.bilirubin),
        albumin_points: albumin_points(params.albumin),
        inr_points: inr_points(params.inr),
        ascites_points: ascites_points(params.ascites),
        encephalopathy_points: encephalopathy_points(params.encephalopathy),
    };
    let total_score = breakdown.bilirubin_points
        + breakdown.albumin_points
        + breakdown.inr_points
        + breakdown.ascites_points
        + breakdown.encephalopathy_points;
    let classification = classify(total_score);
    ChildPughResult {
        total_score,
        class: classification.class,
        interpretation: classification.interpretation,
        one_year_survival: classification.one_year_survival,
        two_year_survival: classification.two_year_survival,
        breakdown,
    }
}
