//! Built-in scoring system definitions.
//!
//! Parameter names here are load-bearing: they are the JSON keys of the
//! parameter payloads and must match the serde field names of the params
//! structs in `crate::scoring`. The engine test suite pins that contract.

use super::types::{
    CalculationMeta, Category, DataCategory, ParameterDefinition, ParameterKind, ParameterOption,
    ScoreBand, ScoringSystemDefinition, SystemId,
};

pub fn builtin_systems() -> Vec<ScoringSystemDefinition> {
    vec![
        child_pugh(),
        meld(),
        apache_ii(),
        sofa(),
        wells_dvt(),
        wells_pe(),
        cha2ds2_vasc(),
    ]
}

fn numeric(name: &str, unit: Option<&str>, category: DataCategory) -> ParameterDefinition {
    ParameterDefinition {
        name: name.to_string(),
        kind: ParameterKind::Numeric,
        unit: unit.map(str::to_string),
        category,
        options: Vec::new(),
    }
}

fn boolean(name: &str, category: DataCategory) -> ParameterDefinition {
    ParameterDefinition {
        name: name.to_string(),
        kind: ParameterKind::Boolean,
        unit: None,
        category,
        options: Vec::new(),
    }
}

fn categorical(
    name: &str,
    category: DataCategory,
    options: Vec<ParameterOption>,
) -> ParameterDefinition {
    ParameterDefinition {
        name: name.to_string(),
        kind: ParameterKind::Categorical,
        unit: None,
        category,
        options,
    }
}

fn option(value: &str, label: &str, points: u32) -> ParameterOption {
    ParameterOption {
        value: value.to_string(),
        label: label.to_string(),
        points,
    }
}

fn band(min: f64, max: f64, label: &str) -> ScoreBand {
    ScoreBand {
        min,
        max,
        label: label.to_string(),
    }
}

fn child_pugh() -> ScoringSystemDefinition {
    ScoringSystemDefinition {
        id: SystemId::ChildPugh,
        name: "Child-Pugh".to_string(),
        full_name: "Child-Pugh Score for Cirrhosis Mortality".to_string(),
        category: Category::Hepatic,
        description: "Assesses the prognosis of chronic liver disease and cirrhosis using five \
                      clinical and laboratory measures."
            .to_string(),
        parameters: vec![
            numeric("bilirubin", Some("mg/dL"), DataCategory::Biochemical),
            numeric("albumin", Some("g/dL"), DataCategory::Biochemical),
            numeric("inr", None, DataCategory::Biochemical),
            categorical(
                "ascites",
                DataCategory::Clinical,
                vec![
                    option("none", "Absent", 1),
                    option("mild", "Slight, diuretic-responsive", 2),
                    option("moderate_to_severe", "Moderate or refractory", 3),
                ],
            ),
            categorical(
                "encephalopathy",
                DataCategory::Clinical,
                vec![
                    option("0", "None", 1),
                    option("1", "Grade I", 2),
                    option("2", "Grade II", 2),
                    option("3", "Grade III", 3),
                    option("4", "Grade IV", 3),
                ],
            ),
        ],
        calculation: CalculationMeta {
            method: "Sum of five components, each scored 1 to 3 points".to_string(),
            min_score: 5.0,
            max_score: 15.0,
            bands: vec![
                band(5.0, 6.0, "Class A: well-compensated disease"),
                band(7.0, 9.0, "Class B: significant functional compromise"),
                band(10.0, 15.0, "Class C: decompensated disease"),
            ],
        },
        references: vec![
            "Pugh RN, et al. Transection of the oesophagus for bleeding oesophageal varices. \
             Br J Surg. 1973;60(8):646-9."
                .to_string(),
            "Child CG, Turcotte JG. Surgery and portal hypertension. Major Probl Clin Surg. \
             1964;1:1-85."
                .to_string(),
        ],
    }
}

fn meld() -> ScoringSystemDefinition {
    ScoringSystemDefinition {
        id: SystemId::Meld,
        name: "MELD".to_string(),
        full_name: "Model for End-Stage Liver Disease".to_string(),
        category: Category::Hepatic,
        description: "Stratifies severity of end-stage liver disease for transplant planning \
                      from three laboratory values."
            .to_string(),
        parameters: vec![
            numeric("bilirubin", Some("mg/dL"), DataCategory::Biochemical),
            numeric("inr", None, DataCategory::Biochemical),
            numeric("creatinine", Some("mg/dL"), DataCategory::Biochemical),
        ],
        calculation: CalculationMeta {
            method: "3.78*ln(bilirubin) + 11.2*ln(INR) + 9.57*ln(creatinine) + 6.43, each \
                     input clamped to [1, 4], total rounded and bounded to [6, 40]"
                .to_string(),
            min_score: 6.0,
            max_score: 40.0,
            bands: vec![
                band(6.0, 9.0, "3-month mortality about 1.9%"),
                band(10.0, 19.0, "3-month mortality about 6.0%"),
                band(20.0, 29.0, "3-month mortality about 19.6%"),
                band(30.0, 39.0, "3-month mortality about 52.6%"),
                band(40.0, 40.0, "3-month mortality about 71.3%"),
            ],
        },
        references: vec![
            "Kamath PS, et al. A model to predict survival in patients with end-stage liver \
             disease. Hepatology. 2001;33(2):464-70."
                .to_string(),
            "Wiesner R, et al. Model for end-stage liver disease (MELD) and allocation of donor \
             livers. Gastroenterology. 2003;124(1):91-6."
                .to_string(),
        ],
    }
}

fn apache_ii() -> ScoringSystemDefinition {
    ScoringSystemDefinition {
        id: SystemId::ApacheIi,
        name: "APACHE II".to_string(),
        full_name: "Acute Physiology and Chronic Health Evaluation II".to_string(),
        category: Category::CriticalCare,
        description: "Estimates ICU mortality from twelve acute physiology measures taken in \
                      the first 24 hours, plus age and chronic health state."
            .to_string(),
        parameters: vec![
            numeric("temperature_c", Some("\u{b0}C"), DataCategory::Clinical),
            numeric("mean_arterial_pressure", Some("mmHg"), DataCategory::Clinical),
            numeric("heart_rate", Some("bpm"), DataCategory::Clinical),
            numeric("respiratory_rate", Some("breaths/min"), DataCategory::Clinical),
            numeric("fio2", Some("fraction"), DataCategory::Clinical),
            numeric("pao2", Some("mmHg"), DataCategory::Biochemical),
            numeric("aa_gradient", Some("mmHg"), DataCategory::Biochemical),
            numeric("arterial_ph", None, DataCategory::Biochemical),
            numeric("serum_bicarbonate", Some("mEq/L"), DataCategory::Biochemical),
            numeric("sodium", Some("mEq/L"), DataCategory::Biochemical),
            numeric("potassium", Some("mEq/L"), DataCategory::Biochemical),
            numeric("creatinine", Some("mg/dL"), DataCategory::Biochemical),
            boolean("acute_renal_failure", DataCategory::Clinical),
            numeric("hematocrit", Some("%"), DataCategory::Biochemical),
            numeric(
                "white_blood_cell_count",
                Some("x10\u{b3}/\u{b5}L"),
                DataCategory::Biochemical,
            ),
            numeric("glasgow_coma_scale", None, DataCategory::Clinical),
            numeric("age", Some("years"), DataCategory::Clinical),
            categorical(
                "chronic_health_state",
                DataCategory::Clinical,
                vec![
                    option("none", "No severe organ insufficiency", 0),
                    option("elective_postop", "Severe organ insufficiency, elective surgery", 2),
                    option(
                        "emergency_postop",
                        "Severe organ insufficiency, emergency surgery",
                        5,
                    ),
                    option("nonoperative", "Severe organ insufficiency, nonoperative", 5),
                ],
            ),
        ],
        calculation: CalculationMeta {
            method: "Acute physiology score (12 components, worst values of the first 24 \
                     hours) plus age points plus chronic health points"
                .to_string(),
            min_score: 0.0,
            max_score: 71.0,
            bands: vec![
                band(0.0, 4.0, "Hospital mortality about 4%"),
                band(5.0, 9.0, "Hospital mortality about 8%"),
                band(10.0, 14.0, "Hospital mortality about 15%"),
                band(15.0, 19.0, "Hospital mortality about 25%"),
                band(20.0, 24.0, "Hospital mortality about 40%"),
                band(25.0, 29.0, "Hospital mortality about 55%"),
                band(30.0, 34.0, "Hospital mortality about 75%"),
                band(35.0, 71.0, "Hospital mortality about 85%"),
            ],
        },
        references: vec![
            "Knaus WA, et al. APACHE II: a severity of disease classification system. Crit Care \
             Med. 1985;13(10):818-29."
                .to_string(),
        ],
    }
}

fn sofa() -> ScoringSystemDefinition {
    ScoringSystemDefinition {
        id: SystemId::Sofa,
        name: "SOFA".to_string(),
        full_name: "Sequential Organ Failure Assessment".to_string(),
        category: Category::CriticalCare,
        description: "Tracks dysfunction across six organ systems in critically ill patients; \
                      higher totals indicate more severe multi-organ failure."
            .to_string(),
        parameters: vec![
            numeric("pao2fio2", Some("mmHg"), DataCategory::Biochemical),
            boolean("on_respiratory_support", DataCategory::Clinical),
            numeric("platelets", Some("x10\u{b3}/\u{b5}L"), DataCategory::Biochemical),
            numeric("bilirubin", Some("mg/dL"), DataCategory::Biochemical),
            numeric("mean_arterial_pressure", Some("mmHg"), DataCategory::Clinical),
            numeric("dopamine", Some("\u{b5}g/kg/min"), DataCategory::Clinical),
            numeric("dobutamine", Some("\u{b5}g/kg/min"), DataCategory::Clinical),
            numeric("epinephrine", Some("\u{b5}g/kg/min"), DataCategory::Clinical),
            numeric("norepinephrine", Some("\u{b5}g/kg/min"), DataCategory::Clinical),
            numeric("glasgow_coma_scale", None, DataCategory::Clinical),
            numeric("creatinine", Some("mg/dL"), DataCategory::Biochemical),
            numeric("urine_output", Some("mL/day"), DataCategory::Clinical),
        ],
        calculation: CalculationMeta {
            method: "Sum of six organ subscores, each 0 to 4 points; renal uses the worse of \
                     creatinine and urine output"
                .to_string(),
            min_score: 0.0,
            max_score: 24.0,
            bands: vec![
                band(0.0, 1.0, "No significant organ dysfunction"),
                band(2.0, 5.0, "Mild organ dysfunction"),
                band(6.0, 9.0, "Moderate organ dysfunction"),
                band(10.0, 12.0, "Severe organ dysfunction"),
                band(13.0, 24.0, "Critical multi-organ dysfunction"),
            ],
        },
        references: vec![
            "Vincent JL, et al. The SOFA (Sepsis-related Organ Failure Assessment) score to \
             describe organ dysfunction/failure. Intensive Care Med. 1996;22(7):707-10."
                .to_string(),
        ],
    }
}

fn wells_dvt() -> ScoringSystemDefinition {
    ScoringSystemDefinition {
        id: SystemId::WellsDvt,
        name: "Wells DVT".to_string(),
        full_name: "Wells Criteria for Deep Vein Thrombosis".to_string(),
        category: Category::Vascular,
        description: "Estimates pretest probability of lower-extremity deep vein thrombosis \
                      from clinical findings."
            .to_string(),
        parameters: vec![
            boolean("active_cancer", DataCategory::Clinical),
            boolean("paralysis_or_recent_immobilization", DataCategory::Clinical),
            boolean("recently_bedridden_or_major_surgery", DataCategory::Clinical),
            boolean(
                "localized_tenderness_along_deep_venous_system",
                DataCategory::Clinical,
            ),
            boolean("entire_leg_swollen", DataCategory::Clinical),
            boolean("calf_swelling_at_least_3cm", DataCategory::Clinical),
            boolean(
                "pitting_edema_confined_to_symptomatic_leg",
                DataCategory::Clinical,
            ),
            boolean("collateral_superficial_veins", DataCategory::Clinical),
            boolean("previous_dvt", DataCategory::Clinical),
            boolean(
                "alternative_diagnosis_as_likely_or_more_likely",
                DataCategory::Clinical,
            ),
        ],
        calculation: CalculationMeta {
            method: "One point per positive criterion, minus two when an alternative diagnosis \
                     is at least as likely"
                .to_string(),
            min_score: -2.0,
            max_score: 9.0,
            bands: vec![
                band(-2.0, 0.0, "Low pretest probability"),
                band(1.0, 2.0, "Moderate pretest probability"),
                band(3.0, 9.0, "High pretest probability"),
            ],
        },
        references: vec![
            "Wells PS, et al. Evaluation of D-dimer in the diagnosis of suspected deep-vein \
             thrombosis. N Engl J Med. 2003;349(13):1227-35."
                .to_string(),
        ],
    }
}

fn wells_pe() -> ScoringSystemDefinition {
    ScoringSystemDefinition {
        id: SystemId::WellsPe,
        name: "Wells PE".to_string(),
        full_name: "Wells Criteria for Pulmonary Embolism".to_string(),
        category: Category::Vascular,
        description: "Estimates pretest probability of pulmonary embolism from clinical \
                      findings and history."
            .to_string(),
        parameters: vec![
            boolean("clinical_signs_of_dvt", DataCategory::Clinical),
            boolean("pe_most_likely_diagnosis", DataCategory::Clinical),
            numeric("heart_rate", Some("bpm"), DataCategory::Clinical),
            boolean("immobilization_or_recent_surgery", DataCategory::Clinical),
            boolean("previous_dvt_or_pe", DataCategory::Clinical),
            boolean("hemoptysis", DataCategory::Clinical),
            boolean("malignancy", DataCategory::Clinical),
        ],
        calculation: CalculationMeta {
            method: "Weighted sum of seven criteria; heart rate above 100 bpm scores 1.5 \
                     points"
                .to_string(),
            min_score: 0.0,
            max_score: 12.5,
            bands: vec![
                band(0.0, 1.5, "Low pretest probability, prevalence about 1.3%"),
                band(2.0, 6.0, "Moderate pretest probability, prevalence about 16.2%"),
                band(6.5, 12.5, "High pretest probability, prevalence about 37.5%"),
            ],
        },
        references: vec![
            "Wells PS, et al. Derivation of a simple clinical model to categorize patients \
             probability of pulmonary embolism. Thromb Haemost. 2000;83(3):416-20."
                .to_string(),
        ],
    }
}

fn cha2ds2_vasc() -> ScoringSystemDefinition {
    ScoringSystemDefinition {
        id: SystemId::Cha2ds2Vasc,
        name: "CHA2DS2-VASc".to_string(),
        full_name: "CHA2DS2-VASc Score for Atrial Fibrillation Stroke Risk".to_string(),
        category: Category::Cardiac,
        description: "Estimates annual thromboembolic stroke risk in nonvalvular atrial \
                      fibrillation to guide anticoagulation."
            .to_string(),
        parameters: vec![
            boolean(
                "congestive_heart_failure_or_left_ventricular_dysfunction",
                DataCategory::Clinical,
            ),
            boolean("hypertension", DataCategory::Clinical),
            numeric("age", Some("years"), DataCategory::Clinical),
            boolean("diabetes_mellitus", DataCategory::Clinical),
            boolean("prior_stroke_tia_or_thromboembolism", DataCategory::Clinical),
            boolean("vascular_disease", DataCategory::Clinical),
            categorical(
                "sex",
                DataCategory::Clinical,
                vec![option("male", "Male", 0), option("female", "Female", 1)],
            ),
        ],
        calculation: CalculationMeta {
            method: "Weighted sum; age 75 or older and prior stroke/TIA score 2 points each, \
                     the remaining criteria 1 point"
                .to_string(),
            min_score: 0.0,
            max_score: 9.0,
            bands: vec![
                band(0.0, 0.0, "Low annual thromboembolic risk"),
                band(1.0, 2.0, "Intermediate annual thromboembolic risk"),
                band(3.0, 9.0, "High annual thromboembolic risk"),
            ],
        },
        references: vec![
            "Lip GY, et al. Refining clinical risk stratification for predicting stroke and \
             thromboembolism in atrial fibrillation using a novel risk factor-based approach. \
             Chest. 2010;137(2):263-72."
                .to_string(),
        ],
    }
}
