use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::catalog::SystemId;

use super::apache_ii::ApacheIiParams;
use super::cha2ds2_vasc::Cha2ds2VascParams;
use super::child_pugh::ChildPughParams;
use super::meld::MeldParams;
use super::sofa::SofaParams;
use super::wells_dvt::WellsDvtParams;
use super::wells_pe::WellsPeParams;

/// Validate a parameter payload before it reaches the calculator.
/// Returns all validation errors at once (not just the first).
///
/// Shape problems (missing fields, wrong types, unknown enum values) surface
/// as a single deserialization error; range and cross-field rules are only
/// checked once the payload parses.
pub fn validate_parameters(system: SystemId, parameters: &Value) -> Result<(), Vec<String>> {
    let errors = match system {
        SystemId::ChildPugh => match parse::<ChildPughParams>(parameters) {
            Ok(params) => check_child_pugh(&params),
            Err(error) => vec![error],
        },
        SystemId::Meld => match parse::<MeldParams>(parameters) {
            Ok(params) => check_meld(&params),
            Err(error) => vec![error],
        },
        SystemId::ApacheIi => match parse::<ApacheIiParams>(parameters) {
            Ok(params) => check_apache_ii(&params),
            Err(error) => vec![error],
        },
        SystemId::Sofa => match parse::<SofaParams>(parameters) {
            Ok(params) => check_sofa(&params),
            Err(error) => vec![error],
        },
        SystemId::WellsDvt => match parse::<WellsDvtParams>(parameters) {
            Ok(_) => Vec::new(),
            Err(error) => vec![error],
        },
        SystemId::WellsPe => match parse::<WellsPeParams>(parameters) {
            Ok(params) => check_wells_pe(&params),
            Err(error) => vec![error],
        },
        SystemId::Cha2ds2Vasc => match parse::<Cha2ds2VascParams>(parameters) {
            Ok(params) => check_cha2ds2_vasc(&params),
            Err(error) => vec![error],
        },
    };
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn parse<T: DeserializeOwned>(parameters: &Value) -> Result<T, String> {
    serde_json::from_value(parameters.clone()).map_err(|error| format!("parameters: {error}"))
}

fn check_range(errors: &mut Vec<String>, name: &str, value: f64, min: f64, max: f64) {
    if !value.is_finite() {
        errors.push(format!("{name}: must be a finite number"));
    } else if !(min..=max).contains(&value) {
        errors.push(format!("{name}: {value} is outside the range {min} to {max}"));
    }
}

fn check_optional_range(
    errors: &mut Vec<String>,
    name: &str,
    value: Option<f64>,
    min: f64,
    max: f64,
) {
    if let Some(value) = value {
        check_range(errors, name, value, min, max);
    }
}

fn check_child_pugh(params: &ChildPughParams) -> Vec<String> {
    let mut errors = Vec::new();
    check_range(&mut errors, "bilirubin", params.bilirubin, 0.0, 50.0);
    check_range(&mut errors, "albumin", params.albumin, 0.0, 10.0);
    check_range(&mut errors, "inr", params.inr, 0.5, 10.0);
    if params.encephalopathy > 4 {
        errors.push(format!(
            "encephalopathy: grade {} is outside the range 0 to 4",
            params.encephalopathy
        ));
    }
    errors
}

fn check_meld(params: &MeldParams) -> Vec<String> {
    let mut errors = Vec::new();
    check_range(&mut errors, "bilirubin", params.bilirubin, 0.1, 50.0);
    check_range(&mut errors, "inr", params.inr, 0.5, 10.0);
    check_range(&mut errors, "creatinine", params.creatinine, 0.1, 15.0);
    errors
}

fn check_apache_ii(params: &ApacheIiParams) -> Vec<String> {
    let mut errors = Vec::new();
    check_range(&mut errors, "temperature_c", params.temperature_c, 25.0, 46.0);
    check_range(
        &mut errors,
        "mean_arterial_pressure",
        params.mean_arterial_pressure,
        0.0,
        300.0,
    );
    check_range(&mut errors, "heart_rate", params.heart_rate, 0.0, 300.0);
    check_range(
        &mut errors,
        "respiratory_rate",
        params.respiratory_rate,
        0.0,
        80.0,
    );
    check_range(&mut errors, "fio2", params.fio2, 0.21, 1.0);
    check_optional_range(&mut errors, "pao2", params.pao2, 0.0, 700.0);
    check_optional_range(&mut errors, "aa_gradient", params.aa_gradient, 0.0, 700.0);
    check_optional_range(&mut errors, "arterial_ph", params.arterial_ph, 6.5, 8.0);
    check_optional_range(
        &mut errors,
        "serum_bicarbonate",
        params.serum_bicarbonate,
        0.0,
        60.0,
    );
    check_range(&mut errors, "sodium", params.sodium, 90.0, 200.0);
    check_range(&mut errors, "potassium", params.potassium, 1.0, 12.0);
    check_range(&mut errors, "creatinine", params.creatinine, 0.1, 15.0);
    check_range(&mut errors, "hematocrit", params.hematocrit, 5.0, 80.0);
    check_range(
        &mut errors,
        "white_blood_cell_count",
        params.white_blood_cell_count,
        0.0,
        200.0,
    );
    if !(3..=15).contains(&params.glasgow_coma_scale) {
        errors.push(format!(
            "glasgow_coma_scale: {} is outside the range 3 to 15",
            params.glasgow_coma_scale
        ));
    }
    if params.age > 120 {
        errors.push(format!("age: {} is outside the range 0 to 120", params.age));
    }
    // The oxygenation branch selected by FiO2 must have its measure.
    if params.fio2 >= 0.5 {
        if params.aa_gradient.is_none() {
            errors.push("aa_gradient: required when fio2 is 0.5 or higher".to_string());
        }
    } else if params.pao2.is_none() {
        errors.push("pao2: required when fio2 is below 0.5".to_string());
    }
    if params.arterial_ph.is_none() && params.serum_bicarbonate.is_none() {
        errors.push("arterial_ph: supply arterial_ph or serum_bicarbonate".to_string());
    }
    errors
}

fn check_sofa(params: &SofaParams) -> Vec<String> {
    let mut errors = Vec::new();
    check_range(&mut errors, "pao2fio2", params.pao2fio2, 0.0, 700.0);
    check_range(&mut errors, "platelets", params.platelets, 0.0, 2000.0);
    check_range(&mut errors, "bilirubin", params.bilirubin, 0.0, 50.0);
    check_range(
        &mut errors,
        "mean_arterial_pressure",
        params.mean_arterial_pressure,
        0.0,
        300.0,
    );
    check_range(&mut errors, "dopamine", params.dopamine, 0.0, 100.0);
    check_range(&mut errors, "dobutamine", params.dobutamine, 0.0, 100.0);
    check_range(&mut errors, "epinephrine", params.epinephrine, 0.0, 10.0);
    check_range(&mut errors, "norepinephrine", params.norepinephrine, 0.0, 10.0);
    if !(3..=15).contains(&params.glasgow_coma_scale) {
        errors.push(format!(
            "glasgow_coma_scale: {} is outside the range 3 to 15",
            params.glasgow_coma_scale
        ));
    }
    check_range(&mut errors, "creatinine", params.creatinine, 0.1, 15.0);
    check_optional_range(&mut errors, "urine_output", params.urine_output, 0.0, 10000.0);
    errors
}

fn check_wells_pe(params: &WellsPeParams) -> Vec<String> {
    let mut errors = Vec::new();
    check_range(&mut errors, "heart_rate", params.heart_rate, 0.0, 300.0);
    errors
}

fn check_cha2ds2_vasc(params: &Cha2ds2VascParams) -> Vec<String> {
    let mut errors = Vec::new();
    if params.age > 120 {
        errors.push(format!("age: {} is outside the range 0 to 120", params.age));
    }
    errors
}
