use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::catalog::SystemId;

use super::apache_ii::{calculate_apache_ii, ApacheIiParams, ApacheIiResult};
use super::cha2ds2_vasc::{calculate_cha2ds2_vasc, Cha2ds2VascParams, Cha2ds2VascResult};
use super::child_pugh::{calculate_child_pugh, ChildPughParams, ChildPughResult};
use super::meld::{calculate_meld, MeldParams, MeldResult};
use super::sofa::{calculate_sofa, SofaParams, SofaResult};
use super::wells_dvt::{calculate_wells_dvt, WellsDvtParams, WellsDvtResult};
use super::wells_pe::{calculate_wells_pe, WellsPeParams, WellsPeResult};

/// Result of one calculation, tagged by system. Serializes as the inner
/// result object, which is the shape stored in the calculation log.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CalculationOutput {
    ChildPugh(ChildPughResult),
    Meld(MeldResult),
    ApacheIi(ApacheIiResult),
    Sofa(SofaResult),
    WellsDvt(WellsDvtResult),
    WellsPe(WellsPeResult),
    Cha2ds2Vasc(Cha2ds2VascResult),
}

impl CalculationOutput {
    pub fn system(&self) -> SystemId {
        match self {
            CalculationOutput::ChildPugh(_) => SystemId::ChildPugh,
            CalculationOutput::Meld(_) => SystemId::Meld,
            CalculationOutput::ApacheIi(_) => SystemId::ApacheIi,
            CalculationOutput::Sofa(_) => SystemId::Sofa,
            CalculationOutput::WellsDvt(_) => SystemId::WellsDvt,
            CalculationOutput::WellsPe(_) => SystemId::WellsPe,
            CalculationOutput::Cha2ds2Vasc(_) => SystemId::Cha2ds2Vasc,
        }
    }

    pub fn total_score(&self) -> f64 {
        match self {
            CalculationOutput::ChildPugh(result) => f64::from(result.total_score),
            CalculationOutput::Meld(result) => f64::from(result.total_score),
            CalculationOutput::ApacheIi(result) => f64::from(result.total_score),
            CalculationOutput::Sofa(result) => f64::from(result.total_score),
            CalculationOutput::WellsDvt(result) => f64::from(result.total_score),
            CalculationOutput::WellsPe(result) => result.total_score,
            CalculationOutput::Cha2ds2Vasc(result) => f64::from(result.total_score),
        }
    }

    pub fn interpretation(&self) -> &'static str {
        match self {
            CalculationOutput::ChildPugh(result) => result.interpretation,
            CalculationOutput::Meld(result) => result.interpretation,
            CalculationOutput::ApacheIi(result) => result.interpretation,
            CalculationOutput::Sofa(result) => result.interpretation,
            CalculationOutput::WellsDvt(result) => result.interpretation,
            CalculationOutput::WellsPe(result) => result.interpretation,
            CalculationOutput::Cha2ds2Vasc(result) => result.interpretation,
        }
    }
}

fn parse_params<T: DeserializeOwned>(system: SystemId, parameters: &Value) -> Result<T> {
    serde_json::from_value(parameters.clone())
        .with_context(|| format!("parameters do not match the {system} input contract"))
}

/// Run the calculator for `system` against a JSON parameter payload.
///
/// The payload is expected to have passed
/// [`validate_parameters`](super::validation::validate_parameters) first;
/// shape errors are still reported here rather than panicking.
pub fn compute(system: SystemId, parameters: &Value) -> Result<CalculationOutput> {
    let output = match system {
        SystemId::ChildPugh => {
            let params: ChildPughParams = parse_params(system, parameters)?;
            CalculationOutput::ChildPugh(calculate_child_pugh(&params))
        }
        SystemId::Meld => {
            let params: MeldParams = parse_params(system, parameters)?;
            CalculationOutput::Meld(calculate_meld(&params))
        }
        SystemId::ApacheIi => {
            let params: ApacheIiParams = parse_params(system, parameters)?;
            CalculationOutput::ApacheIi(calculate_apache_ii(&params))
        }
        SystemId::Sofa => {
            let params: SofaParams = parse_params(system, parameters)?;
            CalculationOutput::Sofa(calculate_sofa(&params))
        }
        SystemId::WellsDvt => {
            let params: WellsDvtParams = parse_params(system, parameters)?;
            CalculationOutput::WellsDvt(calculate_wells_dvt(&params))
        }
        SystemId::WellsPe => {
            let params: WellsPeParams = parse_params(system, parameters)?;
            CalculationOutput::WellsPe(calculate_wells_pe(&params))
        }
        SystemId::Cha2ds2Vasc => {
            let params: Cha2ds2VascParams = parse_params(system, parameters)?;
            CalculationOutput::Cha2ds2Vasc(calculate_cha2ds2_vasc(&params))
        }
    };
    Ok(output)
}
