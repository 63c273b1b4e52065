pub mod apache_ii;
pub mod cha2ds2_vasc;
pub mod child_pugh;
pub mod engine;
pub mod meld;
pub mod sofa;
pub mod validation;
pub mod wells_dvt;
pub mod wells_pe;

pub use apache_ii::{calculate_apache_ii, ApacheIiParams, ApacheIiResult};
pub use cha2ds2_vasc::{calculate_cha2ds2_vasc, Cha2ds2VascParams, Cha2ds2VascResult};
pub use child_pugh::{calculate_child_pugh, ChildPughParams, ChildPughResult};
pub use engine::{compute, CalculationOutput};
pub use meld::{calculate_meld, MeldParams, MeldResult};
pub use sofa::{calculate_sofa, SofaParams, SofaResult};
pub use validation::validate_parameters;
pub use wells_dvt::{calculate_wells_dvt, PretestProbability, WellsDvtParams, WellsDvtResult};
pub use wells_pe::{calculate_wells_pe, WellsPeParams, WellsPeResult};
