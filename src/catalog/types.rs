use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier for every scoring system in the catalog.
///
/// The string form (`child_pugh`, `meld`, ...) is what appears in CLI
/// arguments, serialized records, and the calculation log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemId {
    ChildPugh,
    Meld,
    ApacheIi,
    Sofa,
    WellsDvt,
    WellsPe,
    Cha2ds2Vasc,
}

impl SystemId {
    pub const ALL: [SystemId; 7] = [
        SystemId::ChildPugh,
        SystemId::Meld,
        SystemId::ApacheIi,
        SystemId::Sofa,
        SystemId::WellsDvt,
        SystemId::WellsPe,
        SystemId::Cha2ds2Vasc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SystemId::ChildPugh => "child_pugh",
            SystemId::Meld => "meld",
            SystemId::ApacheIi => "apache_ii",
            SystemId::Sofa => "sofa",
            SystemId::WellsDvt => "wells_dvt",
            SystemId::WellsPe => "wells_pe",
            SystemId::Cha2ds2Vasc => "cha2ds2_vasc",
        }
    }

    /// Parse a user-supplied identifier. Hyphens are accepted in place of
    /// underscores so `apache-ii` works on the command line.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL.iter().copied().find(|id| id.as_str() == normalized)
    }
}

impl fmt::Display for SystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Clinical domain a scoring system belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Hepatic,
    Cardiac,
    Vascular,
    CriticalCare,
    Oncology,
    Trauma,
    Neurological,
    Sepsis,
    Renal,
    Respiratory,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Hepatic => "Hepatic",
            Category::Cardiac => "Cardiac",
            Category::Vascular => "Vascular",
            Category::CriticalCare => "Critical care",
            Category::Oncology => "Oncology",
            Category::Trauma => "Trauma",
            Category::Neurological => "Neurological",
            Category::Sepsis => "Sepsis",
            Category::Renal => "Renal",
            Category::Respiratory => "Respiratory",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where a parameter's value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataCategory {
    Clinical,
    Biochemical,
    Radiological,
    Histopathological,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParameterKind {
    Numeric,
    Categorical,
    Boolean,
}

impl ParameterKind {
    pub fn label(self) -> &'static str {
        match self {
            ParameterKind::Numeric => "numeric",
            ParameterKind::Categorical => "categorical",
            ParameterKind::Boolean => "boolean",
        }
    }
}

/// One admissible value of a categorical parameter, with the points it
/// contributes. Display metadata only; calculators carry their own tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterOption {
    pub value: String,
    pub label: String,
    pub points: u32,
}

/// A single input of a scoring system.
///
/// `name` doubles as the JSON key of the parameter payload, so it must stay
/// identical to the serde field name of the system's params struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDefinition {
    pub name: String,
    pub kind: ParameterKind,
    pub unit: Option<String>,
    pub category: DataCategory,
    #[serde(default)]
    pub options: Vec<ParameterOption>,
}

/// Display band of the total score (gauge rendering, `show` output).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBand {
    pub min: f64,
    pub max: f64,
    pub label: String,
}

/// How a system's total is produced, for display purposes. The thresholds
/// that actually drive classification are hard-coded in each calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationMeta {
    pub method: String,
    pub min_score: f64,
    pub max_score: f64,
    pub bands: Vec<ScoreBand>,
}

/// Catalog entry describing one scoring system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringSystemDefinition {
    pub id: SystemId,
    pub name: String,
    pub full_name: String,
    pub category: Category,
    pub description: String,
    pub parameters: Vec<ParameterDefinition>,
    pub calculation: CalculationMeta,
    pub references: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_id_round_trip() {
        for id in SystemId::ALL {
            assert_eq!(SystemId::parse(id.as_str()), Some(id));
        }
    }

    #[test]
    fn test_system_id_parse_accepts_hyphens_and_case() {
        assert_eq!(SystemId::parse("apache-ii"), Some(SystemId::ApacheIi));
        assert_eq!(SystemId::parse("Child-Pugh"), Some(SystemId::ChildPugh));
        assert_eq!(SystemId::parse("  sofa "), Some(SystemId::Sofa));
    }

    #[test]
    fn test_system_id_parse_rejects_unknown() {
        assert_eq!(SystemId::parse("apache_iii"), None);
        assert_eq!(SystemId::parse(""), None);
    }

    #[test]
    fn test_system_id_serde_uses_snake_case() {
        let json = serde_json::to_string(&SystemId::Cha2ds2Vasc).unwrap();
        assert_eq!(json, "\"cha2ds2_vasc\"");
        let parsed: SystemId = serde_json::from_str("\"wells_dvt\"").unwrap();
        assert_eq!(parsed, SystemId::WellsDvt);
    }
}
