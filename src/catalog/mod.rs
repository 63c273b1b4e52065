//! Static registry of the scoring systems this tool knows how to compute.

mod seed;
mod types;

pub use types::{
    CalculationMeta, Category, DataCategory, ParameterDefinition, ParameterKind, ParameterOption,
    ScoreBand, ScoringSystemDefinition, SystemId,
};

/// The set of scoring system definitions, in catalog order.
#[derive(Debug, Clone)]
pub struct Catalog {
    systems: Vec<ScoringSystemDefinition>,
}

impl Catalog {
    /// The built-in catalog of seven systems.
    pub fn builtin() -> Self {
        Self {
            systems: seed::builtin_systems(),
        }
    }

    pub fn systems(&self) -> &[ScoringSystemDefinition] {
        &self.systems
    }

    /// Definition of `id`. The builtin catalog covers every variant, so
    /// the lookup cannot miss.
    pub fn get(&self, id: SystemId) -> &ScoringSystemDefinition {
        self.systems
            .iter()
            .find(|system| system.id == id)
            .expect("catalog covers every SystemId")
    }

    /// Look up a definition by its string identifier. Accepts the same
    /// spellings as [`SystemId::parse`].
    pub fn find(&self, key: &str) -> Option<&ScoringSystemDefinition> {
        SystemId::parse(key).map(|id| self.get(id))
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Identifier strings of every cataloged system, for error messages.
    pub fn known_ids(&self) -> Vec<&'static str> {
        self.systems.iter().map(|system| system.id.as_str()).collect()
    }
}
