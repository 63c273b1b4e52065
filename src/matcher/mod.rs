//! Lexical matching of free-text queries and payload keys to scoring systems.
//!
//! Matching is intentionally dumb: normalized substring comparison against
//! catalog parameter names, no synonym table. The confidence blend rewards
//! queries that cover a system's parameters precisely and exactly.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, ScoringSystemDefinition};

/// Weight of a partial match relative to an exact one when computing the
/// exactness signal.
const PARTIAL_MATCH_CREDIT: f64 = 0.6;

/// Minimum term length for substring matching. Shorter terms only ever
/// match a parameter name exactly.
const MIN_PARTIAL_TERM_LEN: usize = 3;

/// Blend weights and acceptance floor for system guessing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatcherConfig {
    pub coverage_weight: f64,
    pub precision_weight: f64,
    pub exactness_weight: f64,
    /// Guesses below this confidence are reported as "no match".
    pub confidence_floor: f64,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            coverage_weight: 0.55,
            precision_weight: 0.35,
            exactness_weight: 0.10,
            confidence_floor: 0.20,
        }
    }
}

/// Validate matcher configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_matcher_config(config: &MatcherConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    check_unit_interval(&mut errors, "matcher.coverage_weight", config.coverage_weight);
    check_unit_interval(&mut errors, "matcher.precision_weight", config.precision_weight);
    check_unit_interval(&mut errors, "matcher.exactness_weight", config.exactness_weight);
    check_unit_interval(&mut errors, "matcher.confidence_floor", config.confidence_floor);

    let weight_sum =
        config.coverage_weight + config.precision_weight + config.exactness_weight;
    if weight_sum.is_finite() && weight_sum <= 0.0 {
        errors.push("matcher: at least one blend weight must be positive".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_unit_interval(errors: &mut Vec<String>, name: &str, value: f64) {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        errors.push(format!("{name}: must be between 0 and 1"));
    }
}

/// One ranked candidate system for a query.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemGuess<'a> {
    pub system: &'a ScoringSystemDefinition,
    /// Blended confidence, rounded to two decimals.
    pub confidence: f64,
    /// Parameter names the query matched, in catalog order.
    pub matched_parameters: Vec<String>,
    /// Parameter names the query did not mention.
    pub missing_parameters: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchKind {
    Exact,
    Partial,
}

/// Matches queries against a catalog under a given configuration.
pub struct SystemMatcher<'a> {
    catalog: &'a Catalog,
    config: MatcherConfig,
}

impl<'a> SystemMatcher<'a> {
    pub fn new(catalog: &'a Catalog, config: MatcherConfig) -> Self {
        Self { catalog, config }
    }

    pub fn with_defaults(catalog: &'a Catalog) -> Self {
        Self::new(catalog, MatcherConfig::default())
    }

    /// Rank every system with at least one matched parameter, best first.
    /// Ties on confidence break toward more matched parameters.
    pub fn rank_from_search(&self, query: &str) -> Vec<SystemGuess<'a>> {
        let terms = search_terms(query);
        let mut ranked: Vec<SystemGuess<'a>> = self
            .catalog
            .systems()
            .iter()
            .filter_map(|system| self.score_system(system, &terms))
            .collect();
        ranked.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.matched_parameters.len().cmp(&a.matched_parameters.len()))
        });
        ranked
    }

    /// The top-ranked system, if its confidence clears the floor.
    pub fn guess_from_search(&self, query: &str) -> Option<SystemGuess<'a>> {
        self.rank_from_search(query)
            .into_iter()
            .next()
            .filter(|guess| guess.confidence >= self.config.confidence_floor)
    }

    /// Guess the intended system from the keys of a parameter payload.
    /// Equivalent to searching for the keys joined with commas.
    pub fn guess_from_parameter_keys<I, S>(&self, keys: I) -> Option<SystemGuess<'a>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let query = keys
            .into_iter()
            .map(|key| key.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(",");
        self.guess_from_search(&query)
    }

    fn score_system(
        &self,
        system: &'a ScoringSystemDefinition,
        terms: &[String],
    ) -> Option<SystemGuess<'a>> {
        if system.parameters.is_empty() {
            return None;
        }
        let normalized: Vec<String> = system
            .parameters
            .iter()
            .map(|parameter| normalize(&parameter.name))
            .collect();

        // An exact match is sticky: a later partial hit never downgrades it,
        // and a later exact hit upgrades an earlier partial.
        let mut matches: Vec<Option<MatchKind>> = vec![None; system.parameters.len()];
        for term in terms {
            for (index, name) in normalized.iter().enumerate() {
                if term == name {
                    matches[index] = Some(MatchKind::Exact);
                } else if matches[index].is_none() && is_partial_match(term, name) {
                    matches[index] = Some(MatchKind::Partial);
                }
            }
        }

        let matched = matches.iter().flatten().count();
        if matched == 0 {
            return None;
        }
        let exact = matches
            .iter()
            .flatten()
            .filter(|kind| **kind == MatchKind::Exact)
            .count();
        let partial = matched - exact;

        let coverage = matched as f64 / system.parameters.len() as f64;
        let precision = matched as f64 / terms.len().max(1) as f64;
        let exactness =
            (exact as f64 + PARTIAL_MATCH_CREDIT * partial as f64) / matched as f64;
        let confidence = round2(
            self.config.coverage_weight * coverage
                + self.config.precision_weight * precision
                + self.config.exactness_weight * exactness,
        );

        let mut matched_parameters = Vec::with_capacity(matched);
        let mut missing_parameters = Vec::new();
        for (parameter, matched_kind) in system.parameters.iter().zip(&matches) {
            if matched_kind.is_some() {
                matched_parameters.push(parameter.name.clone());
            } else {
                missing_parameters.push(parameter.name.clone());
            }
        }

        Some(SystemGuess {
            system,
            confidence,
            matched_parameters,
            missing_parameters,
        })
    }
}

/// Lowercase, strip punctuation and separators to single spaces, trim.
fn normalize(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_alphanumeric() {
            out.push(c);
        } else {
            out.push(' ');
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split a query into search terms: comma/semicolon/newline chunks first,
/// then the individual words of each chunk, deduplicated in order. One-letter
/// words are dropped.
fn search_terms(query: &str) -> Vec<String> {
    let chunks: Vec<String> = query
        .split([',', ';', '\n'])
        .map(normalize)
        .filter(|chunk| !chunk.is_empty())
        .collect();

    let mut terms: Vec<String> = Vec::new();
    for chunk in &chunks {
        if !terms.iter().any(|term| term == chunk) {
            terms.push(chunk.clone());
        }
    }
    for chunk in &chunks {
        for word in chunk.split(' ') {
            if word.len() > 1 && !terms.iter().any(|term| term == word) {
                terms.push(word.to_string());
            }
        }
    }
    terms
}

fn is_partial_match(term: &str, parameter: &str) -> bool {
    if term.len() < MIN_PARTIAL_TERM_LEN {
        return false;
    }
    parameter.contains(term) || term.contains(parameter)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
