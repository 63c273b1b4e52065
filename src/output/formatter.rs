use chrono::{Duration, Utc};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::catalog::{ParameterKind, ScoringSystemDefinition};
use crate::matcher::SystemGuess;
use crate::scoring::{
    ApacheIiResult, CalculationOutput, Cha2ds2VascResult, ChildPughResult, MeldResult, SofaResult,
    WellsDvtResult, WellsPeResult,
};
use crate::store::CalculationRecord;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a score for display.
/// Whole numbers drop the decimal; fractional scores keep one place.
pub fn format_score(score: f64) -> String {
    if score.fract().abs() < f64::EPSILON {
        format!("{:.0}", score)
    } else {
        format!("{:.1}", score)
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate_text(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format the catalog as one line per system
/// Format: "{id} | {name} | {category}"
pub fn format_system_table(systems: &[ScoringSystemDefinition], use_colors: bool) -> String {
    if systems.is_empty() {
        return "No scoring systems available.".to_string();
    }

    let id_width = systems
        .iter()
        .map(|s| s.id.as_str().len())
        .max()
        .unwrap_or(0);

    systems
        .iter()
        .map(|system| {
            let id_padded = format!("{:<width$}", system.id.as_str(), width = id_width);
            if use_colors {
                format!(
                    "{} | {} | {}",
                    id_padded.bold(),
                    system.name,
                    system.category.label().cyan()
                )
            } else {
                format!("{} | {} | {}", id_padded, system.name, system.category.label())
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a single system with detailed multi-line output
pub fn format_system_detail(system: &ScoringSystemDefinition, use_colors: bool) -> String {
    let mut lines: Vec<String> = Vec::new();

    if use_colors {
        lines.push(format!("{}", system.full_name.bold()));
    } else {
        lines.push(system.full_name.clone());
    }
    lines.push(format!("  Id: {}", system.id));
    lines.push(format!("  Category: {}", system.category.label()));
    lines.push(format!("  Method: {}", system.calculation.method));
    lines.push(format!(
        "  Score range: {} to {}",
        format_score(system.calculation.min_score),
        format_score(system.calculation.max_score)
    ));
    lines.push(String::new());
    lines.push(format!("  {}", system.description));

    lines.push(String::new());
    lines.push("  Bands:".to_string());
    for band in &system.calculation.bands {
        let range = format!(
            "{} to {}",
            format_score(band.min),
            format_score(band.max)
        );
        if use_colors {
            lines.push(format!("    {:<12} {}", range, band.label.cyan()));
        } else {
            lines.push(format!("    {:<12} {}", range, band.label));
        }
    }

    lines.push(String::new());
    lines.push("  Parameters:".to_string());
    for parameter in &system.parameters {
        let kind = match (&parameter.kind, &parameter.unit) {
            (ParameterKind::Numeric, Some(unit)) => format!("numeric, {}", unit),
            (kind, _) => kind.label().to_string(),
        };
        if use_colors {
            lines.push(format!("    {} ({})", parameter.name.bold(), kind));
        } else {
            lines.push(format!("    {} ({})", parameter.name, kind));
        }
        for option in &parameter.options {
            lines.push(format!(
                "      {}: {} ({} pts)",
                option.value, option.label, option.points
            ));
        }
    }

    if !system.references.is_empty() {
        lines.push(String::new());
        lines.push("  References:".to_string());
        for reference in &system.references {
            lines.push(format!("    - {}", reference));
        }
    }

    lines.join("\n")
}

/// Format a calculation result with detailed multi-line output
pub fn format_result(output: &CalculationOutput, use_colors: bool) -> String {
    let score = format_score(output.total_score());
    let headline = match output {
        CalculationOutput::ChildPugh(result) => {
            format!("Child-Pugh {} (Class {})", score, result.class)
        }
        CalculationOutput::Meld(_) => format!("MELD {}", score),
        CalculationOutput::ApacheIi(_) => format!("APACHE II {}", score),
        CalculationOutput::Sofa(_) => format!("SOFA {}", score),
        CalculationOutput::WellsDvt(_) => format!("Wells DVT {}", score),
        CalculationOutput::WellsPe(_) => format!("Wells PE {}", score),
        CalculationOutput::Cha2ds2Vasc(_) => format!("CHA2DS2-VASc {}", score),
    };

    let mut lines: Vec<String> = Vec::new();
    if use_colors {
        lines.push(format!("{}", headline.bold()));
    } else {
        lines.push(headline);
    }

    match output {
        CalculationOutput::ChildPugh(result) => format_child_pugh_detail(result, &mut lines),
        CalculationOutput::Meld(result) => format_meld_detail(result, &mut lines),
        CalculationOutput::ApacheIi(result) => format_apache_ii_detail(result, &mut lines),
        CalculationOutput::Sofa(result) => format_sofa_detail(result, &mut lines),
        CalculationOutput::WellsDvt(result) => format_wells_dvt_detail(result, &mut lines),
        CalculationOutput::WellsPe(result) => format_wells_pe_detail(result, &mut lines),
        CalculationOutput::Cha2ds2Vasc(result) => format_cha2ds2_vasc_detail(result, &mut lines),
    }

    lines.join("\n")
}

fn format_child_pugh_detail(result: &ChildPughResult, lines: &mut Vec<String>) {
    let b = &result.breakdown;
    lines.push(format!(
        "  Points: bilirubin {}, albumin {}, INR {}, ascites {}, encephalopathy {}",
        b.bilirubin_points, b.albumin_points, b.inr_points, b.ascites_points, b.encephalopathy_points
    ));
    lines.push(format!("  Interpretation: {}", result.interpretation));
    lines.push(format!(
        "  Survival: {} one-year, {} two-year",
        result.one_year_survival, result.two_year_survival
    ));
}

fn format_meld_detail(result: &MeldResult, lines: &mut Vec<String>) {
    let b = &result.breakdown;
    lines.push(format!(
        "  Inputs after clamping: bilirubin {}, INR {}, creatinine {}",
        b.bilirubin_used, b.inr_used, b.creatinine_used
    ));
    lines.push(format!("  Raw score: {}", b.raw_score));
    lines.push(format!("  Interpretation: {}", result.interpretation));
    lines.push(format!(
        "  Three-month mortality: {}",
        result.three_month_mortality
    ));
}

fn format_apache_ii_detail(result: &ApacheIiResult, lines: &mut Vec<String>) {
    let b = &result.breakdown;
    let c = &b.component_points;
    lines.push(format!(
        "  Acute physiology: {}, age: {}, chronic health: {}",
        b.acute_physiology_score, b.age_points, b.chronic_health_points
    ));
    lines.push(format!(
        "  Components: temperature {}, MAP {}, heart rate {}, respiratory rate {}, \
         oxygenation {} ({}), acid-base {} ({}), sodium {}, potassium {}, creatinine {}, \
         hematocrit {}, WBC {}, GCS {}",
        c.temperature,
        c.mean_arterial_pressure,
        c.heart_rate,
        c.respiratory_rate,
        c.oxygenation,
        b.oxygenation_method,
        c.acid_base,
        b.acid_base_method,
        c.sodium,
        c.potassium,
        c.creatinine,
        c.hematocrit,
        c.white_blood_cell_count,
        c.glasgow_coma_scale
    ));
    lines.push(format!("  Interpretation: {}", result.interpretation));
    lines.push(format!(
        "  Estimated hospital mortality: {}",
        result.estimated_hospital_mortality
    ));
}

fn format_sofa_detail(result: &SofaResult, lines: &mut Vec<String>) {
    let b = &result.breakdown;
    lines.push(format!(
        "  Organ points: respiratory {}, coagulation {}, liver {}, cardiovascular {}, \
         CNS {}, renal {} (scored by {})",
        b.respiratory,
        b.coagulation,
        b.liver,
        b.cardiovascular,
        b.central_nervous_system,
        b.renal,
        b.renal_method
    ));
    lines.push(format!("  Interpretation: {}", result.interpretation));
    lines.push(format!("  Mortality risk: {}", result.mortality_risk));
}

fn format_wells_dvt_detail(result: &WellsDvtResult, lines: &mut Vec<String>) {
    let b = &result.breakdown;
    lines.push(format!(
        "  Positive criteria: {}, alternative diagnosis adjustment: {}",
        b.positive_criteria_count, b.alternative_diagnosis_penalty
    ));
    lines.push(format!(
        "  Pretest probability: {}",
        result.pretest_probability
    ));
    lines.push(format!("  Two-tier: {}", result.two_tier_likelihood.label()));
    lines.push(format!("  Interpretation: {}", result.interpretation));
}

fn format_wells_pe_detail(result: &WellsPeResult, lines: &mut Vec<String>) {
    let c = &result.breakdown.criteria_points;
    let criteria: [(&str, f64); 7] = [
        ("clinical signs of DVT", c.clinical_signs_of_dvt),
        ("PE most likely diagnosis", c.pe_most_likely_diagnosis),
        ("heart rate over 100", c.heart_rate),
        ("immobilization or recent surgery", c.immobilization_or_recent_surgery),
        ("previous DVT or PE", c.previous_dvt_or_pe),
        ("hemoptysis", c.hemoptysis),
        ("malignancy", c.malignancy),
    ];
    let met: Vec<String> = criteria
        .iter()
        .filter(|(_, points)| *points > 0.0)
        .map(|(label, points)| format!("{} ({})", label, format_score(*points)))
        .collect();
    if met.is_empty() {
        lines.push("  Criteria met: none".to_string());
    } else {
        lines.push(format!("  Criteria met: {}", met.join(", ")));
    }
    lines.push(format!(
        "  Pretest probability: {}",
        result.pretest_probability
    ));
    lines.push(format!("  Two-tier: {}", result.two_tier_likelihood.label()));
    lines.push(format!(
        "  Estimated prevalence: {}",
        result.estimated_prevalence
    ));
    lines.push(format!("  Interpretation: {}", result.interpretation));
}

fn format_cha2ds2_vasc_detail(result: &Cha2ds2VascResult, lines: &mut Vec<String>) {
    let b = &result.breakdown;
    lines.push(format!(
        "  Points: heart failure {}, hypertension {}, age {}, diabetes {}, \
         stroke or TIA {}, vascular disease {}, sex category {}",
        b.congestive_heart_failure_or_left_ventricular_dysfunction,
        b.hypertension,
        b.age,
        b.diabetes_mellitus,
        b.prior_stroke_tia_or_thromboembolism,
        b.vascular_disease,
        b.sex_category
    ));
    lines.push(format!("  Risk category: {}", result.risk_category));
    lines.push(format!("  Interpretation: {}", result.interpretation));
    lines.push(format!("  Recommendation: {}", result.recommendation));
}

/// Format ranked guesses as a table with columns: Index, Confidence, Id, Matched
/// Index column: 3 chars (fits "99."), right-aligned
/// Confidence column is right-aligned, 5 chars wide (fits "0.89")
pub fn format_ranked_guesses(guesses: &[SystemGuess], use_colors: bool) -> String {
    if guesses.is_empty() {
        return "No matching scoring systems found.".to_string();
    }

    let term_width = get_terminal_width();
    let id_width = guesses
        .iter()
        .map(|g| g.system.id.as_str().len())
        .max()
        .unwrap_or(0);
    let separator = "  ";

    guesses
        .iter()
        .enumerate()
        .map(|(idx, guess)| {
            let index_str = format!("{:>2}.", idx + 1);
            let confidence_str = format!("{:>5.2}", guess.confidence);
            let id_padded = format!("{:<width$}", guess.system.id.as_str(), width = id_width);
            let total = guess.matched_parameters.len() + guess.missing_parameters.len();
            let matched = format!(
                "matched {}/{}: {}",
                guess.matched_parameters.len(),
                total,
                guess.matched_parameters.join(", ")
            );

            let fixed_width = 3 + 1 + 5 + separator.len() * 2 + id_width;
            let matched = if let Some(width) = term_width {
                if width > fixed_width + 10 {
                    truncate_text(&matched, width - fixed_width)
                } else {
                    truncate_text(&matched, 20)
                }
            } else {
                matched
            };

            if use_colors {
                format!(
                    "{} {}{}{}{}{}",
                    index_str.dimmed(),
                    confidence_str.bold(),
                    separator,
                    id_padded,
                    separator,
                    matched
                )
            } else {
                format!(
                    "{} {}{}{}{}{}",
                    index_str, confidence_str, separator, id_padded, separator, matched
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format calculation records as one line per record, newest first
/// Columns: age, system id, score, record id (first 8 chars)
pub fn format_history(records: &[CalculationRecord], use_colors: bool) -> String {
    if records.is_empty() {
        return "No calculations recorded.".to_string();
    }

    let id_width = records
        .iter()
        .map(|r| r.system_id.as_str().len())
        .max()
        .unwrap_or(0);

    records
        .iter()
        .map(|record| {
            let age = format_age(Utc::now() - record.created_at);
            let system = format!("{:<width$}", record.system_id.as_str(), width = id_width);
            let score = record
                .result
                .get("total_score")
                .and_then(serde_json::Value::as_f64)
                .map(format_score)
                .unwrap_or_else(|| "-".to_string());
            let short_id = record.id.get(..8).unwrap_or(record.id.as_str());

            if use_colors {
                format!(
                    "{:>4}  {}  {:>5}  {}",
                    age.dimmed(),
                    system.bold(),
                    score,
                    short_id.cyan()
                )
            } else {
                format!("{:>4}  {}  {:>5}  {}", age, system, score, short_id)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a duration into a human-readable age string
/// "2h" for hours, "3d" for days, "1w" for weeks
pub fn format_age(duration: Duration) -> String {
    let hours = duration.num_hours();
    let days = duration.num_days();
    let weeks = days / 7;

    if weeks >= 1 {
        format!("{}w", weeks)
    } else if days >= 1 {
        format!("{}d", days)
    } else if hours >= 1 {
        format!("{}h", hours)
    } else {
        let minutes = duration.num_minutes();
        if minutes >= 1 {
            format!("{}m", minutes)
        } else {
            "now".to_string()
        }
    }
}
