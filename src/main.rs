use clap::{Parser, Subcommand};
use log::{info, warn};
use serde_json::{Map, Value};
use std::path::PathBuf;

use medscore::catalog::{Catalog, SystemId};
use medscore::config::AppConfig;
use medscore::matcher::SystemMatcher;

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 1;
const EXIT_STORE: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// List available scoring systems (default if no subcommand)
    List,
    /// Show one system in detail: parameters, bands, references
    Show {
        /// System id (e.g. meld, wells_dvt)
        system: String,
    },
    /// Run a calculation and record it in the log
    Calc {
        /// System id. Omit to guess it from the parameter names
        system: Option<String>,
        /// Parameter payload as a JSON object
        #[arg(short, long)]
        input: Option<String>,
        /// Single parameter as NAME=VALUE (repeatable)
        #[arg(short, long = "param", value_name = "NAME=VALUE")]
        param: Vec<String>,
        /// Skip writing the result to the calculation log
        #[arg(long)]
        no_record: bool,
    },
    /// Rank scoring systems against free-text search terms
    Guess {
        /// Search terms, e.g. "bilirubin, inr, creatinine"
        query: String,
    },
    /// Show recent calculations, newest first
    History {
        /// Maximum records to show (defaults to the configured limit)
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Write a default config file
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "medscore")]
#[command(about = "Clinical risk score calculators on the command line", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/medscore/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let command = cli.command.unwrap_or(Commands::List);
    let config_path = cli.config.map(PathBuf::from);

    // init writes a fresh config file, so it must not require loading one.
    if let Commands::Init { force } = &command {
        match medscore::config::write_default_config(config_path, *force) {
            Ok(path) => {
                println!("Config written to {}", path.display());
                std::process::exit(EXIT_SUCCESS);
            }
            Err(e) => {
                eprintln!("Config error: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
        }
    }

    // Load config
    let config = match medscore::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate config at startup
    if let Err(errors) = medscore::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let catalog = Catalog::builtin();
    let use_colors = medscore::output::should_use_colors();

    match command {
        Commands::List => {
            println!(
                "{}",
                medscore::output::format_system_table(catalog.systems(), use_colors)
            );
        }
        Commands::Show { system } => match catalog.find(&system) {
            Some(definition) => {
                println!(
                    "{}",
                    medscore::output::format_system_detail(definition, use_colors)
                );
            }
            None => {
                eprintln!("Unknown scoring system: {}", system);
                eprintln!("Known systems: {}", catalog.known_ids().join(", "));
                std::process::exit(EXIT_INPUT);
            }
        },
        Commands::Calc {
            system,
            input,
            param,
            no_record,
        } => {
            run_calc(&catalog, &config, system, input, &param, no_record, use_colors);
        }
        Commands::Guess { query } => {
            run_guess(&catalog, &config, &query, use_colors);
        }
        Commands::History { limit } => {
            run_history(&config, limit, use_colors);
        }
        Commands::Init { .. } => {} // handled before config loading
    }

    std::process::exit(EXIT_SUCCESS);
}

/// Assemble the parameter payload from --input JSON and --param pairs.
///
/// --param values are parsed as JSON first so numbers and booleans come
/// through typed; anything that fails to parse stays a string. Pairs are
/// applied after --input, so they override keys from the JSON payload.
fn build_payload(input: Option<String>, params: &[String]) -> Result<Map<String, Value>, String> {
    let mut payload = match input {
        Some(raw) => {
            let value: Value = serde_json::from_str(&raw)
                .map_err(|e| format!("--input is not valid JSON: {}", e))?;
            match value {
                Value::Object(map) => map,
                _ => return Err("--input must be a JSON object".to_string()),
            }
        }
        None => Map::new(),
    };

    for pair in params {
        let (name, raw_value) = pair
            .split_once('=')
            .ok_or_else(|| format!("--param needs NAME=VALUE, got '{}'", pair))?;
        let trimmed = raw_value.trim();
        let value = serde_json::from_str(trimmed)
            .unwrap_or_else(|_| Value::String(trimmed.to_string()));
        payload.insert(name.trim().to_string(), value);
    }

    if payload.is_empty() {
        return Err("no parameters given. Pass --input '<json>' or --param NAME=VALUE".to_string());
    }

    Ok(payload)
}

fn run_calc(
    catalog: &Catalog,
    config: &AppConfig,
    system: Option<String>,
    input: Option<String>,
    params: &[String],
    no_record: bool,
    use_colors: bool,
) {
    let payload = match build_payload(input, params) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Input error: {}", e);
            std::process::exit(EXIT_INPUT);
        }
    };

    // Resolve the target system, guessing from parameter names if omitted
    let system_id = match system {
        Some(key) => match SystemId::parse(&key) {
            Some(id) => id,
            None => {
                eprintln!("Unknown scoring system: {}", key);
                eprintln!("Known systems: {}", catalog.known_ids().join(", "));
                std::process::exit(EXIT_INPUT);
            }
        },
        None => {
            let matcher = SystemMatcher::new(catalog, config.matcher.clone());
            match matcher.guess_from_parameter_keys(payload.keys()) {
                Some(guess) => {
                    eprintln!(
                        "No system given. Guessing {} (confidence {:.2}).",
                        guess.system.id, guess.confidence
                    );
                    guess.system.id
                }
                None => {
                    eprintln!("Could not guess a scoring system from the parameter names.");
                    eprintln!("Pass one explicitly: {}", catalog.known_ids().join(", "));
                    std::process::exit(EXIT_INPUT);
                }
            }
        }
    };

    let payload = Value::Object(payload);

    if let Err(errors) = medscore::scoring::validate_parameters(system_id, &payload) {
        eprintln!("Invalid parameters for {}:", system_id);
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_INPUT);
    }

    let output = match medscore::scoring::compute(system_id, &payload) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Calculation error: {:#}", e);
            std::process::exit(EXIT_INPUT);
        }
    };

    println!("{}", medscore::output::format_result(&output, use_colors));

    if no_record {
        info!("Skipping calculation log (--no-record)");
        return;
    }

    // A recording failure must not clobber a result that already printed.
    let log_path = config
        .history
        .path
        .clone()
        .unwrap_or_else(medscore::store::default_log_path);
    let result_value = match serde_json::to_value(&output) {
        Ok(v) => v,
        Err(e) => {
            warn!("Failed to serialize result for the log: {}", e);
            return;
        }
    };
    match medscore::store::append_calculation(&log_path, system_id, payload, result_value) {
        Ok(record) => {
            info!("Recorded calculation {} at {}", record.id, log_path.display());
            println!("Recorded as {}", record.id);
        }
        Err(e) => warn!("Failed to record calculation: {:#}", e),
    }
}

fn run_guess(catalog: &Catalog, config: &AppConfig, query: &str, use_colors: bool) {
    let matcher = SystemMatcher::new(catalog, config.matcher.clone());
    let ranked = matcher.rank_from_search(query);
    println!(
        "{}",
        medscore::output::format_ranked_guesses(&ranked, use_colors)
    );

    let confident = ranked
        .first()
        .map_or(false, |guess| guess.confidence >= config.matcher.confidence_floor);
    if !confident {
        eprintln!(
            "No system matches with confidence at or above {:.2}.",
            config.matcher.confidence_floor
        );
        std::process::exit(EXIT_INPUT);
    }
}

fn run_history(config: &AppConfig, limit: Option<usize>, use_colors: bool) {
    let log_path = config
        .history
        .path
        .clone()
        .unwrap_or_else(medscore::store::default_log_path);
    let limit = limit.unwrap_or(config.history.limit);
    info!("Reading calculation log at {}", log_path.display());

    match medscore::store::recent_calculations(&log_path, limit) {
        Ok(records) => {
            println!(
                "{}",
                medscore::output::format_history(&records, use_colors)
            );
        }
        Err(e) => {
            eprintln!("History error: {:#}", e);
            std::process::exit(EXIT_STORE);
        }
    }
}
