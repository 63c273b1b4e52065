mod init;
mod schema;

pub use init::write_default_config;
pub use schema::{AppConfig, HistoryConfig};

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::matcher::validate_matcher_config;

/// Get the config directory path (~/.config/medscore/)
pub fn get_config_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Could not determine home directory");
    home.join(".config").join("medscore")
}

/// Get the default config file path (~/.config/medscore/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Ensure the config directory exists
pub fn ensure_config_dir() -> Result<()> {
    let config_dir = get_config_dir();
    if !config_dir.exists() {
        fs::create_dir_all(&config_dir).with_context(|| {
            format!(
                "Failed to create config directory at {}",
                config_dir.display()
            )
        })?;
    }
    Ok(())
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses default path
///   (~/.config/medscore/config.yaml)
///
/// With an explicit path the file must exist. Without one, a missing
/// default config is not an error: the built-in defaults apply.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<AppConfig> {
    let explicit = path.is_some();
    let config_path = path.unwrap_or_else(get_config_path);

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        return Ok(AppConfig::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: AppConfig = serde_saphyr::from_str(&config_content).with_context(|| {
        format!(
            "Failed to parse config: invalid YAML in {}",
            config_path.display()
        )
    })?;

    Ok(config)
}

/// Validate a loaded configuration.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Err(matcher_errors) = validate_matcher_config(&config.matcher) {
        errors.extend(matcher_errors);
    }

    if config.history.limit == 0 {
        errors.push("history.limit: must be at least 1".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_validate_default_config_passes() {
        assert!(validate_config(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_history_limit() {
        let mut config = AppConfig::default();
        config.history.limit = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec!["history.limit: must be at least 1"]);
    }

    #[test]
    fn test_validate_collects_matcher_and_history_errors() {
        let mut config = AppConfig::default();
        config.matcher.coverage_weight = 1.5;
        config.history.limit = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_load_missing_explicit_path_is_an_error() {
        let temp_path = env::temp_dir().join("medscore_test_config_missing.yaml");
        let _ = std::fs::remove_file(&temp_path);

        let error = load_config(Some(temp_path)).unwrap_err();
        assert!(error.to_string().contains("not found"));
    }

    #[test]
    fn test_load_explicit_path_parses_yaml() {
        let temp_path = env::temp_dir().join("medscore_test_config_load.yaml");
        std::fs::write(&temp_path, "matcher:\n  confidence_floor: 0.3\n").unwrap();

        let config = load_config(Some(temp_path.clone())).unwrap();
        assert_eq!(config.matcher.confidence_floor, 0.3);
        assert_eq!(config.history.limit, 50);

        let _ = std::fs::remove_file(&temp_path);
    }

    #[test]
    fn test_load_rejects_invalid_yaml() {
        let temp_path = env::temp_dir().join("medscore_test_config_invalid.yaml");
        std::fs::write(&temp_path, "matcher: [not a map").unwrap();

        assert!(load_config(Some(temp_path.clone())).is_err());

        let _ = std::fs::remove_file(&temp_path);
    }
}
