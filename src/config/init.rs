use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::config::{get_config_path, AppConfig};

/// Write a default config file and return the path it was written to.
///
/// If `path` is None, uses the default path (~/.config/medscore/config.yaml).
/// Refuses to overwrite an existing file unless `force` is set.
pub fn write_default_config(path: Option<PathBuf>, force: bool) -> Result<PathBuf> {
    let config_path = path.unwrap_or_else(get_config_path);

    if config_path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {}. Pass --force to overwrite.",
            config_path.display()
        );
    }

    let yaml = serde_saphyr::to_string(&AppConfig::default())
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    std::fs::write(&config_path, &yaml)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    Ok(config_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_written_default_parses_back_to_default() {
        let temp_path = env::temp_dir().join("medscore_test_init_default.yaml");
        let _ = std::fs::remove_file(&temp_path);

        let written = write_default_config(Some(temp_path.clone()), false).unwrap();
        assert_eq!(written, temp_path);

        let content = std::fs::read_to_string(&temp_path).unwrap();
        let parsed: AppConfig = serde_saphyr::from_str(&content).unwrap();
        assert_eq!(parsed, AppConfig::default());

        let _ = std::fs::remove_file(&temp_path);
    }

    #[test]
    fn test_refuses_to_overwrite_without_force() {
        let temp_path = env::temp_dir().join("medscore_test_init_noforce.yaml");
        std::fs::write(&temp_path, "history:\n  limit: 5\n").unwrap();

        let error = write_default_config(Some(temp_path.clone()), false).unwrap_err();
        assert!(error.to_string().contains("already exists"));

        // The original content is untouched.
        let content = std::fs::read_to_string(&temp_path).unwrap();
        assert!(content.contains("limit: 5"));

        let _ = std::fs::remove_file(&temp_path);
    }

    #[test]
    fn test_force_overwrites_existing_file() {
        let temp_path = env::temp_dir().join("medscore_test_init_force.yaml");
        std::fs::write(&temp_path, "history:\n  limit: 5\n").unwrap();

        write_default_config(Some(temp_path.clone()), true).unwrap();

        let content = std::fs::read_to_string(&temp_path).unwrap();
        let parsed: AppConfig = serde_saphyr::from_str(&content).unwrap();
        assert_eq!(parsed.history.limit, 50);

        let _ = std::fs::remove_file(&temp_path);
    }
}
