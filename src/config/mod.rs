mod init;
mod schema;

pub use init::run_init_wizard;
pub use schema::{Config, EndpointConfig};

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Get the config directory path (~/.config/scoresheet/)
pub fn get_config_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Could not determine home directory");
    home.join(".config").join("scoresheet")
}

/// Get the default config file path (~/.config/scoresheet/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses default path (~/.config/scoresheet/config.yaml)
///
/// # Errors
///
/// Returns an error if:
/// - The config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = path.unwrap_or_else(get_config_path);

    if !config_path.exists() {
        anyhow::bail!(
            "Config file not found at {}. Run `scoresheet init` to create one.",
            config_path.display()
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_load_missing_file_is_an_error() {
        let path = env::temp_dir().join("scoresheet_test_missing_config.yaml");
        let _ = fs::remove_file(&path);

        let err = load_config(Some(path)).unwrap_err();
        assert!(err.to_string().contains("scoresheet init"));
    }

    #[test]
    fn test_load_written_config() {
        let path = env::temp_dir().join("scoresheet_test_load_config.yaml");
        fs::write(
            &path,
            "endpoint:\n  url: https://script.example.com/store/exec\n  timeout: 15s\n",
        )
        .unwrap();

        let config = load_config(Some(path.clone())).unwrap();
        assert_eq!(config.endpoint.url, "https://script.example.com/store/exec");
        assert_eq!(
            config.endpoint.submit_timeout().unwrap(),
            std::time::Duration::from_secs(15)
        );

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_rejects_unknown_fields() {
        let path = env::temp_dir().join("scoresheet_test_unknown_fields.yaml");
        fs::write(
            &path,
            "endpoint:\n  url: https://example.com\n  retries: 3\n",
        )
        .unwrap();

        assert!(load_config(Some(path.clone())).is_err());

        let _ = fs::remove_file(&path);
    }
}
