//! Configuration loading and parsing

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use track_forest::KeepPolicy;

/// Main application configuration (loaded from config.toml)
///
/// Every section is optional; command-line flags override file values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub prune: KeepPolicy,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct InputConfig {
    /// Event file to process; `--event` overrides this
    pub event_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Destination for the forest JSON (stdout when unset)
    pub path: Option<PathBuf>,
    /// Pretty-print the JSON document
    #[serde(default)]
    pub pretty: bool,
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_deserialization() {
        let toml_content = r#"
            [input]
            event_file = "event.json"

            [prune]
            em_threshold_mev = 2.5
            nucleon_threshold_mev = 20.0

            [output]
            path = "forest.json"
            pretty = true
        "#;

        let config: AppConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(
            config.input.event_file,
            Some(PathBuf::from("event.json"))
        );
        assert_eq!(config.prune.em_threshold_mev, 2.5);
        assert_eq!(config.prune.nucleon_threshold_mev, 20.0);
        assert!(config.output.pretty);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert!(config.input.event_file.is_none());
        assert_eq!(config.prune, KeepPolicy::default());
        assert!(config.output.path.is_none());
        assert!(!config.output.pretty);
    }

    #[test]
    fn test_partial_prune_section() {
        let config: AppConfig = toml::from_str("[prune]\nem_threshold_mev = 1.0\n").unwrap();
        assert_eq!(config.prune.em_threshold_mev, 1.0);
        assert_eq!(config.prune.nucleon_threshold_mev, 10.0);
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[input]\nevent_file = \"run42.json\"\n")
            .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(
            config.input.event_file,
            Some(PathBuf::from("run42.json"))
        );
    }

    #[test]
    fn test_load_missing_config_fails() {
        assert!(load_config(Path::new("/nonexistent/config.toml")).is_err());
    }
}
