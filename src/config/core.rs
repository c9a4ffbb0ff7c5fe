use crate::parallel::ReduceConfig;
use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Json, Toml, Yaml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

/// Fully merged threadkeep settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Parallel reduction tuning
    pub reduce: ReduceConfig,

    /// Logging defaults
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Tracing filter used when `RUST_LOG` is not set
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::load_with_custom_config(None)
    }

    pub fn load_with_custom_config(custom_config: Option<&Path>) -> Result<Self> {
        let settings: Settings = Self::figment(custom_config)
            .extract()
            .context("Failed to load threadkeep configuration")?;
        tracing::trace!("CONFIG LOAD: {:?}", settings);
        Ok(settings)
    }

    /// Layered configuration sources, lowest priority first
    pub fn figment(custom_config: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Toml::string(DEFAULT_CONFIG)); // Embedded defaults

        // A custom config replaces the user and repository files
        if let Some(custom_path) = custom_config {
            figment = match custom_path.extension().and_then(|ext| ext.to_str()) {
                Some("json") => figment.merge(Json::file(custom_path)),
                Some("yaml") | Some("yml") => figment.merge(Yaml::file(custom_path)),
                _ => figment.merge(Toml::file(custom_path)),
            };
        } else {
            let user_config = Self::user_config_path();
            figment = figment
                .merge(Toml::file(&user_config))
                .merge(Toml::file("threadkeep.toml"))
                .merge(Json::file("threadkeep.json"))
                .merge(Yaml::file("threadkeep.yaml"))
                .merge(Yaml::file("threadkeep.yml"));
        }

        // Environment variables always have highest priority
        figment.merge(Env::prefixed("THREADKEEP_").split("__"))
    }

    fn user_config_path() -> String {
        match std::env::var("HOME") {
            Ok(home) => format!("{}/.config/threadkeep/config.toml", home),
            Err(_) => "~/.config/threadkeep/config.toml".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parallel::DEFAULT_MIN_PER_THREAD;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_embedded_defaults_parse() {
        let settings: Settings = Figment::new()
            .merge(Toml::string(DEFAULT_CONFIG))
            .extract()
            .unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.reduce.min_per_thread, DEFAULT_MIN_PER_THREAD);
        assert_eq!(settings.logging.level, "warn");
    }

    #[test]
    fn test_custom_toml_overrides_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("custom.toml");
        fs::write(
            &path,
            r#"
[reduce]
min_per_thread = 100
hardware_threads = 3
"#,
        )
        .unwrap();

        let settings = Settings::load_with_custom_config(Some(path.as_path())).unwrap();
        assert_eq!(settings.reduce.min_per_thread, 100);
        assert_eq!(settings.reduce.hardware_threads, Some(3));
        assert_eq!(settings.reduce.max_threads, 0);
    }

    #[test]
    fn test_custom_yaml_and_json() {
        let temp_dir = TempDir::new().unwrap();

        let yaml = temp_dir.path().join("custom.yml");
        fs::write(&yaml, "reduce:\n  max_threads: 6\n").unwrap();
        let settings = Settings::load_with_custom_config(Some(yaml.as_path())).unwrap();
        assert_eq!(settings.reduce.max_threads, 6);

        let json = temp_dir.path().join("custom.json");
        fs::write(&json, r#"{"logging": {"level": "debug"}}"#).unwrap();
        let settings = Settings::load_with_custom_config(Some(json.as_path())).unwrap();
        assert_eq!(settings.logging.level, "debug");
    }

    #[test]
    fn test_missing_custom_config_falls_back_to_defaults() {
        let settings =
            Settings::load_with_custom_config(Some(Path::new("does-not-exist.toml"))).unwrap();
        assert_eq!(settings.reduce.min_per_thread, DEFAULT_MIN_PER_THREAD);
    }

    #[test]
    fn test_invalid_value_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.toml");
        fs::write(&path, "[reduce]\nmin_per_thread = \"lots\"\n").unwrap();
        assert!(Settings::load_with_custom_config(Some(path.as_path())).is_err());
    }
}
