use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Path of the JSON file holding the strategy records.
    pub data_file: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { data_file: "data/strategies.json".into() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Output format: "compact" or "json".
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { format: default_log_format() }
    }
}

fn default_log_format() -> String {
    "compact".to_string()
}

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default().unwrap_or_default();
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.store.normalize_from_env();
        self.store.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

impl StoreConfig {
    /// Environment variable overrides the configured path when present.
    fn normalize_from_env(&mut self) {
        if let Ok(path) = std::env::var("STRATEGY_DATA_FILE") {
            if !path.trim().is_empty() {
                self.data_file = path;
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.data_file.trim().is_empty() {
            return Err(anyhow!("store.data_file must not be empty"));
        }
        Ok(())
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<()> {
        match self.format.as_str() {
            "compact" | "json" => Ok(()),
            other => Err(anyhow!("logging.format must be \"compact\" or \"json\", got \"{other}\"")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let mut cfg = AppConfig::default();
        cfg.normalize_and_validate().expect("defaults validate");
        assert_eq!(cfg.store.data_file, "data/strategies.json");
        assert_eq!(cfg.logging.format, "compact");
    }

    #[test]
    fn parses_partial_toml_with_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [store]
            data_file = "/tmp/strategies.json"
            "#,
        )
        .expect("parse");
        assert_eq!(cfg.store.data_file, "/tmp/strategies.json");
        assert_eq!(cfg.logging.format, "compact");
    }

    #[test]
    fn rejects_unknown_log_format() {
        let mut cfg = AppConfig::default();
        cfg.logging.format = "pretty".into();
        assert!(cfg.normalize_and_validate().is_err());
    }
}
