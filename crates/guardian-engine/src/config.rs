use guardian_core::{Error, Result};
use guardian_flagger::FlaggerConfig;
use guardian_pii::{DetectorConfig, RewriterConfig};
use guardian_risk::RiskConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub detector: DetectorConfig,

    #[serde(default)]
    pub risk: RiskConfig,

    #[serde(default)]
    pub flagger: FlaggerConfig,

    #[serde(default)]
    pub rewriter: RewriterConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl EngineConfig {
    /// Load a config file, TOML when the extension is `.toml`, YAML otherwise
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        let config = if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml::from_str(&contents)
                .map_err(|e| Error::Config(format!("TOML parse error: {}", e)))?
        } else {
            // Default to YAML
            serde_yaml::from_str(&contents)
                .map_err(|e| Error::Config(format!("YAML parse error: {}", e)))?
        };

        Ok(config)
    }

    /// Merge environment variables into config (env vars take precedence)
    pub fn merge_env(&mut self) {
        if let Ok(passphrase) = std::env::var("GUARDIAN_ENCRYPTION_PASSPHRASE") {
            self.rewriter.encryption.passphrase = passphrase;
        }

        if let Ok(level) = std::env::var("GUARDIAN_LOG_LEVEL") {
            self.logging.level = level;
        }
    }

    /// Reject configurations the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.detector.patterns.is_empty() {
            return Err(Error::ConfigValidation(
                "detector.patterns must contain at least one pattern".to_string(),
            ));
        }

        if self.rewriter.encryption.prefix_len == 0 {
            return Err(Error::ConfigValidation(
                "rewriter.encryption.prefix_len must be greater than 0".to_string(),
            ));
        }

        if self.rewriter.encryption.passphrase.is_empty() {
            return Err(Error::ConfigValidation(
                "rewriter.encryption.passphrase must not be empty".to_string(),
            ));
        }

        let empty = self.rewriter.corpus.empty_lists();
        if !empty.is_empty() {
            return Err(Error::ConfigValidation(format!(
                "rewriter.corpus lists must not be empty: {}",
                empty.join(", ")
            )));
        }

        if self.flagger.jailbreak_confidence > 100 {
            return Err(Error::ConfigValidation(format!(
                "flagger.jailbreak_confidence must be at most 100, got {}",
                self.flagger.jailbreak_confidence
            )));
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(Error::ConfigValidation(format!(
                "logging.level '{}' is not one of {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }
}
