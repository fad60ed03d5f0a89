//! Configuration management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Receipt session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Path to the configuration file
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Path to the vosk model directory (Spanish small model)
    pub model_path: String,

    /// Capture sample rate; must match the acoustic model
    pub sample_rate: u32,

    /// Samples per frame fed to the recognizer
    pub frame_size: usize,

    /// Receipt fields to extract; also part of the grammar
    pub keywords: Vec<String>,

    /// Currency words kept in the grammar so spoken currency names do not
    /// decode as the unknown token
    pub currency_words: Vec<String>,

    /// Output character substituted for the spoken word "coma"
    pub comma_output: char,

    /// Audio device index (None = default input device)
    pub device_index: Option<usize>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            config_path: Self::default_config_path(),
            model_path: "models/vosk-model-small-es-0.42".to_string(),
            sample_rate: 16000,
            frame_size: 4096,
            keywords: ["subtotal", "total", "itbms", "venta", "impuesto"]
                .map(String::from)
                .to_vec(),
            currency_words: ["dolares", "pesos", "balboas"].map(String::from).to_vec(),
            comma_output: '.',
            device_index: None,
        }
    }
}

impl SessionConfig {
    /// Load configuration from file, or create the default
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)
                .context("Failed to read config file")?;

            let mut config: SessionConfig =
                toml::from_str(&contents).context("Failed to parse config file")?;

            config.config_path = config_path;
            Ok(config)
        } else {
            let config = Self::default();
            config.save().context("Failed to save default config")?;
            Ok(config)
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(&self.config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// All non-digit words that go into the grammar vocabulary
    pub fn grammar_words(&self) -> Vec<String> {
        let mut words = self.keywords.clone();
        words.extend(self.currency_words.iter().cloned());
        words
    }

    fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("recibo")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_round_trip() {
        let config = SessionConfig::default();
        let contents = toml::to_string_pretty(&config).unwrap();
        let parsed: SessionConfig = toml::from_str(&contents).unwrap();

        assert_eq!(parsed.model_path, config.model_path);
        assert_eq!(parsed.keywords, config.keywords);
        assert_eq!(parsed.comma_output, '.');
        assert_eq!(parsed.frame_size, 4096);
    }

    #[test]
    fn test_grammar_words_union() {
        let config = SessionConfig::default();
        let words = config.grammar_words();

        assert!(words.iter().any(|w| w == "total"));
        assert!(words.iter().any(|w| w == "balboas"));
        assert_eq!(
            words.len(),
            config.keywords.len() + config.currency_words.len()
        );
    }
}
