//! Configuration management for the Italian language plugins

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// POS tagger constraints
    #[serde(default)]
    pub tagger: TaggerConfig,
    /// Prosody feature settings
    #[serde(default)]
    pub prosody: ProsodyConfig,
}

/// Tag dictionaries used by the POS sequence validator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaggerConfig {
    /// General tag dictionary (`token TAG1 TAG2 ...` per line)
    pub tag_dictionary: Option<PathBuf>,
    /// Deterministic symbols dictionary (`LABEL token1 token2 ...` per line)
    pub deterministic_dictionary: Option<PathBuf>,
}

/// Intonational end tones recognised at phrase boundaries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProsodyConfig {
    /// Boundary tones classified as phrase-final high
    pub high_endtones: Vec<String>,
    /// Boundary tones classified as phrase-final low
    pub low_endtones: Vec<String>,
}

impl Default for ProsodyConfig {
    fn default() -> Self {
        Self {
            high_endtones: ["H-", "!H-", "H-%", "H-L%", "!H-%", "H-^H%", "!H-^H%", "L-H%", "H-H%"]
                .iter()
                .map(|t| t.to_string())
                .collect(),
            low_endtones: ["L-", "L-%", "L-L%"].iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl Config {
    /// Load configuration from YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from JSON file
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Create default configuration and save to file
    pub fn create_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let dictionaries = [
            &self.tagger.tag_dictionary,
            &self.tagger.deterministic_dictionary,
        ];
        for path in dictionaries.into_iter().flatten() {
            if !path.exists() {
                return Err(Error::FileNotFound(path.display().to_string()));
            }
        }

        self.prosody.validate()
    }
}

impl ProsodyConfig {
    /// Check that tone labels are non-empty and the two sets are disjoint
    pub fn validate(&self) -> Result<()> {
        let high: HashSet<&str> = self.high_endtones.iter().map(String::as_str).collect();

        for tone in self.high_endtones.iter().chain(&self.low_endtones) {
            if tone.trim().is_empty() {
                return Err(Error::Config("End tones must not be empty".into()));
            }
        }
        if let Some(tone) = self.low_endtones.iter().find(|t| high.contains(t.as_str())) {
            return Err(Error::Config(format!(
                "End tone {} is listed as both high and low",
                tone
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.prosody.low_endtones, vec!["L-", "L-%", "L-L%"]);
        assert_eq!(config.prosody.high_endtones.len(), 9);
    }

    #[test]
    fn test_overlapping_endtones_rejected() {
        let mut config = Config::default();
        config.prosody.low_endtones.push("H-H%".into());
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_empty_endtone_rejected() {
        let mut config = ProsodyConfig::default();
        config.high_endtones.push("  ".into());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_dictionary_path() {
        let mut config = Config::default();
        config.tagger.deterministic_dictionary =
            Some(PathBuf::from("/nonexistent/tts-lang-it/det.tagdict"));
        assert!(matches!(config.validate(), Err(Error::FileNotFound(_))));
    }

    #[test]
    fn test_yaml_without_sections_uses_defaults() {
        let config: Config = serde_yaml::from_str("tagger:\n  tag_dictionary: null\n").unwrap();
        assert!(config.tagger.tag_dictionary.is_none());
        assert_eq!(config.prosody.low_endtones.len(), 3);
    }
}
