use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_PROVIDER: &str = "openai";
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_RECAP_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TOPIC_MODEL: &str = "gpt-3.5-turbo";

const CONFIG_FILE_PATH: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Settings for the upstream chat-completion API.
///
/// A missing (or blank) `api_key` is not an error: it switches both generators
/// into their deterministic no-provider mode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LlmSettings {
    pub api_key: Option<String>,
    pub provider: String,
    pub api_base: String,
    pub recap_model: String,
    pub topic_model: String,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            provider: DEFAULT_PROVIDER.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            recap_model: DEFAULT_RECAP_MODEL.to_string(),
            topic_model: DEFAULT_TOPIC_MODEL.to_string(),
        }
    }
}

impl LlmSettings {
    /// The configured API key, if it is present and not blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = provider.into();
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub llm: LlmSettings,
}

impl Config {
    /// Load from `config.toml` in the working directory (when present) and the
    /// process environment.
    pub fn new() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    /// Load from an explicit file, or `config.toml` when `path` is `None`, then
    /// apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(CONFIG_FILE_PATH).exists() => {
                Self::from_file(Path::new(CONFIG_FILE_PATH))?
            }
            None => Config::default(),
        };

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str::<Config>(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Environment variables:
    /// - `LLM_API_KEY`
    /// - `LLM_PROVIDER` (only `openai` is usable)
    /// - `LLM_API_BASE`
    /// - `LLM_MODEL` (recap model)
    /// - `LLM_TOPIC_MODEL`
    fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(api_key) = lookup("LLM_API_KEY") {
            self.llm.api_key = Some(api_key);
        }
        if let Some(provider) = lookup("LLM_PROVIDER") {
            self.llm.provider = provider;
        }
        if let Some(api_base) = lookup("LLM_API_BASE") {
            self.llm.api_base = api_base;
        }
        if let Some(model) = lookup("LLM_MODEL") {
            self.llm.recap_model = model;
        }
        if let Some(model) = lookup("LLM_TOPIC_MODEL") {
            self.llm.topic_model = model;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn defaults_point_at_openai() {
        let settings = LlmSettings::default();
        assert_eq!(settings.provider, "openai");
        assert_eq!(settings.api_base, "https://api.openai.com/v1");
        assert_eq!(settings.recap_model, "gpt-4o-mini");
        assert_eq!(settings.topic_model, "gpt-3.5-turbo");
        assert!(settings.api_key().is_none());
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let settings = LlmSettings::default().with_api_key("   ");
        assert!(settings.api_key().is_none());

        let settings = LlmSettings::default().with_api_key(" sk-test ");
        assert_eq!(settings.api_key(), Some("sk-test"));
    }

    #[test]
    fn env_overrides_file_values() {
        let mut config = Config::default();
        let env: HashMap<&str, &str> = [
            ("LLM_API_KEY", "sk-env"),
            ("LLM_PROVIDER", "anthropic"),
            ("LLM_TOPIC_MODEL", "gpt-4o-mini"),
        ]
        .into_iter()
        .collect();

        config.apply_env(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.llm.api_key(), Some("sk-env"));
        assert_eq!(config.llm.provider, "anthropic");
        assert_eq!(config.llm.topic_model, "gpt-4o-mini");
        assert_eq!(config.llm.recap_model, DEFAULT_RECAP_MODEL);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[llm]\napi_key = \"sk-file\"\nrecap_model = \"gpt-4o\"").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.llm.api_key(), Some("sk-file"));
        assert_eq!(config.llm.recap_model, "gpt-4o");
        assert_eq!(config.llm.provider, DEFAULT_PROVIDER);
        assert_eq!(config.llm.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[llm\napi_key = ").unwrap();

        match Config::from_file(file.path()) {
            Err(ConfigError::Parse { .. }) => {}
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
