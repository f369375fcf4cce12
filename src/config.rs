//! Generation configuration
//!
//! Configuration is merged from four layers with fixed precedence:
//! CLI flag > environment variable > config file > built-in default.

use crate::error::{Result, StampedeError};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Target language of the generated script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptLanguage {
    /// JavaScript output
    Js,
    /// TypeScript output
    Ts,
}

impl ScriptLanguage {
    /// File extension used for the generated script and step imports.
    pub fn ext(self) -> &'static str {
        match self {
            ScriptLanguage::Js => "js",
            ScriptLanguage::Ts => "ts",
        }
    }

    fn parse(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "js" => Ok(ScriptLanguage::Js),
            "ts" => Ok(ScriptLanguage::Ts),
            other => Err(StampedeError::ConfigError(format!(
                "Unsupported script language: {} (expected js or ts)",
                other
            ))),
        }
    }
}

/// Fully resolved generation configuration. Supplied wholesale to the
/// generator and never mutated by it.
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    pub language: ScriptLanguage,
    pub features_dir: String,
    pub output_dir: String,
    pub include_reporter: bool,
    /// Fallback base URL injected into browser scripts, if set
    pub base_url: Option<String>,
    pub author: String,
    pub version: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            language: ScriptLanguage::Ts,
            features_dir: "./features".to_string(),
            output_dir: "./generated".to_string(),
            include_reporter: true,
            base_url: None,
            author: String::new(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// One layer of configuration overrides (CLI flags or environment).
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub language: Option<ScriptLanguage>,
    pub features_dir: Option<String>,
    pub output_dir: Option<String>,
    pub base_url: Option<String>,
    pub include_reporter: Option<bool>,
}

impl Overrides {
    /// Read the `STAMPEDE_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let language = match env::var("STAMPEDE_LANG") {
            Ok(value) => Some(ScriptLanguage::parse(&value)?),
            Err(_) => None,
        };

        Ok(Self {
            language,
            features_dir: env::var("STAMPEDE_FEATURES").ok(),
            output_dir: env::var("STAMPEDE_OUTPUT").ok(),
            base_url: env::var("STAMPEDE_BASE_URL").ok(),
            include_reporter: None,
        })
    }
}

/// Optional `stampede.yaml` project file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub language: Option<ScriptLanguage>,

    #[serde(default)]
    pub features: Option<String>,

    #[serde(default)]
    pub output: Option<String>,

    #[serde(default, rename = "includeReporter")]
    pub include_reporter: Option<bool>,

    #[serde(default, rename = "baseUrl")]
    pub base_url: Option<String>,

    #[serde(default)]
    pub author: Option<String>,
}

impl FileConfig {
    /// Load a config file from an explicit path.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            StampedeError::ConfigError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        serde_yaml::from_str(&content).map_err(|e| {
            StampedeError::ConfigError(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Load `stampede.yaml` from the working directory, if present.
    pub fn discover() -> Result<Option<Self>> {
        let default_path = Path::new("stampede.yaml");
        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }
}

impl ProjectConfig {
    /// Resolve the configuration from all sources: an explicitly named
    /// config file (or a discovered `stampede.yaml`), the environment, and
    /// the given CLI overrides.
    pub fn from_sources(cli: Overrides, config_file: Option<&Path>) -> Result<Self> {
        let file = match config_file {
            Some(path) => Some(FileConfig::load(path)?),
            None => FileConfig::discover()?,
        };

        Ok(Self::resolve(cli, Overrides::from_env()?, file))
    }

    /// Merge the configuration layers. `cli` wins over `env`, `env` over
    /// `file`, and `file` over the built-in defaults.
    pub fn resolve(cli: Overrides, env: Overrides, file: Option<FileConfig>) -> Self {
        let defaults = Self::default();
        let file = file.unwrap_or_default();

        Self {
            language: cli
                .language
                .or(env.language)
                .or(file.language)
                .unwrap_or(defaults.language),
            features_dir: cli
                .features_dir
                .or(env.features_dir)
                .or(file.features)
                .unwrap_or(defaults.features_dir),
            output_dir: cli
                .output_dir
                .or(env.output_dir)
                .or(file.output)
                .unwrap_or(defaults.output_dir),
            include_reporter: cli
                .include_reporter
                .or(env.include_reporter)
                .or(file.include_reporter)
                .unwrap_or(defaults.include_reporter),
            base_url: cli.base_url.or(env.base_url).or(file.base_url),
            author: file.author.unwrap_or(defaults.author),
            version: defaults.version,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_cli_wins_over_env_and_file() {
        let cli = Overrides {
            language: Some(ScriptLanguage::Js),
            output_dir: Some("./cli-out".to_string()),
            ..Default::default()
        };
        let env = Overrides {
            language: Some(ScriptLanguage::Ts),
            features_dir: Some("./env-features".to_string()),
            ..Default::default()
        };
        let file = FileConfig {
            language: Some(ScriptLanguage::Ts),
            features: Some("./file-features".to_string()),
            output: Some("./file-out".to_string()),
            ..Default::default()
        };

        let config = ProjectConfig::resolve(cli, env, Some(file));

        assert_eq!(config.language, ScriptLanguage::Js);
        assert_eq!(config.output_dir, "./cli-out");
        // env beats file for the field the CLI left unset
        assert_eq!(config.features_dir, "./env-features");
    }

    #[test]
    fn test_defaults_apply_when_no_layer_sets_a_field() {
        let config = ProjectConfig::resolve(Overrides::default(), Overrides::default(), None);

        assert_eq!(config.language, ScriptLanguage::Ts);
        assert_eq!(config.features_dir, "./features");
        assert_eq!(config.output_dir, "./generated");
        assert!(config.include_reporter);
        assert!(config.base_url.is_none());
    }

    #[test]
    fn test_load_file_config() {
        let yaml = r#"
language: js
features: ./specs
output: ./build
includeReporter: false
baseUrl: https://staging.example.com
"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let config = FileConfig::load(file.path()).unwrap();
        assert_eq!(config.language, Some(ScriptLanguage::Js));
        assert_eq!(config.features.as_deref(), Some("./specs"));
        assert_eq!(config.include_reporter, Some(false));

        let resolved =
            ProjectConfig::resolve(Overrides::default(), Overrides::default(), Some(config));
        assert_eq!(resolved.output_dir, "./build");
        assert!(!resolved.include_reporter);
        assert_eq!(resolved.base_url.as_deref(), Some("https://staging.example.com"));
    }

    #[test]
    fn test_invalid_config_file_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"language: [not, a, string]").unwrap();

        let result = FileConfig::load(file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_language_ext() {
        assert_eq!(ScriptLanguage::Js.ext(), "js");
        assert_eq!(ScriptLanguage::Ts.ext(), "ts");
    }
}
