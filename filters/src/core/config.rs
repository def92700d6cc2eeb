use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::utils::file::expand_path;

use super::cli::CliConfig;
use super::constants::{APP_DOT_FOLDER, CONFIG_FILE_NAME, DEFAULT_MAX_INPUT_BYTES};

// =============================================================================
// Log Format Enum
// =============================================================================

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Compact => write!(f, "compact"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

// =============================================================================
// File Config (JSON)
// =============================================================================

/// Output configuration section (from JSON config file)
#[derive(Debug, Default, Clone, Deserialize)]
pub struct OutputFileConfig {
    pub pretty: Option<bool>,
    pub envelope: Option<bool>,
}

/// Input configuration section (from JSON config file)
#[derive(Debug, Default, Clone, Deserialize)]
pub struct InputFileConfig {
    pub max_bytes: Option<usize>,
}

/// File-based configuration (JSON)
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub output: Option<OutputFileConfig>,
    pub input: Option<InputFileConfig>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

impl FileConfig {
    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::trace!(config = ?config, "Parsed config file");
        Ok(config)
    }

    /// Names of top-level keys not recognized by the config schema
    fn unknown_fields(&self) -> Vec<&str> {
        match &self.extra {
            serde_json::Value::Object(map) => map.keys().map(|k| k.as_str()).collect(),
            _ => Vec::new(),
        }
    }

    /// Warn about unknown fields in the config
    fn warn_unknown_fields(&self) {
        let unknown = self.unknown_fields();
        if !unknown.is_empty() {
            tracing::warn!(
                fields = %unknown.join(", "),
                "Unknown fields in config file (possible typos)"
            );
        }
    }

    /// Merge another FileConfig into this one (other takes precedence)
    fn merge(&mut self, other: FileConfig) {
        if let Some(output) = other.output {
            let current = self.output.get_or_insert_with(OutputFileConfig::default);
            if output.pretty.is_some() {
                tracing::trace!(pretty = ?output.pretty, "Merging output.pretty");
                current.pretty = output.pretty;
            }
            if output.envelope.is_some() {
                tracing::trace!(envelope = ?output.envelope, "Merging output.envelope");
                current.envelope = output.envelope;
            }
        }

        if let Some(input) = other.input {
            let current = self.input.get_or_insert_with(InputFileConfig::default);
            if input.max_bytes.is_some() {
                tracing::trace!(max_bytes = ?input.max_bytes, "Merging input.max_bytes");
                current.max_bytes = input.max_bytes;
            }
        }
    }
}

// =============================================================================
// Resolved Config
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    pub pretty: bool,
    pub envelope: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputConfig {
    pub max_bytes: usize,
}

/// Application configuration
///
/// The log format is not part of it: logging starts before config files
/// are read, so it comes from `--log-format` / env only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub output: OutputConfig,
    pub input: InputConfig,
}

impl AppConfig {
    /// Load configuration from all sources
    ///
    /// Priority (lowest to highest):
    /// 1. Defaults
    /// 2. Profile directory config (~/.grid-filters/grid-filters.json)
    /// 3. Local directory config OR CLI-specified config path
    /// 4. CLI arguments (which include env var fallbacks via clap)
    pub fn load(cli: &CliConfig) -> Result<Self> {
        tracing::debug!("Loading application configuration");
        tracing::trace!(cli = ?cli, "CLI config");

        let mut file_config = FileConfig::default();
        let mut found_configs: Vec<String> = Vec::new();

        // 1. Load from profile dir - skip if not exists
        if let Some(profile_path) = get_profile_config_path()
            && profile_path.exists()
        {
            let profile_config = FileConfig::load_from_file(&profile_path)?;
            profile_config.warn_unknown_fields();
            file_config.merge(profile_config);
            found_configs.push(profile_path.display().to_string());
        }

        // 2. Load from CLI-specified path OR local directory
        let overlay_path = if let Some(ref path) = cli.config {
            let expanded = expand_path(&path.to_string_lossy());
            if !expanded.exists() {
                anyhow::bail!("Config file not found: {}", expanded.display());
            }
            Some(expanded)
        } else {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            if local.exists() { Some(local) } else { None }
        };

        if let Some(path) = overlay_path {
            let overlay_config = FileConfig::load_from_file(&path)?;
            overlay_config.warn_unknown_fields();
            file_config.merge(overlay_config);
            found_configs.push(path.display().to_string());
        }

        tracing::debug!(configs = ?found_configs, "Config files loaded");

        let config = Self::resolve(file_config, cli);
        tracing::debug!(config = ?config, "Configuration resolved");
        Ok(config)
    }

    /// Layer configs: defaults -> file config -> CLI/env overrides
    pub fn resolve(file_config: FileConfig, cli: &CliConfig) -> Self {
        let file_output = file_config.output.unwrap_or_default();
        let file_input = file_config.input.unwrap_or_default();

        let pretty = cli.pretty.or(file_output.pretty).unwrap_or(false);
        let envelope = cli.envelope.or(file_output.envelope).unwrap_or(false);

        let max_bytes = cli
            .max_input_bytes
            .or(file_input.max_bytes)
            .unwrap_or(DEFAULT_MAX_INPUT_BYTES);

        Self {
            output: OutputConfig { pretty, envelope },
            input: InputConfig { max_bytes },
        }
    }
}

/// Profile config path (~/.grid-filters/grid-filters.json)
fn get_profile_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(APP_DOT_FOLDER).join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_log_format_serde() {
        let format: LogFormat = serde_json::from_str(r#""json""#).unwrap();
        assert_eq!(format, LogFormat::Json);
        let format: LogFormat = serde_json::from_str(r#""compact""#).unwrap();
        assert_eq!(format, LogFormat::Compact);
    }

    #[test]
    fn test_log_format_display() {
        assert_eq!(LogFormat::Compact.to_string(), "compact");
        assert_eq!(LogFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_file_config_parse_full() {
        let json = r#"{
            "output": { "pretty": true, "envelope": true },
            "input": { "max_bytes": 2048 }
        }"#;
        let config: FileConfig = serde_json::from_str(json).unwrap();

        let output = config.output.as_ref().unwrap();
        assert_eq!(output.pretty, Some(true));
        assert_eq!(output.envelope, Some(true));
        assert_eq!(config.input.as_ref().unwrap().max_bytes, Some(2048));
        assert!(config.unknown_fields().is_empty());
    }

    #[test]
    fn test_file_config_unknown_fields() {
        let json = r#"{ "ouput": { "pretty": true }, "input": {} }"#;
        let config: FileConfig = serde_json::from_str(json).unwrap();
        assert!(config.output.is_none());
        assert_eq!(config.unknown_fields(), vec!["ouput"]);
    }

    #[test]
    fn test_merge_other_takes_precedence() {
        let mut base: FileConfig =
            serde_json::from_str(r#"{ "output": { "pretty": true, "envelope": true } }"#)
                .unwrap();
        let overlay: FileConfig = serde_json::from_str(
            r#"{ "output": { "envelope": false }, "input": { "max_bytes": 10 } }"#,
        )
        .unwrap();
        base.merge(overlay);

        let output = base.output.unwrap();
        assert_eq!(output.pretty, Some(true));
        assert_eq!(output.envelope, Some(false));
        assert_eq!(base.input.unwrap().max_bytes, Some(10));
    }

    #[test]
    fn test_resolve_defaults() {
        let config = AppConfig::resolve(FileConfig::default(), &CliConfig::default());
        assert!(!config.output.pretty);
        assert!(!config.output.envelope);
        assert_eq!(config.input.max_bytes, DEFAULT_MAX_INPUT_BYTES);
    }

    #[test]
    fn test_resolve_cli_overrides_file() {
        let file: FileConfig =
            serde_json::from_str(r#"{ "input": { "max_bytes": 100 } }"#).unwrap();
        let cli = CliConfig {
            pretty: Some(true),
            max_input_bytes: Some(500),
            ..Default::default()
        };
        let config = AppConfig::resolve(file, &cli);
        assert!(config.output.pretty);
        assert_eq!(config.input.max_bytes, 500);
    }

    #[test]
    fn test_resolve_file_enables_envelope() {
        let file: FileConfig =
            serde_json::from_str(r#"{ "output": { "envelope": true } }"#).unwrap();
        let config = AppConfig::resolve(file, &CliConfig::default());
        assert!(config.output.envelope);
    }

    #[test]
    fn test_resolve_cli_false_overrides_file_true() {
        let file: FileConfig =
            serde_json::from_str(r#"{ "output": { "pretty": true, "envelope": true } }"#)
                .unwrap();
        let cli = CliConfig {
            envelope: Some(false),
            ..Default::default()
        };
        let config = AppConfig::resolve(file, &cli);
        assert!(!config.output.envelope);
        assert!(config.output.pretty);
    }

    #[test]
    fn test_load_from_cli_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "output": {{ "pretty": true }}, "input": {{ "max_bytes": 42 }} }}"#)
            .unwrap();

        let cli = CliConfig {
            config: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        let config = AppConfig::load(&cli).unwrap();
        assert!(config.output.pretty);
        assert_eq!(config.input.max_bytes, 42);
    }

    #[test]
    fn test_load_missing_cli_path() {
        let cli = CliConfig {
            config: Some(PathBuf::from("/nonexistent/grid-filters-test.json")),
            ..Default::default()
        };
        let err = AppConfig::load(&cli).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_load_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let cli = CliConfig {
            config: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        let err = AppConfig::load(&cli).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
