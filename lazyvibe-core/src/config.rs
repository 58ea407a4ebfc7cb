//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/lazyvibe/config.toml`. On first
//! run the defaults are written there so users have a file to edit.
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/lazyvibe/` (~/.config/lazyvibe/)
//! - State/Logs: `$XDG_STATE_HOME/lazyvibe/` (~/.local/state/lazyvibe/)

use crate::error::{Error, Result};
use crate::types::TimeRange;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Process command-line fragment that identifies Claude Desktop's VM.
pub const DEFAULT_PROCESS_PATTERN: &str = "com.apple.Virtualization.VirtualMachine";

/// Themes understood by the dashboard, in cycling order.
pub const THEME_NAMES: [&str; 5] = ["default", "dracula", "nord", "gruvbox", "catppuccin"];

/// Returns a best-effort home directory path.
pub fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Initial theme name
    #[serde(default = "default_theme")]
    pub theme: String,

    /// Initial time range (`all`, `today`, `week`, `month`)
    #[serde(default = "default_time_range")]
    pub default_time_range: String,

    /// Draw scrollbars on list panels
    #[serde(default = "default_true")]
    pub show_scrollbar: bool,

    /// Where the telemetry comes from
    #[serde(default)]
    pub sources: SourcesConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            default_time_range: default_time_range(),
            show_scrollbar: true,
            sources: SourcesConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

fn default_theme() -> String {
    "default".to_string()
}

fn default_time_range() -> String {
    "all".to_string()
}

fn default_true() -> bool {
    true
}

/// Telemetry source locations
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SourcesConfig {
    /// Override for the Claude data directory (defaults to `~/.claude`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claude_dir: Option<PathBuf>,

    /// Command-line fragment used to find the monitored process
    #[serde(default = "default_process_pattern")]
    pub process_pattern: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            claude_dir: None,
            process_pattern: default_process_pattern(),
        }
    }
}

fn default_process_pattern() -> String {
    DEFAULT_PROCESS_PATTERN.to_string()
}

impl SourcesConfig {
    /// Resolved Claude directory, expanding a leading `~`.
    pub fn claude_dir(&self) -> PathBuf {
        match &self.claude_dir {
            Some(path) => expand_tilde(path),
            None => home_dir().join(".claude"),
        }
    }
}

fn expand_tilde(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => home_dir().join(rest),
        Err(_) => path.to_path_buf(),
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
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

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        Self::load_or_create(&Self::config_path())
    }

    /// Load `path`, writing the defaults there first if it doesn't exist
    ///
    /// Failing to write the default file is not fatal.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            return Self::load_from(path);
        }

        let config = Config::default();
        match config.save(path) {
            Ok(()) => tracing::info!("Wrote default config to {:?}", path),
            Err(e) => tracing::warn!("Could not write default config to {:?}: {}", path, e),
        }
        Ok(config)
    }

    /// Write this configuration as TOML, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        Self::parse(&content)
    }

    /// Parse and validate configuration text
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the dashboard can't act on
    pub fn validate(&self) -> Result<()> {
        if !THEME_NAMES.contains(&self.theme.as_str()) {
            return Err(Error::Config(format!(
                "unknown theme {:?} (expected one of: {})",
                self.theme,
                THEME_NAMES.join(", ")
            )));
        }
        self.time_range()?;
        if self.sources.process_pattern.trim().is_empty() {
            return Err(Error::Config(
                "sources.process_pattern must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// The configured initial time range
    pub fn time_range(&self) -> Result<TimeRange> {
        self.default_time_range
            .parse::<TimeRange>()
            .map_err(|e| Error::Config(format!("default_time_range: {}", e)))
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/lazyvibe/config.toml` (~/.config/lazyvibe/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("lazyvibe").join("config.toml")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/lazyvibe/` (~/.local/state/lazyvibe/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("lazyvibe")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme, "default");
        assert_eq!(config.time_range().unwrap(), TimeRange::All);
        assert!(config.show_scrollbar);
        assert_eq!(config.sources.process_pattern, DEFAULT_PROCESS_PATTERN);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
theme = "nord"
default_time_range = "week"
show_scrollbar = false

[sources]
claude_dir = "/tmp/claude"
process_pattern = "qemu-system"

[logging]
level = "debug"
"#;
        let config = Config::parse(toml).unwrap();
        assert_eq!(config.theme, "nord");
        assert_eq!(config.time_range().unwrap(), TimeRange::Week);
        assert!(!config.show_scrollbar);
        assert_eq!(config.sources.claude_dir(), PathBuf::from("/tmp/claude"));
        assert_eq!(config.sources.process_pattern, "qemu-system");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = Config::parse("theme = \"dracula\"\n").unwrap();
        assert_eq!(config.theme, "dracula");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.sources.process_pattern, DEFAULT_PROCESS_PATTERN);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            Config::parse("theme = \"solarized\"\n"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Config::parse("default_time_range = \"year\"\n"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Config::parse("[sources]\nprocess_pattern = \"  \"\n"),
            Err(Error::Config(_))
        ));
        assert!(matches!(Config::parse("theme = ["), Err(Error::Config(_))));
    }

    #[test]
    fn test_missing_file_writes_defaults() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("lazyvibe/config.toml");

        let config = Config::load_or_create(&path).unwrap();
        assert_eq!(config.theme, "default");
        assert!(path.exists());

        let written = Config::load_from(&path).unwrap();
        assert_eq!(written.time_range().unwrap(), TimeRange::All);
        assert_eq!(written.sources.process_pattern, DEFAULT_PROCESS_PATTERN);
        assert!(written.sources.claude_dir.is_none());
    }

    #[test]
    fn test_existing_file_is_not_overwritten() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "theme = \"gruvbox\"\n").unwrap();

        let config = Config::load_or_create(&path).unwrap();
        assert_eq!(config.theme, "gruvbox");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "theme = \"gruvbox\"\n");
    }

    #[test]
    fn test_tilde_expansion() {
        let sources = SourcesConfig {
            claude_dir: Some(PathBuf::from("~/claude-data")),
            ..Default::default()
        };
        assert_eq!(sources.claude_dir(), home_dir().join("claude-data"));
    }
}
