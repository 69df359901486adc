//! Configuration file handling.
//!
//! This module provides loading and saving of vendscan configuration
//! from a TOML file.
//!
//! # Configuration Location
//!
//! The configuration file is stored at:
//! - Linux: `~/.config/vendscan/config.toml`
//! - macOS: `~/Library/Application Support/vendscan/config.toml`
//! - Windows: `%APPDATA%\vendscan\config.toml`
//!
//! # Example Configuration
//!
//! ```toml
//! vendor_dir = "_vendor"
//! default_format = "txt"
//! include_standard = false
//!
//! [ignore]
//! packages = ["github.com/me/*", "golang.org/x/sys"]
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::scanner::DEFAULT_VENDOR_DIR;

/// Application configuration.
///
/// Command-line flags take precedence over every value here.
///
/// # Example
///
/// ```no_run
/// use vendscan::Config;
///
/// let config = Config::load().unwrap();
/// println!("Vendor directory: {}", config.vendor_dir);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory name skipped while scanning.
    ///
    /// Default: "_vendor"
    pub vendor_dir: String,

    /// Output format when neither `--format` nor an output file extension
    /// selects one.
    ///
    /// Valid values: "txt", "json", "yaml", "yml", "xml"
    /// Default: "txt"
    pub default_format: String,

    /// Keep standard library packages in results.
    ///
    /// Default: false
    pub include_standard: bool,

    /// Packages to leave out of results.
    #[serde(default)]
    pub ignore: IgnoreConfig,
}

/// Import paths to suppress from scan output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IgnoreConfig {
    /// Import path patterns; `*` matches any run of characters.
    pub packages: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vendor_dir: DEFAULT_VENDOR_DIR.to_string(),
            default_format: "txt".to_string(),
            include_standard: false,
            ignore: IgnoreConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration from the config file.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`, falling back to defaults when absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Saves the configuration to the config file.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Returns the path to the configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vendscan")
            .join("config.toml")
    }

    /// Renders the effective settings, one per line.
    pub fn summary(&self) -> String {
        let ignore = if self.ignore.packages.is_empty() {
            "(none)".to_string()
        } else {
            self.ignore.packages.join(", ")
        };
        format!(
            "vendor_dir:       {}\n\
             default_format:   {}\n\
             include_standard: {}\n\
             ignore.packages:  {}",
            self.vendor_dir, self.default_format, self.include_standard, ignore
        )
    }

    /// Generates a string containing the default configuration.
    pub fn generate_default_config() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.vendor_dir, "_vendor");
        assert_eq!(config.default_format, "txt");
        assert!(!config.include_standard);
        assert!(config.ignore.packages.is_empty());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("vendor_dir = \"vendor\"\n").unwrap();

        assert_eq!(config.vendor_dir, "vendor");
        assert_eq!(config.default_format, "txt");
    }

    #[test]
    fn test_ignore_section() {
        let config: Config =
            toml::from_str("[ignore]\npackages = [\"github.com/me/*\"]\n").unwrap();
        assert_eq!(config.ignore.packages, vec!["github.com/me/*".to_string()]);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.include_standard = true;
        config.ignore.packages.push("golang.org/x/*".to_string());
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_summary_shows_effective_settings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "default_format = \"json\"\n[ignore]\npackages = [\"a/*\", \"b\"]\n",
        )
        .unwrap();

        let summary = Config::load_from(&path).unwrap().summary();
        assert_eq!(
            summary,
            "vendor_dir:       _vendor\n\
             default_format:   json\n\
             include_standard: false\n\
             ignore.packages:  a/*, b"
        );
        assert!(Config::default()
            .summary()
            .ends_with("ignore.packages:  (none)"));
    }

    #[test]
    fn test_generate_default_config() {
        let text = Config::generate_default_config();
        assert!(text.contains("vendor_dir = \"_vendor\""));
    }
}
