//! Rendering of scan results.
//!
//! Package lists can be written as plain text (one path per line), JSON,
//! YAML or XML. [`cli`] renders the human-readable scan summary.

pub mod cli;
mod json;
mod xml;
mod yaml;

pub use cli::{print_summary, render_summary};

use crate::error::FormatError;
use crate::model::PackageList;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Output format for package lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One import path per line
    Txt,
    /// Indented JSON array
    Json,
    /// YAML block sequence
    Yaml,
    /// Sequence of `<string>` elements
    Xml,
}

impl std::str::FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "txt" | "text" => Ok(OutputFormat::Txt),
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "xml" => Ok(OutputFormat::Xml),
            _ => Err(FormatError::Unsupported(s.to_string())),
        }
    }
}

impl OutputFormat {
    /// Picks the output format.
    ///
    /// An explicit `format` wins. Without one, the extension of `file` decides,
    /// and with neither the format is plain text.
    pub fn resolve(format: Option<&str>, file: Option<&Path>) -> Result<Self, FormatError> {
        if let Some(format) = format.filter(|f| !f.is_empty()) {
            return format.parse();
        }

        match file {
            Some(file) => file
                .extension()
                .and_then(|ext| ext.to_str())
                .unwrap_or_default()
                .parse(),
            None => Ok(OutputFormat::Txt),
        }
    }
}

/// Renders `packages` in `format`.
pub fn format_packages(packages: &PackageList, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Txt => Ok(packages.iter().map(|p| format!("{}\n", p)).collect()),
        OutputFormat::Json => json::generate_json_string(packages),
        OutputFormat::Yaml => yaml::generate_yaml_string(packages),
        OutputFormat::Xml => Ok(xml::generate_xml_string(packages)),
    }
}

/// Writes `packages` to `file`, or to stdout when no file is given.
pub fn write_packages(
    packages: &PackageList,
    format: OutputFormat,
    file: Option<&Path>,
) -> Result<()> {
    let rendered = format_packages(packages, format)?;

    match file {
        Some(path) => fs::write(path, rendered)
            .with_context(|| format!("Failed to write results to {}", path.display())),
        None => {
            print!("{}", rendered);
            Ok(())
        }
    }
}
