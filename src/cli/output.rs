//! Output formatting for multiple formats
//!
//! Classification results, version comparisons and the effective
//! configuration can be rendered as JSON, YAML or human-readable text.
//!
//! # Example
//!
//! ```ignore
//! use liberty_detect::cli::output::{OutputFormat, OutputFormatter};
//!
//! let classification = classifier.analyze(&project);
//! let formatter = OutputFormatter::new(OutputFormat::Json);
//! println!("{}", formatter.format(&classification)?);
//! ```

use anyhow::{Context, Result};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::classify::{Classification, ClassificationSource, MarkerChange};
use crate::config::DetectConfig;
use crate::version;

const RULE: &str = "\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}";

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format
    Yaml,
    /// Human-readable formatted text
    Human,
}

/// Result of comparing two version strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionComparison {
    pub left: String,
    pub right: String,
    /// `"<"`, `"="` or `">"`; absent when either side is unparseable
    pub ordering: Option<String>,
}

impl VersionComparison {
    pub fn new(left: &str, right: &str) -> Self {
        let ordering = version::compare(left, right).map(|o| {
            match o {
                Ordering::Less => "<",
                Ordering::Equal => "=",
                Ordering::Greater => ">",
            }
            .to_string()
        });

        Self {
            left: left.to_string(),
            right: right.to_string(),
            ordering,
        }
    }
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a classification according to the configured format
    pub fn format(&self, result: &Classification) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(result)
                .context("Failed to serialize classification to JSON"),
            OutputFormat::Yaml => {
                serde_yaml::to_string(result).context("Failed to serialize classification to YAML")
            }
            OutputFormat::Human => Ok(self.format_human(result)),
        }
    }

    pub fn format_comparison(&self, comparison: &VersionComparison) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(comparison)
                .context("Failed to serialize comparison to JSON"),
            OutputFormat::Yaml => {
                serde_yaml::to_string(comparison).context("Failed to serialize comparison to YAML")
            }
            OutputFormat::Human => Ok(match &comparison.ordering {
                Some(ordering) => format!("{} {} {}\n", comparison.left, ordering, comparison.right),
                None => "not comparable\n".to_string(),
            }),
        }
    }

    pub fn format_config(&self, config: &DetectConfig) -> Result<String> {
        let config_map: BTreeMap<String, String> = config.to_display_map().into_iter().collect();

        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(&config_map)
                .context("Failed to serialize config to JSON"),
            OutputFormat::Yaml => {
                serde_yaml::to_string(&config_map).context("Failed to serialize config to YAML")
            }
            OutputFormat::Human => {
                let mut output = String::new();
                output.push_str("liberty-detect Configuration\n");
                output.push_str(RULE);
                output.push_str("\n\n");
                for (key, value) in &config_map {
                    output.push_str(&format!("  {}: {}\n", key, value));
                }
                Ok(output)
            }
        }
    }

    fn format_human(&self, result: &Classification) -> String {
        let mut output = String::new();

        if result.is_liberty {
            output.push_str(&format!("\u{2713} {}: Liberty dev mode\n", result.project));
        } else {
            output.push_str(&format!("\u{26A0} {}: not a Liberty project\n", result.project));
        }
        output.push_str(RULE);
        output.push_str("\n\n");

        let build_system = result
            .build_system
            .map(|b| b.to_string())
            .unwrap_or_else(|| "(none)".to_string());
        output.push_str(&format!("Build System:  {}\n", build_system));
        if let Some(ref descriptor) = result.descriptor {
            output.push_str(&format!("Descriptor:    {}\n", descriptor.display()));
        }
        output.push('\n');

        if let Some(ref plugin) = result.plugin {
            output.push_str("Plugin:\n");
            output.push_str(&format!(
                "\u{251C}\u{2500} Coordinates: {}:{}\n",
                plugin.declaration.group_id, plugin.declaration.artifact_id
            ));
            output.push_str(&format!(
                "\u{251C}\u{2500} Version:     {}\n",
                plugin.declaration.version.as_deref().unwrap_or("(not specified)")
            ));
            output.push_str(&format!("\u{2514}\u{2500} Declared in: {}\n\n", plugin.site));
        }

        let containers = match result.supports_containers {
            Some(true) => "yes",
            Some(false) => "no",
            None => "unknown (served from marker)",
        };
        output.push_str(&format!("Container dev mode: {}\n", containers));

        let source = match result.source {
            ClassificationSource::Marker => "marker",
            ClassificationSource::Descriptor => "descriptor",
            ClassificationSource::NoDescriptor => "no build descriptor",
        };
        output.push_str(&format!("Source:             {}\n", source));

        let marker = match result.marker {
            MarkerChange::Added => "added",
            MarkerChange::Removed => "removed",
            MarkerChange::Unchanged => "unchanged",
        };
        output.push_str(&format!("Liberty nature:     {}\n", marker));

        output
    }
}
