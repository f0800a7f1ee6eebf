//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure
//! - [`ReportFormat`] - report output format options
//!
//! `ReportFormat` is usable outside of CLI context: it converts to and from
//! strings and knows its file extension.

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

/// Analyse a WhatsApp chat export: message counts, word and emoji
/// frequencies, and activity timelines, for the whole chat or one
/// participant.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatscope")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatscope chat.txt
    chatscope chat.txt --user Alice
    chatscope chat.txt --format json -o report.json
    chatscope chat.txt --export-records records.csv
    chatscope chat.txt --list-users")]
pub struct Args {
    /// Path to the exported chat text file
    pub input: String,

    /// Participant to analyse ("Overall" analyses the whole chat)
    #[arg(short, long, default_value = "Overall")]
    pub user: String,

    /// Report format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: ReportFormat,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Also export the parsed record table as CSV to this path
    #[arg(long, value_name = "PATH")]
    pub export_records: Option<String>,

    /// List the participants found in the export and exit
    #[arg(long)]
    pub list_users: bool,
}

/// Report output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable console report (default)
    #[default]
    Text,

    /// Machine-readable JSON report
    Json,
}

impl ReportFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Json => "json",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["text", "json"]
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "text"),
            ReportFormat::Json => write!(f, "JSON"),
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                ReportFormat::all_names().join(", ")
            )),
        }
    }
}
