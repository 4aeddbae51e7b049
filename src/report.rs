//! Decode report and JSON export

use crate::decoder::{DecodedEntry, Timestamp};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete decode report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodeReport {
    /// Report metadata
    pub metadata: ReportMetadata,
    /// Summary statistics
    pub summary: DecodeSummary,
    /// Decoded entries in log order
    pub entries: Vec<ReportEntry>,
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Report generation timestamp
    pub generated_at: String,
    /// Application version
    pub version: String,
    /// Decoded log file
    pub source: String,
    /// Date taken from the log file name, if it follows the capture naming
    pub capture_date: Option<NaiveDate>,
}

/// Decode summary statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodeSummary {
    /// Number of entries in the report
    pub entries: usize,
    /// Total number of typed characters across all entries
    pub characters: usize,
    /// Keys dropped because the layout doesn't know them
    pub skipped_keys: usize,
}

/// Single report entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEntry {
    pub timestamp: Timestamp,
    pub text: String,
    pub skipped_keys: usize,
}

impl From<&DecodedEntry> for ReportEntry {
    fn from(entry: &DecodedEntry) -> Self {
        Self {
            timestamp: entry.timestamp,
            text: entry.text.clone(),
            skipped_keys: entry.skipped_keys,
        }
    }
}

impl DecodeReport {
    /// Build a report for the entries decoded from `source`
    pub fn new(source: &Path, capture_date: Option<NaiveDate>, entries: &[DecodedEntry]) -> Self {
        Self {
            metadata: ReportMetadata {
                generated_at: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                source: source.display().to_string(),
                capture_date,
            },
            summary: DecodeSummary {
                entries: entries.len(),
                characters: entries.iter().map(|e| e.text.chars().count()).sum(),
                skipped_keys: entries.iter().map(|e| e.skipped_keys).sum(),
            },
            entries: entries.iter().map(ReportEntry::from).collect(),
        }
    }

    /// Export report to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
