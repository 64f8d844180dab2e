//! Result types returned by successful conversions and engine probes.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A completed conversion.
///
/// The destination is reported as given; its existence is whatever the
/// engine left behind after exiting zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionOutput {
    /// Where the engine was told to write the DOCX file.
    pub destination: PathBuf,
    /// Non-empty stderr lines the engine printed despite succeeding
    /// (citeproc and missing-resource warnings, typically).
    pub warnings: Vec<String>,
    pub stats: ConversionStats,
}

/// Timing and size figures for one conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// UTF-8 bytes written to the temporary source file.
    pub input_bytes: usize,
    /// Wall-clock time the engine process ran.
    pub engine_duration_ms: u64,
    /// Wall-clock time of the whole attempt, temp file included.
    pub total_duration_ms: u64,
}

/// What `<engine> --version` reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineInfo {
    pub engine: PathBuf,
    /// First line of the version output, e.g. `pandoc 3.1.9`.
    pub version_line: String,
    /// Version number parsed from `version_line`, if it had one.
    pub version: Option<String>,
}

impl EngineInfo {
    /// Build from raw `--version` stdout.
    pub fn from_version_output(engine: PathBuf, stdout: &str) -> Self {
        let version_line = stdout.lines().next().unwrap_or("").trim().to_string();
        let version = version_line
            .split_whitespace()
            .nth(1)
            .filter(|v| v.starts_with(|c: char| c.is_ascii_digit()))
            .map(str::to_string);
        Self {
            engine,
            version_line,
            version,
        }
    }
}
