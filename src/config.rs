//! Runtime configuration from environment variables.
//!
//! Supported:
//! - `CARDIOCHECK_LOG_MODE` = `auto` | `stdout` | `stderr` | `file`
//! - `CARDIOCHECK_LOG_FILE` (used when logging to a file)
//! - `CARDIOCHECK_ROSTER_PATH` (default roster for `roster` / `patient`)
//! - `CARDIOCHECK_OUTPUT` = `text` | `json`
//! - `CARDIOCHECK_SANITIZE_MAX_BYTES` (read by `adapters::sanitize`)
//!
//! Unrecognized or empty values fall back to defaults.

use std::path::PathBuf;

pub const LOG_MODE_ENV: &str = "CARDIOCHECK_LOG_MODE";
pub const LOG_FILE_ENV: &str = "CARDIOCHECK_LOG_FILE";
pub const ROSTER_PATH_ENV: &str = "CARDIOCHECK_ROSTER_PATH";
pub const OUTPUT_ENV: &str = "CARDIOCHECK_OUTPUT";
pub const SANITIZE_MAX_BYTES_ENV: &str = "CARDIOCHECK_SANITIZE_MAX_BYTES";

pub const DEFAULT_LOG_FILE: &str = "cardiocheck.log";
pub const DEFAULT_ROSTER_PATH: &str = "fixtures/patients.json";

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogMode {
    /// stderr, keeping stdout clean for reports
    #[default]
    Auto,
    Stdout,
    Stderr,
    File,
}

impl LogMode {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "stdout" => Some(Self::Stdout),
            "stderr" => Some(Self::Stderr),
            "file" => Some(Self::File),
            _ => None,
        }
    }
}

/// Report format on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub log_mode: LogMode,
    pub log_file: PathBuf,
    pub roster_path: PathBuf,
    pub output: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_mode: LogMode::default(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            roster_path: PathBuf::from(DEFAULT_ROSTER_PATH),
            output: OutputFormat::default(),
        }
    }
}

impl Settings {
    /// Load settings from the process environment (best-effort).
    #[must_use]
    pub fn from_env_or_default() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary key lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(mode) = non_empty(LOG_MODE_ENV).as_deref().and_then(LogMode::parse) {
            cfg.log_mode = mode;
        }
        if let Some(path) = non_empty(LOG_FILE_ENV) {
            cfg.log_file = PathBuf::from(path);
        }
        if let Some(path) = non_empty(ROSTER_PATH_ENV) {
            cfg.roster_path = PathBuf::from(path);
        }
        if let Some(output) = non_empty(OUTPUT_ENV).as_deref().and_then(OutputFormat::parse) {
            cfg.output = output;
        }

        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let cfg = Settings::from_lookup(lookup(&[]));
        assert_eq!(cfg, Settings::default());
        assert_eq!(cfg.log_mode, LogMode::Auto);
        assert_eq!(cfg.output, OutputFormat::Text);
    }

    #[test]
    fn test_overrides() {
        let cfg = Settings::from_lookup(lookup(&[
            (LOG_MODE_ENV, "FILE"),
            (LOG_FILE_ENV, "/tmp/cc.log"),
            (ROSTER_PATH_ENV, "roster.json"),
            (OUTPUT_ENV, "json"),
        ]));
        assert_eq!(cfg.log_mode, LogMode::File);
        assert_eq!(cfg.log_file, PathBuf::from("/tmp/cc.log"));
        assert_eq!(cfg.roster_path, PathBuf::from("roster.json"));
        assert_eq!(cfg.output, OutputFormat::Json);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let cfg = Settings::from_lookup(lookup(&[
            (LOG_MODE_ENV, "syslog"),
            (OUTPUT_ENV, "xml"),
            (ROSTER_PATH_ENV, "   "),
        ]));
        assert_eq!(cfg, Settings::default());
    }
}
