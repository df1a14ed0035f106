//! Runtime configuration loaded from the process environment.

use std::env;
use std::path::PathBuf;

/// Default upload cap: 5 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// How many row errors are embedded in a `NoValidData` message.
pub const DEFAULT_MAX_REPORTED_ERRORS: usize = 5;

#[derive(Debug, Clone)]
pub struct Config {
    pub max_upload_bytes: u64,
    pub max_reported_errors: usize,
    /// Spreadsheet to load instead of the demo dataset.
    pub data_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            max_reported_errors: DEFAULT_MAX_REPORTED_ERRORS,
            data_file: None,
        }
    }
}

impl Config {
    /// Reads `REALTY_MAX_UPLOAD_BYTES`, `REALTY_MAX_REPORTED_ERRORS` and
    /// `REALTY_DATA_FILE`. Unset or unparsable values fall back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let max_upload_bytes = env::var("REALTY_MAX_UPLOAD_BYTES")
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.max_upload_bytes);

        let max_reported_errors = env::var("REALTY_MAX_REPORTED_ERRORS")
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.max_reported_errors);

        let data_file = env::var("REALTY_DATA_FILE")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        Self {
            max_upload_bytes,
            max_reported_errors,
            data_file,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.max_upload_bytes, 5_242_880);
        assert_eq!(cfg.max_reported_errors, 5);
        assert!(cfg.data_file.is_none());
    }
}
