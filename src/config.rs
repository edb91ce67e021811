//! Runtime settings from the environment (and an optional `.env`).

use std::path::PathBuf;

pub const DATA_DIR_VAR: &str = "CICU_DATA_DIR";
pub const LOG_VAR: &str = "CICU_LOG";

const DEFAULT_DATA_DIR: &str = "./cicu-data";
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Where saved cases and presets live.
    pub data_dir: PathBuf,
    /// `env_logger` filter, e.g. `info` or `cicu_calc=debug`.
    pub log_filter: String,
}

impl Settings {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_dir = lookup(DATA_DIR_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string());
        let log_filter = lookup(LOG_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        Self {
            data_dir: PathBuf::from(data_dir),
            log_filter,
        }
    }

    /// Replace the data directory when the CLI supplied one.
    pub fn with_data_dir(mut self, dir: Option<PathBuf>) -> Self {
        if let Some(dir) = dir {
            self.data_dir = dir;
        }
        self
    }
}
