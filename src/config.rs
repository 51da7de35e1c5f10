//! Runtime settings for the action server

use std::path::PathBuf;
use std::time::Duration;

use crate::{DEFAULT_ACTION_ADDR, DEFAULT_DB_PATH, DEFAULT_DIRECTORY_URL, LOOKUP_TIMEOUT_MS};

/// Everything the server needs from its environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base address of the doctor directory (`DOCTOR_API_BASE`)
    pub directory_url: String,
    /// SQLite file holding the audit log (`DB_PATH`)
    pub db_path: PathBuf,
    /// Address the webhook listens on
    pub addr: String,
    /// Hard bound on one directory request
    pub lookup_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            directory_url: DEFAULT_DIRECTORY_URL.to_string(),
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            addr: DEFAULT_ACTION_ADDR.to_string(),
            lookup_timeout: Duration::from_millis(LOOKUP_TIMEOUT_MS),
        }
    }
}

/// Default `RUST_LOG` filter when none is set
pub fn default_log_filter() -> &'static str {
    "clinicbot=info,tower_http=warn"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timeout_is_five_seconds() {
        assert_eq!(Config::default().lookup_timeout, Duration::from_secs(5));
    }

    #[test]
    fn default_db_is_relative_file() {
        let config = Config::default();
        assert_eq!(config.db_path, PathBuf::from("user_logs.db"));
        assert!(config.directory_url.starts_with("http://"));
    }
}
