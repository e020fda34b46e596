use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};

use serde::{
    Serialize,
    Deserialize,
};

use crate::logging::default_log_level;

pub const DEFAULT_ENDPOINT_URL: &str = "https://www.gov.uk/bank-holidays.json";
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 5;

pub const ENV_ENDPOINT_URL: &str = "BANK_HOLIDAY_API";
pub const ENV_FETCH_TIMEOUT_SECS: &str = "BANK_HOLIDAY_TIMEOUT_SECS";
pub const ENV_LOG_LEVEL: &str = "BANK_HOLIDAY_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "BANK_HOLIDAY_LOG_DIR";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoint_url:       String,
    pub fetch_timeout_secs: u64,
    pub log_level:          String,
    /// Logs go to stderr when unset
    pub log_dir:            Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint_url:       DEFAULT_ENDPOINT_URL.into(),
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            log_level:          default_log_level().into(),
            log_dir:            None,
        }
    }
}

impl Config {
    /// Impure (reads file)
    ///
    /// Fields missing from the file keep their defaults
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or is not a valid config
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("cannot open config file {}", path.display()))?;

        let config: Self = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("invalid config file {}", path.display()))?;

        config.validated()
    }

    /// Impure (reads file and environment)
    ///
    /// Defaults, then the file if one is given, then the environment
    ///
    /// # Errors
    /// Returns an error if the file or an environment variable holds an invalid value
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config.with_overrides(|key| std::env::var(key).ok())
    }

    /// Pure
    ///
    /// Applies overrides looked up by environment variable name
    ///
    /// # Errors
    /// Returns an error if an override holds an invalid value
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(url) = lookup(ENV_ENDPOINT_URL) {
            self.endpoint_url = url;
        }

        if let Some(secs) = lookup(ENV_FETCH_TIMEOUT_SECS) {
            self.fetch_timeout_secs = secs.trim().parse()
                .with_context(|| format!("{ENV_FETCH_TIMEOUT_SECS} must be a whole number of seconds, got `{secs}`"))?;
        }

        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = level;
        }

        if let Some(dir) = lookup(ENV_LOG_DIR) {
            self.log_dir = Some(dir.into());
        }

        self.validated()
    }

    fn validated(self) -> Result<Self> {
        if self.endpoint_url.trim().is_empty() {
            return Err(anyhow!("endpoint_url cannot be empty"));
        }

        if self.fetch_timeout_secs == 0 {
            return Err(anyhow!("fetch_timeout_secs must be at least 1"));
        }

        Ok(self)
    }

    #[must_use] pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}
