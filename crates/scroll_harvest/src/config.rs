use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use scroll_harvest_engine::{
    FetchSettings, DEFAULT_CODENAME_SELECTOR, DEFAULT_ITEM_DELAY, DEFAULT_ITEM_SELECTOR,
    DEFAULT_QUIET_PERIOD,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cli::Args;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Tool settings. Every field has a default so a config file may list only
/// what it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarvestConfig {
    pub item_selector: String,
    pub codename_selector: String,
    pub item_delay_ms: u64,
    pub quiet_period_ms: u64,
    pub poll_interval_ms: u64,
    pub idle_polls: u32,
    pub output_dir: Option<PathBuf>,
    pub export_filename: String,
    pub request_timeout_ms: u64,
    pub max_page_bytes: u64,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        Self {
            item_selector: DEFAULT_ITEM_SELECTOR.to_string(),
            codename_selector: DEFAULT_CODENAME_SELECTOR.to_string(),
            item_delay_ms: DEFAULT_ITEM_DELAY.as_millis() as u64,
            quiet_period_ms: DEFAULT_QUIET_PERIOD.as_millis() as u64,
            poll_interval_ms: 1_000,
            idle_polls: 30,
            output_dir: None,
            export_filename: "results.json".to_string(),
            request_timeout_ms: fetch.request_timeout.as_millis() as u64,
            max_page_bytes: fetch.max_bytes,
        }
    }
}

impl HarvestConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(text: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(text)
    }

    /// Load the file named by `--config` (if any) and apply flag overrides.
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_overrides(args);
        Ok(config)
    }

    pub fn apply_overrides(&mut self, args: &Args) {
        if let Some(ms) = args.poll_ms {
            self.poll_interval_ms = ms;
        }
        if let Some(ms) = args.quiet_ms {
            self.quiet_period_ms = ms;
        }
        if let Some(ms) = args.item_delay_ms {
            self.item_delay_ms = ms;
        }
        if let Some(polls) = args.idle_polls {
            self.idle_polls = polls;
        }
        if let Some(dir) = &args.output {
            self.output_dir = Some(dir.clone());
        }
    }

    pub fn item_delay(&self) -> Duration {
        Duration::from_millis(self.item_delay_ms)
    }

    pub fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.quiet_period_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        // A zero interval would make tokio's interval panic.
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            max_bytes: self.max_page_bytes,
            ..FetchSettings::default()
        }
    }
}
