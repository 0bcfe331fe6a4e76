//! Run configuration: where the datasets live and which date to decide on.
//!
//! The admission rules themselves are fixed and not part of the configuration.

use crate::error::{AdmissionError, Dataset, Result};
use crate::parser::DatasetFormat;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for one batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Traveller entries file.
    pub entries: PathBuf,

    /// Watchlist file.
    pub watchlist: PathBuf,

    /// Country directory file.
    pub countries: PathBuf,

    /// Processing date; the local current date when absent.
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

impl EngineConfig {
    /// Creates a configuration for the three dataset paths.
    pub fn new(
        entries: impl Into<PathBuf>,
        watchlist: impl Into<PathBuf>,
        countries: impl Into<PathBuf>,
    ) -> Self {
        Self {
            entries: entries.into(),
            watchlist: watchlist.into(),
            countries: countries.into(),
            today: None,
        }
    }

    /// Sets the processing date.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Parses a configuration from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: EngineConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a configuration file, YAML or JSON.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|_| AdmissionError::DatasetNotFound {
                dataset: Dataset::Config,
                path: path.display().to_string(),
            })?;

        let format = DatasetFormat::from_extension(&path.display().to_string())
            .unwrap_or_else(|| DatasetFormat::detect(&content));
        match format {
            DatasetFormat::Yaml => Self::from_yaml(&content),
            DatasetFormat::Json => Self::from_json(&content),
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        for (name, path) in [
            ("entries", &self.entries),
            ("watchlist", &self.watchlist),
            ("countries", &self.countries),
        ] {
            if path.as_os_str().is_empty() {
                return Err(AdmissionError::ConfigError(format!("{} path is required", name)));
            }
        }
        Ok(())
    }

    /// The date travellers are decided on.
    pub fn processing_date(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}
