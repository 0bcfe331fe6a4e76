//! Dataset file loading.
//!
//! A dataset that cannot be read or parsed is batch-fatal and aborts the run
//! before any traveller is decided. A single traveller record of the wrong
//! shape is not: it is kept as a malformed traveller and rejected on its own.

use crate::config::EngineConfig;
use crate::decision::Outcome;
use crate::error::{AdmissionError, Dataset, Result};
use crate::evaluator;
use crate::types::{CountryDirectory, CountryRecord, Traveller, WatchlistEntry};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

/// Supported dataset file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    Yaml,
    Json,
}

impl DatasetFormat {
    /// Detects format from file extension.
    pub fn from_extension(path: &str) -> Option<Self> {
        if path.ends_with(".yaml") || path.ends_with(".yml") {
            Some(DatasetFormat::Yaml)
        } else if path.ends_with(".json") {
            Some(DatasetFormat::Json)
        } else {
            None
        }
    }

    /// Detects format from content.
    pub fn detect(content: &str) -> Self {
        let trimmed = content.trim_start();
        if trimmed.starts_with('{') || trimmed.starts_with('[') {
            DatasetFormat::Json
        } else {
            DatasetFormat::Yaml
        }
    }
}

/// Parses a dataset document from a string with the given format.
pub fn parse_document<T: DeserializeOwned>(
    dataset: Dataset,
    content: &str,
    format: DatasetFormat,
) -> Result<T> {
    let parsed = match format {
        DatasetFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        DatasetFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
    };

    parsed.map_err(|message| AdmissionError::DatasetParse { dataset, message })
}

/// Reads and parses one dataset file.
pub fn load_document<T: DeserializeOwned>(dataset: Dataset, path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let shown = path.display().to_string();

    if shown.trim().is_empty() {
        warn!(%dataset, "No path given for dataset");
        return Err(AdmissionError::DatasetNotFound {
            dataset,
            path: shown,
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        warn!(%dataset, path = %shown, error = %e, "Failed to read dataset");
        AdmissionError::DatasetNotFound {
            dataset,
            path: shown.clone(),
        }
    })?;

    let format = DatasetFormat::from_extension(&shown)
        .unwrap_or_else(|| DatasetFormat::detect(&content));
    debug!(%dataset, path = %shown, ?format, "Parsing dataset");

    parse_document(dataset, &content, format)
}

/// Loads the traveller entries.
pub fn load_travellers(path: impl AsRef<Path>) -> Result<Vec<Traveller>> {
    let records: Vec<serde_json::Value> = load_document(Dataset::Entries, path)?;
    Ok(records.into_iter().enumerate().map(traveller_from_value).collect())
}

/// Parses a traveller entries document, converting each record separately.
pub fn parse_travellers(content: &str, format: DatasetFormat) -> Result<Vec<Traveller>> {
    let records: Vec<serde_json::Value> = parse_document(Dataset::Entries, content, format)?;
    Ok(records.into_iter().enumerate().map(traveller_from_value).collect())
}

fn traveller_from_value((index, value): (usize, serde_json::Value)) -> Traveller {
    serde_json::from_value(value).unwrap_or_else(|e| {
        warn!(record = index, error = %e, "Malformed traveller record");
        Traveller::malformed(format!("Record {} is malformed: {}", index, e))
    })
}

/// Loads the watchlist.
pub fn load_watchlist(path: impl AsRef<Path>) -> Result<Vec<WatchlistEntry>> {
    load_document(Dataset::Watchlist, path)
}

/// Country data is either keyed by code or a list of records carrying `code`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CountriesDocument {
    Keyed(CountryDirectory),
    Listed(Vec<CountryRecord>),
}

impl CountriesDocument {
    fn into_directory(self) -> Result<CountryDirectory> {
        match self {
            CountriesDocument::Keyed(directory) => Ok(directory),
            CountriesDocument::Listed(records) => records
                .into_iter()
                .map(|record| match record.code.clone() {
                    Some(code) if !code.trim().is_empty() => Ok((code, record)),
                    _ => Err(AdmissionError::DatasetParse {
                        dataset: Dataset::Countries,
                        message: "country record without a code".to_string(),
                    }),
                })
                .collect(),
        }
    }
}

/// Loads the country directory.
pub fn load_countries(path: impl AsRef<Path>) -> Result<CountryDirectory> {
    let document: CountriesDocument = load_document(Dataset::Countries, path)?;
    document.into_directory()
}

/// All three datasets, loaded.
#[derive(Debug, Clone, Default)]
pub struct Datasets {
    pub travellers: Vec<Traveller>,
    pub watchlist: Vec<WatchlistEntry>,
    pub countries: CountryDirectory,
}

impl Datasets {
    /// Loads the datasets named in the configuration.
    pub fn load(config: &EngineConfig) -> Result<Self> {
        Self::load_paths(&config.entries, &config.watchlist, &config.countries)
    }

    /// Loads the datasets from explicit paths.
    pub fn load_paths(
        entries: impl AsRef<Path>,
        watchlist: impl AsRef<Path>,
        countries: impl AsRef<Path>,
    ) -> Result<Self> {
        Ok(Self {
            travellers: load_travellers(entries)?,
            watchlist: load_watchlist(watchlist)?,
            countries: load_countries(countries)?,
        })
    }

    /// Decides every loaded traveller.
    pub fn decide(&self, today: NaiveDate) -> Vec<Outcome> {
        evaluator::decide(&self.travellers, &self.watchlist, &self.countries, today)
    }
}

/// Loads the three dataset files and decides every traveller.
///
/// Returns the fatal load error, and no outcomes, if any file is missing or
/// malformed.
pub fn decide_files(
    entries: impl AsRef<Path>,
    watchlist: impl AsRef<Path>,
    countries: impl AsRef<Path>,
    today: NaiveDate,
) -> Result<Vec<Outcome>> {
    let datasets = Datasets::load_paths(entries, watchlist, countries)?;
    Ok(datasets.decide(today))
}
