//! Core record types for the admission engine.
//!
//! Every traveller field is optional at the type level: a record with a
//! missing or empty field still deserializes and is rejected on its own,
//! without failing the rest of the batch. A record whose fields have the
//! wrong type is carried as a malformed traveller instead.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Country code of Kanadia.
pub const HOME_COUNTRY_CODE: &str = "KAN";

/// A city/region/country triple (`home`, `from` and `via` in a traveller record).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl Location {
    /// Creates a location with only a country code.
    pub fn country(code: impl Into<String>) -> Self {
        Self {
            city: None,
            region: None,
            country: Some(code.into()),
        }
    }

    /// Returns the upper-cased country code, if present and non-blank.
    pub fn country_code(&self) -> Option<String> {
        self.country
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(str::to_uppercase)
    }
}

/// A visa held by a traveller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visa {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

impl Visa {
    pub fn new(code: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            date: Some(date.into()),
        }
    }

    /// Returns the visa code if present and non-blank.
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref().map(str::trim).filter(|code| !code.is_empty())
    }
}

/// Declared purpose of travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryReason {
    Returning,
    Visit,
    Transit,
}

impl EntryReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryReason::Returning => "returning",
            EntryReason::Visit => "visit",
            EntryReason::Transit => "transit",
        }
    }

    /// Parses an entry reason case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "returning" => Some(EntryReason::Returning),
            "visit" => Some(EntryReason::Visit),
            "transit" => Some(EntryReason::Transit),
            _ => None,
        }
    }
}

/// One traveller record from the entries dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Traveller {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub passport: Option<String>,
    #[serde(default)]
    pub home: Option<Location>,
    #[serde(default)]
    pub from: Option<Location>,
    #[serde(default)]
    pub via: Option<Location>,
    #[serde(default)]
    pub entry_reason: Option<String>,
    #[serde(default)]
    pub visa: Option<Visa>,

    /// Set when the source record could not be read as a traveller.
    #[serde(skip)]
    pub malformed: Option<String>,
}

impl Traveller {
    /// A traveller standing in for an unreadable source record.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self {
            malformed: Some(reason.into()),
            ..Default::default()
        }
    }

    /// Upper-cased home country code.
    pub fn home_country(&self) -> Option<String> {
        self.home.as_ref().and_then(Location::country_code)
    }

    /// Upper-cased country the traveller arrives from: `from`, else `via`.
    pub fn origin_country(&self) -> Option<String> {
        self.from
            .as_ref()
            .and_then(Location::country_code)
            .or_else(|| self.via.as_ref().and_then(Location::country_code))
    }

    /// Upper-cased passport number.
    pub fn passport_number(&self) -> Option<String> {
        self.passport
            .as_deref()
            .map(str::trim)
            .filter(|passport| !passport.is_empty())
            .map(str::to_uppercase)
    }

    pub fn entry_reason(&self) -> Option<EntryReason> {
        self.entry_reason.as_deref().and_then(EntryReason::parse)
    }
}

/// One person on the watchlist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchlistEntry {
    #[serde(default)]
    pub passport: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl WatchlistEntry {
    pub fn new(
        passport: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            passport: passport.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

/// Entry requirements of one country.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRecord {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub visitor_visa_required: String,
    #[serde(default)]
    pub transit_visa_required: String,
    #[serde(default)]
    pub medical_advisory: String,
}

impl CountryRecord {
    pub fn requires_visitor_visa(&self) -> bool {
        self.visitor_visa_required.trim() == "1"
    }

    pub fn requires_transit_visa(&self) -> bool {
        self.transit_visa_required.trim() == "1"
    }

    /// True when either visa kind is required for nationals of this country.
    pub fn requires_visa(&self) -> bool {
        self.requires_visitor_visa() || self.requires_transit_visa()
    }

    pub fn has_medical_advisory(&self) -> bool {
        !self.medical_advisory.trim().is_empty()
    }
}

/// Country directory as it appears in the source data: code -> requirements.
pub type CountryDirectory = HashMap<String, CountryRecord>;
