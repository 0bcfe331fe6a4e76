//! Reference data a batch of travellers is screened against.

use crate::types::{CountryDirectory, CountryRecord, Traveller, WatchlistEntry};
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

/// Why a traveller matched the watchlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchlistMatch {
    Passport,
    Name,
}

impl WatchlistMatch {
    pub fn as_str(&self) -> &'static str {
        match self {
            WatchlistMatch::Passport => "passport",
            WatchlistMatch::Name => "name",
        }
    }
}

/// Prepared watchlist, country directory and processing date.
///
/// Country codes and passports are upper-cased once here so every lookup is
/// case-insensitive. The source datasets are only read.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    watchlist: Vec<WatchlistEntry>,
    watched_passports: HashSet<String>,
    countries: HashMap<String, CountryRecord>,
    today: NaiveDate,
}

impl ReferenceData {
    /// Builds reference data from the watchlist and country directory.
    pub fn new(watchlist: &[WatchlistEntry], countries: &CountryDirectory, today: NaiveDate) -> Self {
        let watched_passports = watchlist
            .iter()
            .map(|entry| entry.passport.trim().to_uppercase())
            .filter(|passport| !passport.is_empty())
            .collect();

        let countries = countries
            .iter()
            .map(|(code, record)| (code.trim().to_uppercase(), record.clone()))
            .collect();

        Self {
            watchlist: watchlist.to_vec(),
            watched_passports,
            countries,
            today,
        }
    }

    /// The processing date.
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Looks up a country by code, case-insensitively.
    pub fn country(&self, code: &str) -> Option<&CountryRecord> {
        self.countries.get(&code.trim().to_uppercase())
    }

    pub fn country_count(&self) -> usize {
        self.countries.len()
    }

    pub fn watchlist_len(&self) -> usize {
        self.watchlist.len()
    }

    /// Checks a traveller against the watchlist.
    ///
    /// A passport match wins over a name match; a name match needs both first
    /// and last name to be equal on the same entry.
    pub fn watchlist_match(&self, traveller: &Traveller) -> Option<WatchlistMatch> {
        if let Some(passport) = traveller.passport_number() {
            if self.watched_passports.contains(&passport) {
                return Some(WatchlistMatch::Passport);
            }
        }

        let first = traveller.first_name.as_deref().map(str::trim)?;
        let last = traveller.last_name.as_deref().map(str::trim)?;
        if first.is_empty() || last.is_empty() {
            return None;
        }

        self.watchlist
            .iter()
            .any(|entry| entry.first_name.trim() == first && entry.last_name.trim() == last)
            .then_some(WatchlistMatch::Name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Location;

    fn create_reference_data() -> ReferenceData {
        let watchlist = vec![
            WatchlistEntry::new("abcde-fghij-klmno-pqrst-uvwxy", "Ann", "Archer"),
            WatchlistEntry::new("", "Bob", "Baker"),
        ];
        let mut countries = CountryDirectory::new();
        countries.insert(
            "luG".to_string(),
            CountryRecord {
                medical_advisory: "TB".to_string(),
                ..Default::default()
            },
        );
        ReferenceData::new(&watchlist, &countries, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap())
    }

    fn traveller(passport: &str, first: &str, last: &str) -> Traveller {
        Traveller {
            first_name: Some(first.to_string()),
            last_name: Some(last.to_string()),
            passport: Some(passport.to_string()),
            home: Some(Location::country("KAN")),
            ..Default::default()
        }
    }

    #[test]
    fn test_country_lookup_case_insensitive() {
        let data = create_reference_data();
        assert!(data.country("lug").is_some());
        assert!(data.country("LUG").is_some());
        assert!(data.country("KAN").is_none());
    }

    #[test]
    fn test_watchlist_passport_match() {
        let data = create_reference_data();
        let t = traveller("ABCDE-FGHIJ-KLMNO-PQRST-UVWXY", "Zed", "Zulu");
        assert_eq!(data.watchlist_match(&t), Some(WatchlistMatch::Passport));
    }

    #[test]
    fn test_watchlist_name_match_needs_both_names() {
        let data = create_reference_data();
        let t = traveller("11111-22222-33333-44444-55555", "Bob", "Baker");
        assert_eq!(data.watchlist_match(&t), Some(WatchlistMatch::Name));

        let t = traveller("11111-22222-33333-44444-55555", "Bob", "Archer");
        assert_eq!(data.watchlist_match(&t), None);
    }

    #[test]
    fn test_empty_watchlist_passport_never_matches() {
        let data = create_reference_data();
        let t = traveller("", "Carl", "Cole");
        assert_eq!(data.watchlist_match(&t), None);
    }
}
