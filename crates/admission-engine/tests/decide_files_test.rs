use admission_engine::error::Dataset;
use admission_engine::{decide_files, AdmissionError, Datasets, EngineConfig, Outcome};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const COUNTRIES: &str = r#"{
    "KAN": {"code": "KAN", "name": "Kanadia", "visitor_visa_required": "0",
            "transit_visa_required": "0", "medical_advisory": ""},
    "ELE": {"code": "ELE", "name": "Eleventa", "visitor_visa_required": "0",
            "transit_visa_required": "0", "medical_advisory": "CHICKEN POX"},
    "LUG": {"code": "LUG", "name": "Democratic Republic of Lungary", "visitor_visa_required": "1",
            "transit_visa_required": "0", "medical_advisory": ""},
    "GON": {"code": "GON", "name": "Gondor", "visitor_visa_required": "0",
            "transit_visa_required": "0", "medical_advisory": ""}
}"#;

const WATCHLIST: &str = r#"[
    {"passport": "EWPWD-YCXTL-VCDZH-4ISSV-8EBLD", "first_name": "Mitchell", "last_name": "Hudson"},
    {"passport": "", "first_name": "Sarah", "last_name": "Fox"}
]"#;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn fixture(entries: &str) -> (TempDir, PathBuf, PathBuf, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let entries = write(temp_dir.path(), "entries.json", entries);
    let watchlist = write(temp_dir.path(), "watchlist.json", WATCHLIST);
    let countries = write(temp_dir.path(), "countries.json", COUNTRIES);
    (temp_dir, entries, watchlist, countries)
}

#[test]
fn test_returning_citizens_accepted() {
    let (_dir, entries, watchlist, countries) = fixture(
        r#"[
        {"passport": "JMZ0S-89IA9-OTCLY-MQILJ-P7CTY", "first_name": "ELIZABETH", "last_name": "ASHER",
         "birth_date": "1952-12-25", "home": {"city": "Bala", "region": "ON", "country": "KAN"},
         "entry_reason": "returning", "from": {"city": "Blumenstadt", "region": "GON", "country": "GON"}},
        {"passport": "A0XBC-8SAL1-99LKI-MS9IQ-6TGGH", "first_name": "AARON", "last_name": "ZIMMERMAN",
         "birth_date": "1965-03-17", "home": {"city": "Bala", "region": "ON", "country": "KAN"},
         "entry_reason": "returning", "via": {"city": "Blumenstadt", "region": "GON", "country": "GON"}}
    ]"#,
    );

    let outcomes = decide_files(&entries, &watchlist, &countries, today()).unwrap();
    assert_eq!(outcomes, vec![Outcome::Accept, Outcome::Accept]);
}

#[test]
fn test_mixed_batch() {
    let (_dir, entries, watchlist, countries) = fixture(
        r#"[
        {"passport": "ewpwd-ycxtl-vcdzh-4issv-8ebld", "first_name": "Jo", "last_name": "Lee",
         "birth_date": "1970-01-01", "home": {"country": "kan"}, "entry_reason": "returning",
         "from": {"country": "gon"}},
        {"passport": "JMZ0S-89IA9-OTCLY-MQILJ-P7CTY", "first_name": "Sarah", "last_name": "Fox",
         "birth_date": "1970-01-01", "home": {"country": "KAN"}, "entry_reason": "returning",
         "from": {"country": "ELE"}},
        {"passport": "JMZ0S-89IA9-OTCLY-MQILJ", "first_name": "Sarah", "last_name": "Fox",
         "birth_date": "1970-01-01", "home": {"country": "KAN"}, "entry_reason": "returning",
         "from": {"country": "GON"}},
        {"passport": "JMZ0S-89IA9-OTCLY-MQILJ-P7CTY", "first_name": "Ivo", "last_name": "Tal",
         "birth_date": "1970-01-01", "home": {"country": "LUG"}, "entry_reason": "visit",
         "from": {"country": "LUG"}, "visa": {"code": "CFR6X-XSMVA", "date": "2026-01-01"}},
        {"passport": "JMZ0S-89IA9-OTCLY-MQILJ-P7CTY", "first_name": "Ivo", "last_name": "Tal",
         "birth_date": "1970-01-01", "home": {"country": "LUG"}, "entry_reason": "visit",
         "from": {"country": "LUG"}, "visa": {"code": "CFR6X-XSMVA", "date": "2020-01-01"}},
        {"first_name": "No", "last_name": "Route", "home": {"country": "KAN"}}
    ]"#,
    );

    let outcomes = decide_files(&entries, &watchlist, &countries, today()).unwrap();
    assert_eq!(
        outcomes,
        vec![
            Outcome::Secondary,
            Outcome::Quarantine,
            Outcome::Reject,
            Outcome::Accept,
            Outcome::Reject,
            Outcome::Reject,
        ]
    );
}

#[test]
fn test_wrong_typed_record_rejected_alone() {
    let (_dir, entries, watchlist, countries) = fixture(
        r#"[
        {"passport": "JMZ0S-89IA9-OTCLY-MQILJ-P7CTY", "first_name": "ELIZABETH", "last_name": "ASHER",
         "birth_date": "1952-12-25", "home": {"country": "KAN"}, "entry_reason": "returning",
         "from": {"country": "GON"}},
        {"passport": "JMZ0S-89IA9-OTCLY-MQILJ-P7CTY", "first_name": "AARON", "last_name": "ZIMMERMAN",
         "birth_date": 19800305, "home": {"country": "KAN"}, "entry_reason": "returning",
         "from": {"country": "GON"}},
        {"passport": "JMZ0S-89IA9-OTCLY-MQILJ-P7CTY", "first_name": "AARON", "last_name": "ZIMMERMAN",
         "birth_date": "1980-03-05", "home": "KAN", "entry_reason": "returning",
         "from": {"country": "GON"}},
        42,
        {"passport": "A0XBC-8SAL1-99LKI-MS9IQ-6TGGH", "first_name": "Mitchell", "last_name": "Hudson",
         "birth_date": "1965-03-17", "home": {"country": "KAN"}, "entry_reason": "returning",
         "via": {"country": "GON"}}
    ]"#,
    );

    let outcomes = decide_files(&entries, &watchlist, &countries, today()).unwrap();
    assert_eq!(
        outcomes,
        vec![
            Outcome::Accept,
            Outcome::Reject,
            Outcome::Reject,
            Outcome::Reject,
            Outcome::Secondary,
        ]
    );
}

#[test]
fn test_missing_watchlist_is_fatal() {
    let (dir, entries, _watchlist, countries) = fixture("[]");
    let missing = dir.path().join("no_such_watchlist.json");

    let err = decide_files(&entries, &missing, &countries, today()).unwrap_err();
    assert!(err.is_batch_fatal());
    assert!(matches!(
        err,
        AdmissionError::DatasetNotFound {
            dataset: Dataset::Watchlist,
            ..
        }
    ));

    let err = decide_files(&entries, "", &countries, today()).unwrap_err();
    assert!(err.is_batch_fatal());
}

#[test]
fn test_unparsable_countries_is_fatal() {
    let (dir, entries, watchlist, _countries) = fixture("[]");
    let broken = write(dir.path(), "broken.json", "{\"KAN\": ");

    let err = decide_files(&entries, &watchlist, &broken, today()).unwrap_err();
    assert!(matches!(
        err,
        AdmissionError::DatasetParse {
            dataset: Dataset::Countries,
            ..
        }
    ));
}

#[test]
fn test_yaml_datasets_and_config() {
    let temp_dir = TempDir::new().unwrap();
    let entries = write(
        temp_dir.path(),
        "entries.yaml",
        r#"
- passport: JMZ0S-89IA9-OTCLY-MQILJ-P7CTY
  first_name: Mitchell
  last_name: Hudson
  birth_date: "1980-05-05"
  home: {country: KAN}
  from: {country: GON}
  entry_reason: returning
"#,
    );
    let watchlist = write(temp_dir.path(), "watchlist.json", WATCHLIST);
    let countries = write(temp_dir.path(), "countries.json", COUNTRIES);
    let config_path = write(
        temp_dir.path(),
        "run.yaml",
        &format!(
            "entries: {}\nwatchlist: {}\ncountries: {}\ntoday: \"2026-10-19\"\n",
            entries.display(),
            watchlist.display(),
            countries.display()
        ),
    );

    let config = EngineConfig::from_file(&config_path).unwrap();
    let datasets = Datasets::load(&config).unwrap();
    assert_eq!(datasets.travellers.len(), 1);
    assert_eq!(datasets.decide(config.processing_date()), vec![Outcome::Secondary]);
}
