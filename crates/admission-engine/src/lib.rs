//! Kanadia Admission Engine
//!
//! Decides, for each traveller in a batch, whether entry is accepted,
//! rejected, referred to secondary inspection or sent to quarantine. Each
//! traveller is screened against a watchlist and per-country entry
//! requirements; all findings are ranked
//! `Quarantine > Reject > Secondary > Accept`.
//!
//! ```no_run
//! use admission_engine::parser::decide_files;
//! use chrono::NaiveDate;
//!
//! let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
//! let outcomes = decide_files("entries.json", "watchlist.json", "countries.json", today)?;
//! # Ok::<(), admission_engine::AdmissionError>(())
//! ```

pub mod config;
pub mod context;
pub mod decision;
pub mod error;
pub mod evaluator;
pub mod logging;
pub mod parser;
pub mod policy;
pub mod types;
pub mod validation;

pub use config::EngineConfig;
pub use context::ReferenceData;
pub use decision::{Finding, Outcome, TravellerDecision};
pub use error::{AdmissionError, Result};
pub use evaluator::{decide, AdmissionEvaluator};
pub use parser::{decide_files, Datasets};

/// Version of the admission engine.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::context::ReferenceData;
    pub use crate::decision::{Finding, Outcome, TravellerDecision};
    pub use crate::error::{AdmissionError, Result};
    pub use crate::evaluator::{decide, AdmissionEvaluator};
    pub use crate::policy::RuleCategory;
    pub use crate::types::*;
}
