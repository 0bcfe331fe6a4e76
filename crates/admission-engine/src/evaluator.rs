//! Admission evaluation engine.

use crate::context::ReferenceData;
use crate::decision::{Finding, Outcome, TravellerDecision};
use crate::error::{AdmissionError, Result};
use crate::policy::RuleCategory;
use crate::types::{CountryDirectory, EntryReason, Traveller, WatchlistEntry, HOME_COUNTRY_CODE};
use crate::validation;
use chrono::{Months, NaiveDate};
use tracing::{debug, info};

/// Age in months at which a visa is no longer accepted.
pub const VISA_VALIDITY_MONTHS: u32 = 24;

/// The admission evaluator.
#[derive(Debug, Clone)]
pub struct AdmissionEvaluator {
    reference: ReferenceData,
}

impl AdmissionEvaluator {
    /// Creates an evaluator over prepared reference data.
    pub fn new(reference: ReferenceData) -> Self {
        debug!(
            countries = reference.country_count(),
            watchlist = reference.watchlist_len(),
            today = %reference.today(),
            "Reference data prepared"
        );
        Self { reference }
    }

    /// Creates an evaluator from the raw watchlist and country directory.
    pub fn from_datasets(
        watchlist: &[WatchlistEntry],
        countries: &CountryDirectory,
        today: NaiveDate,
    ) -> Self {
        Self::new(ReferenceData::new(watchlist, countries, today))
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    /// Decides every traveller in the batch, preserving input order.
    pub fn decide(&self, travellers: &[Traveller]) -> Vec<Outcome> {
        self.evaluate_batch(travellers)
            .into_iter()
            .map(|decision| decision.outcome)
            .collect()
    }

    /// Evaluates every traveller in the batch, keeping the findings.
    pub fn evaluate_batch(&self, travellers: &[Traveller]) -> Vec<TravellerDecision> {
        let decisions: Vec<TravellerDecision> =
            travellers.iter().map(|traveller| self.evaluate(traveller)).collect();

        let count = |outcome: Outcome| decisions.iter().filter(|d| d.outcome == outcome).count();
        info!(
            travellers = decisions.len(),
            accept = count(Outcome::Accept),
            secondary = count(Outcome::Secondary),
            reject = count(Outcome::Reject),
            quarantine = count(Outcome::Quarantine),
            "Batch evaluated"
        );

        decisions
    }

    /// Evaluates a single traveller.
    ///
    /// Every rule category contributes at most one finding; the
    /// highest-priority outcome among them wins. Only a quarantine cuts
    /// evaluation short.
    pub fn evaluate(&self, traveller: &Traveller) -> TravellerDecision {
        if let Some(reason) = &traveller.malformed {
            let decision = TravellerDecision::from_findings(vec![Finding::new(
                RuleCategory::Fields,
                Outcome::Reject,
                reason.clone(),
            )]);
            self.trace(&decision);
            return decision;
        }

        let arrival = traveller.origin_country();
        let mut findings = Vec::new();

        for category in RuleCategory::EVALUATION_ORDER {
            let finding = match category {
                RuleCategory::Origin => self.check_origin(arrival.as_deref()),
                RuleCategory::Fields => self.check_fields(traveller),
                RuleCategory::Country => arrival
                    .as_deref()
                    .and_then(|arrival| self.evaluate_country(traveller, arrival)),
                RuleCategory::Watchlist => self.check_watchlist(traveller),
            };

            if let Some(finding) = finding {
                let terminal = finding.outcome.is_terminal();
                findings.push(finding);
                if terminal {
                    break;
                }
            }
        }

        let decision = TravellerDecision::from_findings(findings);
        self.trace(&decision);
        decision
    }

    fn trace(&self, decision: &TravellerDecision) {
        debug!(
            outcome = %decision.outcome,
            findings = decision.findings.len(),
            reason = decision.reason(),
            "Traveller evaluated"
        );
    }

    /// A traveller must arrive `from` (else `via`) some country.
    fn check_origin(&self, arrival: Option<&str>) -> Option<Finding> {
        match arrival {
            Some(_) => None,
            None => Some(Finding::new(
                RuleCategory::Origin,
                Outcome::Reject,
                "Neither a 'from' nor a 'via' country is given",
            )),
        }
    }

    fn check_fields(&self, traveller: &Traveller) -> Option<Finding> {
        self.validate_fields(traveller)
            .err()
            .map(|e| Finding::new(RuleCategory::Fields, Outcome::Reject, e.to_string()))
    }

    fn check_watchlist(&self, traveller: &Traveller) -> Option<Finding> {
        self.reference.watchlist_match(traveller).map(|matched| {
            Finding::new(
                RuleCategory::Watchlist,
                Outcome::Secondary,
                format!("Traveller matches watchlist by {}", matched.as_str()),
            )
        })
    }

    /// Checks presence and format of the required fields.
    fn validate_fields(&self, traveller: &Traveller) -> Result<()> {
        validation::require_field("first_name", &traveller.first_name)?;
        validation::require_field("last_name", &traveller.last_name)?;
        validation::require_field("entry_reason", &traveller.entry_reason)?;
        validation::require_date("birth_date", &traveller.birth_date)?;
        validation::require_passport("passport", &traveller.passport)?;

        if traveller.home_country().is_none() {
            return Err(AdmissionError::MissingField("home.country".to_string()));
        }

        if let Some(visa) = &traveller.visa {
            validation::require_date("visa.date", &visa.date)?;
        }

        Ok(())
    }

    /// Applies medical advisory, returning citizen and visa rules.
    ///
    /// The advisory check needs only the arrival country; the rest needs a
    /// home country, whose absence is already a field finding.
    fn evaluate_country(&self, traveller: &Traveller, arrival: &str) -> Option<Finding> {
        if let Some(record) = self.reference.country(arrival) {
            if record.has_medical_advisory() {
                return Some(Finding::new(
                    RuleCategory::Country,
                    Outcome::Quarantine,
                    format!(
                        "Medical advisory for {}: {}",
                        arrival,
                        record.medical_advisory.trim()
                    ),
                ));
            }
        }

        let home_code = traveller.home_country()?;

        if home_code == HOME_COUNTRY_CODE
            && traveller.entry_reason() == Some(EntryReason::Returning)
        {
            return Some(Finding::new(
                RuleCategory::Country,
                Outcome::Accept,
                "Returning citizen",
            ));
        }

        let Some(home) = self.reference.country(&home_code) else {
            return Some(Finding::new(
                RuleCategory::Country,
                Outcome::Accept,
                format!("No entry requirements known for {}", home_code),
            ));
        };

        if !home.requires_visa() {
            return Some(Finding::new(
                RuleCategory::Country,
                Outcome::Accept,
                "No visa required",
            ));
        }

        Some(self.evaluate_visa(traveller))
    }

    fn evaluate_visa(&self, traveller: &Traveller) -> Finding {
        let reject = |reason: String| Finding::new(RuleCategory::Country, Outcome::Reject, reason);

        let Some(visa) = traveller.visa.as_ref().filter(|visa| visa.code().is_some()) else {
            return reject("Visa required but no visa code given".to_string());
        };

        let issued = match validation::require_date("visa.date", &visa.date) {
            Ok(date) => date,
            Err(e) => return reject(e.to_string()),
        };

        if is_visa_stale(issued, self.reference.today()) {
            return reject(format!(
                "Visa dated {} is {} months old or more",
                issued, VISA_VALIDITY_MONTHS
            ));
        }

        Finding::new(RuleCategory::Country, Outcome::Accept, "Valid visa")
    }
}

/// A visa is stale once it is two whole years old on the processing date.
pub fn is_visa_stale(issued: NaiveDate, today: NaiveDate) -> bool {
    match today.checked_sub_months(Months::new(VISA_VALIDITY_MONTHS)) {
        Some(cutoff) => issued <= cutoff,
        None => false,
    }
}

/// Decides every traveller against the watchlist and country directory.
///
/// Returns one outcome per traveller, in input order.
pub fn decide(
    travellers: &[Traveller],
    watchlist: &[WatchlistEntry],
    countries: &CountryDirectory,
    today: NaiveDate,
) -> Vec<Outcome> {
    AdmissionEvaluator::from_datasets(watchlist, countries, today).decide(travellers)
}
