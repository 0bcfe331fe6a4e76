//! Admission decision types.

use crate::policy::RuleCategory;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The admission outcome for one traveller.
///
/// Variants are declared in ascending priority, so `Ord` ranks
/// `Quarantine > Reject > Secondary > Accept`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Accept,
    Secondary,
    Reject,
    Quarantine,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Accept => "Accept",
            Outcome::Secondary => "Secondary",
            Outcome::Reject => "Reject",
            Outcome::Quarantine => "Quarantine",
        }
    }

    /// Returns true if nothing can outrank this outcome.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Outcome::Quarantine)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What one rule category concluded about a traveller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub category: RuleCategory,
    pub outcome: Outcome,
    pub reason: String,
}

impl Finding {
    pub fn new(category: RuleCategory, outcome: Outcome, reason: impl Into<String>) -> Self {
        Self {
            category,
            outcome,
            reason: reason.into(),
        }
    }
}

/// A complete decision for one traveller, with the findings behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravellerDecision {
    /// The resolved outcome.
    pub outcome: Outcome,

    /// Findings from every rule category that ran, in evaluation order.
    #[serde(default)]
    pub findings: Vec<Finding>,
}

impl TravellerDecision {
    /// Resolves a decision from the collected findings.
    pub fn from_findings(findings: Vec<Finding>) -> Self {
        let outcome = crate::policy::resolve(findings.iter().map(|f| f.outcome));
        Self { outcome, findings }
    }

    /// The finding that determined the outcome, if any.
    pub fn deciding_finding(&self) -> Option<&Finding> {
        self.findings.iter().find(|f| f.outcome == self.outcome)
    }

    /// Human-readable reason for the decision.
    pub fn reason(&self) -> &str {
        self.deciding_finding()
            .map(|f| f.reason.as_str())
            .unwrap_or("All checks passed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_priority_order() {
        assert!(Outcome::Quarantine > Outcome::Reject);
        assert!(Outcome::Reject > Outcome::Secondary);
        assert!(Outcome::Secondary > Outcome::Accept);
    }

    #[test]
    fn test_outcome_labels() {
        assert_eq!(serde_json::to_string(&Outcome::Secondary).unwrap(), "\"Secondary\"");
        let outcome: Outcome = serde_json::from_str("\"Quarantine\"").unwrap();
        assert_eq!(outcome, Outcome::Quarantine);
        assert_eq!(Outcome::Reject.to_string(), "Reject");
    }

    #[test]
    fn test_decision_from_findings() {
        let decision = TravellerDecision::from_findings(vec![
            Finding::new(RuleCategory::Country, Outcome::Accept, "no visa required"),
            Finding::new(RuleCategory::Watchlist, Outcome::Secondary, "passport on watchlist"),
        ]);
        assert_eq!(decision.outcome, Outcome::Secondary);
        assert_eq!(decision.reason(), "passport on watchlist");
    }

    #[test]
    fn test_reject_outranks_secondary() {
        let decision = TravellerDecision::from_findings(vec![
            Finding::new(RuleCategory::Fields, Outcome::Reject, "bad passport"),
            Finding::new(RuleCategory::Watchlist, Outcome::Secondary, "name match"),
        ]);
        assert_eq!(decision.outcome, Outcome::Reject);
        assert_eq!(decision.findings.len(), 2);
        assert_eq!(decision.reason(), "bad passport");
    }

    #[test]
    fn test_no_findings_is_accept() {
        let decision = TravellerDecision::from_findings(Vec::new());
        assert_eq!(decision.outcome, Outcome::Accept);
        assert_eq!(decision.reason(), "All checks passed");
    }
}
