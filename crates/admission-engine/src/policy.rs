//! The fixed admission rule set and its conflict-priority policy.

use crate::decision::Outcome;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A category of admission rules.
///
/// Within a category the first disqualifying condition decides; across
/// categories every finding is kept and ranked by [`resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    /// Home country and arrival (`from`/`via`) country can be resolved.
    Origin,
    /// Required fields are present and well formed.
    Fields,
    /// Medical advisory, returning citizen and visa requirements.
    Country,
    /// Identity appears on the watchlist.
    Watchlist,
}

impl RuleCategory {
    /// Categories in the order they are evaluated for each traveller.
    pub const EVALUATION_ORDER: [RuleCategory; 4] = [
        RuleCategory::Origin,
        RuleCategory::Fields,
        RuleCategory::Country,
        RuleCategory::Watchlist,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleCategory::Origin => "origin",
            RuleCategory::Fields => "fields",
            RuleCategory::Country => "country",
            RuleCategory::Watchlist => "watchlist",
        }
    }
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves the outcomes proposed by all rule categories into one.
///
/// `Quarantine > Reject > Secondary > Accept`; no proposals means Accept.
pub fn resolve<I>(outcomes: I) -> Outcome
where
    I: IntoIterator<Item = Outcome>,
{
    outcomes.into_iter().max().unwrap_or(Outcome::Accept)
}
