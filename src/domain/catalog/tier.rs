//! Underwriting tier definitions.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Underwriting strictness of a product, best first.
///
/// The qualification flow walks products from the best tier to the worst and
/// stops at the first one the applicant is not disqualified from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    /// Lowest premiums, strictest health questions.
    Preferred,
    /// Competitive rates for most applicants.
    Standard,
    /// Graded benefits, lenient questions.
    Graded,
    /// Simplified issue for applicants with health challenges.
    Modified,
}

impl Tier {
    /// All tiers, best first.
    pub const ALL: [Tier; 4] = [Tier::Preferred, Tier::Standard, Tier::Graded, Tier::Modified];

    /// Returns the ordinal rank of this tier. Lower rank = better tier.
    pub fn rank(&self) -> u8 {
        match self {
            Tier::Preferred => 0,
            Tier::Standard => 1,
            Tier::Graded => 2,
            Tier::Modified => 3,
        }
    }

    /// Returns the display name for this tier.
    pub fn display_name(&self) -> &'static str {
        match self {
            Tier::Preferred => "Preferred",
            Tier::Standard => "Standard",
            Tier::Graded => "Graded",
            Tier::Modified => "Modified",
        }
    }

    /// Returns true if this tier ranks strictly better than `other`.
    pub fn is_better_than(&self, other: &Tier) -> bool {
        self.rank() < other.rank()
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Tier {
    type Err = ValidationError;

    /// Parses a tier name, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Tier::ALL
            .into_iter()
            .find(|tier| tier.display_name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::UnknownTier(s.to_string()))
    }
}
