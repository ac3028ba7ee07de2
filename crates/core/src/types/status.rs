//! Enumerations shared by the server and the CLI.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Money;

/// What a user is allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "argos.user_role", rename_all = "SCREAMING_SNAKE_CASE")
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Manages the catalog, reads reports, records adjustments.
    Manager,
    /// Runs a till: opens shifts, records sales and expenses.
    #[default]
    Worker,
}

impl Role {
    /// The wire and database spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manager => "MANAGER",
            Self::Worker => "WORKER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MANAGER" => Ok(Self::Manager),
            "WORKER" => Ok(Self::Worker),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

/// How an adjustment changes the amount of the record it targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "argos.adjustment_kind", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentKind {
    /// Cancels the record outright.
    Reversal,
    /// Shifts the record's amount by a signed delta.
    Correction,
}

impl AdjustmentKind {
    /// The amount the target would have after this adjustment.
    ///
    /// A reversal ignores `delta`. Both inputs are parsed amounts, so the sum
    /// stays within range.
    ///
    /// ```
    /// use argos_core::{AdjustmentKind, Money};
    ///
    /// let original = Money::from(100);
    /// assert_eq!(AdjustmentKind::Reversal.apply(original, Money::from(5)), Money::ZERO);
    /// assert_eq!(AdjustmentKind::Correction.apply(original, Money::from(-30)), Money::from(70));
    /// ```
    #[must_use]
    pub fn apply(self, original: Money, delta: Money) -> Money {
        match self {
            Self::Reversal => Money::ZERO,
            Self::Correction => original + delta,
        }
    }

    /// The wire and database spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reversal => "reversal",
            Self::Correction => "correction",
        }
    }

    /// Capitalized form used in confirmation messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Reversal => "Reversal",
            Self::Correction => "Correction",
        }
    }
}

impl fmt::Display for AdjustmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdjustmentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reversal" => Ok(Self::Reversal),
            "correction" => Ok(Self::Correction),
            _ => Err(format!("invalid adjustment type: {s}")),
        }
    }
}

/// Which ledger an adjustment points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "argos.adjustment_target", rename_all = "UPPERCASE")
)]
#[serde(rename_all = "UPPERCASE")]
pub enum AdjustmentTarget {
    Sale,
    Expense,
}

impl AdjustmentTarget {
    /// The wire and database spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sale => "SALE",
            Self::Expense => "EXPENSE",
        }
    }
}

impl fmt::Display for AdjustmentTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdjustmentTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SALE" => Ok(Self::Sale),
            "EXPENSE" => Ok(Self::Expense),
            _ => Err(format!("invalid target type: {s}")),
        }
    }
}
