//! Labeled amount rules mapping statement fields to ledger accounts.

use regex::Regex;
use rust_decimal::Decimal;

use super::amounts::extract_amount;
use super::patterns::{GROSS_SALES, HARDWARE, PAYOUT, SANCTIONS};
use super::ExtractionMatch;
use crate::models::ledger::Account;

/// How the sign of a parsed amount is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignPolicy {
    /// Keep the sign as printed.
    Preserve,
    /// Store the magnitude.
    Absolute,
}

impl SignPolicy {
    pub fn apply(self, amount: Decimal) -> Decimal {
        match self {
            SignPolicy::Preserve => amount,
            SignPolicy::Absolute => amount.abs(),
        }
    }
}

/// Result of evaluating one rule against page text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    /// The label does not occur.
    Absent,
    /// The label occurs but carries no parsable `<amount> NOK`.
    Unparsable(String),
    /// An amount was found, sign policy already applied.
    Found(ExtractionMatch<Decimal>),
}

/// A `(label pattern, account, sign policy)` extraction rule.
///
/// The pattern's first capture group holds the text that must contain the
/// amount followed by the currency marker.
pub struct AmountRule {
    pub name: &'static str,
    pub pattern: &'static Regex,
    pub account: Account,
    pub sign: SignPolicy,
}

impl AmountRule {
    /// Evaluate the rule against the first matching label.
    pub fn apply(&self, text: &str) -> RuleOutcome {
        let Some(caps) = self.pattern.captures(text) else {
            return RuleOutcome::Absent;
        };
        let (Some(full), Some(value)) = (caps.get(0), caps.get(1)) else {
            return RuleOutcome::Absent;
        };

        match extract_amount(value.as_str()) {
            Some(amount) => RuleOutcome::Found(
                ExtractionMatch::new(self.sign.apply(amount), full.as_str())
                    .with_position(full.start(), full.end()),
            ),
            None => RuleOutcome::Unparsable(full.as_str().to_string()),
        }
    }
}

/// Rules for the settlement statement template, in output order.
pub fn default_rules() -> Vec<AmountRule> {
    vec![
        AmountRule {
            name: "payout",
            pattern: &PAYOUT,
            account: Account::Payout,
            sign: SignPolicy::Preserve,
        },
        AmountRule {
            name: "gross sales",
            pattern: &GROSS_SALES,
            account: Account::GrossSales,
            sign: SignPolicy::Preserve,
        },
        AmountRule {
            name: "sanctions",
            pattern: &SANCTIONS,
            account: Account::Sanctions,
            sign: SignPolicy::Absolute,
        },
        AmountRule {
            name: "hardware",
            pattern: &HARDWARE,
            account: Account::Hardware,
            sign: SignPolicy::Absolute,
        },
    ]
}
