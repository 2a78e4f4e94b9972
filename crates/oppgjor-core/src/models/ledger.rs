//! Ledger line item models.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Accounting code assigned to an extracted or derived amount.
///
/// The set is closed: every settlement maps onto these five accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Account {
    /// Total paid out to the seller (99999905).
    Payout,
    /// Gross sales including VAT (3066).
    GrossSales,
    /// Sanctions fee (7210).
    Sanctions,
    /// Hardware fee (6551).
    Hardware,
    /// Reconciliation residual (7740).
    Residual,
}

impl Account {
    /// All accounts in extraction order.
    pub const ALL: [Account; 5] = [
        Account::Payout,
        Account::GrossSales,
        Account::Sanctions,
        Account::Hardware,
        Account::Residual,
    ];

    /// Numeric account code.
    pub fn code(self) -> u32 {
        match self {
            Account::Payout => 99999905,
            Account::GrossSales => 3066,
            Account::Sanctions => 7210,
            Account::Hardware => 6551,
            Account::Residual => 7740,
        }
    }

    /// Human-readable description.
    pub fn label(self) -> &'static str {
        match self {
            Account::Payout => "payout total",
            Account::GrossSales => "gross sales",
            Account::Sanctions => "sanctions fee",
            Account::Hardware => "hardware fee",
            Account::Residual => "reconciliation residual",
        }
    }
}

impl From<Account> for u32 {
    fn from(account: Account) -> Self {
        account.code()
    }
}

impl TryFrom<u32> for Account {
    type Error = String;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        Account::ALL
            .into_iter()
            .find(|a| a.code() == code)
            .ok_or_else(|| format!("unknown account code: {}", code))
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One financial fact extracted from, or derived for, a settlement document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Vendor name.
    pub seller: Option<String>,

    /// Invoice date, verbatim `DD.MM.YYYY`.
    pub date: Option<String>,

    /// Account code.
    pub account: Account,

    /// Exact amount.
    pub amount: Decimal,
}

impl LineItem {
    pub fn new(
        seller: Option<String>,
        date: Option<String>,
        account: Account,
        amount: Decimal,
    ) -> Self {
        Self {
            seller,
            date,
            account,
            amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_account_codes_roundtrip() {
        for account in Account::ALL {
            assert_eq!(Account::try_from(account.code()), Ok(account));
        }
        assert!(Account::try_from(1234).is_err());
    }

    #[test]
    fn test_line_item_serializes_code() {
        let item = LineItem::new(
            Some("Bakeriet".to_string()),
            Some("01.02.2024".to_string()),
            Account::Sanctions,
            Decimal::from_str("45.00").unwrap(),
        );

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["account"], 7210);
        assert_eq!(json["amount"], "45.00");
    }
}
