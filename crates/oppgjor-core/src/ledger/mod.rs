//! Ledger reconciliation.
//!
//! Every settlement must close: `payout + fees - sales` is carried on the
//! residual account whenever it is at least one cent.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use tracing::debug;

use crate::models::ledger::{Account, LineItem};

/// Smallest residual that gets its own line item.
pub const RESIDUAL_THRESHOLD: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Per-account totals for one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Reconciliation {
    pub payout: Decimal,
    pub fees: Decimal,
    pub sales: Decimal,
    /// `(payout + fees) - sales`, rounded half-up to cents.
    pub residual: Decimal,
}

impl Reconciliation {
    /// Whether a residual line item is required.
    pub fn needs_entry(&self) -> bool {
        self.residual.abs() >= RESIDUAL_THRESHOLD
    }
}

fn total(items: &[LineItem], account: Account) -> Decimal {
    items
        .iter()
        .filter(|i| i.account == account)
        .map(|i| i.amount)
        .sum()
}

/// Compute account totals and the residual for one document.
pub fn summarize(items: &[LineItem]) -> Reconciliation {
    let payout = total(items, Account::Payout);
    let fees = total(items, Account::Sanctions) + total(items, Account::Hardware);
    let sales = total(items, Account::GrossSales);

    let residual = ((payout + fees) - sales)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    Reconciliation {
        payout,
        fees,
        sales,
        residual,
    }
}

/// Compute the residual for one document.
pub fn reconcile(items: &[LineItem]) -> Decimal {
    summarize(items).residual
}

/// Append the residual line item when the document does not close.
///
/// The residual inherits seller and date from the document's items.
pub fn balance(mut items: Vec<LineItem>) -> Vec<LineItem> {
    let summary = summarize(&items);
    debug!(
        "payout={} fees={} sales={} residual={}",
        summary.payout, summary.fees, summary.sales, summary.residual
    );

    if summary.needs_entry() {
        let (seller, date) = items
            .first()
            .map(|i| (i.seller.clone(), i.date.clone()))
            .unwrap_or_default();
        items.push(LineItem::new(seller, date, Account::Residual, summary.residual));
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn item(account: Account, amount: &str) -> LineItem {
        LineItem::new(
            Some("Majorstuen".to_string()),
            Some("02.05.2024".to_string()),
            account,
            dec(amount),
        )
    }

    #[test]
    fn test_balanced_document_has_no_residual() {
        let items = vec![
            item(Account::Payout, "1000.00"),
            item(Account::GrossSales, "1000.00"),
        ];

        assert_eq!(reconcile(&items), dec("0.00"));
        assert_eq!(balance(items.clone()), items);
    }

    #[test]
    fn test_one_cent_residual_is_booked() {
        let items = vec![
            item(Account::Payout, "1000.00"),
            item(Account::GrossSales, "1049.99"),
            item(Account::Sanctions, "50.00"),
        ];

        assert_eq!(reconcile(&items), dec("0.01"));

        let balanced = balance(items);
        assert_eq!(balanced.len(), 4);
        assert_eq!(balanced[3], item(Account::Residual, "0.01"));
    }

    #[test]
    fn test_negative_residual_keeps_sign() {
        let items = vec![
            item(Account::Payout, "900.00"),
            item(Account::GrossSales, "1000.00"),
            item(Account::Hardware, "99.00"),
        ];

        let balanced = balance(items);
        assert_eq!(balanced.last().unwrap().account, Account::Residual);
        assert_eq!(balanced.last().unwrap().amount, dec("-1.00"));
    }

    #[test]
    fn test_both_fees_count() {
        let items = vec![
            item(Account::Payout, "12051.00"),
            item(Account::GrossSales, "12500.00"),
            item(Account::Sanctions, "150.00"),
            item(Account::Hardware, "299.00"),
        ];

        let summary = summarize(&items);
        assert_eq!(summary.fees, dec("449.00"));
        assert_eq!(summary.residual, dec("0.00"));
        assert!(!summary.needs_entry());
    }

    #[test]
    fn test_missing_accounts_contribute_zero() {
        assert_eq!(reconcile(&[]), Decimal::ZERO);
        assert!(balance(Vec::new()).is_empty());

        let only_sales = vec![item(Account::GrossSales, "10.00")];
        assert_eq!(reconcile(&only_sales), dec("-10.00"));
    }

    #[test]
    fn test_rounding_is_half_up_not_bankers() {
        let items = vec![item(Account::Payout, "0.025")];
        assert_eq!(reconcile(&items), dec("0.03"));

        let items = vec![item(Account::GrossSales, "0.025")];
        assert_eq!(reconcile(&items), dec("-0.03"));

        let items = vec![item(Account::Payout, "0.004")];
        assert_eq!(reconcile(&items), dec("0.00"));
        assert_eq!(balance(items).len(), 1);
    }

    #[test]
    fn test_sub_cent_sums_are_not_rounded_early() {
        let items = vec![
            item(Account::Payout, "0.004"),
            item(Account::Sanctions, "0.004"),
        ];
        assert_eq!(reconcile(&items), dec("0.01"));
    }

    #[test]
    fn test_reconciled_document_closes() {
        let items = vec![
            item(Account::Payout, "731.17"),
            item(Account::GrossSales, "812.40"),
            item(Account::Sanctions, "45.00"),
        ];

        let balanced = balance(items);
        let residual = total(&balanced, Account::Residual);
        let summary = summarize(&balanced);
        assert!((summary.payout + summary.fees - summary.sales - residual).abs() < RESIDUAL_THRESHOLD);
    }
}
