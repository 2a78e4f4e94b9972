//! Settlement statement parser built from independent field rules.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::models::config::ExtractionConfig;
use crate::models::ledger::{Account, LineItem};

use super::rules::{
    default_rules, AmountRule, DateExtractor, FieldExtractor, RuleOutcome, SellerExtractor,
};
use super::SettlementExtractor;

/// Result of extracting one statement page.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Line items in rule order.
    pub items: Vec<LineItem>,
    /// Seller name, if found.
    pub seller: Option<String>,
    /// Invoice date, if found.
    pub date: Option<String>,
    /// Extraction warnings.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Rule-based parser for settlement statements.
pub struct SettlementParser {
    seller: SellerExtractor,
    dates: DateExtractor,
    rules: Vec<AmountRule>,
}

impl SettlementParser {
    /// Create a parser for the default provider.
    pub fn new() -> Self {
        Self {
            seller: SellerExtractor::default(),
            dates: DateExtractor::new(),
            rules: default_rules(),
        }
    }

    /// Create a parser from extraction settings.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new()
            .with_seller_prefix(config.seller_prefix.clone())
            .with_date_validation(config.validate_dates)
    }

    /// Set the provider name preceding the seller.
    pub fn with_seller_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.seller = SellerExtractor::new(prefix);
        self
    }

    /// Set calendar date validation.
    pub fn with_date_validation(mut self, validate: bool) -> Self {
        self.dates = DateExtractor::new().with_validation(validate);
        self
    }
}

impl Default for SettlementParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SettlementExtractor for SettlementParser {
    fn parse(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();
        info!("Parsing settlement from {} characters of text", text.len());

        let seller = self.seller.extract(text).map(|m| m.value);
        let date = self.dates.extract(text).map(|m| m.value);
        if seller.is_none() {
            debug!("No seller line for prefix {:?}", self.seller.prefix());
        }

        let mut items = Vec::with_capacity(self.rules.len() + 1);
        let mut warnings = Vec::new();

        for rule in &self.rules {
            match rule.apply(text) {
                RuleOutcome::Found(found) => {
                    debug!("{} -> {} ({:?})", rule.name, found.value, found.source);
                    items.push(LineItem::new(
                        seller.clone(),
                        date.clone(),
                        rule.account,
                        found.value,
                    ));
                }
                RuleOutcome::Unparsable(source) => {
                    warn!("{} label found but amount is unreadable: {:?}", rule.name, source);
                    warnings.push(format!("unreadable {} amount: {}", rule.name, source.trim()));
                }
                RuleOutcome::Absent => {
                    debug!("{} not present", rule.name);
                }
            }
        }

        let has_totals = items
            .iter()
            .any(|i| matches!(i.account, Account::Payout | Account::GrossSales));
        if !has_totals {
            warnings.push(
                "neither payout nor gross sales found; document may not match the settlement template"
                    .to_string(),
            );
        }

        ExtractionResult {
            items,
            seller,
            date,
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    const STATEMENT: &str = "Oppgjørsrapport\n\
        Selger: Godt Brød - Grünerløkka\n\
        Fakturadato: 15.01.2024\n\
        Ditt totalsalg inkl. MVA\n\
        Totalt ( 1 ) 12\u{00a0}500,00 NOK\n\
        Fradrag\n\
        Sanctions 2 -150,00 NOK\n\
        Hardware 1 -299,00 NOK\n\
        Vi betaler til deg ( 1 ) + ( 2 ) 12 051,00 NOK\n";

    #[test]
    fn test_parse_full_statement() {
        let result = SettlementParser::new().parse(STATEMENT);

        let seller = Some("Grünerløkka".to_string());
        let date = Some("15.01.2024".to_string());
        assert_eq!(
            result.items,
            vec![
                LineItem::new(seller.clone(), date.clone(), Account::Payout, dec("12051.00")),
                LineItem::new(seller.clone(), date.clone(), Account::GrossSales, dec("12500.00")),
                LineItem::new(seller.clone(), date.clone(), Account::Sanctions, dec("150.00")),
                LineItem::new(seller, date, Account::Hardware, dec("299.00")),
            ]
        );
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_missing_hardware_is_tolerated() {
        let text = STATEMENT.replace("Hardware 1 -299,00 NOK\n", "");
        let items = SettlementParser::new().extract(&text);

        assert_eq!(items.len(), 3);
        assert!(items.iter().all(|i| i.account != Account::Hardware));
    }

    #[test]
    fn test_missing_header_fields_leave_items_unlabelled() {
        let text = "Vi betaler til deg ( 1 ) + ( 2 ) 100,00 NOK";
        let items = SettlementParser::new().extract(text);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].seller, None);
        assert_eq!(items[0].date, None);
    }

    #[test]
    fn test_unreadable_amount_is_omitted_with_warning() {
        let text = "Vi betaler til deg ( 1 ) + ( 2 ) se vedlegg\n\
            Ditt totalsalg inkl. MVA\nTotalt ( 1 ) 100,00 NOK";
        let result = SettlementParser::new().parse(text);

        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].account, Account::GrossSales);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("payout"));
    }

    #[test]
    fn test_ungrouped_payout_is_not_misread() {
        let text = "Vi betaler til deg ( 1 ) + ( 2 ) 12345,67 NOK\n\
            Ditt totalsalg inkl. MVA\nTotalt ( 1 ) 12 345,67 NOK";
        let result = SettlementParser::new().parse(text);

        assert!(result.items.iter().all(|i| i.account != Account::Payout));
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].amount, dec("12345.67"));
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].starts_with("unreadable payout amount"));
    }

    #[test]
    fn test_repeated_label_yields_first_match_only() {
        let text = STATEMENT.replace(
            "Sanctions 2 -150,00 NOK\n",
            "Sanctions 2 -150,00 NOK\nSanctions 1 -75,00 NOK\n",
        );
        let items = SettlementParser::new().extract(&text);

        let sanctions: Vec<&LineItem> = items
            .iter()
            .filter(|i| i.account == Account::Sanctions)
            .collect();
        assert_eq!(sanctions.len(), 1);
        assert_eq!(sanctions[0].amount, dec("150.00"));
        assert_eq!(items.len(), 4);
    }

    #[test]
    fn test_unrelated_text_is_empty_success() {
        let result = SettlementParser::new().parse("Kvittering\nTakk for handelen");

        assert!(result.items.is_empty());
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("template"));
    }

    #[test]
    fn test_configured_seller_prefix() {
        let config = ExtractionConfig {
            seller_prefix: "Bakeriet".to_string(),
            ..ExtractionConfig::default()
        };
        let text = "Selger: Bakeriet - Sentrum\nVi betaler til deg ( 1 ) + ( 2 ) 1,00 NOK";
        let result = SettlementParser::from_config(&config).parse(text);

        assert_eq!(result.seller.as_deref(), Some("Sentrum"));
    }
}
