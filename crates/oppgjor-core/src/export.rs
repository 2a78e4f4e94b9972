//! Ledger export as a delimited spreadsheet file.
//!
//! One row per line item with columns `Selger, Dato, Konto, Beløp`.

use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::ExportError;
use crate::models::config::ExportConfig;
use crate::models::ledger::LineItem;

#[derive(Serialize)]
struct LedgerRow<'a> {
    #[serde(rename = "Selger")]
    seller: Option<&'a str>,
    #[serde(rename = "Dato")]
    date: Option<&'a str>,
    #[serde(rename = "Konto")]
    account: u32,
    #[serde(rename = "Beløp")]
    amount: String,
}

/// Writes line items as ledger rows.
#[derive(Debug, Clone)]
pub struct LedgerWriter {
    delimiter: u8,
    decimal_comma: bool,
}

impl LedgerWriter {
    pub fn new() -> Self {
        Self {
            delimiter: b',',
            decimal_comma: false,
        }
    }

    pub fn from_config(config: &ExportConfig) -> Result<Self, ExportError> {
        if !config.delimiter.is_ascii() {
            return Err(ExportError::Delimiter(config.delimiter));
        }
        Ok(Self {
            delimiter: config.delimiter as u8,
            decimal_comma: config.decimal_comma,
        })
    }

    fn format_amount(&self, amount: Decimal) -> String {
        let s = format!("{:.2}", amount);
        if self.decimal_comma {
            s.replace('.', ",")
        } else {
            s
        }
    }

    /// Write all items, header first, in the given order.
    pub fn write<W: Write>(&self, writer: W, items: &[LineItem]) -> Result<(), ExportError> {
        let mut wtr = WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(writer);

        for item in items {
            wtr.serialize(LedgerRow {
                seller: item.seller.as_deref(),
                date: item.date.as_deref(),
                account: item.account.code(),
                amount: self.format_amount(item.amount),
            })?;
        }

        wtr.flush()?;
        Ok(())
    }

    /// Write all items to a file.
    pub fn write_to_path(&self, path: &Path, items: &[LineItem]) -> Result<(), ExportError> {
        let file = std::fs::File::create(path)?;
        self.write(file, items)
    }

    /// Render all items as a string.
    pub fn to_string(&self, items: &[LineItem]) -> Result<String, ExportError> {
        let mut buffer = Vec::new();
        self.write(&mut buffer, items)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

impl Default for LedgerWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ledger::Account;
    use pretty_assertions::assert_eq;

    fn items() -> Vec<LineItem> {
        vec![
            LineItem::new(
                Some("Tøyen".to_string()),
                Some("03.04.2024".to_string()),
                Account::Payout,
                Decimal::new(100000, 2),
            ),
            LineItem::new(None, None, Account::Residual, Decimal::new(-1, 2)),
        ]
    }

    #[test]
    fn test_write_rows_in_order() {
        let out = LedgerWriter::new().to_string(&items()).unwrap();
        assert_eq!(
            out,
            "Selger,Dato,Konto,Beløp\nTøyen,03.04.2024,99999905,1000.00\n,,7740,-0.01\n"
        );
    }

    #[test]
    fn test_semicolon_and_decimal_comma() {
        let config = ExportConfig {
            delimiter: ';',
            decimal_comma: true,
        };
        let out = LedgerWriter::from_config(&config).unwrap().to_string(&items()).unwrap();
        assert_eq!(
            out,
            "Selger;Dato;Konto;Beløp\nTøyen;03.04.2024;99999905;1000,00\n;;7740;-0,01\n"
        );
    }

    #[test]
    fn test_whole_amount_gets_cents() {
        let item = LineItem::new(None, None, Account::GrossSales, Decimal::new(500, 0));
        let out = LedgerWriter::new().to_string(&[item]).unwrap();
        assert!(out.ends_with(",,3066,500.00\n"));
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let config = ExportConfig {
            delimiter: '¤',
            decimal_comma: false,
        };
        assert!(matches!(
            LedgerWriter::from_config(&config),
            Err(ExportError::Delimiter('¤'))
        ));
    }
}
