//! Common regex patterns for settlement statement extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// Amount in the statement convention: optional minus, space or NBSP
/// thousands separators, comma decimals, followed by the currency marker.
const AMOUNT_NOK: &str = r"(-?\d{1,3}(?:[ \u{00a0}]\d{3})*(?:,\d{2})?)\s*NOK";

lazy_static! {
    // The amount may not continue a longer run of digits or decimals.
    pub static ref AMOUNT_WITH_CURRENCY: Regex = Regex::new(
        &format!(r"(?:^|[^\d,.\-]){}", AMOUNT_NOK)
    ).unwrap();

    // Header fields
    pub static ref SELLER_LINE: Regex = Regex::new(
        r"Selger: (.+)"
    ).unwrap();

    pub static ref INVOICE_DATE: Regex = Regex::new(
        r"Fakturadato: (\d{2}\.\d{2}\.\d{4})"
    ).unwrap();

    // Labeled amounts
    pub static ref PAYOUT: Regex = Regex::new(
        r"Vi betaler til deg \( 1 \) \+ \( 2 \) (.+)"
    ).unwrap();

    pub static ref GROSS_SALES: Regex = Regex::new(
        r"Ditt totalsalg inkl\. MVA\r?\nTotalt \( 1 \) (.+)"
    ).unwrap();

    pub static ref SANCTIONS: Regex = Regex::new(
        &format!(r"Sanctions\s+\d+\s+({})", AMOUNT_NOK)
    ).unwrap();

    pub static ref HARDWARE: Regex = Regex::new(
        &format!(r"Hardware\s+\d+\s+({})", AMOUNT_NOK)
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_patterns_capture_amount_with_currency() {
        let caps = SANCTIONS.captures("Sanctions 3 -1 250,00 NOK").unwrap();
        assert_eq!(&caps[1], "-1 250,00 NOK");

        let caps = HARDWARE.captures("Hardware  12  99,50NOK").unwrap();
        assert_eq!(&caps[1], "99,50NOK");
    }

    #[test]
    fn test_amount_needs_left_boundary() {
        let caps = AMOUNT_WITH_CURRENCY.captures("Totalt -1 250,00 NOK").unwrap();
        assert_eq!(&caps[1], "-1 250,00");

        assert!(!AMOUNT_WITH_CURRENCY.is_match("12345,67 NOK"));
        assert!(!AMOUNT_WITH_CURRENCY.is_match("1.250,00 NOK"));
    }

    #[test]
    fn test_gross_sales_spans_line_break() {
        assert!(GROSS_SALES.is_match("Ditt totalsalg inkl. MVA\nTotalt ( 1 ) 10,00 NOK"));
        assert!(GROSS_SALES.is_match("Ditt totalsalg inkl. MVA\r\nTotalt ( 1 ) 10,00 NOK"));
        assert!(!GROSS_SALES.is_match("Ditt totalsalg inkl. MVA Totalt ( 1 ) 10,00 NOK"));
    }
}
