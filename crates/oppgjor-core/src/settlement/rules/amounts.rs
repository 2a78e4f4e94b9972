//! Amount extraction for settlement statements.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::AMOUNT_WITH_CURRENCY;
use super::{ExtractionMatch, FieldExtractor};

/// Extracts `<amount> NOK` occurrences.
pub struct AmountExtractor;

impl AmountExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = ExtractionMatch<Decimal>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        AMOUNT_WITH_CURRENCY
            .captures_iter(text)
            .filter_map(|caps| {
                let number = caps.get(1)?;
                let end = caps.get(0)?.end();
                let amount = parse_amount(number.as_str())?;
                Some(
                    ExtractionMatch::new(amount, &text[number.start()..end])
                        .with_position(number.start(), end),
                )
            })
            .collect()
    }
}

/// Find the first `<amount> NOK` in `text` and parse it.
pub fn extract_amount(text: &str) -> Option<Decimal> {
    AmountExtractor::new().extract(text).map(|m| m.value)
}

/// Parse an amount such as `1 234,56`, `1\u{a0}234,56` or `-12,34`.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .trim()
        .chars()
        .filter(|c| *c != ' ' && *c != '\u{00a0}')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    Decimal::from_str(&cleaned).ok()
}

/// Format an amount in statement style (`-1 234,56`).
pub fn format_amount(amount: Decimal) -> String {
    let s = format!("{:.2}", amount.abs());
    let Some((integer_part, decimal_part)) = s.split_once('.') else {
        return s;
    };

    // Add thousand separators
    let chars: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::new();
    if amount.is_sign_negative() && !amount.is_zero() {
        formatted.push('-');
    }

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push(' ');
        }
        formatted.push(*c);
    }

    format!("{},{}", formatted, decimal_part)
}
