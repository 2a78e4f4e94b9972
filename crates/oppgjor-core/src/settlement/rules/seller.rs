//! Seller name extraction from the `Selger:` line.

use super::patterns::SELLER_LINE;
use super::{ExtractionMatch, FieldExtractor};

/// Extracts `<name>` from `Selger: <provider-prefix> - <name>`.
pub struct SellerExtractor {
    prefix: String,
}

impl SellerExtractor {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for SellerExtractor {
    fn default() -> Self {
        Self::new("Godt Brød")
    }
}

impl FieldExtractor for SellerExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        SELLER_LINE
            .captures_iter(text)
            .filter_map(|caps| {
                let line = caps.get(1)?;
                let name = line
                    .as_str()
                    .strip_prefix(self.prefix.as_str())?
                    .strip_prefix(" - ")?
                    .trim_end();
                if name.is_empty() {
                    return None;
                }
                Some(
                    ExtractionMatch::new(name.to_string(), caps.get(0)?.as_str())
                        .with_position(line.start(), line.end()),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_seller() {
        let text = "Oppgjør\nSelger: Godt Brød - Grünerløkka AS\nFakturadato: 01.01.2024";
        let seller = SellerExtractor::default().extract(text).unwrap();
        assert_eq!(seller.value, "Grünerløkka AS");
    }

    #[test]
    fn test_seller_keeps_inner_dashes() {
        let text = "Selger: Godt Brød - Torshov - Sandaker  \r\n";
        let seller = SellerExtractor::default().extract(text).unwrap();
        assert_eq!(seller.value, "Torshov - Sandaker");
    }

    #[test]
    fn test_other_provider_is_ignored() {
        let text = "Selger: Annen Leverandør - Majorstuen";
        assert!(SellerExtractor::default().extract(text).is_none());

        let seller = SellerExtractor::new("Annen Leverandør").extract(text).unwrap();
        assert_eq!(seller.value, "Majorstuen");
    }
}
