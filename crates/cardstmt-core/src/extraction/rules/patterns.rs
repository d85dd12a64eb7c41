//! Common regex patterns for statement text extraction.
//!
//! All patterns expect normalized (lowercased, de-noised) text.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Normalization
    pub static ref NOISE: Regex = Regex::new(
        r"[^a-z0-9\s.,:/\-]"
    ).unwrap();

    pub static ref COMMA_SPACING: Regex = Regex::new(
        r"\s*,\s*"
    ).unwrap();

    pub static ref DOT_SPACING: Regex = Regex::new(
        r"\s*\.\s*"
    ).unwrap();

    pub static ref WHITESPACE_RUN: Regex = Regex::new(
        r"\s+"
    ).unwrap();

    // Value following a label: 24,560.75 / 1200 / 5.
    pub static ref LABEL_AMOUNT: Regex = Regex::new(
        r"\d[\d,]*\.?\d*"
    ).unwrap();

    // Comma-grouped amount with exactly two decimals: 1,200.00
    pub static ref NUMBER_TOKEN: Regex = Regex::new(
        r"\d{1,3}(?:,\d{3})*(?:\.\d{2})"
    ).unwrap();

    // Due dates
    pub static ref DATE_NUMERIC: Regex = Regex::new(
        r"\d{1,2}[-/]\d{1,2}[-/]\d{2,4}"
    ).unwrap();

    pub static ref DATE_MONTH_ABBR: Regex = Regex::new(
        r"\d{1,2}[-/](?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[-/]\d{2,4}"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_token_requires_two_decimals() {
        let found: Vec<&str> = NUMBER_TOKEN
            .find_iter("12.5 1,200.00 45.00 300")
            .map(|m| m.as_str())
            .collect();
        assert_eq!(found, vec!["1,200.00", "45.00"]);
    }

    #[test]
    fn test_number_token_splits_ungrouped_thousands() {
        // Without separators only the trailing group qualifies.
        let m = NUMBER_TOKEN.find("24560.75").unwrap();
        assert_eq!(m.as_str(), "560.75");
    }

    #[test]
    fn test_label_amount_takes_grouped_value() {
        let m = LABEL_AMOUNT.find("due: 24,560.75 on").unwrap();
        assert_eq!(m.as_str(), "24,560.75");
    }
}
