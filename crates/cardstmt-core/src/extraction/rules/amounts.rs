//! Amount extraction for statement text.
//!
//! Two strategies live here: label proximity, which reads the first number
//! after a known label, and number tokens, which collect every comma-grouped
//! two-decimal amount for the fallback heuristics.

use tracing::trace;

use super::patterns::{LABEL_AMOUNT, NUMBER_TOKEN};
use super::{ExtractionMatch, FieldExtractor};

/// Characters scanned forward from a matched label.
pub const CONTEXT_WINDOW: usize = 250;

/// Reads the first number following the highest-priority label present.
pub struct LabelAmountExtractor<'a> {
    labels: &'a [&'a str],
    window: usize,
}

impl<'a> LabelAmountExtractor<'a> {
    pub fn new(labels: &'a [&'a str]) -> Self {
        Self {
            labels,
            window: CONTEXT_WINDOW,
        }
    }

    /// Set the number of characters scanned after a label.
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Value following a single label, if the label occurs and a parseable
    /// number starts within the window.
    fn amount_after(&self, text: &str, label: &str) -> Option<ExtractionMatch<f64>> {
        let start = text.find(label)?;
        let context = char_window(text, start, self.window);

        let m = LABEL_AMOUNT.find(context)?;
        match parse_amount(m.as_str()) {
            Some(value) => Some(
                ExtractionMatch::new(value, label)
                    .with_position(start + m.start(), start + m.end()),
            ),
            None => {
                trace!("Unparseable amount {:?} after label {:?}", m.as_str(), label);
                None
            }
        }
    }
}

impl FieldExtractor for LabelAmountExtractor<'_> {
    type Output = ExtractionMatch<f64>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.labels
            .iter()
            .find_map(|label| self.amount_after(text, label))
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.labels
            .iter()
            .filter_map(|label| self.amount_after(text, label))
            .collect()
    }
}

/// Comma-grouped amounts with exactly two decimal digits, in document order.
pub struct NumberTokenExtractor;

impl NumberTokenExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NumberTokenExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for NumberTokenExtractor {
    type Output = ExtractionMatch<f64>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        NUMBER_TOKEN
            .find_iter(text)
            .filter_map(|m| {
                parse_amount(m.as_str()).map(|value| {
                    ExtractionMatch::new(value, m.as_str()).with_position(m.start(), m.end())
                })
            })
            .collect()
    }
}

/// Extract the amount following the first label (in list order) that yields
/// a parseable number within 250 characters.
///
/// Label order decides, not position in the text: with labels
/// `["amount due", "new balance"]`, `"new balance 500.00 amount due 300.00"`
/// gives `300.0`.
pub fn extract_amount_near_label(text: &str, labels: &[&str]) -> Option<f64> {
    LabelAmountExtractor::new(labels).extract(text).map(|m| m.value)
}

/// All number tokens in the text as floats.
pub fn extract_number_tokens(text: &str) -> Vec<f64> {
    NumberTokenExtractor::new()
        .extract_all(text)
        .into_iter()
        .map(|m| m.value)
        .collect()
}

/// Parse an amount with comma thousands separators (e.g. "24,560.75").
pub fn parse_amount(s: &str) -> Option<f64> {
    s.replace(',', "").parse::<f64>().ok()
}

/// Slice of at most `len` characters starting at byte offset `start`.
fn char_window(text: &str, start: usize, len: usize) -> &str {
    let rest = &text[start..];
    match rest.char_indices().nth(len) {
        Some((end, _)) => &rest[..end],
        None => rest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("24,560.75"), Some(24560.75));
        assert_eq!(parse_amount("1,200"), Some(1200.0));
        assert_eq!(parse_amount("5."), Some(5.0));
        assert_eq!(parse_amount(""), None);
    }

    #[test]
    fn test_label_priority_beats_position() {
        let text = "new balance 500.00 amount due 300.00";
        assert_eq!(
            extract_amount_near_label(text, &["amount due", "new balance"]),
            Some(300.0)
        );
    }

    #[test]
    fn test_falls_through_to_later_label() {
        let text = "statement summary new balance: 1,250.50";
        assert_eq!(
            extract_amount_near_label(text, &["amount due", "new balance"]),
            Some(1250.5)
        );
    }

    #[test]
    fn test_label_without_following_number() {
        let text = "amount due see reverse";
        assert_eq!(extract_amount_near_label(text, &["amount due"]), None);
    }

    #[test]
    fn test_no_label() {
        assert_eq!(extract_amount_near_label("1,000.00", &["credit limit"]), None);
    }

    #[test]
    fn test_window_boundary() {
        // Label is 12 chars, so 237 filler chars put the digit at offset 249.
        let inside = format!("credit limit{}7", "x".repeat(237));
        assert_eq!(extract_amount_near_label(&inside, &["credit limit"]), Some(7.0));

        let outside = format!("credit limit{}7", "x".repeat(238));
        assert_eq!(extract_amount_near_label(&outside, &["credit limit"]), None);
    }

    #[test]
    fn test_window_counts_characters_not_bytes() {
        let text = format!("credit limit{}7", "é".repeat(237));
        assert_eq!(extract_amount_near_label(&text, &["credit limit"]), Some(7.0));
    }

    #[test]
    fn test_custom_window() {
        let text = "credit limit xxxxx 900";
        let extractor = LabelAmountExtractor::new(&["credit limit"]).with_window(15);
        assert!(extractor.extract(text).is_none());

        let extractor = LabelAmountExtractor::new(&["credit limit"]).with_window(30);
        let m = extractor.extract(text).unwrap();
        assert_eq!(m.value, 900.0);
        assert_eq!(m.source, "credit limit");
        assert_eq!(m.position, Some((19, 22)));
    }

    #[test]
    fn test_extract_all_reports_each_label() {
        let text = "new balance 500.00 amount due 300.00";
        let extractor = LabelAmountExtractor::new(&["amount due", "new balance", "credit line"]);
        let values: Vec<f64> = extractor.extract_all(text).into_iter().map(|m| m.value).collect();
        assert_eq!(values, vec![300.0, 500.0]);
    }

    #[test]
    fn test_extract_number_tokens() {
        let text = "paid 45.00 then 1,200.00 and 7 items on 05/06/2024 ref 12.5";
        assert_eq!(extract_number_tokens(text), vec![45.0, 1200.0]);
    }
}
