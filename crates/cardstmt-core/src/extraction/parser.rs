//! Statement parser combining label, pattern, and fallback extraction.

use std::time::Instant;

use tracing::debug;

use crate::models::config::ExtractionConfig;
use crate::models::statement::ExtractionResult;

use super::normalize::normalize_text;
use super::rules::{
    amounts::{LabelAmountExtractor, CONTEXT_WINDOW},
    dates::extract_due_date,
    fallback::{fallback_from_numbers, fallback_minimum_due_with_floor, MINIMUM_DUE_FLOOR},
    interest::detect_interest,
    lexicon::{Field, Lexicon, LEXICON},
    FieldExtractor,
};

/// Trait for statement parsing.
///
/// Parsing never fails: fields that cannot be found are left as `None`
/// (or `false` for `interest_charged`).
pub trait StatementParser {
    /// Parse statement fields from raw PDF or OCR text.
    fn parse(&self, text: &str) -> ExtractionResult;
}

/// Bank-agnostic statement parser.
///
/// Holds only read-only settings, so one instance can be shared freely
/// between threads.
#[derive(Debug, Clone)]
pub struct UniversalParser {
    lexicon: &'static Lexicon,
    /// Characters scanned after a label for its value.
    context_window: usize,
    /// Smallest amount the minimum-due fallback accepts.
    minimum_due_floor: f64,
}

impl UniversalParser {
    /// Create a parser with the built-in lexicon and default settings.
    pub fn new() -> Self {
        Self {
            lexicon: &LEXICON,
            context_window: CONTEXT_WINDOW,
            minimum_due_floor: MINIMUM_DUE_FLOOR,
        }
    }

    /// Create a parser from extraction configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new()
            .with_context_window(config.context_window)
            .with_minimum_due_floor(config.minimum_due_floor)
    }

    /// Set the label context window.
    pub fn with_context_window(mut self, window: usize) -> Self {
        self.context_window = window;
        self
    }

    /// Set the minimum-due floor.
    pub fn with_minimum_due_floor(mut self, floor: f64) -> Self {
        self.minimum_due_floor = floor;
        self
    }

    fn amount_near_label(&self, text: &str, field: Field) -> Option<f64> {
        let found = LabelAmountExtractor::new(self.lexicon.labels(field))
            .with_window(self.context_window)
            .extract(text);

        match &found {
            Some(m) => debug!("{} = {} (label {:?})", field.name(), m.value, m.source),
            None => debug!("{} not found near any label", field.name()),
        }

        found.map(|m| m.value)
    }
}

impl Default for UniversalParser {
    fn default() -> Self {
        Self::new()
    }
}

impl StatementParser for UniversalParser {
    fn parse(&self, raw_text: &str) -> ExtractionResult {
        let start = Instant::now();
        let text = normalize_text(raw_text);

        debug!(
            "Parsing statement: {} raw chars, {} normalized",
            raw_text.len(),
            text.len()
        );

        let result = ExtractionResult {
            total_amount_due: self.amount_near_label(&text, Field::TotalAmountDue),
            minimum_due: self.amount_near_label(&text, Field::MinimumDue),
            due_date: extract_due_date(&text),
            interest_charged: detect_interest(&text),
            credit_limit: self.amount_near_label(&text, Field::CreditLimit),
        };

        // Fallbacks for unlabeled summaries; minimum due reads the total.
        let result = fallback_from_numbers(&text, result);
        let result = fallback_minimum_due_with_floor(&text, result, self.minimum_due_floor);

        debug!(
            "Parsed statement in {:?}, missing: {:?}",
            start.elapsed(),
            result.missing_fields()
        );

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_labeled_statement() {
        let text = "Total Amount Due: 24,560.75 Minimum Amount: 1,200.00 \
                    Credit Limit: 50,000.00 Due Date: 05/06/2024 Finance Charges Applied";

        let result = UniversalParser::new().parse(text);

        assert_eq!(
            result,
            ExtractionResult {
                total_amount_due: Some(24560.75),
                minimum_due: Some(1200.0),
                due_date: Some("05/06/2024".to_string()),
                interest_charged: true,
                credit_limit: Some(50000.0),
            }
        );
    }

    #[test]
    fn test_parse_empty() {
        let result = UniversalParser::new().parse("");
        assert_eq!(result, ExtractionResult::new());
    }

    #[test]
    fn test_parse_garbage() {
        let result = UniversalParser::new().parse("@@@ ### ~~~ |||");
        assert_eq!(result, ExtractionResult::new());
    }

    #[test]
    fn test_parse_unlabeled_uses_fallbacks() {
        let text = "STATEMENT\nRs. 8,450.00\nRs. 422.50\nRs. 1,00,000.00 min";

        let result = UniversalParser::new().parse(text);

        // "1,00,000.00" is not a valid grouping and only yields "00,000.00" (0.0).
        assert_eq!(result.total_amount_due, Some(8450.0));
        assert_eq!(result.credit_limit, Some(8450.0));
        assert_eq!(result.minimum_due, Some(422.5));
        assert_eq!(result.due_date, None);
        assert!(!result.interest_charged);
    }

    #[test]
    fn test_label_value_wins_over_fallback() {
        let text = "previous 99,999.00 credit limit 20,000 amount due 1,500.00";

        let result = UniversalParser::new().parse(text);

        assert_eq!(result.credit_limit, Some(20000.0));
        assert_eq!(result.total_amount_due, Some(1500.0));
    }

    #[test]
    fn test_configured_parser() {
        let config = ExtractionConfig {
            context_window: 10,
            minimum_due_floor: 1.0,
        };
        let parser = UniversalParser::from_config(&config);

        let result = parser.parse("credit limit is listed below 5,000.00 minimum 20.00");

        // Window too small for the label value, so the largest number is used.
        assert_eq!(result.credit_limit, Some(5000.0));
        assert_eq!(result.minimum_due, Some(20.0));
    }
}
