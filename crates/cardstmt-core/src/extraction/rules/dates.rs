//! Due date extraction for statement text.

use super::patterns::{DATE_MONTH_ABBR, DATE_NUMERIC};
use super::{ExtractionMatch, FieldExtractor};

/// Due date extractor.
///
/// Numeric dates (`05/06/2024`) are tried first; dates with a month
/// abbreviation (`05-jan-2024`) only when no numeric date exists anywhere.
pub struct DueDateExtractor;

impl DueDateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DueDateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DueDateExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        [&*DATE_NUMERIC, &*DATE_MONTH_ABBR]
            .into_iter()
            .find_map(|pattern| pattern.find(text))
            .map(|m| {
                ExtractionMatch::new(title_case(m.as_str()), m.as_str())
                    .with_position(m.start(), m.end())
            })
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        [&*DATE_NUMERIC, &*DATE_MONTH_ABBR]
            .into_iter()
            .flat_map(|pattern| pattern.find_iter(text))
            .map(|m| {
                ExtractionMatch::new(title_case(m.as_str()), m.as_str())
                    .with_position(m.start(), m.end())
            })
            .collect()
    }
}

/// Extract the payment due date from normalized text.
pub fn extract_due_date(text: &str) -> Option<String> {
    DueDateExtractor::new().extract(text).map(|m| m.value)
}

/// Uppercase the first letter of every run of letters and lowercase the
/// rest. Digits and separators pass through unchanged.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;

    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }

    out
}
