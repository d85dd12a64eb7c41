//! Rule-based field extractors for credit-card statements.

pub mod amounts;
pub mod dates;
pub mod fallback;
pub mod interest;
pub mod lexicon;
pub mod patterns;

pub use amounts::{extract_amount_near_label, extract_number_tokens, parse_amount, LabelAmountExtractor, NumberTokenExtractor};
pub use dates::{extract_due_date, title_case, DueDateExtractor};
pub use fallback::{fallback_from_numbers, fallback_minimum_due, fallback_minimum_due_with_floor};
pub use interest::detect_interest;
pub use lexicon::{Field, Lexicon, LEXICON};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// An extracted value with where it came from.
#[derive(Debug, Clone)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Position in source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched (label or raw token).
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}
