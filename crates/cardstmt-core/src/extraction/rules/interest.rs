//! Interest / finance charge detection.

use super::lexicon::{Field, LEXICON};

/// Phrases that mean no interest is charged. They override any keyword.
const NEGATIONS: [&str; 2] = ["no interest", "interest free"];

/// Whether normalized statement text indicates interest is charged.
pub fn detect_interest(text: &str) -> bool {
    if NEGATIONS.iter().any(|phrase| text.contains(phrase)) {
        return false;
    }

    LEXICON
        .labels(Field::Interest)
        .iter()
        .any(|keyword| text.contains(keyword))
}
