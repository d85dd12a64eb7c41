//! Fallback heuristics for statements without usable labels.
//!
//! Both passes look at every number token in the text. They only fill fields
//! that are still `None`, and take the result by value so they compose as
//! `fallback_minimum_due(text, fallback_from_numbers(text, result))`.

use tracing::debug;

use super::amounts::extract_number_tokens;
use crate::models::statement::ExtractionResult;

/// Smallest amount accepted as a minimum due.
pub const MINIMUM_DUE_FLOOR: f64 = 50.0;

/// Words that must appear before the minimum-due fallback runs.
const MINIMUM_KEYWORDS: [&str; 3] = ["minimum", "min", "mad"];

/// Fill `total_amount_due` with the first number token and `credit_limit`
/// with the largest one.
pub fn fallback_from_numbers(text: &str, mut result: ExtractionResult) -> ExtractionResult {
    let nums = extract_number_tokens(text);
    let Some(&first) = nums.first() else {
        return result;
    };

    if result.total_amount_due.is_none() {
        debug!("Total amount due from first number: {}", first);
        result.total_amount_due = Some(first);
    }

    if result.credit_limit.is_none() {
        let max = nums.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        debug!("Credit limit from largest number: {}", max);
        result.credit_limit = Some(max);
    }

    result
}

/// Fill `minimum_due` with the smallest plausible number token.
pub fn fallback_minimum_due(text: &str, result: ExtractionResult) -> ExtractionResult {
    fallback_minimum_due_with_floor(text, result, MINIMUM_DUE_FLOOR)
}

/// Minimum-due fallback with an explicit floor.
///
/// Candidates are at least `floor` and strictly below `total_amount_due`
/// when that is known. Skipped unless the text mentions a minimum.
pub fn fallback_minimum_due_with_floor(
    text: &str,
    mut result: ExtractionResult,
    floor: f64,
) -> ExtractionResult {
    if result.minimum_due.is_some() {
        return result;
    }

    if !MINIMUM_KEYWORDS.iter().any(|word| text.contains(word)) {
        return result;
    }

    let total_due = result.total_amount_due;
    let smallest = extract_number_tokens(text)
        .into_iter()
        .filter(|&n| n >= floor)
        .filter(|&n| total_due.is_none_or(|total| n < total))
        .reduce(f64::min);

    if let Some(min) = smallest {
        debug!("Minimum due from smallest candidate: {}", min);
        result.minimum_due = Some(min);
    }

    result
}
