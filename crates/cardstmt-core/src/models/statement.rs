//! Credit-card statement data models.

use serde::{Deserialize, Serialize};

/// Fields extracted from a credit-card statement.
///
/// Field order is the serialization order, so the JSON object always reads
/// `total_amount_due, minimum_due, due_date, interest_charged, credit_limit`.
/// Missing values serialize as `null` rather than being skipped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Total amount due (statement balance).
    pub total_amount_due: Option<f64>,

    /// Minimum amount due.
    pub minimum_due: Option<f64>,

    /// Payment due date, as it appeared in the text (title-cased).
    pub due_date: Option<String>,

    /// Whether the statement mentions interest or finance charges.
    pub interest_charged: bool,

    /// Credit limit.
    pub credit_limit: Option<f64>,
}

impl ExtractionResult {
    /// Create an empty result with every field unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of the nullable fields that are still unset.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();

        if self.total_amount_due.is_none() {
            missing.push("total_amount_due");
        }
        if self.minimum_due.is_none() {
            missing.push("minimum_due");
        }
        if self.due_date.is_none() {
            missing.push("due_date");
        }
        if self.credit_limit.is_none() {
            missing.push("credit_limit");
        }

        missing
    }

    /// Check the extracted values for internal consistency.
    ///
    /// Returns human-readable issues; the values themselves are never changed.
    pub fn validate(&self) -> Vec<String> {
        let mut issues: Vec<String> = self
            .missing_fields()
            .into_iter()
            .map(|field| format!("Missing {}", field))
            .collect();

        if let (Some(min), Some(total)) = (self.minimum_due, self.total_amount_due) {
            if min > total {
                issues.push(format!(
                    "Minimum due ({:.2}) exceeds total amount due ({:.2})",
                    min, total
                ));
            }
        }

        if let (Some(total), Some(limit)) = (self.total_amount_due, self.credit_limit) {
            if total > limit {
                issues.push(format!(
                    "Total amount due ({:.2}) exceeds credit limit ({:.2})",
                    total, limit
                ));
            }
        }

        issues
    }
}

/// Where the statement text came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    /// Text-based PDF (native text extraction).
    TextPdf,
    /// Scanned PDF (OCR on embedded page images).
    ScannedPdf,
    /// Direct image file.
    Image,
    /// Plain-text dump supplied by the caller.
    PlainText,
    /// Unknown source.
    #[default]
    Unknown,
}

impl SourceType {
    /// Whether the text for this source went through OCR.
    pub fn is_ocr(&self) -> bool {
        matches!(self, SourceType::ScannedPdf | SourceType::Image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_all_keys_in_order() {
        let json = serde_json::to_string(&ExtractionResult::new()).unwrap();
        assert_eq!(
            json,
            r#"{"total_amount_due":null,"minimum_due":null,"due_date":null,"interest_charged":false,"credit_limit":null}"#
        );
    }

    #[test]
    fn test_serializes_whole_floats_with_fraction() {
        let result = ExtractionResult {
            total_amount_due: Some(24560.75),
            minimum_due: Some(1200.0),
            due_date: Some("05/06/2024".to_string()),
            interest_charged: true,
            credit_limit: Some(50000.0),
        };

        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains(r#""minimum_due":1200.0"#));
        assert!(json.contains(r#""credit_limit":50000.0"#));
    }

    #[test]
    fn test_missing_fields() {
        let result = ExtractionResult {
            total_amount_due: Some(100.0),
            ..Default::default()
        };
        assert_eq!(
            result.missing_fields(),
            vec!["minimum_due", "due_date", "credit_limit"]
        );
    }

    #[test]
    fn test_validate_flags_inconsistent_amounts() {
        let result = ExtractionResult {
            total_amount_due: Some(500.0),
            minimum_due: Some(900.0),
            due_date: Some("01/02/2024".to_string()),
            interest_charged: false,
            credit_limit: Some(400.0),
        };

        let issues = result.validate();
        assert_eq!(issues.len(), 2);
        assert!(issues[0].starts_with("Minimum due"));
        assert!(issues[1].starts_with("Total amount due"));
    }

    #[test]
    fn test_source_type_ocr() {
        assert!(SourceType::ScannedPdf.is_ocr());
        assert!(SourceType::Image.is_ocr());
        assert!(!SourceType::TextPdf.is_ocr());
    }
}
