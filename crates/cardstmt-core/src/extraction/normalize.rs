//! Text normalization for PDF and OCR output.

use super::rules::patterns::{COMMA_SPACING, DOT_SPACING, NOISE, WHITESPACE_RUN};

/// Normalize raw statement text for extraction.
///
/// Lowercases, blanks out anything that is not a letter, digit, whitespace or
/// one of `. , : / -`, then repairs OCR spacing around separators so
/// `"24 ,560 .75"` becomes `"24,560.75"`. Dots in prose are collapsed the
/// same way. Idempotent.
pub fn normalize_text(text: &str) -> String {
    let text = text.to_lowercase();
    let text = NOISE.replace_all(&text, " ");
    let text = COMMA_SPACING.replace_all(&text, ",");
    let text = DOT_SPACING.replace_all(&text, ".");
    let text = WHITESPACE_RUN.replace_all(&text, " ");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_strips_symbols() {
        assert_eq!(
            normalize_text("Total Amount Due: ₹24,560.75*"),
            "total amount due: 24,560.75"
        );
    }

    #[test]
    fn test_repairs_ocr_spacing() {
        assert_eq!(normalize_text("due 24 ,560 .75 now"), "due 24,560.75 now");
    }

    #[test]
    fn test_keeps_date_separators() {
        assert_eq!(normalize_text("Due  Date:\n05/06/2024"), "due date: 05/06/2024");
        assert_eq!(normalize_text("05-Jan-2024"), "05-jan-2024");
    }

    #[test]
    fn test_collapses_prose_dots() {
        assert_eq!(normalize_text("end . of statement"), "end.of statement");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "",
            "   ",
            "Total Amount Due: 24,560.75 Minimum Amount: 1,200.00",
            "£ 1 , 000 . 00 — Paid (thank you!)\t\r\n",
            "İstanbul ΣΑΣ 12 . 50",
        ];
        for sample in samples {
            let once = normalize_text(sample);
            assert_eq!(normalize_text(&once), once, "input {:?}", sample);
        }
    }

    #[test]
    fn test_empty() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text("$$$"), "");
    }
}
