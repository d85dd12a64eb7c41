//! Core library for credit-card statement field extraction.
//!
//! This crate provides:
//! - PDF processing (validity check, text-vs-scanned detection, text and image extraction)
//! - OCR of scanned statement pages
//! - Statement field extraction (total due, minimum due, credit limit, due date, interest)

pub mod error;
pub mod extraction;
pub mod models;
pub mod ocr;
pub mod pdf;

pub use error::{OcrError, PdfError, Result, StmtError};
pub use extraction::{normalize_text, StatementParser, UniversalParser};
pub use models::config::CardstmtConfig;
pub use models::statement::{ExtractionResult, SourceType};
pub use ocr::{load_image, ocr_pdf, OcrEngine, OcrResult, TextBox};
#[cfg(feature = "native")]
pub use ocr::PureOcrEngine;
pub use pdf::{is_valid_pdf, PdfExtractor, PdfProcessor, PdfType};
