//! Statement field extraction.
//!
//! Raw text goes through [`normalize_text`], then label-proximity and
//! pattern extractors, then the number-based fallbacks.

mod normalize;
mod parser;
pub mod rules;

pub use normalize::normalize_text;
pub use parser::{StatementParser, UniversalParser};
