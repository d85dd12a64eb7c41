//! Output formatting for extraction results.

use std::fs;
use std::path::Path;

use serde::Serialize;

use cardstmt_core::ExtractionResult;

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

/// Render a result in the requested format. `indent` applies to JSON only;
/// 0 gives compact output.
pub fn format_result(
    result: &ExtractionResult,
    format: OutputFormat,
    indent: usize,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => format_json(result, indent),
        OutputFormat::Csv => format_csv(result),
        OutputFormat::Text => Ok(format_text(result)),
    }
}

/// Write rendered output, creating parent directories as needed.
pub fn write_output(path: &Path, content: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

fn format_json(result: &ExtractionResult, indent: usize) -> anyhow::Result<String> {
    if indent == 0 {
        return Ok(serde_json::to_string(result)?);
    }

    let indent = vec![b' '; indent];
    let formatter = serde_json::ser::PrettyFormatter::with_indent(&indent);
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    result.serialize(&mut ser)?;

    Ok(String::from_utf8(buf)?)
}

fn format_csv(result: &ExtractionResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(CSV_HEADER)?;
    wtr.write_record(csv_fields(result))?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

/// Column names shared by single-result CSV and the batch summary.
pub const CSV_HEADER: [&str; 5] = [
    "total_amount_due",
    "minimum_due",
    "due_date",
    "interest_charged",
    "credit_limit",
];

/// Result values in `CSV_HEADER` order. Missing values are empty.
pub fn csv_fields(result: &ExtractionResult) -> [String; 5] {
    [
        format_amount(result.total_amount_due),
        format_amount(result.minimum_due),
        result.due_date.clone().unwrap_or_default(),
        result.interest_charged.to_string(),
        format_amount(result.credit_limit),
    ]
}

fn format_amount(amount: Option<f64>) -> String {
    amount.map(|a| format!("{:.2}", a)).unwrap_or_default()
}

fn format_text(result: &ExtractionResult) -> String {
    let show = |amount: Option<f64>| {
        amount
            .map(|a| format!("{:.2}", a))
            .unwrap_or_else(|| "-".to_string())
    };

    let mut output = String::new();
    output.push_str(&format!("Total amount due:  {}\n", show(result.total_amount_due)));
    output.push_str(&format!("Minimum due:       {}\n", show(result.minimum_due)));
    output.push_str(&format!(
        "Due date:          {}\n",
        result.due_date.as_deref().unwrap_or("-")
    ));
    output.push_str(&format!(
        "Interest charged:  {}\n",
        if result.interest_charged { "yes" } else { "no" }
    ));
    output.push_str(&format!("Credit limit:      {}\n", show(result.credit_limit)));
    output
}
