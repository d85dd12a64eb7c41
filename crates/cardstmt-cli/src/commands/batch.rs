//! Batch command - extract fields from many statements.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use cardstmt_core::{ExtractionResult, SourceType, StatementParser, UniversalParser};

use super::output::{csv_fields, format_result, write_output, OutputFormat, CSV_HEADER};
use super::reader::{DocumentReader, SUPPORTED_EXTENSIONS};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern for input files
    #[arg(required = true)]
    input: String,

    /// Directory for per-file results
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also write summary.csv
    #[arg(long)]
    summary: bool,

    /// Keep going when a file fails
    #[arg(long)]
    continue_on_error: bool,

    /// OCR model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,
}

struct FileOutcome {
    path: PathBuf,
    source: Option<SourceType>,
    result: Option<ExtractionResult>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = super::load_config(config_path)?;
    if let Some(model_dir) = &args.model_dir {
        config.ocr.model_dir = model_dir.clone();
    }

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("")
                .to_lowercase();
            SUPPORTED_EXTENSIONS.contains(&ext.as_str())
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(output_dir) = &args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    // Per-file steps are not shown; the OCR engine is shared across files.
    let step_pb = ProgressBar::hidden();
    let mut reader = DocumentReader::new(&config);
    let parser = UniversalParser::from_config(&config.extraction);

    let mut outcomes = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let read = reader.read(&path, &step_pb);
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match read {
            Ok((text, source)) => {
                let result = parser.parse(&text);
                debug!("{}: {:?}", path.display(), result);
                outcomes.push(FileOutcome {
                    path,
                    source: Some(source),
                    result: Some(result),
                    error: None,
                    processing_time_ms,
                });
            }
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    outcomes.push(FileOutcome {
                        path,
                        source: None,
                        result: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    overall_pb.abandon();
                    anyhow::bail!("Processing failed for {}: {}", path.display(), error_msg);
                }
            }
        }

        overall_pb.inc(1);
    }

    overall_pb.finish_with_message("Complete");

    if let Some(output_dir) = &args.output_dir {
        let written: Vec<_> = outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().map(|r| (o.path.as_path(), r)))
            .collect();
        let paths: Vec<&Path> = written.iter().map(|(path, _)| *path).collect();
        let names = output_names(&paths, args.format.extension());

        for ((_, result), name) in written.iter().zip(names) {
            let output_path = output_dir.join(name);
            let content = format_result(result, args.format, config.output.indent)?;
            write_output(&output_path, &content)?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &outcomes)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed: Vec<_> = outcomes.iter().filter(|o| o.error.is_some()).collect();
    let succeeded = outcomes.len() - failed.len();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        outcomes.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(succeeded).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for outcome in &failed {
            println!(
                "  - {}: {}",
                outcome.path.display(),
                outcome.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

/// Output file names for per-file results. Inputs sharing a stem keep their
/// extension (`a.pdf.json`); any remaining clash gets a numeric suffix.
fn output_names(paths: &[&Path], extension: &str) -> Vec<String> {
    let stem = |p: &Path| {
        p.file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("statement")
            .to_string()
    };

    let mut stem_counts: HashMap<String, usize> = HashMap::new();
    for path in paths {
        *stem_counts.entry(stem(*path)).or_default() += 1;
    }

    let mut used = HashSet::new();
    paths
        .iter()
        .map(|path| {
            let base = stem(*path);
            let base = if stem_counts[&base] > 1 {
                path.file_name()
                    .and_then(|s| s.to_str())
                    .map(str::to_string)
                    .unwrap_or(base)
            } else {
                base
            };

            let mut name = format!("{}.{}", base, extension);
            let mut n = 2;
            while !used.insert(name.clone()) {
                name = format!("{}-{}.{}", base, n, extension);
                n += 1;
            }
            name
        })
        .collect()
}

fn source_label(source: SourceType) -> &'static str {
    match source {
        SourceType::TextPdf => "text_pdf",
        SourceType::ScannedPdf => "scanned_pdf",
        SourceType::Image => "image",
        SourceType::PlainText => "text",
        SourceType::Unknown => "unknown",
    }
}

fn write_summary(path: &Path, outcomes: &[FileOutcome]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    let mut header = vec!["filename", "status", "source"];
    header.extend(CSV_HEADER);
    header.extend(["processing_time_ms", "error"]);
    wtr.write_record(&header)?;

    for outcome in outcomes {
        let filename = outcome
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");
        let source = outcome.source.map(source_label).unwrap_or("");
        let time = outcome.processing_time_ms.to_string();

        let fields = match &outcome.result {
            Some(result) => csv_fields(result),
            None => Default::default(),
        };
        let status = if outcome.result.is_some() { "success" } else { "error" };

        let mut record = vec![filename, status, source];
        record.extend(fields.iter().map(String::as_str));
        record.push(&time);
        record.push(outcome.error.as_deref().unwrap_or(""));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}
