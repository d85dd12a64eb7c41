//! Process command - extract fields from a single statement file.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use cardstmt_core::{StatementParser, UniversalParser};

use super::output::{format_result, write_output, OutputFormat};
use super::reader::DocumentReader;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF, image, or .txt)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long, conflicts_with = "save")]
    output: Option<PathBuf>,

    /// Save to the configured output path (output/result.json by default)
    #[arg(long)]
    save: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// OCR model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,

    /// Skip OCR and use only PDF text extraction
    #[arg(long)]
    text_only: bool,

    /// Print the start of OCR text to stderr
    #[arg(long)]
    show_text: bool,

    /// Report missing or inconsistent fields
    #[arg(long)]
    validate: bool,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = super::load_config(config_path)?;
    if let Some(model_dir) = &args.model_dir {
        config.ocr.model_dir = model_dir.clone();
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")?
            .progress_chars("##-"),
    );

    let mut reader = DocumentReader::new(&config)
        .with_text_only(args.text_only)
        .with_show_text(args.show_text);
    let (text, source) = reader.read(&args.input, &pb)?;

    debug!("Read {} chars of text from {:?} source", text.len(), source);

    pb.set_message("Extracting statement fields...");
    pb.set_position(70);

    let result = UniversalParser::from_config(&config.extraction).parse(&text);

    pb.set_position(100);
    pb.finish_and_clear();

    if args.validate {
        let issues = result.validate();
        if !issues.is_empty() {
            eprintln!("{}", style("Validation issues:").yellow());
            for issue in &issues {
                eprintln!("  - {}", issue);
            }
        }
    }

    let output = format_result(&result, args.format, config.output.indent)?;

    let output_path = if args.save {
        Some(config.output.result_path())
    } else {
        args.output.clone()
    };

    match output_path {
        Some(path) => {
            write_output(&path, &output)?;
            println!(
                "{} Output written to {}",
                style("✓").green(),
                path.display()
            );
        }
        None => println!("{}", output),
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
