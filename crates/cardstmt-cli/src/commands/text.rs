//! Text command - run field extraction on an already-extracted text dump.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use clap::Args;

use cardstmt_core::{StatementParser, UniversalParser};

use super::output::{format_result, write_output, OutputFormat};

/// Arguments for the text command.
#[derive(Args)]
pub struct TextArgs {
    /// Text file, or `-` for stdin
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

pub async fn run(args: TextArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;

    let text = if args.input.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(&args.input)?
    };

    let result = UniversalParser::from_config(&config.extraction).parse(&text);
    let output = format_result(&result, args.format, config.output.indent)?;

    match &args.output {
        Some(path) => write_output(path, &output)?,
        None => println!("{}", output),
    }

    Ok(())
}
