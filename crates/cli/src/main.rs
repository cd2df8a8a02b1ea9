//! CLI tool for extracting employee assessment records from PowerPoint decks.

use anyhow::{Context, Result};
use assess_core::{Dataset, Presentation};
use clap::{Parser, ValueEnum};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Extract one row per employee from an assessment deck.
#[derive(Parser, Debug)]
#[command(name = "assess-extract")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input PowerPoint file (.pptx)
    input: PathBuf,

    /// Output file
    #[arg(short, long, default_value = "employee_data.csv")]
    output: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// Print the dataset to stdout instead of writing to file
    #[arg(short, long)]
    print: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    eprintln!("Extracting data from slides...");

    let presentation = read_presentation(&args.input)?;
    if args.verbose {
        eprintln!(
            "  Found {} slides, {} tables",
            presentation.slides.len(),
            presentation.table_count()
        );
    }

    let dataset = assess_core::extract_dataset(&presentation);
    eprintln!("Extracted {} records.", dataset.len());

    if args.print {
        let stdout = io::stdout();
        write_dataset(&dataset, args.format, stdout.lock())?;
    } else {
        let file = File::create(&args.output)
            .with_context(|| format!("Failed to create {}", args.output.display()))?;
        write_dataset(&dataset, args.format, BufWriter::new(file))
            .with_context(|| format!("Failed to write to {}", args.output.display()))?;
        if args.verbose {
            eprintln!("Written to: {}", args.output.display());
        }
    }

    if !dataset.is_empty() {
        eprintln!("{}", dataset.preview());
    }

    Ok(())
}

/// Open and parse the input deck. Any failure here aborts the run.
fn read_presentation(input_path: &Path) -> Result<Presentation> {
    let file = File::open(input_path)
        .with_context(|| format!("Failed to open {}", input_path.display()))?;
    let reader = BufReader::new(file);

    let filename = input_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown");

    assess_pptx::load_presentation(reader, filename)
        .with_context(|| format!("Failed to read presentation {}", input_path.display()))
}

/// Serialize the dataset in the requested format.
fn write_dataset<W: Write>(dataset: &Dataset, format: OutputFormat, mut writer: W) -> Result<()> {
    match format {
        OutputFormat::Csv => dataset.write_csv(&mut writer)?,
        OutputFormat::Json => {
            writer.write_all(dataset.to_json()?.as_bytes())?;
            writer.write_all(b"\n")?;
        }
    }
    writer.flush()?;
    Ok(())
}
