//! Batch command - reconcile many settlements into one ledger file.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use oppgjor_core::settlement::rules::format_amount;
use oppgjor_core::{BatchProcessor, BatchReport, DocumentProcessor, LedgerWriter, LineItem};

use super::config::load_config;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob patterns, processed in the given order
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Ledger file to write as CSV, not .xlsx (rows: Selger, Dato, Konto, Beløp)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write a per-document status CSV
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Stop at the first document that fails
    #[arg(long)]
    fail_fast: bool,
}

/// A selected document, displayed by file name.
struct Document(PathBuf);

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self
            .0
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| self.0.to_string_lossy());
        write!(f, "{}", name)
    }
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let files = expand_inputs(&args.inputs)?;
    if files.is_empty() {
        anyhow::bail!("No matching files found for: {}", args.inputs.join(" "));
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    // Fail on a bad export setting before any document is read
    let writer = LedgerWriter::from_config(&config.export)?;
    let processor = DocumentProcessor::from_config(&config);

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let report = BatchProcessor::new()
        .with_fail_fast(args.fail_fast)
        .run(files.into_iter().map(Document), |doc| {
            let result = processor.process_file(&doc.0);
            match &result {
                Ok(processed) => {
                    for warning in &processed.warnings {
                        warn!("{}: {}", doc, warning);
                    }
                    pb.suspend(|| {
                        println!(
                            "{} Processed {}: {} rows found.",
                            style("✓").green(),
                            doc,
                            processed.items.len()
                        )
                    });
                }
                Err(e) => {
                    pb.suspend(|| {
                        println!("{} Error processing {}: {}", style("✗").red(), doc, e)
                    });
                }
            }
            pb.inc(1);
            result.map(|processed| processed.items)
        });

    pb.finish_and_clear();

    if let Some(summary_path) = &args.summary {
        write_summary(summary_path, &report)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    print_report(&report, start);

    if report.aborted {
        anyhow::bail!("Batch stopped after a failed document (--fail-fast)");
    }

    if report.is_empty() {
        println!(
            "{} No data found in the selected files.",
            style("ℹ").blue()
        );
        return Ok(());
    }

    match &args.output {
        Some(output) => {
            writer.write_to_path(output, &report.items)?;
            println!(
                "{} Data saved to {}",
                style("✓").green(),
                output.display()
            );
        }
        None => {
            println!(
                "{} No output file given (--output), skipping export.",
                style("ℹ").blue()
            );
        }
    }

    println!();
    println!("{}", style("Collected rows:").bold());
    print!("{}", format_rows(&report.items));

    Ok(())
}

/// Expand glob patterns in place; plain paths are kept as given.
fn expand_inputs(inputs: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        if !input.contains(['*', '?', '[']) {
            files.push(PathBuf::from(input));
            continue;
        }

        let matched: Vec<PathBuf> = glob(input)?
            .filter_map(|r| r.ok())
            .filter(|p| is_supported(p))
            .collect();
        debug!("{} matched {} files", input, matched.len());
        files.extend(matched);
    }

    Ok(files)
}

fn is_supported(path: &Path) -> bool {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    matches!(ext.to_lowercase().as_str(), "pdf" | "txt")
}

fn print_report(report: &BatchReport, start: Instant) {
    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        report.document_count(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed, {} rows",
        style(report.processed.len()).green(),
        style(report.failures.len()).red(),
        report.items.len()
    );

    if !report.failures.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for failure in &report.failures {
            println!("  - {}: {}", failure.document, failure.error);
        }
    }
}

fn format_rows(items: &[LineItem]) -> String {
    let mut output = format!("{:<28} {:<10} {:>8} {:>16}\n", "Selger", "Dato", "Konto", "Beløp");

    for item in items {
        output.push_str(&format!(
            "{:<28} {:<10} {:>8} {:>16}\n",
            item.seller.as_deref().unwrap_or("-"),
            item.date.as_deref().unwrap_or("-"),
            item.account.code(),
            format_amount(item.amount)
        ));
    }

    output
}

fn write_summary(path: &Path, report: &BatchReport) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["document", "status", "rows", "error"])?;

    let mut rows: Vec<(usize, [String; 4])> = report
        .processed
        .iter()
        .map(|d| (d.position, [d.document.clone(), "success".into(), d.rows.to_string(), String::new()]))
        .chain(report.failures.iter().map(|f| {
            (f.position, [f.document.clone(), "error".into(), "0".into(), f.error.clone()])
        }))
        .collect();
    rows.sort_by_key(|(position, _)| *position);

    for (_, record) in rows {
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}
