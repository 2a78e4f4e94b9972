//! Process command - extract and reconcile a single settlement.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, warn};

use oppgjor_core::models::config::OppgjorConfig;
use oppgjor_core::settlement::rules::format_amount;
use oppgjor_core::{DocumentProcessor, LedgerWriter, LineItem, ProcessedDocument, Reconciliation};

use super::config::load_config;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF, or TXT holding page text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Print the extracted first-page text before the results
    #[arg(long)]
    show_text: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text summary
    Text,
    /// JSON output
    Json,
    /// Ledger rows (Selger, Dato, Konto, Beløp)
    Csv,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    items: &'a [LineItem],
    reconciliation: &'a Reconciliation,
    warnings: &'a [String],
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(format!("Reading {}...", args.input.display()));

    let processor = DocumentProcessor::from_config(&config);

    if args.show_text {
        let text = processor.read_page_text(&args.input)?;
        pb.suspend(|| println!("{}\n{}", style("First page text:").bold(), text));
    }

    pb.set_message("Extracting settlement fields...");
    let document = processor.process_file(&args.input)?;
    pb.finish_and_clear();

    for warning in &document.warnings {
        warn!("{}", warning);
    }

    let output = format_document(&document, args.format, &config)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        print!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn format_document(
    document: &ProcessedDocument,
    format: OutputFormat,
    config: &OppgjorConfig,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(format_text(document)),
        OutputFormat::Json => {
            let json = JsonOutput {
                items: &document.items,
                reconciliation: &document.reconciliation,
                warnings: &document.warnings,
            };
            Ok(format!("{}\n", serde_json::to_string_pretty(&json)?))
        }
        OutputFormat::Csv => Ok(LedgerWriter::from_config(&config.export)?.to_string(&document.items)?),
    }
}

fn format_text(document: &ProcessedDocument) -> String {
    let mut output = String::new();

    let first = document.items.first();
    let seller = first.and_then(|i| i.seller.as_deref()).unwrap_or("-");
    let date = first.and_then(|i| i.date.as_deref()).unwrap_or("-");
    output.push_str(&format!("Seller: {}\n", seller));
    output.push_str(&format!("Date:   {}\n\n", date));

    if document.items.is_empty() {
        output.push_str("No line items found.\n");
    }

    for item in &document.items {
        output.push_str(&format!(
            "  {:>8}  {:<24} {:>16} NOK\n",
            item.account.code(),
            item.account.label(),
            format_amount(item.amount)
        ));
    }

    let r = &document.reconciliation;
    output.push_str("\nReconciliation:\n");
    output.push_str(&format!("  Payout:   {:>16} NOK\n", format_amount(r.payout)));
    output.push_str(&format!("  Fees:     {:>16} NOK\n", format_amount(r.fees)));
    output.push_str(&format!("  Sales:    {:>16} NOK\n", format_amount(r.sales)));
    output.push_str(&format!("  Residual: {:>16} NOK\n", format_amount(r.residual)));

    output
}
