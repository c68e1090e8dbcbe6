//! PDF Anonymization CLI Application.
//!
//! This binary provides a command-line interface for the anonymizer library,
//! with redaction, text extraction and dry-run scanning modes.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use anonymizer::ner::{CommandRecognizer, StreetLexiconRecognizer};
use anonymizer::{
    AnonymizationService, AnonymizerConfig, DocumentAnonymizer, EntityRecognizer, MupdfBackend,
    UnchangedPolicy,
};

/// PDF Anonymization Tool
///
/// Detects and securely redacts personal data (CPF, CNPJ, e-mail, phone,
/// CEP, street addresses) in PDF documents.
/// By default, performs redaction. Use 'extract' or 'scan' to inspect a document.
#[derive(Parser)]
#[command(name = "anonymizer")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Input PDF file path
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output PDF file path
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Minimum span length in characters (overrides the config file)
    #[arg(long, value_name = "N", global = true)]
    min_span_chars: Option<usize>,

    /// Vertical inset factor for redaction bars (overrides the config file)
    #[arg(long, value_name = "FACTOR", global = true)]
    height_inset: Option<f32>,

    /// External NER program; reads page text on stdin, prints JSON entities
    #[arg(long, value_name = "COMMAND", global = true, conflicts_with = "no_ner")]
    ner_command: Option<String>,

    /// Disable address detection (patterns only)
    #[arg(long, global = true)]
    no_ner: bool,

    /// Copy the input to the output path when nothing needs redacting
    #[arg(long)]
    copy_unchanged: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract reading-order text from a PDF (what the detectors see)
    Extract {
        /// Input PDF file path
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Output text file (optional, defaults to stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// List the spans that would be redacted, without modifying anything
    Scan {
        /// Input PDF file path
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,
    },
}

/// Command handler with dependency injection.
struct AnonymizationHandler {
    service: AnonymizationService<MupdfBackend>,
    verbose: bool,
}

impl AnonymizationHandler {
    /// Creates a handler from the parsed command line.
    fn new(cli: &Cli) -> Result<Self> {
        let config = build_config(cli)?;
        let mut anonymizer = DocumentAnonymizer::new(MupdfBackend::new()).with_config(config);
        if let Some(recognizer) = build_recognizer(cli)? {
            anonymizer = anonymizer.with_recognizer(recognizer);
        }

        let policy = if cli.copy_unchanged {
            UnchangedPolicy::CopyOriginal
        } else {
            UnchangedPolicy::Skip
        };

        Ok(Self {
            service: AnonymizationService::new(anonymizer).with_unchanged_policy(policy),
            verbose: cli.verbose,
        })
    }

    /// Executes an anonymization.
    fn anonymize(&self, input: &Path, output: &Path) -> Result<()> {
        if !input.exists() {
            anyhow::bail!("Input file does not exist: {}", input.display());
        }

        if self.verbose {
            let config = self.service.anonymizer().config();
            println!("Input:  {}", input.display());
            println!("Output: {}", output.display());
            println!(
                "Min span length: {} chars, height inset: {}",
                config.min_span_chars, config.height_inset
            );
        }

        let report = self
            .service
            .anonymize_file(input, output)
            .with_context(|| "Anonymization failed")?;
        let stats = &report.stats;

        if self.verbose {
            println!("\nRedaction Summary:");
            println!("  Pages processed: {}", stats.pages_processed);
            println!("  Pages skipped (no text): {}", stats.pages_skipped);
            println!("  Pages modified:  {}", stats.pages_modified);
            println!("  Spans detected:  {}", stats.spans_detected);
            println!("  Spans not located: {}", stats.spans_unlocated);
            println!("  Marks applied:   {}", stats.marks_applied);
        }

        if stats.has_redactions() {
            println!(
                "✓ Successfully redacted {} area(s) → {}",
                stats.marks_applied,
                output.display()
            );
        } else if report.output_written {
            println!(
                "⚠ No sensitive data found; original copied → {}",
                output.display()
            );
        } else {
            println!("⚠ No sensitive data found; no output written");
        }

        Ok(())
    }

    /// Extracts text from a PDF.
    fn extract(&self, input: &Path, output: Option<&Path>) -> Result<()> {
        if !input.exists() {
            anyhow::bail!("Input file does not exist: {}", input.display());
        }

        let pages = self
            .service
            .extract_text(input)
            .with_context(|| "Text extraction failed")?;

        let mut text = String::new();
        for (index, page) in pages.iter().enumerate() {
            text.push_str(&format!("--- page {} ---\n", index + 1));
            text.push_str(page);
        }

        if let Some(output_path) = output {
            std::fs::write(output_path, &text)
                .with_context(|| format!("Failed to write to {}", output_path.display()))?;
            println!(
                "✓ Extracted {} page(s), {} characters → {}",
                pages.len(),
                text.chars().count(),
                output_path.display()
            );
        } else {
            print!("{}", text);
        }

        Ok(())
    }

    /// Lists detected spans without redacting.
    fn scan(&self, input: &Path) -> Result<()> {
        if !input.exists() {
            anyhow::bail!("Input file does not exist: {}", input.display());
        }

        let pages = self
            .service
            .scan(input)
            .with_context(|| "Scan failed")?;

        let mut total = 0;
        for page in &pages {
            for span in &page.spans {
                let preview = span.text(&page.text).map(mask).unwrap_or_default();
                println!(
                    "page {}\t{}\t{}..{}\t{}",
                    page.page_number,
                    span.category(),
                    span.start(),
                    span.end(),
                    preview
                );
                total += 1;
            }
        }

        if total == 0 {
            println!("⚠ No sensitive data found");
        } else {
            println!("✓ {} span(s) across {} page(s)", total, pages.len());
        }

        Ok(())
    }
}

/// Loads the config file (if any) and applies command-line overrides.
fn build_config(cli: &Cli) -> Result<AnonymizerConfig> {
    let mut config = match &cli.config {
        Some(path) => AnonymizerConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AnonymizerConfig::default(),
    };

    if let Some(min_span_chars) = cli.min_span_chars {
        config = config.with_min_span_chars(min_span_chars);
    }
    if let Some(height_inset) = cli.height_inset {
        config = config.with_height_inset(height_inset);
    }

    config.validate().with_context(|| "Invalid settings")?;
    Ok(config)
}

/// Picks the entity recognizer: external program, none, or the built-in lexicon.
fn build_recognizer(cli: &Cli) -> Result<Option<Box<dyn EntityRecognizer>>> {
    if cli.no_ner {
        return Ok(None);
    }
    match &cli.ner_command {
        Some(command_line) => {
            let recognizer = CommandRecognizer::from_command_line(command_line)?;
            Ok(Some(Box::new(recognizer)))
        }
        None => Ok(Some(Box::new(StreetLexiconRecognizer::new()))),
    }
}

/// Keeps the first and last character visible and masks the rest.
fn mask(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    match chars.len() {
        0 => String::new(),
        1 | 2 => "*".repeat(chars.len()),
        n => {
            let mut masked = String::with_capacity(n);
            masked.push(chars[0]);
            masked.extend(std::iter::repeat('*').take(n - 2));
            masked.push(chars[n - 1]);
            masked
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let handler = AnonymizationHandler::new(&cli)?;

    match &cli.command {
        Some(Commands::Extract { input, output }) => {
            handler.extract(input, output.as_deref())?;
        }
        Some(Commands::Scan { input }) => {
            handler.scan(input)?;
        }
        None => {
            // Default: anonymization mode
            let input = cli
                .input
                .as_ref()
                .ok_or_else(|| anyhow::anyhow!("--input is required"))?;
            let output = cli
                .output
                .as_ref()
                .ok_or_else(|| anyhow::anyhow!("--output is required"))?;

            handler.anonymize(input, output)?;
        }
    }

    Ok(())
}
