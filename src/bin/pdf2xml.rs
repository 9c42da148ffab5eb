//! CLI binary for pdf2xml.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ClientConfig`, drives one select → convert → download/preview pass
//! through a `ConverterSession`, and prints results.

use anyhow::{bail, Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdf2xml::{ApiClient, ClientConfig, ConverterSession, SelectedFile, DEFAULT_BASE_URL};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert and save next to the current directory under the server's name
  pdf2xml report.pdf

  # Convert to an explicit output path
  pdf2xml report.pdf -o converted/report.xml

  # Print the XML preview to stdout instead of saving
  pdf2xml report.pdf --preview --no-download

  # Talk to a non-default backend
  pdf2xml --base-url http://conversion.internal:8000 report.pdf

  # Print the raw conversion response as JSON
  pdf2xml report.pdf --json

  # Check that the backend is up, then exit
  pdf2xml --check

ENVIRONMENT VARIABLES:
  PDF2XML_BASE_URL         Backend origin (default: http://localhost:8000)
  PDF2XML_OUTPUT           Default output path
  PDF2XML_UPLOAD_TIMEOUT   Upload timeout in seconds
  PDF2XML_TIMEOUT          Download/preview timeout in seconds

SETUP:
  1. Start the conversion backend:  it listens on :8000 by default
  2. Convert:                       pdf2xml document.pdf
"#;

/// Upload a PDF to the conversion service and fetch the resulting XML.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2xml",
    version,
    about = "Upload a PDF to the conversion service and fetch the resulting XML",
    long_about = "Upload a PDF document to a remote PDF-to-XML conversion service, then \
download the generated XML artifact and/or print its preview text. The conversion itself \
runs server-side; this tool only drives the service's HTTP interface.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Local PDF file to convert.
    #[arg(required_unless_present = "check")]
    input: Option<PathBuf>,

    /// Write the XML to this file instead of the server-provided name.
    #[arg(short, long, env = "PDF2XML_OUTPUT")]
    output: Option<PathBuf>,

    /// Backend origin the three endpoints are resolved against.
    #[arg(long, env = "PDF2XML_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Print the XML preview to stdout after converting.
    #[arg(short, long)]
    preview: bool,

    /// Skip downloading the XML artifact.
    #[arg(long)]
    no_download: bool,

    /// Print the raw conversion response as JSON.
    #[arg(long)]
    json: bool,

    /// Probe the backend's health endpoint and exit.
    #[arg(long)]
    check: bool,

    /// Upload timeout in seconds.
    #[arg(long, env = "PDF2XML_UPLOAD_TIMEOUT", default_value_t = 120)]
    upload_timeout: u64,

    /// Download/preview timeout in seconds.
    #[arg(long, env = "PDF2XML_TIMEOUT", default_value_t = 30)]
    timeout: u64,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors and requested payloads.
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let config = ClientConfig::builder()
        .base_url(&cli.base_url)
        .upload_timeout_secs(cli.upload_timeout)
        .request_timeout_secs(cli.timeout)
        .build()
        .context("Invalid configuration")?;

    // ── Health check mode ────────────────────────────────────────────────
    if cli.check {
        let api = ApiClient::new(&config).context("Invalid configuration")?;
        let health = api
            .health()
            .await
            .with_context(|| format!("Backend at {} is not responding", cli.base_url))?;
        if !cli.quiet {
            println!(
                "{} backend at {} reports: {}",
                green("✔"),
                bold(&cli.base_url),
                health.status
            );
        }
        return Ok(());
    }

    let input = cli
        .input
        .as_ref()
        .context("No input file given (see --help)")?;

    // ── Select ───────────────────────────────────────────────────────────
    let file = SelectedFile::open(input)
        .await
        .with_context(|| format!("Cannot read '{}'", input.display()))?;

    if !cli.quiet {
        eprintln!("Selected file: {}", bold(&file.name));
        eprintln!("Size: {}", dim(&file.size_display()));
    }

    let mut session = ConverterSession::new(&config).context("Invalid configuration")?;
    session.select_file(Some(file));
    if let Some(err) = session.error_message() {
        bail!("{err}");
    }

    // ── Convert ──────────────────────────────────────────────────────────
    let spinner = if cli.quiet {
        None
    } else {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
        );
        bar.set_message("Converting…");
        bar.enable_steady_tick(Duration::from_millis(80));
        Some(bar)
    };

    session.convert().await;

    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }
    if let Some(err) = session.error_message() {
        eprintln!("{} {}", red("✗"), err);
        bail!("conversion failed");
    }

    let result = session
        .result()
        .cloned()
        .context("Conversion reported neither a result nor an error")?;

    if !cli.quiet {
        eprintln!(
            "{} Conversion successful: {}",
            green("✔"),
            bold(&result.xml_file)
        );
        if let Some(ref message) = result.message {
            eprintln!("  {}", dim(message));
        }
    }

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&result).context("Failed to serialise result")?
        );
    }

    // ── Download ─────────────────────────────────────────────────────────
    if !cli.no_download {
        let dest = cli
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(&result.xml_file));
        session.download_to(&dest).await;
        if let Some(err) = session.error_message() {
            eprintln!("{} {}", red("✗"), err);
            bail!("download failed");
        }
        if !cli.quiet {
            eprintln!("{} saved to {}", green("→"), bold(&dest.display().to_string()));
        }
    }

    // ── Preview ──────────────────────────────────────────────────────────
    if cli.preview {
        session.preview().await;
        if let Some(err) = session.error_message() {
            eprintln!("{} {}", red("✗"), err);
            bail!("preview failed");
        }
        if let Some(xml) = session.preview_text() {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(xml.as_bytes())
                .context("Failed to write to stdout")?;
            if !xml.ends_with('\n') {
                handle.write_all(b"\n").ok();
            }
        }
    }

    Ok(())
}
