//! CLI binary for heb2docx.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `TranslationConfig` and writes the resulting Word document.

use anyhow::{Context, Result};
use clap::Parser;
use heb2docx::{
    convert_to_file, ProgressCallback, SourceFile, TranslationConfig, TranslationStyle,
    DEFAULT_OUTPUT_NAME,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: a spinner while PDFs are being extracted,
/// then a page-counting bar once the total is known.
struct CliProgress {
    bar: ProgressBar,
}

impl CliProgress {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0); // length set in on_run_start

        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(spinner_style);
        bar.set_prefix("Extracting");
        bar.set_message("Reading PDF pages…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self { bar })
    }
}

impl ProgressCallback for CliProgress {
    fn on_run_start(&self, total_pages: usize) {
        let bar_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} pages  \
             ⏱ {elapsed_precise}  ETA {eta_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ");

        self.bar.set_length(total_pages as u64);
        self.bar.set_style(bar_style);
        self.bar.set_prefix("Translating");
        self.bar.reset_eta();
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Translating {total_pages} pages…"))
        ));
    }

    fn on_page_complete(&self, completed: usize, total_pages: usize, fraction: f64) {
        self.bar.set_position(completed as u64);
        self.bar
            .set_message(format!("{:.0}% ({completed}/{total_pages})", fraction * 100.0));
    }

    fn on_run_complete(&self, _total_pages: usize) {
        self.bar.finish_and_clear();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Translate one PDF into translation.docx
  heb2docx maamar.pdf

  # Several PDFs into one document, academic register
  heb2docx -s academic part1.pdf part2.pdf -o sefer.docx

  # Extra guidance for the translator
  heb2docx -i "Keep halachic terms transliterated." responsa.pdf

  # A different chat model
  heb2docx --model gpt-4.1 maamar.pdf

STYLES:
  clear      Clear and straightforward (default)
  literal    More literal / closer to Hebrew
  warm       Warm tone (still accurate)
  academic   Academic / formal

ENVIRONMENT VARIABLES:
  OPENAI_API_KEY    API key for the translation backend (required)

NOTES:
  Pages without selectable text (scanned images) are not sent for
  translation; the document marks them with a placeholder noting that
  Hebrew OCR would be required. Any extraction or translation failure
  aborts the whole run — no partial document is written.
"#;

/// Translate Hebrew PDFs page-by-page into one English Word document.
#[derive(Parser, Debug)]
#[command(
    name = "heb2docx",
    version,
    about = "Translate Hebrew PDFs page-by-page into one English Word document",
    long_about = "Extracts selectable text from each page of the given PDFs, translates it \
Hebrew-to-English through a chat model, and assembles one .docx with a section per file and \
a labelled subsection per page.",
    arg_required_else_help = true,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Input PDF files, translated in the order given.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output .docx path.
    #[arg(short, long, env = "HEB2DOCX_OUTPUT", default_value = DEFAULT_OUTPUT_NAME)]
    output: PathBuf,

    /// English style: clear, literal, warm, academic (or the full label).
    #[arg(short, long, env = "HEB2DOCX_STYLE", default_value = "clear")]
    style: String,

    /// Optional free-form instructions appended to every page's prompt.
    #[arg(short, long, env = "HEB2DOCX_INSTRUCTIONS", default_value = "")]
    instructions: String,

    /// Chat model identifier.
    #[arg(long, env = "HEB2DOCX_MODEL", default_value = "gpt-4.1-mini")]
    model: String,

    /// API key; falls back to OPENAI_API_KEY.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Override the backend base URL (proxies, compatible endpoints).
    #[arg(long, env = "HEB2DOCX_ENDPOINT")]
    endpoint: Option<String>,

    /// Retries per page on transient backend failure.
    #[arg(long, env = "HEB2DOCX_MAX_RETRIES", default_value_t = 3)]
    max_retries: u32,

    /// Per-call HTTP timeout in seconds.
    #[arg(long, env = "HEB2DOCX_API_TIMEOUT", default_value_t = 120)]
    api_timeout: u64,

    /// Disable the progress bar.
    #[arg(long, env = "HEB2DOCX_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "HEB2DOCX_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "HEB2DOCX_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs when the progress bar is active;
    // the bar provides all the feedback that matters to the user.
    let show_progress = !cli.quiet && !cli.no_progress;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Read inputs ──────────────────────────────────────────────────────
    let mut files = Vec::with_capacity(cli.inputs.len());
    for path in &cli.inputs {
        let file = SourceFile::from_path(path)
            .with_context(|| format!("Failed to read input file {}", path.display()))?;
        files.push(file);
    }

    // ── Build config ─────────────────────────────────────────────────────
    let style: TranslationStyle = cli
        .style
        .parse()
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    let mut builder = TranslationConfig::builder()
        .style(style)
        .extra_instructions(cli.instructions.clone())
        .model(cli.model.clone())
        .max_retries(cli.max_retries)
        .api_timeout_secs(cli.api_timeout);

    if let Some(ref key) = cli.api_key {
        builder = builder.api_key(key.clone());
    }
    if let Some(ref endpoint) = cli.endpoint {
        builder = builder.endpoint(endpoint.clone());
    }
    if show_progress {
        builder = builder.progress_callback(CliProgress::new());
    }

    let config = builder.build().map_err(|e| anyhow::anyhow!("{e}"))?;

    // ── Run ──────────────────────────────────────────────────────────────
    let stats = convert_to_file(&files, &cli.output, &config)
        .await
        .context("Translation run failed")?;

    if !cli.quiet {
        eprintln!(
            "{}  {} pages from {} files  {}ms  →  {}",
            green("✔"),
            stats.total_pages,
            stats.total_files,
            stats.total_duration_ms,
            bold(&cli.output.display().to_string()),
        );
        if stats.placeholder_pages > 0 {
            eprintln!(
                "   {}",
                dim(&format!(
                    "{} pages had no selectable text (placeholder inserted)",
                    stats.placeholder_pages
                )),
            );
        }
    }

    Ok(())
}
