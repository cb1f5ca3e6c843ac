//! pdftok CLI - PDF text extraction with OCR fallback and token counting

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdftok::{
    ExtractOptions, ExtractionReport, Extractor, OcrConfig, OcrEngine, PageOutcome, PageRenderer,
    PageSelection, TesseractEngine, Tokenizer,
};

/// Log filter when `RUST_LOG` is unset; `info` shows per-page progress.
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Parser)]
#[command(name = "pdftok")]
#[command(version)]
#[command(about = "Extract PDF text (with OCR fallback) and count its tokens", long_about = None)]
struct Cli {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(flatten)]
    extract: ExtractArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract text from a PDF and count its tokens
    Extract {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        args: ExtractArgs,
    },

    /// Tokenize text (interactive when TEXT is omitted)
    Tokenize {
        /// Text to tokenize
        #[arg(value_name = "TEXT")]
        text: Option<String>,

        /// Print tokens and count as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that the OCR toolchain is installed
    Check {
        #[command(flatten)]
        tools: ToolArgs,
    },

    /// Show version information
    Version,
}

#[derive(Args, Clone)]
struct ExtractArgs {
    /// OCR language (Tesseract code, e.g. "eng" or "eng+deu")
    #[arg(short, long, env = "PDFTOK_OCR_LANG", default_value = "eng")]
    lang: String,

    /// Render resolution for OCR
    #[arg(long, default_value_t = 72)]
    dpi: u32,

    /// Text inserted between pages (supports \n, \t, \f escapes)
    #[arg(long)]
    separator: Option<String>,

    /// Page range (e.g., "1-10", "1,3,5")
    #[arg(long)]
    pages: Option<String>,

    /// Never run OCR; pages without embedded text stay empty
    #[arg(long)]
    no_ocr: bool,

    /// Number of characters of extracted text to preview
    #[arg(long, default_value_t = 500)]
    preview: usize,

    /// Write the full extracted text to this file
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print the page report and token count as JSON
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    tools: ToolArgs,
}

#[derive(Args, Clone)]
struct ToolArgs {
    /// Tesseract executable
    #[arg(long, env = "PDFTOK_TESSERACT", default_value = "tesseract")]
    tesseract: PathBuf,

    /// pdftoppm executable
    #[arg(long, env = "PDFTOK_PDFTOPPM", default_value = "pdftoppm")]
    pdftoppm: PathBuf,
}

impl ToolArgs {
    fn config(&self) -> OcrConfig {
        OcrConfig::new()
            .with_tesseract_cmd(&self.tesseract)
            .with_pdftoppm_cmd(&self.pdftoppm)
    }

    fn engine(&self) -> TesseractEngine {
        TesseractEngine::with_config(self.config())
    }

    fn renderer(&self) -> PageRenderer {
        PageRenderer::from_config(&self.config())
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Extract { input, args }) => cmd_extract(&input, &args),
        Some(Commands::Tokenize { text, json }) => cmd_tokenize(text.as_deref(), json),
        Some(Commands::Check { tools }) => {
            cmd_check(&tools);
            Ok(())
        }
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            if let Some(input) = cli.input {
                cmd_extract(&input, &cli.extract)
            } else {
                println!("{}", "Usage: pdftok <FILE>".yellow());
                println!("       pdftok --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_extract(input: &Path, args: &ExtractArgs) -> Result<(), Box<dyn std::error::Error>> {
    let pages = match args.pages.as_deref() {
        Some(p) => PageSelection::parse(p)?,
        None => PageSelection::All,
    };

    let mut options = ExtractOptions::new()
        .with_language(args.lang.as_str())
        .with_dpi(args.dpi)
        .with_pages(pages);
    if let Some(ref separator) = args.separator {
        options = options.with_separator(unescape(separator));
    }
    if args.no_ocr {
        options = options.without_ocr();
    }

    let extractor = Extractor::with_engine(args.tools.engine())
        .with_renderer(args.tools.renderer())
        .with_options(options);

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(format!("Extracting {}...", input.display()));
    pb.enable_steady_tick(Duration::from_millis(120));
    let report = extractor.extract(input);
    pb.finish_and_clear();
    let report = report?;

    print_report(&report, input, args)
}

/// Print the report in the requested format. Fails when no page yielded text.
fn print_report(
    report: &ExtractionReport,
    input: &Path,
    args: &ExtractArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = report.text();
    let tokens = Tokenizer::new().tokenize(&text);

    if let Some(ref path) = args.output {
        fs::write(path, &text)?;
    }

    if args.json {
        let json = serde_json::json!({
            "report": report,
            "token_count": tokens.count(),
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        print_page_notices(report);
    }

    if report.is_blank() {
        return Err(format!("No text could be extracted from {}", input.display()).into());
    }

    if !args.json {
        println!("\n{}", "--- Tokenization Results ---".cyan().bold());
        println!(
            "{} {}...",
            format!("Original Text (first {} characters):", args.preview).bold(),
            preview(&text, args.preview)
        );
        println!("{} {}", "Total token count:".bold(), tokens.count());
        println!("{}", "----------------------------".cyan());

        if let Some(ref path) = args.output {
            println!("{} {}", "Saved to".green(), path.display());
        }
    }

    Ok(())
}

fn print_page_notices(report: &ExtractionReport) {
    println!(
        "{} '{}' ({} pages)",
        "Processed".green().bold(),
        report.path.display(),
        report.page_count
    );

    for page in &report.pages {
        for failure in &page.prior_failures {
            println!(
                "  {}",
                format!("Page {}: {}", page.number(), failure).dimmed()
            );
        }
        match &page.outcome {
            PageOutcome::Direct(_) => println!(
                "  Page {} processed using {}.",
                page.number(),
                "direct text extraction".green()
            ),
            PageOutcome::Ocr(_) => println!(
                "  Page {} processed using {}.",
                page.number(),
                "OCR".yellow()
            ),
            PageOutcome::Failed(failure) => println!(
                "  Page {} {}: {}",
                page.number(),
                "skipped".red(),
                failure
            ),
        }
    }
}

fn cmd_tokenize(text: Option<&str>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let tokenizer = Tokenizer::new();

    if let Some(text) = text {
        print_tokens(&tokenizer, text, json)?;
        return Ok(());
    }

    println!("{}", "Enter text to tokenize. Type 'quit' or 'exit' to leave.".cyan());
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{} ", ">".green().bold());
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        if matches!(line.trim().to_lowercase().as_str(), "quit" | "exit") {
            println!("Goodbye!");
            break;
        }
        print_tokens(&tokenizer, &line, json)?;
    }

    Ok(())
}

fn print_tokens(
    tokenizer: &Tokenizer,
    text: &str,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = tokenizer.tokenize(text);
    if json {
        println!("{}", serde_json::to_string(&result)?);
    } else {
        println!("{}: {:?}", "Tokens".bold(), result.tokens());
        println!("{}: {}", "Total token count".bold(), result.count());
    }
    Ok(())
}

fn cmd_check(tools: &ToolArgs) {
    let renderer = tools.renderer();
    let engine = tools.engine();

    println!("{}", "OCR toolchain".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    report_tool(
        &renderer.command().display().to_string(),
        renderer.is_available(),
        "install poppler-utils",
    );
    report_tool(
        &engine.config().tesseract_cmd.display().to_string(),
        engine.is_available(),
        "install tesseract-ocr",
    );
}

fn report_tool(name: &str, available: bool, hint: &str) {
    if available {
        println!("  {} {}", "✓".green(), name);
    } else {
        println!("  {} {} ({})", "✗".red(), name, hint.dimmed());
    }
}

fn cmd_version() {
    println!("{} {}", "pdftok".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF text extraction with OCR fallback and token counting");
    println!();
    println!("License: MIT");
}

/// First `max_chars` characters of `text`.
fn preview(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Expand `\n`, `\t`, `\f` and `\\` in a command-line separator.
fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('f') => out.push('\x0c'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
