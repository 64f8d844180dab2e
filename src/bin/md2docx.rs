//! CLI binary for md2docx.
//!
//! A terminal frontend over [`md2docx::Session`]: the Markdown comes from a
//! file, a pipe or a paste, the save prompt is `--output` or an interactive
//! question, and every report the session raises becomes a line on stderr.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use md2docx::{
    Attempt, BundleResources, ConversionConfig, ConversionOutput, Md2DocxError, MissingResource,
    NoopFrontend, Session, SessionFrontend,
};
use md2docx_bundle::{default_destination, expand_home, resolve_bundle_dir, BundleLayout};
use std::cell::RefCell;
use std::io::{self, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use tracing::warn;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── Exit codes ───────────────────────────────────────────────────────────────

const EXIT_FAILED: u8 = 1;
const EXIT_DISABLED: u8 = 2;

// ── Terminal frontend ────────────────────────────────────────────────────────

/// Session frontend writing reports to stderr.
///
/// The spinner only decorates the wait; the session still blocks until
/// pandoc exits.
struct TerminalFrontend {
    /// Destination from `--output`; `None` means ask.
    output: Option<PathBuf>,
    quiet: bool,
    json: bool,
    show_progress: bool,
    spinner: RefCell<Option<ProgressBar>>,
}

impl TerminalFrontend {
    fn new(cli: &Cli, show_progress: bool) -> Self {
        Self {
            output: cli.output.clone(),
            quiet: cli.quiet,
            json: cli.json,
            show_progress,
            spinner: RefCell::new(None),
        }
    }

    fn stop_spinner(&self) {
        if let Some(bar) = self.spinner.borrow_mut().take() {
            bar.finish_and_clear();
        }
    }

    /// Interactive save prompt. EOF cancels; an empty answer takes the default.
    fn prompt_destination(&self) -> Option<PathBuf> {
        let default = default_destination();
        eprint!("{} Save DOCX as [{}]: ", cyan("?"), default.display());
        io::stderr().flush().ok();

        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) => {
                eprintln!();
                None
            }
            Ok(_) => {
                let answer = line.trim();
                if answer.is_empty() {
                    Some(default)
                } else {
                    Some(expand_home(answer))
                }
            }
            Err(e) => {
                warn!("Could not read destination: {}", e);
                None
            }
        }
    }
}

impl SessionFrontend for TerminalFrontend {
    fn choose_destination(&self) -> Option<PathBuf> {
        let chosen = match &self.output {
            Some(path) => Some(path.clone()),
            None => self.prompt_destination(),
        };
        chosen.map(with_docx_extension)
    }

    fn resource_missing(&self, missing: &MissingResource) {
        eprintln!("{} {}", red("✘"), missing.to_error());
    }

    fn empty_input(&self) {
        eprintln!("{} {}", yellow("⚠"), Md2DocxError::EmptyInput);
    }

    fn conversion_started(&self, destination: &Path) {
        if !self.show_progress {
            return;
        }
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
        );
        bar.set_prefix("Converting");
        bar.set_message(destination.display().to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        *self.spinner.borrow_mut() = Some(bar);
    }

    fn conversion_succeeded(&self, output: &ConversionOutput) {
        self.stop_spinner();

        if self.json {
            match serde_json::to_string_pretty(output) {
                Ok(json) => println!("{json}"),
                Err(e) => eprintln!("{} Failed to serialise output: {e}", red("✘")),
            }
            return;
        }
        if self.quiet {
            return;
        }

        eprintln!(
            "{} Saved to {}",
            green("✔"),
            bold(&output.destination.display().to_string())
        );
        for w in &output.warnings {
            eprintln!("  {} {}", yellow("⚠"), dim(w));
        }
        eprintln!(
            "   {}  —  {}ms total",
            dim(&format!("{} bytes in", output.stats.input_bytes)),
            output.stats.total_duration_ms,
        );
    }

    fn conversion_failed(&self, error: &Md2DocxError) {
        self.stop_spinner();

        match error.diagnostic() {
            Some(stderr) => {
                eprintln!("{} {}", failure_marker(error), bold("Conversion failed"));
                eprintln!("Pandoc error:");
                eprint!("{stderr}");
                if !stderr.ends_with('\n') {
                    eprintln!();
                }
            }
            None => eprintln!("{} {}", failure_marker(error), error),
        }
    }
}

/// Yellow warning sign for mistakes the user can fix, red cross otherwise.
fn failure_marker(error: &Md2DocxError) -> String {
    if error.is_user_error() {
        yellow("⚠")
    } else {
        red("✘")
    }
}

/// Append `.docx` when the chosen path has no extension, as the save
/// dialog's `*.docx` filter would.
fn with_docx_extension(mut path: PathBuf) -> PathBuf {
    if path.extension().is_none() && !path.as_os_str().is_empty() {
        path.set_extension("docx");
    }
    path
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Paste Markdown into the terminal, then answer the save prompt
  md2docx

  # Convert a file
  md2docx notes.md -o notes.docx

  # Pipe from another tool
  pbpaste | md2docx -o report.docx

  # English document metadata, no citation processing
  md2docx --lang en-US --no-citeproc draft.md -o draft.docx

  # Check that pandoc and reference.docx are in place
  md2docx --check

PANDOC INVOCATION:
  pandoc <temp.md> -o <output.docx>
    --from markdown+raw_attribute-raw_html+emoji+tex_math_single_backslash
    --metadata lang=zh-CN
    --reference-doc <bundle>/reference.docx
    --citeproc

BUNDLE DIRECTORY (first match wins):
  1. --bundle-dir / MD2DOCX_BUNDLE_DIR
  2. <crate>/resources when run through `cargo run`
  3. the directory containing the md2docx executable

ENVIRONMENT VARIABLES:
  MD2DOCX_BUNDLE_DIR      Directory holding pandoc and reference.docx
  MD2DOCX_ENGINE          Explicit pandoc path
  MD2DOCX_REFERENCE_DOC   Explicit reference template path
  MD2DOCX_OUTPUT          Destination DOCX path
  MD2DOCX_LANG            Document language metadata
  RUST_LOG                Log filter (overrides -v / -q)

EXIT CODES:
  0  converted, or save prompt cancelled
  1  conversion failed, or input was empty
  2  pandoc or reference.docx missing
"#;

/// Convert Markdown to DOCX with a bundled pandoc and reference template.
#[derive(Parser, Debug)]
#[command(
    name = "md2docx",
    version,
    about = "Convert Markdown to DOCX with a bundled pandoc and reference template",
    long_about = "Convert pasted or piped Markdown to a DOCX file. Conversion is done by the \
pandoc binary shipped next to md2docx, styled with the bundled reference.docx, with citation \
processing enabled.",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Markdown file to convert; `-` or omitted reads stdin (paste, then Ctrl-D).
    input: Option<PathBuf>,

    /// Write the DOCX here instead of asking.
    #[arg(short, long, env = "MD2DOCX_OUTPUT")]
    output: Option<PathBuf>,

    /// Directory holding pandoc and reference.docx.
    #[arg(long, env = "MD2DOCX_BUNDLE_DIR")]
    bundle_dir: Option<PathBuf>,

    /// Explicit pandoc executable (overrides the bundle).
    #[arg(long, env = "MD2DOCX_ENGINE")]
    engine: Option<PathBuf>,

    /// Explicit reference template (overrides the bundle).
    #[arg(long, env = "MD2DOCX_REFERENCE_DOC")]
    reference_doc: Option<PathBuf>,

    /// Document language metadata passed as `lang=…`.
    #[arg(long, env = "MD2DOCX_LANG", default_value = md2docx::DEFAULT_LANG)]
    lang: String,

    /// Do not pass --citeproc to pandoc.
    #[arg(long)]
    no_citeproc: bool,

    /// Print the conversion result as JSON on stdout.
    #[arg(long)]
    json: bool,

    /// Disable the spinner.
    #[arg(long, env = "MD2DOCX_NO_PROGRESS")]
    no_progress: bool,

    /// Report the bundle directory, resources and pandoc version, then exit.
    #[arg(long)]
    check: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "MD2DOCX_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "MD2DOCX_QUIET")]
    quiet: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Library INFO logs would tear through the spinner line.
    let show_progress =
        !cli.quiet && !cli.no_progress && !cli.json && !cli.check && io::stderr().is_terminal();
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

    // ── Resolve resources and build config ───────────────────────────────
    let (layout, resources) = build_resources(&cli)?;
    let config = build_config(&cli, resources)?;

    if cli.check {
        return run_check(&cli, layout, config);
    }

    // ── Startup checks ───────────────────────────────────────────────────
    let frontend = TerminalFrontend::new(&cli, show_progress);
    let mut session = Session::start(config, frontend).context("Failed to start session")?;
    if !session.is_enabled() {
        return Ok(ExitCode::from(EXIT_DISABLED));
    }

    // ── Input ────────────────────────────────────────────────────────────
    let stdin_is_terminal = io::stdin().is_terminal();
    let reads_stdin = cli.input.as_deref().map_or(true, |p| p == Path::new("-"));
    let text = read_input(cli.input.as_deref(), stdin_is_terminal, cli.quiet)?;

    // Without a terminal on stdin there is nobody to answer the save prompt.
    if cli.output.is_none() && !text.trim().is_empty() && !stdin_is_terminal {
        anyhow::bail!(
            "No destination: pass --output <FILE> when {} is not a terminal",
            if reads_stdin { "piped input" } else { "stdin" }
        );
    }

    // ── Convert ──────────────────────────────────────────────────────────
    let code = match session.activate(&text) {
        Attempt::Converted(_) | Attempt::Cancelled => ExitCode::SUCCESS,
        Attempt::Disabled => ExitCode::from(EXIT_DISABLED),
        Attempt::EmptyInput | Attempt::Failed(_) => ExitCode::from(EXIT_FAILED),
    };
    Ok(code)
}

/// Resolve the bundle directory and apply per-file overrides.
fn build_resources(cli: &Cli) -> Result<(BundleLayout, BundleResources)> {
    let layout = match &cli.bundle_dir {
        Some(dir) => BundleLayout::Override(dir.clone()),
        None => resolve_bundle_dir(Path::new(env!("CARGO_MANIFEST_DIR")))
            .context("Failed to locate the bundle directory")?,
    };

    let mut resources = BundleResources::locate(layout.dir());
    if let Some(ref engine) = cli.engine {
        resources = resources.with_engine(engine);
    }
    if let Some(ref template) = cli.reference_doc {
        resources = resources.with_reference_doc(template);
    }
    Ok((layout, resources))
}

/// Map CLI args to `ConversionConfig`.
fn build_config(cli: &Cli, resources: BundleResources) -> Result<ConversionConfig> {
    ConversionConfig::builder()
        .resources(resources)
        .lang(cli.lang.clone())
        .citeproc(!cli.no_citeproc)
        .build()
        .context("Invalid configuration")
}

/// Read the Markdown from a file, or from stdin (pasted or piped).
fn read_input(path: Option<&Path>, stdin_is_terminal: bool, quiet: bool) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p)
            .with_context(|| format!("Failed to read Markdown from {:?}", p)),
        _ => {
            if stdin_is_terminal && !quiet {
                eprintln!(
                    "{} {}",
                    cyan("◆"),
                    bold("Paste Markdown below, then press Ctrl-D (Ctrl-Z, Enter on Windows):")
                );
            }
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read Markdown from stdin")?;
            Ok(text)
        }
    }
}

/// `--check`: report bundle status and the engine version.
fn run_check(cli: &Cli, layout: BundleLayout, config: ConversionConfig) -> Result<ExitCode> {
    let session = Session::start(config, NoopFrontend).context("Failed to start session")?;
    let resources = &session.config().resources;
    let missing = resources.missing();
    let engine = if resources.engine.exists() {
        Some(session.inspect())
    } else {
        None
    };

    if cli.json {
        let report = serde_json::json!({
            "layout": layout.label(),
            "resources": resources,
            "missing": missing,
            "engine": engine.as_ref().and_then(|r| r.as_ref().ok()),
            "engine_error": engine.as_ref().and_then(|r| r.as_ref().err()).map(|e| e.to_string()),
            "enabled": session.is_enabled(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialise report")?
        );
    } else {
        let status = |ok: bool| if ok { green("found") } else { red("missing") };
        println!("Bundle dir:   {} ({})", resources.dir.display(), layout.label());
        println!(
            "Engine:       {}  {}",
            resources.engine.display(),
            status(resources.engine.exists())
        );
        println!(
            "Template:     {}  {}",
            resources.reference_doc.display(),
            status(resources.reference_doc.exists())
        );
        match &engine {
            Some(Ok(info)) => println!("Version:      {}", info.version_line),
            Some(Err(e)) => println!("Version:      {}", red(&e.to_string())),
            None => {}
        }
    }

    if session.is_enabled() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_DISABLED))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn docx_extension_added_when_missing() {
        assert_eq!(with_docx_extension("report".into()), PathBuf::from("report.docx"));
        assert_eq!(with_docx_extension("report.docx".into()), PathBuf::from("report.docx"));
        assert_eq!(with_docx_extension("notes.odt".into()), PathBuf::from("notes.odt"));
        assert_eq!(with_docx_extension(PathBuf::new()), PathBuf::new());
    }

    #[test]
    fn user_errors_are_marked_as_warnings() {
        assert_eq!(failure_marker(&Md2DocxError::NoDestination), yellow("⚠"));
        assert_eq!(failure_marker(&Md2DocxError::EmptyInput), yellow("⚠"));
        let failed = Md2DocxError::EngineFailed {
            status: "exit status: 83".into(),
            stderr: "pandoc: bad ext\n".into(),
        };
        assert_eq!(failure_marker(&failed), red("✘"));
    }

    #[test]
    fn cli_defaults() {
        let cli = Cli::try_parse_from(["md2docx"]).unwrap();
        assert!(cli.input.is_none());
        assert_eq!(cli.lang, "zh-CN");
        assert!(!cli.no_citeproc);
    }

    #[test]
    fn cli_flags_build_config() {
        let cli = Cli::try_parse_from([
            "md2docx",
            "notes.md",
            "-o",
            "out.docx",
            "--bundle-dir",
            "/opt/md2docx",
            "--lang",
            "en-US",
            "--no-citeproc",
        ])
        .unwrap();
        let (layout, resources) = build_resources(&cli).unwrap();
        assert_eq!(layout, BundleLayout::Override(PathBuf::from("/opt/md2docx")));
        let config = build_config(&cli, resources).unwrap();
        assert_eq!(config.lang, "en-US");
        assert!(!config.citeproc);
        assert_eq!(config.resources.reference_doc, PathBuf::from("/opt/md2docx/reference.docx"));
    }
}
