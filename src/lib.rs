//! # md2docx
//!
//! Convert Markdown text to DOCX with a bundled pandoc binary and a
//! `reference.docx` style template.
//!
//! ## Why a wrapper?
//!
//! All document semantics (Markdown parsing, DOCX layout, citations) belong to
//! pandoc. What this crate adds is the part every caller would otherwise
//! re-implement: finding the bundled engine and template, writing the input to
//! a temp file that is always cleaned up, running pandoc with one fixed set of
//! options, and handing back either the destination or pandoc's own error
//! text.
//!
//! ## Pipeline Overview
//!
//! ```text
//! Markdown text
//!  │
//!  ├─ 1. Check    engine + template present (once, at session start)
//!  ├─ 2. Source   trimmed text → uniquely named temp .md (UTF-8)
//!  ├─ 3. Command  fixed pandoc argv with --reference-doc and --citeproc
//!  ├─ 4. Engine   run pandoc, wait, capture stderr
//!  └─ 5. Cleanup  temp file removed on every path
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use md2docx::{convert, BundleResources, ConversionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::new(BundleResources::from_env()?);
//!     let output = convert("# Title\n\nHello.", "out.docx", &config).await?;
//!     println!("saved to {}", output.destination.display());
//!     Ok(())
//! }
//! ```
//!
//! Interactive callers use [`Session`] instead: it runs the startup checks
//! once and drives a [`SessionFrontend`] for prompts and reports.
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `md2docx` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! md2docx = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod resources;
pub mod session;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder, DEFAULT_FROM_FORMAT, DEFAULT_LANG};
pub use convert::{convert, convert_sync, inspect};
pub use error::Md2DocxError;
pub use output::{ConversionOutput, ConversionStats, EngineInfo};
pub use resources::{BundleResources, MissingResource, ResourceKind};
pub use session::{Attempt, NoopFrontend, Session, SessionFrontend};
