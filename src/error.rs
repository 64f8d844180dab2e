//! Error types for the md2docx library.
//!
//! [`Md2DocxError`] ends a single conversion attempt (or session setup). The
//! session never retries: every variant is reported to the frontend once and
//! the next activation starts from scratch.
//!
//! Two variants are user mistakes rather than failures (see
//! [`Md2DocxError::is_user_error`]). Frontends usually show them as a
//! warning instead of an error.

use crate::resources::ResourceKind;
use md2docx_bundle::BundleError;
use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the md2docx library.
#[derive(Debug, Error)]
pub enum Md2DocxError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The Markdown text is empty or whitespace-only.
    #[error("Input is empty: paste some Markdown before converting.")]
    EmptyInput,

    /// The destination path is empty.
    #[error("No destination path was given for the DOCX file.")]
    NoDestination,

    // ── Resource errors ───────────────────────────────────────────────────
    /// A bundled resource is missing from the bundle directory.
    #[error("{kind} not found at '{}'\nMake sure {} sits next to the md2docx executable.", .path.display(), .kind.file_name())]
    ResourceMissing { kind: ResourceKind, path: PathBuf },

    /// Bundle directory resolution failed.
    #[error(transparent)]
    Bundle(#[from] BundleError),

    // ── Attempt errors ────────────────────────────────────────────────────
    /// Could not create or write the temporary Markdown source.
    #[error("Failed to write temporary source file: {source}")]
    TempFile {
        #[source]
        source: std::io::Error,
    },

    /// The engine process could not be started at all.
    #[error("Failed to launch conversion engine '{}': {source}", .engine.display())]
    EngineSpawn {
        engine: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The engine ran and exited non-zero.
    ///
    /// `stderr` is the engine's diagnostic text, unmodified.
    #[error("Conversion engine failed ({status}):\n{stderr}")]
    EngineFailed { status: String, stderr: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Md2DocxError {
    /// The engine's verbatim stderr, when the engine itself reported failure.
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            Md2DocxError::EngineFailed { stderr, .. } => Some(stderr),
            _ => None,
        }
    }

    /// `true` for mistakes the user corrects by editing input, not failures.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Md2DocxError::EmptyInput | Md2DocxError::NoDestination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_failed_keeps_stderr_verbatim() {
        let e = Md2DocxError::EngineFailed {
            status: "exit status: 64".into(),
            stderr: "pandoc: Unknown extension: foo\n".into(),
        };
        assert_eq!(e.diagnostic(), Some("pandoc: Unknown extension: foo\n"));
        assert!(e.to_string().contains("pandoc: Unknown extension: foo"));
        assert!(e.to_string().contains("exit status: 64"));
        assert!(!e.is_user_error());
    }

    #[test]
    fn resource_missing_display() {
        let e = Md2DocxError::ResourceMissing {
            kind: ResourceKind::Template,
            path: PathBuf::from("/opt/md2docx/reference.docx"),
        };
        let msg = e.to_string();
        assert!(msg.contains("Reference template"), "got: {msg}");
        assert!(msg.contains("/opt/md2docx/reference.docx"), "got: {msg}");
        assert!(msg.contains("reference.docx sits next to"), "got: {msg}");
    }

    #[test]
    fn user_errors() {
        assert!(Md2DocxError::EmptyInput.is_user_error());
        assert!(Md2DocxError::NoDestination.is_user_error());
        assert!(Md2DocxError::EmptyInput.diagnostic().is_none());
    }

    #[test]
    fn spawn_error_names_engine() {
        let e = Md2DocxError::EngineSpawn {
            engine: PathBuf::from("/opt/md2docx/pandoc"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(e.to_string().contains("/opt/md2docx/pandoc"));
        assert!(e.to_string().contains("denied"));
    }
}
