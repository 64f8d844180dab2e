//! The converter session: startup checks plus the "convert" button handler.
//!
//! A [`Session`] owns the config and a frontend implementing
//! [`SessionFrontend`]. The frontend shows reports and answers the save
//! prompt. The session decides *when* to call it:
//!
//! ```text
//! start ── missing engine?   ──▶ resource_missing ─┐
//!       └─ missing template? ──▶ resource_missing ─┴─▶ disabled for good
//!
//! activate(text)
//!   disabled          ──▶ (nothing)                     Attempt::Disabled
//!   blank text        ──▶ empty_input                   Attempt::EmptyInput
//!   prompt cancelled  ──▶ (nothing)                     Attempt::Cancelled
//!   otherwise         ──▶ conversion_started
//!                         ├─ conversion_succeeded      Attempt::Converted
//!                         └─ conversion_failed         Attempt::Failed
//! ```
//!
//! Each activation blocks the calling thread until pandoc exits; the session
//! drives [`crate::convert::convert`] on its own current-thread runtime.

use crate::config::ConversionConfig;
use crate::convert::{convert, inspect};
use crate::error::Md2DocxError;
use crate::output::{ConversionOutput, EngineInfo};
use crate::resources::MissingResource;
use std::path::{Path, PathBuf};
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

/// Presentation side of a session.
///
/// Only [`choose_destination`](SessionFrontend::choose_destination) is
/// required; every report defaults to a no-op.
pub trait SessionFrontend {
    /// Ask the user where to save the DOCX file. `None` means cancelled.
    fn choose_destination(&self) -> Option<PathBuf>;

    /// A bundled resource was missing at startup.
    ///
    /// Called once per missing resource, engine first.
    fn resource_missing(&self, missing: &MissingResource) {
        let _ = missing;
    }

    /// The user activated convert with blank input.
    fn empty_input(&self) {}

    /// The engine is about to run.
    fn conversion_started(&self, destination: &Path) {
        let _ = destination;
    }

    /// The engine exited zero.
    fn conversion_succeeded(&self, output: &ConversionOutput) {
        let _ = output;
    }

    /// The attempt failed. For engine failures
    /// [`Md2DocxError::diagnostic`] holds pandoc's stderr verbatim.
    fn conversion_failed(&self, error: &Md2DocxError) {
        let _ = error;
    }
}

/// A frontend that reports nothing and always cancels the save prompt.
pub struct NoopFrontend;

impl SessionFrontend for NoopFrontend {
    fn choose_destination(&self) -> Option<PathBuf> {
        None
    }
}

/// Outcome of one [`Session::activate`] call.
#[derive(Debug)]
pub enum Attempt {
    /// A resource was missing at startup; nothing happened.
    Disabled,
    /// Blank input; warned, no file I/O.
    EmptyInput,
    /// The save prompt was cancelled; nothing reported.
    Cancelled,
    /// The engine exited zero.
    Converted(ConversionOutput),
    /// The attempt failed and was reported.
    Failed(Md2DocxError),
}

impl Attempt {
    pub fn output(&self) -> Option<&ConversionOutput> {
        match self {
            Attempt::Converted(out) => Some(out),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&Md2DocxError> {
        match self {
            Attempt::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// One converter session.
pub struct Session<F> {
    config: ConversionConfig,
    frontend: F,
    enabled: bool,
    runtime: Runtime,
}

impl<F: SessionFrontend> Session<F> {
    /// Run the startup checks and build the session.
    ///
    /// Missing resources are reported to `frontend` and leave the session
    /// disabled; they are not an `Err`. The checks never run again.
    pub fn start(config: ConversionConfig, frontend: F) -> Result<Self, Md2DocxError> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| Md2DocxError::Internal(format!("Failed to create tokio runtime: {}", e)))?;

        let missing = config.resources.missing();
        for m in &missing {
            debug!("{} missing: {}", m.kind, m.path.display());
            frontend.resource_missing(m);
        }
        let enabled = missing.is_empty();
        debug!(
            "Session started (convert {})",
            if enabled { "enabled" } else { "disabled" }
        );

        Ok(Self {
            config,
            frontend,
            enabled,
            runtime,
        })
    }

    /// Whether the convert action is available. Fixed at startup.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    /// Handle one activation of the convert action.
    ///
    /// `text` is only read; the caller keeps its input as it was.
    pub fn activate(&mut self, text: &str) -> Attempt {
        if !self.enabled {
            debug!("Convert action disabled; ignoring activation");
            return Attempt::Disabled;
        }

        if text.trim().is_empty() {
            self.frontend.empty_input();
            return Attempt::EmptyInput;
        }

        let destination = match self.frontend.choose_destination() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => {
                debug!("Save prompt cancelled");
                return Attempt::Cancelled;
            }
        };

        self.frontend.conversion_started(&destination);
        match self
            .runtime
            .block_on(convert(text, &destination, &self.config))
        {
            Ok(output) => {
                self.frontend.conversion_succeeded(&output);
                Attempt::Converted(output)
            }
            Err(error) => {
                self.frontend.conversion_failed(&error);
                Attempt::Failed(error)
            }
        }
    }

    /// Probe the engine version on the session runtime.
    pub fn inspect(&self) -> Result<EngineInfo, Md2DocxError> {
        self.runtime.block_on(inspect(&self.config))
    }
}
