//! # md2docx-bundle
//!
//! Locate the directory that ships the pandoc binary and the `reference.docx`
//! template alongside `md2docx`, so the converter never depends on whatever
//! pandoc happens to be on `PATH`.
//!
//! ## How it works
//!
//! [`resolve_bundle_dir`] picks the first match:
//!
//! 1. `MD2DOCX_BUNDLE_DIR` — explicit override (CI, portable installs).
//! 2. `CARGO_MANIFEST_DIR` set at runtime to the manifest md2docx was built
//!    from — we are under `cargo run`, so the resources live in
//!    `<manifest>/resources/` next to the sources. Another crate's manifest
//!    (an installed md2docx launched from someone else's `cargo run`) does
//!    not count.
//! 3. Otherwise the directory holding the running executable, which is where
//!    a packaged build puts `pandoc` and `reference.docx`.
//!
//! Nothing here checks that the files exist; that is the caller's startup
//! check, so a missing file can be reported with its exact expected path.
//!
//! ## Platform support
//!
//! | OS      | Engine file   |
//! |---------|---------------|
//! | Windows | `pandoc.exe`  |
//! | other   | `pandoc`      |

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use thiserror::Error;

// ── Public constants ─────────────────────────────────────────────────────────

/// Environment variable overriding the bundle directory.
pub const BUNDLE_DIR_ENV: &str = "MD2DOCX_BUNDLE_DIR";

/// File name of the DOCX reference template inside the bundle directory.
pub const TEMPLATE_FILE_NAME: &str = "reference.docx";

/// Sub-directory of the crate root holding resources during development.
pub const DEV_RESOURCE_SUBDIR: &str = "resources";

/// File name suggested by the save prompt.
pub const DEFAULT_DOCUMENT_NAME: &str = "untitled.docx";

// ── Error type ───────────────────────────────────────────────────────────────

/// Errors returned while resolving the bundle directory.
#[derive(Error, Debug)]
pub enum BundleError {
    /// `std::env::current_exe` failed.
    #[error("Cannot locate the running executable: {0}")]
    CurrentExe(#[source] std::io::Error),

    /// The executable path has no parent (should not happen outside of `/`).
    #[error("Executable path '{path}' has no parent directory")]
    NoParent { path: PathBuf },
}

// ── Layout ───────────────────────────────────────────────────────────────────

/// Where the bundle directory came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleLayout {
    /// Set through [`BUNDLE_DIR_ENV`] (or a CLI flag feeding the same value).
    Override(PathBuf),
    /// Running from a source checkout: `<manifest>/resources`.
    Development(PathBuf),
    /// Running as an installed executable: its own directory.
    Packaged(PathBuf),
}

impl BundleLayout {
    /// The resolved directory, whatever the layout.
    pub fn dir(&self) -> &Path {
        match self {
            BundleLayout::Override(p) | BundleLayout::Development(p) | BundleLayout::Packaged(p) => p,
        }
    }

    /// Short human-readable name, used by `md2docx --check`.
    pub fn label(&self) -> &'static str {
        match self {
            BundleLayout::Override(_) => "override",
            BundleLayout::Development(_) => "development",
            BundleLayout::Packaged(_) => "packaged",
        }
    }

    /// Take the directory out of the layout.
    pub fn into_dir(self) -> PathBuf {
        match self {
            BundleLayout::Override(p) | BundleLayout::Development(p) | BundleLayout::Packaged(p) => p,
        }
    }
}

// ── Public API ───────────────────────────────────────────────────────────────

/// Name of the pandoc executable for the current platform.
pub fn engine_file_name() -> &'static str {
    if cfg!(windows) {
        "pandoc.exe"
    } else {
        "pandoc"
    }
}

/// Resolve the bundle directory from the process environment.
///
/// `built_from` is the manifest directory of the binary's own package, i.e.
/// `env!("CARGO_MANIFEST_DIR")` expanded in that package.
pub fn resolve_bundle_dir(built_from: &Path) -> Result<BundleLayout, BundleError> {
    resolve_from(
        std::env::var_os(BUNDLE_DIR_ENV),
        std::env::var_os("CARGO_MANIFEST_DIR"),
        built_from,
        || {
            // A symlinked launcher (/usr/local/bin/md2docx) must resolve to
            // the directory that actually holds the resources.
            let exe = std::env::current_exe()?;
            Ok(std::fs::canonicalize(&exe).unwrap_or(exe))
        },
    )
}

/// Resolution logic behind [`resolve_bundle_dir`], with the environment and
/// the executable lookup passed in. Touches no file system itself.
///
/// Empty values count as unset. `manifest_dir` selects development mode only
/// when it names `built_from`.
pub fn resolve_from(
    override_dir: Option<OsString>,
    manifest_dir: Option<OsString>,
    built_from: &Path,
    current_exe: impl FnOnce() -> std::io::Result<PathBuf>,
) -> Result<BundleLayout, BundleError> {
    if let Some(dir) = override_dir.filter(|d| !d.is_empty()) {
        return Ok(BundleLayout::Override(PathBuf::from(dir)));
    }

    if let Some(manifest) = manifest_dir.filter(|d| !d.is_empty()) {
        let manifest = PathBuf::from(manifest);
        if manifest == built_from {
            return Ok(BundleLayout::Development(manifest.join(DEV_RESOURCE_SUBDIR)));
        }
    }

    let exe = current_exe().map_err(BundleError::CurrentExe)?;

    let parent = exe.parent().map(Path::to_path_buf);
    match parent {
        Some(dir) => Ok(BundleLayout::Packaged(dir)),
        None => Err(BundleError::NoParent { path: exe }),
    }
}

/// Default destination offered by the save prompt: `~/untitled.docx`.
///
/// Falls back to the current directory when no home directory is known.
pub fn default_destination() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DOCUMENT_NAME)
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(input: &str) -> PathBuf {
    let rest = if input == "~" {
        Some("")
    } else {
        input
            .strip_prefix("~/")
            .or_else(|| input.strip_prefix("~\\"))
    };

    match (rest, dirs::home_dir()) {
        (Some(""), Some(home)) => home,
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(input),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
