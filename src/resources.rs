//! Bundled resources: the pandoc binary and the DOCX reference template.
//!
//! Both are resolved once at startup relative to the bundle directory (see
//! [`md2docx_bundle::resolve_bundle_dir`]) and then only read. The startup
//! check in [`BundleResources::missing`] is the sole place their existence
//! is tested; a session that fails it stays disabled.

use crate::error::Md2DocxError;
use md2docx_bundle::{engine_file_name, resolve_bundle_dir, TEMPLATE_FILE_NAME};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Which bundled resource a check refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceKind {
    /// The pandoc executable.
    Engine,
    /// The `reference.docx` style template.
    Template,
}

impl ResourceKind {
    /// File name expected in the bundle directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            ResourceKind::Engine => engine_file_name(),
            ResourceKind::Template => TEMPLATE_FILE_NAME,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Engine => f.write_str("Conversion engine"),
            ResourceKind::Template => f.write_str("Reference template"),
        }
    }
}

/// One failed startup check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingResource {
    pub kind: ResourceKind,
    pub path: PathBuf,
}

impl MissingResource {
    /// Convert into the error reported to frontends.
    pub fn to_error(&self) -> Md2DocxError {
        Md2DocxError::ResourceMissing {
            kind: self.kind,
            path: self.path.clone(),
        }
    }
}

/// Resolved locations of the bundled engine and template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleResources {
    /// Directory the defaults were resolved against.
    pub dir: PathBuf,
    /// Path to the pandoc executable.
    pub engine: PathBuf,
    /// Path to the DOCX reference template.
    pub reference_doc: PathBuf,
}

impl BundleResources {
    /// Expected resource paths inside `dir`. Does not touch the filesystem.
    pub fn locate(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            engine: dir.join(engine_file_name()),
            reference_doc: dir.join(TEMPLATE_FILE_NAME),
            dir,
        }
    }

    /// Resolve the bundle directory from the environment and locate resources in it.
    pub fn from_env() -> Result<Self, Md2DocxError> {
        let layout = resolve_bundle_dir(Path::new(env!("CARGO_MANIFEST_DIR")))?;
        debug!(
            "Bundle directory ({}): {}",
            layout.label(),
            layout.dir().display()
        );
        Ok(Self::locate(layout.into_dir()))
    }

    /// Replace the engine path (e.g. `--engine`).
    pub fn with_engine(mut self, engine: impl Into<PathBuf>) -> Self {
        self.engine = engine.into();
        self
    }

    /// Replace the template path (e.g. `--reference-doc`).
    pub fn with_reference_doc(mut self, reference_doc: impl Into<PathBuf>) -> Self {
        self.reference_doc = reference_doc.into();
        self
    }

    /// Path of the given resource.
    pub fn path_of(&self, kind: ResourceKind) -> &Path {
        match kind {
            ResourceKind::Engine => &self.engine,
            ResourceKind::Template => &self.reference_doc,
        }
    }

    /// Run the startup checks, engine first, then template.
    ///
    /// Both checks always run so every missing file is reported.
    pub fn missing(&self) -> Vec<MissingResource> {
        [ResourceKind::Engine, ResourceKind::Template]
            .into_iter()
            .filter(|kind| !self.path_of(*kind).exists())
            .map(|kind| MissingResource {
                kind,
                path: self.path_of(kind).to_path_buf(),
            })
            .collect()
    }
}
