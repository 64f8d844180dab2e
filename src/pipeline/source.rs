//! Temporary Markdown source handed to the engine.
//!
//! The file is closed before the engine runs but stays on disk until the
//! [`MarkdownSource`] is dropped. `tempfile::TempPath` deletes it on drop,
//! so every exit path of an attempt (engine failure, spawn error, `?`,
//! panic unwinding) removes it.

use crate::error::Md2DocxError;
use std::io::Write;
use std::path::Path;
use tempfile::TempPath;
use tracing::{debug, warn};

const PREFIX: &str = "md2docx-";
const SUFFIX: &str = ".md";

/// A closed, uniquely named `.md` file holding the input text as UTF-8.
#[derive(Debug)]
pub struct MarkdownSource {
    path: TempPath,
    len: usize,
}

impl MarkdownSource {
    /// Create the temp file in the system temp directory and write `markdown`.
    pub fn write(markdown: &str) -> Result<Self, Md2DocxError> {
        let mut file = tempfile::Builder::new()
            .prefix(PREFIX)
            .suffix(SUFFIX)
            .tempfile()
            .map_err(|source| Md2DocxError::TempFile { source })?;

        file.write_all(markdown.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|source| Md2DocxError::TempFile { source })?;

        // Drops the handle; pandoc on Windows cannot read a file we keep open.
        let path = file.into_temp_path();
        debug!("Wrote {} bytes to {}", markdown.len(), path.display());

        Ok(Self {
            path,
            len: markdown.len(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bytes written.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Delete the file now, logging instead of failing if that is impossible.
    pub fn remove(self) {
        let shown = self.path.display().to_string();
        if let Err(e) = self.path.close() {
            warn!("Could not remove temporary source {}: {}", shown, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_utf8_and_names_uniquely() {
        let a = MarkdownSource::write("# 标题\n\n你好 😀").unwrap();
        let b = MarkdownSource::write("second").unwrap();

        assert_ne!(a.path(), b.path());
        assert_eq!(std::fs::read_to_string(a.path()).unwrap(), "# 标题\n\n你好 😀");
        assert_eq!(a.len(), "# 标题\n\n你好 😀".len());

        let name = a.path().file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("md2docx-"), "got: {name}");
        assert!(name.ends_with(".md"), "got: {name}");
    }

    #[test]
    fn drop_deletes_file() {
        let source = MarkdownSource::write("hello").unwrap();
        let path = source.path().to_path_buf();
        assert!(path.exists());
        drop(source);
        assert!(!path.exists());
    }

    #[test]
    fn remove_deletes_file() {
        let source = MarkdownSource::write("hello").unwrap();
        let path = source.path().to_path_buf();
        source.remove();
        assert!(!path.exists());
    }
}
