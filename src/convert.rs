//! Conversion entry points.
//!
//! [`convert`] is one complete attempt: validate, write the temp source, run
//! pandoc, clean up. It never shows anything. The outcome comes back as a
//! value and the caller decides how to present it (see [`crate::session`]
//! for the frontend-driving wrapper).

use crate::config::ConversionConfig;
use crate::error::Md2DocxError;
use crate::output::{ConversionOutput, ConversionStats, EngineInfo};
use crate::pipeline::{command, engine, source::MarkdownSource};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Convert Markdown text to a DOCX file at `destination`.
///
/// # Arguments
/// * `markdown`    — Markdown source; surrounding whitespace is trimmed
/// * `destination` — path pandoc writes the DOCX to
/// * `config`      — resources and engine options
///
/// # Errors
/// - [`Md2DocxError::EmptyInput`] / [`Md2DocxError::NoDestination`] before
///   any file is touched
/// - [`Md2DocxError::TempFile`] if the temporary source cannot be written
/// - [`Md2DocxError::EngineSpawn`] if pandoc cannot be started
/// - [`Md2DocxError::EngineFailed`] with pandoc's stderr on non-zero exit
///
/// The temporary source file is gone when this returns, whatever the result.
/// A zero exit is trusted: the destination is not checked afterwards.
pub async fn convert(
    markdown: impl AsRef<str>,
    destination: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Md2DocxError> {
    let total_start = Instant::now();

    // ── Step 1: Validate ─────────────────────────────────────────────────
    let markdown = markdown.as_ref().trim();
    if markdown.is_empty() {
        return Err(Md2DocxError::EmptyInput);
    }
    let destination = destination.as_ref();
    if destination.as_os_str().is_empty() {
        return Err(Md2DocxError::NoDestination);
    }
    info!("Converting {} bytes of Markdown to {}", markdown.len(), destination.display());

    // ── Step 2: Write temporary source ───────────────────────────────────
    let source = MarkdownSource::write(markdown)?;
    let input_bytes = source.len();

    // ── Step 3: Run engine ───────────────────────────────────────────────
    let args = command::conversion_args(config, source.path(), destination);
    let run = engine::run_engine(&config.resources.engine, &args).await;

    // ── Step 4: Clean up before reporting anything ───────────────────────
    source.remove();
    let run = run?;

    if !run.stdout.trim().is_empty() {
        debug!("Engine stdout: {}", run.stdout.trim_end());
    }
    let warnings: Vec<String> = run
        .stderr
        .lines()
        .map(str::trim_end)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect();
    for w in &warnings {
        debug!("pandoc: {}", w);
    }

    let stats = ConversionStats {
        input_bytes,
        engine_duration_ms: run.duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };
    info!(
        "Conversion complete: {} in {}ms",
        destination.display(),
        stats.total_duration_ms
    );

    Ok(ConversionOutput {
        destination: destination.to_path_buf(),
        warnings,
        stats,
    })
}

/// Synchronous wrapper around [`convert`].
///
/// Creates a temporary tokio runtime internally; do not call from inside
/// another runtime.
pub fn convert_sync(
    markdown: impl AsRef<str>,
    destination: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Md2DocxError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| Md2DocxError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(convert(markdown, destination, config))
}

/// Ask the engine for its version.
///
/// Does not need the reference template.
pub async fn inspect(config: &ConversionConfig) -> Result<EngineInfo, Md2DocxError> {
    let engine_path = &config.resources.engine;
    let run = engine::run_engine(engine_path, command::VERSION_ARGS).await?;
    Ok(EngineInfo::from_version_output(engine_path.clone(), &run.stdout))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::BundleResources;

    fn config_in(dir: &Path) -> ConversionConfig {
        ConversionConfig::new(BundleResources::locate(dir))
    }

    #[test]
    fn empty_input_touches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.docx");
        for text in ["", "   ", "\n\t\n"] {
            let err = tokio_test::block_on(convert(text, &dest, &config_in(dir.path()))).unwrap_err();
            assert!(matches!(err, Md2DocxError::EmptyInput), "got {err:?}");
        }
        assert!(!dest.exists());
    }

    #[test]
    fn empty_destination_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = tokio_test::block_on(convert("# Title", "", &config_in(dir.path()))).unwrap_err();
        assert!(matches!(err, Md2DocxError::NoDestination));
    }

    #[test]
    fn missing_engine_reports_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.docx");
        let err = convert_sync("# Title\n\nHello.", &dest, &config_in(dir.path())).unwrap_err();
        assert!(matches!(err, Md2DocxError::EngineSpawn { .. }), "got {err:?}");
        assert!(!dest.exists());
    }

    #[test]
    fn inspect_without_engine_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = tokio_test::block_on(inspect(&config_in(dir.path())));
        assert!(matches!(result, Err(Md2DocxError::EngineSpawn { .. })));
    }
}
