//! End-to-end tests against a real pandoc.
//!
//! These tests need a pandoc binary and are gated behind the `E2E_ENABLED`
//! environment variable so they do not run in CI unless explicitly requested.
//! The engine is taken from `MD2DOCX_E2E_PANDOC`, else the first `pandoc` on
//! `PATH`; the reference template is generated from pandoc's own default.
//!
//! Run with:
//!   E2E_ENABLED=1 cargo test --test e2e -- --nocapture

use md2docx::{
    convert_sync, inspect, Attempt, BundleResources, ConversionConfig, Md2DocxError, NoopFrontend,
    Session, SessionFrontend,
};
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

// ── Test helpers ─────────────────────────────────────────────────────────────

fn find_pandoc() -> Option<PathBuf> {
    if let Some(p) = std::env::var_os("MD2DOCX_E2E_PANDOC") {
        return Some(PathBuf::from(p));
    }
    let name = md2docx_bundle::engine_file_name();
    std::env::split_paths(&std::env::var_os("PATH")?)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}

/// Skip this test unless E2E_ENABLED is set *and* pandoc can be found.
macro_rules! e2e_skip_unless_ready {
    () => {{
        if std::env::var("E2E_ENABLED").is_err() {
            println!("SKIP — set E2E_ENABLED=1 to run e2e tests");
            return;
        }
        match find_pandoc() {
            Some(p) => p,
            None => {
                println!("SKIP — pandoc not found; set MD2DOCX_E2E_PANDOC");
                return;
            }
        }
    }};
}

/// A bundle directory holding pandoc's default reference.docx.
fn bundle_with_default_template(pandoc: &Path) -> (TempDir, BundleResources) {
    let dir = tempfile::tempdir().unwrap();
    let resources = BundleResources::locate(dir.path()).with_engine(pandoc);

    let status = Command::new(pandoc)
        .arg("-o")
        .arg(&resources.reference_doc)
        .arg("--print-default-data-file")
        .arg("reference.docx")
        .status()
        .expect("pandoc should run");
    assert!(status.success(), "could not generate reference.docx");

    (dir, resources)
}

fn assert_is_docx(path: &Path) {
    let bytes = std::fs::read(path).expect("destination should exist");
    assert!(bytes.len() > 1000, "DOCX suspiciously small: {} bytes", bytes.len());
    assert_eq!(&bytes[..2], b"PK", "DOCX must be a zip container");
    println!("✓  {} ({} bytes)", path.display(), bytes.len());
}

struct SaveTo(PathBuf);

impl SessionFrontend for SaveTo {
    fn choose_destination(&self) -> Option<PathBuf> {
        Some(self.0.clone())
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn test_inspect_real_pandoc() {
    let pandoc = e2e_skip_unless_ready!();
    let config = ConversionConfig::new(BundleResources::locate(".").with_engine(&pandoc));

    let info = tokio_test::block_on(inspect(&config)).expect("inspect should succeed");
    assert!(info.version_line.starts_with("pandoc"), "got: {}", info.version_line);
    assert!(info.version.is_some());
    println!("Engine: {:?}", info);
}

#[test]
fn test_session_converts_title_hello() {
    let pandoc = e2e_skip_unless_ready!();
    let (dir, resources) = bundle_with_default_template(&pandoc);
    let dest = dir.path().join("out.docx");

    let mut session =
        Session::start(ConversionConfig::new(resources), SaveTo(dest.clone())).unwrap();
    assert!(session.is_enabled());

    match session.activate("# Title\n\nHello.") {
        Attempt::Converted(out) => assert_eq!(out.destination, dest),
        other => panic!("expected conversion, got {other:?}"),
    }
    assert_is_docx(&dest);
}

#[test]
fn test_extensions_math_emoji_and_chinese() {
    let pandoc = e2e_skip_unless_ready!();
    let (dir, resources) = bundle_with_default_template(&pandoc);
    let dest = dir.path().join("rich.docx");

    let markdown = "# 标题\n\n\
        Inline math \\(a^2 + b^2 = c^2\\) and emoji :smile:.\n\n\
        ```{=openxml}\n<w:p><w:r><w:t>raw</w:t></w:r></w:p>\n```\n\n\
        <span>raw html is plain text here</span>\n";

    let out = convert_sync(markdown, &dest, &ConversionConfig::new(resources))
        .expect("conversion should succeed");
    assert_eq!(out.destination, dest);
    assert_is_docx(&dest);
}

#[test]
fn test_unknown_extension_fails_with_pandoc_message() {
    let pandoc = e2e_skip_unless_ready!();
    let (dir, resources) = bundle_with_default_template(&pandoc);
    let dest = dir.path().join("never.docx");

    let config = ConversionConfig::builder()
        .resources(resources)
        .from_format("markdown+definitely_not_an_extension")
        .build()
        .unwrap();

    let err = convert_sync("# Title", &dest, &config).unwrap_err();
    match &err {
        Md2DocxError::EngineFailed { stderr, .. } => {
            assert!(!stderr.trim().is_empty(), "pandoc should explain the failure");
            assert_eq!(err.diagnostic(), Some(stderr.as_str()));
        }
        other => panic!("expected EngineFailed, got {other:?}"),
    }
    assert!(!dest.exists());
}

#[test]
fn test_check_only_session_is_enabled() {
    let pandoc = e2e_skip_unless_ready!();
    let (_dir, resources) = bundle_with_default_template(&pandoc);

    let session = Session::start(ConversionConfig::new(resources), NoopFrontend).unwrap();
    assert!(session.is_enabled());
    assert!(session.inspect().unwrap().version.is_some());
}
