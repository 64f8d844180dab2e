//! Temp-source cleanup when pandoc cannot even be launched.
//!
//! Lives in its own test binary: it points `TMPDIR` at a scratch directory,
//! and no other test in this process may observe that change.

#![cfg(unix)]

use md2docx::{convert_sync, BundleResources, ConversionConfig, Md2DocxError};
use std::fs;
use std::path::Path;

fn leftover_sources(dir: &Path) -> Vec<String> {
    fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with("md2docx-") && name.ends_with(".md"))
        .collect()
}

#[test]
fn spawn_error_leaves_no_temp_source() {
    let scratch = tempfile::tempdir().unwrap();
    let tmp = scratch.path().join("tmp");
    fs::create_dir(&tmp).unwrap();
    std::env::set_var("TMPDIR", &tmp);
    assert_eq!(std::env::temp_dir(), tmp);

    // Bundle directory with no engine in it.
    let bundle = scratch.path().join("bundle");
    fs::create_dir(&bundle).unwrap();
    let config = ConversionConfig::new(BundleResources::locate(&bundle));
    let dest = scratch.path().join("out.docx");

    let err = convert_sync("# Title\n\nHello.", &dest, &config).unwrap_err();
    assert!(
        matches!(err, Md2DocxError::EngineSpawn { .. }),
        "expected EngineSpawn, got {err:?}"
    );

    assert!(leftover_sources(&tmp).is_empty(), "left: {:?}", leftover_sources(&tmp));
    assert!(!dest.exists());
}
