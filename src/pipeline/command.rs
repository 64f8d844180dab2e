//! Pandoc argument lists.
//!
//! The conversion argv has a fixed shape; only the paths and the three
//! config options vary:
//!
//! ```text
//! <source> -o <destination>
//!   --from <from_format>
//!   --metadata lang=<lang>
//!   --reference-doc <template>
//!   [--citeproc]
//! ```

use crate::config::ConversionConfig;
use std::ffi::OsString;
use std::path::Path;

/// Arguments probing the engine version.
pub const VERSION_ARGS: [&str; 1] = ["--version"];

/// Build the conversion argument list (without the engine path itself).
pub fn conversion_args(
    config: &ConversionConfig,
    source: &Path,
    destination: &Path,
) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        source.into(),
        "-o".into(),
        destination.into(),
        "--from".into(),
        config.from_format.as_str().into(),
        "--metadata".into(),
        format!("lang={}", config.lang).into(),
        "--reference-doc".into(),
        config.resources.reference_doc.as_os_str().into(),
    ];
    if config.citeproc {
        args.push("--citeproc".into());
    }
    args
}
