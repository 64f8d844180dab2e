//! Configuration for a Markdown-to-DOCX conversion.
//!
//! [`ConversionConfig`] carries the resolved bundle resources plus the engine
//! options. It is built once at startup and handed to every attempt, so the
//! resource paths are never global state.
//!
//! The defaults reproduce the fixed pandoc invocation:
//!
//! ```text
//! --from markdown+raw_attribute-raw_html+emoji+tex_math_single_backslash
//! --metadata lang=zh-CN
//! --citeproc
//! ```

use crate::error::Md2DocxError;
use crate::resources::BundleResources;
use serde::{Deserialize, Serialize};

/// Pandoc input format: Markdown with raw attributes and emoji on, raw HTML
/// off, and single-backslash TeX math.
pub const DEFAULT_FROM_FORMAT: &str =
    "markdown+raw_attribute-raw_html+emoji+tex_math_single_backslash";

/// Value of the `lang` document metadata.
pub const DEFAULT_LANG: &str = "zh-CN";

/// Configuration for a Markdown-to-DOCX conversion.
///
/// Built via [`ConversionConfig::builder()`] or [`ConversionConfig::new`].
///
/// # Example
/// ```rust
/// use md2docx::{BundleResources, ConversionConfig};
///
/// let config = ConversionConfig::builder()
///     .resources(BundleResources::locate("/opt/md2docx"))
///     .lang("en-US")
///     .build()
///     .unwrap();
/// assert!(config.citeproc);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Engine and reference template locations.
    pub resources: BundleResources,

    /// Value passed to `--from`. Default: [`DEFAULT_FROM_FORMAT`].
    pub from_format: String,

    /// Document language written as `--metadata lang=…`. Default: [`DEFAULT_LANG`].
    pub lang: String,

    /// Pass `--citeproc` so citations are resolved. Default: true.
    pub citeproc: bool,
}

impl ConversionConfig {
    /// Config with default engine options for the given resources.
    pub fn new(resources: BundleResources) -> Self {
        Self {
            resources,
            from_format: DEFAULT_FROM_FORMAT.to_string(),
            lang: DEFAULT_LANG.to_string(),
            citeproc: true,
        }
    }

    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder::default()
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    resources: Option<BundleResources>,
    from_format: String,
    lang: String,
    citeproc: bool,
}

impl Default for ConversionConfigBuilder {
    fn default() -> Self {
        Self {
            resources: None,
            from_format: DEFAULT_FROM_FORMAT.to_string(),
            lang: DEFAULT_LANG.to_string(),
            citeproc: true,
        }
    }
}

impl ConversionConfigBuilder {
    pub fn resources(mut self, resources: BundleResources) -> Self {
        self.resources = Some(resources);
        self
    }

    pub fn from_format(mut self, format: impl Into<String>) -> Self {
        self.from_format = format.into();
        self
    }

    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    pub fn citeproc(mut self, v: bool) -> Self {
        self.citeproc = v;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Md2DocxError> {
        let resources = self.resources.ok_or_else(|| {
            Md2DocxError::InvalidConfig("bundle resources are not set".into())
        })?;

        if !self.from_format.starts_with("markdown") {
            return Err(Md2DocxError::InvalidConfig(format!(
                "input format must be a markdown variant, got '{}'",
                self.from_format
            )));
        }
        if self.lang.is_empty() || self.lang.chars().any(char::is_whitespace) {
            return Err(Md2DocxError::InvalidConfig(format!(
                "language must be a non-empty tag like zh-CN, got '{}'",
                self.lang
            )));
        }

        Ok(ConversionConfig {
            resources,
            from_format: self.from_format,
            lang: self.lang,
            citeproc: self.citeproc,
        })
    }
}
