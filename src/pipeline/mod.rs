//! Pipeline stages for one Markdown-to-DOCX attempt.
//!
//! Each submodule implements exactly one step, so the argument list can be
//! tested without spawning anything and the temp-file lifetime without an
//! engine.
//!
//! ## Data Flow
//!
//! ```text
//! source ──▶ command ──▶ engine
//! (temp .md)  (argv)     (pandoc child process)
//! ```
//!
//! 1. [`source`]  — write the trimmed Markdown to a uniquely named temp file
//!    that is deleted when dropped
//! 2. [`command`] — build the fixed pandoc argument list
//! 3. [`engine`]  — run the child process and capture its output; the only
//!    stage that spawns anything

pub mod command;
pub mod engine;
pub mod source;
