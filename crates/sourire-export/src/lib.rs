//! Export transforms for submissions and drafts.
//!
//! Turns a single record or the whole list into a downloadable artifact
//! (pretty JSON or CSV) and hands it to an [`ExportSink`]. Clipboard payloads
//! are compact JSON handed to a [`Clipboard`]. Pure synchronous; no terminal
//! or database dependencies.
//!
//! # Quick start
//!
//! ```no_run
//! use sourire_export::{DirectorySink, ExportSink, draft_artifact};
//! use sourire_core::draft::Draft;
//!
//! let mut sink = DirectorySink::new("exports");
//! let artifact = draft_artifact(&Draft::default()).unwrap();
//! sink.deliver(&artifact).unwrap();
//! ```

pub mod error;
pub mod filename;
mod json;
mod sink;
mod tabular;

pub use error::{Error, Result};
pub use json::{
  clipboard_text, draft_artifact, json_artifact, pretty_json,
  submission_artifact,
};
pub use sink::{Clipboard, DirectorySink, ExportSink, MemoryClipboard, MemorySink};
pub use tabular::{CSV_COLUMNS, csv_artifact, to_csv};

/// A generated file, ready to be handed to an [`ExportSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
  /// Bare file name; never contains a path separator.
  pub filename:   String,
  pub media_type: &'static str,
  pub contents:   String,
}

pub const JSON_MEDIA_TYPE: &str = "application/json";
pub const CSV_MEDIA_TYPE: &str = "text/csv;charset=utf-8";
