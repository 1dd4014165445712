//! Error types for the export transforms.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Bulk export was requested for an empty list.
  #[error("Aucune candidature à exporter.")]
  NothingToExport,

  #[error("JSON error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("CSV error: {0}")]
  Csv(#[from] csv::Error),

  #[error("CSV output is not UTF-8: {0}")]
  Encoding(#[from] std::string::FromUtf8Error),

  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
