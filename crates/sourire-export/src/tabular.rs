//! CSV export of the submission list.
//!
//! Header row unquoted, then one row per submission with every field quoted
//! and inner quotes doubled. Rows are joined by `\n` with no trailing newline.

use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use sourire_core::submission::Submission;
use tracing::debug;

use crate::{Artifact, CSV_MEDIA_TYPE, Error, Result, filename::csv_filename};

/// Column order of the export.
pub const CSV_COLUMNS: [&str; 8] = [
  "id",
  "fullname",
  "tiktok",
  "age",
  "country",
  "why",
  "videoLink",
  "submittedAt",
];

/// Render `list` as CSV text. An empty list yields only the header.
pub fn to_csv(list: &[Submission]) -> Result<String> {
  let mut writer = WriterBuilder::new()
    .quote_style(QuoteStyle::Always)
    .terminator(Terminator::Any(b'\n'))
    .from_writer(Vec::new());

  for s in list {
    let id = s.id.to_string();
    let submitted_at = s
      .submitted_at
      .to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
    writer.write_record([
      id.as_str(),
      s.fullname.as_str(),
      s.tiktok.as_str(),
      s.age.as_str(),
      s.country.as_str(),
      s.why.as_str(),
      s.video_link.as_str(),
      submitted_at.as_str(),
    ])?;
  }

  let rows = writer.into_inner().map_err(|e| Error::Io(e.into_error()))?;
  let rows = String::from_utf8(rows)?;

  let mut out = CSV_COLUMNS.join(",");
  if !rows.is_empty() {
    out.push('\n');
    out.push_str(rows.strip_suffix('\n').unwrap_or(&rows));
  }
  Ok(out)
}

/// The dated CSV download for the whole list.
///
/// Fails with [`Error::NothingToExport`] when `list` is empty.
pub fn csv_artifact(list: &[Submission], today: NaiveDate) -> Result<Artifact> {
  if list.is_empty() {
    return Err(Error::NothingToExport);
  }
  let contents = to_csv(list)?;
  debug!(rows = list.len(), "rendered CSV export");
  Ok(Artifact {
    filename: csv_filename(today),
    media_type: CSV_MEDIA_TYPE,
    contents,
  })
}
