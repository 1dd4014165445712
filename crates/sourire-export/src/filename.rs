//! Download file names.

use chrono::NaiveDate;
use sourire_core::submission::Submission;

/// File name for a downloaded draft.
pub const DRAFT_FILENAME: &str = "candidature_brouillon.json";

/// Replace every character other than ASCII letters, digits, `_` and `-` with
/// `_`, so a handle can be embedded in a file name.
///
/// Works per Unicode scalar value: an astral emoji becomes a single `_`, not
/// one per UTF-16 code unit.
pub fn sanitize_handle(handle: &str) -> String {
  handle
    .chars()
    .map(|c| {
      if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' }
    })
    .collect()
}

/// `candidature_<sanitised-tiktok>_<id>.json`
pub fn submission_filename(submission: &Submission) -> String {
  format!(
    "candidature_{}_{}.json",
    sanitize_handle(&submission.tiktok),
    submission.id
  )
}

/// `les_heros_du_sourire_candidatures_<YYYY-MM-DD>.csv`
pub fn csv_filename(today: NaiveDate) -> String {
  format!(
    "les_heros_du_sourire_candidatures_{}.csv",
    today.format("%Y-%m-%d")
  )
}

#[cfg(test)]
mod tests {
  use chrono::{TimeZone as _, Utc};
  use sourire_core::submission::SubmissionId;

  use super::*;

  #[test]
  fn sanitize_replaces_everything_unsafe() {
    assert_eq!(sanitize_handle("@ana"), "_ana");
    assert_eq!(sanitize_handle("ana_b-c9"), "ana_b-c9");
    assert_eq!(sanitize_handle("../../etc/passwd"), "______etc_passwd");
    assert_eq!(sanitize_handle("zoé 😊"), "zo___");
  }

  #[test]
  fn astral_characters_become_one_underscore() {
    assert_eq!(sanitize_handle("@a😊b"), "_a_b");
  }

  #[test]
  fn submission_filename_embeds_handle_and_id() {
    let s = Submission {
      id:           SubmissionId(1717000000000),
      fullname:     "Ana".into(),
      tiktok:       "@ana.pop".into(),
      age:          "15".into(),
      country:      "Romania".into(),
      why:          "x".into(),
      video_link:   String::new(),
      submitted_at: Utc.timestamp_millis_opt(1717000000000).unwrap(),
    };
    assert_eq!(
      submission_filename(&s),
      "candidature__ana_pop_1717000000000.json"
    );
  }

  #[test]
  fn csv_filename_uses_iso_date() {
    let day = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
    assert_eq!(
      csv_filename(day),
      "les_heros_du_sourire_candidatures_2025-03-07.csv"
    );
  }
}
