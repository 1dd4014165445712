//! JSON artifacts and clipboard payloads.

use serde::Serialize;
use sourire_core::{draft::Draft, submission::Submission};

use crate::{
  Artifact, JSON_MEDIA_TYPE, Result,
  filename::{DRAFT_FILENAME, submission_filename},
};

/// Pretty-printed JSON with two-space indentation.
pub fn pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
  Ok(serde_json::to_string_pretty(value)?)
}

/// Wrap any serialisable value as a JSON download named `filename`.
pub fn json_artifact<T: Serialize + ?Sized>(
  value: &T,
  filename: impl Into<String>,
) -> Result<Artifact> {
  Ok(Artifact {
    filename:   filename.into(),
    media_type: JSON_MEDIA_TYPE,
    contents:   pretty_json(value)?,
  })
}

/// A single submission, named after its handle and id.
pub fn submission_artifact(submission: &Submission) -> Result<Artifact> {
  json_artifact(submission, submission_filename(submission))
}

/// The current form content, complete or not.
pub fn draft_artifact(draft: &Draft) -> Result<Artifact> {
  json_artifact(draft, DRAFT_FILENAME)
}

/// Compact JSON for the clipboard.
pub fn clipboard_text<T: Serialize + ?Sized>(value: &T) -> Result<String> {
  Ok(serde_json::to_string(value)?)
}

#[cfg(test)]
mod tests {
  use chrono::{TimeZone as _, Utc};
  use sourire_core::submission::SubmissionId;

  use super::*;

  fn submission() -> Submission {
    Submission {
      id:           SubmissionId(42),
      fullname:     "Ana Popescu".into(),
      tiktok:       "@ana".into(),
      age:          "15".into(),
      country:      "Romania".into(),
      why:          "Je veux rejoindre pour partager de la bonne humeur".into(),
      video_link:   String::new(),
      submitted_at: Utc.with_ymd_and_hms(2025, 1, 31, 9, 30, 0).unwrap(),
    }
  }

  #[test]
  fn submission_artifact_is_pretty_and_named() {
    let a = submission_artifact(&submission()).unwrap();
    assert_eq!(a.filename, "candidature__ana_42.json");
    assert_eq!(a.media_type, "application/json");
    assert!(a.contents.starts_with("{\n  \"id\": 42,\n  \"fullname\""));

    let back: Submission = serde_json::from_str(&a.contents).unwrap();
    assert_eq!(back, submission());
  }

  #[test]
  fn draft_artifact_keeps_incomplete_drafts() {
    let draft = Draft { fullname: "Ana".into(), ..Draft::default() };
    let a = draft_artifact(&draft).unwrap();
    assert_eq!(a.filename, "candidature_brouillon.json");
    let back: Draft = serde_json::from_str(&a.contents).unwrap();
    assert_eq!(back, draft);
  }

  #[test]
  fn bulk_json_is_an_array() {
    let list = vec![submission(), submission()];
    let a = json_artifact(&list, "all.json").unwrap();
    let value: serde_json::Value = serde_json::from_str(&a.contents).unwrap();
    assert_eq!(value.as_array().map(Vec::len), Some(2));
  }

  #[test]
  fn clipboard_text_is_compact() {
    let text = clipboard_text(&Draft::default()).unwrap();
    assert_eq!(
      text,
      r#"{"fullname":"","tiktok":"","age":"","country":"","why":"","videoLink":"","agree":false}"#
    );
  }
}
