//! Submission — a validated, persisted application record.
//!
//! Submissions are immutable once created. The only way to build one from
//! user input is [`Submission::accept`], which runs the validator first, so
//! every submission satisfied the form rules at the moment it was created.

use std::fmt;

use chrono::{DateTime, SubsecRound as _, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  draft::Draft,
  validate::{ValidationErrors, validate},
};

// ─── Identifier ───────────────────────────────────────────────────────────────

/// Milliseconds since the Unix epoch at creation time, made strictly
/// increasing by the ledger.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SubmissionId(pub i64);

impl SubmissionId {
  pub fn from_timestamp(at: DateTime<Utc>) -> Self { Self(at.timestamp_millis()) }
}

impl fmt::Display for SubmissionId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// ─── Submission ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
  pub id:           SubmissionId,
  pub fullname:     String,
  pub tiktok:       String,
  pub age:          String,
  pub country:      String,
  pub why:          String,
  #[serde(default)]
  pub video_link:   String,
  /// ISO-8601 UTC with millisecond precision, e.g. `2025-01-31T09:30:00.000Z`.
  #[serde(with = "iso_millis")]
  pub submitted_at: DateTime<Utc>,
}

impl Submission {
  /// Validate `draft` and, if it passes, promote it to a submission with
  /// trimmed text fields.
  ///
  /// `submitted_at` is truncated to whole milliseconds so the record survives
  /// a JSON round trip unchanged.
  pub fn accept(
    draft: &Draft,
    id: SubmissionId,
    submitted_at: DateTime<Utc>,
  ) -> Result<Self, ValidationErrors> {
    let errors = validate(draft);
    if !errors.is_empty() {
      return Err(errors);
    }

    Ok(Self {
      id,
      fullname: draft.fullname.trim().to_owned(),
      tiktok: draft.tiktok.trim().to_owned(),
      age: draft.age.trim().to_owned(),
      country: draft.country.trim().to_owned(),
      why: draft.why.trim().to_owned(),
      video_link: draft.video_link.trim().to_owned(),
      submitted_at: submitted_at.trunc_subsecs(3),
    })
  }
}

// ─── Timestamp format ────────────────────────────────────────────────────────

mod iso_millis {
  use chrono::{DateTime, SecondsFormat, Utc};
  use serde::{Deserialize as _, Deserializer, Serializer};

  pub fn serialize<S: Serializer>(
    dt: &DateTime<Utc>,
    serializer: S,
  ) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(
    deserializer: D,
  ) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&raw)
      .map(|dt| dt.with_timezone(&Utc))
      .map_err(serde::de::Error::custom)
  }
}
