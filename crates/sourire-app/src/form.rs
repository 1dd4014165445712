//! The application form controller.
//!
//! ```text
//!            submit (invalid) ─┐
//!                              v
//!   ┌──────── Editing ─────────┘
//!   │            ^
//!   │ submit     │ tick, confirmation elapsed
//!   │ (valid)    │
//!   └──────> Submitted
//! ```

use chrono::{DateTime, Duration, Utc};
use sourire_core::{
  draft::{Draft, DraftAction},
  kv::KeyValueStore,
  ledger::Ledger,
  submission::Submission,
  validate::{ValidationErrors, validate},
};
use sourire_export::{
  Clipboard, ExportSink, clipboard_text, draft_artifact, submission_artifact,
};
use tracing::{info, warn};

use crate::Result;

/// How long the "submitted" confirmation stays up, in milliseconds.
pub const DEFAULT_CONFIRMATION_MS: i64 = 3_500;

pub const SUBMITTED_NOTICE: &str =
  "Candidature envoyée — merci ! Un fichier a été téléchargé en local.";
pub const DRAFT_COPIED_NOTICE: &str = "Candidature copiée au presse-papier (JSON)";

// ─── State ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
  Editing,
  /// Transient confirmation after a successful submit.
  Submitted { until: DateTime<Utc> },
}

/// Result of [`FormController::submit`].
#[derive(Debug)]
pub enum SubmitOutcome {
  /// The draft failed validation; see [`FormController::errors`].
  Rejected,
  /// The submission was recorded. The per-submission export is best-effort:
  /// a failure there does not undo the recording.
  Accepted {
    submission:   Submission,
    export_error: Option<sourire_export::Error>,
  },
}

impl SubmitOutcome {
  pub fn is_accepted(&self) -> bool { matches!(self, Self::Accepted { .. }) }
}

// ─── Controller ───────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct FormController {
  draft:        Draft,
  errors:       ValidationErrors,
  state:        FormState,
  confirmation: Duration,
}

impl Default for FormController {
  fn default() -> Self {
    Self::new(Duration::milliseconds(DEFAULT_CONFIRMATION_MS))
  }
}

impl FormController {
  pub fn new(confirmation: Duration) -> Self {
    Self {
      draft: Draft::default(),
      errors: ValidationErrors::default(),
      state: FormState::Editing,
      confirmation,
    }
  }

  pub fn draft(&self) -> &Draft { &self.draft }

  /// Errors from the last rejected submit; cleared by a successful one.
  pub fn errors(&self) -> &ValidationErrors { &self.errors }

  pub fn state(&self) -> FormState { self.state }

  pub fn is_submitted(&self) -> bool {
    matches!(self.state, FormState::Submitted { .. })
  }

  /// Apply one field edit.
  pub fn apply(&mut self, action: DraftAction) {
    self.draft = std::mem::take(&mut self.draft).reduce(action);
  }

  /// Validate the draft and, if it passes, record it.
  ///
  /// On success the submission is prepended to `ledger` and persisted, the
  /// form resets, the confirmation starts, and the new record is exported to
  /// `sink`. On a validation failure nothing is recorded or exported. A
  /// persistence failure is returned as an error and leaves the draft intact.
  pub fn submit<S, K>(
    &mut self,
    ledger: &mut Ledger<S>,
    sink: &mut K,
    now: DateTime<Utc>,
  ) -> Result<SubmitOutcome>
  where
    S: KeyValueStore,
    K: ExportSink + ?Sized,
  {
    let id = ledger.next_id(now);
    let submission = match Submission::accept(&self.draft, id, now) {
      Ok(s) => s,
      Err(errors) => {
        self.errors = errors;
        return Ok(SubmitOutcome::Rejected);
      }
    };

    ledger.append(submission.clone())?;
    info!(id = %submission.id, tiktok = %submission.tiktok, "application submitted");

    self.draft = Draft::default();
    self.errors = ValidationErrors::default();
    self.state = FormState::Submitted { until: now + self.confirmation };

    let export_error = submission_artifact(&submission)
      .and_then(|artifact| sink.deliver(&artifact))
      .err();
    if let Some(e) = &export_error {
      warn!(id = %submission.id, "per-submission export failed: {e}");
    }

    Ok(SubmitOutcome::Accepted { submission, export_error })
  }

  /// Drop the confirmation once it has been shown long enough. Returns `true`
  /// if the state changed.
  pub fn tick(&mut self, now: DateTime<Utc>) -> bool {
    match self.state {
      FormState::Submitted { until } if now >= until => {
        self.state = FormState::Editing;
        true
      }
      _ => false,
    }
  }

  /// Put the draft on the clipboard as compact JSON, whatever its state.
  pub fn copy_draft<C: Clipboard + ?Sized>(&self, clipboard: &mut C) -> Result<()> {
    clipboard.set_text(&clipboard_text(&self.draft)?)?;
    Ok(())
  }

  /// Export the draft as `candidature_brouillon.json`, whatever its state.
  pub fn download_draft<K: ExportSink + ?Sized>(&self, sink: &mut K) -> Result<()> {
    sink.deliver(&draft_artifact(&self.draft)?)?;
    Ok(())
  }

  /// Check the current draft without submitting it.
  pub fn preview_errors(&self) -> ValidationErrors { validate(&self.draft) }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone as _;
  use sourire_core::{
    draft::Field,
    kv::MemoryStore,
    persist::Persistence,
    submission::SubmissionId,
  };
  use sourire_export::{Artifact, MemoryClipboard, MemorySink};

  use super::*;

  fn ledger() -> Ledger<MemoryStore> {
    Ledger::open(Persistence::with_default_key(MemoryStore::new()))
  }

  fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 31, 9, 30, 0).unwrap()
  }

  fn type_text(form: &mut FormController, field: Field, text: &str) {
    for c in text.chars() {
      form.apply(DraftAction::Push(field, c));
    }
  }

  fn fill_ana(form: &mut FormController) {
    type_text(form, Field::Fullname, "Ana Popescu");
    type_text(form, Field::Tiktok, "@ana");
    type_text(form, Field::Age, "15");
    type_text(form, Field::Country, "Romania");
    type_text(
      form,
      Field::Why,
      "Je veux rejoindre pour partager de la bonne humeur",
    );
    form.apply(DraftAction::SetAgree(true));
  }

  #[test]
  fn valid_submit_records_and_exports() {
    let mut form = FormController::default();
    let mut l = ledger();
    let mut sink = MemorySink::default();
    fill_ana(&mut form);
    assert!(form.preview_errors().is_empty());

    let outcome = form.submit(&mut l, &mut sink, now()).unwrap();
    let SubmitOutcome::Accepted { submission, export_error } = outcome else {
      panic!("expected acceptance");
    };
    assert!(export_error.is_none());

    assert_eq!(l.len(), 1);
    assert_eq!(l.submissions()[0], submission);
    assert_eq!(submission.fullname, "Ana Popescu");
    assert_eq!(submission.id, SubmissionId(now().timestamp_millis()));
    assert_eq!(l.persistence().load(), vec![submission.clone()]);

    assert_eq!(sink.delivered.len(), 1);
    assert_eq!(
      sink.delivered[0].filename,
      format!("candidature__ana_{}.json", submission.id)
    );

    assert_eq!(form.draft(), &Draft::default());
    assert!(form.errors().is_empty());
    assert!(form.is_submitted());
  }

  #[test]
  fn invalid_submit_keeps_editing_and_records_nothing() {
    let mut form = FormController::default();
    let mut l = ledger();
    let mut sink = MemorySink::default();
    type_text(&mut form, Field::Fullname, "Ana");

    let outcome = form.submit(&mut l, &mut sink, now()).unwrap();
    assert!(!outcome.is_accepted());
    assert!(l.is_empty());
    assert!(sink.delivered.is_empty());
    assert_eq!(form.state(), FormState::Editing);
    assert_eq!(form.draft().fullname, "Ana");
    assert!(form.errors().contains(Field::Tiktok));
    assert!(!form.errors().contains(Field::Fullname));
  }

  #[test]
  fn newest_submission_comes_first() {
    let mut form = FormController::default();
    let mut l = ledger();
    let mut sink = MemorySink::default();

    fill_ana(&mut form);
    form.submit(&mut l, &mut sink, now()).unwrap();
    fill_ana(&mut form);
    form.apply(DraftAction::Set(Field::Tiktok, "@second".into()));
    form.submit(&mut l, &mut sink, now()).unwrap();

    let handles: Vec<_> = l.submissions().iter().map(|s| s.tiktok.as_str()).collect();
    assert_eq!(handles, ["@second", "@ana"]);
    assert!(l.submissions()[0].id > l.submissions()[1].id);
  }

  #[test]
  fn confirmation_reverts_after_delay() {
    let mut form = FormController::default();
    let mut l = ledger();
    fill_ana(&mut form);
    form.submit(&mut l, &mut MemorySink::default(), now()).unwrap();

    assert!(!form.tick(now() + Duration::milliseconds(3_499)));
    assert!(form.is_submitted());
    assert!(form.tick(now() + Duration::milliseconds(3_500)));
    assert_eq!(form.state(), FormState::Editing);
    assert!(!form.tick(now() + Duration::seconds(10)));
  }

  struct BrokenSink;

  impl ExportSink for BrokenSink {
    fn deliver(&mut self, _: &Artifact) -> sourire_export::Result<()> {
      Err(sourire_export::Error::Io(std::io::Error::other("disk full")))
    }
  }

  #[test]
  fn export_failure_does_not_undo_submission() {
    let mut form = FormController::default();
    let mut l = ledger();
    fill_ana(&mut form);

    let outcome = form.submit(&mut l, &mut BrokenSink, now()).unwrap();
    let SubmitOutcome::Accepted { export_error, .. } = outcome else {
      panic!("expected acceptance");
    };
    assert!(export_error.is_some());
    assert_eq!(l.len(), 1);
  }

  #[test]
  fn draft_can_be_copied_and_downloaded_while_incomplete() {
    let mut form = FormController::default();
    type_text(&mut form, Field::Fullname, "Ana");

    let mut clipboard = MemoryClipboard::default();
    form.copy_draft(&mut clipboard).unwrap();
    let copied: Draft =
      serde_json::from_str(clipboard.contents.as_deref().unwrap()).unwrap();
    assert_eq!(copied.fullname, "Ana");

    let mut sink = MemorySink::default();
    form.download_draft(&mut sink).unwrap();
    assert_eq!(sink.delivered[0].filename, "candidature_brouillon.json");
    assert!(sink.delivered[0].contents.contains("\n  \"fullname\": \"Ana\""));
  }
}
