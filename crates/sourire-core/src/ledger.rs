//! [`Ledger`] — the in-memory submission list and its persisted mirror.
//!
//! The ledger is the single owner of the submission list. It is handed to the
//! form controller and the admin panel explicitly; nothing reaches it through
//! global state. After every mutation the in-memory list and the stored blob
//! are equal.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::{
  Result,
  kv::KeyValueStore,
  persist::Persistence,
  submission::{Submission, SubmissionId},
};

#[derive(Debug)]
pub struct Ledger<S> {
  persistence: Persistence<S>,
  /// Newest first.
  submissions: Vec<Submission>,
}

impl<S: KeyValueStore> Ledger<S> {
  /// Wrap `persistence` and load whatever it currently holds.
  pub fn open(persistence: Persistence<S>) -> Self {
    let submissions = persistence.load();
    Self { persistence, submissions }
  }

  /// Re-read the stored list, replacing the in-memory copy.
  pub fn reload(&mut self) { self.submissions = self.persistence.load(); }

  pub fn persistence(&self) -> &Persistence<S> { &self.persistence }

  // ── Reads ─────────────────────────────────────────────────────────────────

  /// All submissions, newest first.
  pub fn submissions(&self) -> &[Submission] { &self.submissions }

  pub fn len(&self) -> usize { self.submissions.len() }

  pub fn is_empty(&self) -> bool { self.submissions.is_empty() }

  pub fn get(&self, id: SubmissionId) -> Option<&Submission> {
    self.submissions.iter().find(|s| s.id == id)
  }

  /// The identifier for a submission created at `at`: its epoch milliseconds,
  /// bumped past the newest stored id when the clock has not moved on.
  pub fn next_id(&self, at: DateTime<Utc>) -> SubmissionId {
    let candidate = SubmissionId::from_timestamp(at);
    match self.submissions.iter().map(|s| s.id).max() {
      Some(newest) if candidate <= newest => SubmissionId(newest.0 + 1),
      _ => candidate,
    }
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  /// Put `submission` at the front of the list and persist immediately.
  ///
  /// If the write fails the in-memory list is restored and the error
  /// returned.
  pub fn append(&mut self, submission: Submission) -> Result<()> {
    let id = submission.id;
    self.submissions.insert(0, submission);
    if let Err(e) = self.persistence.save(&self.submissions) {
      warn!(%id, "failed to persist submission: {e}");
      self.submissions.remove(0);
      return Err(e);
    }
    info!(%id, total = self.submissions.len(), "submission recorded");
    Ok(())
  }

  /// Remove every submission, both stored and in memory.
  pub fn clear(&mut self) -> Result<()> {
    self.persistence.clear()?;
    let removed = self.submissions.len();
    self.submissions.clear();
    info!(removed, "all submissions cleared");
    Ok(())
  }
}
