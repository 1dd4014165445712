//! Admin gate and panel.
//!
//! The gate starts locked and unlocks when the configured
//! [`CredentialCheck`] accepts a candidate. There is no lockout and no expiry:
//! once unlocked the panel stays open for the lifetime of the process.
//!
//! While unlocked the panel gives read-only access to the ledger plus the bulk
//! actions: per-item JSON export, CSV export, copy-all and clear-all. Clearing
//! is a two-step operation that needs an explicit confirmation.

use chrono::NaiveDate;
use sourire_core::{
  credential::CredentialCheck,
  kv::KeyValueStore,
  ledger::Ledger,
  submission::{Submission, SubmissionId},
};
use sourire_export::{
  Clipboard, ExportSink, clipboard_text, csv_artifact, submission_artifact,
};
use tracing::{info, warn};

use crate::{Error, Result};

pub const CLEAR_PROMPT: &str =
  "Supprimer toutes les candidatures locales ? Cette action est irréversible.";
pub const ALL_COPIED_NOTICE: &str = "Toutes candidatures copiées en JSON";
pub const EMPTY_PANEL_NOTICE: &str = "Aucune candidature enregistrée.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
  Locked,
  Unlocked,
}

pub struct AdminPanel<C> {
  credential:    C,
  state:         GateState,
  clear_pending: bool,
}

impl<C: CredentialCheck> AdminPanel<C> {
  pub fn new(credential: C) -> Self {
    Self {
      credential,
      state: GateState::Locked,
      clear_pending: false,
    }
  }

  pub fn state(&self) -> GateState { self.state }

  pub fn is_unlocked(&self) -> bool { self.state == GateState::Unlocked }

  /// Try to open the panel with `candidate`.
  pub fn unlock(&mut self, candidate: &str) -> Result<()> {
    if self.credential.verify(candidate) {
      if !self.is_unlocked() {
        info!("admin panel unlocked");
      }
      self.state = GateState::Unlocked;
      Ok(())
    } else {
      warn!("admin unlock attempt with wrong password");
      Err(Error::WrongPassword)
    }
  }

  fn ensure_unlocked(&self) -> Result<()> {
    if self.is_unlocked() { Ok(()) } else { Err(Error::Locked) }
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  /// The full list, newest first.
  pub fn submissions<'a, S: KeyValueStore>(
    &self,
    ledger: &'a Ledger<S>,
  ) -> Result<&'a [Submission]> {
    self.ensure_unlocked()?;
    Ok(ledger.submissions())
  }

  /// Panel heading, including the current count.
  pub fn title<S: KeyValueStore>(&self, ledger: &Ledger<S>) -> String {
    format!("Panel administrateur — Candidatures ({})", ledger.len())
  }

  // ── Exports ───────────────────────────────────────────────────────────────

  /// Export one submission as JSON. Returns the file name used.
  pub fn export_one<S, K>(
    &self,
    ledger: &Ledger<S>,
    id: SubmissionId,
    sink: &mut K,
  ) -> Result<String>
  where
    S: KeyValueStore,
    K: ExportSink + ?Sized,
  {
    self.ensure_unlocked()?;
    let submission = ledger.get(id).ok_or(Error::UnknownSubmission(id))?;
    let artifact = submission_artifact(submission)?;
    sink.deliver(&artifact)?;
    Ok(artifact.filename)
  }

  /// Export the whole list as a dated CSV file. Returns the file name used.
  ///
  /// Fails with [`sourire_export::Error::NothingToExport`] when the list is
  /// empty, in which case nothing is delivered.
  pub fn export_csv<S, K>(
    &self,
    ledger: &Ledger<S>,
    sink: &mut K,
    today: NaiveDate,
  ) -> Result<String>
  where
    S: KeyValueStore,
    K: ExportSink + ?Sized,
  {
    self.ensure_unlocked()?;
    let artifact = csv_artifact(ledger.submissions(), today)?;
    sink.deliver(&artifact)?;
    info!(rows = ledger.len(), file = %artifact.filename, "CSV export");
    Ok(artifact.filename)
  }

  /// Copy the whole list to the clipboard as compact JSON.
  pub fn copy_all<S, C2>(&self, ledger: &Ledger<S>, clipboard: &mut C2) -> Result<()>
  where
    S: KeyValueStore,
    C2: Clipboard + ?Sized,
  {
    self.ensure_unlocked()?;
    clipboard.set_text(&clipboard_text(ledger.submissions())?)?;
    Ok(())
  }

  // ── Clear all ─────────────────────────────────────────────────────────────

  /// First step of clear-all: arm the confirmation and return the warning to
  /// show the user.
  pub fn request_clear(&mut self) -> Result<&'static str> {
    self.ensure_unlocked()?;
    self.clear_pending = true;
    Ok(CLEAR_PROMPT)
  }

  pub fn is_clear_pending(&self) -> bool { self.clear_pending }

  pub fn cancel_clear(&mut self) { self.clear_pending = false; }

  /// Second step of clear-all: empty the store and the in-memory list.
  pub fn confirm_clear<S: KeyValueStore>(&mut self, ledger: &mut Ledger<S>) -> Result<()> {
    self.ensure_unlocked()?;
    if !self.clear_pending {
      return Err(Error::ClearNotConfirmed);
    }
    self.clear_pending = false;
    ledger.clear()?;
    Ok(())
  }
}
