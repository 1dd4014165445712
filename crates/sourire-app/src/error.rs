//! Error type for `sourire-app`.
//!
//! Variants shown to the user carry their French notice as the display text.

use sourire_core::submission::SubmissionId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("Mot de passe administrateur incorrect.")]
  WrongPassword,

  #[error("Panel administrateur verrouillé.")]
  Locked,

  #[error("Suppression non confirmée.")]
  ClearNotConfirmed,

  #[error("Candidature introuvable : {0}")]
  UnknownSubmission(SubmissionId),

  #[error(transparent)]
  Export(#[from] sourire_export::Error),

  #[error(transparent)]
  Core(#[from] sourire_core::Error),

  #[error("configuration error: {0}")]
  Config(#[from] config::ConfigError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
