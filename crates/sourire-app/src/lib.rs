//! Application logic for the Les Héros du Sourire form.
//!
//! [`form::FormController`] owns the draft and drives submission;
//! [`admin::AdminPanel`] gates the review, export and clear actions behind a
//! [`CredentialCheck`](sourire_core::credential::CredentialCheck). Both receive
//! the [`Ledger`](sourire_core::ledger::Ledger) explicitly on every call.
//!
//! Everything here runs to completion synchronously; callers pass in the
//! current time so behaviour is deterministic under test.

pub mod admin;
pub mod config;
pub mod error;
pub mod form;

pub use error::{Error, Result};
