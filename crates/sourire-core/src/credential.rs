//! Admin credential checks.
//!
//! The admin panel only asks "does this candidate unlock me?". The default
//! [`SharedSecret`] compares against a fixed string and is not real
//! authentication; [`Argon2Credential`] verifies against an argon2 PHC hash
//! instead and can be swapped in without touching the panel.

use std::fmt;

use argon2::{
  Argon2, PasswordHash, PasswordHasher as _, PasswordVerifier as _,
  password_hash::SaltString,
};
use rand_core::OsRng;

use crate::{Error, Result};

/// Password accepted when nothing else is configured. Change before use.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Decides whether an entered value unlocks the admin panel.
pub trait CredentialCheck {
  fn verify(&self, candidate: &str) -> bool;
}

impl<C: CredentialCheck + ?Sized> CredentialCheck for Box<C> {
  fn verify(&self, candidate: &str) -> bool { (**self).verify(candidate) }
}

// ─── Shared secret ───────────────────────────────────────────────────────────

/// Exact string equality against a static secret.
#[derive(Clone)]
pub struct SharedSecret(String);

impl SharedSecret {
  pub fn new(secret: impl Into<String>) -> Self { Self(secret.into()) }
}

impl Default for SharedSecret {
  fn default() -> Self { Self::new(DEFAULT_ADMIN_PASSWORD) }
}

impl fmt::Debug for SharedSecret {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("SharedSecret(..)")
  }
}

impl CredentialCheck for SharedSecret {
  fn verify(&self, candidate: &str) -> bool { candidate == self.0 }
}

// ─── Argon2 ──────────────────────────────────────────────────────────────────

/// Verifies candidates against an argon2 PHC string, e.g. `$argon2id$v=19$…`.
#[derive(Clone)]
pub struct Argon2Credential {
  hash: String,
}

impl Argon2Credential {
  /// Fails if `hash` is not a well-formed PHC string.
  pub fn new(hash: impl Into<String>) -> Result<Self> {
    let hash = hash.into();
    PasswordHash::new(&hash).map_err(|e| Error::PasswordHash(e.to_string()))?;
    Ok(Self { hash })
  }
}

impl fmt::Debug for Argon2Credential {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Argon2Credential(..)")
  }
}

impl CredentialCheck for Argon2Credential {
  fn verify(&self, candidate: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(&self.hash) else {
      return false;
    };
    Argon2::default()
      .verify_password(candidate.as_bytes(), &parsed)
      .is_ok()
  }
}

/// Produce an argon2 PHC string for `password` with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String> {
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|h| h.to_string())
    .map_err(|e| Error::PasswordHash(e.to_string()))
}
