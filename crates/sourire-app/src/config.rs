//! Runtime configuration.
//!
//! Read from an optional TOML file, then overridden by `SOURIRE_*`
//! environment variables. Every key has a default, so an empty configuration
//! is valid.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use sourire_core::{
  credential::{
    Argon2Credential, CredentialCheck, DEFAULT_ADMIN_PASSWORD, SharedSecret,
  },
  persist::DEFAULT_STORAGE_KEY,
};
use tracing::warn;

use crate::{Result, form::DEFAULT_CONFIRMATION_MS};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
  /// SQLite file backing the key-value store.
  pub data_path:           PathBuf,
  pub storage_key:         String,
  /// Directory that receives exported files.
  pub export_dir:          PathBuf,
  /// Shared secret for the admin gate; ignored when a hash is configured.
  pub admin_password:      String,
  /// Argon2 PHC string; takes precedence over `admin_password`.
  pub admin_password_hash: Option<String>,
  pub confirmation_ms:     i64,
  pub log_path:            PathBuf,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      data_path:           PathBuf::from("sourire.db"),
      storage_key:         DEFAULT_STORAGE_KEY.to_owned(),
      export_dir:          PathBuf::from("exports"),
      admin_password:      DEFAULT_ADMIN_PASSWORD.to_owned(),
      admin_password_hash: None,
      confirmation_ms:     DEFAULT_CONFIRMATION_MS,
      log_path:            PathBuf::from("sourire.log"),
    }
  }
}

impl AppConfig {
  /// Layer `file` (if it exists) under the `SOURIRE_*` environment.
  pub fn load(file: &Path) -> Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(file).required(false))
      .add_source(config::Environment::with_prefix("SOURIRE"))
      .build()?;
    Ok(settings.try_deserialize()?)
  }

  /// The credential check the admin gate should use.
  pub fn credential(&self) -> Result<Box<dyn CredentialCheck>> {
    if let Some(hash) = self.admin_password_hash.as_deref() {
      return Ok(Box::new(Argon2Credential::new(hash)?));
    }
    if self.admin_password == DEFAULT_ADMIN_PASSWORD {
      warn!("admin panel is using the default password");
    }
    Ok(Box::new(SharedSecret::new(self.admin_password.clone())))
  }

  pub fn confirmation(&self) -> chrono::Duration {
    chrono::Duration::milliseconds(self.confirmation_ms.max(0))
  }
}
