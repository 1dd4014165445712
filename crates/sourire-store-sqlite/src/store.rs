//! [`SqliteKvStore`] — the SQLite implementation of [`KeyValueStore`].

use std::path::Path;

use rusqlite::{Connection, OptionalExtension as _};
use sourire_core::kv::KeyValueStore;
use tracing::debug;

use crate::{
  Error, Result,
  schema::{SCHEMA, SCHEMA_VERSION},
};

/// A key-value store backed by a single SQLite file.
pub struct SqliteKvStore {
  conn: Connection,
}

impl SqliteKvStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let conn = Connection::open(path)?;
    debug!(path = %path.display(), "opened key-value store");
    Self::init(conn)
  }

  /// Open an in-memory store — useful for testing.
  pub fn open_in_memory() -> Result<Self> {
    Self::init(Connection::open_in_memory()?)
  }

  fn init(conn: Connection) -> Result<Self> {
    let found: i64 =
      conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;
    if found > SCHEMA_VERSION {
      return Err(Error::SchemaVersion {
        found,
        supported: SCHEMA_VERSION,
      });
    }
    conn.execute_batch(SCHEMA)?;
    Ok(Self { conn })
  }

  /// Number of keys currently stored.
  pub fn len(&self) -> Result<usize> {
    let n: i64 = self.conn.query_row("SELECT COUNT(*) FROM kv", [], |r| r.get(0))?;
    Ok(n as usize)
  }

  pub fn is_empty(&self) -> Result<bool> { Ok(self.len()? == 0) }
}

impl KeyValueStore for SqliteKvStore {
  type Error = Error;

  fn get_item(&self, key: &str) -> Result<Option<String>> {
    let value = self
      .conn
      .query_row(
        "SELECT value FROM kv WHERE key = ?1",
        rusqlite::params![key],
        |r| r.get(0),
      )
      .optional()?;
    Ok(value)
  }

  fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
    self.conn.execute(
      "INSERT INTO kv (key, value) VALUES (?1, ?2)
       ON CONFLICT(key) DO UPDATE SET value = excluded.value",
      rusqlite::params![key, value],
    )?;
    Ok(())
  }

  fn remove_item(&mut self, key: &str) -> Result<()> {
    self
      .conn
      .execute("DELETE FROM kv WHERE key = ?1", rusqlite::params![key])?;
    Ok(())
  }
}
