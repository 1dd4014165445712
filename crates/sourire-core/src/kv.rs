//! The `KeyValueStore` trait — a persistent, synchronous string store.
//!
//! Implemented by storage backends (e.g. `sourire-store-sqlite`). The ledger
//! and the form depend on this abstraction, not on a concrete backend.

use std::{collections::HashMap, convert::Infallible};

/// A flat string-to-string store scoped to one application instance.
///
/// Writes either fully succeed or return an error; there are no partial
/// states. No cross-process coordination is attempted: when two instances
/// share a backing file the last writer wins.
pub trait KeyValueStore {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Read the value under `key`; `None` if nothing is stored.
  fn get_item(&self, key: &str) -> Result<Option<String>, Self::Error>;

  /// Store `value` under `key`, replacing any previous value.
  fn set_item(&mut self, key: &str, value: &str) -> Result<(), Self::Error>;

  /// Remove `key`. Removing a missing key is not an error.
  fn remove_item(&mut self, key: &str) -> Result<(), Self::Error>;
}

// ─── In-memory backend ───────────────────────────────────────────────────────

/// A non-persistent store, useful for tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  items: HashMap<String, String>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }
}

impl KeyValueStore for MemoryStore {
  type Error = Infallible;

  fn get_item(&self, key: &str) -> Result<Option<String>, Self::Error> {
    Ok(self.items.get(key).cloned())
  }

  fn set_item(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
    self.items.insert(key.to_owned(), value.to_owned());
    Ok(())
  }

  fn remove_item(&mut self, key: &str) -> Result<(), Self::Error> {
    self.items.remove(key);
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn set_get_remove() {
    let mut store = MemoryStore::new();
    assert_eq!(store.get_item("k").unwrap(), None);

    store.set_item("k", "one").unwrap();
    store.set_item("k", "two").unwrap();
    assert_eq!(store.get_item("k").unwrap().as_deref(), Some("two"));

    store.remove_item("k").unwrap();
    store.remove_item("k").unwrap();
    assert_eq!(store.get_item("k").unwrap(), None);
  }
}
