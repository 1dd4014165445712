//! Persistence adapter: the submission list as one JSON blob under a fixed key.

use tracing::{debug, warn};

use crate::{Error, Result, kv::KeyValueStore, submission::Submission};

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "lhs_applications";

/// Reads and writes the whole submission list in one piece. There is no
/// schema migration; the blob is a JSON array of
/// [`Submission`](crate::submission::Submission) records.
#[derive(Debug)]
pub struct Persistence<S> {
  store: S,
  key:   String,
}

impl<S: KeyValueStore> Persistence<S> {
  pub fn new(store: S, key: impl Into<String>) -> Self {
    Self { store, key: key.into() }
  }

  /// Use [`DEFAULT_STORAGE_KEY`].
  pub fn with_default_key(store: S) -> Self {
    Self::new(store, DEFAULT_STORAGE_KEY)
  }

  pub fn key(&self) -> &str { &self.key }

  pub fn store(&self) -> &S { &self.store }

  pub fn into_inner(self) -> S { self.store }

  /// Load the stored list.
  ///
  /// A missing blob, an unreadable store and a blob that does not parse all
  /// yield an empty list; the latter two are logged. Use
  /// [`try_load`](Self::try_load) to tell them apart.
  pub fn load(&self) -> Vec<Submission> {
    match self.try_load() {
      Ok(list) => list,
      Err(e) => {
        warn!(key = %self.key, "discarding stored submissions: {e}");
        Vec::new()
      }
    }
  }

  /// Load the stored list, reporting store failures and corrupt blobs.
  pub fn try_load(&self) -> Result<Vec<Submission>> {
    let Some(raw) = self.store.get_item(&self.key).map_err(Error::store)?
    else {
      debug!(key = %self.key, "no stored submissions");
      return Ok(Vec::new());
    };

    let list: Vec<Submission> =
      serde_json::from_str(&raw).map_err(|source| Error::CorruptLedger {
        key: self.key.clone(),
        source,
      })?;
    debug!(key = %self.key, count = list.len(), "loaded submissions");
    Ok(list)
  }

  /// Serialise `list` and overwrite the stored blob.
  pub fn save(&mut self, list: &[Submission]) -> Result<()> {
    let raw = serde_json::to_string(list)?;
    self.store.set_item(&self.key, &raw).map_err(Error::store)?;
    debug!(key = %self.key, count = list.len(), "saved submissions");
    Ok(())
  }

  /// Remove the stored blob entirely. Idempotent.
  pub fn clear(&mut self) -> Result<()> {
    self.store.remove_item(&self.key).map_err(Error::store)?;
    debug!(key = %self.key, "cleared submissions");
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use chrono::{TimeZone as _, Utc};

  use super::*;
  use crate::{kv::MemoryStore, submission::SubmissionId};

  fn submission(id: i64, why: &str) -> Submission {
    Submission {
      id:           SubmissionId(id),
      fullname:     format!("Person {id}"),
      tiktok:       format!("@p{id}"),
      age:          "21".into(),
      country:      "France".into(),
      why:          why.into(),
      video_link:   String::new(),
      submitted_at: Utc.timestamp_millis_opt(id).unwrap(),
    }
  }

  #[test]
  fn load_without_data_is_empty() {
    let p = Persistence::with_default_key(MemoryStore::new());
    assert!(p.load().is_empty());
    assert!(p.try_load().unwrap().is_empty());
  }

  #[test]
  fn save_then_load_round_trips_in_order() {
    let mut p = Persistence::with_default_key(MemoryStore::new());
    let list = vec![
      submission(3, "trois \"guillemets\""),
      submission(2, "deux, avec virgule"),
      submission(1, "un\nsur deux lignes"),
    ];
    p.save(&list).unwrap();
    assert_eq!(p.load(), list);
  }

  #[test]
  fn save_overwrites() {
    let mut p = Persistence::with_default_key(MemoryStore::new());
    p.save(&[submission(1, "a"), submission(2, "b")]).unwrap();
    p.save(&[submission(3, "c")]).unwrap();
    assert_eq!(p.load(), vec![submission(3, "c")]);
  }

  #[test]
  fn stored_layout_is_a_json_array_under_the_key() {
    let mut p = Persistence::with_default_key(MemoryStore::new());
    p.save(&[submission(7, "x")]).unwrap();
    let raw = p.store().get_item("lhs_applications").unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value[0]["id"], 7);
    assert_eq!(value[0]["submittedAt"], "1970-01-01T00:00:00.007Z");
  }

  #[test]
  fn clear_twice_is_same_as_once() {
    let mut p = Persistence::with_default_key(MemoryStore::new());
    p.save(&[submission(1, "a")]).unwrap();
    p.clear().unwrap();
    assert!(p.load().is_empty());
    p.clear().unwrap();
    assert!(p.load().is_empty());
    assert_eq!(p.store().get_item(DEFAULT_STORAGE_KEY).unwrap(), None);
  }

  #[test]
  fn corrupt_blob_loads_as_empty_but_is_distinguishable() {
    let mut store = MemoryStore::new();
    store.set_item(DEFAULT_STORAGE_KEY, "{not json").unwrap();
    let p = Persistence::with_default_key(store);

    assert!(p.load().is_empty());
    assert!(matches!(p.try_load(), Err(Error::CorruptLedger { .. })));
  }

  #[test]
  fn keys_are_independent() {
    let mut p = Persistence::new(MemoryStore::new(), "one");
    p.save(&[submission(1, "a")]).unwrap();
    let store = p.into_inner();
    let other = Persistence::new(store, "two");
    assert!(other.load().is_empty());
  }
}
