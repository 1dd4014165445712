//! Tests for `SqliteKvStore`, in memory and on disk.

use chrono::{TimeZone as _, Utc};
use sourire_core::{
  draft::Draft,
  kv::KeyValueStore,
  ledger::Ledger,
  persist::{DEFAULT_STORAGE_KEY, Persistence},
  submission::Submission,
};

use crate::{Error, SqliteKvStore};

fn store() -> SqliteKvStore {
  SqliteKvStore::open_in_memory().expect("in-memory store")
}

fn submission(ledger: &Ledger<SqliteKvStore>, handle: &str, ms: i64) -> Submission {
  let at = Utc.timestamp_millis_opt(ms).unwrap();
  let draft = Draft {
    fullname: "Ana Popescu".into(),
    tiktok: handle.into(),
    age: "15".into(),
    country: "Romania".into(),
    why: "Je veux rejoindre pour \"partager\" de la bonne humeur".into(),
    agree: true,
    ..Draft::default()
  };
  Submission::accept(&draft, ledger.next_id(at), at).unwrap()
}

// ─── Raw key-value behaviour ─────────────────────────────────────────────────

#[test]
fn missing_key_is_none() {
  let s = store();
  assert_eq!(s.get_item("nope").unwrap(), None);
  assert!(s.is_empty().unwrap());
}

#[test]
fn set_overwrites() {
  let mut s = store();
  s.set_item("k", "first").unwrap();
  s.set_item("k", "second").unwrap();
  assert_eq!(s.get_item("k").unwrap().as_deref(), Some("second"));
  assert_eq!(s.len().unwrap(), 1);
}

#[test]
fn remove_is_idempotent() {
  let mut s = store();
  s.set_item("k", "v").unwrap();
  s.remove_item("k").unwrap();
  s.remove_item("k").unwrap();
  assert_eq!(s.get_item("k").unwrap(), None);
}

#[test]
fn values_keep_unicode_and_newlines() {
  let mut s = store();
  let value = "Héros du Sourire 😊\nligne deux";
  s.set_item("k", value).unwrap();
  assert_eq!(s.get_item("k").unwrap().as_deref(), Some(value));
}

// ─── On-disk persistence ─────────────────────────────────────────────────────

#[test]
fn data_survives_reopen() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("sourire.db");

  let mut s = SqliteKvStore::open(&path).unwrap();
  s.set_item(DEFAULT_STORAGE_KEY, "[]").unwrap();
  drop(s);

  let s = SqliteKvStore::open(&path).unwrap();
  assert_eq!(s.get_item(DEFAULT_STORAGE_KEY).unwrap().as_deref(), Some("[]"));
}

#[test]
fn newer_schema_is_refused() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("future.db");
  {
    let conn = rusqlite::Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 99;").unwrap();
  }
  assert!(matches!(
    SqliteKvStore::open(&path),
    Err(Error::SchemaVersion { found: 99, .. })
  ));
}

// ─── Ledger on SQLite ────────────────────────────────────────────────────────

#[test]
fn ledger_round_trip_through_file() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("sourire.db");

  let mut ledger = Ledger::open(Persistence::with_default_key(
    SqliteKvStore::open(&path).unwrap(),
  ));
  let first = submission(&ledger, "@first", 1_000);
  ledger.append(first.clone()).unwrap();
  let second = submission(&ledger, "@second", 2_000);
  ledger.append(second.clone()).unwrap();
  drop(ledger);

  let reopened = Ledger::open(Persistence::with_default_key(
    SqliteKvStore::open(&path).unwrap(),
  ));
  assert_eq!(reopened.submissions(), &[second, first]);
}

#[test]
fn ledger_clear_removes_row() {
  let mut ledger = Ledger::open(Persistence::with_default_key(store()));
  ledger.append(submission(&ledger, "@a", 1)).unwrap();
  assert_eq!(ledger.persistence().store().len().unwrap(), 1);

  ledger.clear().unwrap();
  ledger.clear().unwrap();
  assert!(ledger.persistence().store().is_empty().unwrap());
  assert!(ledger.is_empty());
}

#[test]
fn corrupt_row_degrades_to_empty_ledger() {
  let mut s = store();
  s.set_item(DEFAULT_STORAGE_KEY, "[{\"id\": ").unwrap();
  let ledger = Ledger::open(Persistence::with_default_key(s));
  assert!(ledger.is_empty());
  assert!(ledger.persistence().try_load().is_err());
}
