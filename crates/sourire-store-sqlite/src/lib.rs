//! SQLite backend for the submission key-value store.
//!
//! Plays the part of the browser's origin-scoped local storage: one file, one
//! table of string keys and string values, synchronous writes.

mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteKvStore;

#[cfg(test)]
mod tests;
