//! Core types for the Les Héros du Sourire application form.
//!
//! This crate holds the draft and submission models, the validator, the
//! key-value persistence boundary and the admin credential check. It has no
//! terminal or database dependencies; every other crate depends on it.

pub mod credential;
pub mod draft;
pub mod error;
pub mod kv;
pub mod ledger;
pub mod persist;
pub mod submission;
pub mod validate;

pub use error::{Error, Result};
