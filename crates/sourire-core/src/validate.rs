//! Draft validation.
//!
//! Every rule is evaluated independently so the form can show all problems at
//! once. An empty [`ValidationErrors`] means the draft may be submitted.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::draft::{Draft, Field};

/// Youngest accepted applicant.
pub const MIN_AGE: f64 = 13.0;

/// Minimum length of the trimmed motivation text, in Unicode scalar values.
///
/// A browser `length` counts UTF-16 code units instead, so an emoji outside
/// the Basic Multilingual Plane counts once here where a web form counts it
/// twice.
pub const MIN_MOTIVATION_CHARS: usize = 20;

// ─── Errors map ───────────────────────────────────────────────────────────────

/// Field name → human-readable message. Empty when the draft is acceptable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<Field, &'static str>);

impl ValidationErrors {
  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  pub fn len(&self) -> usize { self.0.len() }

  /// The message for `field`, if it failed.
  pub fn get(&self, field: Field) -> Option<&'static str> {
    self.0.get(&field).copied()
  }

  pub fn contains(&self, field: Field) -> bool { self.0.contains_key(&field) }

  pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
    self.0.iter().map(|(f, m)| (*f, *m))
  }

  fn insert(&mut self, field: Field, message: &'static str) {
    self.0.insert(field, message);
  }
}

// ─── Rules ────────────────────────────────────────────────────────────────────

/// Check `draft` against every form rule.
pub fn validate(draft: &Draft) -> ValidationErrors {
  let mut errors = ValidationErrors::default();

  if draft.fullname.trim().is_empty() {
    errors.insert(Field::Fullname, "Veuillez entrer votre nom complet.");
  }
  if draft.tiktok.trim().is_empty() {
    errors.insert(
      Field::Tiktok,
      "Indiquez votre pseudo TikTok (ex: @monpseudo).",
    );
  }
  if !age_is_acceptable(&draft.age) {
    errors.insert(Field::Age, "Vous devez avoir au moins 13 ans.");
  }
  if draft.country.trim().is_empty() {
    errors.insert(Field::Country, "Indiquez votre pays.");
  }
  if draft.why.trim().chars().count() < MIN_MOTIVATION_CHARS {
    errors.insert(
      Field::Why,
      "Expliquez en quelques mots pourquoi vous voulez rejoindre (min 20 \
       caractères).",
    );
  }
  if !draft.video_link.is_empty() && !is_absolute_url(&draft.video_link) {
    errors.insert(Field::VideoLink, "Lien vidéo invalide.");
  }
  if !draft.agree {
    errors.insert(Field::Agree, "Vous devez accepter le règlement du team.");
  }

  errors
}

/// Non-numeric input (including NaN and infinities) fails the check.
fn age_is_acceptable(age: &str) -> bool {
  match age.trim().parse::<f64>() {
    Ok(n) if n.is_finite() => n >= MIN_AGE,
    _ => false,
  }
}

fn is_absolute_url(s: &str) -> bool { url::Url::parse(s).is_ok() }
