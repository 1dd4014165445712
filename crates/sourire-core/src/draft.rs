//! The in-progress application form.
//!
//! A [`Draft`] is owned by the form controller while the form is open. It is
//! never persisted; it is either discarded or promoted to a
//! [`Submission`](crate::submission::Submission) once it validates.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, IntoEnumIterator as _};

// ─── Field ────────────────────────────────────────────────────────────────────

/// A named form field. The string form matches the JSON key of the field.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
  AsRefStr,
  Display,
  EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Field {
  Fullname,
  Tiktok,
  Age,
  Country,
  Why,
  VideoLink,
  Agree,
}

impl Field {
  /// All fields in form order.
  pub fn all() -> impl Iterator<Item = Field> { Field::iter() }

  /// Whether the field holds free text (everything except the agreement box).
  pub fn is_text(self) -> bool { self != Field::Agree }

  /// Label shown next to the input.
  pub fn label(self) -> &'static str {
    match self {
      Field::Fullname => "Nom complet",
      Field::Tiktok => "Pseudo TikTok",
      Field::Age => "Âge",
      Field::Country => "Pays",
      Field::Why => "Pourquoi veux-tu rejoindre ?",
      Field::VideoLink => "Lien vers une vidéo (TikTok / Instagram)",
      Field::Agree => "J'accepte le règlement interne du team.",
    }
  }

  /// Example value shown while the input is empty.
  pub fn placeholder(self) -> Option<&'static str> {
    match self {
      Field::Tiktok => Some("@monpseudo"),
      Field::VideoLink => Some("https://..."),
      _ => None,
    }
  }
}

// ─── Draft ────────────────────────────────────────────────────────────────────

/// Form state as typed, untrimmed and unvalidated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
  pub fullname:   String,
  pub tiktok:     String,
  /// Numeric string; parsed only by the validator.
  pub age:        String,
  pub country:    String,
  pub why:        String,
  #[serde(default)]
  pub video_link: String,
  #[serde(default)]
  pub agree:      bool,
}

/// One state transition of a [`Draft`]; roughly one per keystroke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftAction {
  /// Replace a text field's content.
  Set(Field, String),
  /// Append a character to a text field.
  Push(Field, char),
  /// Remove the last character of a text field.
  Backspace(Field),
  SetAgree(bool),
  ToggleAgree,
  /// Back to the empty form.
  Reset,
}

impl Draft {
  /// The text content of `field`, or `None` for the agreement box.
  pub fn text(&self, field: Field) -> Option<&str> {
    match field {
      Field::Fullname => Some(&self.fullname),
      Field::Tiktok => Some(&self.tiktok),
      Field::Age => Some(&self.age),
      Field::Country => Some(&self.country),
      Field::Why => Some(&self.why),
      Field::VideoLink => Some(&self.video_link),
      Field::Agree => None,
    }
  }

  fn text_mut(&mut self, field: Field) -> Option<&mut String> {
    match field {
      Field::Fullname => Some(&mut self.fullname),
      Field::Tiktok => Some(&mut self.tiktok),
      Field::Age => Some(&mut self.age),
      Field::Country => Some(&mut self.country),
      Field::Why => Some(&mut self.why),
      Field::VideoLink => Some(&mut self.video_link),
      Field::Agree => None,
    }
  }

  /// Pure state update: consume the draft and return the next one.
  ///
  /// Text actions aimed at [`Field::Agree`] leave the draft unchanged.
  pub fn reduce(mut self, action: DraftAction) -> Self {
    match action {
      DraftAction::Set(field, value) => {
        if let Some(text) = self.text_mut(field) {
          *text = value;
        }
      }
      DraftAction::Push(field, c) => {
        if let Some(text) = self.text_mut(field) {
          text.push(c);
        }
      }
      DraftAction::Backspace(field) => {
        if let Some(text) = self.text_mut(field) {
          text.pop();
        }
      }
      DraftAction::SetAgree(agree) => self.agree = agree,
      DraftAction::ToggleAgree => self.agree = !self.agree,
      DraftAction::Reset => return Draft::default(),
    }
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn field_names_match_json_keys() {
    let names: Vec<String> = Field::all().map(|f| f.to_string()).collect();
    assert_eq!(
      names,
      ["fullname", "tiktok", "age", "country", "why", "videoLink", "agree"]
    );
    assert_eq!(
      serde_json::to_string(&Field::VideoLink).unwrap(),
      "\"videoLink\""
    );
  }

  #[test]
  fn keystrokes_build_up_text() {
    let draft = Draft::default()
      .reduce(DraftAction::Push(Field::Tiktok, '@'))
      .reduce(DraftAction::Push(Field::Tiktok, 'a'))
      .reduce(DraftAction::Push(Field::Tiktok, 'x'))
      .reduce(DraftAction::Backspace(Field::Tiktok));
    assert_eq!(draft.tiktok, "@a");
    assert_eq!(draft.fullname, "");
  }

  #[test]
  fn backspace_on_empty_field_is_noop() {
    let draft = Draft::default().reduce(DraftAction::Backspace(Field::Why));
    assert_eq!(draft, Draft::default());
  }

  #[test]
  fn text_actions_ignore_agree() {
    let draft = Draft::default()
      .reduce(DraftAction::Set(Field::Agree, "yes".into()))
      .reduce(DraftAction::Push(Field::Agree, 'y'));
    assert_eq!(draft, Draft::default());
    assert_eq!(draft.text(Field::Agree), None);
  }

  #[test]
  fn agree_toggles() {
    let draft = Draft::default().reduce(DraftAction::ToggleAgree);
    assert!(draft.agree);
    let draft = draft.reduce(DraftAction::ToggleAgree);
    assert!(!draft.agree);
    assert!(Draft::default().reduce(DraftAction::SetAgree(true)).agree);
  }

  #[test]
  fn reset_clears_everything() {
    let draft = Draft {
      fullname: "Ana".into(),
      agree: true,
      ..Draft::default()
    };
    assert_eq!(draft.reduce(DraftAction::Reset), Draft::default());
  }

  #[test]
  fn draft_serializes_with_form_keys() {
    let draft = Draft {
      video_link: "https://example.com".into(),
      ..Draft::default()
    };
    let json = serde_json::to_value(&draft).unwrap();
    assert_eq!(json["videoLink"], "https://example.com");
    assert_eq!(json["agree"], false);
    assert!(json.get("video_link").is_none());
  }
}
