//! Application state machine and event dispatcher.

use chrono::{DateTime, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use sourire_app::{
  admin::{ALL_COPIED_NOTICE, AdminPanel, EMPTY_PANEL_NOTICE},
  form::{DRAFT_COPIED_NOTICE, FormController, SUBMITTED_NOTICE, SubmitOutcome},
};
use sourire_core::{
  credential::CredentialCheck,
  draft::{DraftAction, Field},
  kv::KeyValueStore,
  ledger::Ledger,
  submission::Submission,
};
use sourire_export::{Clipboard, ExportSink, filename::DRAFT_FILENAME};

// ─── Screen ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
  /// The application form; keyboard goes to the focused field.
  Form,
  /// Typing the admin password.
  AdminLogin,
  /// The unlocked admin panel.
  Admin,
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App<S> {
  pub screen: Screen,

  pub form: FormController,

  /// The submission list, shared by the form and the admin panel.
  pub ledger: Ledger<S>,

  pub admin: AdminPanel<Box<dyn CredentialCheck>>,

  /// Form field that receives typed characters.
  pub focus: Field,

  /// Admin password as typed; never shown in clear.
  pub password: String,

  /// Cursor position within the admin submission list.
  pub list_cursor: usize,

  /// One-line notice shown in the status bar.
  pub status_msg: String,

  sink:      Box<dyn ExportSink>,
  clipboard: Box<dyn Clipboard>,
}

impl<S: KeyValueStore> App<S> {
  pub fn new(
    ledger: Ledger<S>,
    form: FormController,
    admin: AdminPanel<Box<dyn CredentialCheck>>,
    sink: Box<dyn ExportSink>,
    clipboard: Box<dyn Clipboard>,
  ) -> Self {
    Self {
      screen: Screen::Form,
      form,
      ledger,
      admin,
      focus: Field::Fullname,
      password: String::new(),
      list_cursor: 0,
      status_msg: String::new(),
      sink,
      clipboard,
    }
  }

  /// The submission under the admin cursor, if the panel is open.
  pub fn cursor_submission(&self) -> Option<&Submission> {
    self
      .admin
      .submissions(&self.ledger)
      .ok()
      .and_then(|list| list.get(self.list_cursor))
  }

  /// Advance timers. Called once per event-loop iteration.
  pub fn tick(&mut self, now: DateTime<Utc>) {
    if self.form.tick(now) && self.status_msg == SUBMITTED_NOTICE {
      self.status_msg.clear();
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub fn handle_key(&mut self, key: KeyEvent, now: DateTime<Utc>) -> bool {
    // AltGr arrives as Ctrl+Alt on Windows; those keys are text, not shortcuts.
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL)
      && !key.modifiers.contains(KeyModifiers::ALT);

    // Global: Ctrl-C / Ctrl-Q quit from anywhere.
    if ctrl && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')) {
      return false;
    }

    match self.screen {
      Screen::Form => self.handle_form_key(key, ctrl, now),
      Screen::AdminLogin => self.handle_login_key(key),
      Screen::Admin => self.handle_admin_key(key, now),
    }
    true
  }

  fn handle_form_key(&mut self, key: KeyEvent, ctrl: bool, now: DateTime<Utc>) {
    if ctrl {
      match key.code {
        KeyCode::Char('s') => self.submit(now),
        KeyCode::Char('y') => self.copy_draft(),
        KeyCode::Char('d') => self.download_draft(),
        KeyCode::Char('a') => self.open_admin(),
        _ => {}
      }
      return;
    }

    match key.code {
      KeyCode::Tab | KeyCode::Down => self.focus = next_field(self.focus),
      KeyCode::BackTab | KeyCode::Up => self.focus = prev_field(self.focus),
      KeyCode::Enter if self.focus == Field::Agree => {
        self.form.apply(DraftAction::ToggleAgree);
      }
      KeyCode::Enter => self.submit(now),
      KeyCode::Char(' ') if self.focus == Field::Agree => {
        self.form.apply(DraftAction::ToggleAgree);
      }
      KeyCode::Char(c) => self.form.apply(DraftAction::Push(self.focus, c)),
      KeyCode::Backspace => self.form.apply(DraftAction::Backspace(self.focus)),
      KeyCode::Esc => self.status_msg.clear(),
      _ => {}
    }
  }

  fn handle_login_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.password.clear();
        self.screen = Screen::Form;
      }
      KeyCode::Enter => {
        let attempt = std::mem::take(&mut self.password);
        match self.admin.unlock(&attempt) {
          Ok(()) => {
            self.screen = Screen::Admin;
            self.list_cursor = 0;
            self.status_msg.clear();
          }
          Err(e) => self.status_msg = e.to_string(),
        }
      }
      KeyCode::Backspace => {
        self.password.pop();
      }
      KeyCode::Char(c) => self.password.push(c),
      _ => {}
    }
  }

  fn handle_admin_key(&mut self, key: KeyEvent, now: DateTime<Utc>) {
    // A pending clear swallows the next key: `y` confirms, anything else
    // cancels.
    if self.admin.is_clear_pending() {
      if key.code == KeyCode::Char('y') {
        self.status_msg = match self.admin.confirm_clear(&mut self.ledger) {
          Ok(()) => "Toutes les candidatures ont été supprimées.".into(),
          Err(e) => e.to_string(),
        };
        self.list_cursor = 0;
      } else {
        self.admin.cancel_clear();
        self.status_msg = "Suppression annulée.".into();
      }
      return;
    }

    match key.code {
      KeyCode::Esc | KeyCode::Char('f') => self.screen = Screen::Form,

      KeyCode::Down | KeyCode::Char('j') => {
        if self.list_cursor + 1 < self.ledger.len() {
          self.list_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.list_cursor = self.list_cursor.saturating_sub(1);
      }

      KeyCode::Enter | KeyCode::Char('e') => self.export_selected(),
      KeyCode::Char('c') => {
        self.status_msg =
          match self.admin.export_csv(&self.ledger, self.sink.as_mut(), now.date_naive()) {
            Ok(name) => format!("Exporté : {name}"),
            Err(e) => e.to_string(),
          };
      }
      KeyCode::Char('y') => {
        self.status_msg =
          match self.admin.copy_all(&self.ledger, self.clipboard.as_mut()) {
            Ok(()) => ALL_COPIED_NOTICE.into(),
            Err(e) => e.to_string(),
          };
      }
      KeyCode::Char('D') => {
        self.status_msg = match self.admin.request_clear() {
          Ok(prompt) => format!("{prompt} [y/N]"),
          Err(e) => e.to_string(),
        };
      }
      KeyCode::Char('r') => {
        self.ledger.reload();
        self.list_cursor = 0;
        self.status_msg = format!("{} candidature(s) chargée(s).", self.ledger.len());
      }
      _ => {}
    }
  }

  // ── Actions ───────────────────────────────────────────────────────────────

  fn submit(&mut self, now: DateTime<Utc>) {
    match self.form.submit(&mut self.ledger, self.sink.as_mut(), now) {
      Ok(SubmitOutcome::Accepted { export_error: None, .. }) => {
        self.status_msg = SUBMITTED_NOTICE.into();
        self.focus = Field::Fullname;
      }
      Ok(SubmitOutcome::Accepted { export_error: Some(e), .. }) => {
        self.status_msg = format!("Candidature enregistrée, export impossible : {e}");
        self.focus = Field::Fullname;
      }
      Ok(SubmitOutcome::Rejected) => {
        if let Some((field, _)) = self.form.errors().iter().next() {
          self.focus = field;
        }
        self.status_msg = "Veuillez corriger les champs en rouge.".into();
      }
      Err(e) => self.status_msg = e.to_string(),
    }
  }

  fn copy_draft(&mut self) {
    self.status_msg = match self.form.copy_draft(self.clipboard.as_mut()) {
      Ok(()) => DRAFT_COPIED_NOTICE.into(),
      Err(e) => e.to_string(),
    };
  }

  fn download_draft(&mut self) {
    self.status_msg = match self.form.download_draft(self.sink.as_mut()) {
      Ok(()) => format!("Brouillon téléchargé : {DRAFT_FILENAME}"),
      Err(e) => e.to_string(),
    };
  }

  fn open_admin(&mut self) {
    self.status_msg.clear();
    self.screen = if self.admin.is_unlocked() {
      Screen::Admin
    } else {
      Screen::AdminLogin
    };
  }

  fn export_selected(&mut self) {
    let Some(id) = self.cursor_submission().map(|s| s.id) else {
      self.status_msg = EMPTY_PANEL_NOTICE.into();
      return;
    };
    self.status_msg = match self.admin.export_one(&self.ledger, id, self.sink.as_mut()) {
      Ok(name) => format!("Exporté : {name}"),
      Err(e) => e.to_string(),
    };
  }
}

// ─── Focus order ──────────────────────────────────────────────────────────────

fn next_field(field: Field) -> Field {
  let all: Vec<Field> = Field::all().collect();
  let i = all.iter().position(|f| *f == field).unwrap_or(0);
  all[(i + 1) % all.len()]
}

fn prev_field(field: Field) -> Field {
  let all: Vec<Field> = Field::all().collect();
  let i = all.iter().position(|f| *f == field).unwrap_or(0);
  all[(i + all.len() - 1) % all.len()]
}
