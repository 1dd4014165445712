//! Application form pane — left panel.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Wrap},
};
use sourire_app::form::SUBMITTED_NOTICE;
use sourire_core::{draft::Field, kv::KeyValueStore};

use crate::app::{App, Screen};

/// Render the form into `area`.
pub fn draw<S: KeyValueStore>(f: &mut Frame, area: Rect, app: &App<S>) {
  let focused_form = app.screen == Screen::Form;

  let block = Block::default()
    .title(" Formulaire de candidature ")
    .borders(Borders::ALL)
    .border_style(if focused_form {
      Style::default().fg(Color::Indexed(99))
    } else {
      Style::default().fg(Color::DarkGray)
    });

  let draft = app.form.draft();
  let errors = app.form.errors();

  let mut lines: Vec<Line> = vec![
    Line::from(Span::styled(
      "Remplis honnêtement — on regardera toutes les candidatures.",
      Style::default().fg(Color::DarkGray),
    )),
    Line::from(""),
  ];

  for field in Field::all() {
    let focused = focused_form && app.focus == field;
    let marker = if focused { "▸ " } else { "  " };

    if let Some(value) = draft.text(field) {
      lines.push(Line::from(vec![
        Span::raw(marker),
        Span::styled(
          field.label(),
          Style::default().add_modifier(Modifier::BOLD),
        ),
      ]));

      let mut input = vec![Span::raw("  ")];
      if value.is_empty() && !focused {
        input.push(Span::styled(
          field.placeholder().unwrap_or(""),
          Style::default().fg(Color::DarkGray),
        ));
      } else {
        input.push(Span::raw(value.to_string()));
      }
      if focused {
        input.push(Span::styled("_", Style::default().fg(Color::Yellow)));
      }
      lines.push(Line::from(input));
    } else {
      let checkbox = if draft.agree { "[x] " } else { "[ ] " };
      lines.push(Line::from(vec![
        Span::raw(marker),
        Span::styled(checkbox, Style::default().fg(Color::Cyan)),
        Span::raw(field.label()),
      ]));
    }

    if let Some(message) = errors.get(field) {
      lines.push(Line::from(Span::styled(
        format!("  {message}"),
        Style::default().fg(Color::Red),
      )));
    }
  }

  if app.form.is_submitted() {
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
      SUBMITTED_NOTICE,
      Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    )));
  }

  f.render_widget(
    Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
    area,
  );
}
