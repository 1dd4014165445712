//! Admin views: the side panel with the password prompt, and the full
//! submission list once unlocked.

use chrono::Local;
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span, Text},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use sourire_app::admin::EMPTY_PANEL_NOTICE;
use sourire_core::{kv::KeyValueStore, submission::Submission};

use crate::app::{App, Screen};

// ─── Aside ────────────────────────────────────────────────────────────────────

/// About text plus the admin password prompt — right panel of the form.
pub fn draw_aside<S: KeyValueStore>(f: &mut Frame, area: Rect, app: &App<S>) {
  let login = app.screen == Screen::AdminLogin;
  let dim = Style::default().fg(Color::DarkGray);

  let mut lines = vec![
    Line::from(Span::styled(
      "À propos du team",
      Style::default().add_modifier(Modifier::BOLD),
    )),
    Line::from(
      "Les Héros du Sourire cherchent des créateurs bienveillants, créatifs et \
       motivés pour rejoindre des projets TikTok collaboratifs axés sur la \
       bonne humeur.",
    ),
    Line::from(""),
    Line::from("• Contenus positifs et familiaux"),
    Line::from("• Collaboration régulière (challenges, duets)"),
    Line::from("• Respect du code de conduite du team"),
    Line::from(""),
    Line::from(Span::styled(
      "Admin — mot de passe",
      Style::default().add_modifier(Modifier::BOLD),
    )),
  ];

  if login {
    lines.push(Line::from(vec![
      Span::raw("  "),
      Span::raw("•".repeat(app.password.chars().count())),
      Span::styled("_", Style::default().fg(Color::Yellow)),
    ]));
  } else if app.admin.is_unlocked() {
    lines.push(Line::from(Span::styled(
      "  Panel ouvert — ^A pour y revenir.",
      Style::default().fg(Color::Green),
    )));
  } else {
    lines.push(Line::from(Span::styled("  ^A pour saisir le mot de passe.", dim)));
  }

  let block = Block::default()
    .title(" Les Héros du Sourire ")
    .borders(Borders::ALL)
    .border_style(if login {
      Style::default().fg(Color::Indexed(99))
    } else {
      dim
    });

  f.render_widget(
    Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
    area,
  );
}

// ─── Panel ────────────────────────────────────────────────────────────────────

/// Render the unlocked panel: every submission, newest first.
pub fn draw_panel<S: KeyValueStore>(f: &mut Frame, area: Rect, app: &App<S>) {
  let block = Block::default()
    .title(format!(" {} ", app.admin.title(&app.ledger)))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Indexed(99)));

  let list = app.admin.submissions(&app.ledger).unwrap_or_default();
  if list.is_empty() {
    f.render_widget(
      Paragraph::new(EMPTY_PANEL_NOTICE)
        .style(Style::default().fg(Color::DarkGray))
        .block(block),
      area,
    );
    return;
  }

  let width = block.inner(area).width.saturating_sub(2) as usize;
  let items: Vec<ListItem> = list.iter().map(|s| item(s, width)).collect();

  let mut state = ListState::default();
  state.select(Some(app.list_cursor.min(list.len() - 1)));

  f.render_stateful_widget(
    List::new(items)
      .block(block)
      .highlight_style(Style::default().bg(Color::Indexed(236)))
      .highlight_symbol("▌ "),
    area,
    &mut state,
  );
}

fn item(s: &Submission, width: usize) -> ListItem<'static> {
  let dim = Style::default().fg(Color::DarkGray);
  let when = s
    .submitted_at
    .with_timezone(&Local)
    .format("%d/%m/%Y %H:%M:%S");

  let mut lines = vec![
    Line::from(vec![
      Span::styled(
        s.fullname.clone(),
        Style::default().add_modifier(Modifier::BOLD),
      ),
      Span::raw(" — "),
      Span::styled(s.tiktok.clone(), Style::default().fg(Color::Cyan)),
    ]),
    Line::from(Span::styled(
      format!("{} • {} ans — {when}", s.country, s.age),
      dim,
    )),
  ];
  lines.extend(wrap(&s.why, width).into_iter().map(Line::from));
  if !s.video_link.is_empty() {
    lines.push(Line::from(Span::styled(
      format!("Voir la vidéo : {}", s.video_link),
      Style::default()
        .fg(Color::Blue)
        .add_modifier(Modifier::UNDERLINED),
    )));
  }
  lines.push(Line::from(""));

  ListItem::new(Text::from(lines))
}

/// Greedy word wrap; list items do not wrap on their own.
fn wrap(text: &str, width: usize) -> Vec<String> {
  let width = width.max(10);
  let mut out = Vec::new();
  for paragraph in text.lines() {
    let mut line = String::new();
    for word in paragraph.split_whitespace() {
      let needed = line.chars().count() + usize::from(!line.is_empty()) + word.chars().count();
      if needed > width && !line.is_empty() {
        out.push(std::mem::take(&mut line));
      }
      if !line.is_empty() {
        line.push(' ');
      }
      line.push_str(word);
    }
    out.push(line);
  }
  out
}
