//! System clipboard through the terminal, using the OSC 52 escape sequence.
//!
//! Works over SSH and inside tmux (with `set-clipboard on`); terminals that
//! ignore OSC 52 silently drop the payload.

use std::io::Write;

use base64::{Engine as _, engine::general_purpose::STANDARD as B64};
use sourire_export::{Clipboard, Result};

pub struct Osc52Clipboard<W> {
  out: W,
}

impl<W: Write> Osc52Clipboard<W> {
  pub fn new(out: W) -> Self { Self { out } }
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
  fn set_text(&mut self, text: &str) -> Result<()> {
    write!(self.out, "\x1b]52;c;{}\x07", B64.encode(text))?;
    self.out.flush()?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn emits_base64_payload() {
    let mut clipboard = Osc52Clipboard::new(Vec::new());
    clipboard.set_text("{\"a\":1}").unwrap();
    assert_eq!(
      String::from_utf8(clipboard.out).unwrap(),
      "\x1b]52;c;eyJhIjoxfQ==\x07"
    );
  }
}
