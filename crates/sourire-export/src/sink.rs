//! Where artifacts and clipboard payloads go.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::{Artifact, Result};

/// Receives a finished artifact — the "download" step.
pub trait ExportSink {
  fn deliver(&mut self, artifact: &Artifact) -> Result<()>;
}

/// Receives compact JSON text destined for the system clipboard.
pub trait Clipboard {
  fn set_text(&mut self, text: &str) -> Result<()>;
}

// ─── Directory ───────────────────────────────────────────────────────────────

/// Writes each artifact into a directory, replacing any file of the same name.
#[derive(Debug, Clone)]
pub struct DirectorySink {
  dir: PathBuf,
}

impl DirectorySink {
  pub fn new(dir: impl Into<PathBuf>) -> Self { Self { dir: dir.into() } }

  pub fn dir(&self) -> &Path { &self.dir }

  /// Where `artifact` lands once delivered.
  pub fn path_for(&self, artifact: &Artifact) -> PathBuf {
    self.dir.join(&artifact.filename)
  }
}

impl ExportSink for DirectorySink {
  fn deliver(&mut self, artifact: &Artifact) -> Result<()> {
    std::fs::create_dir_all(&self.dir)?;
    let path = self.path_for(artifact);
    std::fs::write(&path, artifact.contents.as_bytes())?;
    info!(path = %path.display(), bytes = artifact.contents.len(), "exported");
    Ok(())
  }
}

// ─── In-memory ───────────────────────────────────────────────────────────────

/// Keeps delivered artifacts in order, for tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
  pub delivered: Vec<Artifact>,
}

impl ExportSink for MemorySink {
  fn deliver(&mut self, artifact: &Artifact) -> Result<()> {
    self.delivered.push(artifact.clone());
    Ok(())
  }
}

/// Holds the last copied text.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
  pub contents: Option<String>,
}

impl Clipboard for MemoryClipboard {
  fn set_text(&mut self, text: &str) -> Result<()> {
    self.contents = Some(text.to_owned());
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::JSON_MEDIA_TYPE;

  fn artifact(name: &str, body: &str) -> Artifact {
    Artifact {
      filename:   name.into(),
      media_type: JSON_MEDIA_TYPE,
      contents:   body.into(),
    }
  }

  #[test]
  fn directory_sink_creates_dir_and_overwrites() {
    let tmp = tempfile::tempdir().unwrap();
    let mut sink = DirectorySink::new(tmp.path().join("exports"));

    sink.deliver(&artifact("a.json", "{}")).unwrap();
    sink.deliver(&artifact("a.json", "[]")).unwrap();

    let written = std::fs::read_to_string(tmp.path().join("exports/a.json")).unwrap();
    assert_eq!(written, "[]");
  }

  #[test]
  fn memory_sink_records_in_order() {
    let mut sink = MemorySink::default();
    sink.deliver(&artifact("1.json", "1")).unwrap();
    sink.deliver(&artifact("2.json", "2")).unwrap();
    let names: Vec<_> = sink.delivered.iter().map(|a| a.filename.as_str()).collect();
    assert_eq!(names, ["1.json", "2.json"]);
  }
}
