use std::{ffi::OsStr, path::Path};

use anyhow::Context;
use fmmap::tokio::{AsyncMmapFile, AsyncMmapFileExt};

use crate::generator::schema::ApiDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
  #[default]
  Json,
  Yaml,
}

impl DocumentFormat {
  #[must_use]
  pub fn from_extension(ext: &str) -> Self {
    match ext.to_ascii_lowercase().as_str() {
      "yaml" | "yml" => Self::Yaml,
      _ => Self::Json,
    }
  }

  #[must_use]
  pub fn from_path(path: &Path) -> Self {
    path
      .extension()
      .and_then(OsStr::to_str)
      .map_or(Self::default(), Self::from_extension)
  }

  pub fn parse(self, bytes: &[u8]) -> anyhow::Result<ApiDocument> {
    match self {
      Self::Json => serde_json::from_slice(bytes).context("invalid JSON document"),
      Self::Yaml => serde_yaml::from_slice(bytes).context("invalid YAML document"),
    }
  }
}

/// Memory-mapped schema document, parsed on demand.
pub struct DocumentLoader {
  file: AsyncMmapFile,
  format: DocumentFormat,
}

impl DocumentLoader {
  pub async fn open(path: &Path) -> anyhow::Result<Self> {
    let format = DocumentFormat::from_path(path);
    let file = AsyncMmapFile::open(path)
      .await
      .with_context(|| format!("failed to open {}", path.display()))?;

    Ok(Self { file, format })
  }

  pub fn format(&self) -> DocumentFormat {
    self.format
  }

  pub fn parse(&self) -> anyhow::Result<ApiDocument> {
    self.format.parse(self.file.as_slice())
  }
}

pub async fn load_document(path: &Path) -> anyhow::Result<ApiDocument> {
  DocumentLoader::open(path)
    .await?
    .parse()
    .with_context(|| format!("failed to parse {}", path.display()))
}
