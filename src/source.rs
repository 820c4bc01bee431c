//! Loading the pre-extracted documents the ingestion side produces.
//!
//! `.json` carries page text plus per-page tables; `.txt` is a bare OCR or
//! text-layer transcription with no table structure.

use crate::{config::Config, engine::DocumentInput};
use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Deserialize)]
struct DocumentFile {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    tables: Vec<Vec<Vec<Option<String>>>>,
}

impl From<DocumentFile> for DocumentInput {
    fn from(f: DocumentFile) -> Self {
        let tables = f
            .tables
            .into_iter()
            .map(|table| {
                table
                    .into_iter()
                    .map(|row| {
                        row.into_iter()
                            .map(|c| c.map(|s| s.trim().to_string()).unwrap_or_default())
                            .collect::<Vec<_>>()
                    })
                    .filter(|row| row.iter().any(|c| !c.is_empty()))
                    .collect::<Vec<_>>()
            })
            .collect();
        DocumentInput {
            text: f.text.unwrap_or_default(),
            tables,
        }
    }
}

pub struct LoadedDocument {
    pub input: DocumentInput,
    pub bytes: Vec<u8>,
}

pub fn parse_document_json(raw: &[u8]) -> Result<DocumentInput> {
    let file: DocumentFile = serde_json::from_slice(raw).with_context(|| "parsing document JSON")?;
    Ok(file.into())
}

pub fn load_document(cfg: &Config, path: &Path) -> Result<LoadedDocument> {
    validate_input(cfg, path)?;

    let meta = std::fs::metadata(path).with_context(|| format!("stat {}", path.display()))?;
    if meta.len() > cfg.limits.max_input_file_bytes {
        bail!(
            "input exceeds max_input_file_bytes ({} > {}): {}",
            meta.len(),
            cfg.limits.max_input_file_bytes,
            path.display()
        );
    }

    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
        .unwrap_or_default();

    let input = match ext.as_str() {
        "json" => parse_document_json(&bytes)
            .with_context(|| format!("document: {}", path.display()))?,
        "txt" => DocumentInput {
            text: String::from_utf8_lossy(&bytes).into_owned(),
            tables: Vec::new(),
        },
        other => bail!("unsupported input format {other:?}: {}", path.display()),
    };

    if input.text.trim().is_empty() && input.tables.is_empty() {
        warn!("document carries no text and no tables: {}", path.display());
    }

    Ok(LoadedDocument { input, bytes })
}

fn validate_input(cfg: &Config, input: &Path) -> Result<()> {
    let input_str = input.display().to_string();

    if cfg.security.reject_url_inputs && looks_like_url(&input_str) {
        return Err(anyhow!("URL inputs are disabled: {input_str}"));
    }

    if !input.exists() {
        return Err(anyhow!("input does not exist: {}", input.display()));
    }

    Ok(())
}

fn looks_like_url(s: &str) -> bool {
    let s = s.to_ascii_lowercase();
    s.starts_with("http://") || s.starts_with("https://") || s.starts_with("file://")
}
