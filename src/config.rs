use crate::registry::ParameterDefinition;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub extraction: Extraction,
    /// Replacement catalogue. Empty means the built-in one.
    #[serde(default)]
    pub parameters: Vec<ParameterDefinition>,
    #[serde(default)]
    pub limits: Limits,
    #[serde(default)]
    pub output: Output,
    #[serde(default)]
    pub logging: Logging,
    #[serde(default)]
    pub security: Security,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config: {}", path.display()))?;
        let cfg: Config = toml::from_str(&raw).with_context(|| "parsing TOML")?;
        Ok(cfg)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Extraction {
    pub header_keywords: Vec<String>,
    pub qualifier_words: Vec<String>,
    /// Fold compatibility forms (full-width, ligatures, odd spaces) before
    /// matching. Superscripts, subscripts and vulgar fractions are kept.
    pub normalize_unicode: bool,
    pub normalize_cells: bool,
    pub scan_next_column: bool,
    pub text_fallback: bool,
    pub alias_table_labels: bool,
}
impl Default for Extraction {
    fn default() -> Self {
        Self {
            header_keywords: ["parameter", "s.no", "name", "test"]
                .into_iter()
                .map(String::from)
                .collect(),
            qualifier_words: [
                "low",
                "medium",
                "high",
                "deficient",
                "sufficient",
                "marginal",
                "negligible",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            normalize_unicode: true,
            normalize_cells: true,
            scan_next_column: true,
            text_fallback: true,
            alias_table_labels: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    pub max_input_file_bytes: u64,
    pub max_parallel_documents: usize,
}
impl Default for Limits {
    fn default() -> Self {
        Self {
            max_input_file_bytes: 64 * 1024 * 1024,
            max_parallel_documents: 4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Output {
    pub write_report_json: bool,
    pub report_suffix: String,
    pub pretty_json: bool,
    pub print_summary: bool,
}
impl Default for Output {
    fn default() -> Self {
        Self {
            write_report_json: true,
            report_suffix: ".soil.json".into(),
            pretty_json: true,
            print_summary: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Logging {
    pub level: String,
    pub json: bool,
    pub write_to_file: bool,
    pub file_path: String,
}
impl Default for Logging {
    fn default() -> Self {
        Self {
            level: "info".into(),
            json: false,
            write_to_file: false,
            file_path: "".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Security {
    pub reject_url_inputs: bool,
}
impl Default for Security {
    fn default() -> Self {
        Self {
            reject_url_inputs: true,
        }
    }
}
