pub mod resolve;
pub mod rules;
pub mod table;
pub mod text;
pub mod types;

use crate::{config::Extraction as ExtractionConfig, normalize, registry::Registry};
use anyhow::Result;
use rules::MatchRule;
use std::sync::Arc;
use table::TableScan;
use tracing::{debug, info};

pub use types::{
    Confidence, DocumentInput, Extraction, ExtractionCandidate, ParameterResult,
    ParameterTrace, Resolution, ResolutionMethod, SourceKind, Table,
};

/// Extraction engine for one registry. Holds only immutable, compiled state:
/// every call to [`Extractor::extract`] starts from an empty candidate pool,
/// and one instance can serve many threads.
pub struct Extractor {
    cfg: ExtractionConfig,
    registry: Arc<Registry>,
    /// Per-parameter cascades, aligned with registry order.
    rules: Vec<Vec<MatchRule>>,
    qualifier: Option<MatchRule>,
    header_keywords: Vec<String>,
}

impl Extractor {
    pub fn new(cfg: &ExtractionConfig, registry: Arc<Registry>) -> Result<Self> {
        let rules = registry
            .iter()
            .map(rules::compile_rules)
            .collect::<Result<Vec<_>>>()?;
        let qualifier = rules::qualifier_rule(&cfg.qualifier_words)?;
        let header_keywords = cfg
            .header_keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        debug!(
            parameters = registry.len(),
            rules = rules.iter().map(Vec::len).sum::<usize>(),
            "compiled extraction rules"
        );
        Ok(Self {
            cfg: cfg.clone(),
            registry,
            rules,
            qualifier,
            header_keywords,
        })
    }

    /// Engine over the built-in catalogue with default settings.
    pub fn with_defaults() -> Result<Self> {
        Self::new(
            &ExtractionConfig::default(),
            Arc::new(Registry::builtin().clone()),
        )
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn normalize(&self, text: &str) -> String {
        normalize::normalize_text(&self.cfg, text)
    }

    /// Table phase over every page, text fallback for parameters that are
    /// still empty, then one resolution per parameter.
    pub fn extract(&self, doc: &DocumentInput) -> Extraction {
        let mut pools: Vec<Vec<ExtractionCandidate>> = vec![Vec::new(); self.registry.len()];

        let scan = TableScan {
            registry: &self.registry,
            header_keywords: &self.header_keywords,
            scan_next_column: self.cfg.scan_next_column,
            alias_labels: self.cfg.alias_table_labels,
        };
        for (page, table) in doc.tables.iter().enumerate() {
            let rows: Vec<Vec<String>> = table
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|c| normalize::normalize_cell(&self.cfg, c))
                        .collect()
                })
                .collect();
            for (param, cand) in scan.scan(page, &rows) {
                pools[param].push(cand);
            }
        }

        if self.cfg.text_fallback && !doc.text.trim().is_empty() {
            let normalized = self.normalize(&doc.text);
            for (idx, pool) in pools.iter_mut().enumerate() {
                if !pool.is_empty() {
                    continue;
                }
                let cascade = self.rules[idx].iter().chain(self.qualifier.as_ref());
                pool.extend(text::match_text(&normalized, cascade));
            }
        }

        let mut out = Extraction::default();
        for (def, candidates) in self.registry.iter().zip(pools) {
            let resolution = resolve::resolve(def, &candidates);
            match &resolution {
                Some(r) => {
                    debug!(
                        parameter = %def.name,
                        value = r.result.value,
                        confidence = r.result.confidence.as_str(),
                        candidates = candidates.len(),
                        "resolved"
                    );
                    out.results.insert(def.name.clone(), r.result.clone());
                }
                None if !candidates.is_empty() => {
                    debug!(parameter = %def.name, candidates = candidates.len(), "no plausible value");
                }
                None => {}
            }
            out.trace.push(ParameterTrace {
                parameter: def.name.clone(),
                candidates,
                resolution,
            });
        }

        info!(
            found = out.found(),
            total = self.registry.len(),
            pages = doc.tables.len(),
            "extraction finished"
        );
        out
    }
}
