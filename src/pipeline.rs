use crate::{
    config::Config,
    engine::Extractor,
    report::{DocumentReport, Summary},
    source,
    util::{ensure_dir, now_rfc3339, report_paths, sha256_hex},
};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, warn};

pub struct Pipeline {
    cfg: Config,
    extractor: Extractor,
}

pub struct DocumentOutcome {
    pub input: PathBuf,
    pub result: Result<DocumentReport>,
}

impl Pipeline {
    pub fn new(cfg: &Config, extractor: Extractor) -> Self {
        Self {
            cfg: cfg.clone(),
            extractor,
        }
    }

    pub fn extractor(&self) -> &Extractor {
        &self.extractor
    }

    pub fn run_document(&self, input: &Path) -> Result<DocumentReport> {
        let started_at = Instant::now();
        let started = now_rfc3339();

        let loaded = source::load_document(&self.cfg, input)?;
        let extraction = self.extractor.extract(&loaded.input);

        info!(
            "document {} found={}/{} elapsed_ms={}",
            input.display(),
            extraction.found(),
            self.extractor.registry().len(),
            started_at.elapsed().as_millis()
        );

        Ok(DocumentReport {
            input: input.display().to_string(),
            sha256: sha256_hex(&loaded.bytes),
            started,
            finished: now_rfc3339(),
            pages: loaded.input.tables.len(),
            text_chars: loaded.input.text.chars().count(),
            found: extraction.found(),
            total: self.extractor.registry().len(),
            results: extraction.results,
            trace: extraction.trace,
        })
    }

    /// Extract every input, at most `limits.max_parallel_documents` at a time.
    /// Outcomes come back in input order; one failure does not stop the rest.
    pub fn run_all(&self, inputs: &[PathBuf]) -> Result<Vec<DocumentOutcome>> {
        let workers = self.cfg.limits.max_parallel_documents.max(1);
        debug!(workers, documents = inputs.len(), "batch extraction");

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()
            .with_context(|| "building document worker pool")?;

        Ok(pool.install(|| {
            inputs
                .par_iter()
                .map(|p| DocumentOutcome {
                    input: p.clone(),
                    result: self.run_document(p),
                })
                .collect()
        }))
    }

    /// Extract `inputs`, write one report per document when `out_dir` is set
    /// and collect summaries. Failed extractions and failed report writes are
    /// logged and counted; they never stop later documents.
    pub fn run_batch(&self, inputs: &[PathBuf], out_dir: Option<&Path>) -> Result<BatchOutcome> {
        let outcomes = self.run_all(inputs)?;
        let paths = match out_dir {
            Some(dir) if self.cfg.output.write_report_json => {
                Some(report_paths(dir, inputs, &self.cfg.output.report_suffix))
            }
            _ => None,
        };

        let mut batch = BatchOutcome::default();
        for (i, outcome) in outcomes.into_iter().enumerate() {
            let report = match outcome.result {
                Ok(r) => r,
                Err(err) => {
                    error!("{}: {:#}", outcome.input.display(), err);
                    batch.failed += 1;
                    continue;
                }
            };

            if let Some(paths) = &paths {
                if let Err(err) = self.write_report(&paths[i], &report) {
                    error!("{}: {:#}", outcome.input.display(), err);
                    batch.failed += 1;
                    continue;
                }
                info!("report {}", paths[i].display());
            }

            batch.summaries.push(report.summary());
        }
        Ok(batch)
    }

    pub fn write_report(&self, path: &Path, report: &DocumentReport) -> Result<()> {
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        let raw = if self.cfg.output.pretty_json {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        std::fs::write(path, raw).with_context(|| format!("writing report {}", path.display()))?;
        if report.found == 0 {
            warn!("no parameters found in {}", report.input);
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub summaries: Vec<Summary>,
    pub failed: usize,
}
