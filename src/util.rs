use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use time::format_description::well_known::Rfc3339;

pub fn ensure_dir(p: &Path) -> Result<()> {
    std::fs::create_dir_all(p).with_context(|| format!("create_dir_all {}", p.display()))
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut h = Sha256::new();
    h.update(bytes);
    format!("{:x}", h.finalize())
}

pub fn now_rfc3339() -> String {
    time::OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "1970-01-01T00:00:00Z".to_string())
}

/// One report path per input: `<out_dir>/<file name><suffix>`. The full
/// file name is kept so `card.json` and `card.txt` stay apart; repeats of the
/// same name from different directories get `-1`, `-2`, ...
pub fn report_paths(out_dir: &Path, inputs: &[PathBuf], suffix: &str) -> Vec<PathBuf> {
    let mut used: HashSet<String> = HashSet::new();
    inputs
        .iter()
        .map(|input| {
            let name = input
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("document");
            let mut candidate = format!("{name}{suffix}");
            let mut n = 1;
            while !used.insert(candidate.clone()) {
                candidate = format!("{name}-{n}{suffix}");
                n += 1;
            }
            out_dir.join(candidate)
        })
        .collect()
}
