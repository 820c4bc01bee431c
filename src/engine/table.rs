//! Candidate extraction from a page's table.
//!
//! A labelled row whose value lies in the table's dominant numeric column is
//! a much stronger signal than any free-text regex, so everything produced
//! here is preferred by the resolver simply by coming first.

use super::types::{ExtractionCandidate, SourceKind};
use crate::registry::Registry;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

static NUMERIC_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.\d+|\d+").expect("valid regex"));

pub struct TableScan<'a> {
    pub registry: &'a Registry,
    /// Lower-case keywords marking header rows by their first cell.
    pub header_keywords: &'a [String],
    pub scan_next_column: bool,
    pub alias_labels: bool,
}

/// Column holding the most numeric cells. Earliest column wins a tie.
/// `None` for a table without any numerals.
pub fn detect_value_column(rows: &[Vec<String>]) -> Option<usize> {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut best: Option<(usize, usize)> = None;

    for col in 0..width {
        let count = rows
            .iter()
            .filter(|r| r.get(col).is_some_and(|c| NUMERIC_TOKEN.is_match(c)))
            .count();
        if count > 0 && best.is_none_or(|(_, n)| count > n) {
            best = Some((col, count));
        }
    }

    best.map(|(col, _)| col)
}

/// Numeric tokens in a cell, in reading order.
pub fn numeric_tokens(cell: &str) -> Vec<f64> {
    NUMERIC_TOKEN
        .find_iter(cell)
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .collect()
}

/// True when `needle` occurs in `haystack` bounded by non-alphanumerics or
/// the string edges.
fn contains_token(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    haystack.match_indices(needle).any(|(i, _)| {
        let before = haystack[..i].chars().next_back();
        let after = haystack[i + needle.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

/// Short names like `ph`, `k` or `ec` must stand alone; longer names are
/// matched as plain substrings so labels with lost spaces
/// (`availablepotassium(k)`) still map.
fn label_contains(label: &str, name: &str) -> bool {
    if name.chars().count() <= 2 {
        contains_token(label, name)
    } else {
        !name.is_empty() && label.contains(name)
    }
}

impl TableScan<'_> {
    fn is_header(&self, label: &str) -> bool {
        self.header_keywords
            .iter()
            .any(|k| !k.is_empty() && label.contains(k.as_str()))
    }

    /// Registry index of the parameter a row label names. Canonical names are
    /// tried across the whole catalogue before any alias.
    pub fn match_label(&self, label: &str) -> Option<usize> {
        let label = label.to_lowercase();
        let by_name = self
            .registry
            .iter()
            .position(|p| label_contains(&label, &p.name.to_lowercase()));
        if by_name.is_some() || !self.alias_labels {
            return by_name;
        }
        self.registry.iter().position(|p| {
            p.aliases
                .iter()
                .any(|a| label_contains(&label, &a.trim().to_lowercase()))
        })
    }

    /// Candidates from one table, paired with the registry index they belong
    /// to, in row order.
    pub fn scan(&self, page: usize, rows: &[Vec<String>]) -> Vec<(usize, ExtractionCandidate)> {
        let mut out = Vec::new();
        let Some(value_col) = detect_value_column(rows) else {
            if !rows.is_empty() {
                warn!(page, rows = rows.len(), "table has no numeric column");
            }
            return out;
        };
        debug!(page, value_col, rows = rows.len(), "value column");

        let value_cols = if self.scan_next_column {
            vec![value_col, value_col + 1]
        } else {
            vec![value_col]
        };

        for (row_idx, row) in rows.iter().enumerate() {
            let Some(first) = row.first() else { continue };
            if row.iter().all(|c| c.trim().is_empty()) {
                continue;
            }
            let label = first.to_lowercase();
            if self.is_header(&label) {
                continue;
            }
            let Some(param) = self.match_label(&label) else {
                continue;
            };

            for &col in &value_cols {
                let Some(cell) = row.get(col) else { continue };
                for value in numeric_tokens(cell) {
                    out.push((
                        param,
                        ExtractionCandidate {
                            value,
                            source: SourceKind::TableCell,
                            origin: format!("page{page}:row{row_idx}:col{col}"),
                            matched: cell.clone(),
                        },
                    ));
                }
            }
        }

        if out.is_empty() && !rows.is_empty() {
            warn!(page, value_col, rows = rows.len(), "table yielded no candidates");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_boundaries() {
        assert!(contains_token("available potassium (k)", "k"));
        assert!(!contains_token("phosphorus", "ph"));
        assert!(contains_token("soil ph", "ph"));
        assert!(!contains_token("anything", ""));
    }

    #[test]
    fn long_names_match_without_spaces() {
        assert!(label_contains("availablepotassium(k)", "potassium"));
        assert!(!label_contains("phosphorus", "ph"));
        assert!(label_contains("soil ph", "ph"));
    }

    #[test]
    fn numeric_tokens_split_ranges() {
        assert_eq!(numeric_tokens("0.5-1.0"), vec![0.5, 1.0]);
        assert!(numeric_tokens("High").is_empty());
    }
}
