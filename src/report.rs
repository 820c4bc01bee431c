use crate::engine::{ParameterResult, ParameterTrace};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentReport {
    pub input: String,
    pub sha256: String,
    pub started: String,
    pub finished: String,
    pub pages: usize,
    pub text_chars: usize,
    pub found: usize,
    pub total: usize,
    pub results: BTreeMap<String, ParameterResult>,
    pub trace: Vec<ParameterTrace>,
}

/// Compact form printed to stdout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub input: String,
    pub found: usize,
    pub total: usize,
    pub results: BTreeMap<String, ParameterResult>,
}

impl DocumentReport {
    pub fn summary(&self) -> Summary {
        Summary {
            input: self.input.clone(),
            found: self.found,
            total: self.total,
            results: self.results.clone(),
        }
    }
}
