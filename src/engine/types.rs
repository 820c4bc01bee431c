use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One page's table: rows of trimmed cell strings.
pub type Table = Vec<Vec<String>>;

/// What the ingestion side hands over for one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentInput {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub tables: Vec<Table>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    TableCell,
    FreeTextPattern,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionCandidate {
    pub value: f64,
    pub source: SourceKind,
    /// Rule id or `page:row:col` location that produced the value.
    pub origin: String,
    /// Raw text the rule matched, or the cell the value came from.
    pub matched: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterResult {
    pub value: f64,
    pub unit: String,
    pub confidence: Confidence,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum ResolutionMethod {
    InRange,
    Corrected { from: f64 },
    /// Closest-to-midpoint guess. Most error-prone path.
    Midpoint,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub result: ParameterResult,
    #[serde(flatten)]
    pub method: ResolutionMethod,
    /// Index into the candidate list the value came from.
    pub candidate: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterTrace {
    pub parameter: String,
    pub candidates: Vec<ExtractionCandidate>,
    pub resolution: Option<Resolution>,
}

/// Output of one extraction pass. Absent parameters are simply missing
/// from `results`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Extraction {
    pub results: BTreeMap<String, ParameterResult>,
    pub trace: Vec<ParameterTrace>,
}

impl Extraction {
    pub fn get(&self, name: &str) -> Option<&ParameterResult> {
        self.results.get(name)
    }

    pub fn found(&self) -> usize {
        self.results.len()
    }
}
