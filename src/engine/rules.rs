//! Turns a parameter's labels into the ordered regex cascade the text
//! matcher walks.

use crate::registry::ParameterDefinition;
use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Explicit,
    Available,
    Labeled,
    Spaced,
    Qualifier,
}

#[derive(Debug, Clone)]
pub struct MatchRule {
    pub id: String,
    pub kind: RuleKind,
    pub regex: Regex,
}

impl MatchRule {
    fn new(id: String, kind: RuleKind, pattern: &str) -> Result<Self> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .with_context(|| format!("compiling rule {id}: {pattern}"))?;
        Ok(Self { id, kind, regex })
    }
}

const NUMERAL: &str = r"(\d+\.?\d*)";

/// Parameter-specific rules in priority order: explicit patterns, then the
/// `available <label>`, `<label>:` and `<label> <n> ` forms over every label.
pub fn compile_rules(def: &ParameterDefinition) -> Result<Vec<MatchRule>> {
    let labels: Vec<String> = def.labels().iter().map(|l| regex::escape(l)).collect();
    let mut rules = Vec::with_capacity(def.patterns.len() + labels.len() * 3);

    for (i, p) in def.patterns.iter().enumerate() {
        let rule = MatchRule::new(format!("explicit#{i}"), RuleKind::Explicit, p)
            .with_context(|| format!("parameter {}", def.name))?;
        rules.push(rule);
    }

    let forms: [(RuleKind, &str, fn(&str) -> String); 3] = [
        (RuleKind::Available, "available", |l| {
            format!(r"available\s+{l}[\s:\(\)]*[:\s\-,]*?{NUMERAL}")
        }),
        (RuleKind::Labeled, "labeled", |l| {
            format!(r"{l}[\s:\(\)]*[:\s\-,]*?{NUMERAL}")
        }),
        (RuleKind::Spaced, "spaced", |l| format!(r"{l}\s+{NUMERAL}\s")),
    ];

    for (kind, prefix, build) in forms {
        for (label, escaped) in def.labels().iter().zip(&labels) {
            rules.push(MatchRule::new(
                format!("{prefix}:{label}"),
                kind,
                &build(escaped),
            )?);
        }
    }

    Ok(rules)
}

/// The parameter-agnostic `<n> low|medium|high...` rule. Only the numeral
/// is kept.
pub fn qualifier_rule(words: &[String]) -> Result<Option<MatchRule>> {
    let alternation = words
        .iter()
        .map(|w| w.trim())
        .filter(|w| !w.is_empty())
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join("|");
    if alternation.is_empty() {
        return Ok(None);
    }
    let pattern = format!(r"{NUMERAL}\s+({alternation})");
    MatchRule::new("qualifier".into(), RuleKind::Qualifier, &pattern).map(Some)
}
