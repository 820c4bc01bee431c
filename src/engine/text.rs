use super::rules::MatchRule;
use super::types::{ExtractionCandidate, SourceKind};
use std::collections::HashSet;
use tracing::trace;

/// Run every rule over `text` and collect all candidates in rule order.
///
/// Nothing short-circuits: the resolver needs the whole pool. A `(rule,
/// numeral)` pair is only recorded once, so a label repeated across the
/// document does not weigh twice. Unparseable numerals are dropped.
pub fn match_text<'a>(
    text: &str,
    rules: impl IntoIterator<Item = &'a MatchRule>,
) -> Vec<ExtractionCandidate> {
    let mut seen: HashSet<(&str, String)> = HashSet::new();
    let mut out = Vec::new();

    for rule in rules {
        for caps in rule.regex.captures_iter(text) {
            let Some(raw) = caps.get(1) else { continue };
            let cleaned: String = raw
                .as_str()
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.')
                .collect();
            if cleaned.is_empty() || !seen.insert((rule.id.as_str(), cleaned.clone())) {
                continue;
            }
            let Ok(value) = cleaned.parse::<f64>() else {
                continue;
            };
            let matched = caps.get(0).map(|m| m.as_str()).unwrap_or_default();
            trace!(rule = %rule.id, value, matched, "text candidate");
            out.push(ExtractionCandidate {
                value,
                source: SourceKind::FreeTextPattern,
                origin: rule.id.clone(),
                matched: matched.to_string(),
            });
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::rules::{compile_rules, qualifier_rule};
    use crate::registry::Registry;

    #[test]
    fn repeated_label_counted_once_per_rule() {
        let def = Registry::builtin().get("Boron").unwrap();
        let rules = compile_rules(def).unwrap();
        let c = match_text("boron: 0.6 ... boron: 0.6", &rules);
        let explicit = c.iter().filter(|c| c.origin == "explicit#0").count();
        assert_eq!(explicit, 1);
    }

    #[test]
    fn qualifier_keeps_only_numeral() {
        let q = qualifier_rule(&["low".to_string()]).unwrap().unwrap();
        let c = match_text("value 12.5 low", [&q]);
        assert_eq!(c.len(), 1);
        assert_eq!(c[0].value, 12.5);
        assert_eq!(c[0].matched, "12.5 low");
    }
}
