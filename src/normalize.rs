use crate::config::Extraction;
use unicode_normalization::{char::decompose_compatible, UnicodeNormalization};

const DASHES: &[char] = &[
    '\u{2010}', '\u{2011}', '\u{2012}', '\u{2013}', '\u{2014}', '\u{2015}', '\u{2212}',
];

/// Prepare document text for the pattern cascade.
///
/// Lower-cases, folds dash variants to `-`, turns comma decimal separators
/// into periods and collapses every whitespace run to a single space.
pub fn normalize_text(cfg: &Extraction, text: &str) -> String {
    let mut s = if cfg.normalize_unicode {
        fold_compatibility(text)
    } else {
        text.to_string()
    };

    s = s.to_lowercase();
    s = s
        .chars()
        .map(|ch| if DASHES.contains(&ch) { '-' } else { ch })
        .collect();
    s = s.replace(',', ".");
    collapse_whitespace(&s)
}

/// Compatibility folding (full-width forms, ligatures, odd spaces) that leaves
/// superscripts, subscripts and vulgar fractions alone: NFKC would turn
/// `10³` into `103` and `½` into `1⁄2`, both of which read as new numbers.
fn fold_compatibility(text: &str) -> String {
    let mut folded = String::with_capacity(text.len());
    for ch in text.chars() {
        if keeps_form(ch) {
            folded.push(ch);
        } else {
            decompose_compatible(ch, |d| folded.push(d));
        }
    }
    folded.nfc().collect()
}

fn keeps_form(ch: char) -> bool {
    matches!(
        ch,
        '\u{00B2}' | '\u{00B3}' | '\u{00B9}'
            | '\u{00BC}'..='\u{00BE}'
            | '\u{2070}'..='\u{209F}'
            | '\u{2150}'..='\u{215F}'
    )
}

/// Cell-level cleanup for table input. Keeps case (header detection
/// lower-cases on its own) and only touches separators.
pub fn normalize_cell(cfg: &Extraction, cell: &str) -> String {
    let trimmed = cell.trim();
    if !cfg.normalize_cells {
        return trimmed.to_string();
    }
    let s: String = trimmed
        .chars()
        .map(|ch| match ch {
            ',' => '.',
            c if DASHES.contains(&c) => '-',
            c => c,
        })
        .collect();
    collapse_whitespace(&s)
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
