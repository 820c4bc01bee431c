//! Settles one parameter's candidate pool on at most one value.
//!
//! Policy, in order:
//! 1. first in-range candidate (encounter order, so table values win) → high;
//! 2. non-strict: first candidate that lands in range after a single ÷10
//!    (when `max < v < 100·max`) or ×10 (when `0 < v < min`) → medium;
//! 3. non-strict: candidate closest to the range midpoint, unchanged → low;
//! 4. otherwise nothing.

use super::types::{
    Confidence, ExtractionCandidate, ParameterResult, Resolution, ResolutionMethod,
};
use crate::registry::ParameterDefinition;

pub fn resolve(def: &ParameterDefinition, candidates: &[ExtractionCandidate]) -> Option<Resolution> {
    let make = |value: f64, confidence, method, candidate| Resolution {
        result: ParameterResult {
            value,
            unit: def.unit.clone(),
            confidence,
        },
        method,
        candidate,
    };

    if let Some((i, c)) = candidates
        .iter()
        .enumerate()
        .find(|(_, c)| def.contains(c.value))
    {
        return Some(make(c.value, Confidence::High, ResolutionMethod::InRange, i));
    }

    if def.strict {
        return None;
    }

    for (i, c) in candidates.iter().enumerate() {
        if let Some(corrected) = decade_correction(def, c.value) {
            return Some(make(
                corrected,
                Confidence::Medium,
                ResolutionMethod::Corrected { from: c.value },
                i,
            ));
        }
    }

    // Guess-prone: several unrelated OCR artifacts near the midpoint can
    // produce a plausible but wrong value. Reported as low confidence.
    let midpoint = def.midpoint();
    candidates
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            (a.value - midpoint)
                .abs()
                .total_cmp(&(b.value - midpoint).abs())
        })
        .map(|(i, c)| make(c.value, Confidence::Low, ResolutionMethod::Midpoint, i))
}

/// Shift an out-of-range value by one decade when that lands it in range.
pub fn decade_correction(def: &ParameterDefinition, value: f64) -> Option<f64> {
    let corrected = if value > def.max && value < def.max * 100.0 {
        value / 10.0
    } else if value < def.min && value > 0.0 {
        value * 10.0
    } else {
        return None;
    };
    def.contains(corrected).then_some(corrected)
}
