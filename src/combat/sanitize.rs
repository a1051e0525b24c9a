//! Numeric input sanitization
//!
//! Combat math must always produce a playable number. Invalid inputs are
//! replaced by documented fallbacks, and every replacement is recorded in a
//! caller-owned `Diagnostics` and logged.

use serde::{Deserialize, Serialize};

use super::constants::MAX_RATIO;

/// One replaced input value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Substitution {
    pub field: String,
    pub original: f64,
    pub replacement: f64,
}

/// Collected substitutions from one or more combat calculations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    substitutions: Vec<Substitution>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, field: &str, original: f64, replacement: f64) {
        tracing::warn!(
            "Invalid combat input {}={}; using {}",
            field,
            original,
            replacement
        );
        self.substitutions.push(Substitution {
            field: field.to_string(),
            original,
            replacement,
        });
    }

    pub fn substitutions(&self) -> &[Substitution] {
        &self.substitutions
    }

    /// Was the named field replaced at least once?
    pub fn replaced(&self, field: &str) -> bool {
        self.substitutions.iter().any(|s| s.field == field)
    }

    pub fn is_empty(&self) -> bool {
        self.substitutions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.substitutions.len()
    }

    /// Take over another channel's substitutions without logging them again
    pub fn absorb(&mut self, other: Diagnostics) {
        self.substitutions.extend(other.substitutions);
    }

    pub fn clear(&mut self) {
        self.substitutions.clear();
    }
}

/// Any finite value is accepted
pub fn finite_or(value: f64, fallback: f64, field: &str, diag: &mut Diagnostics) -> f64 {
    if value.is_finite() {
        value
    } else {
        diag.record(field, value, fallback);
        fallback
    }
}

/// Finite and >= 0
pub fn non_negative_or(value: f64, fallback: f64, field: &str, diag: &mut Diagnostics) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        diag.record(field, value, fallback);
        fallback
    }
}

/// Finite and > 0
pub fn positive_or(value: f64, fallback: f64, field: &str, diag: &mut Diagnostics) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        diag.record(field, value, fallback);
        fallback
    }
}

/// Clamp a computed ratio into [0, MAX_RATIO]; NaN becomes `neutral`
pub fn bounded_ratio(value: f64, neutral: f64, field: &str, diag: &mut Diagnostics) -> f64 {
    if value.is_nan() {
        diag.record(field, value, neutral);
        return neutral;
    }
    let clamped = value.clamp(0.0, MAX_RATIO);
    if clamped != value {
        diag.record(field, value, clamped);
    }
    clamped
}
