//! Quality metric validation.
//!
//! Clamps reported metrics to sane ranges and attaches an overall score.
//! Deterministic arithmetic; unrecognized metric keys are dropped.

use std::collections::BTreeMap;

/// Recognized metrics and their admissible ranges.
const METRIC_RANGES: [(&str, f64, f64); 3] = [
    ("moisture", 5.0, 20.0),
    ("protein", 20.0, 60.0),
    ("purity", 80.0, 100.0),
];

/// Key under which the overall score is attached. camelCase like every
/// other key in the metrics map on the wire.
pub const QUALITY_SCORE_KEY: &str = "qualityScore";

/// Clamp recognized metrics to their ranges and attach an overall
/// `qualityScore` equal to the rounded mean of the clamped values.
///
/// When no recognized metric is present the input is returned unchanged.
#[must_use]
pub fn validate_quality_metrics(metrics: &BTreeMap<String, f64>) -> BTreeMap<String, f64> {
    let mut validated = BTreeMap::new();

    for (key, min, max) in METRIC_RANGES {
        if let Some(value) = metrics.get(key) {
            validated.insert(key.to_string(), value.clamp(min, max));
        }
    }

    if validated.is_empty() {
        return metrics.clone();
    }

    let mean = validated.values().sum::<f64>() / validated.len() as f64;
    validated.insert(QUALITY_SCORE_KEY.to_string(), mean.round());
    validated
}
