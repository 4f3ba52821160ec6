//! Turning a recognition response into candidate ingredients.
//!
//! Three response shapes are accepted, checked in this order:
//! - `segmentation_results[].recognition_results[]` with `name`/`prob`
//! - `recognition_results[]` with `name`/`prob`
//! - `results[]` with `name`/`confidence`

use larder_core::config::RecognitionSettings;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::labels::map_label;

/// A detected ingredient. `confidence` is passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub name: String,
    pub confidence: f64,
}

/// Minimum confidence per response shape; an entry must be strictly above it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionThresholds {
    pub segmentation: f64,
    pub recognition: f64,
    pub results: f64,
}

impl Default for DetectionThresholds {
    fn default() -> Self { Self { segmentation: 0.15, recognition: 0.3, results: 0.3 } }
}

impl From<&RecognitionSettings> for DetectionThresholds {
    fn from(s: &RecognitionSettings) -> Self {
        Self { segmentation: s.segmentation_threshold, recognition: s.recognition_threshold, results: s.results_threshold }
    }
}

/// Extract detections from a raw response. Unrecognized or malformed input yields none.
///
/// Entries are read one at a time: a null or ill-typed segment or entry is
/// skipped without discarding the rest of the response.
pub fn extract_detections(response: &Value, thresholds: &DetectionThresholds) -> Vec<Detection> {
    if !response.is_object() {
        tracing::warn!(kind = json_kind(response), "malformed recognition response");
        return Vec::new();
    }

    let segments = array(response, "segmentation_results");
    let recognitions = array(response, "recognition_results");
    let detections: Vec<Detection> = if !segments.is_empty() {
        segments
            .iter()
            .flat_map(|segment| array(segment, "recognition_results").iter())
            .filter_map(|r| keep(r, "prob", thresholds.segmentation))
            .collect()
    } else if !recognitions.is_empty() {
        recognitions.iter().filter_map(|r| keep(r, "prob", thresholds.recognition)).collect()
    } else if let Some(results) = response.get("results").and_then(Value::as_array) {
        results.iter().filter_map(|r| keep(r, "confidence", thresholds.results)).collect()
    } else {
        tracing::warn!("recognition response has no known result shape");
        Vec::new()
    };

    if detections.is_empty() {
        tracing::info!("no ingredients detected");
    }
    detections
}

/// `value[key]` as a slice; missing, null or non-array is empty.
fn array<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value.get(key).and_then(Value::as_array).map(Vec::as_slice).unwrap_or(&[])
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn keep(entry: &Value, confidence_key: &str, threshold: f64) -> Option<Detection> {
    let label = entry.get("name").and_then(Value::as_str).filter(|n| !n.trim().is_empty())?;
    let confidence = entry.get(confidence_key).and_then(Value::as_f64).filter(|c| *c > threshold)?;
    let name = match map_label(label) {
        Some(mapped) => mapped.to_string(),
        None => label.trim().to_lowercase(),
    };
    tracing::debug!(label, %name, confidence, "detected");
    Some(Detection { name, confidence })
}
