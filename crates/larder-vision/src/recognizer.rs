use serde_json::Value;
use std::path::Path;

use crate::detections::{extract_detections, Detection, DetectionThresholds};

/// Anything that can turn image bytes into a raw recognition response.
pub trait Recognizer: Send + Sync {
    fn recognize(&self, image: &[u8]) -> anyhow::Result<Value>;
}

/// Replays a saved response regardless of the image.
#[derive(Debug, Clone)]
pub struct CannedRecognizer {
    response: Value,
}

impl CannedRecognizer {
    pub fn new(response: Value) -> Self { Self { response } }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::new(serde_json::from_str(&content)?))
    }
}

impl Recognizer for CannedRecognizer {
    fn recognize(&self, _image: &[u8]) -> anyhow::Result<Value> { Ok(self.response.clone()) }
}

pub fn detect<R: Recognizer + ?Sized>(recognizer: &R, image: &[u8], thresholds: &DetectionThresholds) -> anyhow::Result<Vec<Detection>> {
    let response = recognizer.recognize(image)?;
    Ok(extract_detections(&response, thresholds))
}
