//! The credential-hiding proxy in front of the recognition service.
//!
//! The proxy accepts `{"image": "<base64 or data URL>"}`, forwards the decoded
//! bytes upstream with the server-side credential, and reshapes the upstream
//! answer into the single segmentation shape the client understands.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

const FAMILY_MIN_PROB: f64 = 0.5;
const INGREDIENT_MIN_PROB: f64 = 0.3;
const EMPTY_FAMILY: &str = "_empty_";

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Invalid image payload: {0}")]
    InvalidPayload(String),

    #[error("Daily request limit exceeded")]
    RateLimited { details: Value },

    #[error("Upstream error {status}: {body}")]
    Upstream { status: u16, body: Value },

    #[error("Missing credential: {0}")]
    MissingCredential(String),
}

impl ProxyError {
    /// HTTP status the proxy answers with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidPayload(_) => 400,
            Self::RateLimited { .. } => 429,
            Self::Upstream { status, .. } => *status,
            Self::MissingCredential(_) => 500,
        }
    }

    /// JSON body the proxy answers with.
    pub fn to_body(&self) -> Value {
        match self {
            Self::RateLimited { details } => json!({
                "error": "Daily request limit exceeded",
                "message": "Today's request limit has been reached. Please try again tomorrow.",
                "details": details,
            }),
            Self::Upstream { body, .. } => json!({ "error": body }),
            other => json!({ "error": "Internal Server Error", "details": other.to_string() }),
        }
    }
}

/// Body posted to the proxy by the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyRequest {
    #[serde(default)]
    pub image: String,
}

impl ProxyRequest {
    pub fn from_json(body: &str) -> Result<Self, ProxyError> {
        serde_json::from_str(body).map_err(|e| ProxyError::InvalidPayload(e.to_string()))
    }

    pub fn image_bytes(&self) -> Result<Vec<u8>, ProxyError> { decode_image_payload(&self.image) }
}

/// Strip an optional `data:image/<type>;base64,` prefix and decode.
pub fn decode_image_payload(payload: &str) -> Result<Vec<u8>, ProxyError> {
    let encoded = strip_data_url(payload.trim());
    if encoded.is_empty() {
        return Err(ProxyError::InvalidPayload("empty image".to_string()));
    }
    STANDARD.decode(encoded).map_err(|e| ProxyError::InvalidPayload(e.to_string()))
}

fn strip_data_url(payload: &str) -> &str {
    let Some(rest) = payload.strip_prefix("data:image/") else { return payload };
    let Some((kind, data)) = rest.split_once(";base64,") else { return payload };
    if !kind.is_empty() && kind.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        data
    } else {
        payload
    }
}

/// Map an upstream status and body to the reshaped response or a proxy error.
pub fn handle_upstream(status: u16, body: Value) -> Result<Value, ProxyError> {
    match status {
        200..=299 => Ok(reshape_upstream(&body)),
        429 => {
            tracing::warn!("recognition service rate limit reached");
            Err(ProxyError::RateLimited { details: body })
        }
        _ => {
            tracing::warn!(status, "recognition service returned an error");
            Err(ProxyError::Upstream { status, body })
        }
    }
}

/// Collapse an upstream answer into `segmentation_results[0].recognition_results[]`.
///
/// Food families above 0.5 (singularized by one trailing `s`) come first,
/// followed by segment recognitions above 0.3.
pub fn reshape_upstream(upstream: &Value) -> Value {
    let mut entries: Vec<Value> = Vec::new();

    for family in array(upstream, "foodFamily") {
        let (Some(name), Some(prob)) = (family.get("name").and_then(Value::as_str), family.get("prob").and_then(Value::as_f64)) else {
            continue;
        };
        if name.is_empty() || name == EMPTY_FAMILY || prob <= FAMILY_MIN_PROB {
            continue;
        }
        let singular = name.strip_suffix('s').unwrap_or(name);
        tracing::debug!(family = name, prob, "food family");
        entries.push(json!({ "name": singular, "prob": prob }));
    }

    for segment in array(upstream, "segmentation_results") {
        for recognition in array(segment, "recognition_results") {
            let (Some(name), Some(prob)) = (recognition.get("name").and_then(Value::as_str), recognition.get("prob").and_then(Value::as_f64)) else {
                continue;
            };
            if name.is_empty() || prob <= INGREDIENT_MIN_PROB {
                continue;
            }
            tracing::debug!(ingredient = name, prob, "segment recognition");
            entries.push(json!({ "name": name, "prob": prob }));
        }
    }

    json!({ "segmentation_results": [{ "recognition_results": entries }] })
}

fn array<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value.get(key).and_then(Value::as_array).map(Vec::as_slice).unwrap_or(&[])
}
