//! Photo-based ingredient detection: label mapping, response parsing and the
//! credential-hiding proxy transform in front of the recognition service.

pub mod auth;
pub mod detections;
pub mod labels;
pub mod proxy;
pub mod recognizer;

pub use auth::{resolve_credentials, Credentials, UserToken};
pub use detections::{extract_detections, Detection, DetectionThresholds};
pub use labels::map_label;
pub use proxy::{decode_image_payload, handle_upstream, reshape_upstream, ProxyError, ProxyRequest};
pub use recognizer::{detect, CannedRecognizer, Recognizer};
