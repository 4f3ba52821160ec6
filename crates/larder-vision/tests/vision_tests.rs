use std::collections::HashMap;
use std::path::PathBuf;

use larder_core::config::{AuthMode, RecognitionSettings};
use larder_vision::{
    decode_image_payload, detect, extract_detections, handle_upstream, map_label, reshape_upstream, resolve_credentials, CannedRecognizer,
    DetectionThresholds, ProxyError, ProxyRequest, UserToken,
};
use serde_json::{json, Value};

fn responses_dir() -> PathBuf {
    // crates/larder-vision -> crates -> repo root
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).ancestors().nth(2).unwrap().join("data/responses")
}

fn names(detections: &[larder_vision::Detection]) -> Vec<&str> { detections.iter().map(|d| d.name.as_str()).collect() }

#[test]
fn label_mapping() {
    assert_eq!(map_label("tomatoes"), Some("tomato"));
    assert_eq!(map_label("Eggs"), Some("egg"));
    assert_eq!(map_label("unknown-food-xyz"), None);
}

#[test]
fn segmentation_shape_uses_low_threshold_and_maps_labels() {
    let response = json!({
        "segmentation_results": [
            {"recognition_results": [
                {"name": "Tomatoes", "prob": 0.8},
                {"name": "Basil", "prob": 0.2},
                {"name": "crumbs", "prob": 0.15},
                {"name": "", "prob": 0.9}
            ]}
        ]
    });
    let detections = extract_detections(&response, &DetectionThresholds::default());
    assert_eq!(names(&detections), vec!["tomato", "basil"]);
    assert_eq!(detections[0].confidence, 0.8);
}

#[test]
fn recognition_shape_needs_more_confidence() {
    let response = json!({
        "recognition_results": [
            {"name": "onions", "prob": 0.31},
            {"name": "Basil", "prob": 0.2}
        ]
    });
    let detections = extract_detections(&response, &DetectionThresholds::default());
    assert_eq!(names(&detections), vec!["onion"]);
}

#[test]
fn results_shape_reads_confidence() {
    let response = json!({
        "results": [
            {"name": "Pepper", "confidence": 0.9},
            {"name": "Saffron", "confidence": 0.3}
        ]
    });
    let detections = extract_detections(&response, &DetectionThresholds::default());
    assert_eq!(names(&detections), vec!["bell pepper"]);
}

#[test]
fn segmentation_takes_precedence_over_other_shapes() {
    let response = json!({
        "segmentation_results": [{"recognition_results": [{"name": "rice", "prob": 0.5}]}],
        "results": [{"name": "beef", "confidence": 0.9}]
    });
    assert_eq!(names(&extract_detections(&response, &DetectionThresholds::default())), vec!["rice"]);
}

#[test]
fn null_segment_does_not_void_the_rest() {
    let response = json!({
        "segmentation_results": [
            {"recognition_results": null},
            {"recognition_results": [{"name": "tomato", "prob": 0.9}, {"name": 7, "prob": 0.9}, null]}
        ]
    });
    assert_eq!(names(&extract_detections(&response, &DetectionThresholds::default())), vec!["tomato"]);
}

#[test]
fn null_segmentation_falls_through_to_results() {
    let response = json!({
        "segmentation_results": null,
        "recognition_results": null,
        "results": [{"name": "Corn", "confidence": 0.8}]
    });
    assert_eq!(names(&extract_detections(&response, &DetectionThresholds::default())), vec!["corn"]);
}

#[test]
fn unknown_or_malformed_responses_yield_nothing() {
    let thresholds = DetectionThresholds::default();
    assert!(extract_detections(&json!({"foo": 1}), &thresholds).is_empty());
    assert!(extract_detections(&json!([1, 2, 3]), &thresholds).is_empty());
    assert!(extract_detections(&Value::Null, &thresholds).is_empty());
    assert!(extract_detections(&json!({"results": "nope"}), &thresholds).is_empty());
}

#[test]
fn thresholds_follow_settings() {
    let settings = RecognitionSettings { segmentation_threshold: 0.9, ..RecognitionSettings::default() };
    let thresholds = DetectionThresholds::from(&settings);
    let response = json!({"segmentation_results": [{"recognition_results": [{"name": "rice", "prob": 0.5}]}]});
    assert!(extract_detections(&response, &thresholds).is_empty());
}

#[test]
fn proxy_reshapes_families_and_segments() {
    let upstream: Value = serde_json::from_str(&std::fs::read_to_string(responses_dir().join("upstream.json")).unwrap()).unwrap();
    let reshaped = reshape_upstream(&upstream);
    let entries = reshaped["segmentation_results"][0]["recognition_results"].as_array().unwrap();
    let got: Vec<(&str, f64)> = entries.iter().map(|e| (e["name"].as_str().unwrap(), e["prob"].as_f64().unwrap())).collect();
    assert_eq!(got, vec![("vegetable", 0.91), ("onion", 0.77)]);

    let detections = extract_detections(&reshaped, &DetectionThresholds::default());
    assert_eq!(names(&detections), vec!["vegetable", "onion"]);
}

#[test]
fn proxy_maps_upstream_status() {
    assert!(handle_upstream(200, json!({})).is_ok());

    let limited = handle_upstream(429, json!({"message": "quota"})).unwrap_err();
    assert!(matches!(limited, ProxyError::RateLimited { .. }));
    assert_eq!(limited.status_code(), 429);
    assert_eq!(limited.to_string(), "Daily request limit exceeded");
    assert_eq!(limited.to_body()["error"], "Daily request limit exceeded");

    let failed = handle_upstream(401, json!({"message": "bad key"})).unwrap_err();
    assert_eq!(failed.status_code(), 401);
    assert_eq!(failed.to_body()["error"]["message"], "bad key");
}

#[test]
fn image_payload_decoding() {
    assert_eq!(decode_image_payload("data:image/jpeg;base64,aGVsbG8=").unwrap(), b"hello");
    assert_eq!(decode_image_payload("aGVsbG8=").unwrap(), b"hello");
    assert!(matches!(decode_image_payload("%%%"), Err(ProxyError::InvalidPayload(_))));
    assert!(matches!(decode_image_payload("data:image/png;base64,"), Err(ProxyError::InvalidPayload(_))));

    let request = ProxyRequest::from_json(r#"{"image": "data:image/png;base64,aGVsbG8="}"#).unwrap();
    assert_eq!(request.image_bytes().unwrap(), b"hello");
    assert!(matches!(ProxyRequest::from_json("{}").unwrap().image_bytes(), Err(ProxyError::InvalidPayload(_))));
    assert!(matches!(ProxyRequest::from_json("not json"), Err(ProxyError::InvalidPayload(_))));
}

fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn credentials_per_auth_mode() {
    let mut settings = RecognitionSettings::default();
    let env = env_of(&[("LOGMEAL_API_KEY", "k-123"), ("LOGMEAL_USER_TOKEN", "u-9")]);

    let creds = resolve_credentials(&settings, &env).unwrap();
    assert_eq!(creds.user_token, UserToken::None);
    assert_eq!(creds.authorization_header(), "Bearer k-123");
    assert!(!format!("{creds:?}").contains("k-123"));

    settings.auth_mode = AuthMode::ApiKeyUserTokenEnv;
    assert_eq!(resolve_credentials(&settings, &env).unwrap().user_token, UserToken::Provided("u-9".to_string()));
    let no_token = env_of(&[("LOGMEAL_API_KEY", "k-123")]);
    assert!(matches!(resolve_credentials(&settings, &no_token), Err(ProxyError::MissingCredential(_))));

    settings.auth_mode = AuthMode::ApiKeyUserTokenAutocreate;
    assert_eq!(resolve_credentials(&settings, &no_token).unwrap().user_token, UserToken::CreateOnDemand);

    let blank = env_of(&[("LOGMEAL_API_KEY", "  ")]);
    assert!(matches!(resolve_credentials(&settings, &blank), Err(ProxyError::MissingCredential(_))));
}

#[test]
fn canned_recognizer_feeds_detection() {
    let recognizer = CannedRecognizer::from_file(&responses_dir().join("segmentation.json")).unwrap();
    let detections = detect(&recognizer, b"ignored", &DetectionThresholds::default()).unwrap();
    assert_eq!(names(&detections), vec!["tomato", "chicken", "basil", "rice"]);
}
