//! Voice Detection Endpoint
//!
//! `POST /detect` runs the whole pipeline for one clip: base64 decode,
//! audio decode, feature extraction, classification. The handler is
//! stateless apart from the reference tables, so the same request body
//! always produces the same response body.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::info;
use voice_classifier::{Classifier, Language};

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct DetectRequest {
    /// Base64-encoded audio bytes, any supported container format
    pub audio_base64: String,
    /// Optional language tag selecting a pitch baseline
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DetectResponse {
    pub classification: &'static str,
    pub confidence_score: f64,
    pub explanation: String,
    pub metadata: DetectMetadata,
}

#[derive(Debug, Serialize)]
pub struct DetectMetadata {
    pub duration_seconds: f64,
    pub detected_language: String,
    pub features_summary: BTreeMap<&'static str, f64>,
}

/// Run the detection pipeline for one request
pub async fn detect(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DetectRequest>,
) -> Result<Json<DetectResponse>, ApiError> {
    let audio_bytes = STANDARD.decode(request.audio_base64.trim())?;

    let buffer = audio_decoder::decode(&audio_bytes)?;
    let extractor = feature_engine::FeatureExtractor::new(buffer.sample_rate);
    let features = extractor.extract(&buffer)?;

    let language = request.language.as_deref().and_then(Language::parse);
    let table = state.tables.table_for(language);
    let result = Classifier::new(*table).classify(&features);

    info!(
        label = result.label.as_str(),
        confidence = result.confidence,
        duration = features.duration,
        "detection complete"
    );

    let detected_language = request
        .language
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .unwrap_or_else(|| "unknown".to_string());

    Ok(Json(DetectResponse {
        classification: result.label.as_str(),
        confidence_score: result.confidence,
        explanation: result.explanation,
        metadata: DetectMetadata {
            duration_seconds: features.duration,
            detected_language,
            features_summary: features.summary(),
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_router, AppState};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use tower::ServiceExt;

    fn app() -> Router {
        create_router(Arc::new(AppState::new()))
    }

    /// One-second 440 Hz sine rendered as a 16-bit mono WAV
    fn sine_wav_bytes() -> Vec<u8> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 22050,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut cursor = std::io::Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
            for n in 0..22050u32 {
                let t = n as f64 / 22050.0;
                let sample = (2.0 * std::f64::consts::PI * 440.0 * t).sin();
                writer.write_sample((sample * i16::MAX as f64 * 0.5) as i16).unwrap();
            }
            writer.finalize().unwrap();
        }
        cursor.into_inner()
    }

    fn detect_request(body: serde_json::Value) -> Request<Body> {
        Request::post("/detect")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_detect_valid_audio() {
        let encoded = STANDARD.encode(sine_wav_bytes());
        let response = app()
            .oneshot(detect_request(serde_json::json!({ "audio_base64": encoded })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert!(json["classification"] == "AI-Generated" || json["classification"] == "Human");
        let confidence = json["confidence_score"].as_f64().unwrap();
        assert!((0.0..=1.0).contains(&confidence));
        assert!(json["explanation"].as_str().unwrap().starts_with("Classified as"));
        assert!(json["metadata"]["duration_seconds"].as_f64().unwrap() > 0.9);
        assert_eq!(json["metadata"]["detected_language"], "unknown");
        assert!(json["metadata"]["features_summary"]["pitch_mean"].is_f64());
    }

    #[tokio::test]
    async fn test_detect_is_deterministic() {
        let encoded = STANDARD.encode(sine_wav_bytes());
        let body = serde_json::json!({ "audio_base64": encoded });

        let first = app().oneshot(detect_request(body.clone())).await.unwrap();
        let second = app().oneshot(detect_request(body)).await.unwrap();

        let first_bytes = axum::body::to_bytes(first.into_body(), usize::MAX)
            .await
            .unwrap();
        let second_bytes = axum::body::to_bytes(second.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(first_bytes, second_bytes);
    }

    #[tokio::test]
    async fn test_detect_invalid_base64() {
        let response = app()
            .oneshot(detect_request(
                serde_json::json!({ "audio_base64": "not base64!!!" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert!(json["detail"].as_str().unwrap().contains("base64"));
    }

    #[tokio::test]
    async fn test_detect_empty_audio() {
        let response = app()
            .oneshot(detect_request(serde_json::json!({ "audio_base64": "" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert!(json["detail"].is_string());
    }

    #[tokio::test]
    async fn test_detect_undecodable_audio() {
        let encoded = STANDARD.encode(b"this is not an audio container");
        let response = app()
            .oneshot(detect_request(serde_json::json!({ "audio_base64": encoded })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_detect_unknown_language_accepted() {
        let encoded = STANDARD.encode(sine_wav_bytes());
        let response = app()
            .oneshot(detect_request(serde_json::json!({
                "audio_base64": encoded,
                "language": "Klingon",
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["metadata"]["detected_language"], "Klingon");
    }

    #[tokio::test]
    async fn test_detect_known_language_tag() {
        let encoded = STANDARD.encode(sine_wav_bytes());
        let response = app()
            .oneshot(detect_request(serde_json::json!({
                "audio_base64": encoded,
                "language": "tamil",
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["metadata"]["detected_language"], "tamil");
    }
}
