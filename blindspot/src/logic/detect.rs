use crate::{ApiError, server::AppState};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use base64::{Engine, engine::general_purpose::STANDARD};
use color_detect::{DetectionConfig, DetectionReport};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct DetectRequest {
    #[serde(alias = "imagen")]
    pub image: Option<String>,
}

/// Strips an optional `data:<mime>;base64,` prefix and decodes the rest.
/// Line breaks and other whitespace inside the payload are skipped.
pub fn decode_payload(payload: &str) -> Result<Vec<u8>, ApiError> {
    let payload = payload.trim();
    let payload = match payload.strip_prefix("data:") {
        Some(rest) => rest
            .split_once(',')
            .map(|(_, data)| data)
            .ok_or_else(|| ApiError::bad_request("Malformed data URL"))?,
        None => payload,
    };

    let payload: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    if payload.is_empty() {
        return Err(ApiError::bad_request("No image provided"));
    }

    STANDARD
        .decode(&payload)
        .map_err(|e| ApiError::bad_request(format!("Invalid base64 image: {e}")))
}

pub async fn detect_color(
    State(state): State<AppState>,
    body: Result<Json<DetectRequest>, JsonRejection>,
) -> Result<Json<DetectionReport>, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::bad_request(format!("Invalid request: {e}")))?;
    let payload = request
        .image
        .ok_or_else(|| ApiError::bad_request("No image provided"))?;
    let bytes = decode_payload(&payload)?;

    let config = state.config.detection.to_detection_config();
    let result = tokio::task::spawn_blocking(move || config.detect_bytes(&bytes)).await??;

    log::info!("detected {} at {}", result.label, result.rgb_string());
    Ok(Json(result.report()))
}

pub fn detect_file(config: &DetectionConfig, path: &Path) -> anyhow::Result<DetectionReport> {
    use anyhow::Context;

    let result = config
        .detect_file(path)
        .with_context(|| format!("detect color of {} failed", path.display()))?;
    Ok(result.report())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_payload() {
        assert_eq!(decode_payload("aGVsbG8=").unwrap(), b"hello");
        assert_eq!(
            decode_payload("data:image/png;base64,aGVsbG8=").unwrap(),
            b"hello"
        );
        assert_eq!(decode_payload("  aGVsbG8=\n").unwrap(), b"hello");
        assert_eq!(decode_payload("aGVsbG8g\nd29ybGQ=").unwrap(), b"hello world");
        assert_eq!(
            decode_payload("data:image/png;base64,aGVs\r\nbG8g\r\nd29y bGQ=").unwrap(),
            b"hello world"
        );
    }

    #[test]
    fn test_decode_payload_errors() {
        assert!(decode_payload("").is_err());
        assert!(decode_payload("data:image/png;base64,").is_err());
        assert!(decode_payload("data:image/png").is_err());
        assert!(decode_payload("not base64!!").is_err());
    }
}
