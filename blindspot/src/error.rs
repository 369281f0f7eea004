use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use color_detect::ColorError;
use serde_json::json;

/// A failed request: status code plus a `{"error": ...}` body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl ToString) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.to_string(),
        }
    }

    pub fn internal(message: impl ToString) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.to_string(),
        }
    }
}

impl From<ColorError> for ApiError {
    fn from(e: ColorError) -> Self {
        match e {
            ColorError::Decode(_) | ColorError::EmptySample(_) | ColorError::UnsupportedColor(_) => {
                Self::bad_request(e)
            }
            ColorError::InternalProcessing(_) => Self::internal(e),
        }
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(e: tokio::task::JoinError) -> Self {
        Self::internal(format!("processing task failed: {e}"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            log::error!("{}", self.message);
        } else {
            log::warn!("{}", self.message);
        }

        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
