use axum::Json;
use color_detect::palette;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    pub message: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supported_colors: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub highlight_colors: Vec<String>,
}

fn ok(message: &str) -> Health {
    Health {
        status: "OK".to_string(),
        message: message.to_string(),
        supported_colors: vec![],
        highlight_colors: vec![],
    }
}

pub async fn health() -> Json<Health> {
    Json(ok("Server running"))
}

/// Liveness plus the color names each path understands.
pub async fn health_camera() -> Json<Health> {
    Json(Health {
        supported_colors: palette::palette_names().into_iter().map(String::from).collect(),
        highlight_colors: palette::highlight_names().into_iter().map(String::from).collect(),
        ..ok("Color detection server running")
    })
}
