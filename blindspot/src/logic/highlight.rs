use super::upload;
use crate::{ApiError, server::AppState};
use axum::{
    extract::{Multipart, State},
    http::header,
    response::{IntoResponse, Response},
};
use color_detect::{ColorName, HighlightConfig, parse_highlight_color};
use std::path::Path;

#[derive(Debug, Default)]
struct HighlightForm {
    image: Option<Vec<u8>>,
    color: Option<String>,
}

async fn read_form(mut multipart: Multipart) -> Result<HighlightForm, ApiError> {
    let mut form = HighlightForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" | "imagen" => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Read image failed: {e}")))?;
                form.image = Some(bytes.to_vec());
            }
            "color" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Read color failed: {e}")))?;
                form.color = Some(text);
            }
            _ => log::debug!("ignore multipart field `{name}`"),
        }
    }

    Ok(form)
}

fn resolve_color(requested: Option<&str>, fallback: ColorName) -> Result<ColorName, ApiError> {
    match requested.map(str::trim).filter(|c| !c.is_empty()) {
        Some(name) => Ok(parse_highlight_color(name)?),
        None => Ok(fallback),
    }
}

pub async fn highlight(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let form = read_form(multipart).await?;

    let image = form
        .image
        .filter(|b| !b.is_empty())
        .ok_or_else(|| ApiError::bad_request("No image provided"))?;
    let color = resolve_color(form.color.as_deref(), state.config.highlight.default_color)?;

    let config = state.config.highlight.to_highlight_config(color);
    let mime = config.output_format().mime_type();

    let bytes = tokio::task::spawn_blocking(move || {
        let staged = upload::stage(&image)?;
        config.highlight_file(staged.path())
    })
    .await??;

    log::info!("highlighted {color}, {} bytes", bytes.len());
    Ok(([(header::CONTENT_TYPE, mime)], bytes).into_response())
}

pub fn highlight_file(config: &HighlightConfig, input: &Path, output: &Path) -> anyhow::Result<()> {
    use anyhow::Context;

    let bytes = config
        .highlight_file(input)
        .with_context(|| format!("highlight {} failed", input.display()))?;
    std::fs::write(output, bytes).with_context(|| format!("write {} failed", output.display()))?;
    Ok(())
}
