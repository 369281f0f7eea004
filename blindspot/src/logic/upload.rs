use color_detect::{ColorError, ColorResult};
use std::io::Write;
use tempfile::NamedTempFile;

/// Writes an upload to a uniquely named temporary file. The file is removed
/// when the returned handle drops, on success and error paths alike.
pub fn stage(bytes: &[u8]) -> ColorResult<NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .prefix("blindspot-")
        .suffix(".upload")
        .tempfile()
        .map_err(|e| ColorError::InternalProcessing(format!("create temp file failed: {e}")))?;

    file.write_all(bytes)
        .and_then(|_| file.flush())
        .map_err(|e| ColorError::InternalProcessing(format!("write temp file failed: {e}")))?;

    Ok(file)
}
