use std::path::Path;

use anyhow::{Context, Result};
use swingcoach_core::VideoAsset;
use tokio::fs;

/// Declared type for files whose extension says nothing useful.
const UNKNOWN_MEDIA_TYPE: &str = "application/octet-stream";

/// Build a video asset from a file on disk.
///
/// The declared type comes from `media_type` when given, otherwise from the
/// file extension. The type is not validated here; the controller decides.
pub async fn asset_from_path(path: &Path, media_type: Option<&str>) -> Result<VideoAsset> {
    let metadata = fs::metadata(path)
        .await
        .with_context(|| format!("cannot open {}", path.display()))?;
    anyhow::ensure!(metadata.is_file(), "{} is not a file", path.display());

    let media_type = match media_type {
        Some(declared) => declared.to_string(),
        None => mime_guess::from_path(path)
            .first_raw()
            .unwrap_or(UNKNOWN_MEDIA_TYPE)
            .to_string(),
    };

    Ok(VideoAsset::from_file(path, media_type, metadata.len()))
}
