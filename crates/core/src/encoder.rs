use std::sync::Arc;

use base64::{Engine, engine::general_purpose::STANDARD};
use tokio::fs;
use tracing::debug;

use crate::{
    error::{AnalysisError, Result},
    types::{EncodedPayload, VideoAsset, VideoSource},
};

/// Read the asset's bytes and encode them as base64 text
pub async fn encode_video(asset: &VideoAsset) -> Result<EncodedPayload> {
    let bytes: Arc<[u8]> = match &asset.source {
        VideoSource::Memory(bytes) => Arc::clone(bytes),
        VideoSource::File(path) => fs::read(path)
            .await
            .map_err(|e| AnalysisError::EncodingFailed {
                reason: format!("{}: {}", path.display(), e),
            })?
            .into(),
    };

    if bytes.is_empty() {
        return Err(AnalysisError::EncodingFailed {
            reason: format!("{} is empty", asset.name),
        });
    }

    let data = STANDARD.encode(&bytes);
    debug!(
        video = %asset.name,
        bytes = bytes.len(),
        encoded = data.len(),
        "video encoded"
    );

    Ok(EncodedPayload::new(asset.media_type.clone(), data))
}
