use tracing::debug;

use crate::{
    encoder::encode_video,
    error::Result,
    extractor::extract_report,
    requester::ReportRequester,
    types::{AnalysisReport, VideoAsset},
};

/// Encode the video, ask the provider for a report, and extract it.
///
/// Stages run strictly in order; the first failure ends the attempt.
pub async fn analyze_swing(
    asset: &VideoAsset,
    requester: &dyn ReportRequester,
) -> Result<AnalysisReport> {
    let payload = encode_video(asset).await?;

    debug!(video = %asset.name, "requesting analysis");
    let reply = requester.request_report(&payload).await?;
    debug!(chars = reply.len(), "reply received");

    extract_report(&reply)
}
