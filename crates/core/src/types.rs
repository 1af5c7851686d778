use std::{path::PathBuf, sync::Arc};

use serde::{Deserialize, Serialize};

/// Media family every selectable asset must belong to.
pub const VIDEO_FAMILY_PREFIX: &str = "video/";

/// Where the bytes of a selected video live.
#[derive(Debug, Clone, PartialEq)]
pub enum VideoSource {
    /// Read lazily when the asset is encoded.
    File(PathBuf),
    Memory(Arc<[u8]>),
}

/// A user-selected video: the blob handle plus its declared type and size.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoAsset {
    pub name: String,
    pub media_type: String,
    pub size: u64,
    pub source: VideoSource,
}

impl VideoAsset {
    pub fn from_file(path: impl Into<PathBuf>, media_type: impl Into<String>, size: u64) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        Self {
            name,
            media_type: media_type.into(),
            size,
            source: VideoSource::File(path),
        }
    }

    pub fn from_bytes(
        name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        let bytes = bytes.into();
        Self {
            name: name.into(),
            media_type: media_type.into(),
            size: bytes.len() as u64,
            source: VideoSource::Memory(bytes),
        }
    }

    /// True when the declared type is in the `video/` family.
    pub fn is_video(&self) -> bool {
        is_video_media_type(&self.media_type)
    }
}

pub fn is_video_media_type(media_type: &str) -> bool {
    media_type
        .trim()
        .to_ascii_lowercase()
        .starts_with(VIDEO_FAMILY_PREFIX)
}

/// Base64 text of an asset's bytes, paired with its media type.
///
/// The data never carries a `data:<type>;base64,` prefix; one passed to
/// [`EncodedPayload::new`] is stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPayload {
    media_type: String,
    data: String,
}

impl EncodedPayload {
    pub fn new(media_type: impl Into<String>, data: impl Into<String>) -> Self {
        let data = data.into();
        let data = match data.strip_prefix("data:").and_then(|rest| rest.split_once(',')) {
            Some((_, body)) => body.to_string(),
            None => data,
        };

        Self {
            media_type: media_type.into(),
            data,
        }
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn data(&self) -> &str {
        &self.data
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drill {
    pub name: String,
    pub purpose: String,
    pub steps: Vec<String>,
    pub frequency: String,
}

/// Structured coaching result.
///
/// Deserialization validates the document, so a value of this type is never
/// partially filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ReportDocument")]
pub struct AnalysisReport {
    pub analysis: String,
    pub issues: Vec<String>,
    pub drills: Vec<Drill>,
}

#[derive(Deserialize)]
struct ReportDocument {
    analysis: String,
    issues: Vec<String>,
    drills: Vec<Drill>,
}

impl TryFrom<ReportDocument> for AnalysisReport {
    type Error = String;

    fn try_from(doc: ReportDocument) -> Result<Self, Self::Error> {
        if doc.analysis.trim().is_empty() {
            return Err("analysis is empty".to_string());
        }

        if let Some(drill) = doc.drills.iter().find(|d| d.steps.is_empty()) {
            return Err(format!("drill '{}' has no steps", drill.name));
        }

        Ok(Self {
            analysis: doc.analysis,
            issues: doc.issues,
            drills: doc.drills,
        })
    }
}

/// Lifecycle state published to the presentation layer.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AnalysisState {
    #[default]
    Idle,
    Ready(VideoAsset),
    Analyzing(VideoAsset),
    Succeeded(AnalysisReport),
    Failed(String),
}

impl AnalysisState {
    pub fn name(&self) -> &'static str {
        match self {
            AnalysisState::Idle => "idle",
            AnalysisState::Ready(_) => "ready",
            AnalysisState::Analyzing(_) => "analyzing",
            AnalysisState::Succeeded(_) => "succeeded",
            AnalysisState::Failed(_) => "failed",
        }
    }

    pub fn is_analyzing(&self) -> bool {
        matches!(self, AnalysisState::Analyzing(_))
    }
}
