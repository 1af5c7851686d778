use thiserror::Error;

/// Pipeline stage an [`AnalysisError`] originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Selection,
    Encoding,
    Request,
    Extraction,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Selection => "selection",
            Stage::Encoding => "encoding",
            Stage::Request => "request",
            Stage::Extraction => "extraction",
        }
    }
}

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Invalid file type: {media_type} is not a video")]
    InvalidSelection { media_type: String },

    #[error("Could not read video: {reason}")]
    EncodingFailed { reason: String },

    #[error("Analysis request failed: {reason}")]
    RequestFailed { reason: String },

    #[error("Could not parse analysis: {reason}")]
    ExtractionFailed { reason: String },
}

impl AnalysisError {
    pub fn stage(&self) -> Stage {
        match self {
            AnalysisError::InvalidSelection { .. } => Stage::Selection,
            AnalysisError::EncodingFailed { .. } => Stage::Encoding,
            AnalysisError::RequestFailed { .. } => Stage::Request,
            AnalysisError::ExtractionFailed { .. } => Stage::Extraction,
        }
    }

    /// Message shown to the user once the error collapses into a failed state.
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::InvalidSelection { .. } => "invalid file type".to_string(),
            other => format!("Failed to analyze swing: {other}"),
        }
    }
}

impl From<reqwest::Error> for AnalysisError {
    fn from(err: reqwest::Error) -> Self {
        AnalysisError::RequestFailed {
            reason: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
