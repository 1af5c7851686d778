//! SwingCoach Core Library
//!
//! Turns a golf swing video into a structured coaching report: encode the
//! video, send it to the analysis provider, extract the JSON report from the
//! reply, and track the user-visible analysis state.

pub mod controller;
pub mod encoder;
pub mod error;
pub mod extractor;
pub mod format;
pub mod pipeline;
pub mod provider;
pub mod requester;
pub mod types;

// Re-export commonly used items at crate root
pub use controller::{AnalysisController, AnalysisRun};
pub use encoder::encode_video;
pub use error::{AnalysisError, Result, Stage};
pub use extractor::extract_report;
pub use format::{format_report_readable, format_size};
pub use pipeline::analyze_swing;
pub use provider::ProviderConfig;
pub use requester::{HttpRequester, ReportRequester};
pub use types::{AnalysisReport, AnalysisState, Drill, EncodedPayload, VideoAsset, VideoSource};
