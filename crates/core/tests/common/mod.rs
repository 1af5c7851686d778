//! Shared fixtures and stub requesters for core integration tests.

use std::{
    collections::VecDeque,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use swingcoach_core::{
    AnalysisError, AnalysisReport, Drill, EncodedPayload, ReportRequester, Result, VideoAsset,
};
use tokio::sync::Notify;

/// Reply text wrapped in prose, the way providers tend to answer.
#[allow(dead_code)]
pub const WRAPPED_REPLY: &str = "Sure, here you go:\n{\"analysis\":\"A\",\"issues\":[\"a\"],\"drills\":[{\"name\":\"n\",\"purpose\":\"p\",\"steps\":[\"s1\"],\"frequency\":\"daily\"}]}\nThanks!";

#[allow(dead_code)]
pub const VALID_DOCUMENT: &str = r#"{
  "analysis": "Balanced setup; the backswing gets long and the hips stall through impact.",
  "issues": ["Overswing at the top", "Hips stop rotating before impact"],
  "drills": [
    {
      "name": "Three-quarter swings",
      "purpose": "Shortens the backswing",
      "steps": ["Take address", "Stop with hands at shoulder height", "Swing through"],
      "frequency": "20 balls per session"
    },
    {
      "name": "Step-through drill",
      "purpose": "Keeps the hips turning",
      "steps": ["Swing", "Step toward the target with the trail foot"],
      "frequency": "Three times a week"
    }
  ]
}"#;

#[allow(dead_code)]
pub fn expected_report() -> AnalysisReport {
    AnalysisReport {
        analysis: "Balanced setup; the backswing gets long and the hips stall through impact."
            .to_string(),
        issues: vec![
            "Overswing at the top".to_string(),
            "Hips stop rotating before impact".to_string(),
        ],
        drills: vec![
            Drill {
                name: "Three-quarter swings".to_string(),
                purpose: "Shortens the backswing".to_string(),
                steps: vec![
                    "Take address".to_string(),
                    "Stop with hands at shoulder height".to_string(),
                    "Swing through".to_string(),
                ],
                frequency: "20 balls per session".to_string(),
            },
            Drill {
                name: "Step-through drill".to_string(),
                purpose: "Keeps the hips turning".to_string(),
                steps: vec![
                    "Swing".to_string(),
                    "Step toward the target with the trail foot".to_string(),
                ],
                frequency: "Three times a week".to_string(),
            },
        ],
    }
}

/// 10-byte stand-in for a recorded swing.
#[allow(dead_code)]
pub fn fixture_video() -> VideoAsset {
    VideoAsset::from_bytes("swing.mp4", "video/mp4", b"\x00\x00\x00\x18ftypmp".to_vec())
}

#[allow(dead_code)]
pub fn other_video() -> VideoAsset {
    VideoAsset::from_bytes("swing-2.mov", "video/quicktime", b"moov-atom".to_vec())
}

/// Replies from a fixed script, one entry per call. `Err` entries become
/// transport failures.
#[allow(dead_code)]
pub struct ScriptedRequester {
    replies: Mutex<VecDeque<std::result::Result<String, String>>>,
    seen: Mutex<Vec<EncodedPayload>>,
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl ScriptedRequester {
    pub fn new(replies: Vec<std::result::Result<String, String>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            seen: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn replying(reply: &str) -> Self {
        Self::new(vec![Ok(reply.to_string())])
    }

    pub fn failing(reason: &str) -> Self {
        Self::new(vec![Err(reason.to_string())])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<EncodedPayload> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReportRequester for ScriptedRequester {
    async fn request_report(&self, payload: &EncodedPayload) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(payload.clone());

        let next = self.replies.lock().unwrap().pop_front();
        match next {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(reason)) => Err(AnalysisError::RequestFailed { reason }),
            None => Err(AnalysisError::RequestFailed {
                reason: "script exhausted".to_string(),
            }),
        }
    }
}

/// Holds every call pending until [`GatedRequester::release`].
#[allow(dead_code)]
pub struct GatedRequester {
    gate: Notify,
    reply: Option<String>,
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl GatedRequester {
    pub fn replying(reply: &str) -> Self {
        Self {
            gate: Notify::new(),
            reply: Some(reply.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            gate: Notify::new(),
            reply: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReportRequester for GatedRequester {
    async fn request_report(&self, _payload: &EncodedPayload) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.gate.notified().await;

        self.reply.clone().ok_or_else(|| AnalysisError::RequestFailed {
            reason: "connection reset by peer".to_string(),
        })
    }
}
