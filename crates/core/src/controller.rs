use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{
    error::{AnalysisError, Result},
    pipeline::analyze_swing,
    requester::ReportRequester,
    types::{AnalysisReport, AnalysisState, VideoAsset},
};

/// What a call to [`AnalysisController::request_analysis`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisRun {
    /// The pipeline ran and its outcome was published.
    Completed,
    /// Nothing selected, or a pipeline was still running.
    Ignored,
    /// The pipeline ran but a newer selection made its outcome stale.
    Superseded,
}

struct Session {
    asset: Option<VideoAsset>,
    attempt: u64,
    in_flight: bool,
}

/// Marks one running pipeline. Dropping it clears the in-flight flag, and if
/// the run never settled (its future was dropped) while still being the
/// latest attempt, the state falls back to `Ready`.
struct InFlight<'a> {
    controller: &'a AnalysisController,
    asset: VideoAsset,
    attempt: u64,
    settled: bool,
}

impl InFlight<'_> {
    fn settle(&mut self, result: Result<AnalysisReport>) -> AnalysisRun {
        self.settled = true;
        let session = self.controller.lock();
        if session.attempt != self.attempt {
            debug!(
                attempt = self.attempt,
                latest = session.attempt,
                "discarding stale analysis result"
            );
            return AnalysisRun::Superseded;
        }

        match result {
            Ok(report) => {
                info!(
                    video = %self.asset.name,
                    issues = report.issues.len(),
                    drills = report.drills.len(),
                    "analysis succeeded"
                );
                self.controller.publish(AnalysisState::Succeeded(report));
            }
            Err(e) => {
                warn!(
                    stage = e.stage().name(),
                    video = %self.asset.name,
                    error = %e,
                    "analysis failed"
                );
                self.controller.publish(AnalysisState::Failed(e.user_message()));
            }
        }

        AnalysisRun::Completed
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut session = self.controller.lock();
        session.in_flight = false;

        if !self.settled && session.attempt == self.attempt {
            warn!(video = %self.asset.name, "analysis dropped before completion");
            self.controller.publish(AnalysisState::Ready(self.asset.clone()));
        }
    }
}

/// Owns the selected video and the published [`AnalysisState`].
///
/// All operations take `&self`, so user actions can interleave as futures on
/// one thread. The session lock is never held across an await.
pub struct AnalysisController {
    requester: Arc<dyn ReportRequester>,
    session: Mutex<Session>,
    state_tx: watch::Sender<AnalysisState>,
}

impl AnalysisController {
    pub fn new(requester: Arc<dyn ReportRequester>) -> Self {
        let (state_tx, _) = watch::channel(AnalysisState::Idle);
        Self {
            requester,
            session: Mutex::new(Session {
                asset: None,
                attempt: 0,
                in_flight: false,
            }),
            state_tx,
        }
    }

    pub fn state(&self) -> AnalysisState {
        self.state_tx.borrow().clone()
    }

    /// Receiver that sees every state published after this call.
    pub fn subscribe(&self) -> watch::Receiver<AnalysisState> {
        self.state_tx.subscribe()
    }

    pub fn selected(&self) -> Option<VideoAsset> {
        self.lock().asset.clone()
    }

    /// Store `asset` as the current selection.
    ///
    /// Any previous report or error is discarded and an in-flight analysis
    /// becomes stale. A non-video asset clears the selection and moves to
    /// `Failed`.
    pub fn select_file(&self, asset: VideoAsset) -> Result<()> {
        let mut session = self.lock();
        session.attempt += 1;

        if !asset.is_video() {
            session.asset = None;
            let err = AnalysisError::InvalidSelection {
                media_type: asset.media_type.clone(),
            };
            warn!(
                stage = err.stage().name(),
                media_type = %asset.media_type,
                "selection rejected"
            );
            self.publish(AnalysisState::Failed(err.user_message()));
            return Err(err);
        }

        info!(
            video = %asset.name,
            size = asset.size,
            media_type = %asset.media_type,
            "video selected"
        );
        session.asset = Some(asset.clone());
        self.publish(AnalysisState::Ready(asset));
        Ok(())
    }

    /// Run the pipeline on the selected video and publish its outcome.
    ///
    /// A no-op when nothing is selected or while a pipeline is still running,
    /// including one made stale by a newer selection.
    pub async fn request_analysis(&self) -> AnalysisRun {
        let mut flight = {
            let mut session = self.lock();
            if session.in_flight {
                debug!("analysis already in flight, request ignored");
                return AnalysisRun::Ignored;
            }
            let Some(asset) = session.asset.clone() else {
                debug!("no video selected, request ignored");
                return AnalysisRun::Ignored;
            };

            session.attempt += 1;
            session.in_flight = true;
            self.publish(AnalysisState::Analyzing(asset.clone()));
            InFlight {
                controller: self,
                asset,
                attempt: session.attempt,
                settled: false,
            }
        };

        let result = analyze_swing(&flight.asset, self.requester.as_ref()).await;
        flight.settle(result)
    }

    fn publish(&self, state: AnalysisState) {
        debug!(state = state.name(), "state published");
        self.state_tx.send_replace(state);
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
