//! Client-side interaction core for the anxiety analyzer: the text buffer
//! behind the entry control, the display state machine, and the controller
//! that submits score requests to the backend.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use shared::protocol::{AnalyzeRequest, AnalyzeResponse};
use thiserror::Error;
use tokio::{sync::watch, task::JoinHandle};
use tracing::{info, warn};

/// Shown in the interpretation area before any analysis has run.
pub const IDLE_MESSAGE: &str = "Analysis will appear here.";
/// Shown while a score request is in flight.
pub const PENDING_MESSAGE: &str = "Analyzing...";
/// Shown for every failure kind; the distinguishing detail goes to the log.
pub const CONNECT_FAILED_MESSAGE: &str = "Could not connect to the server. Is it running?";

const HIGH_MESSAGE: &str = "High anxiety detected. Please take a moment to relax.";
const MODERATE_MESSAGE: &str = "Moderate anxiety detected. Consider taking a short break.";
const LOW_MESSAGE: &str = "Low anxiety detected. You seem to be doing great!";

const HIGH_THRESHOLD: f64 = 0.7;
const MODERATE_THRESHOLD: f64 = 0.4;

/// Categorical reading of an anxiety score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpretation {
    Low,
    Moderate,
    High,
}

impl Interpretation {
    /// Fixed-threshold classification, first match wins. Exactly 0.4 reads
    /// as `Low` and exactly 0.7 as `Moderate`; out-of-range scores are not
    /// clamped and classify like any other value.
    pub fn from_score(score: f64) -> Self {
        if score > HIGH_THRESHOLD {
            Self::High
        } else if score > MODERATE_THRESHOLD {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::High => HIGH_MESSAGE,
            Self::Moderate => MODERATE_MESSAGE,
            Self::Low => LOW_MESSAGE,
        }
    }
}

/// Renders a score the way the result area shows it, always two decimals.
pub fn format_score(score: f64) -> String {
    format!("{score:.2}")
}

/// Current value of the text entry control. Pure state: edits overwrite the
/// held string verbatim and nothing is validated, the empty string included.
#[derive(Default, Debug, Clone)]
pub struct InputBuffer {
    text: String,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// What the result area shows. Exactly one variant is active at any time;
/// there is no blended pending-with-stale-score state.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayState {
    Idle,
    Pending,
    Result {
        score: f64,
        interpretation: Interpretation,
    },
    Failed {
        message: String,
    },
}

impl DisplayState {
    /// Message line for the interpretation area.
    pub fn message(&self) -> &str {
        match self {
            Self::Idle => IDLE_MESSAGE,
            Self::Pending => PENDING_MESSAGE,
            Self::Result { interpretation, .. } => interpretation.message(),
            Self::Failed { message } => message,
        }
    }
}

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("transport failure reaching scoring backend: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("scoring backend answered HTTP {status}")]
    Protocol { status: reqwest::StatusCode },
    #[error("scoring backend reply could not be decoded: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Where score requests go. Production talks HTTP; tests substitute stubs.
#[async_trait]
pub trait ScoringBackend: Send + Sync {
    async fn score_text(&self, request: AnalyzeRequest) -> Result<AnalyzeResponse>;
}

/// Placeholder backend used before a real one is wired in; every request
/// fails.
pub struct MissingScoringBackend;

#[async_trait]
impl ScoringBackend for MissingScoringBackend {
    async fn score_text(&self, _request: AnalyzeRequest) -> Result<AnalyzeResponse> {
        Err(anyhow!("scoring backend is unavailable"))
    }
}

/// POSTs the request to `<server_url>/predict` as JSON and decodes the reply.
pub struct HttpScoringBackend {
    http: Client,
    server_url: String,
}

impl HttpScoringBackend {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            server_url: server_url.into(),
        }
    }
}

#[async_trait]
impl ScoringBackend for HttpScoringBackend {
    async fn score_text(&self, request: AnalyzeRequest) -> Result<AnalyzeResponse> {
        let response = self
            .http
            .post(format!("{}/predict", self.server_url))
            .json(&request)
            .send()
            .await
            .map_err(AnalyzeError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalyzeError::Protocol { status }.into());
        }

        let body: AnalyzeResponse = response.json().await.map_err(AnalyzeError::Decode)?;
        Ok(body)
    }
}

/// Owns the display state and orchestrates score requests.
///
/// The latest [`DisplayState`] lives in a watch channel. Overlapping
/// `analyze` calls each issue their own request; the channel reflects
/// whichever response resolves last.
pub struct AnalyzerController {
    backend: Arc<dyn ScoringBackend>,
    display: watch::Sender<DisplayState>,
}

impl AnalyzerController {
    pub fn new(server_url: impl Into<String>) -> Arc<Self> {
        Self::with_backend(Arc::new(HttpScoringBackend::new(server_url)))
    }

    pub fn with_backend(backend: Arc<dyn ScoringBackend>) -> Arc<Self> {
        let (display, _) = watch::channel(DisplayState::Idle);
        Arc::new(Self { backend, display })
    }

    /// Latest display state.
    pub fn display_state(&self) -> DisplayState {
        self.display.borrow().clone()
    }

    /// Subscribes to display state updates. The receiver starts at the
    /// current value.
    pub fn subscribe_display(&self) -> watch::Receiver<DisplayState> {
        self.display.subscribe()
    }

    /// Submits the buffer for analysis.
    ///
    /// Transitions to `Pending` before any I/O and snapshots the buffer at
    /// the moment of invocation; later edits do not alter the in-flight
    /// request. The returned handle observes completion only. Dropping it
    /// does not abort the request, and no cancellation is offered: a
    /// superseded response is still applied when it resolves.
    pub fn analyze(self: &Arc<Self>, buffer: &InputBuffer) -> JoinHandle<()> {
        self.display.send_replace(DisplayState::Pending);

        let request = AnalyzeRequest {
            text: buffer.text().to_string(),
        };
        let controller = Arc::clone(self);
        tokio::spawn(async move {
            let next = match controller.backend.score_text(request).await {
                Ok(AnalyzeResponse { anxiety_score }) => {
                    let interpretation = Interpretation::from_score(anxiety_score);
                    info!(score = anxiety_score, "analysis completed");
                    DisplayState::Result {
                        score: anxiety_score,
                        interpretation,
                    }
                }
                Err(err) => {
                    warn!("analysis request failed: {err:#}");
                    DisplayState::Failed {
                        message: CONNECT_FAILED_MESSAGE.to_string(),
                    }
                }
            };
            controller.display.send_replace(next);
        })
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
