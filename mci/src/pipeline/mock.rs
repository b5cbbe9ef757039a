//! Deterministic pipeline for tests and for running the binary without a real pipeline.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use verified_output::{Answer, VerifiedOutput};

use super::Pipeline;
use crate::error::PipelineError;
use crate::turn::{TurnRequest, TurnResponse};

#[derive(Clone, Debug)]
enum Behavior {
    Echo,
    Fixed(TurnResponse),
    Fail(String),
}

/// Mock pipeline: echoes, returns a fixed response, or always fails.
///
/// Records how many times it was called and the last request it saw.
#[derive(Debug)]
pub struct MockPipeline {
    behavior: Behavior,
    calls: AtomicUsize,
    last_request: Mutex<Option<TurnRequest>>,
}

impl MockPipeline {
    fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Answers every turn with the input text as an [`Answer`].
    pub fn echo() -> Self {
        Self::new(Behavior::Echo)
    }

    /// Returns `reply` with no verified output.
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self::new(Behavior::Fixed(TurnResponse::reply(reply)))
    }

    /// Returns `output` (reply = its display text).
    pub fn with_output(output: impl Into<VerifiedOutput>) -> Self {
        Self::new(Behavior::Fixed(TurnResponse::from_output(output)))
    }

    /// Fails every turn with [`PipelineError::Failed`].
    pub fn failing(message: impl Into<String>) -> Self {
        Self::new(Behavior::Fail(message.into()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<TurnRequest> {
        self.last_request
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Default for MockPipeline {
    fn default() -> Self {
        Self::echo()
    }
}

#[async_trait]
impl Pipeline for MockPipeline {
    async fn handle_request(&self, request: TurnRequest) -> Result<TurnResponse, PipelineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap_or_else(|e| e.into_inner()) = Some(request.clone());
        match &self.behavior {
            Behavior::Echo => Ok(TurnResponse::from_output(Answer::new(request.text))),
            Behavior::Fixed(response) => Ok(response.clone()),
            Behavior::Fail(message) => Err(PipelineError::Failed(message.clone())),
        }
    }
}
