//! Pipeline seam.
//!
//! The decision logic that turns a [`TurnRequest`] into a reply lives outside this workspace.
//! Anything that implements [`Pipeline`] can be driven by [`handle_request`](crate::handle_request);
//! [`MockPipeline`] is the in-tree implementation used by tests and the default binary.

mod mock;

pub use mock::MockPipeline;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::PipelineError;
use crate::turn::{TurnRequest, TurnResponse};

/// One turn: session id and text in, reply (and optionally a verified output) out.
///
/// Implementations own their retries, timeouts and session state; callers make exactly one
/// call per turn and propagate the error as-is.
#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn handle_request(&self, request: TurnRequest) -> Result<TurnResponse, PipelineError>;
}

#[async_trait]
impl<P: Pipeline + ?Sized> Pipeline for Arc<P> {
    async fn handle_request(&self, request: TurnRequest) -> Result<TurnResponse, PipelineError> {
        (**self).handle_request(request).await
    }
}

#[async_trait]
impl<P: Pipeline + ?Sized> Pipeline for Box<P> {
    async fn handle_request(&self, request: TurnRequest) -> Result<TurnResponse, PipelineError> {
        (**self).handle_request(request).await
    }
}
