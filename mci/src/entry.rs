//! Reference entry point: hand one turn to a pipeline and return its reply.

use tracing::Instrument;
use verified_output::VerifiedOutput;

use crate::error::PipelineError;
use crate::pipeline::Pipeline;
use crate::turn::{TurnRequest, TurnResponse};

/// Runs one turn and returns the full response.
///
/// Exactly one pipeline call, inside a `turn` span carrying `session_id`. No retry, no timeout,
/// no validation of the request; the pipeline's error is returned unchanged.
pub async fn run_turn<P: Pipeline + ?Sized>(
    pipeline: &P,
    request: TurnRequest,
) -> Result<TurnResponse, PipelineError> {
    let span = tracing::info_span!("turn", session_id = %request.session_id);
    async move {
        tracing::debug!(text_len = request.text.len(), "dispatching turn");
        let result = pipeline.handle_request(request).await;
        match &result {
            Ok(response) => tracing::debug!(
                kind = response.output.as_ref().map_or("reply", VerifiedOutput::kind),
                "turn finished"
            ),
            Err(e) => tracing::warn!(error = %e, "pipeline failed"),
        }
        result
    }
    .instrument(span)
    .await
}

/// Runs one turn for `session_id` / `text` and returns only the reply text.
pub async fn handle_request<P: Pipeline + ?Sized>(
    pipeline: &P,
    session_id: impl Into<String>,
    text: impl Into<String>,
) -> Result<String, PipelineError> {
    run_turn(pipeline, TurnRequest::new(session_id, text))
        .await
        .map(|response| response.reply)
}
