//! Library half of the `mci` binary: run one turn against a [`Pipeline`] and render the output.
//!
//! `main.rs` handles argument parsing, config loading and logging; everything here takes the
//! settings snapshot and the pipeline as arguments so tests can drive it with [`MockPipeline`].

use config::Settings;
use mci::{MockPipeline, Pipeline, PipelineError, TurnRequest, VerifiedOutput};
use serde::Serialize;

/// One invocation: which session, what text, how to print.
#[derive(Clone, Debug)]
pub struct TurnOptions {
    pub session_id: String,
    pub text: String,
    /// Print one JSON line (`session_id`, `reply`, `output`) instead of the bare reply.
    pub output_json: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error("encode json output: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct JsonLine<'a> {
    session_id: &'a str,
    reply: &'a str,
    output: Option<&'a VerifiedOutput>,
}

/// Pipeline used by the binary. The decision pipeline is not part of this workspace, so the
/// binary answers with the input text.
pub fn default_pipeline() -> MockPipeline {
    MockPipeline::echo()
}

/// Logs a warning naming the documented required variables that are unset. Returns them.
pub fn report_missing_required(settings: &Settings) -> Vec<&'static str> {
    let missing = settings.missing_required();
    if !missing.is_empty() {
        tracing::warn!(missing = %missing.join(","), "required settings are not set");
    }
    missing
}

/// Runs the turn and returns the line to print on stdout.
pub async fn run_turn<P: Pipeline + ?Sized>(
    opts: &TurnOptions,
    settings: &Settings,
    pipeline: &P,
) -> Result<String, CliError> {
    tracing::info!(
        env = settings.env(),
        production = settings.is_production(),
        "running turn"
    );
    let request = TurnRequest::new(opts.session_id.clone(), opts.text.clone());
    let response = mci::run_turn(pipeline, request).await?;
    if !opts.output_json {
        return Ok(response.reply);
    }
    let line = JsonLine {
        session_id: &opts.session_id,
        reply: &response.reply,
        output: response.output.as_ref(),
    };
    Ok(serde_json::to_string(&line)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mci::{Close, Refusal};

    fn opts(json: bool) -> TurnOptions {
        TurnOptions {
            session_id: "s1".to_string(),
            text: "hello".to_string(),
            output_json: json,
        }
    }

    #[tokio::test]
    async fn prints_bare_reply() {
        let pipeline = MockPipeline::with_reply("hi");
        let line = run_turn(&opts(false), &Settings::default(), &pipeline).await.unwrap();
        assert_eq!(line, "hi");
    }

    #[tokio::test]
    async fn json_line_carries_session_reply_and_output() {
        let pipeline = MockPipeline::with_output(Refusal::new("No.", "policy"));
        let line = run_turn(&opts(true), &Settings::default(), &pipeline).await.unwrap();
        let v: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(v["session_id"], "s1");
        assert_eq!(v["reply"], "No.");
        assert_eq!(v["output"]["type"], "refusal");
        assert_eq!(v["output"]["category"], "policy");
        assert!(!line.contains('\n'));
    }

    #[tokio::test]
    async fn json_line_has_null_output_for_plain_reply() {
        let pipeline = MockPipeline::with_reply("hi");
        let line = run_turn(&opts(true), &Settings::default(), &pipeline).await.unwrap();
        let v: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert!(v["output"].is_null());
    }

    #[tokio::test]
    async fn pipeline_error_is_passed_through() {
        let pipeline = MockPipeline::failing("boom");
        let err = run_turn(&opts(false), &Settings::default(), &pipeline).await.unwrap_err();
        assert_eq!(err.to_string(), "pipeline failed: boom");
        assert!(matches!(err, CliError::Pipeline(PipelineError::Failed(ref m)) if m == "boom"));
    }

    #[tokio::test]
    async fn default_pipeline_echoes() {
        let line = run_turn(&opts(false), &Settings::default(), &default_pipeline()).await.unwrap();
        assert_eq!(line, "hello");
    }

    #[tokio::test]
    async fn close_output_reply_is_its_text() {
        let pipeline = MockPipeline::with_output(Close::new("Take care.", "resolved"));
        let line = run_turn(&opts(false), &Settings::default(), &pipeline).await.unwrap();
        assert_eq!(line, "Take care.");
    }

    #[test]
    fn missing_required_reported_for_defaults() {
        let missing = report_missing_required(&Settings::default());
        assert_eq!(missing, Settings::required_env_vars());
    }
}
