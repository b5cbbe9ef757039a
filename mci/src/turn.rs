//! Input and output of one pipeline turn.

use serde::{Deserialize, Serialize};
use verified_output::VerifiedOutput;

/// What the caller hands the pipeline: which session, and what the user said.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRequest {
    pub session_id: String,
    pub text: String,
}

impl TurnRequest {
    pub fn new(session_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            text: text.into(),
        }
    }
}

/// What the pipeline returns. `reply` is always present; `output` carries the verified shape
/// when the pipeline produced one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnResponse {
    pub reply: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<VerifiedOutput>,
}

impl TurnResponse {
    /// Plain reply without a verified shape.
    pub fn reply(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            output: None,
        }
    }

    /// Reply taken from the output's display text.
    pub fn from_output(output: impl Into<VerifiedOutput>) -> Self {
        let output = output.into();
        Self {
            reply: output.display_text().to_string(),
            output: Some(output),
        }
    }
}
