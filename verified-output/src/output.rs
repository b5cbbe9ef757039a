//! Sum type over the four records.
//!
//! Wire shape: internally tagged, `{"type": "answer", "text": "..."}`,
//! `{"type": "ask", "question": "...", "question_type": "...", "priority_reason": "..."}`, etc.

use serde::{Deserialize, Serialize};

use crate::record::{Answer, Ask, Close, Refusal};

/// The single terminal shape of one pipeline turn.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VerifiedOutput {
    Answer(Answer),
    Ask(Ask),
    Refusal(Refusal),
    Close(Close),
}

impl VerifiedOutput {
    /// Tag string, same as the `type` field on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Answer(_) => "answer",
            Self::Ask(_) => "ask",
            Self::Refusal(_) => "refusal",
            Self::Close(_) => "close",
        }
    }

    /// Text to show the user: the question for [`Ask`], `text` otherwise.
    pub fn display_text(&self) -> &str {
        match self {
            Self::Answer(a) => a.text(),
            Self::Ask(q) => q.question(),
            Self::Refusal(r) => r.text(),
            Self::Close(c) => c.text(),
        }
    }
}

impl From<Answer> for VerifiedOutput {
    fn from(a: Answer) -> Self {
        Self::Answer(a)
    }
}

impl From<Ask> for VerifiedOutput {
    fn from(q: Ask) -> Self {
        Self::Ask(q)
    }
}

impl From<Refusal> for VerifiedOutput {
    fn from(r: Refusal) -> Self {
        Self::Refusal(r)
    }
}

impl From<Close> for VerifiedOutput {
    fn from(c: Close) -> Self {
        Self::Close(c)
    }
}
