//! The four records. Constructors accept any string-like fields and validate nothing.

use serde::{Deserialize, Serialize};

/// Final text to the user.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Answer {
    text: String,
}

impl Answer {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A follow-up question back to the user.
///
/// `question_type` classifies the question; `priority_reason` says why it was asked first.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ask {
    question: String,
    question_type: String,
    priority_reason: String,
}

impl Ask {
    pub fn new(
        question: impl Into<String>,
        question_type: impl Into<String>,
        priority_reason: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            question_type: question_type.into(),
            priority_reason: priority_reason.into(),
        }
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn question_type(&self) -> &str {
        &self.question_type
    }

    pub fn priority_reason(&self) -> &str {
        &self.priority_reason
    }
}

/// Declined request: text shown to the user and the refusal category.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Refusal {
    text: String,
    category: String,
}

impl Refusal {
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn category(&self) -> &str {
        &self.category
    }
}

/// End of the conversation turn; `close_type` tags how it concluded.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Close {
    text: String,
    close_type: String,
}

impl Close {
    pub fn new(text: impl Into<String>, close_type: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            close_type: close_type.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn close_type(&self) -> &str {
        &self.close_type
    }
}
