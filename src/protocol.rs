//! Request and response bodies exchanged with the house points service.
//!
//! Field names match the wire format exactly (snake_case).

use crate::types::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignupResponse {
    pub user_id: UserId,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuizAnswer {
    pub question_id: QuestionId,
    pub answer_value: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuizSubmission {
    pub answers: Vec<QuizAnswer>,
}

impl From<&QuizAnswerSet> for QuizSubmission {
    fn from(answers: &QuizAnswerSet) -> Self {
        Self {
            answers: answers
                .iter()
                .map(|(question_id, answer_value)| QuizAnswer {
                    question_id,
                    answer_value,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuizSubmitResponse {
    pub assigned_house: String,
}

/// Error body returned with non-success statuses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Human-readable message from `detail`.
    ///
    /// `detail` is usually a string; request validation failures send a list
    /// of objects with a `msg` field instead, which are joined.
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::String(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            serde_json::Value::Array(items) => {
                let messages: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                    .collect();
                (!messages.is_empty()).then(|| messages.join("; "))
            }
            _ => None,
        }
    }
}
