use serde::{Deserialize, Serialize};

use crate::error::TurnError;
use crate::types::Usage;

/// A successful chat completion.
///
/// Only `choices[0].message.content` is required; everything else an
/// OpenAI-compatible endpoint may send is optional or ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletionResponse {
    /// Completion identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// The model that produced the completion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Candidate replies; the first one is used.
    pub choices: Vec<Choice>,

    /// Token accounting, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

/// One candidate reply.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Choice {
    /// Position of the choice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,

    /// The generated message.
    pub message: ChoiceMessage,

    /// Why generation stopped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// The message inside a [`Choice`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChoiceMessage {
    /// Usually `assistant`; kept as text because endpoints vary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// The reply text.
    pub content: String,
}

impl CompletionResponse {
    /// Validates a success body against the completion schema.
    ///
    /// # Errors
    ///
    /// Returns [`TurnError::UnexpectedShape`] carrying the body when it is not
    /// JSON, does not match the schema, or has no choices.
    pub fn from_body(body: &str) -> Result<Self, TurnError> {
        let response: CompletionResponse = serde_json::from_str(body)
            .map_err(|_| TurnError::unexpected_shape(pretty_body(body)))?;
        if response.choices.is_empty() {
            return Err(TurnError::unexpected_shape(pretty_body(body)));
        }
        Ok(response)
    }

    /// The text of the first choice.
    ///
    /// Empty for a response with no choices, which [`from_body`](Self::from_body)
    /// never returns.
    pub fn reply(&self) -> &str {
        self.choices
            .first()
            .map_or("", |choice| choice.message.content.as_str())
    }
}

/// Pretty-prints a JSON body for diagnostics, or returns it untouched.
fn pretty_body(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| serde_json::to_string_pretty(&value).ok())
        .unwrap_or_else(|| body.to_string())
}
