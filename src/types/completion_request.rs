use serde::{Deserialize, Serialize};

use crate::types::Message;

/// Body of a `POST /api/chat/completions` request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletionRequest {
    /// Model identifier, e.g. `gemma3:4b`.
    pub model: String,

    /// The windowed conversation, system directive first.
    pub messages: Vec<Message>,

    /// Sampling temperature.
    pub temperature: f32,
}

impl CompletionRequest {
    /// Create a new request.
    pub fn new(model: impl Into<String>, messages: Vec<Message>, temperature: f32) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature,
        }
    }
}
