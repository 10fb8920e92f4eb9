//! Core chat session management.
//!
//! This module provides the `ChatSession` struct which owns the conversation
//! history, dispatches input lines, and drives the read loop.

use std::path::{Path, PathBuf};

use crate::chat::commands::{ChatCommand, Input, classify, help_text};
use crate::chat::config::ChatConfig;
use crate::chat::input::LineSource;
use crate::chat::render::Renderer;
use crate::client::CompletionBackend;
use crate::error::{Result, TurnError};
use crate::history::History;
use crate::observability::{
    SESSION_RESETS, SESSION_SAVES, SESSION_TURN_ERRORS, SESSION_TURNS, SESSION_WINDOW_SIZE,
};
use crate::transcript::{default_transcript_path, save_transcript};
use crate::types::CompletionRequest;

/// Prompt shown before each input line.
pub const PROMPT: &str = "You: ";

/// Printed when the session ends.
pub const FAREWELL: &str = "Bye! 🧽";

/// Whether the loop keeps going after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Read the next line.
    Continue,

    /// End the session.
    Quit,
}

/// How a chat turn ended.
///
/// Either way the history grew by a user message and an assistant message.
#[derive(Debug, Clone)]
pub enum TurnOutcome {
    /// The model replied.
    Reply(String),

    /// The request failed; the history holds an error placeholder instead.
    Failed(TurnError),
}

/// A chat session that manages conversation state and API interactions.
pub struct ChatSession<B: CompletionBackend> {
    backend: B,
    config: ChatConfig,
    history: History,
}

impl<B: CompletionBackend> ChatSession<B> {
    /// Creates a new chat session whose history holds the configured system prompt.
    pub fn new(backend: B, config: ChatConfig) -> Self {
        let history = History::new(config.system_prompt.clone());
        Self {
            backend,
            config,
            history,
        }
    }

    /// The conversation so far.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// The session configuration.
    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// The completion backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns the number of messages in the conversation, system prompt included.
    pub fn message_count(&self) -> usize {
        self.history.len()
    }

    /// Clears the conversation history, keeping the system prompt.
    pub fn reset(&mut self) {
        SESSION_RESETS.click();
        self.history.reset();
    }

    /// Saves the transcript to `path`, or to a timestamped file in the working directory.
    ///
    /// Returns the absolute path written.
    pub fn save_transcript(&self, path: Option<&Path>) -> Result<PathBuf> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => default_transcript_path(),
        };
        let saved = save_transcript(self.history.messages(), &path)?;
        SESSION_SAVES.click();
        Ok(saved)
    }

    /// Sends one user message.
    ///
    /// The message is appended, the window is computed and submitted, and the
    /// reply, or an `(Error: ...)` placeholder when the request fails, is
    /// appended as the assistant's answer.
    pub async fn send(&mut self, user_input: &str) -> TurnOutcome {
        SESSION_TURNS.click();
        self.history.push_user(user_input);

        let window = self.history.window(self.config.max_pairs);
        SESSION_WINDOW_SIZE.add(window.len() as f64);
        let request =
            CompletionRequest::new(self.config.model.clone(), window, self.config.temperature);

        match self.backend.complete(&request).await {
            Ok(reply) => {
                self.history.push_assistant(reply.clone());
                TurnOutcome::Reply(reply)
            }
            Err(err) => {
                SESSION_TURN_ERRORS.click();
                self.history.push_assistant(format!("(Error: {err})"));
                TurnOutcome::Failed(err)
            }
        }
    }

    /// Dispatches one line of input.
    ///
    /// # Errors
    ///
    /// Only failures outside the conversation are returned, such as a
    /// transcript that cannot be written. Failed chat turns are not errors.
    pub async fn handle_line(&mut self, line: &str, renderer: &mut dyn Renderer) -> Result<Control> {
        match classify(line) {
            Input::Empty => Ok(Control::Continue),
            Input::Command(command) => self.apply_command(command, renderer),
            Input::Chat(text) => {
                match self.send(&text).await {
                    TurnOutcome::Reply(reply) => renderer.print_reply(&reply),
                    TurnOutcome::Failed(err) => renderer.print_turn_error(&err.to_string()),
                }
                Ok(Control::Continue)
            }
        }
    }

    /// Reads and dispatches lines until a quit command, end of input, or interrupt.
    pub async fn run(
        &mut self,
        input: &mut dyn LineSource,
        renderer: &mut dyn Renderer,
    ) -> Result<()> {
        loop {
            let Some(line) = input.read_line(PROMPT)? else {
                renderer.print_info(&format!("\n{FAREWELL}"));
                return Ok(());
            };
            if self.handle_line(&line, renderer).await? == Control::Quit {
                return Ok(());
            }
        }
    }

    fn apply_command(
        &mut self,
        command: ChatCommand,
        renderer: &mut dyn Renderer,
    ) -> Result<Control> {
        match command {
            ChatCommand::Help => renderer.print_info(help_text()),
            ChatCommand::Reset => {
                self.reset();
                renderer.print_info("History cleared (system prompt kept).");
            }
            ChatCommand::Save(path) => {
                let saved = self.save_transcript(path.as_deref().map(Path::new))?;
                renderer.print_info(&format!("Saved transcript to: {}", saved.display()));
            }
            ChatCommand::Quit => {
                renderer.print_info(FAREWELL);
                return Ok(Control::Quit);
            }
            ChatCommand::Unknown(command) => {
                renderer.print_error(&format!("Unknown command: {command}. Type :help"));
            }
        }
        Ok(Control::Continue)
    }
}
