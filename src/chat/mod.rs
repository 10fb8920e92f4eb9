//! Chat application module for interactive conversations.
//!
//! This module provides the REPL behind the `soonerchat` binary. It supports:
//!
//! - A bounded history window sent with every message
//! - `:`-prefixed commands for session control
//! - Plain-text transcripts
//! - Configurable model, system prompt, and parameters
//!
//! # Architecture
//!
//! - [`config`]: CLI argument parsing and configuration
//! - [`session`]: Conversation state, dispatch, and the read loop
//! - [`commands`]: Command parsing
//! - [`render`]: Terminal output
//! - [`input`]: Line input

mod commands;
mod config;
mod env_file;
mod input;
mod render;
mod session;

pub use commands::{COMMAND_SIGIL, ChatCommand, Input, classify, help_text, parse_command};
pub use config::{
    API_KEY_VAR, BASE_URL_VAR, ChatArgs, ChatConfig, DEFAULT_MAX_PAIRS, DEFAULT_MODEL,
    DEFAULT_SYSTEM_PROMPT, DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT_SECS, MODEL_VAR,
};
pub use env_file::{ENV_FILE_NAME, EnvFile, default_env_path};
pub use input::{EditorSource, LineSource};
pub use render::{ASSISTANT_NAME, PlainTextRenderer, Renderer};
pub use session::{ChatSession, Control, FAREWELL, PROMPT, TurnOutcome};
