//! Configuration types for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg` and resolves the
//! arguments, the process environment and `~/.soonerai.env` into a
//! [`ChatConfig`].

use std::path::PathBuf;
use std::time::Duration;

use arrrg_derive::CommandLine;

use crate::chat::env_file::{EnvFile, default_env_path};
use crate::client::DEFAULT_BASE_URL;
use crate::error::{Error, Result};

/// Default number of user/assistant pairs kept in the window.
pub const DEFAULT_MAX_PAIRS: i64 = 8;
/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.6;
/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gemma3:4b";

/// Default system prompt.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are SpongeBob SquarePants. Speak cheerfully with nautical puns, \
occasional 'barnacles!' and 'jellyfishing' references. Be upbeat, kind, \
and whimsical. Keep replies concise (1–5 sentences). Avoid harmful content.";

/// Environment variable holding the bearer credential.
pub const API_KEY_VAR: &str = "SOONERAI_API_KEY";
/// Environment variable overriding the base URL.
pub const BASE_URL_VAR: &str = "SOONERAI_BASE_URL";
/// Environment variable overriding the model.
pub const MODEL_VAR: &str = "SOONERAI_MODEL";

/// Command-line arguments for the soonerchat tool.
#[derive(CommandLine, Debug, Default, Eq, PartialEq)]
pub struct ChatArgs {
    /// How many prior user/assistant pairs to send with each message.
    #[arrrg(optional, "How many prior user/assistant pairs to keep (default: 8)", "N")]
    pub max_pairs: Option<i64>,

    /// Sampling temperature, parsed during resolution.
    #[arrrg(optional, "Sampling temperature (default: 0.6)", "TEMP")]
    pub temperature: Option<String>,

    /// System prompt override.
    #[arrrg(optional, "Override system prompt", "PROMPT")]
    pub system: Option<String>,

    /// Base URL override.
    #[arrrg(optional, "Override base URL (default from env)", "URL")]
    pub base_url: Option<String>,

    /// Model override.
    #[arrrg(optional, "Override model name (default from env)", "MODEL")]
    pub model: Option<String>,

    /// Request timeout in seconds.
    #[arrrg(optional, "Request timeout seconds (default: 60)", "SECS")]
    pub timeout: Option<u64>,

    /// Credentials file.
    #[arrrg(optional, "Env file with SOONERAI_* settings (default: ~/.soonerai.env)", "PATH")]
    pub env_file: Option<String>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,
}

/// Configuration for a chat session.
///
/// This struct holds the resolved configuration values after processing
/// command-line arguments and the environment with appropriate defaults.
#[derive(Clone, PartialEq)]
pub struct ChatConfig {
    /// Bearer credential for the endpoint.
    pub api_key: String,

    /// Base URL of the endpoint, without a trailing `/`.
    pub base_url: String,

    /// The model to use for generating responses.
    pub model: String,

    /// The system prompt that opens every conversation.
    pub system_prompt: String,

    /// Number of user/assistant pairs sent with each message; `<= 0` sends none.
    pub max_pairs: i64,

    /// Sampling temperature.
    pub temperature: f32,

    /// Request timeout.
    pub timeout: Duration,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values and no API key.
    pub fn new() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            max_pairs: DEFAULT_MAX_PAIRS,
            temperature: DEFAULT_TEMPERATURE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            use_color: true,
        }
    }

    /// Sets the API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the system prompt.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Sets the window size in pairs.
    pub fn with_max_pairs(mut self, max_pairs: i64) -> Self {
        self.max_pairs = max_pairs;
        self
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }

    /// Resolves arguments against the process environment and the env file.
    pub fn from_args(args: ChatArgs) -> Result<Self> {
        Self::resolve(args, |key| std::env::var(key).ok())
    }

    /// Resolves arguments with an explicit environment lookup.
    ///
    /// Precedence is flag, then `env`, then the env file, then the default.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when no API key is found, the base URL
    /// is empty, or a numeric setting is out of range. Returns an I/O error
    /// when the env file exists but cannot be read.
    pub fn resolve<F>(args: ChatArgs, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_path = args
            .env_file
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_else(default_env_path);
        let file = EnvFile::load(&env_path)?;
        let lookup = |key: &str| env(key).or_else(|| file.get(key).map(str::to_string));

        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                Error::configuration(
                    format!("Missing {API_KEY_VAR} in {}", env_path.display()),
                    Some(API_KEY_VAR.to_string()),
                )
            })?;

        let base_url = args
            .base_url
            .or_else(|| lookup(BASE_URL_VAR))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(Error::configuration(
                format!("Missing {BASE_URL_VAR} (expected '{DEFAULT_BASE_URL}')"),
                Some(BASE_URL_VAR.to_string()),
            ));
        }

        let model = args
            .model
            .filter(|model| !model.is_empty())
            .or_else(|| lookup(MODEL_VAR).filter(|model| !model.is_empty()))
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let system_prompt = args
            .system
            .filter(|prompt| !prompt.is_empty())
            .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string());

        let temperature = match args.temperature.as_deref().map(str::trim) {
            Some(raw) => raw.parse::<f32>().map_err(|_| {
                Error::configuration(
                    format!("temperature must be a number, got '{raw}'"),
                    Some("--temperature".to_string()),
                )
            })?,
            None => DEFAULT_TEMPERATURE,
        };
        if !temperature.is_finite() || temperature < 0.0 {
            return Err(Error::configuration(
                format!("temperature must be a non-negative number, got {temperature}"),
                Some("--temperature".to_string()),
            ));
        }

        let timeout_secs = args.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(Error::configuration(
                "timeout must be at least one second",
                Some("--timeout".to_string()),
            ));
        }

        Ok(ChatConfig {
            api_key,
            base_url,
            model,
            system_prompt,
            max_pairs: args.max_pairs.unwrap_or(DEFAULT_MAX_PAIRS),
            temperature,
            timeout: Duration::from_secs(timeout_secs),
            use_color: !args.no_color,
        })
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ChatConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("system_prompt", &self.system_prompt)
            .field("max_pairs", &self.max_pairs)
            .field("temperature", &self.temperature)
            .field("timeout", &self.timeout)
            .field("use_color", &self.use_color)
            .finish()
    }
}
