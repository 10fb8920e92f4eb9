//! Command parsing for the chat application.
//!
//! Lines that start with `:` control the session and are never sent to the
//! endpoint.

/// The character that introduces a session command.
pub const COMMAND_SIGIL: char = ':';

/// A parsed chat command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    /// Display help information.
    Help,

    /// Clear the conversation history, keeping the system prompt.
    Reset,

    /// Save the transcript, to the given path or a timestamped default.
    Save(Option<String>),

    /// Exit the chat application.
    Quit,

    /// A sigil-prefixed token that names no command.
    Unknown(String),
}

/// What a line of input amounts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Blank input; nothing happens.
    Empty,

    /// A session command.
    Command(ChatCommand),

    /// Text to send to the model.
    Chat(String),
}

/// Classifies a line of user input.
///
/// The line is trimmed first; chat text is returned trimmed.
pub fn classify(line: &str) -> Input {
    let line = line.trim();
    if line.is_empty() {
        return Input::Empty;
    }
    match parse_command(line) {
        Some(command) => Input::Command(command),
        None => Input::Chat(line.to_string()),
    }
}

/// Parses user input for commands.
///
/// Returns `Some(ChatCommand)` if the input starts with `:`,
/// or `None` if it should be treated as a regular message.
///
/// # Examples
///
/// ```
/// # use soonerchat::chat::{ChatCommand, parse_command};
/// assert_eq!(parse_command(":q"), Some(ChatCommand::Quit));
/// assert_eq!(parse_command(":save chat.txt"), Some(ChatCommand::Save(Some("chat.txt".to_string()))));
/// assert!(parse_command("Hello, SpongeBob!").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    let input = input.trim();
    let rest = input.strip_prefix(COMMAND_SIGIL)?;

    let (command, argument) = match rest.split_once(char::is_whitespace) {
        Some((command, argument)) => (command, Some(argument.trim())),
        None => (rest, None),
    };
    let command = command.to_lowercase();
    let argument = argument.filter(|s| !s.is_empty());

    let result = match command.as_str() {
        "help" => ChatCommand::Help,
        "reset" => ChatCommand::Reset,
        "save" => ChatCommand::Save(argument.map(|s| s.to_string())),
        "quit" | "exit" | "q" => ChatCommand::Quit,
        _ => ChatCommand::Unknown(format!("{COMMAND_SIGIL}{command}")),
    };

    Some(result)
}

/// Returns help text describing available commands.
pub fn help_text() -> &'static str {
    r#"Commands:
  :help                Show this help
  :reset               Clear history (keep system prompt)
  :save [path]         Save transcript to a file (txt)
  :quit / :q / :exit   Exit the chatbot"#
}
