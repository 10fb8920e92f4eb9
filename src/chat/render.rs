//! Output rendering for the chat application.
//!
//! This module provides a trait-based rendering abstraction so the session
//! can be driven against the terminal or against a recorder in tests.

use std::io::{self, Stdout, Write};

/// ANSI escape code for bold text (used for the banner).
const ANSI_BOLD: &str = "\x1b[1m";

/// ANSI escape code for dim text (used for informational messages).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// ANSI escape code for yellow text (used for the assistant label).
const ANSI_YELLOW: &str = "\x1b[33m";

/// ANSI escape code for red text (used for errors).
const ANSI_RED: &str = "\x1b[31m";

/// Name the assistant replies under.
pub const ASSISTANT_NAME: &str = "SpongeBob";

/// Trait for rendering chat output.
pub trait Renderer: Send {
    /// Print the startup banner.
    fn print_banner(&mut self, model: &str, endpoint: &str);

    /// Print a reply from the model.
    fn print_reply(&mut self, text: &str);

    /// Print the failure of a chat turn in place of a reply.
    fn print_turn_error(&mut self, error: &str);

    /// Print an error that is not part of the conversation.
    fn print_error(&mut self, error: &str);

    /// Print an informational message.
    fn print_info(&mut self, info: &str);
}

/// Plain text renderer with optional ANSI styling.
pub struct PlainTextRenderer {
    stdout: Stdout,
    use_color: bool,
}

impl PlainTextRenderer {
    /// Creates a new PlainTextRenderer with ANSI colors enabled.
    pub fn new() -> Self {
        Self::with_color(true)
    }

    /// Creates a new PlainTextRenderer with specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self {
            stdout: io::stdout(),
            use_color,
        }
    }

    fn flush(&mut self) {
        let _ = self.stdout.flush();
    }

    fn label(&self, label: &str, color: &str) -> String {
        if self.use_color {
            format!("{color}{label}{ANSI_RESET}")
        } else {
            label.to_string()
        }
    }
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for PlainTextRenderer {
    fn print_banner(&mut self, model: &str, endpoint: &str) {
        let rule = "=".repeat(72);
        println!("{rule}");
        println!(
            "  {}",
            self.label(
                "SpongeBob CLI Chatbot  -  OpenAI-compatible Chat Completions",
                ANSI_BOLD
            )
        );
        println!("  Model: {model} | Endpoint: {endpoint}");
        println!("  Commands: :help  :reset  :save [path]  :quit");
        println!("{rule}");
        self.flush();
    }

    fn print_reply(&mut self, text: &str) {
        let label = self.label(&format!("{ASSISTANT_NAME}:"), ANSI_YELLOW);
        println!("{label} {text}");
        self.flush();
    }

    fn print_turn_error(&mut self, error: &str) {
        let label = self.label(&format!("{ASSISTANT_NAME} (error):"), ANSI_RED);
        println!("{label} {error}");
        self.flush();
    }

    fn print_error(&mut self, error: &str) {
        let label = self.label("Error:", ANSI_RED);
        eprintln!("{label} {error}");
    }

    fn print_info(&mut self, info: &str) {
        if self.use_color {
            println!("{ANSI_DIM}{info}{ANSI_RESET}");
        } else {
            println!("{info}");
        }
        self.flush();
    }
}
