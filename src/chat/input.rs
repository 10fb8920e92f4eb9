//! Line input for the session loop.

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::error::{Error, Result};

/// A source of input lines.
pub trait LineSource {
    /// Reads the next line, showing `prompt`.
    ///
    /// Returns `Ok(None)` at end of input or when the user interrupts; both
    /// end the session normally.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// Interactive input backed by a `rustyline` editor.
pub struct EditorSource {
    editor: DefaultEditor,
}

impl EditorSource {
    /// Creates an editor on the controlling terminal.
    pub fn new() -> Result<Self> {
        let editor = DefaultEditor::new()
            .map_err(|err| Error::input(format!("failed to start line editor: {err}"), None))?;
        Ok(Self { editor })
    }
}

impl LineSource for EditorSource {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(Error::input(err.to_string(), None)),
        }
    }
}

impl<I> LineSource for I
where
    I: Iterator<Item = String>,
{
    fn read_line(&mut self, _prompt: &str) -> Result<Option<String>> {
        Ok(self.next())
    }
}
