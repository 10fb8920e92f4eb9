//! Plain-text transcripts of a conversation.
//!
//! Each message is written as `<Role>: <content>` followed by a blank line.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use time::OffsetDateTime;
use time::macros::format_description;

use crate::error::{Error, Result};
use crate::types::Message;

/// Prefix of generated transcript file names.
pub const DEFAULT_TRANSCRIPT_PREFIX: &str = "spongebob_chat";

/// Writes `messages` to `path` and returns the absolute path written.
///
/// A leading `~` expands to the home directory and missing parent
/// directories are created.
pub fn save_transcript(messages: &[Message], path: &Path) -> Result<PathBuf> {
    let path = resolve_path(path)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| {
            Error::io(
                format!("failed to create directory {}", parent.display()),
                err,
            )
        })?;
    }
    let file = File::create(&path).map_err(|err| {
        Error::io(
            format!("failed to create transcript file {}", path.display()),
            err,
        )
    })?;
    let mut writer = BufWriter::new(file);
    for message in messages {
        write!(writer, "{}: {}\n\n", message.role.label(), message.content)
            .map_err(|err| Error::io("failed to write transcript", err))?;
    }
    writer
        .flush()
        .map_err(|err| Error::io("failed to write transcript", err))?;
    tracing::debug!(path = %path.display(), messages = messages.len(), "transcript saved");
    Ok(path)
}

/// The file name used when `:save` is given no path, stamped with `now`.
pub fn transcript_file_name(now: OffsetDateTime) -> String {
    let stamp = now
        .format(format_description!(
            "[year][month][day]_[hour][minute][second]"
        ))
        .unwrap_or_else(|_| now.unix_timestamp().to_string());
    format!("{DEFAULT_TRANSCRIPT_PREFIX}_{stamp}.txt")
}

/// A transcript path in the working directory named after the current local time.
pub fn default_transcript_path() -> PathBuf {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    PathBuf::from(transcript_file_name(now))
}

fn resolve_path(path: &Path) -> Result<PathBuf> {
    let expanded = match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    };
    std::path::absolute(&expanded).map_err(|err| {
        Error::io(
            format!("failed to resolve transcript path {}", expanded.display()),
            err,
        )
    })
}
