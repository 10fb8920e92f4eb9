//! Conversation history and the window sent to the endpoint.
//!
//! [`History`] is the ground truth of a session: the system directive at
//! index 0 followed by every user and assistant message in the order they
//! were appended. [`window`] computes the bounded view that is actually
//! submitted for a completion.

use crate::types::{Message, Role};

/// The ordered message store of one chat session.
///
/// The first message is always the system directive. It is only ever
/// replaced by [`History::reset`], which restores the original directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    messages: Vec<Message>,
}

impl History {
    /// Creates a history holding only the system directive.
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::system(system_prompt)],
        }
    }

    /// Appends one message at the tail.
    pub fn append(&mut self, role: Role, content: impl Into<String>) {
        self.messages.push(Message::new(role, content));
    }

    /// Appends a user message.
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.append(Role::User, content);
    }

    /// Appends an assistant message.
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.append(Role::Assistant, content);
    }

    /// Drops everything but the system directive.
    pub fn reset(&mut self) {
        self.messages.truncate(1);
    }

    /// Returns an owned copy of every message; later appends do not show up in it.
    pub fn snapshot(&self) -> Vec<Message> {
        self.messages.clone()
    }

    /// Borrows every message in order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The system directive.
    pub fn system(&self) -> &Message {
        &self.messages[0]
    }

    /// Returns the number of messages, system directive included.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns true if nothing but the system directive is stored.
    pub fn is_empty(&self) -> bool {
        self.messages.len() <= 1
    }

    /// The bounded view of this history for `max_pairs` exchanges.
    pub fn window(&self, max_pairs: i64) -> Vec<Message> {
        window(&self.messages, max_pairs)
    }
}

/// Keeps the first message plus the last `2 * max_pairs` messages after it.
///
/// With `max_pairs <= 0` only the first message survives. Order is preserved
/// and the input is left untouched.
pub fn window(messages: &[Message], max_pairs: i64) -> Vec<Message> {
    let Some((system, body)) = messages.split_first() else {
        return Vec::new();
    };
    if max_pairs <= 0 {
        return vec![system.clone()];
    }
    let keep = usize::try_from(max_pairs)
        .unwrap_or(usize::MAX)
        .saturating_mul(2);
    let start = body.len().saturating_sub(keep);
    let mut windowed = Vec::with_capacity(1 + body.len() - start);
    windowed.push(system.clone());
    windowed.extend_from_slice(&body[start..]);
    windowed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conversation(turns: usize) -> History {
        let mut history = History::new("be cheerful");
        for i in 0..turns {
            history.push_user(format!("q{i}"));
            history.push_assistant(format!("a{i}"));
        }
        history
    }

    fn contents(messages: &[Message]) -> Vec<&str> {
        messages.iter().map(|m| m.content.as_str()).collect()
    }

    #[test]
    fn new_history_holds_system_only() {
        let history = History::new("be cheerful");
        assert_eq!(history.len(), 1);
        assert!(history.is_empty());
        assert_eq!(history.system(), &Message::system("be cheerful"));
    }

    #[test]
    fn non_positive_pairs_keep_system_only() {
        let history = conversation(3);
        for max_pairs in [0, -1, -100, i64::MIN] {
            let windowed = history.window(max_pairs);
            assert_eq!(windowed, vec![Message::system("be cheerful")]);
        }
    }

    #[test]
    fn keeps_most_recent_pairs_in_order() {
        let history = conversation(5);
        let windowed = history.window(2);
        assert_eq!(contents(&windowed), vec!["be cheerful", "q3", "a3", "q4", "a4"]);
    }

    #[test]
    fn short_history_is_kept_whole() {
        let history = conversation(2);
        assert_eq!(history.window(8), history.snapshot());
        assert_eq!(history.window(i64::MAX), history.snapshot());
    }

    #[test]
    fn window_size_is_min_of_body_and_twice_pairs() {
        for turns in 0..6 {
            let history = conversation(turns);
            let body = history.len() - 1;
            for k in 1..5i64 {
                let windowed = history.window(k);
                assert_eq!(windowed.len() - 1, body.min(2 * k as usize));
                assert_eq!(windowed[0].role, Role::System);
                let tail = &history.messages()[history.len() - (windowed.len() - 1)..];
                assert_eq!(&windowed[1..], tail);
            }
        }
    }

    #[test]
    fn odd_count_drops_oldest_user_message() {
        let mut history = History::new("sys");
        history.push_user("hi");
        history.push_assistant("reply1");
        history.push_user("bye");
        assert_eq!(contents(&history.window(1)), vec!["sys", "reply1", "bye"]);
    }

    #[test]
    fn window_does_not_mutate() {
        let history = conversation(4);
        let before = history.snapshot();
        let _ = window(history.messages(), 1);
        assert_eq!(history.snapshot(), before);
    }

    #[test]
    fn empty_input_yields_empty_window() {
        assert!(window(&[], 3).is_empty());
    }

    #[test]
    fn reset_restores_system_directive() {
        let mut history = conversation(3);
        history.reset();
        assert_eq!(history.len(), 1);
        assert_eq!(history.system().content, "be cheerful");
        history.reset();
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn snapshot_is_detached() {
        let mut history = conversation(1);
        let snapshot = history.snapshot();
        history.push_user("later");
        assert_eq!(snapshot.len(), 3);
        assert_eq!(history.len(), 4);
    }

    #[test]
    fn error_placeholders_count_as_assistant_entries() {
        let mut history = History::new("sys");
        history.push_user("hi");
        history.push_assistant("(Error: HTTP 500: boom)");
        history.push_user("again");
        let windowed = history.window(1);
        assert_eq!(windowed[1].role, Role::Assistant);
        assert_eq!(windowed[2].content, "again");
    }
}
