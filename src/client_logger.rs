//! Logging trait for completion client operations.
//!
//! This module provides the [`ClientLogger`] trait that allows users to capture
//! every request and outcome passing through the [`SoonerAi`](crate::SoonerAi)
//! client.

use crate::error::TurnError;
use crate::types::{CompletionRequest, CompletionResponse};

/// A trait for logging completion client operations.
///
/// # Example
///
/// ```rust,ignore
/// use soonerchat::{ClientLogger, CompletionRequest, CompletionResponse, TurnError};
/// use std::io::Write;
/// use std::sync::Mutex;
///
/// struct FileLogger {
///     file: Mutex<std::fs::File>,
/// }
///
/// impl ClientLogger for FileLogger {
///     fn log_request(&self, request: &CompletionRequest) {
///         let mut file = self.file.lock().unwrap();
///         writeln!(file, "Request: {}", serde_json::to_string(request).unwrap()).unwrap();
///     }
///
///     fn log_response(&self, response: &CompletionResponse) {
///         let mut file = self.file.lock().unwrap();
///         writeln!(file, "Response: {}", serde_json::to_string(response).unwrap()).unwrap();
///     }
///
///     fn log_error(&self, error: &TurnError) {
///         let mut file = self.file.lock().unwrap();
///         writeln!(file, "Error: {error}").unwrap();
///     }
/// }
/// ```
pub trait ClientLogger: Send + Sync {
    /// Log a request just before it is sent.
    fn log_request(&self, request: &CompletionRequest);

    /// Log a response that passed validation.
    fn log_response(&self, response: &CompletionResponse);

    /// Log a failed completion.
    ///
    /// Called once per failed call, whatever the failure kind.
    fn log_error(&self, error: &TurnError);
}
