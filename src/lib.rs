// Public modules
pub mod chat;
pub mod client;
pub mod client_logger;
pub mod error;
pub mod history;
pub mod observability;
pub mod transcript;
pub mod types;

// Re-exports
pub use client::{CompletionBackend, SoonerAi};
pub use client_logger::ClientLogger;
pub use error::{Error, Result, TurnError};
pub use history::{History, window};
pub use observability::register_biometrics;
pub use types::*;
