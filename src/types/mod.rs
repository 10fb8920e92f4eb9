// Public modules
pub mod completion_request;
pub mod completion_response;
pub mod message;
pub mod role;
pub mod usage;

// Re-exports
pub use completion_request::CompletionRequest;
pub use completion_response::{Choice, ChoiceMessage, CompletionResponse};
pub use message::Message;
pub use role::Role;
pub use usage::Usage;
