pub mod catalog;
pub mod client;
pub mod config;
pub mod history;
pub mod prompts;

pub use catalog::ModelCatalog;
pub use client::{ChatBackend, HttpChatClient};
pub use config::LlmConfig;
pub use history::History;
