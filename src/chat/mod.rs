//! Conversational demo on top of a local model.
//!
//! The same [`ChatEngine`] drives two front ends: a terminal REPL with
//! slash commands and a browser widget served over HTTP.

/// Slash command parsing and autocomplete.
pub mod command;
mod engine;
mod history;
mod session;
mod ui;
pub mod web;

pub use engine::ChatEngine;
pub use history::{ChatHistory, Turn, extract_reply};
pub use session::ChatSession;
pub use web::ChatServerState;
