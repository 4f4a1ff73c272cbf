//! On-device model runtime.
//!
//! Models are downloaded and executed by a local Ollama server; this module
//! only drives it over HTTP.

mod generator;
mod ndjson;
mod ollama;

pub use generator::{
    ChatMessage, GenerateRequest, Prompt, PullStatus, SamplingParams, TextGenerator,
    strip_echoed_prompt,
};
pub use ollama::{LocalError, OllamaClient};
