mod client;
mod dispatcher;
mod language;
mod prompt;
mod response;
mod strategy;

pub use client::{ApiClient, ApiError, TranslationRequest};
pub use dispatcher::{Dispatcher, Interaction, Outcome};
pub use language::{
    SUPPORTED_LANGUAGES, pick_language, print_language_menu, print_languages, resolve_language,
};
pub use prompt::{SYSTEM_PROMPT_TEMPLATE, build_system_prompt};
pub use response::extract_translation;
pub use strategy::{
    Availability, Confirmation, LOCAL_CONFIRMATIONS, LocalModelStrategy, RemoteApiStrategy,
    TranslationStrategy,
};
