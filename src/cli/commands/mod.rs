//! Subcommand implementations.

/// Terminal chat command handler.
pub mod chat;

/// Configure command handler.
pub mod configure;

/// Web chat widget command handler.
pub mod serve;

/// Translation command handler.
pub mod translate;
