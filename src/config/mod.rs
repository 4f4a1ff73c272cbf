mod manager;

pub use manager::{
    ApiConfig, ChatConfig, ConfigFile, ConfigManager, Defaults, LocalConfig, ResolveOptions,
    ResolvedConfig, resolve_config,
};
