mod manager;

pub use manager::{
    ConfigFile, ConfigManager, ResolveOptions, ResolvedConfig, ToolsConfig, VsConfig,
    resolve_config, validate_alias_name,
};
