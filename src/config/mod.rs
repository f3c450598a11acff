#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command, OutputFormat};
pub use toml_config::{
    CardSelectors, DetailSelectors, HttpConfig, ProviderConfig, ScoutConfig, ServerConfig,
    QUERY_PLACEHOLDER,
};
