// countries-lib: country lookup proxy, resolver and terminal client

// Always-available modules
pub mod cli;
pub mod commands;
pub mod config;
pub mod country;
pub mod errors;
pub mod http_client;
pub mod logger;
pub mod output;
pub mod presenter;
pub mod provider;
pub mod render;
pub mod resolver;
pub mod session;
pub mod signal;

// Feature-gated modules
#[cfg(feature = "http-server")]
pub mod server;
