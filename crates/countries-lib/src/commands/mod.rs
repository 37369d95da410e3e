pub mod lookup;
#[cfg(feature = "http-server")]
pub mod serve;

use clap::ArgMatches;

use crate::config::AppConfig;
use crate::errors::{CountryError, Result};

/// Attach every subcommand to the root command.
pub fn register_commands(root: clap::Command) -> clap::Command {
    let root = root.subcommand(lookup::lookup_command());
    #[cfg(feature = "http-server")]
    let root = root.subcommand(serve::serve_command());
    root
}

/// Dispatch a parsed subcommand by name.
pub async fn dispatch_command(
    name: &str,
    matches: &ArgMatches,
    config: &AppConfig,
    json: bool,
) -> Result<()> {
    match name {
        "lookup" => lookup::handle_lookup(matches, config, json).await,
        #[cfg(feature = "http-server")]
        "serve" => serve::handle_serve(matches, config).await,
        other => Err(CountryError::Application(format!("Unknown command: {other}"))),
    }
}
