//! HTTP server command.
//!
//! Provides the `serve` command (aliases: `http`, `server`) for running the
//! lookup proxy until SIGINT/SIGTERM.

use std::sync::Arc;

use clap::{Arg, ArgMatches, Command};

use crate::config::AppConfig;
use crate::errors::{CountryError, Result};
use crate::server::config::{ServerConfig, DEFAULT_PORT};
use crate::server::{start_server, AppState};
use crate::signal::SignalHandler;

/// Build the `serve` clap command.
pub fn serve_command() -> Command {
    Command::new("serve")
        .about("Run the country lookup proxy")
        .aliases(["http", "server"])
        .arg(Arg::new("host").long("host").default_value("0.0.0.0").help("Host to bind HTTP server to"))
        .arg(
            Arg::new("port")
                .long("port")
                .default_value(DEFAULT_PORT.to_string())
                .value_parser(clap::value_parser!(u16))
                .help("Port to run HTTP server on"),
        )
        .arg(
            Arg::new("provider-url")
                .long("provider-url")
                .help("Country data provider base URL (overrides COUNTRIES_PROVIDER_URL)"),
        )
}

/// Resolve the server and app config from parsed arguments.
pub fn configure(matches: &ArgMatches, mut config: AppConfig) -> Result<(ServerConfig, AppConfig)> {
    let host = matches
        .get_one::<String>("host")
        .cloned()
        .ok_or_else(|| CountryError::Config("missing --host".into()))?;
    let port = matches
        .get_one::<u16>("port")
        .copied()
        .ok_or_else(|| CountryError::Config("missing --port".into()))?;
    if let Some(url) = matches.get_one::<String>("provider-url") {
        config.provider_url = url.clone();
    }
    config.validate()?;

    let server = ServerConfig { port, host };
    server.validate()?;
    Ok((server, config))
}

/// Handle the `serve` command.
pub async fn handle_serve(matches: &ArgMatches, config: &AppConfig) -> Result<()> {
    let (server_config, config) = configure(matches, config.clone())?;
    tracing::info!(provider = %config.provider_url, "Starting lookup proxy");

    let state = Arc::new(AppState::from_config(&config)?);
    let handle = start_server(server_config, state).await?;

    let signal_handler = SignalHandler::new();
    let token = signal_handler.token();
    tokio::spawn(async move {
        signal_handler.listen().await;
    });

    token.cancelled().await;
    handle.shutdown().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_command_defaults() {
        let matches = serve_command().try_get_matches_from(["serve"]).unwrap();
        let (server, config) = configure(&matches, AppConfig::default()).unwrap();
        assert_eq!(server.host, "0.0.0.0");
        assert_eq!(server.port, 3001);
        assert_eq!(config.provider_url, crate::config::DEFAULT_PROVIDER_URL);
    }

    #[test]
    fn test_serve_overrides() {
        let matches = serve_command()
            .try_get_matches_from([
                "serve",
                "--host",
                "127.0.0.1",
                "--port",
                "8080",
                "--provider-url",
                "http://127.0.0.1:9000/v3.1",
            ])
            .unwrap();
        let (server, config) = configure(&matches, AppConfig::default()).unwrap();
        assert_eq!(server.addr(), "127.0.0.1:8080");
        assert_eq!(config.provider_url, "http://127.0.0.1:9000/v3.1");
    }

    #[test]
    fn test_invalid_port_rejected_by_parser() {
        assert!(serve_command()
            .try_get_matches_from(["serve", "--port", "http"])
            .is_err());
    }

    #[test]
    fn test_invalid_provider_url_rejected() {
        let matches = serve_command()
            .try_get_matches_from(["serve", "--provider-url", "nope"])
            .unwrap();
        assert!(configure(&matches, AppConfig::default()).is_err());
    }

    #[test]
    fn test_serve_aliases() {
        let cmd = serve_command();
        let aliases: Vec<&str> = cmd.get_all_aliases().collect();
        assert!(aliases.contains(&"http"));
        assert!(aliases.contains(&"server"));
    }
}
