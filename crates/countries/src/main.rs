use countries_lib::cli::{create_root_command, is_json, is_verbose};
use countries_lib::commands::{dispatch_command, register_commands};
use countries_lib::config::AppConfig;
use countries_lib::errors::{handle_command_error, handle_fatal, CountryError};

#[tokio::main]
async fn main() {
    // Step 1: Parse arguments
    let root = register_commands(create_root_command());
    let matches = root.get_matches();

    // Global flags are propagated down, so read them from the leaf command
    let leaf = matches.subcommand().map(|(_, m)| m).unwrap_or(&matches);
    let json = is_json(leaf);

    // Step 2: Initialize logger
    countries_lib::logger::init(is_verbose(leaf));

    // Step 3: Build configuration from the environment, once
    let config = AppConfig::from_env().unwrap_or_else(|e| handle_fatal(e));

    // Step 4: Dispatch to subcommand handler
    match matches.subcommand() {
        Some((name, sub_matches)) => {
            tracing::debug!(command = name, "Executing command");
            if let Err(e) = dispatch_command(name, sub_matches, &config, json).await {
                handle_command_error(&e);
                std::process::exit(1);
            }
        }
        None => {
            let mut cmd = register_commands(create_root_command());
            if let Err(e) = cmd.print_help() {
                handle_fatal(CountryError::Application(format!("Failed to print help: {e}")));
            }
        }
    }
}
