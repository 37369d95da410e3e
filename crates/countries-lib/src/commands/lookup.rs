//! Country lookup command.
//!
//! `lookup NAME` runs one search through the proxy and prints the result.
//! Without a name it reads one query per line from stdin, keeping the last
//! successful result on display across failed searches.

use clap::{Arg, ArgMatches, Command};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::config::AppConfig;
use crate::errors::{handle_command_error, Result};
use crate::output;
use crate::presenter::{GiniYearPolicy, NativeNamePolicy};
use crate::render;
use crate::session::{SearchOutcome, SearchSession};

/// Build the `lookup` clap command.
pub fn lookup_command() -> Command {
    Command::new("lookup")
        .about("Look up a country by name")
        .aliases(["search", "find"])
        .arg(
            Arg::new("name")
                .num_args(1..)
                .help("Country name; words are joined with spaces. Reads names from stdin when omitted"),
        )
        .arg(
            Arg::new("proxy-url")
                .long("proxy-url")
                .help("Lookup proxy base URL (overrides COUNTRIES_PROXY_URL)"),
        )
        .arg(
            Arg::new("native-lang")
                .long("native-lang")
                .help("Language code to prefer for the native name (overrides COUNTRIES_NATIVE_LANG)"),
        )
        .arg(
            Arg::new("gini-year")
                .long("gini-year")
                .help("Gini year to show, or 'latest' (overrides COUNTRIES_GINI_YEAR)"),
        )
}

/// Apply command-line overrides to the environment config.
pub fn configure(matches: &ArgMatches, mut config: AppConfig) -> Result<AppConfig> {
    if let Some(url) = matches.get_one::<String>("proxy-url") {
        config.proxy_url = url.clone();
    }
    if let Some(lang) = matches.get_one::<String>("native-lang") {
        config.present.native_name = NativeNamePolicy::Prefer(lang.clone());
    }
    if let Some(year) = matches.get_one::<String>("gini-year") {
        config.present.gini_year = GiniYearPolicy::parse(year)?;
    }
    config.validate()?;
    Ok(config)
}

/// The query given on the command line, if any.
pub fn query_from_args(matches: &ArgMatches) -> Option<String> {
    matches
        .get_many::<String>("name")
        .map(|words| words.map(String::as_str).collect::<Vec<_>>().join(" "))
}

/// Handle the `lookup` command.
pub async fn handle_lookup(matches: &ArgMatches, config: &AppConfig, json: bool) -> Result<()> {
    let config = configure(matches, config.clone())?;
    let session = SearchSession::from_config(&config)?;

    match query_from_args(matches) {
        Some(query) => search_and_print(&session, &query, &config, json).await,
        None => interactive(&session, &config, json).await,
    }
}

async fn search_and_print(
    session: &SearchSession,
    query: &str,
    config: &AppConfig,
    json: bool,
) -> Result<()> {
    let outcome = session.search(query).await?;
    let maps_api_key = config.maps_api_key.as_deref();
    if json {
        println!("{}", json_output(&outcome, maps_api_key)?);
        return Ok(());
    }
    match outcome {
        SearchOutcome::Displayed(record) => {
            output::success(&render::heading(&record));
            for (label, value) in render::rows(&record, maps_api_key) {
                output::field(&label, &value);
            }
        }
        SearchOutcome::Cleared => {
            output::hint("No country matched; display cleared.");
        }
    }
    Ok(())
}

/// What `--json` writes to stdout for one search: the record, or `null`
/// once the display is cleared.
fn json_output(outcome: &SearchOutcome, maps_api_key: Option<&str>) -> Result<String> {
    match outcome {
        SearchOutcome::Displayed(record) => render::to_json(record, maps_api_key),
        SearchOutcome::Cleared => Ok("null".to_string()),
    }
}

async fn interactive(session: &SearchSession, config: &AppConfig, json: bool) -> Result<()> {
    if !json {
        output::info("Enter a country name per line (Ctrl+D to quit).");
    }
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if let Err(e) = search_and_print(session, &line, config, json).await {
            handle_command_error(&e);
            if let Some(current) = session.current().await {
                tracing::debug!(displayed = %current.title, "Keeping previous result");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::country::CountryRecord;
    use crate::presenter::{present, PresentPolicy};
    use serde_json::{json, Value};

    #[test]
    fn test_multi_word_name_is_joined() {
        let matches = lookup_command()
            .try_get_matches_from(["lookup", "united", "states"])
            .unwrap();
        assert_eq!(query_from_args(&matches).as_deref(), Some("united states"));
    }

    #[test]
    fn test_no_name_means_interactive() {
        let matches = lookup_command().try_get_matches_from(["lookup"]).unwrap();
        assert!(query_from_args(&matches).is_none());
    }

    #[test]
    fn test_overrides_apply() {
        let matches = lookup_command()
            .try_get_matches_from([
                "lookup",
                "--proxy-url",
                "http://127.0.0.1:4000",
                "--native-lang",
                "fra",
                "--gini-year",
                "latest",
                "France",
            ])
            .unwrap();
        let config = configure(&matches, AppConfig::default()).unwrap();
        assert_eq!(config.proxy_url, "http://127.0.0.1:4000");
        assert_eq!(config.present.native_name, NativeNamePolicy::Prefer("fra".into()));
        assert_eq!(config.present.gini_year, GiniYearPolicy::Latest);
    }

    #[test]
    fn test_bad_gini_year_rejected() {
        let matches = lookup_command()
            .try_get_matches_from(["lookup", "--gini-year", "recent", "Peru"])
            .unwrap();
        assert!(configure(&matches, AppConfig::default()).is_err());
    }

    #[test]
    fn test_json_output_is_pure_json() {
        let record = CountryRecord::new(json!({
            "name": { "common": "Peru", "official": "Republic of Peru" },
            "latlng": [-10.0, -76.0],
            "area": 1285216.0
        }));
        let displayed = SearchOutcome::Displayed(present(&record, &PresentPolicy::default()).unwrap());

        let shown: Value = serde_json::from_str(&json_output(&displayed, None).unwrap()).unwrap();
        assert_eq!(shown["title"], "Peru");

        let cleared = json_output(&SearchOutcome::Cleared, None).unwrap();
        assert_eq!(serde_json::from_str::<Value>(&cleared).unwrap(), Value::Null);
    }

    #[test]
    fn test_lookup_aliases() {
        let cmd = lookup_command();
        let aliases: Vec<&str> = cmd.get_all_aliases().collect();
        assert!(aliases.contains(&"search"));
    }
}
