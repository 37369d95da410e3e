/// Creates the root clap Command with global `--verbose` and `--json` flags.
///
/// The `--verbose` / `-v` flag enables debug logging across all subcommands.
/// When combined with `--json`, verbose output is suppressed to keep JSON clean.
pub fn create_root_command() -> clap::Command {
    clap::Command::new("countries")
        .about("Country lookup proxy and client")
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(clap::ArgAction::SetTrue)
                .help("Enable verbose output"),
        )
        .arg(
            clap::Arg::new("json")
                .long("json")
                .global(true)
                .action(clap::ArgAction::SetTrue)
                .help("Output in JSON format"),
        )
}

/// Returns whether verbose mode is active based on parsed matches.
///
/// Verbose is suppressed when `--json` is also set, to keep JSON output clean.
pub fn is_verbose(matches: &clap::ArgMatches) -> bool {
    let verbose = matches.get_flag("verbose");
    let json = matches.get_flag("json");
    verbose && !json
}

/// Returns whether JSON output was requested.
pub fn is_json(matches: &clap::ArgMatches) -> bool {
    matches.get_flag("json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_command_has_verbose_flag() {
        let cmd = create_root_command();
        let matches = cmd.try_get_matches_from(["countries", "--verbose"]).unwrap();
        assert!(matches.get_flag("verbose"));
    }

    #[test]
    fn test_root_command_has_json_flag() {
        let cmd = create_root_command();
        let matches = cmd.try_get_matches_from(["countries", "--json"]).unwrap();
        assert!(is_json(&matches));
    }

    #[test]
    fn test_verbose_suppressed_with_json() {
        let cmd = create_root_command();
        let matches = cmd
            .try_get_matches_from(["countries", "--verbose", "--json"])
            .unwrap();
        assert!(!is_verbose(&matches));
    }

    #[test]
    fn test_short_verbose_flag() {
        let cmd = create_root_command();
        let matches = cmd.try_get_matches_from(["countries", "-v"]).unwrap();
        assert!(is_verbose(&matches));
    }

    #[test]
    fn test_no_flags_not_verbose() {
        let cmd = create_root_command();
        let matches = cmd.try_get_matches_from(["countries"]).unwrap();
        assert!(!is_verbose(&matches));
        assert!(!is_json(&matches));
    }
}
