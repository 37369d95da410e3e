use thiserror::Error;

/// Message relayed when the provider never answered.
pub const NO_RESPONSE_MESSAGE: &str = "No response from the REST Countries API";

/// Message relayed when the outbound request could not be built or sent.
pub const REQUEST_SETUP_MESSAGE: &str = "Error making request to the API";

/// Prompt shown when a search is submitted with a blank query.
pub const EMPTY_QUERY_PROMPT: &str = "Please enter a country name.";

/// Notification shown when a search fails for any reason after dispatch.
pub const SEARCH_FAILED_NOTICE: &str =
    "There was an error fetching the country information. Please try again.";

#[derive(Error, Debug)]
pub enum CountryError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The provider answered with a non-success status. The body is kept
    /// byte-for-byte so the proxy can relay it.
    #[error("Upstream error ({status})")]
    Upstream {
        status: u16,
        content_type: Option<String>,
        body: Vec<u8>,
    },

    #[error("{msg}: {0}", msg = NO_RESPONSE_MESSAGE)]
    NoResponse(String),

    #[error("{msg}: {0}", msg = REQUEST_SETUP_MESSAGE)]
    RequestSetup(String),

    #[error("{msg}", msg = EMPTY_QUERY_PROMPT)]
    EmptyQuery,

    #[error("Country name is too long ({len} characters, max {max})")]
    QueryTooLong { len: usize, max: usize },

    #[error("A search is already in progress")]
    SearchInFlight,

    /// The proxy answered the client with a non-success status.
    #[error("HTTP status {status}: {body}")]
    Lookup { status: u16, body: String },

    #[error("Malformed country record: missing or invalid `{field}`")]
    MalformedRecord { field: &'static str },

    #[error("{0}")]
    Application(String),
}

pub type Result<T> = std::result::Result<T, CountryError>;

/// Logs a fatal error and exits the process with code 1.
///
/// This function never returns (`-> !`). It is intended for unrecoverable
/// errors during initialization or command execution.
pub fn handle_fatal(err: CountryError) -> ! {
    tracing::error!("Fatal error: {}", err);
    std::process::exit(1)
}

/// Maps a `CountryError` to user-facing CLI output.
///
/// Search failures get the generic notice plus the underlying detail so the
/// operator can tell a 404 from a dead proxy.
pub fn handle_command_error(err: &CountryError) {
    use crate::output;

    match err {
        CountryError::EmptyQuery => {
            output::warning(EMPTY_QUERY_PROMPT);
        }
        CountryError::SearchInFlight => {
            output::warning("A search is already running. Wait for it to finish.");
        }
        CountryError::QueryTooLong { .. } => {
            output::error(&format!("{}", err));
        }
        CountryError::Lookup { .. }
        | CountryError::Http(_)
        | CountryError::Json(_)
        | CountryError::MalformedRecord { .. } => {
            output::error(SEARCH_FAILED_NOTICE);
            output::hint(&format!("Details: {}", err));
        }
        CountryError::Config(msg) => {
            output::error(&format!("Configuration error: {}", msg));
            output::hint("Check the COUNTRIES_* environment variables and command flags.");
        }
        CountryError::Io(e) => {
            output::error(&format!("IO error: {}", e));
        }
        _ => {
            output::error(&format!("{}", err));
        }
    }
}
