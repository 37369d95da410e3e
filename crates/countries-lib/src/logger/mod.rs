use tracing_subscriber::{fmt, EnvFilter};

/// Build the log filter.
///
/// `RUST_LOG` wins when it is set and parses. Otherwise `debug` selects the
/// DEBUG level and anything else INFO.
pub fn build_filter(debug: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if debug {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    })
}

/// Initialize the tracing subscriber with timestamp, level, and structured fields.
///
/// Safe to call more than once; later calls are ignored.
pub fn init(debug: bool) {
    let _ = fmt()
        .with_env_filter(build_filter(debug))
        .with_timer(fmt::time::SystemTime)
        .with_level(true)
        .with_target(true)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_does_not_panic() {
        init(false);
        init(true);
    }

    #[test]
    fn test_build_filter_does_not_panic() {
        let _ = build_filter(true);
        let _ = build_filter(false);
    }
}
