//! tracing-subscriber setup for the binaries.

use tracing_subscriber::EnvFilter;

/// Filter directive for the given verbosity flags. `quiet` wins over
/// `verbose`.
pub fn default_directive(verbose: bool, quiet: bool) -> &'static str {
    if quiet {
        "warn"
    } else if verbose {
        "debug"
    } else {
        "info"
    }
}

/// Install a stderr subscriber. `RUST_LOG` overrides the flag-derived
/// default; stdout is left for the world stream.
pub fn setup_logging(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(default_directive(false, false), "info");
        assert_eq!(default_directive(true, false), "debug");
        assert_eq!(default_directive(false, true), "warn");
        assert_eq!(default_directive(true, true), "warn");
    }
}
