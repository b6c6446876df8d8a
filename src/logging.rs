use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "siege_picker=info";

/// Install the global subscriber. Logs go to stderr so stdout only ever
/// carries menu frames. `RUST_LOG` overrides the default filter.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
