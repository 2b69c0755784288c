use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "bet_terminal=info";

/// Installs a stderr subscriber for the command-line binaries. `RUST_LOG`
/// overrides the default filter.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
