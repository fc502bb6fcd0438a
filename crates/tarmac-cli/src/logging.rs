//! Log subscriber setup.

use tracing_subscriber::EnvFilter;

/// Install a stderr subscriber filtered by `RUST_LOG`.
///
/// Falls back to `info`, or `debug` with `--verbose`.
pub fn init(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
