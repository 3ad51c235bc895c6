use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. `RUST_LOG` wins over `level`; `verbose` raises the
/// fallback to `debug`.
pub fn init(level: &str, verbose: bool) {
    let fallback = if verbose { "debug" } else { level };

    // A second call is a no-op.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
