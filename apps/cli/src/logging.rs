use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
fn default_directives(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn,skydrop=info",
        1 => "info,skydrop=debug",
        _ => "debug,skydrop=trace",
    }
}

/// Installs the global subscriber. Logs go to stderr so stdout stays clean
/// for links and status output.
pub fn init(verbose: u8) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose))),
        )
        .with_writer(std::io::stderr)
        .init();
}
