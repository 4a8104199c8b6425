//! Tracing setup shared by the binaries

use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `dq_workflow=warn`, or `=debug` with
/// `verbose`. Events go to stderr so stdout carries only operator output.
pub fn init_tracing(verbose: bool) {
    let default = if verbose {
        "dq_workflow=debug"
    } else {
        "dq_workflow=warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
