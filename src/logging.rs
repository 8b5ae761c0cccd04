use std::fs::OpenOptions;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the demo binary's subscriber.
///
/// `RUST_LOG` sets the filter (default `info`). Events go to stderr unless
/// `SLICESTORE_LOG` names a file to append to.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let log_path = std::env::var("SLICESTORE_LOG").ok();

    let file = log_path.as_deref().map(|path| {
        OpenOptions::new().create(true).append(true).open(path)
    });

    match file {
        Some(Ok(file)) => {
            let file_layer = fmt::layer()
                .with_writer(file)
                .with_ansi(false)
                .with_target(true);
            tracing_subscriber::registry()
                .with(filter)
                .with(file_layer)
                .init();
        }
        other => {
            let stderr_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_timer(fmt::time::UtcTime::rfc_3339())
                .with_target(false);
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .init();
            if let (Some(Err(err)), Some(path)) = (other, log_path) {
                tracing::warn!(path = %path, error = %err, "Cannot open log file, logging to stderr");
            }
        }
    }
}
