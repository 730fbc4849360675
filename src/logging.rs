use tracing_subscriber::EnvFilter;

use crate::config::LoggingSettings;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level. `format = "pretty"` selects
/// the multi-line formatter, anything else the compact default.
pub fn init(settings: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    // A subscriber may already be installed (tests, embedding binaries)
    let result = if settings.format == "pretty" {
        subscriber.pretty().try_init()
    } else {
        subscriber.try_init()
    };

    if let Err(e) = result {
        eprintln!("Tracing already initialised: {}", e);
    }
}
