use crate::types::LogLevel;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Logs always go to stderr so that stdout
/// stays parseable with `--format json`.
///
/// `MONLIVRE_LOG` takes precedence over `--log-level`.
pub fn init(level: LogLevel, json: bool) {
    let env_filter = match EnvFilter::try_from_env("MONLIVRE_LOG") {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new(level.to_string()),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    // Fails only when a subscriber is already installed
    let _ = if json {
        subscriber.json().try_init()
    } else {
        subscriber.try_init()
    };
}
