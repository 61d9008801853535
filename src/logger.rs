use std::sync::OnceLock;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

static TRACING_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Install the global tracing subscriber.
///
/// The filter is read from `RUST_LOG`, falling back to "info" when the
/// variable is unset or invalid. Calling this more than once is a no-op.
pub fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let mut result = Ok(());

    TRACING_INITIALIZED.get_or_init(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info"));

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .finish();

        result = tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| e.into());
    });

    result
}

// Public API functions
pub fn info(msg: &str) {
    tracing::info!("{}", msg);
}

pub fn warn(msg: &str) {
    tracing::warn!("{}", msg);
}

pub fn error(msg: &str) {
    tracing::error!("{}", msg);
}

pub fn debug(msg: &str) {
    tracing::debug!("{}", msg);
}

// Utility function to format elapsed time as HH:MM:SS
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
