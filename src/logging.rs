//! Logging setup for the binary.
//!
//! Installs a global `tracing` subscriber on stderr whose level follows the
//! `-v` count. Output is the bare message, which keeps stdout free for the
//! new tag name.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Errors that may occur while initializing logging.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// A global subscriber was already installed or could not be set.
    #[error("Failed to install tracing subscriber: {0}")]
    Init(Box<dyn std::error::Error + Send + Sync>),
}

/// Map a `-v` count to a level: none → WARN, `-v` → INFO, `-vv` and up → DEBUG.
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    }
}

/// Initialize tracing for the given verbosity.
///
/// `RUST_LOG`, when set, takes precedence over the verbosity level.
pub fn init(verbosity: u8) -> Result<(), LoggingError> {
    let filter = EnvFilter::builder()
        .with_default_directive(level_for(verbosity).into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .with_level(false)
        .try_init()
        .map_err(LoggingError::Init)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for(0), LevelFilter::WARN);
        assert_eq!(level_for(1), LevelFilter::INFO);
        assert_eq!(level_for(2), LevelFilter::DEBUG);
        assert_eq!(level_for(7), LevelFilter::DEBUG);
    }
}
