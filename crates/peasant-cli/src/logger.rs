//! Diagnostic logging
//!
//! Libraries emit `tracing` events; nothing is printed unless a level was
//! requested with `--log` or `PEASANT_LOG`.

use std::io;
use tracing_subscriber::fmt;

pub use tracing::Level;

/// Accepted level names
pub const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Install a stderr subscriber when `level` is given
pub fn init(level: Option<Level>) {
    if let Some(level) = level {
        let format = fmt::format().without_time().with_target(false).compact();
        // A second init (e.g. from tests) keeps the first subscriber.
        let _ = fmt()
            .with_max_level(level)
            .event_format(format)
            .with_writer(io::stderr)
            .try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::{Level, LEVELS};
    use std::str::FromStr;

    #[test]
    fn test_parses_all_levels() {
        for level in &LEVELS {
            assert!(Level::from_str(level).is_ok(), "{level}");
        }
    }

    #[test]
    fn test_rejects_unknown_level() {
        assert!(Level::from_str("loud").is_err());
    }
}
