//! Logger initialization for the command-line tools.
//!
//! The library only emits through the `log` facade. Binaries call
//! [`init_logger`] once at startup.

use std::io::Write;

use log::{LevelFilter, SetLoggerError};

/// Initializes `env_logger` at `level`.
///
/// `RUST_LOG` is read first, then `level` overrides the crate's own filter,
/// so `RUST_LOG=nadir=trace` works for quick debugging while `--log-level`
/// stays authoritative.
///
/// Uses `try_init`, so a second call (e.g. from tests) returns an error
/// instead of panicking.
pub fn init_logger(level: LevelFilter) -> Result<(), SetLoggerError> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_module("nadir", level);
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} {:<5} [{}] {}",
            chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ"),
            record.level(),
            record.target(),
            record.args()
        )
    });
    builder.try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_an_error_not_a_panic() {
        let _ = init_logger(LevelFilter::Debug);
        assert!(init_logger(LevelFilter::Debug).is_err());
    }
}
