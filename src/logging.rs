//! Process-wide logger setup for applications embedding the library.
//!
//! The library itself only emits through the `log` facade: layer encode/decode
//! sizes at `debug`, store traffic at `trace`. Nothing is printed unless the
//! host installs a logger, either its own or the one below.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::Once;

use log::LevelFilter;

static INIT_LOGGER: Once = Once::new();

/// Installs an `env_logger` logger at `level`, optionally appending to `log_file`.
///
/// Only the first call in a process has any effect. If another logger is
/// already installed it is left in place. Fails only if `log_file` cannot be
/// opened for appending.
pub fn init_logging(level: LevelFilter, log_file: Option<&Path>) -> std::io::Result<()> {
    let file = match log_file {
        Some(path) => Some(OpenOptions::new().append(true).create(true).open(path)?),
        None => None,
    };

    INIT_LOGGER.call_once(|| {
        let mut builder = env_logger::Builder::new();

        builder.is_test(false);
        builder.filter_level(level);

        // Custom formatter: just print the level and message
        builder.format(|buf, record| {
            writeln!(buf, "[{}] {}", record.level(), record.args())?;
            buf.flush()?;
            Ok(())
        });

        if let Some(file) = file {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }

        let _ = builder.try_init();
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("cloak.log");

        init_logging(LevelFilter::Debug, Some(&log_path)).unwrap();
        init_logging(LevelFilter::Trace, None).unwrap();
        assert!(log_path.exists());
    }

    #[test]
    fn test_init_logging_reports_unopenable_file() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened for appending.
        assert!(init_logging(LevelFilter::Info, Some(dir.path())).is_err());
    }
}
