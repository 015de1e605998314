//! Logger setup for the server binary.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use env_logger::{Builder, Env, Target};

use crate::config::Config;
use crate::error::ServerError;

/// Install the global `env_logger` sink described by `config.logging`.
///
/// Log lines are always appended to `logging.file`. In `development` they are
/// also copied to stderr.
pub fn init(config: &Config) -> Result<(), ServerError> {
    let mut builder =
        Builder::from_env(Env::default().default_filter_or(config.logging.level.as_str()));

    let file = open_log_file(&config.logging.file)?;
    if config.is_development() {
        builder.target(Target::Pipe(Box::new(Tee(io::stderr(), file))));
    } else {
        builder.target(Target::Pipe(Box::new(file)));
    }

    builder
        .try_init()
        .map_err(|e| ServerError::logging(e.to_string()))
}

/// Open `path` for appending, creating missing parent directories.
pub fn open_log_file(path: &Path) -> Result<File, ServerError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| ServerError::logging(format!("cannot open {}: {e}", path.display())))
}

/// Writer that duplicates everything into two sinks.
pub struct Tee<A, B>(pub A, pub B);

impl<A: Write, B: Write> Write for Tee<A, B> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write_all(buf)?;
        self.1.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()?;
        self.1.flush()
    }
}
