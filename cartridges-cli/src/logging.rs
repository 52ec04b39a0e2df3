//! Console logger setup.
//!
//! All user-facing output goes through the `log` macros. Info-level lines are
//! printed bare; other levels carry their level name. `--logfile` copies
//! every line to a file with color codes removed.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use log::{Level, LevelFilter};

use crate::CliError;

/// Writes to stdout and, optionally, an ANSI-free copy to a file.
struct Tee {
    file: Option<File>,
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stdout().write_all(buf)?;
        if let Some(file) = &mut self.file {
            file.write_all(&strip_ansi_escapes::strip(buf))?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()?;
        if let Some(file) = &mut self.file {
            file.flush()?;
        }
        Ok(())
    }
}

fn level_filter(quiet: bool, verbose: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Install the global logger. `RUST_LOG` takes precedence over the flags.
pub(crate) fn init(quiet: bool, verbose: bool, logfile: Option<&Path>) -> Result<(), CliError> {
    let file = match logfile {
        Some(path) => Some(File::create(path)?),
        None => None,
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level_filter(quiet, verbose));
    builder.parse_default_env();

    if verbose {
        builder.format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} [{}] {}",
                buf.timestamp_millis(),
                record.level(),
                record.target(),
                record.args()
            )
        });
    } else {
        builder.format(|buf, record| match record.level() {
            Level::Info => writeln!(buf, "{}", record.args()),
            level => writeln!(buf, "{}: {}", level, record.args()),
        });
    }

    builder.target(env_logger::Target::Pipe(Box::new(Tee { file })));
    builder
        .try_init()
        .map_err(|e| CliError::logging(e.to_string()))
}
