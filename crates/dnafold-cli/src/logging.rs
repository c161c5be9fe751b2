use crate::error::{CliError, Result};
use std::fs::File;
use std::path::Path;
use tracing_subscriber::{Layer, Registry, filter::LevelFilter, fmt, prelude::*};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// The log file never records less than this, whatever `-v` says.
const FILE_FLOOR: LevelFilter = LevelFilter::DEBUG;

/// Console level for a `-v` count; `--quiet` turns everything off.
pub fn level_filter(verbosity: u8, quiet: bool) -> LevelFilter {
    match (quiet, verbosity) {
        (true, _) => LevelFilter::OFF,
        (false, 0) => LevelFilter::WARN,
        (false, 1) => LevelFilter::INFO,
        (false, 2) => LevelFilter::DEBUG,
        (false, _) => LevelFilter::TRACE,
    }
}

/// Installs the global subscriber: compact stderr output at the `-v` level and,
/// with `--log-file`, a plain-text copy at debug level or finer.
pub fn setup_logging(verbosity: u8, quiet: bool, log_file: Option<&Path>) -> Result<()> {
    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_filter(level_filter(verbosity, quiet));

    let file = log_file
        .map(|path| file_layer(path, level_filter(verbosity, false).max(FILE_FLOOR)))
        .transpose()?;

    tracing_subscriber::registry()
        .with(file)
        .with(console)
        .try_init()
        .map_err(|e| CliError::Other(anyhow::anyhow!("Failed to install logger: {}", e)))
}

fn file_layer(path: &Path, level: LevelFilter) -> Result<BoxedLayer> {
    let file = File::create(path)?;
    Ok(fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_filter(level)
        .boxed())
}
