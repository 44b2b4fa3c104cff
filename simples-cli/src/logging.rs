//! Logging for the `simples` binary.
//!
//! Events go to stderr so reports on stdout can be piped. A second layer
//! appends to a log file once [`enable_file_logging`] names one. Both share a
//! single filter that [`set_log_level`] can swap after startup, which is how
//! a level from the settings file takes effect after the CLI has started.

use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use anyhow::{Context, Result, anyhow, bail};
use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::{FmtContext, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry, reload};

/// Filter used when neither `--log-level` nor `RUST_LOG` is set.
const DEFAULT_FILTER: &str = "warn,simples_core=info,simples_cli=info";

const DIM: &str = "\x1b[2m";
const CYAN: &str = "\x1b[36m";
const RESET: &str = "\x1b[0m";

static FILTER_HANDLE: OnceLock<reload::Handle<EnvFilter, Registry>> = OnceLock::new();
static LOG_FILE: OnceLock<LogFile> = OnceLock::new();

// ===== event format =====

/// `2025-06-01T10:15:02.123+03:00  INFO simples_core::calculations: message key=value`
struct LocalTimeFormat;

fn level_color(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "\x1b[1;31m",
        Level::WARN => "\x1b[1;33m",
        Level::INFO => "\x1b[1;32m",
        Level::DEBUG => "\x1b[1;34m",
        Level::TRACE => "\x1b[1;35m",
    }
}

impl<S, N> FormatEvent<S, N> for LocalTimeFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let timestamp = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");

        if writer.has_ansi_escapes() {
            let color = level_color(meta.level());
            write!(
                writer,
                "{DIM}{timestamp}{RESET} {color}{:>5}{RESET} {CYAN}{}:{RESET} ",
                meta.level(),
                meta.target()
            )?;
        } else {
            write!(writer, "{timestamp} {:>5} {}: ", meta.level(), meta.target())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

// ===== late-bound log file =====

/// Log file that can be opened after the subscriber is installed.
/// Output is dropped until a file is set.
#[derive(Clone, Default)]
struct LogFile(Arc<Mutex<Option<File>>>);

impl LogFile {
    fn lock(&self) -> MutexGuard<'_, Option<File>> {
        // A panic mid-write leaves the file handle itself intact.
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

struct LogFileWriter<'a>(MutexGuard<'a, Option<File>>);

impl Write for LogFileWriter<'_> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        self.0.as_mut().map_or(Ok(buf.len()), |file| file.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.as_mut().map_or(Ok(()), |file| file.flush())
    }
}

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = LogFileWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        LogFileWriter(self.lock())
    }
}

// ===== filter =====

/// An explicit, valid `level` wins, then `RUST_LOG`, then [`DEFAULT_FILTER`].
fn initial_filter(level: Option<&str>) -> EnvFilter {
    level
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

// ===== public API =====

/// Installs the global subscriber. Later calls are no-ops.
pub fn init_logging(level: Option<&str>) {
    let log_file = LOG_FILE.get_or_init(LogFile::default).clone();
    let (filter, handle) = reload::Layer::new(initial_filter(level));

    let stderr = tracing_subscriber::fmt::layer()
        .event_format(LocalTimeFormat)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);

    let file = tracing_subscriber::fmt::layer()
        .event_format(LocalTimeFormat)
        .with_ansi(false)
        .with_writer(log_file);

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(stderr)
        .with(file)
        .try_init();

    if installed.is_ok() {
        let _ = FILTER_HANDLE.set(handle);
    }
}

/// Replaces the active filter. Takes a bare level such as `debug` or any
/// `EnvFilter` directive such as `warn,simples_core=trace`.
pub fn set_log_level(level: &str) -> Result<()> {
    let Some(handle) = FILTER_HANDLE.get() else {
        bail!("logging not initialized");
    };
    let filter =
        EnvFilter::try_new(level).with_context(|| format!("invalid log level '{level}'"))?;
    handle
        .reload(filter)
        .map_err(|err| anyhow!("cannot apply log level '{level}': {err}"))
}

/// Appends log output to `path`, replacing any file set earlier.
pub fn enable_file_logging(path: &Path) -> Result<()> {
    let Some(log_file) = LOG_FILE.get() else {
        bail!("logging not initialized");
    };
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file '{}'", path.display()))?;

    *log_file.lock() = Some(file);
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn explicit_level_wins() {
        assert_eq!(initial_filter(Some("debug")).to_string(), "debug");
    }

    #[test]
    fn invalid_level_falls_back() {
        let filter = initial_filter(Some("simples_core=loud"));

        assert!(!filter.to_string().contains("loud"));
    }

    #[test]
    fn log_file_discards_output_until_set() {
        let log_file = LogFile::default();
        let mut writer = log_file.make_writer();

        assert_eq!(writer.write(b"dropped").unwrap(), 7);
        assert!(writer.flush().is_ok());
    }

    #[test]
    fn level_colors_are_distinct() {
        let levels = [Level::ERROR, Level::WARN, Level::INFO, Level::DEBUG, Level::TRACE];
        let mut colors: Vec<_> = levels.iter().map(level_color).collect();
        colors.sort_unstable();
        colors.dedup();

        assert_eq!(colors.len(), levels.len());
    }
}
