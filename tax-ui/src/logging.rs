//! Tracing setup for the calculator.
//!
//! Records go to stderr so stdout carries only rendered summaries. A second
//! layer appends to a log file once [`enable_file_logging`] names one, and
//! the shared level filter can be swapped at runtime by the `log` command.

use anyhow::Result;
use chrono::Local;
use std::{
    fs::File,
    io::{self, IsTerminal, Write},
    path::Path,
    sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError},
};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter,
    fmt::{
        FmtContext, MakeWriter,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    reload,
    util::SubscriberInitExt,
};

/// `<local time> <LEVEL> <target> <fields>`, colored only on a terminal.
struct CalculatorFormat;

impl<S, N> FormatEvent<S, N> for CalculatorFormat
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
        let ansi = writer.has_ansi_escapes();
        let style = |code: &'static str| if ansi { code } else { "" };
        let reset = style("\x1b[0m");

        let timestamp = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
        write!(writer, "{}{timestamp}{reset} ", style("\x1b[2m"))?;
        write!(
            writer,
            "{}{:>5}{reset} ",
            style(level_color(meta.level())),
            meta.level()
        )?;
        write!(writer, "{}{}{reset} ", style("\x1b[36m"), meta.target())?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

fn level_color(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "\x1b[1;31m",
        Level::WARN => "\x1b[1;33m",
        Level::INFO => "\x1b[1;32m",
        Level::DEBUG => "\x1b[1;34m",
        Level::TRACE => "\x1b[1;35m",
    }
}

type SharedLogFile = Arc<Mutex<Option<File>>>;

/// Log file target that is empty until `--log-file` or the config names one.
#[derive(Clone)]
struct LogFileTarget(SharedLogFile);

struct LogFileWriter<'a>(MutexGuard<'a, Option<File>>);

impl Write for LogFileWriter<'_> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        match &mut *self.0 {
            Some(file) => file.write(buf),
            None => Ok(buf.len()),
        }
    }
    fn flush(&mut self) -> io::Result<()> {
        match &mut *self.0 {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for LogFileTarget {
    type Writer = LogFileWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        LogFileWriter(self.0.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

type ReloadLevelFn = Box<dyn Fn(&str) -> Result<()> + Send + Sync>;

static RELOAD_LEVEL: OnceLock<ReloadLevelFn> = OnceLock::new();
static LOG_FILE: OnceLock<SharedLogFile> = OnceLock::new();

/// `RUST_LOG` wins over the configured default.
fn make_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

fn store_level_handle<S>(handle: reload::Handle<EnvFilter, S>)
where
    S: Subscriber + Send + Sync + 'static,
{
    let _ = RELOAD_LEVEL.set(Box::new(move |directive: &str| {
        let filter = EnvFilter::try_new(directive)
            .map_err(|e| anyhow::anyhow!("invalid log level '{directive}': {e}"))?;
        handle
            .reload(filter)
            .map_err(|e| anyhow::anyhow!("filter reload failed: {e}"))
    }));
}

/// Replaces the level filter, e.g. `debug` or `tax_core=trace`.
pub fn set_log_level(level: &str) -> Result<()> {
    match RELOAD_LEVEL.get() {
        Some(f) => f(level),
        None => anyhow::bail!("logging not yet initialized"),
    }
}

/// Appends log records to `path`, replacing any earlier log file.
pub fn enable_file_logging(path: &Path) -> Result<()> {
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| anyhow::anyhow!("cannot open log file '{}': {e}", path.display()))?;

    match LOG_FILE.get() {
        Some(slot) => {
            *slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(file);
            Ok(())
        }
        None => anyhow::bail!("logging not yet initialized"),
    }
}

/// Installs the global subscriber at `default_level` unless `RUST_LOG` is set.
/// Later calls are ignored.
pub fn init_logging(default_level: &str) {
    let log_file: SharedLogFile = Arc::new(Mutex::new(None));
    let _ = LOG_FILE.set(log_file.clone());

    let (level_filter, level_handle) = reload::Layer::new(make_filter(default_level));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(CalculatorFormat)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);

    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(CalculatorFormat)
        .with_ansi(false)
        .with_writer(LogFileTarget(log_file));

    if tracing_subscriber::registry()
        .with(level_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .is_ok()
    {
        store_level_handle(level_handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn log_file_target_discards_until_a_file_is_set() {
        let target = LogFileTarget(Arc::new(Mutex::new(None)));

        let written = target.make_writer().write(b"dropped\n").expect("discard never fails");

        assert_eq!(written, 8);
    }

    #[test]
    fn log_file_target_appends_once_a_file_is_set() {
        let path = std::env::temp_dir().join(format!("tax-ui-log-{}.log", std::process::id()));
        let _ = std::fs::remove_file(&path);
        let file = File::options()
            .create(true)
            .append(true)
            .open(&path)
            .expect("temp log file");
        let target = LogFileTarget(Arc::new(Mutex::new(Some(file))));

        target.make_writer().write_all(b"first\n").expect("write");
        target.make_writer().write_all(b"second\n").expect("write");

        let contents = std::fs::read_to_string(&path).expect("read back");
        let _ = std::fs::remove_file(&path);
        assert_eq!(contents, "first\nsecond\n");
    }
}
