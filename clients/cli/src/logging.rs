//! Console and file log sinks.
//!
//! Command output goes through the log: the console sink prints bare
//! messages to stderr, the file sink keeps a timestamped copy of the run.
use std::fmt;
use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use tracing::subscriber::DefaultGuard;
use tracing::{Event, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::{self, FormatEvent, FormatFields};
use tracing_subscriber::fmt::{FmtContext, MakeWriter};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer};

pub const LOG_DIR: &str = "logs";
pub const LOG_FILE: &str = "akamai-iam.log";
const LOG_FILTER_VAR: &str = "AKAMAI_IAM_LOG";

const INFO_DIRECTIVES: &str =
    "warn,akamai_iam=info,akamai_iam_cli=info,akamai_iam_client=info";
const DEBUG_DIRECTIVES: &str =
    "warn,akamai_iam=debug,akamai_iam_cli=debug,akamai_iam_client=debug";

/// Writes the message and fields of an event, nothing else.
pub struct MessageOnly;

impl<S, N> FormatEvent<S, N> for MessageOnly
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: format::Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

/// `2024-05-01 10:00:00,123 [main        ] [INFO ]  message`, in local time.
pub struct FileLine;

impl<S, N> FormatEvent<S, N> for FileLine
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: format::Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let thread = std::thread::current();
        write!(
            writer,
            "{} [{:<12.12}] [{:<5.5}]  ",
            Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
            thread.name().unwrap_or("unnamed"),
            event.metadata().level().to_string(),
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

fn level_filter(debug: bool) -> EnvFilter {
    EnvFilter::builder()
        .with_env_var(LOG_FILTER_VAR)
        .try_from_env()
        .unwrap_or_else(|_| {
            if debug {
                DEBUG_DIRECTIVES.into()
            } else {
                INFO_DIRECTIVES.into()
            }
        })
}

pub fn console_layer<S, W>(writer: W, debug: bool) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt::layer()
        .event_format(MessageOnly)
        .with_writer(writer)
        .with_filter(level_filter(debug))
}

/// The logging setup of one run. Logs are routed to the sinks for as long as
/// this is alive.
pub struct LoggingContext {
    _file_guard: Option<WorkerGuard>,
    _default: DefaultGuard,
}

impl LoggingContext {
    /// Installs both sinks, the console one on stderr. If the log file can't
    /// be created we carry on with the console only.
    pub fn install(log_dir: &Path, debug: bool) -> Self {
        Self::install_with(log_dir, debug, std::io::stderr)
    }

    fn install_with<W>(log_dir: &Path, debug: bool, console: W) -> Self
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let (file_layer, file_guard, file_error) = match open_log_file(log_dir)
        {
            | Ok(file) => {
                let (non_blocking, guard) = tracing_appender::non_blocking(file);
                let layer = tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .event_format(FileLine)
                    .with_writer(non_blocking)
                    .with_filter(level_filter(debug));
                (Some(layer), Some(guard), None)
            }
            | Err(e) => (None, None, Some(e)),
        };

        let subscriber = tracing_subscriber::registry()
            .with(console_layer(console, debug))
            .with(file_layer);
        let default = tracing::subscriber::set_default(subscriber);

        if let Some(e) = file_error {
            tracing::warn!("Logging to console only: {e:#}");
        }

        Self {
            _file_guard: file_guard,
            _default: default,
        }
    }
}

/// Creates the log directory if needed and truncates the log file.
fn open_log_file(log_dir: &Path) -> Result<File> {
    std::fs::create_dir_all(log_dir).with_context(|| {
        format!("Cannot create log directory {}", log_dir.display())
    })?;
    let path = log_dir.join(LOG_FILE);
    File::create(&path)
        .with_context(|| format!("Cannot create log file {}", path.display()))
}

#[cfg(test)]
pub(crate) mod test_util {
    use std::io;
    use std::sync::{Arc, Mutex};

    use tracing_subscriber::fmt::MakeWriter;

    /// An in-memory sink.
    #[derive(Clone, Default)]
    pub struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Capture {
        pub fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Capture {
        type Writer = Capture;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }
}
