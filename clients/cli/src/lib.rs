mod args;
mod client;
mod command;
mod commands;
mod config;
mod logging;
mod report;

use anyhow::Result;
pub use command::RunCommand;

pub use self::args::{
    print_help,
    program_name,
    Cli,
    CliCommand,
    CommandKind,
    CommonOptions,
};
pub use self::client::WrappedClient;
pub use self::config::{Config, Session};
pub use self::logging::{LoggingContext, LOG_DIR, LOG_FILE};
pub use self::report::{Report, FETCH_ERROR};

/// Resolves the credentials, performs the single API call of `command` and
/// emits its report.
///
/// Only configuration and transport failures are errors. A non-200 response
/// is reported and counts as a completed run.
pub async fn run_cli(command: &CliCommand, config: &Config) -> Result<()> {
    let session = config.open_session()?;
    let report = command.run(&session).await?;
    report.emit();
    Ok(())
}
